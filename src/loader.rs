//! Panorama download with byte-level progress, decoded off the main thread
//! by `createImageBitmap`.

use crate::dom::js_err;
use anyhow::{anyhow, bail};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Fetch `uri` and decode it. `on_progress(loaded, total)` is called per
/// chunk; `total` is 0 when the server sends no Content-Length.
pub async fn fetch_panorama(
    uri: &str,
    mut on_progress: impl FnMut(u64, u64),
) -> anyhow::Result<web::ImageBitmap> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(uri))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !resp.ok() {
        bail!("{} returned HTTP {}", uri, resp.status());
    }
    let total = resp
        .headers()
        .get("content-length")
        .ok()
        .flatten()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(0);
    let body = resp.body().ok_or_else(|| anyhow!("{} has no body", uri))?;
    let reader: web::ReadableStreamDefaultReader = body.get_reader().unchecked_into();

    let chunks = js_sys::Array::new();
    let mut loaded = 0u64;
    loop {
        let step = JsFuture::from(reader.read()).await.map_err(js_err)?;
        let done = js_sys::Reflect::get(&step, &"done".into())
            .map_err(js_err)?
            .as_bool()
            .unwrap_or(true);
        if done {
            break;
        }
        let chunk: js_sys::Uint8Array = js_sys::Reflect::get(&step, &"value".into())
            .map_err(js_err)?
            .dyn_into()
            .map_err(js_err)?;
        loaded += chunk.length() as u64;
        chunks.push(&chunk);
        // compressed transfers can report a Content-Length below the decoded size
        on_progress(loaded, if total > 0 { total.max(loaded) } else { 0 });
    }
    on_progress(loaded, loaded);
    log::debug!("[loader] {} fetched, {} bytes", uri, loaded);

    let blob = web::Blob::new_with_u8_array_sequence(&chunks).map_err(js_err)?;
    let bitmap = JsFuture::from(window.create_image_bitmap_with_blob(&blob).map_err(js_err)?)
        .await
        .map_err(|e| anyhow!("{} could not be decoded: {:?}", uri, e))?;
    bitmap
        .dyn_into::<web::ImageBitmap>()
        .map_err(|_| anyhow!("{} did not decode to an ImageBitmap", uri))
}
