use anyhow::anyhow;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

/// Create `<tag class="...">` and append it to `parent`.
pub fn append_element<T: JsCast>(
    document: &web::Document,
    parent: &web::Element,
    tag: &str,
    class: &str,
) -> anyhow::Result<T> {
    let el = document.create_element(tag).map_err(js_err)?;
    el.set_class_name(class);
    parent.append_child(&el).map_err(js_err)?;
    el.dyn_into::<T>()
        .map_err(|_| anyhow!("<{}> is not the expected element type", tag))
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

#[inline]
pub fn set_hidden(el: &web::HtmlElement, hidden: bool) {
    let cl = el.class_list();
    if hidden {
        _ = cl.add_1(crate::constants::HIDDEN_CLASS);
    } else {
        _ = cl.remove_1(crate::constants::HIDDEN_CLASS);
    }
    // inline fallback for pages without the stylesheet; leaves `display` alone
    set_style(el, "visibility", if hidden { "hidden" } else { "visible" });
}

/// Match the canvas backing store to its CSS box. Only touches the canvas when
/// the size changed, since assigning width/height clears it.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = ((rect.width() * dpr) as u32).max(1);
        let h_px = ((rect.height() * dpr) as u32).max(1);
        if canvas.width() != w_px {
            canvas.set_width(w_px);
        }
        if canvas.height() != h_px {
            canvas.set_height(h_px);
        }
    }
    (canvas.width(), canvas.height())
}
