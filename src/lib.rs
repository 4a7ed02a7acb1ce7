#![cfg(target_arch = "wasm32")]
use crate::constants::{ROOT_ID, TOUR_JSON};
use std::cell::RefCell;
use std::rc::Rc;
use tour_core::{SceneRegistry, TourConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod constants;
mod dom;
mod events;
mod frame;
mod loader;
mod markup;
mod overlay;
mod render;
mod surface;
mod viewer;

thread_local! {
    static APP: RefCell<Option<Rc<RefCell<app::TourApp>>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tour-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let root: web::HtmlElement = document
        .get_element_by_id(ROOT_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", ROOT_ID))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let mut config = TourConfig::from_json(TOUR_JSON)?;
    for fix in config.viewer.sanitize() {
        log::warn!("[tour] viewer settings: {}", fix);
    }
    let (registry, problems) = SceneRegistry::load_lenient(&config)?;
    if !problems.is_empty() {
        log::warn!(
            "[tour] {} configuration problem(s); affected hotspots are disabled",
            problems.len()
        );
    }
    for key in registry.unreachable_from(registry.start_key()) {
        log::warn!("[tour] scene {} cannot be reached from {}", key, registry.start_key());
    }
    log::info!(
        "[tour] {} scene(s), starting at {}",
        registry.len(),
        registry.start_key()
    );

    let app = app::TourApp::start(root, registry, config.viewer)?;
    APP.with(|slot| *slot.borrow_mut() = Some(app));
    Ok(())
}
