//! Tour host: owns the registry and tour state, mounts one viewer at a time
//! and reacts to hotspot activations.

use crate::dom;
use crate::events::Listener;
use crate::overlay::Chrome;
use crate::surface::{ActivateFn, HostHooks, RetryFn};
use crate::viewer::{self, ViewerHandle};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tour_core::{Hotspot, Orientation, SceneRegistry, TourAction, TourState, ViewerProps, ViewerSettings, Viewport};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub struct TourApp {
    registry: SceneRegistry,
    settings: ViewerSettings,
    state: TourState,
    chrome: Chrome,
    viewer: Option<ViewerHandle>,
    _listeners: Vec<Listener>,
}

impl TourApp {
    pub fn start(
        root: web::HtmlElement,
        registry: SceneRegistry,
        settings: ViewerSettings,
    ) -> anyhow::Result<Rc<RefCell<TourApp>>> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        let chrome = Chrome::build(&document, &root)?;
        let state = TourState::new(&registry);
        chrome.set_auto_rotate(state.auto_rotate());

        let app = Rc::new(RefCell::new(TourApp {
            registry,
            settings,
            state,
            chrome,
            viewer: None,
            _listeners: Vec::new(),
        }));
        let listeners = Self::wire_chrome(&app);
        app.borrow_mut()._listeners = listeners;
        Self::show_current(&app, None)?;
        Ok(app)
    }

    fn wire_chrome(app: &Rc<RefCell<TourApp>>) -> Vec<Listener> {
        let this = app.borrow();
        let weak = Rc::downgrade(app);
        let toggle = Listener::new(&this.chrome.toggle, "click", move |_: web::MouseEvent| {
            if let Some(app) = weak.upgrade() {
                app.borrow_mut().toggle_auto_rotate();
            }
        });
        let weak = Rc::downgrade(app);
        let close = Listener::new(&this.chrome.popup_close, "click", move |_: web::MouseEvent| {
            if let Some(app) = weak.upgrade() {
                app.borrow_mut().dismiss_info();
            }
        });
        // clicking the backdrop closes, clicks inside the card do not
        let weak = Rc::downgrade(app);
        let backdrop = Listener::new(&this.chrome.popup, "click", move |_: web::MouseEvent| {
            if let Some(app) = weak.upgrade() {
                app.borrow_mut().dismiss_info();
            }
        });
        let card = Listener::new(&this.chrome.popup_card, "click", |ev: web::MouseEvent| {
            ev.stop_propagation();
        });
        vec![toggle, close, backdrop, card]
    }

    fn toggle_auto_rotate(&mut self) {
        let on = self.state.toggle_auto_rotate();
        if let Some(v) = &self.viewer {
            v.set_auto_rotate(on);
        }
        self.chrome.set_auto_rotate(on);
        log::info!("[tour] auto-rotate {}", if on { "on" } else { "off" });
    }

    fn dismiss_info(&mut self) {
        self.state.dismiss_popup();
        self.chrome.close_info();
    }

    /// Mount a viewer for the current scene, replacing any existing one.
    fn show_current(app: &Rc<RefCell<TourApp>>, carried: Option<Orientation>) -> anyhow::Result<()> {
        let hooks = HostHooks {
            activate: Self::activation_callback(Rc::downgrade(app)),
            retry: Self::retry_callback(Rc::downgrade(app)),
        };
        let mut guard = app.borrow_mut();
        let this = &mut *guard;
        let scene = this.state.current_scene(&this.registry)?;
        this.chrome.set_caption(&scene.name, &scene.description);

        let rect = this.chrome.stage.get_bounding_client_rect();
        let props = ViewerProps::for_scene(
            scene,
            this.state.auto_rotate(),
            Viewport::new(rect.width() as f32, rect.height() as f32),
        );
        let handle = viewer::mount(
            &this.chrome.stage,
            props,
            this.settings.clone(),
            carried,
            hooks,
        )?;
        log::info!("[tour] showing {} ({})", scene.key, scene.name);
        this.viewer = Some(handle);
        Ok(())
    }

    /// Activations arrive from a marker click inside the viewer. Handling is
    /// deferred to a task so the viewer can be unmounted safely.
    fn activation_callback(app: Weak<RefCell<TourApp>>) -> ActivateFn {
        Rc::new(move |hotspot: Hotspot| {
            let app = app.clone();
            spawn_local(async move {
                let Some(app) = app.upgrade() else {
                    return;
                };
                if let Err(e) = TourApp::handle_activation(&app, hotspot) {
                    log::error!("[tour] activation failed: {:?}", e);
                }
            });
        })
    }

    fn retry_callback(app: Weak<RefCell<TourApp>>) -> RetryFn {
        Rc::new(move || {
            let app = app.clone();
            spawn_local(async move {
                let Some(app) = app.upgrade() else {
                    return;
                };
                if let Err(e) = TourApp::handle_retry(&app) {
                    log::error!("[tour] retry failed: {:?}", e);
                }
            });
        })
    }

    fn handle_activation(app: &Rc<RefCell<TourApp>>, hotspot: Hotspot) -> anyhow::Result<()> {
        let action = {
            let mut guard = app.borrow_mut();
            let this = &mut *guard;
            this.state.activate(&hotspot, &this.registry)
        };
        Self::apply(app, action)
    }

    fn handle_retry(app: &Rc<RefCell<TourApp>>) -> anyhow::Result<()> {
        let action = {
            let mut guard = app.borrow_mut();
            let this = &mut *guard;
            this.state.retry(&this.registry)
        };
        Self::apply(app, action)
    }

    fn apply(app: &Rc<RefCell<TourApp>>, action: TourAction) -> anyhow::Result<()> {
        let carried = {
            let mut guard = app.borrow_mut();
            let this = &mut *guard;
            match &action {
                TourAction::SwitchScene(_) => {
                    this.chrome.close_info();
                    let policy = this.settings.on_scene_change;
                    this.viewer
                        .take()
                        .map(|v| v.unmount().carried_over(policy))
                }
                // same scene, keep the view exactly as it was
                TourAction::Reload(_) => {
                    this.chrome.close_info();
                    this.viewer.take().map(ViewerHandle::unmount)
                }
                TourAction::ShowInfo(text) => {
                    this.chrome.open_info(text);
                    return Ok(());
                }
                TourAction::Ignored(_) => return Ok(()),
            }
        };
        Self::show_current(app, carried)
    }
}
