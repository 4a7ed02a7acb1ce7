//! DOM side of a mounted viewer: canvas, marker layer and status overlay
//! under the mount element, plus the input listeners.

use crate::constants::*;
use crate::dom::{self, set_hidden, set_style};
use crate::events::pointer;
use crate::events::Listener;
use crate::markup;
use crate::viewer::ViewerInner;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tour_core::{Cursor, Hotspot, InputChannel, LoadState, Marker, MarkerPlacement, MountSurface, ViewerSession};
use web_sys as web;

pub type ActivateFn = Rc<dyn Fn(Hotspot)>;
pub type RetryFn = Rc<dyn Fn()>;

/// Host callbacks raised from inside the viewer's DOM.
#[derive(Clone)]
pub struct HostHooks {
    pub activate: ActivateFn,
    /// Pressed on the error overlay after a failed load.
    pub retry: RetryFn,
}

pub struct DomMarker {
    element: web::HtmlElement,
    _listeners: [Listener; 4],
}

pub struct DomSurface {
    document: web::Document,
    mount: web::HtmlElement,
    canvas: web::HtmlCanvasElement,
    marker_layer: web::HtmlElement,
    status: web::HtmlElement,
    retry_button: Option<(web::HtmlElement, [Listener; 2])>,
    viewer: Weak<RefCell<ViewerInner>>,
    hooks: HostHooks,
}

impl DomSurface {
    pub fn new(mount: &web::HtmlElement, hooks: HostHooks) -> anyhow::Result<Self> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        let canvas: web::HtmlCanvasElement = dom::append_element(&document, mount, "canvas", CANVAS_CLASS)?;
        _ = canvas.set_attribute("style", markup::CANVAS_STYLE);
        let marker_layer: web::HtmlElement =
            dom::append_element(&document, mount, "div", MARKER_LAYER_CLASS)?;
        _ = marker_layer.set_attribute("style", markup::MARKER_LAYER_STYLE);
        set_style(&marker_layer, "z-index", &Z_MARKERS.to_string());
        let status: web::HtmlElement = dom::append_element(&document, mount, "div", LOADING_CLASS)?;
        _ = status.set_attribute("style", markup::STATUS_STYLE);
        set_style(&status, "z-index", &Z_LOADING.to_string());
        Ok(Self {
            document,
            mount: mount.clone(),
            canvas,
            marker_layer,
            status,
            retry_button: None,
            viewer: Weak::new(),
            hooks,
        })
    }

    /// Point input handlers at the viewer that owns this surface.
    pub fn bind(&mut self, viewer: Weak<RefCell<ViewerInner>>) {
        self.viewer = viewer;
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    pub fn mount(&self) -> &web::HtmlElement {
        &self.mount
    }

    fn build_marker(&self, index: usize, marker: &Marker) -> anyhow::Result<DomMarker> {
        let element: web::HtmlElement =
            dom::append_element(&self.document, &self.marker_layer, "div", MARKER_CLASS)?;
        _ = element.set_attribute("style", &markup::marker_base_style(Z_MARKERS));
        _ = element.set_attribute("role", "button");
        _ = element.set_attribute("aria-label", &marker.title);
        element.set_inner_html(&markup::marker_inner_html(
            &marker.kind,
            ARROW_BADGE_RGBA,
            INFO_BADGE_RGBA,
        ));
        let tooltip: web::HtmlElement =
            dom::append_element(&self.document, &element, "span", TOOLTIP_CLASS)?;
        _ = tooltip.set_attribute("style", markup::TOOLTIP_STYLE);
        tooltip.set_text_content(Some(&marker.title));

        // keep drags from starting underneath a marker
        let down = Listener::new(&element, "pointerdown", |ev: web::PointerEvent| {
            ev.stop_propagation();
        });
        let viewer = self.viewer.clone();
        let on_activate = self.hooks.activate.clone();
        let click = Listener::new(&element, "click", move |ev: web::MouseEvent| {
            ev.stop_propagation();
            if let Some(h) = activation(&viewer, index) {
                on_activate(h);
            }
        });
        let has_title = !marker.title.trim().is_empty();
        let tip = tooltip.clone();
        let enter = Listener::new(&element, "pointerenter", move |_: web::PointerEvent| {
            if has_title {
                set_style(&tip, "opacity", "1");
            }
        });
        let leave = Listener::new(&element, "pointerleave", move |_: web::PointerEvent| {
            set_style(&tooltip, "opacity", "0");
        });
        Ok(DomMarker {
            element,
            _listeners: [down, click, enter, leave],
        })
    }

    fn show_retry(&mut self) -> anyhow::Result<()> {
        let button: web::HtmlElement =
            dom::append_element(&self.document, &self.status, "button", RETRY_CLASS)?;
        _ = button.set_attribute("type", "button");
        _ = button.set_attribute("style", markup::RETRY_STYLE);
        button.set_text_content(Some(markup::RETRY_LABEL));
        let down = Listener::new(&button, "pointerdown", |ev: web::PointerEvent| {
            ev.stop_propagation();
        });
        let retry = self.hooks.retry.clone();
        let click = Listener::new(&button, "click", move |ev: web::MouseEvent| {
            ev.stop_propagation();
            retry();
        });
        self.retry_button = Some((button, [down, click]));
        Ok(())
    }

    fn clear_retry(&mut self) {
        if let Some((button, _listeners)) = self.retry_button.take() {
            button.remove();
        }
    }
}

fn with_session(viewer: &Weak<RefCell<ViewerInner>>, f: impl FnOnce(&mut ViewerSession<DomSurface>)) {
    let Some(inner) = viewer.upgrade() else {
        return;
    };
    // a handler firing while the viewer is already borrowed is dropped
    if let Ok(mut guard) = inner.try_borrow_mut() {
        f(&mut guard.session);
    };
}

fn activation(viewer: &Weak<RefCell<ViewerInner>>, index: usize) -> Option<Hotspot> {
    let inner = viewer.upgrade()?;
    let guard = inner.try_borrow().ok()?;
    guard.session.activate(index)
}

impl MountSurface for DomSurface {
    type Listener = Listener;
    type Marker = Option<DomMarker>;

    fn listen(&mut self, channel: InputChannel) -> Listener {
        let viewer = self.viewer.clone();
        let name = pointer::event_name(channel);
        match channel {
            InputChannel::PointerDown => Listener::new(&self.mount, name, move |ev: web::PointerEvent| {
                if !pointer::is_primary_button(&ev) {
                    return;
                }
                let (x, y) = pointer::client_pos(&ev);
                with_session(&viewer, |s| s.pointer_down(x, y));
            }),
            InputChannel::PointerMove => Listener::new(&self.document, name, move |ev: web::PointerEvent| {
                let (x, y) = pointer::client_pos(&ev);
                with_session(&viewer, |s| s.pointer_move(x, y));
            }),
            InputChannel::PointerUp => Listener::new(&self.document, name, move |_: web::PointerEvent| {
                with_session(&viewer, |s| s.pointer_up());
            }),
            InputChannel::Wheel => Listener::non_passive(&self.mount, name, move |ev: web::WheelEvent| {
                ev.prevent_default();
                let delta = pointer::wheel_delta_px(&ev);
                with_session(&viewer, |s| {
                    s.wheel(delta);
                });
            }),
        }
    }

    fn unlisten(&mut self, listener: Listener) {
        drop(listener);
    }

    fn create_marker(&mut self, index: usize, marker: &Marker) -> Option<DomMarker> {
        match self.build_marker(index, marker) {
            Ok(m) => Some(m),
            Err(e) => {
                log::error!("[viewer] marker {} not created: {:?}", marker.id, e);
                None
            }
        }
    }

    fn place_marker(&mut self, marker: &Option<DomMarker>, placement: &MarkerPlacement<'_>) {
        let Some(m) = marker else {
            return;
        };
        set_style(&m.element, "display", markup::display_for(placement.visible));
        if placement.visible {
            set_style(&m.element, "left", &markup::px(placement.screen.x));
            set_style(&m.element, "top", &markup::px(placement.screen.y));
        }
    }

    fn remove_marker(&mut self, marker: Option<DomMarker>) {
        if let Some(m) = marker {
            m.element.remove();
        }
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        set_style(&self.mount, "cursor", cursor.css());
    }

    fn load_state_changed(&mut self, state: &LoadState) {
        match state {
            LoadState::Loading { progress } => {
                self.status.set_text_content(Some(&markup::loading_label(*progress)));
                set_hidden(&self.status, false);
            }
            LoadState::Ready => set_hidden(&self.status, true),
            LoadState::Failed { reason } => {
                log::error!("[viewer] panorama failed to load: {}", reason);
                self.clear_retry();
                self.status.set_text_content(Some(&markup::load_error_label(reason)));
                if let Err(e) = self.show_retry() {
                    log::error!("[viewer] retry button not created: {:?}", e);
                }
                set_hidden(&self.status, false);
            }
        }
    }

    fn detach(&mut self) {
        self.clear_retry();
        self.canvas.remove();
        self.marker_layer.remove();
        self.status.remove();
        _ = self.mount.style().remove_property("cursor");
    }
}
