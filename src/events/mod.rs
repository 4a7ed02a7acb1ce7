//! DOM event listeners owned by Rust values.
//!
//! A [`Listener`] removes itself from its target when dropped, so whoever
//! holds it controls how long the handler stays attached.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub mod pointer;

pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new<E, F>(target: &web::EventTarget, event: &'static str, handler: F) -> Self
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        Self::attach(target, event, None, handler)
    }

    /// For handlers that call `preventDefault` on scroll-like events.
    pub fn non_passive<E, F>(target: &web::EventTarget, event: &'static str, handler: F) -> Self
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        Self::attach(target, event, Some(false), handler)
    }

    fn attach<E, F>(
        target: &web::EventTarget,
        event: &'static str,
        passive: Option<bool>,
        mut handler: F,
    ) -> Self
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            handler(ev.unchecked_into::<E>());
        }) as Box<dyn FnMut(web::Event)>);
        let res = match passive {
            Some(p) => {
                let opts = web::AddEventListenerOptions::new();
                opts.set_passive(p);
                target.add_event_listener_with_callback_and_add_event_listener_options(
                    event,
                    closure.as_ref().unchecked_ref(),
                    &opts,
                )
            }
            None => target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()),
        };
        if let Err(e) = res {
            log::warn!("[events] could not listen for {}: {:?}", event, e);
        }
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
