//! Page chrome around the viewer: scene caption, auto-rotate toggle and the
//! information popup.

use crate::constants::*;
use crate::dom::{self, set_hidden, set_style};
use crate::markup;
use web_sys as web;

pub struct Chrome {
    pub stage: web::HtmlElement,
    caption_title: web::HtmlElement,
    caption_text: web::HtmlElement,
    pub toggle: web::HtmlElement,
    pub popup: web::HtmlElement,
    pub popup_card: web::HtmlElement,
    popup_text: web::HtmlElement,
    pub popup_close: web::HtmlElement,
}

impl Chrome {
    pub fn build(document: &web::Document, root: &web::HtmlElement) -> anyhow::Result<Self> {
        _ = root.set_attribute("style", markup::ROOT_STYLE);

        let stage: web::HtmlElement = dom::append_element(document, root, "div", STAGE_CLASS)?;
        _ = stage.set_attribute("style", markup::STAGE_STYLE);

        let caption: web::HtmlElement = dom::append_element(document, root, "div", CAPTION_CLASS)?;
        _ = caption.set_attribute("style", markup::CAPTION_STYLE);
        set_style(&caption, "z-index", &Z_CHROME.to_string());
        let caption_title: web::HtmlElement = dom::append_element(document, &caption, "h2", "")?;
        set_style(&caption_title, "margin", "0 0 4px 0");
        let caption_text: web::HtmlElement = dom::append_element(document, &caption, "p", "")?;
        set_style(&caption_text, "margin", "0");

        let toggle: web::HtmlElement = dom::append_element(document, root, "button", TOGGLE_CLASS)?;
        _ = toggle.set_attribute("style", markup::TOGGLE_STYLE);
        _ = toggle.set_attribute("type", "button");
        set_style(&toggle, "z-index", &Z_CHROME.to_string());

        let popup: web::HtmlElement = dom::append_element(document, root, "div", POPUP_CLASS)?;
        _ = popup.set_attribute("style", markup::POPUP_BACKDROP_STYLE);
        _ = popup.set_attribute("role", "dialog");
        set_style(&popup, "z-index", &Z_POPUP.to_string());
        let popup_card: web::HtmlElement = dom::append_element(document, &popup, "div", "")?;
        _ = popup_card.set_attribute("style", markup::POPUP_CARD_STYLE);
        let heading: web::HtmlElement = dom::append_element(document, &popup_card, "h3", "")?;
        heading.set_text_content(Some(markup::INFO_TITLE));
        let popup_text: web::HtmlElement = dom::append_element(document, &popup_card, "p", "")?;
        let popup_close: web::HtmlElement = dom::append_element(document, &popup_card, "button", "")?;
        _ = popup_close.set_attribute("type", "button");
        popup_close.set_text_content(Some(markup::CLOSE_LABEL));

        let chrome = Self {
            stage,
            caption_title,
            caption_text,
            toggle,
            popup,
            popup_card,
            popup_text,
            popup_close,
        };
        chrome.close_info();
        Ok(chrome)
    }

    pub fn set_caption(&self, name: &str, description: &str) {
        self.caption_title.set_text_content(Some(name));
        self.caption_text.set_text_content(Some(description));
        set_hidden(&self.caption_text, description.trim().is_empty());
    }

    pub fn set_auto_rotate(&self, on: bool) {
        self.toggle.set_text_content(Some(markup::auto_rotate_label(on)));
        _ = self.toggle.set_attribute("aria-pressed", if on { "true" } else { "false" });
    }

    pub fn open_info(&self, text: &str) {
        self.popup_text.set_text_content(Some(text));
        set_hidden(&self.popup, false);
        set_style(&self.popup, "display", "flex");
    }

    pub fn close_info(&self) {
        set_hidden(&self.popup, true);
        set_style(&self.popup, "display", "none");
    }
}
