// Strings and inline styles for DOM nodes. Kept free of web-sys so the
// host-side tests can include this file directly.

use tour_core::MarkerKind;

const ARROW_SVG: &str = r#"<svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="white" stroke-width="2"><line x1="5" y1="12" x2="19" y2="12"></line><polyline points="12 5 19 12 12 19"></polyline></svg>"#;
const INFO_SVG: &str = r#"<svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="white" stroke-width="2"><circle cx="12" cy="12" r="10"></circle><line x1="12" y1="16" x2="12" y2="12"></line><line x1="12" y1="8" x2="12" y2="8"></line></svg>"#;

const BADGE_STYLE: &str =
    "padding:8px;border-radius:999px;display:flex;align-items:center;justify-content:center;";

/// Badge markup for a marker. Arrows are rotated to match their yaw.
pub fn marker_inner_html(kind: &MarkerKind, arrow_rgba: &str, info_rgba: &str) -> String {
    match kind {
        MarkerKind::Arrow { rotation_deg } => format!(
            "<div style=\"background:{};{}transform:rotate({:.1}deg);\">{}</div>",
            arrow_rgba, BADGE_STYLE, rotation_deg, ARROW_SVG
        ),
        MarkerKind::Info => format!(
            "<div style=\"background:{};{}\">{}</div>",
            info_rgba, BADGE_STYLE, INFO_SVG
        ),
    }
}

/// Fixed part of a marker's inline style; `left`/`top`/`display` change per frame.
pub fn marker_base_style(z_index: i32) -> String {
    format!(
        "position:absolute;transform:translate(-50%,-50%);pointer-events:auto;cursor:pointer;z-index:{};display:none;",
        z_index
    )
}

#[inline]
pub fn px(v: f32) -> String {
    format!("{:.1}px", v)
}

#[inline]
pub fn display_for(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}

pub fn loading_label(progress: f32) -> String {
    let pct = if progress.is_finite() {
        progress.clamp(0.0, 100.0).round() as u32
    } else {
        0
    };
    format!("تحميل الجولة... {}%", pct)
}

pub fn load_error_label(reason: &str) -> String {
    format!("تعذر تحميل المشهد: {}", reason)
}

pub fn auto_rotate_label(on: bool) -> &'static str {
    if on {
        "⏸️ إيقاف الدوران"
    } else {
        "🔄 تشغيل الدوران"
    }
}

pub const CANVAS_STYLE: &str =
    "position:absolute;inset:0;width:100%;height:100%;display:block;touch-action:none;";
pub const MARKER_LAYER_STYLE: &str =
    "position:absolute;inset:0;pointer-events:none;overflow:hidden;";
pub const TOOLTIP_STYLE: &str = "position:absolute;bottom:calc(100% + 6px);left:50%;transform:translateX(-50%);background:rgba(0,0,0,0.75);color:#fff;padding:4px 8px;border-radius:6px;white-space:nowrap;font-size:12px;pointer-events:none;opacity:0;transition:opacity .15s;";
pub const STATUS_STYLE: &str = "position:absolute;inset:0;display:flex;flex-direction:column;gap:12px;align-items:center;justify-content:center;color:#fff;font-size:16px;background:rgba(0,0,0,0.6);pointer-events:none;";

pub const ROOT_STYLE: &str = "position:relative;width:100%;height:100%;overflow:hidden;background:#000;";
pub const STAGE_STYLE: &str = "position:absolute;inset:0;";
pub const CAPTION_STYLE: &str = "position:absolute;top:16px;right:16px;max-width:min(480px,80%);color:#fff;background:rgba(0,0,0,0.55);padding:10px 14px;border-radius:10px;direction:rtl;pointer-events:none;";
pub const TOGGLE_STYLE: &str = "position:absolute;bottom:16px;left:16px;color:#fff;background:rgba(0,0,0,0.6);border:1px solid rgba(255,255,255,0.3);border-radius:8px;padding:8px 12px;cursor:pointer;";
pub const POPUP_BACKDROP_STYLE: &str = "position:absolute;inset:0;display:flex;align-items:center;justify-content:center;background:rgba(0,0,0,0.5);";
pub const POPUP_CARD_STYLE: &str = "background:#fff;color:#111;max-width:min(420px,90%);padding:20px;border-radius:12px;direction:rtl;line-height:1.6;";
pub const RETRY_STYLE: &str = "pointer-events:auto;cursor:pointer;color:#fff;background:rgba(255,255,255,0.15);border:1px solid rgba(255,255,255,0.4);border-radius:8px;padding:6px 14px;font-size:14px;";
pub const RETRY_LABEL: &str = "إعادة المحاولة";
pub const INFO_TITLE: &str = "معلومات";
pub const CLOSE_LABEL: &str = "إغلاق";
