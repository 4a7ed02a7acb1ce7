// Host-side tests for the DOM string builders.
mod markup {
    include!("../src/markup.rs");
}

use markup::*;
use tour_core::MarkerKind;

#[test]
fn arrow_badge_is_rotated() {
    let html = marker_inner_html(&MarkerKind::Arrow { rotation_deg: 120.0 }, "green", "blue");
    assert!(html.contains("rotate(120.0deg)"));
    assert!(html.contains("background:green"));
    assert!(html.contains("<svg"));
}

#[test]
fn info_badge_is_not_rotated() {
    let html = marker_inner_html(&MarkerKind::Info, "green", "blue");
    assert!(!html.contains("rotate("));
    assert!(html.contains("background:blue"));
}

#[test]
fn loading_label_rounds_and_clamps() {
    assert!(loading_label(41.6).ends_with("42%"));
    assert!(loading_label(250.0).ends_with("100%"));
    assert!(loading_label(-3.0).ends_with(" 0%"));
    assert!(loading_label(f32::NAN).ends_with(" 0%"));
}

#[test]
fn marker_helpers() {
    assert_eq!(px(12.345), "12.3px");
    assert_eq!(display_for(true), "block");
    assert_eq!(display_for(false), "none");
    assert!(marker_base_style(7).contains("z-index:7"));
    assert!(marker_base_style(7).contains("display:none"));
}

#[test]
fn toggle_label_reflects_state() {
    assert_ne!(auto_rotate_label(true), auto_rotate_label(false));
    assert!(load_error_label("HTTP 404").contains("HTTP 404"));
}

#[test]
fn retry_button_takes_clicks_through_the_status_overlay() {
    assert!(STATUS_STYLE.contains("pointer-events:none"));
    assert!(RETRY_STYLE.contains("pointer-events:auto"));
    assert!(!RETRY_LABEL.is_empty());
}
