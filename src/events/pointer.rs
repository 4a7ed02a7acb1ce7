use tour_core::InputChannel;
use web_sys as web;

/// DOM event name behind each viewer input channel.
pub fn event_name(channel: InputChannel) -> &'static str {
    match channel {
        InputChannel::PointerDown => "pointerdown",
        InputChannel::PointerMove => "pointermove",
        InputChannel::PointerUp => "pointerup",
        InputChannel::Wheel => "wheel",
    }
}

/// Pointer position in CSS pixels. Drags only use deltas, so client space is enough.
#[inline]
pub fn client_pos(ev: &web::MouseEvent) -> (f32, f32) {
    (ev.client_x() as f32, ev.client_y() as f32)
}

#[inline]
pub fn is_primary_button(ev: &web::MouseEvent) -> bool {
    ev.button() == 0
}

/// Wheel delta normalised to pixels.
pub fn wheel_delta_px(ev: &web::WheelEvent) -> f32 {
    let scale = match ev.delta_mode() {
        web::WheelEvent::DOM_DELTA_LINE => 16.0,
        web::WheelEvent::DOM_DELTA_PAGE => 800.0,
        _ => 1.0,
    };
    (ev.delta_y() * scale) as f32
}
