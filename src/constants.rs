/// DOM hooks and static assets for the web frontend.
///
/// The page only needs an element with id `tour-root`; everything else is
/// created at runtime under it.
pub const ROOT_ID: &str = "tour-root";

// Tour configuration bundled into the wasm binary
pub const TOUR_JSON: &str = include_str!("../assets/tour.json");

// Class names used by the stylesheet
pub const STAGE_CLASS: &str = "tour-stage";
pub const CANVAS_CLASS: &str = "tour-canvas";
pub const MARKER_LAYER_CLASS: &str = "hotspot-layer";
pub const MARKER_CLASS: &str = "hotspot-icon";
pub const TOOLTIP_CLASS: &str = "hotspot-tooltip";
pub const LOADING_CLASS: &str = "tour-loading";
pub const RETRY_CLASS: &str = "tour-retry";
pub const CAPTION_CLASS: &str = "tour-caption";
pub const TOGGLE_CLASS: &str = "tour-autorotate";
pub const POPUP_CLASS: &str = "tour-popup";
pub const HIDDEN_CLASS: &str = "hidden";

// Marker badge colours
pub const ARROW_BADGE_RGBA: &str = "rgba(16,185,129,0.9)";
pub const INFO_BADGE_RGBA: &str = "rgba(37,99,235,0.85)";

// Stack order inside the root element
pub const Z_MARKERS: i32 = 10;
pub const Z_LOADING: i32 = 20;
pub const Z_CHROME: i32 = 30;
pub const Z_POPUP: i32 = 50;
