// Viewer tuning defaults shared by the web frontend and the validator.

// Orientation control
pub const DRAG_SENSITIVITY: f32 = 0.005; // radians per pixel of pointer travel
pub const AUTO_ROTATE_STEP: f32 = 0.001; // radians of yaw per frame
pub const PITCH_LIMIT_RAD: f32 = std::f32::consts::PI / 2.5; // ±72°

// Zoom
pub const FOV_DEFAULT_DEG: f32 = 90.0;
pub const FOV_MIN_DEG: f32 = 30.0;
pub const FOV_MAX_DEG: f32 = 120.0;
pub const WHEEL_ZOOM_DEG_PER_UNIT: f32 = 0.05;

// Scene layout
pub const SPHERE_RADIUS: f32 = 1000.0; // textured background sphere
pub const MARKER_RADIUS: f32 = 900.0; // hotspots sit just inside the background
pub const SPHERE_SEGMENTS: u32 = 128;

// Projection planes
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 2000.0;

// Navigation arrows point along their yaw, offset so 0° reads as "ahead"
pub const ARROW_ROTATION_OFFSET_DEG: f32 = 90.0;
