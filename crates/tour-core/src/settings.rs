//! Viewer tuning loaded from the `viewer` section of a tour file.
//!
//! Every field is optional in the file; omitted values fall back to the
//! defaults in `constants.rs`.

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// What happens to the camera when the host switches scenes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrientationPolicy {
    /// Keep yaw and pitch, return zoom to the default field of view.
    #[default]
    PreserveLook,
    /// Start every scene from the default yaw, pitch and zoom.
    Reset,
    /// Keep yaw, pitch and zoom exactly as they were.
    PreserveAll,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerSettings {
    pub drag_sensitivity: f32,
    pub auto_rotate_step: f32,
    pub pitch_limit_rad: f32,
    pub fov_default_deg: f32,
    pub fov_min_deg: f32,
    pub fov_max_deg: f32,
    pub wheel_zoom_deg_per_unit: f32,
    pub sphere_radius: f32,
    pub marker_radius: f32,
    pub sphere_segments: u32,
    pub z_near: f32,
    pub z_far: f32,
    pub on_scene_change: OrientationPolicy,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            drag_sensitivity: DRAG_SENSITIVITY,
            auto_rotate_step: AUTO_ROTATE_STEP,
            pitch_limit_rad: PITCH_LIMIT_RAD,
            fov_default_deg: FOV_DEFAULT_DEG,
            fov_min_deg: FOV_MIN_DEG,
            fov_max_deg: FOV_MAX_DEG,
            wheel_zoom_deg_per_unit: WHEEL_ZOOM_DEG_PER_UNIT,
            sphere_radius: SPHERE_RADIUS,
            marker_radius: MARKER_RADIUS,
            sphere_segments: SPHERE_SEGMENTS,
            z_near: Z_NEAR,
            z_far: Z_FAR,
            on_scene_change: OrientationPolicy::default(),
        }
    }
}

impl ViewerSettings {
    /// Repair values that would break the camera (inverted ranges, markers
    /// outside the background sphere). Returns a description of each fix.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut fixes = Vec::new();
        if !(self.fov_min_deg > 0.0 && self.fov_min_deg < self.fov_max_deg && self.fov_max_deg < 180.0)
        {
            fixes.push(format!(
                "fov range {}..{} replaced with {}..{}",
                self.fov_min_deg, self.fov_max_deg, FOV_MIN_DEG, FOV_MAX_DEG
            ));
            self.fov_min_deg = FOV_MIN_DEG;
            self.fov_max_deg = FOV_MAX_DEG;
        }
        let clamped = self.fov_default_deg.clamp(self.fov_min_deg, self.fov_max_deg);
        if clamped != self.fov_default_deg {
            fixes.push(format!("default fov {} clamped to {}", self.fov_default_deg, clamped));
            self.fov_default_deg = clamped;
        }
        let max_pitch = std::f32::consts::FRAC_PI_2 - 1e-3;
        if !(self.pitch_limit_rad > 0.0 && self.pitch_limit_rad <= max_pitch) {
            fixes.push(format!("pitch limit {} replaced with {}", self.pitch_limit_rad, PITCH_LIMIT_RAD));
            self.pitch_limit_rad = PITCH_LIMIT_RAD;
        }
        if !(self.marker_radius > 0.0 && self.marker_radius < self.sphere_radius) {
            let radius = self.sphere_radius * (MARKER_RADIUS / SPHERE_RADIUS);
            fixes.push(format!("marker radius {} replaced with {}", self.marker_radius, radius));
            self.marker_radius = radius;
        }
        if self.sphere_segments < 8 {
            fixes.push(format!("sphere segments {} raised to 8", self.sphere_segments));
            self.sphere_segments = 8;
        }
        if !(self.z_near > 0.0 && self.z_far > self.sphere_radius) {
            fixes.push(format!("clip planes {}..{} replaced", self.z_near, self.z_far));
            self.z_near = Z_NEAR;
            self.z_far = (self.sphere_radius * 2.0).max(Z_FAR);
        }
        fixes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_need_no_repair() {
        let mut s = ViewerSettings::default();
        assert!(s.sanitize().is_empty());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let s: ViewerSettings =
            serde_json::from_str(r#"{ "dragSensitivity": 0.01, "onSceneChange": "reset" }"#).unwrap();
        assert_eq!(s.drag_sensitivity, 0.01);
        assert_eq!(s.fov_max_deg, FOV_MAX_DEG);
        assert_eq!(s.on_scene_change, OrientationPolicy::Reset);
    }

    #[test]
    fn inverted_fov_range_is_repaired() {
        let mut s = ViewerSettings {
            fov_min_deg: 100.0,
            fov_max_deg: 40.0,
            ..Default::default()
        };
        let fixes = s.sanitize();
        assert!(!fixes.is_empty());
        assert_eq!((s.fov_min_deg, s.fov_max_deg), (FOV_MIN_DEG, FOV_MAX_DEG));
    }

    #[test]
    fn markers_outside_background_are_pulled_in() {
        let mut s = ViewerSettings {
            marker_radius: 1500.0,
            ..Default::default()
        };
        s.sanitize();
        assert!(s.marker_radius < s.sphere_radius);
    }
}
