//! Camera orientation owned by a single viewer.
//!
//! All mutation goes through `apply_drag`, `apply_zoom` and `tick`, so the
//! clamp rules live in one place and can be exercised without a renderer.

use crate::settings::{OrientationPolicy, ViewerSettings};
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Limits copied out of [`ViewerSettings`] at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientationLimits {
    pub drag_sensitivity: f32,
    pub auto_rotate_step: f32,
    pub pitch_limit_rad: f32,
    pub fov_default_deg: f32,
    pub fov_min_deg: f32,
    pub fov_max_deg: f32,
    pub wheel_zoom_deg_per_unit: f32,
}

impl From<&ViewerSettings> for OrientationLimits {
    fn from(s: &ViewerSettings) -> Self {
        Self {
            drag_sensitivity: s.drag_sensitivity,
            auto_rotate_step: s.auto_rotate_step,
            pitch_limit_rad: s.pitch_limit_rad,
            fov_default_deg: s.fov_default_deg,
            fov_min_deg: s.fov_min_deg,
            fov_max_deg: s.fov_max_deg,
            wheel_zoom_deg_per_unit: s.wheel_zoom_deg_per_unit,
        }
    }
}

impl Default for OrientationLimits {
    fn default() -> Self {
        Self::from(&ViewerSettings::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    /// Radians about world up. Unbounded; wraps naturally through sin/cos.
    pub yaw: f32,
    /// Radians about the camera's local right axis, clamped to the limit.
    pub pitch: f32,
    pub fov_deg: f32,
    limits: OrientationLimits,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::new(OrientationLimits::default())
    }
}

impl Orientation {
    pub fn new(limits: OrientationLimits) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            fov_deg: limits.fov_default_deg,
            limits,
        }
    }

    pub fn limits(&self) -> &OrientationLimits {
        &self.limits
    }

    /// Pointer travel in pixels turns the camera. Horizontal travel adds to
    /// yaw, vertical travel to pitch.
    pub fn apply_drag(&mut self, delta_x: f32, delta_y: f32) {
        if !delta_x.is_finite() || !delta_y.is_finite() {
            return;
        }
        self.yaw += delta_x * self.limits.drag_sensitivity;
        let limit = self.limits.pitch_limit_rad;
        self.pitch = (self.pitch + delta_y * self.limits.drag_sensitivity).clamp(-limit, limit);
    }

    /// Wheel delta widens (positive) or narrows (negative) the field of view.
    /// Returns true when the projection needs recomputing.
    pub fn apply_zoom(&mut self, wheel_delta: f32) -> bool {
        if !wheel_delta.is_finite() {
            return false;
        }
        let next = (self.fov_deg + wheel_delta * self.limits.wheel_zoom_deg_per_unit)
            .clamp(self.limits.fov_min_deg, self.limits.fov_max_deg);
        let changed = next != self.fov_deg;
        self.fov_deg = next;
        changed
    }

    /// Per-frame step. Auto-rotation pauses while the user drags.
    pub fn tick(&mut self, auto_rotate: bool, dragging: bool) {
        if auto_rotate && !dragging {
            self.yaw += self.limits.auto_rotate_step;
        }
    }

    /// Yaw about world up first, then pitch about the local right axis; no roll.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// World-to-view transform for a camera sitting at the origin.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation().inverse())
    }

    pub fn projection_matrix(&self, aspect: f32, z_near: f32, z_far: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), aspect.max(1e-3), z_near, z_far)
    }

    /// Orientation to start the next scene with.
    pub fn carried_over(&self, policy: OrientationPolicy) -> Self {
        match policy {
            OrientationPolicy::PreserveAll => *self,
            OrientationPolicy::PreserveLook => Self {
                fov_deg: self.limits.fov_default_deg,
                ..*self
            },
            OrientationPolicy::Reset => Self::new(self.limits),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_looks_down_negative_z() {
        let o = Orientation::default();
        assert!(o.forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert_eq!(o.fov_deg, 90.0);
    }

    #[test]
    fn pitch_never_passes_limit() {
        let mut o = Orientation::default();
        for _ in 0..100 {
            o.apply_drag(0.0, -10_000.0);
        }
        assert_relative_eq!(o.pitch, -o.limits().pitch_limit_rad);
        assert!(o.pitch.to_degrees() >= -72.0 - 1e-3);
    }

    #[test]
    fn fov_never_passes_max() {
        let mut o = Orientation::default();
        for _ in 0..100 {
            o.apply_zoom(5_000.0);
        }
        assert_eq!(o.fov_deg, 120.0);
        assert!(!o.apply_zoom(5_000.0));
        o.apply_zoom(-1e9);
        assert_eq!(o.fov_deg, 30.0);
    }

    #[test]
    fn auto_rotate_pauses_while_dragging() {
        let mut o = Orientation::default();
        o.tick(true, true);
        assert_eq!(o.yaw, 0.0);
        o.tick(true, false);
        assert!(o.yaw > 0.0);
        let yaw = o.yaw;
        o.tick(false, false);
        assert_eq!(o.yaw, yaw);
    }

    #[test]
    fn pitch_up_tilts_forward_up() {
        let mut o = Orientation::default();
        o.apply_drag(0.0, 100.0);
        assert!(o.forward().y > 0.0);
        // no roll: right vector stays horizontal
        let right = o.rotation() * Vec3::X;
        assert_relative_eq!(right.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut o = Orientation::default();
        o.apply_drag(f32::NAN, 1.0);
        assert!(!o.apply_zoom(f32::INFINITY));
        assert_eq!(o, Orientation::default());
    }

    #[test]
    fn policies_carry_state_differently() {
        let mut o = Orientation::default();
        o.apply_drag(50.0, 20.0);
        o.apply_zoom(-400.0);
        let look = o.carried_over(OrientationPolicy::PreserveLook);
        assert_eq!((look.yaw, look.pitch, look.fov_deg), (o.yaw, o.pitch, 90.0));
        assert_eq!(o.carried_over(OrientationPolicy::PreserveAll), o);
        assert_eq!(o.carried_over(OrientationPolicy::Reset), Orientation::default());
    }
}
