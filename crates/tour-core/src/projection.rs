use glam::{Mat4, Vec2, Vec3, Vec4};

/// Direction of the panorama's centre column. A hotspot at yaw 0, pitch 0
/// sits here.
pub const PANORAMA_FRONT: Vec3 = Vec3::NEG_X;

/// Size of the mount element in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    pub fn is_empty(&self) -> bool {
        !(self.width >= 1.0 && self.height >= 1.0)
    }
}

/// Place a (yaw, pitch) direction in degrees on a sphere of `radius`.
///
/// Pitch becomes the polar angle (90° - pitch), yaw the azimuth, and x is
/// mirrored the same way the background sphere is so both read from inside.
#[inline]
pub fn hotspot_position(yaw_deg: f32, pitch_deg: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - pitch_deg).to_radians();
    let theta = yaw_deg.to_radians();
    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// A point is drawable only when it lies in the camera's forward hemisphere.
#[inline]
pub fn is_in_front(camera_pos: Vec3, camera_forward: Vec3, point: Vec3) -> bool {
    (point - camera_pos).dot(camera_forward) > 0.0
}

/// Project a world point to pixel coordinates within `viewport`.
/// Returns `None` for degenerate clip coordinates.
#[inline]
pub fn project_to_screen(view_proj: Mat4, point: Vec3, viewport: Viewport) -> Option<Vec2> {
    if !point.is_finite() {
        return None;
    }
    let clip = view_proj * Vec4::new(point.x, point.y, point.z, 1.0);
    if !clip.is_finite() || clip.w.abs() < 1e-6 {
        return None;
    }
    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    let sx = (ndc_x * 0.5 + 0.5) * viewport.width;
    let sy = (-ndc_y * 0.5 + 0.5) * viewport.height;
    (sx.is_finite() && sy.is_finite()).then(|| Vec2::new(sx, sy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn front_of_equator() {
        let p = hotspot_position(0.0, 0.0, 900.0);
        assert!(p.abs_diff_eq(PANORAMA_FRONT * 900.0, 1e-3));
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn pitch_ninety_is_the_pole() {
        let p = hotspot_position(123.0, 90.0, 900.0);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 900.0, 0.0), 1e-3));
        let q = hotspot_position(0.0, -90.0, 900.0);
        assert!(q.abs_diff_eq(Vec3::new(0.0, -900.0, 0.0), 1e-3));
    }

    #[test]
    fn known_angle_pairs() {
        let cases = [
            (90.0, 0.0, Vec3::new(0.0, 0.0, 1.0)),
            (180.0, 0.0, Vec3::new(1.0, 0.0, 0.0)),
            (-90.0, 0.0, Vec3::new(0.0, 0.0, -1.0)),
            (0.0, 45.0, Vec3::new(-(0.5f32.sqrt()), 0.5f32.sqrt(), 0.0)),
        ];
        for (yaw, pitch, dir) in cases {
            let p = hotspot_position(yaw, pitch, 10.0);
            assert!(p.abs_diff_eq(dir * 10.0, 1e-3), "yaw={yaw} pitch={pitch} got {p:?}");
            assert_relative_eq!(p.length(), 10.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn culling_follows_forward_hemisphere() {
        let fwd = Vec3::NEG_Z;
        assert!(is_in_front(Vec3::ZERO, fwd, Vec3::new(0.0, 0.0, -900.0)));
        assert!(!is_in_front(Vec3::ZERO, fwd, Vec3::new(0.0, 0.0, 900.0)));
        // exactly sideways is not in front
        assert!(!is_in_front(Vec3::ZERO, fwd, Vec3::new(900.0, 0.0, 0.0)));
    }

    #[test]
    fn point_ahead_lands_in_viewport_centre() {
        let vp = Viewport::new(800.0, 600.0);
        let proj = Mat4::perspective_rh(90f32.to_radians(), vp.aspect(), 0.1, 2000.0);
        let s = project_to_screen(proj, Vec3::new(0.0, 0.0, -900.0), vp).unwrap();
        assert!(s.abs_diff_eq(Vec2::new(400.0, 300.0), 1e-2));
        // up in the world is up on screen
        let up = project_to_screen(proj, Vec3::new(0.0, 100.0, -900.0), vp).unwrap();
        assert!(up.y < 300.0);
    }

    #[test]
    fn degenerate_points_are_skipped() {
        let vp = Viewport::new(800.0, 600.0);
        let proj = Mat4::perspective_rh(1.0, 1.0, 0.1, 10.0);
        assert!(project_to_screen(proj, Vec3::new(f32::NAN, 0.0, -1.0), vp).is_none());
        // w == 0 for a point on the camera plane
        assert!(project_to_screen(proj, Vec3::new(1.0, 0.0, 0.0), vp).is_none());
    }
}
