//! State machine behind one mounted panorama viewer.
//!
//! The controller owns the camera orientation, the drag gesture and the
//! marker set for a single scene. It knows nothing about the DOM or the GPU:
//! callers feed it pointer/wheel input and load results, and pull a
//! [`FrameView`] each frame.

use crate::markers::{MarkerLayout, MarkerSet};
use crate::orientation::{Orientation, OrientationLimits};
use crate::projection::Viewport;
use crate::scene::{Hotspot, Scene};
use crate::settings::ViewerSettings;
use glam::{Mat4, Vec2};

/// Inputs the host passes when mounting a viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerProps {
    pub panorama: String,
    pub hotspots: Vec<Hotspot>,
    pub auto_rotate: bool,
    pub viewport: Viewport,
}

impl ViewerProps {
    pub fn for_scene(scene: &Scene, auto_rotate: bool, viewport: Viewport) -> Self {
        Self {
            panorama: scene.panorama.clone(),
            hotspots: scene.hotspots.clone(),
            auto_rotate,
            viewport,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    /// Image in flight; `progress` is 0..=100.
    Loading { progress: f32 },
    Ready,
    Failed { reason: String },
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

impl Cursor {
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
        }
    }
}

/// Everything a frame needs to draw.
#[derive(Clone, Debug)]
pub struct FrameView<'a> {
    pub view_proj: Mat4,
    pub markers: MarkerLayout<'a>,
}

pub struct ViewerController {
    props: ViewerProps,
    settings: ViewerSettings,
    state: LoadState,
    orientation: Orientation,
    markers: MarkerSet,
    drag_from: Option<Vec2>,
}

impl ViewerController {
    pub fn new(props: ViewerProps, settings: ViewerSettings, orientation: Option<Orientation>) -> Self {
        let orientation =
            orientation.unwrap_or_else(|| Orientation::new(OrientationLimits::from(&settings)));
        Self {
            props,
            settings,
            state: LoadState::Loading { progress: 0.0 },
            orientation,
            markers: MarkerSet::default(),
            drag_from: None,
        }
    }

    pub fn props(&self) -> &ViewerProps {
        &self.props
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    pub fn set_auto_rotate(&mut self, on: bool) {
        self.props.auto_rotate = on;
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.props.viewport = viewport;
    }

    // ---------------- Load lifecycle ----------------

    /// Returns the new percentage, or `None` when not loading or `total` is unknown.
    pub fn on_load_progress(&mut self, loaded: u64, total: u64) -> Option<f32> {
        match &mut self.state {
            LoadState::Loading { progress } if total > 0 => {
                *progress = ((loaded as f64 / total as f64) * 100.0).clamp(0.0, 100.0) as f32;
                Some(*progress)
            }
            _ => None,
        }
    }

    /// Builds the marker set. Only valid once, from `Loading`.
    pub fn on_load_complete(&mut self) -> bool {
        if !matches!(self.state, LoadState::Loading { .. }) {
            return false;
        }
        self.markers = MarkerSet::new(&self.props.hotspots, self.settings.marker_radius);
        self.state = LoadState::Ready;
        true
    }

    pub fn on_load_failed(&mut self, reason: impl Into<String>) -> bool {
        if !matches!(self.state, LoadState::Loading { .. }) {
            return false;
        }
        let reason = reason.into();
        log::error!("[viewer] panorama {} failed: {}", self.props.panorama, reason);
        self.state = LoadState::Failed { reason };
        self.markers = MarkerSet::default();
        self.drag_from = None;
        true
    }

    // ---------------- Input ----------------

    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<Cursor> {
        if matches!(self.state, LoadState::Failed { .. }) {
            return None;
        }
        self.drag_from = Some(Vec2::new(x, y));
        Some(Cursor::Grabbing)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let Some(from) = self.drag_from else {
            return;
        };
        let to = Vec2::new(x, y);
        let delta = to - from;
        self.orientation.apply_drag(delta.x, delta.y);
        self.drag_from = Some(to);
    }

    pub fn pointer_up(&mut self) -> Option<Cursor> {
        self.drag_from.take().map(|_| Cursor::Grab)
    }

    /// Returns true when the field of view changed.
    pub fn wheel(&mut self, delta_y: f32) -> bool {
        if matches!(self.state, LoadState::Failed { .. }) {
            return false;
        }
        self.orientation.apply_zoom(delta_y)
    }

    /// Hand out a copy of the hotspot behind marker `index`. Ignored until the
    /// panorama is ready.
    pub fn activate(&self, index: usize) -> Option<Hotspot> {
        if !self.state.is_ready() {
            return None;
        }
        self.props.hotspots.get(index).cloned()
    }

    // ---------------- Frame ----------------

    /// Advance auto-rotation and lay out markers. `None` unless ready.
    pub fn frame(&mut self) -> Option<FrameView<'_>> {
        if !self.state.is_ready() {
            return None;
        }
        self.orientation
            .tick(self.props.auto_rotate, self.drag_from.is_some());
        let vp = self.props.viewport;
        let proj = self
            .orientation
            .projection_matrix(vp.aspect(), self.settings.z_near, self.settings.z_far);
        let view_proj = proj * self.orientation.view_matrix();
        let markers = if vp.is_empty() {
            MarkerLayout::new()
        } else {
            self.markers.layout(view_proj, self.orientation.forward(), vp)
        };
        Some(FrameView { view_proj, markers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props() -> ViewerProps {
        ViewerProps {
            panorama: "/a.png".into(),
            hotspots: vec![
                Hotspot::navigation("go", 0.0, 0.0, "b"),
                Hotspot::info("note", 90.0, 0.0, "text-X"),
            ],
            auto_rotate: false,
            viewport: Viewport::new(800.0, 600.0),
        }
    }

    #[test]
    fn loading_suppresses_hotspots_and_frames() {
        let mut c = ViewerController::new(props(), ViewerSettings::default(), None);
        assert_eq!(c.state(), &LoadState::Loading { progress: 0.0 });
        assert_eq!(c.on_load_progress(50, 200), Some(25.0));
        assert_eq!(c.on_load_progress(50, 0), None);
        assert!(c.activate(0).is_none());
        assert!(c.frame().is_none());
        assert!(c.markers().is_empty());
    }

    #[test]
    fn ready_builds_markers_and_activates_copies() {
        let mut c = ViewerController::new(props(), ViewerSettings::default(), None);
        assert!(c.on_load_complete());
        assert!(!c.on_load_complete());
        assert_eq!(c.markers().len(), 2);
        assert_eq!(c.activate(1).unwrap().id, "note");
        assert!(c.activate(7).is_none());
        let frame = c.frame().unwrap();
        assert_eq!(frame.markers.len(), 2);
    }

    #[test]
    fn failure_is_terminal() {
        let mut c = ViewerController::new(props(), ViewerSettings::default(), None);
        assert!(c.on_load_failed("404"));
        assert!(!c.on_load_complete());
        assert!(c.pointer_down(0.0, 0.0).is_none());
        assert!(!c.wheel(100.0));
        assert!(c.frame().is_none());
        assert!(matches!(c.state(), LoadState::Failed { reason } if reason == "404"));
    }

    #[test]
    fn drag_turns_camera_and_sets_cursor() {
        let mut c = ViewerController::new(props(), ViewerSettings::default(), None);
        c.on_load_complete();
        assert_eq!(c.pointer_down(100.0, 100.0), Some(Cursor::Grabbing));
        c.pointer_move(140.0, 100.0);
        assert!((c.orientation().yaw - 40.0 * 0.005).abs() < 1e-6);
        assert_eq!(c.pointer_up(), Some(Cursor::Grab));
        let yaw = c.orientation().yaw;
        c.pointer_move(500.0, 500.0);
        assert_eq!(c.orientation().yaw, yaw);
        assert_eq!(c.pointer_up(), None);
    }

    #[test]
    fn auto_rotate_runs_only_when_not_dragging() {
        let mut p = props();
        p.auto_rotate = true;
        let mut c = ViewerController::new(p, ViewerSettings::default(), None);
        c.on_load_complete();
        c.frame();
        assert!(c.orientation().yaw > 0.0);
        let yaw = c.orientation().yaw;
        c.pointer_down(0.0, 0.0);
        c.frame();
        assert_eq!(c.orientation().yaw, yaw);
    }
}
