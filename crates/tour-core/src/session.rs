//! Mount/unmount lifecycle of a viewer over an abstract surface.
//!
//! A [`ViewerSession`] owns everything it registers on the surface: input
//! listeners and one marker per hotspot. Unmounting releases all of them and
//! is safe to call more than once. Load callbacks that arrive after unmount
//! are ignored.

use crate::markers::{Marker, MarkerPlacement};
use crate::orientation::Orientation;
use crate::projection::Viewport;
use crate::scene::Hotspot;
use crate::settings::ViewerSettings;
use crate::viewer::{Cursor, LoadState, ViewerController, ViewerProps};
use glam::Mat4;

/// Input streams a viewer listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputChannel {
    /// On the mount element.
    PointerDown,
    /// Document-wide so drags keep tracking outside the mount.
    PointerMove,
    /// Document-wide.
    PointerUp,
    /// On the mount element, non-passive so the page does not scroll.
    Wheel,
}

impl InputChannel {
    pub const ALL: [InputChannel; 4] = [
        InputChannel::PointerDown,
        InputChannel::PointerMove,
        InputChannel::PointerUp,
        InputChannel::Wheel,
    ];
}

/// The environment a viewer is mounted into.
pub trait MountSurface {
    type Listener;
    type Marker;

    fn listen(&mut self, channel: InputChannel) -> Self::Listener;
    fn unlisten(&mut self, listener: Self::Listener);

    /// `index` is the hotspot position to pass back on activation.
    fn create_marker(&mut self, index: usize, marker: &Marker) -> Self::Marker;
    fn place_marker(&mut self, marker: &Self::Marker, placement: &MarkerPlacement<'_>);
    fn remove_marker(&mut self, marker: Self::Marker);

    fn set_cursor(&mut self, cursor: Cursor);
    fn load_state_changed(&mut self, state: &LoadState);

    /// Release whatever the surface created for this viewer.
    fn detach(&mut self);
}

pub struct ViewerSession<S: MountSurface> {
    controller: ViewerController,
    surface: S,
    listeners: Vec<S::Listener>,
    markers: Vec<S::Marker>,
    mounted: bool,
}

impl<S: MountSurface> ViewerSession<S> {
    pub fn mount(
        props: ViewerProps,
        settings: ViewerSettings,
        orientation: Option<Orientation>,
        mut surface: S,
    ) -> Self {
        log::info!(
            "[viewer] mount {} with {} hotspot(s)",
            props.panorama,
            props.hotspots.len()
        );
        let controller = ViewerController::new(props, settings, orientation);
        let listeners = InputChannel::ALL
            .iter()
            .map(|&c| surface.listen(c))
            .collect();
        surface.set_cursor(Cursor::Grab);
        surface.load_state_changed(controller.state());
        Self {
            controller,
            surface,
            listeners,
            markers: Vec::new(),
            mounted: true,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn controller(&self) -> &ViewerController {
        &self.controller
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// False once the session is unmounted or its load failed; the frame
    /// loop stops then.
    pub fn wants_frames(&self) -> bool {
        self.mounted && !matches!(self.controller.state(), LoadState::Failed { .. })
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ---------------- Load callbacks ----------------

    pub fn report_progress(&mut self, loaded: u64, total: u64) {
        if !self.mounted {
            return;
        }
        if self.controller.on_load_progress(loaded, total).is_some() {
            self.surface.load_state_changed(self.controller.state());
        }
    }

    /// Returns false when the session is gone or not loading.
    pub fn finish_loading(&mut self) -> bool {
        if !self.mounted || !self.controller.on_load_complete() {
            return false;
        }
        let surface = &mut self.surface;
        self.markers = self
            .controller
            .markers()
            .markers()
            .iter()
            .enumerate()
            .map(|(i, m)| surface.create_marker(i, m))
            .collect();
        self.surface.load_state_changed(self.controller.state());
        true
    }

    pub fn fail_loading(&mut self, reason: impl Into<String>) -> bool {
        if !self.mounted || !self.controller.on_load_failed(reason) {
            return false;
        }
        self.surface.load_state_changed(self.controller.state());
        true
    }

    // ---------------- Input ----------------

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if !self.mounted {
            return;
        }
        if let Some(c) = self.controller.pointer_down(x, y) {
            self.surface.set_cursor(c);
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.mounted {
            self.controller.pointer_move(x, y);
        }
    }

    pub fn pointer_up(&mut self) {
        if !self.mounted {
            return;
        }
        if let Some(c) = self.controller.pointer_up() {
            self.surface.set_cursor(c);
        }
    }

    pub fn wheel(&mut self, delta_y: f32) -> bool {
        self.mounted && self.controller.wheel(delta_y)
    }

    pub fn set_auto_rotate(&mut self, on: bool) {
        self.controller.set_auto_rotate(on);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if self.controller.props().viewport != viewport {
            self.controller.resize(viewport);
        }
    }

    pub fn activate(&self, index: usize) -> Option<Hotspot> {
        if !self.mounted {
            return None;
        }
        self.controller.activate(index)
    }

    // ---------------- Frame ----------------

    /// Advance one frame and place markers. Returns the matrix to render with,
    /// or `None` when there is nothing to draw.
    pub fn frame(&mut self) -> Option<Mat4> {
        if !self.mounted {
            return None;
        }
        let view = self.controller.frame()?;
        for p in &view.markers {
            if let Some(m) = self.markers.get(p.index) {
                self.surface.place_marker(m, p);
            }
        }
        Some(view.view_proj)
    }

    /// Tear everything down. Returns the final orientation so the host can
    /// carry it into the next scene.
    pub fn unmount(&mut self) -> Orientation {
        if self.mounted {
            self.mounted = false;
            for l in self.listeners.drain(..) {
                self.surface.unlisten(l);
            }
            for m in self.markers.drain(..) {
                self.surface.remove_marker(m);
            }
            self.surface.detach();
            log::info!("[viewer] unmounted {}", self.controller.props().panorama);
        }
        *self.controller.orientation()
    }
}

impl<S: MountSurface> Drop for ViewerSession<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}
