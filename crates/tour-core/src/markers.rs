//! Hotspot overlay markers for the scene currently on screen.
//!
//! Marker positions are computed once per scene. Every frame the set is
//! laid out into a flat list of screen placements; the UI layer draws from
//! that list and holds no projection state of its own.

use crate::constants::ARROW_ROTATION_OFFSET_DEG;
use crate::projection::{hotspot_position, is_in_front, project_to_screen, Viewport};
use crate::scene::{Hotspot, HotspotAction};
use glam::{Mat4, Vec2, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarkerKind {
    /// Directional arrow, rotated on screen by `rotation_deg`.
    Arrow { rotation_deg: f32 },
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub id: String,
    pub title: String,
    pub kind: MarkerKind,
    pub position: Vec3,
}

impl Marker {
    pub fn from_hotspot(h: &Hotspot, radius: f32) -> Self {
        let kind = match h.action {
            HotspotAction::Navigate { .. } => MarkerKind::Arrow {
                rotation_deg: h.yaw_deg + ARROW_ROTATION_OFFSET_DEG,
            },
            HotspotAction::Info { .. } => MarkerKind::Info,
        };
        Self {
            id: h.id.clone(),
            title: h.title.clone(),
            kind,
            position: hotspot_position(h.yaw_deg, h.pitch_deg, radius),
        }
    }
}

/// Where one marker goes this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerPlacement<'a> {
    pub index: usize,
    pub id: &'a str,
    pub screen: Vec2,
    pub visible: bool,
}

pub type MarkerLayout<'a> = SmallVec<[MarkerPlacement<'a>; 8]>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    pub fn new(hotspots: &[Hotspot], radius: f32) -> Self {
        Self {
            markers: hotspots.iter().map(|h| Marker::from_hotspot(h, radius)).collect(),
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Project every marker for a camera at the origin. Markers behind the
    /// camera or with degenerate projections come back hidden.
    pub fn layout(&self, view_proj: Mat4, forward: Vec3, viewport: Viewport) -> MarkerLayout<'_> {
        self.markers
            .iter()
            .enumerate()
            .map(|(index, m)| {
                let projected = project_to_screen(view_proj, m.position, viewport);
                if projected.is_none() {
                    log::debug!("[markers] skipping degenerate marker {}", m.id);
                }
                let in_front = is_in_front(Vec3::ZERO, forward, m.position);
                MarkerPlacement {
                    index,
                    id: m.id.as_str(),
                    screen: projected.unwrap_or(Vec2::ZERO),
                    visible: in_front && projected.is_some(),
                }
            })
            .collect()
    }
}
