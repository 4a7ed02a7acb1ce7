//! Scene and hotspot types, plus the on-disk tour schema they are built from.

use crate::error::TourError;
use crate::settings::ViewerSettings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------- Tour file schema ----------------

/// Root of a tour file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourConfig {
    pub start: String,
    #[serde(default)]
    pub viewer: ViewerSettings,
    pub scenes: BTreeMap<String, SceneConfig>,
}

impl TourConfig {
    pub fn from_json(text: &str) -> Result<Self, TourError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneConfig {
    pub name: String,
    #[serde(alias = "panoramaImagePath")]
    pub panorama: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hotspots: Vec<HotspotConfig>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotspotType {
    Arrow,
    Info,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HotspotConfig {
    pub id: String,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
    #[serde(rename = "type")]
    pub kind: HotspotType,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub title: String,
}

// ---------------- Runtime types ----------------

/// What activating a hotspot asks the host to do.
#[derive(Clone, Debug, PartialEq)]
pub enum HotspotAction {
    /// Switch to another scene.
    Navigate { target: String },
    /// Show a text popup.
    Info { text: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hotspot {
    pub id: String,
    /// Horizontal angle in degrees.
    pub yaw_deg: f32,
    /// Vertical angle in degrees, positive is up.
    pub pitch_deg: f32,
    pub title: String,
    pub action: HotspotAction,
}

impl Hotspot {
    pub fn navigation(id: &str, yaw_deg: f32, pitch_deg: f32, target: &str) -> Self {
        Self {
            id: id.to_string(),
            yaw_deg,
            pitch_deg,
            title: String::new(),
            action: HotspotAction::Navigate {
                target: target.to_string(),
            },
        }
    }

    pub fn info(id: &str, yaw_deg: f32, pitch_deg: f32, text: &str) -> Self {
        Self {
            id: id.to_string(),
            yaw_deg,
            pitch_deg,
            title: String::new(),
            action: HotspotAction::Info {
                text: text.to_string(),
            },
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn is_navigation(&self) -> bool {
        matches!(self.action, HotspotAction::Navigate { .. })
    }

    pub fn target(&self) -> Option<&str> {
        match &self.action {
            HotspotAction::Navigate { target } => Some(target),
            HotspotAction::Info { .. } => None,
        }
    }

    /// Build a hotspot from its file form, rejecting records that lack the
    /// field their kind requires or carry non-finite angles.
    pub fn from_config(scene: &str, cfg: &HotspotConfig) -> Result<Self, TourError> {
        let malformed = |reason| TourError::MalformedHotspot {
            scene: scene.to_string(),
            hotspot: cfg.id.clone(),
            reason,
        };
        if cfg.id.trim().is_empty() {
            return Err(malformed("empty id"));
        }
        if !cfg.yaw.is_finite() || !cfg.pitch.is_finite() {
            return Err(malformed("yaw and pitch must be finite"));
        }
        let action = match cfg.kind {
            HotspotType::Arrow => match cfg.target.as_deref().map(str::trim) {
                Some(t) if !t.is_empty() => HotspotAction::Navigate {
                    target: t.to_string(),
                },
                _ => return Err(malformed("navigation hotspot without target")),
            },
            HotspotType::Info => match cfg.info.as_deref() {
                Some(text) if !text.trim().is_empty() => HotspotAction::Info {
                    text: text.to_string(),
                },
                _ => return Err(malformed("info hotspot without text")),
            },
        };
        Ok(Self {
            id: cfg.id.clone(),
            yaw_deg: cfg.yaw,
            pitch_deg: cfg.pitch,
            title: cfg.title.clone(),
            action,
        })
    }
}

/// One navigable panoramic viewpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub key: String,
    pub name: String,
    pub panorama: String,
    pub description: String,
    pub hotspots: Vec<Hotspot>,
}

impl Scene {
    pub fn new(key: &str, name: &str, panorama: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            panorama: panorama.to_string(),
            description: String::new(),
            hotspots: Vec::new(),
        }
    }

    pub fn with_hotspot(mut self, hotspot: Hotspot) -> Self {
        self.hotspots.push(hotspot);
        self
    }

    pub fn hotspot(&self, id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == id)
    }

    pub fn navigation_targets(&self) -> impl Iterator<Item = (&Hotspot, &str)> {
        self.hotspots
            .iter()
            .filter_map(|h| h.target().map(|t| (h, t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrow(id: &str, target: Option<&str>) -> HotspotConfig {
        HotspotConfig {
            id: id.into(),
            yaw: 30.0,
            pitch: 0.0,
            kind: HotspotType::Arrow,
            target: target.map(Into::into),
            info: None,
            title: "Gate".into(),
        }
    }

    #[test]
    fn arrow_config_becomes_navigation() {
        let h = Hotspot::from_config("s", &arrow("a", Some("b"))).unwrap();
        assert_eq!(h.target(), Some("b"));
        assert_eq!(h.title, "Gate");
    }

    #[test]
    fn arrow_without_target_is_malformed() {
        let err = Hotspot::from_config("s", &arrow("a", None)).unwrap_err();
        assert!(matches!(err, TourError::MalformedHotspot { .. }));
        let err = Hotspot::from_config("s", &arrow("a", Some("  "))).unwrap_err();
        assert!(matches!(err, TourError::MalformedHotspot { .. }));
    }

    #[test]
    fn info_without_text_is_malformed() {
        let cfg = HotspotConfig {
            kind: HotspotType::Info,
            target: None,
            ..arrow("i", None)
        };
        assert!(Hotspot::from_config("s", &cfg).is_err());
    }

    #[test]
    fn missing_angles_default_to_zero() {
        let cfg: HotspotConfig =
            serde_json::from_str(r#"{ "id": "x", "type": "info", "info": "hello" }"#).unwrap();
        let h = Hotspot::from_config("s", &cfg).unwrap();
        assert_eq!((h.yaw_deg, h.pitch_deg), (0.0, 0.0));
        assert_eq!(
            h.action,
            HotspotAction::Info {
                text: "hello".into()
            }
        );
    }

    #[test]
    fn scene_accepts_long_image_field_name() {
        let cfg: SceneConfig =
            serde_json::from_str(r#"{ "name": "Gate", "panoramaImagePath": "/a.png" }"#).unwrap();
        assert_eq!(cfg.panorama, "/a.png");
        assert!(cfg.hotspots.is_empty());
    }
}
