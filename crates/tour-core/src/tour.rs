//! Host page state: which scene is current, whether the info popup is open,
//! and whether auto-rotation is on.

use crate::error::TourError;
use crate::registry::SceneRegistry;
use crate::scene::{Hotspot, HotspotAction, Scene};

/// What the host must do after a hotspot activation.
#[derive(Clone, Debug, PartialEq)]
pub enum TourAction {
    /// Remount the viewer for this scene.
    SwitchScene(String),
    /// Rebuild the viewer for the current scene, e.g. after a failed load.
    Reload(String),
    /// Open the popup with this text.
    ShowInfo(String),
    /// Nothing changes; the reason was logged.
    Ignored(TourError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TourState {
    current: String,
    popup: Option<String>,
    auto_rotate: bool,
}

impl TourState {
    pub fn new(registry: &SceneRegistry) -> Self {
        Self {
            current: registry.start_key().to_string(),
            popup: None,
            auto_rotate: false,
        }
    }

    pub fn current_key(&self) -> &str {
        &self.current
    }

    pub fn current_scene<'r>(&self, registry: &'r SceneRegistry) -> Result<&'r Scene, TourError> {
        registry.get_scene(&self.current)
    }

    pub fn popup(&self) -> Option<&str> {
        self.popup.as_deref()
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.auto_rotate
    }

    /// Navigation switches the current scene only when the target resolves;
    /// info opens the popup. Anything else is logged and ignored.
    pub fn activate(&mut self, hotspot: &Hotspot, registry: &SceneRegistry) -> TourAction {
        match &hotspot.action {
            HotspotAction::Navigate { target } => match registry.get_scene(target) {
                Ok(scene) => {
                    log::info!("[tour] {} -> {} via {}", self.current, scene.key, hotspot.id);
                    self.current = scene.key.clone();
                    self.popup = None;
                    TourAction::SwitchScene(scene.key.clone())
                }
                Err(e) => {
                    log::warn!("[tour] ignoring hotspot {}: {}", hotspot.id, e);
                    TourAction::Ignored(e)
                }
            },
            HotspotAction::Info { text } if !text.trim().is_empty() => {
                self.popup = Some(text.clone());
                TourAction::ShowInfo(text.clone())
            }
            HotspotAction::Info { .. } => {
                let e = TourError::MalformedHotspot {
                    scene: self.current.clone(),
                    hotspot: hotspot.id.clone(),
                    reason: "info hotspot without text",
                };
                log::warn!("[tour] ignoring hotspot: {}", e);
                TourAction::Ignored(e)
            }
        }
    }

    pub fn dismiss_popup(&mut self) {
        self.popup = None;
    }

    /// Ask for the current scene to be mounted again.
    pub fn retry(&mut self, registry: &SceneRegistry) -> TourAction {
        match registry.get_scene(&self.current) {
            Ok(scene) => {
                log::info!("[tour] retrying {}", scene.key);
                self.popup = None;
                TourAction::Reload(scene.key.clone())
            }
            Err(e) => {
                log::warn!("[tour] cannot retry: {}", e);
                TourAction::Ignored(e)
            }
        }
    }
}
