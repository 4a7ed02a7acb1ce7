//! Read-only lookup table of scenes keyed by scene key.
//!
//! The registry is built once from a [`TourConfig`] and never mutated. The
//! validation pass collects every problem instead of stopping at the first,
//! so a broken tour file can be fixed in one go.

use crate::error::TourError;
use crate::scene::{Hotspot, Scene, TourConfig};
use fnv::FnvHashSet;
use std::collections::{BTreeMap, VecDeque};

#[derive(Clone, Debug)]
pub struct SceneRegistry {
    scenes: BTreeMap<String, Scene>,
    start: String,
}

impl SceneRegistry {
    /// Build a registry from already typed scenes without validating it.
    pub fn from_scenes(scenes: impl IntoIterator<Item = Scene>, start: &str) -> Self {
        let scenes = scenes
            .into_iter()
            .map(|s| (s.key.clone(), s))
            .collect::<BTreeMap<_, _>>();
        Self {
            scenes,
            start: start.to_string(),
        }
    }

    /// Strict load: any malformed, duplicate or dangling hotspot rejects the
    /// whole tour with every problem listed.
    pub fn load(config: &TourConfig) -> Result<Self, TourError> {
        let (scenes, mut problems) = convert_scenes(config);
        let registry = Self::from_scenes(scenes, &config.start);
        problems.extend(registry.validate());
        if registry.scenes.is_empty() {
            return Err(TourError::EmptyTour);
        }
        if problems.is_empty() {
            Ok(registry)
        } else {
            Err(TourError::Invalid(problems))
        }
    }

    /// Lenient load: offending hotspots are dropped and reported, a missing
    /// start scene falls back to the first key. Only an empty tour fails.
    pub fn load_lenient(config: &TourConfig) -> Result<(Self, Vec<TourError>), TourError> {
        let (scenes, mut problems) = convert_scenes(config);
        let mut registry = Self::from_scenes(scenes, &config.start);
        if registry.scenes.is_empty() {
            return Err(TourError::EmptyTour);
        }

        let keys: FnvHashSet<String> = registry.scenes.keys().cloned().collect();
        for scene in registry.scenes.values_mut() {
            let scene_key = scene.key.clone();
            scene.hotspots.retain(|h| match h.target() {
                Some(target) if !keys.contains(target) => {
                    problems.push(TourError::DanglingTarget {
                        scene: scene_key.clone(),
                        hotspot: h.id.clone(),
                        target: target.to_string(),
                    });
                    false
                }
                _ => true,
            });
        }

        if !registry.scenes.contains_key(&registry.start) {
            problems.push(TourError::MissingStartScene(registry.start.clone()));
            if let Some(first) = registry.scenes.keys().next() {
                registry.start = first.clone();
            }
        }
        for p in &problems {
            log::warn!("[tour] {}", p);
        }
        Ok((registry, problems))
    }

    pub fn get_scene(&self, key: &str) -> Result<&Scene, TourError> {
        self.scenes
            .get(key)
            .ok_or_else(|| TourError::UnknownScene(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.scenes.contains_key(key)
    }

    /// Every valid scene key, in sorted order.
    pub fn all_scene_keys(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }

    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.values()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn start_key(&self) -> &str {
        &self.start
    }

    /// Resolve a navigation hotspot into its target scene.
    pub fn resolve(&self, hotspot: &Hotspot) -> Option<Result<&Scene, TourError>> {
        hotspot.target().map(|t| self.get_scene(t))
    }

    /// Check the graph for dangling edges, duplicate hotspot ids and a
    /// missing start scene. Returns all violations.
    pub fn validate(&self) -> Vec<TourError> {
        let mut problems = Vec::new();
        if !self.scenes.is_empty() && !self.scenes.contains_key(&self.start) {
            problems.push(TourError::MissingStartScene(self.start.clone()));
        }
        for scene in self.scenes.values() {
            let mut seen = FnvHashSet::default();
            for h in &scene.hotspots {
                if !seen.insert(h.id.as_str()) {
                    problems.push(TourError::DuplicateHotspot {
                        scene: scene.key.clone(),
                        hotspot: h.id.clone(),
                    });
                }
            }
            for (h, target) in scene.navigation_targets() {
                if self.get_scene(target).is_err() {
                    problems.push(TourError::DanglingTarget {
                        scene: scene.key.clone(),
                        hotspot: h.id.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }
        problems
    }

    /// Scenes that cannot be reached from `start` by following navigation
    /// hotspots. Sorted by key.
    pub fn unreachable_from(&self, start: &str) -> Vec<&str> {
        let mut visited: FnvHashSet<&str> = FnvHashSet::default();
        let mut queue = VecDeque::new();
        if let Some((key, _)) = self.scenes.get_key_value(start) {
            visited.insert(key.as_str());
            queue.push_back(key.as_str());
        }
        while let Some(key) = queue.pop_front() {
            let Some(scene) = self.scenes.get(key) else {
                continue;
            };
            for (_, target) in scene.navigation_targets() {
                if let Some((k, _)) = self.scenes.get_key_value(target) {
                    if visited.insert(k.as_str()) {
                        queue.push_back(k.as_str());
                    }
                }
            }
        }
        self.all_scene_keys()
            .filter(|k| !visited.contains(k))
            .collect()
    }
}

fn convert_scenes(config: &TourConfig) -> (Vec<Scene>, Vec<TourError>) {
    let mut problems = Vec::new();
    let scenes = config
        .scenes
        .iter()
        .map(|(key, sc)| {
            let mut seen = FnvHashSet::default();
            let mut hotspots = Vec::with_capacity(sc.hotspots.len());
            for hc in &sc.hotspots {
                match Hotspot::from_config(key, hc) {
                    Ok(h) if seen.insert(h.id.clone()) => hotspots.push(h),
                    Ok(h) => problems.push(TourError::DuplicateHotspot {
                        scene: key.clone(),
                        hotspot: h.id,
                    }),
                    Err(e) => problems.push(e),
                }
            }
            Scene {
                key: key.clone(),
                name: sc.name.clone(),
                panorama: sc.panorama.clone(),
                description: sc.description.clone(),
                hotspots,
            }
        })
        .collect();
    (scenes, problems)
}
