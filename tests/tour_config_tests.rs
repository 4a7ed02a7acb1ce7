// The tour bundled with the web build must load cleanly.
use tour_core::*;

const TOUR_JSON: &str = include_str!("../assets/tour.json");

fn bundled() -> TourConfig {
    TourConfig::from_json(TOUR_JSON).expect("bundled tour parses")
}

#[test]
fn bundled_tour_loads_strictly() {
    let cfg = bundled();
    let reg = SceneRegistry::load(&cfg).expect("no dangling or malformed hotspots");
    assert_eq!(reg.len(), 10);
    assert_eq!(reg.start_key(), "scene10");
    assert!(reg.validate().is_empty());
}

#[test]
fn every_scene_is_reachable_from_start() {
    let reg = SceneRegistry::load(&bundled()).unwrap();
    assert!(reg.unreachable_from(reg.start_key()).is_empty());
}

#[test]
fn bundled_settings_need_no_fixes() {
    let mut cfg = bundled();
    assert!(cfg.viewer.sanitize().is_empty());
    assert_eq!(cfg.viewer.on_scene_change, OrientationPolicy::PreserveLook);
}

#[test]
fn every_scene_has_a_panorama_and_an_exit() {
    let reg = SceneRegistry::load(&bundled()).unwrap();
    for scene in reg.scenes() {
        assert!(!scene.panorama.is_empty(), "{} has no image", scene.key);
        assert!(
            scene.navigation_targets().next().is_some(),
            "{} is a dead end",
            scene.key
        );
    }
}

#[test]
fn hotspot_titles_and_info_survive_loading() {
    let reg = SceneRegistry::load(&bundled()).unwrap();
    let infos = reg
        .scenes()
        .flat_map(|s| s.hotspots.iter())
        .filter(|h| matches!(h.action, HotspotAction::Info { .. }))
        .count();
    assert!(infos >= 7);
}
