// Lifecycle tests for the viewer session over a recording surface.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tour_core::*;

/// What is currently attached to the fake mount element.
#[derive(Default, Debug)]
struct MountRecord {
    next_id: usize,
    listeners: BTreeMap<usize, InputChannel>,
    markers: BTreeMap<usize, String>,
    placements: usize,
    cursor: Option<Cursor>,
    last_state: Option<LoadState>,
    detached: usize,
}

#[derive(Clone, Default)]
struct FakeSurface(Rc<RefCell<MountRecord>>);

impl MountSurface for FakeSurface {
    type Listener = usize;
    type Marker = usize;

    fn listen(&mut self, channel: InputChannel) -> usize {
        let mut r = self.0.borrow_mut();
        r.next_id += 1;
        let id = r.next_id;
        r.listeners.insert(id, channel);
        id
    }

    fn unlisten(&mut self, listener: usize) {
        self.0.borrow_mut().listeners.remove(&listener);
    }

    fn create_marker(&mut self, _index: usize, marker: &Marker) -> usize {
        let mut r = self.0.borrow_mut();
        r.next_id += 1;
        let id = r.next_id;
        r.markers.insert(id, marker.id.clone());
        id
    }

    fn place_marker(&mut self, marker: &usize, _placement: &MarkerPlacement<'_>) {
        let mut r = self.0.borrow_mut();
        assert!(r.markers.contains_key(marker), "placing a removed marker");
        r.placements += 1;
    }

    fn remove_marker(&mut self, marker: usize) {
        self.0.borrow_mut().markers.remove(&marker);
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.0.borrow_mut().cursor = Some(cursor);
    }

    fn load_state_changed(&mut self, state: &LoadState) {
        self.0.borrow_mut().last_state = Some(state.clone());
    }

    fn detach(&mut self) {
        self.0.borrow_mut().detached += 1;
    }
}

fn registry() -> SceneRegistry {
    SceneRegistry::from_scenes(
        [
            Scene::new("A", "Gate", "/a.png")
                .with_hotspot(Hotspot::navigation("to-b", 30.0, 0.0, "B").with_title("Court"))
                .with_hotspot(Hotspot::info("note", 120.0, -5.0, "text-X")),
            Scene::new("B", "Court", "/b.png")
                .with_hotspot(Hotspot::navigation("to-a", -60.0, 0.0, "A"))
                .with_hotspot(Hotspot::info("wall", 180.0, 5.0, "Restored in 1990")),
        ],
        "A",
    )
}

fn mount(scene: &Scene, surface: &FakeSurface) -> ViewerSession<FakeSurface> {
    ViewerSession::mount(
        ViewerProps::for_scene(scene, false, Viewport::new(800.0, 600.0)),
        ViewerSettings::default(),
        None,
        surface.clone(),
    )
}

#[test]
fn mount_registers_every_input_channel() {
    let reg = registry();
    let surface = FakeSurface::default();
    let session = mount(reg.get_scene("A").unwrap(), &surface);
    let rec = surface.0.borrow();
    assert_eq!(rec.listeners.len(), 4);
    assert_eq!(rec.cursor, Some(Cursor::Grab));
    assert_eq!(rec.last_state, Some(LoadState::Loading { progress: 0.0 }));
    assert!(rec.markers.is_empty(), "no markers before the image loads");
    assert_eq!(session.listener_count(), 4);
}

#[test]
fn unmount_leaves_nothing_behind_and_is_idempotent() {
    let reg = registry();
    let surface = FakeSurface::default();
    let mut session = mount(reg.get_scene("A").unwrap(), &surface);
    assert!(session.finish_loading());
    assert!(session.frame().is_some());
    assert_eq!(surface.0.borrow().markers.len(), 2);

    session.unmount();
    session.unmount();
    drop(session);

    let rec = surface.0.borrow();
    assert!(rec.listeners.is_empty());
    assert!(rec.markers.is_empty());
    assert_eq!(rec.detached, 1);
}

#[test]
fn dropping_a_session_tears_it_down() {
    let reg = registry();
    let surface = FakeSurface::default();
    {
        let mut session = mount(reg.get_scene("B").unwrap(), &surface);
        session.finish_loading();
    }
    let rec = surface.0.borrow();
    assert!(rec.listeners.is_empty() && rec.markers.is_empty());
}

#[test]
fn load_completing_after_unmount_is_a_no_op() {
    let reg = registry();
    let surface = FakeSurface::default();
    let mut session = mount(reg.get_scene("A").unwrap(), &surface);
    session.unmount();
    session.report_progress(10, 10);
    assert!(!session.finish_loading());
    assert!(!session.fail_loading("late"));
    assert!(session.frame().is_none());
    assert!(surface.0.borrow().markers.is_empty());
}

#[test]
fn failed_load_shows_error_and_never_creates_markers() {
    let reg = registry();
    let surface = FakeSurface::default();
    let mut session = mount(reg.get_scene("A").unwrap(), &surface);
    assert!(session.fail_loading("decode error"));
    assert!(!session.finish_loading());
    assert!(session.frame().is_none());
    let rec = surface.0.borrow();
    assert!(rec.markers.is_empty());
    assert!(matches!(rec.last_state, Some(LoadState::Failed { .. })));
}

#[test]
fn drag_switches_cursor_affordance() {
    let reg = registry();
    let surface = FakeSurface::default();
    let mut session = mount(reg.get_scene("A").unwrap(), &surface);
    session.finish_loading();
    session.pointer_down(10.0, 10.0);
    assert_eq!(surface.0.borrow().cursor, Some(Cursor::Grabbing));
    session.pointer_move(30.0, 10.0);
    session.pointer_up();
    assert_eq!(surface.0.borrow().cursor, Some(Cursor::Grab));
    assert!(session.controller().orientation().yaw > 0.0);
}

#[test]
fn navigation_hotspot_switches_scene_and_replaces_markers() {
    let reg = registry();
    let mut tour = TourState::new(&reg);
    let surface = FakeSurface::default();

    let mut a = mount(tour.current_scene(&reg).unwrap(), &surface);
    a.finish_loading();
    a.frame();

    let hotspot = a.activate(0).expect("navigation hotspot");
    assert_eq!(hotspot.target(), Some("B"));
    assert!(hotspot.is_navigation());

    let action = tour.activate(&hotspot, &reg);
    assert_eq!(action, TourAction::SwitchScene("B".into()));

    let carried = a.unmount().carried_over(OrientationPolicy::PreserveLook);
    drop(a);
    let scene_b = tour.current_scene(&reg).unwrap();
    let mut b = ViewerSession::mount(
        ViewerProps::for_scene(scene_b, false, Viewport::new(800.0, 600.0)),
        ViewerSettings::default(),
        Some(carried),
        surface.clone(),
    );
    assert!(b.finish_loading());
    b.frame();

    let rec = surface.0.borrow();
    let ids: Vec<&str> = rec.markers.values().map(String::as_str).collect();
    assert_eq!(ids, vec!["to-a", "wall"]);
    assert_eq!(rec.listeners.len(), 4, "only the new viewer listens");
    assert_eq!(b.controller().props().panorama, "/b.png");
}

#[test]
fn info_hotspot_opens_and_dismisses_popup() {
    let reg = registry();
    let mut tour = TourState::new(&reg);
    let surface = FakeSurface::default();
    let mut a = mount(tour.current_scene(&reg).unwrap(), &surface);
    a.finish_loading();

    let hotspot = a.activate(1).unwrap();
    assert_eq!(tour.activate(&hotspot, &reg), TourAction::ShowInfo("text-X".into()));
    assert_eq!(tour.popup(), Some("text-X"));
    assert_eq!(tour.current_key(), "A");

    tour.dismiss_popup();
    assert_eq!(tour.popup(), None);
    assert_eq!(tour.current_key(), "A");
    assert!(a.is_mounted());
}

#[test]
fn dangling_navigation_is_ignored() {
    let reg = registry();
    let mut tour = TourState::new(&reg);
    let stray = Hotspot::navigation("stray", 0.0, 0.0, "nowhere");
    let action = tour.activate(&stray, &reg);
    assert_eq!(action, TourAction::Ignored(TourError::UnknownScene("nowhere".into())));
    assert_eq!(tour.current_key(), "A");
}

#[test]
fn blank_info_activation_is_ignored() {
    let reg = registry();
    let mut tour = TourState::new(&reg);
    let blank = Hotspot::info("blank", 0.0, 0.0, "   ");
    assert!(matches!(tour.activate(&blank, &reg), TourAction::Ignored(_)));
    assert_eq!(tour.popup(), None);
}

#[test]
fn failed_scene_can_be_rebuilt_by_retrying() {
    let reg = registry();
    let mut tour = TourState::new(&reg);
    let surface = FakeSurface::default();

    let mut a = mount(tour.current_scene(&reg).unwrap(), &surface);
    a.pointer_down(0.0, 0.0);
    a.pointer_move(40.0, 0.0);
    a.pointer_up();
    assert!(a.fail_loading("network"));
    assert!(!a.wants_frames(), "a failed load stops the frame loop");
    assert!(a.activate(0).is_none());

    assert_eq!(tour.retry(&reg), TourAction::Reload("A".into()));
    assert_eq!(tour.current_key(), "A");

    let carried = a.unmount().carried_over(OrientationPolicy::PreserveAll);
    drop(a);
    let mut again = ViewerSession::mount(
        ViewerProps::for_scene(tour.current_scene(&reg).unwrap(), false, Viewport::new(800.0, 600.0)),
        ViewerSettings::default(),
        Some(carried),
        surface.clone(),
    );
    assert!(again.wants_frames());
    assert!(again.finish_loading());
    assert_eq!(again.marker_count(), 2);
    assert_eq!(again.controller().orientation().yaw, carried.yaw);
    assert_eq!(again.activate(0).unwrap().target(), Some("B"));
    assert_eq!(surface.0.borrow().listeners.len(), 4);
}

#[test]
fn retry_clears_the_popup() {
    let reg = registry();
    let mut tour = TourState::new(&reg);
    tour.activate(&Hotspot::info("note", 0.0, 0.0, "text-X"), &reg);
    assert_eq!(tour.popup(), Some("text-X"));
    assert!(matches!(tour.retry(&reg), TourAction::Reload(_)));
    assert_eq!(tour.popup(), None);
}

#[test]
fn unmounted_session_wants_no_frames() {
    let reg = registry();
    let surface = FakeSurface::default();
    let mut session = mount(reg.get_scene("B").unwrap(), &surface);
    assert!(session.wants_frames());
    session.finish_loading();
    assert_eq!(session.marker_count(), 2);
    session.unmount();
    assert!(!session.wants_frames());
    assert_eq!(session.marker_count(), 0);
}
