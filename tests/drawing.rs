mod common;

use common::*;
use polyedit::events::EditEvent;
use polyedit::model::VertexKind;
use polyedit::session::SessionState;
use polyedit::shape::Drawable;

fn kinds(c: &Collection, key: polyedit::model::SessionKey) -> Vec<VertexKind> {
    c.session(key).map(|s| s.kinds()).unwrap_or_default()
}

#[test]
fn click_near_last_point_finishes_path() {
    let mut c = collection(vec![]);
    let log = record(&mut c);
    let key = c.draw_new_line();
    assert!(c.map_handlers().draw_click);

    map_click(&mut c, 100.0, 100.0);
    assert_eq!(kinds(&c, key), vec![VertexKind::Endpoint]);
    assert!(c.session(key).and_then(|s| s.preview()).is_some());
    map_click(&mut c, 200.0, 100.0);
    map_click(&mut c, 200.0, 200.0);
    assert_eq!(c.session(key).map(|s| s.state()), Some(SessionState::Drawing));

    map_click(&mut c, 205.0, 203.0);
    let s = c.session(key).unwrap();
    assert_eq!(s.state(), SessionState::Completed);
    assert_eq!(s.coordinates(), vec![geo(100.0, 100.0), geo(200.0, 100.0), geo(200.0, 200.0)]);
    assert_eq!(s.kinds(), vec![VertexKind::Endpoint, VertexKind::Midpoint, VertexKind::Endpoint]);
    assert!(s.preview().is_none());
    assert_eq!(s.arrowheads().map(|a| a.count()), Some(2));
    assert_eq!(c.surface().polygon_count(), 2);
    assert!(!c.is_drawing());
    assert!(!c.map_handlers().draw_click);
    assert!(c.blink().is_some());

    let events = log.borrow();
    assert_eq!(events.len(), 1);
    match &events[0] {
        EditEvent::DrawCompleted { path, binder } => {
            assert_eq!(path.id, None);
            assert_eq!(path.coordinates.len(), 3);
            assert_eq!(binder.session(), key);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn binder_redeems_once() {
    let mut c = collection(vec![]);
    let log = record(&mut c);
    c.draw_new_line();
    for (x, y) in [(100.0, 100.0), (200.0, 100.0), (200.0, 100.0)] {
        map_click(&mut c, x, y);
    }
    let binder = match &log.borrow()[0] {
        EditEvent::DrawCompleted { binder, .. } => *binder,
        other => panic!("unexpected event {other:?}"),
    };
    assert_eq!(c.bind_path_id(binder, ""), Err(("invalid_id", "path id must not be empty".to_string())));
    assert!(c.bind_path_id(binder, "p1").is_ok());
    assert_eq!(c.bind_path_id(binder, "p2").map_err(|e| e.0), Err("already_bound"));
    assert!(c.session_by_path_id("p1").is_some());
    assert_eq!(c.to_json_value()["paths"][0]["id"], "p1");
}

#[test]
fn closing_a_loop_reuses_the_first_vertex() {
    let mut c = collection(vec![]);
    let key = c.draw_new_line();
    for (x, y) in [(100.0, 100.0), (200.0, 100.0), (200.0, 200.0)] {
        map_click(&mut c, x, y);
    }
    map_click(&mut c, 105.0, 103.0);
    let s = c.session(key).unwrap();
    assert_eq!(s.state(), SessionState::Drawing);
    assert_eq!(s.coordinates().len(), 4);
    assert_eq!(s.coordinates()[3], geo(100.0, 100.0));
    assert_eq!(s.vertices().len(), 3);
    assert_eq!(s.kinds()[0], VertexKind::Midpoint);

    map_click(&mut c, 102.0, 101.0);
    let s = c.session(key).unwrap();
    assert_eq!(s.state(), SessionState::Completed);
    assert_eq!(s.kinds(), vec![VertexKind::Midpoint; 3]);
    assert_eq!(s.arrowheads().map(|a| a.count()), Some(3));
}

#[test]
fn first_click_snaps_onto_existing_line_as_junction() {
    let mut c = collection(vec![path("a", &[(100.0, 100.0), (300.0, 100.0)])]);
    let key = c.draw_new_line();

    map_click(&mut c, 200.0, 104.0);
    let s = c.session(key).unwrap();
    assert_eq!(s.coordinates(), vec![geo(200.0, 100.0)]);
    assert_eq!(s.kinds(), vec![VertexKind::Junction]);
    assert_eq!(coords(&c, "a"), vec![geo(100.0, 100.0), geo(200.0, 100.0), geo(300.0, 100.0)]);

    map_click(&mut c, 200.0, 200.0);
    map_click(&mut c, 201.0, 201.0);
    let s = c.session(key).unwrap();
    assert_eq!(s.state(), SessionState::Completed);
    assert_eq!(s.kinds(), vec![VertexKind::Junction, VertexKind::Endpoint]);
}

#[test]
fn abandoning_unsaved_drawing_rolls_back_insertions() {
    let mut c = collection(vec![path("a", &[(100.0, 100.0), (300.0, 100.0)])]);
    c.draw_new_line();
    map_click(&mut c, 200.0, 104.0);
    map_click(&mut c, 200.0, 200.0);
    assert_eq!(coords(&c, "a").len(), 3);
    assert_eq!(c.session_by_path_id("a").and_then(|s| s.edge()).map(|e| e.has_provisional()), Some(true));

    // a second draw_new_line discards the unsaved one first
    c.draw_new_line();
    assert_eq!(coords(&c, "a"), vec![geo(100.0, 100.0), geo(300.0, 100.0)]);
    assert_eq!(c.session_count(), 2);
    assert!(c.remove(None));
    assert_eq!(c.session_count(), 1);
    assert!(!c.is_drawing());
}

#[test]
fn binding_commits_insertions() {
    let mut c = collection(vec![path("a", &[(100.0, 100.0), (300.0, 100.0)])]);
    let log = record(&mut c);
    c.draw_new_line();
    for (x, y) in [(200.0, 104.0), (200.0, 200.0), (200.0, 200.0)] {
        map_click(&mut c, x, y);
    }
    let binder = match &log.borrow()[0] {
        EditEvent::DrawCompleted { binder, .. } => *binder,
        other => panic!("unexpected event {other:?}"),
    };
    c.bind_path_id(binder, "b").unwrap();
    assert!(!c.remove(None));
    assert_eq!(coords(&c, "a").len(), 3);
    assert!(c.remove(Some("b")));
    assert_eq!(coords(&c, "a").len(), 3);
}

#[test]
fn clicking_another_paths_vertex_takes_it_over() {
    let mut c = collection(vec![path("a", &[(100.0, 100.0), (300.0, 100.0)])]);
    let key = c.draw_new_line();
    map_click(&mut c, 304.0, 96.0);
    let s = c.session(key).unwrap();
    assert_eq!(s.coordinates(), vec![geo(300.0, 100.0)]);
    assert_eq!(s.kinds(), vec![VertexKind::Junction]);
    assert_eq!(c.session_by_path_id("a").map(|s| s.vertices().len()), Some(1));
}

#[test]
fn abandoning_a_takeover_gives_the_vertex_back() {
    let mut c = collection(vec![path("a", &[(100.0, 100.0), (300.0, 100.0)])]);
    let before: Vec<_> = c.session_by_path_id("a").unwrap().vertices().iter().map(|v| (v.kind(), v.position())).collect();
    c.draw_new_line();
    map_click(&mut c, 304.0, 96.0);
    map_click(&mut c, 300.0, 300.0);
    assert!(c.remove(None));

    let a = c.session_by_path_id("a").unwrap();
    let after: Vec<_> = a.vertices().iter().map(|v| (v.kind(), v.position())).collect();
    assert_eq!(after, before);
    assert_eq!(a.coordinates(), vec![geo(100.0, 100.0), geo(300.0, 100.0)]);
    let restored = &a.vertices()[1];
    assert!(restored.handlers().drag && restored.handlers().click);
    assert_eq!(restored.coord().and_then(|id| a.edge().and_then(|e| e.index_of(id))), Some(1));
}

#[test]
fn bound_takeover_stays_after_later_abandon() {
    let mut c = collection(vec![path("a", &[(100.0, 100.0), (300.0, 100.0)])]);
    let log = record(&mut c);
    c.draw_new_line();
    map_click(&mut c, 304.0, 96.0);
    map_click(&mut c, 300.0, 300.0);
    map_click(&mut c, 300.0, 300.0);
    let binder = match &log.borrow()[0] {
        EditEvent::DrawCompleted { binder, .. } => *binder,
        other => panic!("unexpected event {other:?}"),
    };
    c.bind_path_id(binder, "b").unwrap();

    c.draw_new_line();
    assert!(c.remove(None));
    assert_eq!(c.session_by_path_id("a").map(|s| s.vertices().len()), Some(1));
    assert_eq!(c.session_by_path_id("b").map(|s| s.kinds()), Some(vec![VertexKind::Junction, VertexKind::Endpoint]));
}

#[test]
fn removing_by_id_leaves_other_paths_alone() {
    let mut c = collection(vec![
        path("a", &[(100.0, 100.0), (300.0, 100.0)]),
        path("b", &[(100.0, 200.0), (200.0, 250.0), (300.0, 200.0)]),
        path("c", &[(100.0, 400.0), (300.0, 400.0)]),
    ]);
    let layers = c.surface().layer_count();
    assert!(c.remove(Some("b")));
    assert_eq!(c.session_count(), 2);
    assert!(c.session_by_path_id("b").is_none());
    assert_eq!(coords(&c, "a"), vec![geo(100.0, 100.0), geo(300.0, 100.0)]);
    assert_eq!(coords(&c, "c"), vec![geo(100.0, 400.0), geo(300.0, 400.0)]);
    // two polylines plus three vertex pairs
    assert_eq!(c.surface().layer_count(), layers - 8);
    assert!(!c.remove(Some("b")));
}

#[test]
fn cursor_moves_drag_the_rubber_band() {
    let mut c = collection(vec![]);
    let key = c.draw_new_line();
    map_click(&mut c, 100.0, 100.0);
    send(&mut c, polyedit::PointerKind::MouseMove, polyedit::Target::Map, 150.0, 160.0);
    let s = c.session(key).unwrap();
    assert_eq!(s.preview().map(|v| v.position()), Some(geo(150.0, 160.0)));
    assert_eq!(s.coordinates(), vec![geo(100.0, 100.0)]);
}

#[test]
fn loaded_paths_are_completed_and_clickable() {
    let c = collection(vec![
        path("a", &[(100.0, 100.0), (200.0, 100.0), (300.0, 100.0)]),
        path("b", &[]),
    ]);
    assert_eq!(c.session_count(), 1);
    let s = c.session_by_path_id("a").unwrap();
    assert_eq!(s.state(), SessionState::Completed);
    assert_eq!(s.kinds(), vec![VertexKind::Endpoint, VertexKind::Midpoint, VertexKind::Endpoint]);
    assert!(s.arrowheads().is_none());
    let edge = s.edge().map(|e| *e.handlers()).unwrap();
    assert!(edge.click && edge.hover && edge.context_menu && !edge.drag);
    assert_eq!(c.paths().len(), 1);
}
