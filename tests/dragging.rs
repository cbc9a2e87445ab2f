mod common;

use common::*;
use polyedit::events::EditEvent;
use polyedit::model::{ScreenPoint, VertexKind};
use polyedit::shape::Drawable;
use polyedit::{PointerKind, Target};

fn two_parallel_paths() -> Collection {
    collection(vec![
        path("a", &[(100.0, 100.0), (300.0, 100.0)]),
        path("b", &[(100.0, 300.0), (300.0, 300.0)]),
    ])
}

#[test]
fn drop_on_line_splices_in_a_junction() {
    let mut c = two_parallel_paths();
    let log = record(&mut c);
    drag(&mut c, (100.0, 300.0), (200.0, 104.0));

    assert_eq!(coords(&c, "a"), vec![geo(100.0, 100.0), geo(200.0, 100.0), geo(300.0, 100.0)]);
    assert_eq!(coords(&c, "b"), vec![geo(200.0, 100.0), geo(300.0, 300.0)]);
    let a = c.session_by_path_id("a").unwrap();
    let junction = a.vertices().iter().find(|v| v.kind() == VertexKind::Junction).unwrap();
    assert_eq!(junction.position(), geo(200.0, 100.0));
    assert!(junction.handlers().drag);
    assert_eq!(c.session_by_path_id("b").map(|s| s.vertices().len()), Some(1));
    assert!(c.surface().dragging_enabled());
    assert!(c.drag_state().is_none());

    let events = log.borrow();
    assert_eq!(events.len(), 1);
    match &events[0] {
        EditEvent::PathsDragged(paths) => {
            assert_eq!(paths.len(), 1);
            assert_eq!(paths[0].id.as_deref(), Some("b"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn drop_on_vertex_fuses_both() {
    let mut c = two_parallel_paths();
    drag(&mut c, (300.0, 300.0), (305.0, 105.0));

    assert_eq!(coords(&c, "a"), vec![geo(100.0, 100.0), geo(300.0, 100.0)]);
    assert_eq!(coords(&c, "b"), vec![geo(100.0, 300.0), geo(300.0, 100.0)]);
    let a = c.session_by_path_id("a").unwrap();
    assert_eq!(a.kinds(), vec![VertexKind::Endpoint, VertexKind::Junction]);
    assert_eq!(c.session_by_path_id("b").map(|s| s.kinds()), Some(vec![VertexKind::Endpoint]));
}

#[test]
fn small_moves_near_the_grab_point_are_ignored() {
    let mut c = two_parallel_paths();
    let log = record(&mut c);
    drag(&mut c, (100.0, 300.0), (105.0, 305.0));
    assert_eq!(coords(&c, "b"), vec![geo(100.0, 300.0), geo(300.0, 300.0)]);
    assert_eq!(c.session_by_path_id("b").map(|s| s.vertices().len()), Some(2));
    assert!(matches!(log.borrow().as_slice(), [EditEvent::PathsDragged(_)]));
}

#[test]
fn panning_is_off_while_dragging() {
    let mut c = two_parallel_paths();
    at_shape(&mut c, PointerKind::MouseDown, 100.0, 300.0);
    assert!(!c.surface().dragging_enabled());
    let b = c.session_by_path_id("b").unwrap();
    let front = b.vertices()[0].layers().front;
    assert!(c.surface().is_topmost(front));
    assert_eq!(b.edge().map(|e| e.dragged().len()), Some(1));

    send(&mut c, PointerKind::MouseMove, Target::Map, 150.0, 200.0);
    assert_eq!(coords(&c, "b")[0], geo(150.0, 200.0));
    assert_eq!(c.surface().position_of(front), Some(geo(150.0, 200.0)));
    send(&mut c, PointerKind::MouseUp, Target::Map, 150.0, 200.0);
    assert!(c.surface().dragging_enabled());
}

#[test]
fn shared_points_move_together() {
    let mut c = collection(vec![
        path("a", &[(100.0, 100.0), (300.0, 100.0)]),
        path("b", &[(300.0, 100.0), (300.0, 300.0)]),
    ]);
    let log = record(&mut c);
    drag(&mut c, (300.0, 100.0), (400.0, 50.0));
    assert_eq!(coords(&c, "a")[1], geo(400.0, 50.0));
    assert_eq!(coords(&c, "b")[0], geo(400.0, 50.0));
    match &log.borrow()[0] {
        EditEvent::PathsDragged(paths) => assert_eq!(paths.len(), 2),
        other => panic!("unexpected event {other:?}"),
    };
}

#[test]
fn click_after_drag_does_not_select() {
    let mut c = two_parallel_paths();
    drag(&mut c, (100.0, 300.0), (150.0, 200.0));
    at_shape(&mut c, PointerKind::Click, 150.0, 200.0);
    assert!(c.blink().is_none());
    at_shape(&mut c, PointerKind::Click, 150.0, 200.0);
    assert!(c.blink().is_some());
    assert_eq!(c.target_at(ScreenPoint::new(150.0, 200.0)), c.target_at(ScreenPoint::new(151.0, 201.0)));
}

#[test]
fn drag_released_over_the_map_does_not_eat_later_clicks() {
    let mut c = two_parallel_paths();
    at_shape(&mut c, PointerKind::MouseDown, 112.0, 312.0);
    send(&mut c, PointerKind::MouseMove, Target::Map, 124.0, 324.0);
    send(&mut c, PointerKind::MouseUp, Target::Map, 124.0, 324.0);
    assert_eq!(coords(&c, "b")[0], geo(100.0, 300.0));

    // the release click lands on the map, not on the vertex
    send(&mut c, PointerKind::Click, Target::Map, 124.0, 324.0);
    assert!(c.blink().is_none());

    at_shape(&mut c, PointerKind::Click, 200.0, 101.0);
    let a_edge = c.session_by_path_id("a").and_then(|s| s.edge_id()).unwrap();
    assert_eq!(c.blink().map(|b| b.target()), Some(polyedit::model::ShapeRef::Edge(a_edge)));
}
