#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use polyedit::config::EditorConfig;
use polyedit::events::EditEvent;
use polyedit::model::{GeoPoint, PathData, ScreenPoint};
use polyedit::surface::RecordingSurface;
use polyedit::{PathCollection, PointerEvent, PointerKind, Target};

pub type Collection = PathCollection<RecordingSurface>;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Screen and geo coincide under the identity viewport: x is lng, y is lat.
pub fn geo(x: f64, y: f64) -> GeoPoint {
    GeoPoint::new(y, x)
}

pub fn path(id: &str, pts: &[(f64, f64)]) -> PathData {
    PathData { id: Some(id.to_string()), coordinates: pts.iter().map(|(x, y)| geo(*x, *y)).collect() }
}

pub fn collection(paths: Vec<PathData>) -> Collection {
    init_tracing();
    PathCollection::with_paths(RecordingSurface::new(), EditorConfig::default(), paths)
}

/// Subscribes a recorder that keeps every published event.
pub fn record(c: &mut Collection) -> Rc<RefCell<Vec<EditEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    c.events_mut().subscribe(move |e| sink.borrow_mut().push(e.clone()));
    log
}

pub fn send(c: &mut Collection, kind: PointerKind, target: Target, x: f64, y: f64) {
    let ev = PointerEvent { kind, target, screen: ScreenPoint::new(x, y), geo: geo(x, y) };
    c.handle_event(&ev);
}

pub fn map_click(c: &mut Collection, x: f64, y: f64) {
    send(c, PointerKind::MouseMove, Target::Map, x, y);
    send(c, PointerKind::Click, Target::Map, x, y);
}

/// Delivers a pointer event to whatever shape lies under (x, y).
pub fn at_shape(c: &mut Collection, kind: PointerKind, x: f64, y: f64) {
    let target = c.target_at(ScreenPoint::new(x, y));
    assert_ne!(target, Target::Map, "no shape under ({x}, {y})");
    send(c, kind, target, x, y);
}

/// Press on the vertex at `from`, move through `to`, release.
pub fn drag(c: &mut Collection, from: (f64, f64), to: (f64, f64)) {
    at_shape(c, PointerKind::MouseDown, from.0, from.1);
    send(c, PointerKind::MouseMove, Target::Map, to.0, to.1);
    send(c, PointerKind::MouseUp, Target::Map, to.0, to.1);
}

pub fn coords(c: &Collection, id: &str) -> Vec<GeoPoint> {
    c.session_by_path_id(id).map(|s| s.coordinates()).unwrap_or_default()
}
