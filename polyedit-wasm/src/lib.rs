use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use polyedit::config::EditorConfig;
use polyedit::events::{EditEvent, IdBinder};
use serde::Serialize;
use wasm_bindgen::prelude::*;

mod api;
mod error;
mod interop;
mod surface;

pub use surface::JsSurface;

#[wasm_bindgen]
pub struct Editor {
    pub(crate) inner: polyedit::PathCollection<JsSurface>,
    pub(crate) queue: Rc<RefCell<Vec<EditEvent>>>,
    /// Binders handed out with draw-completed events, by session key.
    pub(crate) binders: HashMap<u32, IdBinder>,
}

/// Wire shape of a notification delivered to the host.
#[derive(Serialize)]
#[serde(tag = "topic", rename_all = "camelCase")]
enum HostEvent<'a> {
    DrawCompleted { path: &'a polyedit::model::PathData, session: u32 },
    PathClicked { path: &'a polyedit::model::PathData },
    PathsDragged { paths: &'a [polyedit::model::PathData] },
    PathRemoved { id: Option<&'a str> },
    PointAdded { path: &'a polyedit::model::PathData },
    PointsRemoved { paths: &'a [polyedit::model::PathData] },
}

impl Editor {
    pub fn rs_new(host: JsValue, config: EditorConfig) -> Editor {
        let mut inner = polyedit::PathCollection::new(JsSurface::new(host), config);
        let queue = Rc::new(RefCell::new(Vec::new()));
        let sink = queue.clone();
        inner.events_mut().subscribe(move |e| sink.borrow_mut().push(e.clone()));
        Editor { inner, queue, binders: HashMap::new() }
    }

    /// Forgets binders whose session is gone.
    pub(crate) fn rs_prune_binders(&mut self) {
        let inner = &self.inner;
        self.binders.retain(|k, _| inner.session(polyedit::model::SessionKey(*k)).is_some());
    }

    /// Drains queued notifications into a JS array, keeping binders so the
    /// host can redeem them by session key.
    pub(crate) fn rs_take_events(&mut self) -> JsValue {
        let events: Vec<EditEvent> = self.queue.borrow_mut().drain(..).collect();
        let out = js_sys::Array::new();
        for e in &events {
            let wire = match e {
                EditEvent::DrawCompleted { path, binder } => {
                    self.binders.insert(binder.session().0, *binder);
                    HostEvent::DrawCompleted { path, session: binder.session().0 }
                }
                EditEvent::PathClicked(path) => HostEvent::PathClicked { path },
                EditEvent::PathsDragged(paths) => HostEvent::PathsDragged { paths },
                EditEvent::PathRemoved(id) => HostEvent::PathRemoved { id: id.as_deref() },
                EditEvent::PointAdded(path) => HostEvent::PointAdded { path },
                EditEvent::PointsRemoved(paths) => HostEvent::PointsRemoved { paths },
            };
            out.push(&serde_wasm_bindgen::to_value(&wire).unwrap_or(JsValue::NULL));
        }
        out.into()
    }
}
