pub mod animation;
pub mod arrowheads;
pub mod config;
pub mod edge;
pub mod events;
pub mod model;
pub mod session;
pub mod shape;
pub mod surface;
pub mod vertex;
pub mod geometry {
    pub mod arrow;
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod editing {
    pub mod blink;
    pub mod delete;
    pub mod drag;
    pub mod drawing;
    pub mod menu;
    pub mod picking;
    pub mod queries;
}
mod json;

use animation::Blink;
use config::EditorConfig;
use editing::drag::DragState;
use editing::menu::ContextMenu;
use events::{EventBus, IdBinder};
use model::{CoordId, GeoPoint, PathData, ScreenPoint, SessionKey, ShapeRef, VertexKind};
use serde::{Deserialize, Serialize};
use session::{PathEditSession, SessionState};
use shape::{Drawable, Hoverable};
use surface::{LayerId, Surface};

pub use editing::picking::Pick;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Click,
    MouseDown,
    MouseMove,
    MouseUp,
    MouseOver,
    MouseOut,
    ContextMenu,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Map,
    Layer(LayerId),
}

/// One physical pointer input as delivered by the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub target: Target,
    pub screen: ScreenPoint,
    pub geo: GeoPoint,
}

/// Handlers currently registered on the map itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapHandlers {
    pub draw_click: bool,
    pub draw_move: bool,
    pub cancel_blink_once: bool,
    pub close_menu_once: bool,
}

#[derive(Debug, Default)]
pub(crate) struct IdGen {
    last: u32,
}

impl IdGen {
    pub(crate) fn next(&mut self) -> u32 {
        self.last += 1;
        self.last
    }
}

/// Vertex of another path that an unsaved drawing replaced with its own
/// junction. Restored on rollback.
#[derive(Clone, Debug)]
pub(crate) struct TakenVertex {
    pub(crate) session: SessionKey,
    pub(crate) index: usize,
    pub(crate) kind: VertexKind,
    pub(crate) position: GeoPoint,
    pub(crate) coord: Option<CoordId>,
}

/// Owns every editable path on one map and routes pointer input to them.
pub struct PathCollection<S: Surface> {
    pub(crate) surface: S,
    pub(crate) config: EditorConfig,
    pub(crate) ids: IdGen,
    pub(crate) sessions: Vec<PathEditSession>,
    pub(crate) events: EventBus,
    pub(crate) map: MapHandlers,
    /// Session fed by map clicks while a new path is drawn.
    pub(crate) drawing: Option<SessionKey>,
    pub(crate) drag: Option<DragState>,
    pub(crate) blink: Option<Blink>,
    pub(crate) menu: Option<ContextMenu>,
    /// Swallows the click that follows a drag release.
    pub(crate) suppress_click: bool,
    pub(crate) taken: Vec<TakenVertex>,
}

impl<S: Surface> PathCollection<S> {
    pub fn new(surface: S, config: EditorConfig) -> Self {
        PathCollection {
            surface,
            config,
            ids: IdGen::default(),
            sessions: Vec::new(),
            events: EventBus::new(),
            map: MapHandlers::default(),
            drawing: None,
            drag: None,
            blink: None,
            menu: None,
            suppress_click: false,
            taken: Vec::new(),
        }
    }

    /// Builds a collection and draws every persisted path.
    pub fn with_paths(surface: S, config: EditorConfig, paths: Vec<PathData>) -> Self {
        let mut c = PathCollection::new(surface, config);
        for p in paths {
            c.draw(p);
        }
        c
    }

    pub fn surface(&self) -> &S { &self.surface }
    pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }
    pub fn config(&self) -> &EditorConfig { &self.config }
    pub fn events_mut(&mut self) -> &mut EventBus { &mut self.events }
    pub fn sessions(&self) -> &[PathEditSession] { &self.sessions }
    pub fn map_handlers(&self) -> MapHandlers { self.map }
    pub fn blink(&self) -> Option<&Blink> { self.blink.as_ref() }
    pub fn context_menu(&self) -> Option<&ContextMenu> { self.menu.as_ref() }
    pub fn drag_state(&self) -> Option<&DragState> { self.drag.as_ref() }

    pub fn session(&self, key: SessionKey) -> Option<&PathEditSession> {
        self.sessions.iter().find(|s| s.key == key)
    }

    pub fn session_by_path_id(&self, id: &str) -> Option<&PathEditSession> {
        self.sessions.iter().find(|s| s.path_id.as_deref() == Some(id))
    }

    /// The session currently receiving drawing input.
    pub fn active_session(&self) -> Option<&PathEditSession> {
        self.drawing.and_then(|k| self.session(k))
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing.is_some()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Every path with at least one coordinate.
    pub fn paths(&self) -> Vec<PathData> {
        self.sessions
            .iter()
            .filter(|s| s.edge.as_ref().map_or(false, |e| !e.is_empty()))
            .map(|s| s.path_data())
            .collect()
    }

    pub(crate) fn session_index(&self, key: SessionKey) -> Option<usize> {
        self.sessions.iter().position(|s| s.key == key)
    }

    pub(crate) fn resolve_layer(&self, layer: LayerId) -> Option<(usize, ShapeRef)> {
        self.sessions
            .iter()
            .enumerate()
            .find_map(|(i, s)| s.shape_for_layer(layer).map(|r| (i, r)))
    }

    /// Destroys the session of path `id`. Without an id, destroys the most
    /// recent unsaved session and rolls back every provisional insertion it
    /// made into other paths.
    pub fn remove(&mut self, id: Option<&str>) -> bool {
        let idx = match id {
            Some(id) => self.sessions.iter().position(|s| s.path_id.as_deref() == Some(id)),
            None => self.sessions.iter().rposition(|s| !s.saved),
        };
        let removed = match idx {
            Some(i) => {
                self.drop_session(i);
                true
            }
            None => false,
        };
        if id.is_none() {
            self.rollback_provisional();
        }
        removed
    }

    pub(crate) fn drop_session(&mut self, idx: usize) {
        let mut s = self.sessions.remove(idx);
        if self.drawing == Some(s.key) {
            self.drawing = None;
            self.map.draw_click = false;
            self.map.draw_move = false;
        }
        let blinking_here = match self.blink.as_ref().map(|b| b.target()) {
            Some(ShapeRef::Vertex(v)) => s.vertex(v).is_some(),
            Some(ShapeRef::Edge(e)) => s.edge_id() == Some(e),
            None => false,
        };
        if blinking_here {
            self.blink = None;
            self.map.cancel_blink_once = false;
        }
        if self.drag.as_ref().map_or(false, |d| d.session == s.key) {
            self.drag = None;
            self.surface.set_dragging(true);
        }
        tracing::debug!(session = s.key.0, path = ?s.path_id, "session removed");
        s.erase(&mut self.surface);
        if self.drawing.is_none() {
            self.restore_clicks();
        }
    }

    /// Drops every provisional coordinate inserted by unsaved drawing.
    pub(crate) fn rollback_provisional(&mut self) {
        for s in self.sessions.iter_mut() {
            let Some(e) = s.edge.as_mut() else { continue };
            if e.rollback_insertions(&mut self.surface) {
                tracing::debug!(edge = e.id.0, "provisional insertions rolled back");
                s.refresh_arrowheads(&mut self.surface, &self.config);
            }
        }
        // latest takeover first so recorded indices stay valid
        for t in std::mem::take(&mut self.taken).into_iter().rev() {
            let Some(idx) = self.session_index(t.session) else { continue };
            let coord = t.coord.filter(|c| {
                self.sessions[idx].edge.as_ref().map_or(false, |e| e.index_of(*c).is_some())
            });
            if self.place_armed_vertex(idx, t.kind, t.position, coord).is_none() {
                continue;
            }
            let vertices = &mut self.sessions[idx].vertices;
            if let Some(v) = vertices.pop() {
                vertices.insert(t.index.min(vertices.len()), v);
            }
            tracing::debug!(session = t.session.0, "taken vertex restored");
        }
    }

    /// Attaches a persisted id to a freshly drawn path. The binder works once.
    pub fn bind_path_id(&mut self, binder: IdBinder, id: &str) -> Result<(), (&'static str, String)> {
        if id.is_empty() {
            return Err(("invalid_id", "path id must not be empty".to_string()));
        }
        let Some(idx) = self.session_index(binder.session()) else {
            return Err(("invalid_id", format!("no session {}", binder.session().0)));
        };
        if self.sessions[idx].saved {
            return Err(("already_bound", "binder was already used".to_string()));
        }
        if self.sessions[idx].state != SessionState::Completed {
            return Err(("not_completed", "path is still being drawn".to_string()));
        }
        self.sessions[idx].path_id = Some(id.to_string());
        self.sessions[idx].saved = true;
        self.taken.clear();
        for s in self.sessions.iter_mut() {
            if let Some(e) = s.edge.as_mut() {
                e.commit_insertions();
            }
        }
        tracing::debug!(session = binder.session().0, id, "path id bound");
        Ok(())
    }

    /// Removes every path and resets all interaction state.
    pub fn clear(&mut self) {
        while !self.sessions.is_empty() {
            self.drop_session(self.sessions.len() - 1);
        }
        self.map = MapHandlers::default();
        self.menu = None;
        self.suppress_click = false;
        self.taken.clear();
        self.surface.set_dragging(true);
    }

    pub fn handle_event(&mut self, ev: &PointerEvent) {
        match (ev.kind, ev.target) {
            (PointerKind::MouseMove, _) if self.drag.is_some() => self.drag_move(ev.geo),
            (PointerKind::MouseUp, _) if self.drag.is_some() => self.end_drag(),
            (PointerKind::Click, Target::Map) => self.map_click(ev.geo),
            (PointerKind::MouseMove, _) => self.draw_mouse_move(ev.geo),
            (PointerKind::Click, Target::Layer(l)) => self.shape_click(l, ev.geo),
            (PointerKind::MouseDown, Target::Layer(l)) => self.shape_mouse_down(l, ev.screen),
            (PointerKind::MouseOver, Target::Layer(l)) => self.shape_hover(l, true),
            (PointerKind::MouseOut, Target::Layer(l)) => self.shape_hover(l, false),
            (PointerKind::ContextMenu, Target::Layer(l)) => {
                self.open_context_menu(l, ev.screen, ev.geo);
            }
            _ => {}
        }
    }

    pub(crate) fn map_click(&mut self, p: GeoPoint) {
        // a drag released over the map consumes its own click here
        self.suppress_click = false;
        if self.map.close_menu_once {
            self.map.close_menu_once = false;
            self.menu = None;
        }
        if self.map.cancel_blink_once {
            self.cancel_blink();
        }
        if self.map.draw_click {
            self.draw_click(p);
        }
    }

    fn shape_click(&mut self, layer: LayerId, p: GeoPoint) {
        if std::mem::take(&mut self.suppress_click) {
            return;
        }
        let Some((idx, shape)) = self.resolve_layer(layer) else {
            return self.map_click(p);
        };
        let armed = match shape {
            ShapeRef::Vertex(v) => self.sessions[idx].vertex(v).map_or(false, |v| v.handlers().click),
            ShapeRef::Edge(_) => self.sessions[idx].edge.as_ref().map_or(false, |e| e.handlers().click),
        };
        if !armed {
            // shapes without a click handler let the click reach the map
            return self.map_click(p);
        }
        self.start_blink(shape, matches!(shape, ShapeRef::Edge(_)));
    }

    fn shape_hover(&mut self, layer: LayerId, over: bool) {
        let Some((idx, shape)) = self.resolve_layer(layer) else { return };
        let (surface, cfg) = (&mut self.surface, &self.config);
        let s = &mut self.sessions[idx];
        match shape {
            ShapeRef::Vertex(v) => {
                if let Some(v) = s.vertex_mut(v).filter(|v| v.handlers().hover) {
                    if over { v.hover(surface, cfg) } else { v.out(surface, cfg) }
                }
            }
            ShapeRef::Edge(_) => {
                if let Some(e) = s.edge.as_mut().filter(|e| e.handlers().hover) {
                    if over { e.hover(surface, cfg) } else { e.out(surface, cfg) }
                }
            }
        }
    }

    /// Redraws displayed arrowheads for the new zoom level.
    pub fn zoom_end(&mut self) {
        for s in self.sessions.iter_mut() {
            if s.arrowheads.as_ref().map_or(false, |a| a.zoom_armed()) {
                s.show_arrowheads(&mut self.surface, &self.config);
            }
        }
    }

    /// Re-enables clicks on every completed path.
    pub(crate) fn restore_clicks(&mut self) {
        for s in self.sessions.iter_mut().filter(|s| s.state == SessionState::Completed) {
            s.set_clicks_armed(true);
        }
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }

    /// Draws every path of a `{version, paths}` document. Returns false and
    /// draws nothing if the document is malformed or exceeds the caps.
    pub fn from_json_value(&mut self, v: serde_json::Value) -> bool {
        json::from_json_impl(self, v)
    }

    pub fn from_json_value_strict(&mut self, v: serde_json::Value) -> Result<usize, (&'static str, String)> {
        json::from_json_impl_strict(self, v)
    }
}
