use crate::arrowheads::ArrowheadSet;
use crate::config::EditorConfig;
use crate::edge::Edge;
use crate::geometry::math::{in_radius, is_on_polyline};
use crate::geometry::tolerance::ON_LINE_TOLERANCE;
use crate::model::{
    CoordId, EdgeId, GeoPoint, PathData, PathId, SessionKey, ShapeRef, VertexId, VertexKind,
};
use crate::shape::Drawable;
use crate::surface::{LayerId, Surface};
use crate::vertex::Vertex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Drawing,
    Completed,
}

/// One editable path: its edge, the vertices drawn on it, its arrowheads and,
/// while drawing, the vertex that follows the cursor.
#[derive(Clone, Debug)]
pub struct PathEditSession {
    pub(crate) key: SessionKey,
    pub(crate) path_id: Option<PathId>,
    pub(crate) state: SessionState,
    pub(crate) edge: Option<Edge>,
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) arrowheads: Option<ArrowheadSet>,
    pub(crate) preview: Option<Vertex>,
    /// False until a freshly drawn path has been bound to a persisted id.
    pub(crate) saved: bool,
}

impl PathEditSession {
    pub(crate) fn new(key: SessionKey, path_id: Option<PathId>, saved: bool) -> Self {
        PathEditSession {
            key,
            path_id,
            state: SessionState::Empty,
            edge: None,
            vertices: Vec::new(),
            arrowheads: None,
            preview: None,
            saved,
        }
    }

    pub fn key(&self) -> SessionKey { self.key }
    pub fn path_id(&self) -> Option<&str> { self.path_id.as_deref() }
    pub fn state(&self) -> SessionState { self.state }
    pub fn edge(&self) -> Option<&Edge> { self.edge.as_ref() }
    pub fn vertices(&self) -> &[Vertex] { &self.vertices }
    pub fn preview(&self) -> Option<&Vertex> { self.preview.as_ref() }
    pub fn arrowheads(&self) -> Option<&ArrowheadSet> { self.arrowheads.as_ref() }
    pub fn is_saved(&self) -> bool { self.saved }

    pub fn edge_id(&self) -> Option<EdgeId> {
        self.edge.as_ref().map(|e| e.id)
    }

    pub fn coordinates(&self) -> Vec<GeoPoint> {
        self.edge.as_ref().map(|e| e.coordinates()).unwrap_or_default()
    }

    pub fn kinds(&self) -> Vec<VertexKind> {
        self.vertices.iter().map(|v| v.kind).collect()
    }

    pub fn path_data(&self) -> PathData {
        PathData { id: self.path_id.clone(), coordinates: self.coordinates() }
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.id == id)
    }

    pub(crate) fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.iter_mut().find(|v| v.id == id)
    }

    /// Vertices whose hit square contains `p`, in creation order.
    pub fn vertices_near<S: Surface>(&self, surface: &S, cfg: &EditorConfig, p: GeoPoint) -> Vec<VertexId> {
        let sp = surface.project(p);
        self.vertices
            .iter()
            .filter(|v| in_radius(sp, surface.project(v.position), cfg.hit_radius))
            .map(|v| v.id)
            .collect()
    }

    pub fn shape_for_layer(&self, layer: LayerId) -> Option<ShapeRef> {
        if let Some(v) = self.vertices.iter().find(|v| v.owns_layer(layer)) {
            return Some(ShapeRef::Vertex(v.id));
        }
        match &self.edge {
            Some(e) if e.owns_layer(layer) => Some(ShapeRef::Edge(e.id)),
            _ => None,
        }
    }

    /// A click inside the hit square of the last point finishes the path.
    pub(crate) fn is_finished<S: Surface>(&self, surface: &S, cfg: &EditorConfig, p: GeoPoint) -> bool {
        match self.edge.as_ref().and_then(|e| e.last_point()) {
            Some(last) => in_radius(surface.project(p), surface.project(last), cfg.hit_radius),
            None => false,
        }
    }

    /// Starts the edge or appends to it.
    pub(crate) fn draw_line<S: Surface>(&mut self, surface: &mut S, cfg: &EditorConfig, new_edge: EdgeId, p: GeoPoint) -> CoordId {
        match self.edge.as_mut() {
            Some(e) => e.append_point(surface, p),
            None => {
                let e = Edge::new(surface, cfg, new_edge, p);
                let first = e.coords()[0].id;
                self.edge = Some(e);
                self.state = SessionState::Drawing;
                first
            }
        }
    }

    pub(crate) fn push_vertex<S: Surface>(
        &mut self,
        surface: &mut S,
        cfg: &EditorConfig,
        id: VertexId,
        kind: VertexKind,
        p: GeoPoint,
        coord: Option<CoordId>,
    ) -> Option<VertexId> {
        let owner = self.edge_id()?;
        let mut v = Vertex::new(surface, cfg, id, kind, p, owner);
        v.coord = coord.or_else(|| self.edge.as_ref().and_then(|e| e.coord_at(p)));
        self.vertices.push(v);
        Some(id)
    }

    pub(crate) fn remove_vertex<S: Surface>(&mut self, surface: &mut S, id: VertexId) -> bool {
        match self.vertices.iter().position(|v| v.id == id) {
            Some(idx) => {
                let mut v = self.vertices.remove(idx);
                v.erase(surface);
                true
            }
            None => false,
        }
    }

    pub(crate) fn spawn_preview<S: Surface>(&mut self, surface: &mut S, cfg: &EditorConfig, id: VertexId, p: GeoPoint) {
        if self.preview.is_some() {
            return;
        }
        if let Some(owner) = self.edge_id() {
            self.preview = Some(Vertex::new(surface, cfg, id, VertexKind::Endpoint, p, owner));
        }
    }

    pub(crate) fn remove_preview<S: Surface>(&mut self, surface: &mut S) {
        if let Some(mut p) = self.preview.take() {
            p.erase(surface);
        }
    }

    /// Re-kinds the last vertex as an endpoint when it closes off an open
    /// end: it sits on the final coordinate and not on the chain before it.
    pub(crate) fn reset_end_point_style<S: Surface>(&mut self, surface: &mut S, cfg: &EditorConfig) {
        let Some(edge) = self.edge.as_ref() else { return };
        let Some(last) = self.vertices.last() else { return };
        if last.kind != VertexKind::Midpoint {
            return;
        }
        let final_index = edge.len().saturating_sub(1);
        let index = last.coord.and_then(|c| edge.index_of(c)).unwrap_or(final_index);
        let chain = surface.project_all(&edge.coordinates()[..index]);
        let terminal = index == final_index;
        let on_chain = is_on_polyline(&chain, surface.project(last.position), ON_LINE_TOLERANCE);
        let kind = if terminal && !on_chain { VertexKind::Endpoint } else { VertexKind::Midpoint };
        if let Some(last) = self.vertices.last_mut() {
            last.set_kind(surface, cfg, kind);
        }
    }

    /// Completion steps shared by freshly drawn and loaded paths.
    pub(crate) fn complete_common<S: Surface>(&mut self, surface: &mut S, cfg: &EditorConfig) {
        self.remove_preview(surface);
        self.reset_end_point_style(surface, cfg);
        for v in self.vertices.iter_mut() {
            v.arm_all();
        }
        if let Some(e) = self.edge.as_mut() {
            e.arm();
        }
        self.state = SessionState::Completed;
    }

    pub(crate) fn show_arrowheads<S: Surface>(&mut self, surface: &mut S, cfg: &EditorConfig) {
        let Some(edge) = self.edge.as_ref() else { return };
        let coords = edge.coordinates();
        self.arrowheads.get_or_insert_with(ArrowheadSet::new).redraw(surface, cfg, &coords);
    }

    /// Redraws the arrowheads only if they are currently displayed.
    pub(crate) fn refresh_arrowheads<S: Surface>(&mut self, surface: &mut S, cfg: &EditorConfig) {
        if self.arrowheads.as_ref().map_or(false, |a| a.is_shown()) {
            self.show_arrowheads(surface, cfg);
        }
    }

    pub(crate) fn hide_arrowheads<S: Surface>(&mut self, surface: &mut S) {
        if let Some(a) = self.arrowheads.as_mut() {
            a.remove(surface);
            a.cancel_zoom();
        }
    }

    pub(crate) fn set_clicks_armed(&mut self, armed: bool) {
        for v in self.vertices.iter_mut() {
            v.handlers_mut().click = armed;
        }
        if let Some(e) = self.edge.as_mut() {
            e.handlers_mut().click = armed;
        }
    }

    /// Removes every layer this session put on the surface.
    pub(crate) fn erase<S: Surface>(&mut self, surface: &mut S) {
        if let Some(mut e) = self.edge.take() {
            e.erase(surface);
        }
        for mut v in self.vertices.drain(..) {
            v.erase(surface);
        }
        self.remove_preview(surface);
        if let Some(mut a) = self.arrowheads.take() {
            a.remove(surface);
        }
    }
}
