//! Vertex dragging with snapping and merge-on-drop.

use crate::events::EditEvent;
use crate::geometry::math::in_radius;
use crate::model::{CoordId, EdgeId, GeoPoint, ScreenPoint, SessionKey, ShapeRef, VertexId, VertexKind};
use crate::shape::{Draggable, Drawable};
use crate::surface::{LayerId, Surface};
use crate::PathCollection;

#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    pub vertex: VertexId,
    pub session: SessionKey,
    /// Screen point of the mouse-down.
    pub start: ScreenPoint,
    pub moved: bool,
    /// Edge the last move snapped onto.
    pub target: Option<EdgeId>,
    /// Sessions whose coordinates follow the vertex.
    pub followers: Vec<SessionKey>,
}

impl<S: Surface> PathCollection<S> {
    pub(crate) fn shape_mouse_down(&mut self, layer: LayerId, screen: ScreenPoint) {
        let Some((idx, ShapeRef::Vertex(v))) = self.resolve_layer(layer) else { return };
        let armed = self.sessions[idx].vertex(v).map_or(false, |v| v.handlers().drag);
        if !armed || self.drag.is_some() {
            return;
        }
        self.begin_vertex_drag(idx, v, screen);
    }

    fn begin_vertex_drag(&mut self, idx: usize, v: VertexId, start: ScreenPoint) {
        self.surface.set_dragging(false);
        self.cancel_blink();
        self.menu = None;
        self.map.close_menu_once = false;

        let session = self.sessions[idx].key;
        let Some(vertex) = self.sessions[idx].vertex_mut(v) else { return };
        vertex.begin_drag(&mut self.surface);
        let position = vertex.position;
        let followers = self.track_drag_all(position);
        tracing::debug!(vertex = v.0, followers = followers.len(), "drag started");
        self.drag = Some(DragState { vertex: v, session, start, moved: false, target: None, followers });
    }

    pub(crate) fn drag_move(&mut self, p: GeoPoint) {
        let (to, target) = match self.snap_to_lines(p) {
            Some((snapped, edge)) => (snapped, Some(edge)),
            None => (p, None),
        };
        let Some(drag) = self.drag.as_mut() else { return };
        drag.moved = true;
        drag.target = target;
        let (v, start, session) = (drag.vertex, drag.start, drag.session);
        // small jitters around the grab point do not move anything
        if in_radius(self.surface.project(to), start, self.config.hit_radius) {
            return;
        }
        let Some(idx) = self.session_index(session) else { return };
        if let Some(vertex) = self.sessions[idx].vertex_mut(v) {
            vertex.drag_to(&mut self.surface, to);
        }
        self.move_tracked_all(to);
    }

    pub(crate) fn end_drag(&mut self) {
        let Some(drag) = self.drag.take() else { return };
        if let Some(idx) = self.session_index(drag.session) {
            if let Some(vertex) = self.sessions[idx].vertex_mut(drag.vertex) {
                vertex.end_drag();
            }
            if drag.moved {
                self.merge_on_drop(idx, &drag);
            }
        }
        self.clear_tracked_all();

        if drag.moved {
            let paths = drag
                .followers
                .iter()
                .filter_map(|k| self.session(*k))
                .map(|s| s.path_data())
                .collect::<Vec<_>>();
            self.events.publish(&EditEvent::PathsDragged(paths));
        }
        self.surface.set_dragging(true);
        self.suppress_click = drag.moved;
        tracing::debug!(vertex = drag.vertex.0, moved = drag.moved, "drag ended");
    }

    /// A drop on another vertex fuses both into one junction; a drop on a
    /// line splices the vertex into it.
    fn merge_on_drop(&mut self, idx: usize, drag: &DragState) {
        let Some(pos) = self.sessions[idx].vertex(drag.vertex).map(|v| v.position) else { return };

        let other = self.vertices_near(pos).into_iter().find(|(_, v)| *v != drag.vertex);
        if let Some((key, other)) = other {
            let Some(t) = self.session_index(key) else { return };
            let Some(at) = self.sessions[t].vertex(other).map(|v| v.position) else { return };
            self.move_tracked_all(at);
            self.sessions[idx].remove_vertex(&mut self.surface, drag.vertex);
            self.sessions[t].remove_vertex(&mut self.surface, other);
            let coord = self.sessions[t].edge.as_ref().and_then(|e| e.coord_at(at));
            self.place_armed_vertex(t, VertexKind::Junction, at, coord);
            tracing::debug!(dragged = drag.vertex.0, onto = other.0, "vertices merged");
            return;
        }

        let own_edge = self.sessions[idx].edge_id();
        let target = drag.target.filter(|e| {
            self.session_of_edge(*e)
                .and_then(|t| self.sessions[t].edge.as_ref())
                .map_or(false, |edge| edge.closest_point(&self.surface, &self.config, pos).is_some())
        });
        let Some(target) = target else { return };
        let Some(t) = self.session_of_edge(target) else { return };
        let kind = if Some(target) == own_edge { VertexKind::Midpoint } else { VertexKind::Junction };
        let coord = match self.sessions[t].edge.as_mut() {
            Some(e) => e.insert_point(&mut self.surface, pos, false),
            None => None,
        };
        self.sessions[idx].remove_vertex(&mut self.surface, drag.vertex);
        self.place_armed_vertex(t, kind, pos, coord);
        tracing::debug!(dragged = drag.vertex.0, edge = target.0, ?kind, "vertex spliced into line");
    }

    pub(crate) fn place_armed_vertex(
        &mut self,
        idx: usize,
        kind: VertexKind,
        p: GeoPoint,
        coord: Option<CoordId>,
    ) -> Option<VertexId> {
        let id = VertexId(self.ids.next());
        let (surface, cfg) = (&mut self.surface, &self.config);
        let s = &mut self.sessions[idx];
        s.push_vertex(surface, cfg, id, kind, p, coord)?;
        if let Some(v) = s.vertex_mut(id) {
            v.arm_all();
        }
        Some(id)
    }
}
