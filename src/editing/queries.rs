//! Lookups that span every path in the collection. Iteration always follows
//! session registration order, so the first match is deterministic.

use crate::model::{EdgeId, GeoPoint, SessionKey, VertexId};
use crate::surface::Surface;
use crate::PathCollection;

impl<S: Surface> PathCollection<S> {
    /// Snaps `p` onto the first edge that reports a closest point for it.
    pub fn snap_to_lines(&self, p: GeoPoint) -> Option<(GeoPoint, EdgeId)> {
        let hit = self.sessions.iter().find_map(|s| {
            let e = s.edge.as_ref()?;
            let sp = e.closest_point(&self.surface, &self.config, p)?;
            Some((self.surface.unproject(sp), e.id))
        });
        if let Some((to, edge)) = hit {
            tracing::trace!(edge = edge.0, lat = to.lat, lng = to.lng, "snapped to line");
        }
        hit
    }

    /// Every edge with a closest point for `p`, in registration order.
    pub fn edges_near(&self, p: GeoPoint) -> Vec<EdgeId> {
        self.sessions
            .iter()
            .filter_map(|s| s.edge.as_ref())
            .filter(|e| e.closest_point(&self.surface, &self.config, p).is_some())
            .map(|e| e.id)
            .collect()
    }

    /// Every vertex whose hit square contains `p`, with its session.
    pub fn vertices_near(&self, p: GeoPoint) -> Vec<(SessionKey, VertexId)> {
        self.sessions
            .iter()
            .flat_map(|s| {
                s.vertices_near(&self.surface, &self.config, p)
                    .into_iter()
                    .map(move |v| (s.key, v))
            })
            .collect()
    }

    pub(crate) fn session_of_edge(&self, id: EdgeId) -> Option<usize> {
        self.sessions.iter().position(|s| s.edge_id() == Some(id))
    }

    pub(crate) fn session_of_vertex(&self, id: VertexId) -> Option<usize> {
        self.sessions.iter().position(|s| s.vertex(id).is_some())
    }

    /// Splices `p` into every edge except `skip`. Returns the edges changed.
    pub(crate) fn insert_into_edges(&mut self, p: GeoPoint, skip: Option<EdgeId>, provisional: bool) -> Vec<EdgeId> {
        let mut changed = Vec::new();
        for s in self.sessions.iter_mut() {
            let Some(e) = s.edge.as_mut() else { continue };
            if Some(e.id) == skip {
                continue;
            }
            if e.insert_point(&mut self.surface, p, provisional).is_some() {
                changed.push(e.id);
                s.refresh_arrowheads(&mut self.surface, &self.config);
            }
        }
        changed
    }

    /// Starts tracking slots under `p` in every edge; returns the sessions
    /// that will move with the drag.
    pub(crate) fn track_drag_all(&mut self, p: GeoPoint) -> Vec<SessionKey> {
        let mut keys = Vec::new();
        for s in self.sessions.iter_mut() {
            if let Some(e) = s.edge.as_mut() {
                if e.track_drag(&self.surface, &self.config, p) {
                    keys.push(s.key);
                }
            }
        }
        keys
    }

    pub(crate) fn move_tracked_all(&mut self, to: GeoPoint) {
        for s in self.sessions.iter_mut() {
            if let Some(e) = s.edge.as_mut() {
                e.move_tracked(&mut self.surface, to);
            }
        }
    }

    pub(crate) fn clear_tracked_all(&mut self) {
        for e in self.sessions.iter_mut().filter_map(|s| s.edge.as_mut()) {
            e.clear_tracked();
        }
    }
}
