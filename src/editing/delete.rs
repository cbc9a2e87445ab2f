use crate::events::EditEvent;
use crate::model::{GeoPoint, PathData};
use crate::surface::Surface;
use crate::PathCollection;

impl<S: Surface> PathCollection<S> {
    /// Deletes the point at `at` from every path that has one there, along
    /// with one vertex per path. Affected paths are reported together.
    pub fn delete_point(&mut self, at: GeoPoint) -> Vec<PathData> {
        let mut changed = Vec::new();
        for s in self.sessions.iter_mut() {
            let Some(e) = s.edge.as_mut() else { continue };
            if !e.remove_points_near(&mut self.surface, &self.config, at) {
                continue;
            }
            if let Some(v) = s.vertices_near(&self.surface, &self.config, at).into_iter().next() {
                s.remove_vertex(&mut self.surface, v);
            }
            s.refresh_arrowheads(&mut self.surface, &self.config);
            changed.push(s.path_data());
        }
        if !changed.is_empty() {
            tracing::debug!(paths = changed.len(), "points removed");
            self.events.publish(&EditEvent::PointsRemoved(changed.clone()));
        }
        changed
    }
}
