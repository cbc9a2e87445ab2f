use serde::Serialize;

use crate::geometry::math::{in_radius, seg_distance_sq};
use crate::model::{EdgeId, ScreenPoint, SessionKey, VertexId};
use crate::shape::Drawable;
use crate::surface::Surface;
use crate::{PathCollection, Target};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Pick {
    Vertex { id: VertexId, session: SessionKey, dist: f64 },
    Edge { id: EdgeId, session: SessionKey, dist: f64, t: f64 },
}

impl<S: Surface> PathCollection<S> {
    /// Shape under a screen point: vertices win over edges, the nearest one
    /// within its hit area wins among each kind.
    pub fn pick(&self, at: ScreenPoint) -> Option<Pick> {
        let mut best_vertex: Option<(VertexId, SessionKey, f64)> = None; // (id, session, dist2)
        for s in &self.sessions {
            for v in &s.vertices {
                let c = self.surface.project(v.position);
                if !in_radius(at, c, self.config.hit_radius) {
                    continue;
                }
                let d2 = (c.x - at.x).powi(2) + (c.y - at.y).powi(2);
                if best_vertex.map_or(true, |(_, _, bd2)| d2 < bd2) {
                    best_vertex = Some((v.id, s.key, d2));
                }
            }
        }
        if let Some((id, session, d2)) = best_vertex {
            return Some(Pick::Vertex { id, session, dist: d2.sqrt() });
        }

        let tol2 = self.config.line_buffer * self.config.line_buffer;
        let mut best_edge: Option<(EdgeId, SessionKey, f64, f64)> = None; // (id, session, dist2, t)
        for s in &self.sessions {
            let Some(e) = s.edge.as_ref() else { continue };
            let pts = self.surface.project_all(&e.coordinates());
            let length: f64 = pts
                .windows(2)
                .map(|w| ((w[1].x - w[0].x).powi(2) + (w[1].y - w[0].y).powi(2)).sqrt())
                .sum();
            let mut acc = 0.0;
            for w in pts.windows(2) {
                let seg_len = ((w[1].x - w[0].x).powi(2) + (w[1].y - w[0].y).powi(2)).sqrt();
                let (d2, tseg) = seg_distance_sq(at, w[0], w[1]);
                if d2 <= tol2 && best_edge.map_or(true, |(_, _, bd2, _)| d2 < bd2) {
                    let t = if length > 0.0 { (acc + tseg * seg_len) / length } else { 0.0 };
                    best_edge = Some((e.id, s.key, d2, t));
                }
                acc += seg_len;
            }
        }
        best_edge.map(|(id, session, d2, t)| Pick::Edge { id, session, dist: d2.sqrt(), t })
    }

    /// Pointer target a host should report for `at`: the front layer of the
    /// picked shape, or the map.
    pub fn target_at(&self, at: ScreenPoint) -> Target {
        let layer = match self.pick(at) {
            Some(Pick::Vertex { id, session, .. }) => {
                self.session(session).and_then(|s| s.vertex(id)).map(|v| v.layers().front)
            }
            Some(Pick::Edge { session, .. }) => {
                self.session(session).and_then(|s| s.edge.as_ref()).map(|e| e.layers().front)
            }
            None => None,
        };
        layer.map_or(Target::Map, Target::Layer)
    }
}
