//! Click-by-click path drawing, replay of persisted paths and completion.

use crate::events::{EditEvent, IdBinder};
use crate::model::{EdgeId, GeoPoint, PathData, SessionKey, ShapeRef, VertexId, VertexKind};
use crate::session::PathEditSession;
use crate::surface::Surface;
use crate::{PathCollection, TakenVertex};

impl<S: Surface> PathCollection<S> {
    /// Draws a persisted path. Returns None for a path with no coordinates.
    pub fn draw(&mut self, data: PathData) -> Option<SessionKey> {
        let mut points = data.coordinates.into_iter();
        let first = points.next()?;
        let key = SessionKey(self.ids.next());
        self.sessions.push(PathEditSession::new(key, data.id, true));
        let idx = self.sessions.len() - 1;

        let first = self.snap_to_lines(first).map_or(first, |(p, _)| p);
        self.draw_point(idx, first, false);
        for p in points {
            self.draw_point(idx, p, false);
        }

        let (surface, cfg) = (&mut self.surface, &self.config);
        self.sessions[idx].complete_common(surface, cfg);
        if self.drawing.is_none() {
            self.restore_clicks();
        }
        tracing::debug!(session = key.0, path = ?self.sessions[idx].path_id, "path drawn");
        Some(key)
    }

    /// Discards any unsaved drawing and starts a new empty path that takes
    /// its points from map clicks.
    pub fn draw_new_line(&mut self) -> SessionKey {
        self.remove(None);
        self.set_clicks_armed(false);
        let key = SessionKey(self.ids.next());
        self.sessions.push(PathEditSession::new(key, None, false));
        self.drawing = Some(key);
        self.map.draw_click = true;
        self.map.draw_move = false;
        tracing::debug!(session = key.0, "drawing started");
        key
    }

    pub(crate) fn draw_click(&mut self, p: GeoPoint) {
        let Some(idx) = self.drawing.and_then(|k| self.session_index(k)) else { return };
        let p = self.snap_to_lines(p).map_or(p, |(s, _)| s);
        if self.sessions[idx].is_finished(&self.surface, &self.config, p) {
            self.complete_drawing(idx);
            return;
        }
        self.draw_point(idx, p, true);
        if self.sessions[idx].preview.is_none() {
            let preview = VertexId(self.ids.next());
            let (surface, cfg) = (&mut self.surface, &self.config);
            self.sessions[idx].spawn_preview(surface, cfg, preview, p);
        }
        self.map.draw_move = true;
    }

    /// Keeps the rubber band and preview vertex glued to the snapped cursor.
    pub(crate) fn draw_mouse_move(&mut self, p: GeoPoint) {
        if !self.map.draw_move {
            return;
        }
        let Some(idx) = self.drawing.and_then(|k| self.session_index(k)) else { return };
        let p = self.snap_to_lines(p).map_or(p, |(s, _)| s);
        let surface = &mut self.surface;
        let s = &mut self.sessions[idx];
        if let Some(e) = s.edge.as_ref() {
            e.preview_to(surface, p);
        }
        if let Some(v) = s.preview.as_mut() {
            v.move_to(surface, p);
        }
    }

    /// Appends `p` to the session's edge and places the vertex for it.
    fn draw_point(&mut self, idx: usize, p: GeoPoint, interactive: bool) {
        let key = self.sessions[idx].key;
        let existing = self.vertices_near(p).into_iter().next();
        let p = match existing {
            Some((k, v)) => self
                .session(k)
                .and_then(|s| s.vertex(v))
                .map_or(p, |v| v.position),
            None => p,
        };

        let new_edge = match self.sessions[idx].edge_id() {
            Some(e) => e,
            None => EdgeId(self.ids.next()),
        };
        let (surface, cfg) = (&mut self.surface, &self.config);
        let coord = self.sessions[idx].draw_line(surface, cfg, new_edge, p);
        let own_edge = self.sessions[idx].edge_id();

        match existing {
            Some((k, v)) if k == key => {
                // closing onto one of our own vertices adds no new vertex
                if let Some(v) = self.sessions[idx].vertex_mut(v) {
                    v.set_kind(&mut self.surface, &self.config, VertexKind::Midpoint);
                }
            }
            Some((k, v)) => {
                if let Some(other) = self.session_index(k) {
                    let s = &self.sessions[other];
                    if let Some(index) = s.vertices.iter().position(|x| x.id == v).filter(|_| interactive) {
                        let old = &s.vertices[index];
                        self.taken.push(TakenVertex {
                            session: k,
                            index,
                            kind: old.kind,
                            position: old.position,
                            coord: old.coord,
                        });
                    }
                    self.sessions[other].remove_vertex(&mut self.surface, v);
                }
                let id = VertexId(self.ids.next());
                let (surface, cfg) = (&mut self.surface, &self.config);
                self.sessions[idx].push_vertex(surface, cfg, id, VertexKind::Junction, p, Some(coord));
                tracing::debug!(vertex = id.0, replaced = v.0, "junction took over vertex");
            }
            None => {
                let on_other = self.edges_near(p).into_iter().any(|e| Some(e) != own_edge);
                let kind = if on_other {
                    VertexKind::Junction
                } else if self.sessions[idx].vertices.is_empty() {
                    VertexKind::Endpoint
                } else {
                    VertexKind::Midpoint
                };
                if on_other {
                    self.insert_into_edges(p, own_edge, interactive);
                }
                let id = VertexId(self.ids.next());
                let (surface, cfg) = (&mut self.surface, &self.config);
                self.sessions[idx].push_vertex(surface, cfg, id, kind, p, Some(coord));
            }
        }
    }

    fn complete_drawing(&mut self, idx: usize) {
        self.map.draw_click = false;
        self.map.draw_move = false;
        self.drawing = None;

        let key = self.sessions[idx].key;
        let path = self.sessions[idx].path_data();
        let count = path.coordinates.len();
        self.events.publish(&EditEvent::DrawCompleted { path, binder: IdBinder(key) });

        let (surface, cfg) = (&mut self.surface, &self.config);
        self.sessions[idx].complete_common(surface, cfg);
        self.restore_clicks();
        if let Some(edge) = self.sessions[idx].edge_id() {
            self.start_blink(ShapeRef::Edge(edge), false);
        }
        tracing::info!(session = key.0, points = count, "drawing completed");
    }

    /// Enables or disables click handlers on every shape of every path.
    pub fn set_clicks_armed(&mut self, armed: bool) {
        for s in self.sessions.iter_mut() {
            s.set_clicks_armed(armed);
        }
    }
}
