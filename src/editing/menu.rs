//! Context menu model. Rendering is left to the host; the collection only
//! decides what the menu offers and runs the chosen action.

use serde::Serialize;

use crate::events::EditEvent;
use crate::model::{EdgeId, GeoPoint, ScreenPoint, SessionKey, ShapeRef, VertexKind};
use crate::shape::Drawable;
use crate::surface::{LayerId, Surface};
use crate::PathCollection;

/// Offset of the menu's top-left corner from the pointer, in pixels.
pub const MENU_OFFSET: f64 = 10.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum MenuAction {
    DeletePoint { at: GeoPoint },
    AddPoint { edge: EdgeId, at: GeoPoint },
    DeletePath { session: SessionKey },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MenuItem {
    pub label: &'static str,
    pub action: MenuAction,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContextMenu {
    pub anchor: ScreenPoint,
    pub items: Vec<MenuItem>,
}

impl<S: Surface> PathCollection<S> {
    /// Opens the menu for the shape under the pointer. The next map click
    /// closes it.
    pub(crate) fn open_context_menu(&mut self, layer: LayerId, screen: ScreenPoint, geo: GeoPoint) -> Option<&ContextMenu> {
        let (idx, shape) = self.resolve_layer(layer)?;
        let s = &self.sessions[idx];
        let items = match shape {
            ShapeRef::Vertex(v) => {
                let v = s.vertex(v).filter(|v| v.handlers().context_menu)?;
                vec![MenuItem { label: "Delete point", action: MenuAction::DeletePoint { at: v.position } }]
            }
            ShapeRef::Edge(e) => {
                s.edge.as_ref().filter(|e| e.handlers().context_menu)?;
                vec![
                    MenuItem { label: "Add point", action: MenuAction::AddPoint { edge: e, at: geo } },
                    MenuItem { label: "Delete path", action: MenuAction::DeletePath { session: s.key } },
                ]
            }
        };
        let anchor = ScreenPoint::new(screen.x + MENU_OFFSET, screen.y + MENU_OFFSET);
        self.map.close_menu_once = true;
        self.menu = Some(ContextMenu { anchor, items });
        self.menu.as_ref()
    }

    /// Closes the menu and performs `action`. Returns false if it no longer
    /// applies.
    pub fn run_menu_action(&mut self, action: &MenuAction) -> bool {
        self.menu = None;
        self.map.close_menu_once = false;
        match action {
            MenuAction::DeletePoint { at } => !self.delete_point(*at).is_empty(),
            MenuAction::AddPoint { edge, at } => self.add_point_on_line(*edge, *at),
            MenuAction::DeletePath { session } => self.delete_path(*session),
        }
    }

    pub fn add_point_on_line(&mut self, edge: EdgeId, at: GeoPoint) -> bool {
        let Some(idx) = self.session_of_edge(edge) else { return false };
        let Some(e) = self.sessions[idx].edge.as_ref() else { return false };
        let Some(sp) = e.closest_point(&self.surface, &self.config, at) else { return false };
        let p = self.surface.unproject(sp);
        let coord = match self.sessions[idx].edge.as_mut() {
            Some(e) => e.insert_point(&mut self.surface, p, false),
            None => None,
        };
        let Some(coord) = coord else { return false };
        self.place_armed_vertex(idx, VertexKind::Midpoint, p, Some(coord));
        let (surface, cfg) = (&mut self.surface, &self.config);
        self.sessions[idx].refresh_arrowheads(surface, cfg);
        let data = self.sessions[idx].path_data();
        self.events.publish(&EditEvent::PointAdded(data));
        tracing::debug!(edge = edge.0, "point added");
        true
    }

    /// Removes a whole path and tells the host which one went away.
    pub fn delete_path(&mut self, session: SessionKey) -> bool {
        let Some(idx) = self.session_index(session) else { return false };
        let id = self.sessions[idx].path_id.clone();
        let unsaved = !self.sessions[idx].saved;
        self.drop_session(idx);
        if unsaved {
            self.rollback_provisional();
        }
        self.events.publish(&EditEvent::PathRemoved(id));
        true
    }
}
