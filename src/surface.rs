//! Contract with the map that actually renders layers and owns the projection.

use crate::model::{GeoPoint, ScreenPoint, Style};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub u32);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Layer {
    Marker { center: GeoPoint, style: Style },
    Polyline { points: Vec<GeoPoint>, style: Style },
    Polygon { points: Vec<GeoPoint>, style: Style },
    Group { layers: Vec<Layer> },
}

pub trait Surface {
    fn project(&self, p: GeoPoint) -> ScreenPoint;
    fn unproject(&self, p: ScreenPoint) -> GeoPoint;
    fn add_layer(&mut self, layer: Layer) -> LayerId;
    fn remove_layer(&mut self, id: LayerId);
    fn set_style(&mut self, id: LayerId, style: &Style);
    /// Moves a marker layer.
    fn set_position(&mut self, id: LayerId, p: GeoPoint);
    /// Replaces the points of a polyline layer.
    fn set_points(&mut self, id: LayerId, points: &[GeoPoint]);
    fn bring_to_front(&mut self, id: LayerId);
    /// Enables or disables map panning.
    fn set_dragging(&mut self, enabled: bool);

    fn project_all(&self, points: &[GeoPoint]) -> Vec<ScreenPoint> {
        points.iter().map(|p| self.project(*p)).collect()
    }
}

/// Linear projection: `x = lng * scale + offset_x`, `y = lat * scale + offset_y`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport { scale: 1.0, offset_x: 0.0, offset_y: 0.0 }
    }
}

impl Viewport {
    pub fn project(&self, p: GeoPoint) -> ScreenPoint {
        ScreenPoint::new(p.lng * self.scale + self.offset_x, p.lat * self.scale + self.offset_y)
    }
    pub fn unproject(&self, p: ScreenPoint) -> GeoPoint {
        GeoPoint::new((p.y - self.offset_y) / self.scale, (p.x - self.offset_x) / self.scale)
    }
}

/// Headless surface that keeps every layer in memory. Used by tests and by
/// hosts that replay edits without a map.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub viewport: Viewport,
    layers: HashMap<LayerId, Layer>,
    z_order: Vec<LayerId>,
    next_id: u32,
    dragging: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        RecordingSurface { dragging: true, ..Default::default() }
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        RecordingSurface { viewport, ..RecordingSurface::new() }
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Top-level polygons plus polygons nested in groups.
    pub fn polygon_count(&self) -> usize {
        fn count(l: &Layer) -> usize {
            match l {
                Layer::Polygon { .. } => 1,
                Layer::Group { layers } => layers.iter().map(count).sum(),
                _ => 0,
            }
        }
        self.layers.values().map(count).sum()
    }

    pub fn style_of(&self, id: LayerId) -> Option<&Style> {
        match self.layers.get(&id)? {
            Layer::Marker { style, .. } | Layer::Polyline { style, .. } | Layer::Polygon { style, .. } => Some(style),
            Layer::Group { .. } => None,
        }
    }

    pub fn points_of(&self, id: LayerId) -> Option<&[GeoPoint]> {
        match self.layers.get(&id)? {
            Layer::Polyline { points, .. } | Layer::Polygon { points, .. } => Some(points),
            _ => None,
        }
    }

    pub fn position_of(&self, id: LayerId) -> Option<GeoPoint> {
        match self.layers.get(&id)? {
            Layer::Marker { center, .. } => Some(*center),
            _ => None,
        }
    }

    pub fn is_topmost(&self, id: LayerId) -> bool {
        self.z_order.last() == Some(&id)
    }

    pub fn dragging_enabled(&self) -> bool {
        self.dragging
    }
}

impl Surface for RecordingSurface {
    fn project(&self, p: GeoPoint) -> ScreenPoint {
        self.viewport.project(p)
    }
    fn unproject(&self, p: ScreenPoint) -> GeoPoint {
        self.viewport.unproject(p)
    }
    fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.insert(id, layer);
        self.z_order.push(id);
        id
    }
    fn remove_layer(&mut self, id: LayerId) {
        self.layers.remove(&id);
        self.z_order.retain(|l| *l != id);
    }
    fn set_style(&mut self, id: LayerId, over: &Style) {
        if let Some(Layer::Marker { style, .. } | Layer::Polyline { style, .. } | Layer::Polygon { style, .. }) =
            self.layers.get_mut(&id)
        {
            *style = style.merged(over);
        }
    }
    fn set_position(&mut self, id: LayerId, p: GeoPoint) {
        if let Some(Layer::Marker { center, .. }) = self.layers.get_mut(&id) {
            *center = p;
        }
    }
    fn set_points(&mut self, id: LayerId, pts: &[GeoPoint]) {
        if let Some(Layer::Polyline { points, .. }) = self.layers.get_mut(&id) {
            *points = pts.to_vec();
        }
    }
    fn bring_to_front(&mut self, id: LayerId) {
        if self.layers.contains_key(&id) {
            self.z_order.retain(|l| *l != id);
            self.z_order.push(id);
        }
    }
    fn set_dragging(&mut self, enabled: bool) {
        self.dragging = enabled;
    }
}
