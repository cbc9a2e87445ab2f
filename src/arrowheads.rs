use crate::config::EditorConfig;
use crate::geometry::arrow::arrowhead_triangle;
use crate::model::GeoPoint;
use crate::surface::{Layer, LayerId, Surface};

/// Direction triangles derived from an edge's coordinates. Nothing here is
/// stored beyond the layer handle; every redraw recomputes from the points
/// it is given.
#[derive(Clone, Debug, Default)]
pub struct ArrowheadSet {
    group: Option<LayerId>,
    zoom_armed: bool,
    count: usize,
}

impl ArrowheadSet {
    pub fn new() -> Self {
        ArrowheadSet::default()
    }

    pub fn is_shown(&self) -> bool {
        self.group.is_some()
    }

    pub fn zoom_armed(&self) -> bool {
        self.zoom_armed
    }

    /// Number of triangles currently drawn.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Rebuilds the triangles and keeps them in sync on zoom.
    pub(crate) fn redraw<S: Surface>(&mut self, surface: &mut S, cfg: &EditorConfig, coords: &[GeoPoint]) {
        self.zoom_armed = true;
        self.remove(surface);
        let pts = surface.project_all(coords);
        let layers: Vec<Layer> = pts
            .windows(2)
            .map(|w| {
                let t = arrowhead_triangle(w[0], w[1], cfg.line_buffer);
                Layer::Polygon {
                    points: vec![surface.unproject(t.top), surface.unproject(t.right), surface.unproject(t.left)],
                    style: cfg.arrowhead.clone(),
                }
            })
            .collect();
        self.count = layers.len();
        self.group = Some(surface.add_layer(Layer::Group { layers }));
    }

    pub(crate) fn remove<S: Surface>(&mut self, surface: &mut S) {
        if let Some(g) = self.group.take() {
            surface.remove_layer(g);
        }
        self.count = 0;
    }

    pub(crate) fn cancel_zoom(&mut self) {
        self.zoom_armed = false;
    }
}
