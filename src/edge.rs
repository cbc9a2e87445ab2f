use crate::config::{BlinkStyles, EditorConfig};
use crate::geometry::math::{closest_point_on_segment, distance_to_segment, in_radius, same_point};
use crate::geometry::tolerance::INSERT_TOLERANCE;
use crate::model::{CoordId, EdgeId, GeoPoint, ScreenPoint, VisualState};
use crate::shape::{Animatable, Drawable, Handlers, Hoverable, LayerPair};
use crate::surface::{Layer, Surface};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coord {
    pub id: CoordId,
    pub point: GeoPoint,
}

/// Ordered coordinate list of one path, drawn as a wide transparent
/// backdrop polyline under the visible foreground polyline.
///
/// `coords` is the single source of truth; both layers are rewritten from it
/// on every change.
#[derive(Clone, Debug)]
pub struct Edge {
    pub(crate) id: EdgeId,
    coords: Vec<Coord>,
    next_coord: u32,
    /// Slots moved by the drag in progress.
    dragged: Vec<CoordId>,
    /// Slots spliced in by a drawing session that has not been saved yet.
    inserted: Vec<CoordId>,
    pub(crate) state: VisualState,
    layers: LayerPair,
    handlers: Handlers,
}

impl Edge {
    pub(crate) fn new<S: Surface>(surface: &mut S, cfg: &EditorConfig, id: EdgeId, first: GeoPoint) -> Self {
        let back = surface.add_layer(Layer::Polyline { points: vec![first], style: cfg.edge.back.clone() });
        let front = surface.add_layer(Layer::Polyline { points: vec![first], style: cfg.edge.front.clone() });
        Edge {
            id,
            coords: vec![Coord { id: CoordId(0), point: first }],
            next_coord: 1,
            dragged: Vec::new(),
            inserted: Vec::new(),
            state: VisualState::Idle,
            layers: LayerPair { back, front },
            handlers: Handlers::default(),
        }
    }

    pub fn id(&self) -> EdgeId { self.id }

    pub fn coordinates(&self) -> Vec<GeoPoint> {
        self.coords.iter().map(|c| c.point).collect()
    }

    pub fn coords(&self) -> &[Coord] { &self.coords }

    pub fn len(&self) -> usize { self.coords.len() }

    pub fn is_empty(&self) -> bool { self.coords.is_empty() }

    pub fn last_point(&self) -> Option<GeoPoint> {
        self.coords.last().map(|c| c.point)
    }

    pub fn index_of(&self, id: CoordId) -> Option<usize> {
        self.coords.iter().position(|c| c.id == id)
    }

    pub fn coord_at(&self, p: GeoPoint) -> Option<CoordId> {
        self.coords.iter().find(|c| c.point == p).map(|c| c.id)
    }

    pub fn dragged(&self) -> &[CoordId] { &self.dragged }

    pub fn has_provisional(&self) -> bool { !self.inserted.is_empty() }

    fn alloc(&mut self, point: GeoPoint) -> Coord {
        let c = Coord { id: CoordId(self.next_coord), point };
        self.next_coord += 1;
        c
    }

    /// Rewrites both layers from the stored coordinates.
    pub(crate) fn redraw<S: Surface>(&self, surface: &mut S) {
        let pts = self.coordinates();
        surface.set_points(self.layers.back, &pts);
        surface.set_points(self.layers.front, &pts);
    }

    pub(crate) fn append_point<S: Surface>(&mut self, surface: &mut S, p: GeoPoint) -> CoordId {
        let c = self.alloc(p);
        self.coords.push(c);
        self.redraw(surface);
        c.id
    }

    /// Rubber-band preview: draws the committed points plus `p` without
    /// storing `p`.
    pub(crate) fn preview_to<S: Surface>(&self, surface: &mut S, p: GeoPoint) {
        let mut pts = self.coordinates();
        pts.push(p);
        surface.set_points(self.layers.back, &pts);
        surface.set_points(self.layers.front, &pts);
    }

    /// Splices `p` into the first segment it lies on (within 1px), skipping
    /// segments where `p` coincides with an endpoint. Provisional insertions
    /// are remembered so they can be rolled back.
    pub(crate) fn insert_point<S: Surface>(&mut self, surface: &mut S, p: GeoPoint, provisional: bool) -> Option<CoordId> {
        let sp = surface.project(p);
        let pts = surface.project_all(&self.coordinates());
        for (i, pair) in pts.windows(2).enumerate() {
            let (start, end) = (pair[0], pair[1]);
            if same_point(sp, start) || same_point(sp, end) {
                continue;
            }
            if distance_to_segment(sp, start, end) < INSERT_TOLERANCE {
                let c = self.alloc(p);
                self.coords.insert(i + 1, c);
                if provisional {
                    self.inserted.push(c.id);
                }
                self.redraw(surface);
                return Some(c.id);
            }
        }
        None
    }

    /// Drops every provisional coordinate. Returns true if any was removed.
    pub(crate) fn rollback_insertions<S: Surface>(&mut self, surface: &mut S) -> bool {
        if self.inserted.is_empty() {
            return false;
        }
        let inserted = std::mem::take(&mut self.inserted);
        self.coords.retain(|c| !inserted.contains(&c.id));
        self.redraw(surface);
        true
    }

    /// Makes provisional insertions permanent.
    pub(crate) fn commit_insertions(&mut self) {
        self.inserted.clear();
    }

    /// Closest on-line point to `p` if it lies within the line buffer, or a
    /// vertex position if `p` falls in its hit square. Dragged slots and the
    /// segments touching them never qualify.
    pub fn closest_point<S: Surface>(&self, surface: &S, cfg: &EditorConfig, p: GeoPoint) -> Option<ScreenPoint> {
        let sp = surface.project(p);
        let pts = surface.project_all(&self.coordinates());
        let dragged = |i: usize| self.coords.get(i).map_or(false, |c| self.dragged.contains(&c.id));
        for (i, start) in pts.iter().enumerate() {
            if !dragged(i) && in_radius(sp, *start, cfg.hit_radius) {
                return Some(*start);
            }
            let Some(end) = pts.get(i + 1) else { break };
            if dragged(i) || dragged(i + 1) {
                continue;
            }
            if distance_to_segment(sp, *start, *end) <= cfg.line_buffer {
                return Some(closest_point_on_segment(sp, *start, *end));
            }
        }
        None
    }

    /// Records every slot within the hit square of `p`. Returns true if any.
    pub(crate) fn track_drag<S: Surface>(&mut self, surface: &S, cfg: &EditorConfig, p: GeoPoint) -> bool {
        let sp = surface.project(p);
        self.dragged = self
            .coords
            .iter()
            .filter(|c| in_radius(sp, surface.project(c.point), cfg.hit_radius))
            .map(|c| c.id)
            .collect();
        !self.dragged.is_empty()
    }

    pub(crate) fn move_tracked<S: Surface>(&mut self, surface: &mut S, to: GeoPoint) {
        if self.dragged.is_empty() {
            return;
        }
        for c in self.coords.iter_mut() {
            if self.dragged.contains(&c.id) {
                c.point = to;
            }
        }
        self.redraw(surface);
    }

    pub(crate) fn clear_tracked(&mut self) {
        self.dragged.clear();
    }

    /// Removes every coordinate inside the hit square of `p`.
    pub(crate) fn remove_points_near<S: Surface>(&mut self, surface: &mut S, cfg: &EditorConfig, p: GeoPoint) -> bool {
        let sp = surface.project(p);
        let before = self.coords.len();
        let proj: Vec<ScreenPoint> = self.coords.iter().map(|c| surface.project(c.point)).collect();
        let mut i = 0;
        self.coords.retain(|_| {
            let keep = !in_radius(sp, proj[i], cfg.hit_radius);
            i += 1;
            keep
        });
        if self.coords.len() == before {
            return false;
        }
        self.inserted.retain(|id| self.coords.iter().any(|c| c.id == *id));
        self.redraw(surface);
        true
    }
}

impl Drawable for Edge {
    fn layers(&self) -> LayerPair { self.layers }
    fn handlers(&self) -> &Handlers { &self.handlers }
    fn handlers_mut(&mut self) -> &mut Handlers { &mut self.handlers }
}

impl Hoverable for Edge {
    fn hover<S: Surface>(&mut self, surface: &mut S, cfg: &EditorConfig) {
        self.state = VisualState::Hovered;
        surface.set_style(self.layers.back, &cfg.edge_blink.before);
    }
    fn out<S: Surface>(&mut self, surface: &mut S, cfg: &EditorConfig) {
        self.state = VisualState::Idle;
        surface.set_style(self.layers.back, &cfg.edge_blink.default);
    }
}

impl Animatable for Edge {
    fn blink_styles<'a>(&self, cfg: &'a EditorConfig) -> &'a BlinkStyles {
        &cfg.edge_blink
    }
}
