use crate::config::{BlinkStyles, EditorConfig};
use crate::model::{CoordId, EdgeId, GeoPoint, VertexId, VertexKind, VisualState};
use crate::shape::{Animatable, Draggable, Drawable, Handlers, Hoverable, LayerPair};
use crate::surface::{Layer, Surface};

/// A draggable point drawn as a backdrop circle under a foreground circle.
#[derive(Clone, Debug)]
pub struct Vertex {
    pub(crate) id: VertexId,
    pub(crate) position: GeoPoint,
    pub(crate) kind: VertexKind,
    pub(crate) owner: EdgeId,
    /// Coordinate slot of the owner edge this vertex sits on, when known.
    pub(crate) coord: Option<CoordId>,
    pub(crate) state: VisualState,
    layers: LayerPair,
    handlers: Handlers,
}

impl Vertex {
    pub(crate) fn new<S: Surface>(
        surface: &mut S,
        cfg: &EditorConfig,
        id: VertexId,
        kind: VertexKind,
        position: GeoPoint,
        owner: EdgeId,
    ) -> Self {
        let styles = cfg.vertex_styles(kind);
        let back = surface.add_layer(Layer::Marker { center: position, style: styles.back });
        let front = surface.add_layer(Layer::Marker { center: position, style: styles.front });
        Vertex {
            id,
            position,
            kind,
            owner,
            coord: None,
            state: VisualState::Idle,
            layers: LayerPair { back, front },
            handlers: Handlers::default(),
        }
    }

    pub fn id(&self) -> VertexId { self.id }
    pub fn position(&self) -> GeoPoint { self.position }
    pub fn kind(&self) -> VertexKind { self.kind }
    pub fn owner(&self) -> EdgeId { self.owner }
    pub fn coord(&self) -> Option<CoordId> { self.coord }
    pub fn state(&self) -> VisualState { self.state }

    /// Both layers follow immediately.
    pub(crate) fn move_to<S: Surface>(&mut self, surface: &mut S, to: GeoPoint) {
        surface.set_position(self.layers.back, to);
        surface.set_position(self.layers.front, to);
        self.position = to;
    }

    pub(crate) fn set_kind<S: Surface>(&mut self, surface: &mut S, cfg: &EditorConfig, kind: VertexKind) {
        self.kind = kind;
        let styles = cfg.vertex_styles(kind);
        surface.set_style(self.layers.back, &styles.back);
        surface.set_style(self.layers.front, &styles.front);
    }

    /// Click, hover, context menu and drag.
    pub(crate) fn arm_all(&mut self) {
        self.arm();
        self.handlers.drag = true;
    }
}

impl Drawable for Vertex {
    fn layers(&self) -> LayerPair { self.layers }
    fn handlers(&self) -> &Handlers { &self.handlers }
    fn handlers_mut(&mut self) -> &mut Handlers { &mut self.handlers }
}

impl Hoverable for Vertex {
    fn hover<S: Surface>(&mut self, surface: &mut S, cfg: &EditorConfig) {
        if self.state == VisualState::Idle {
            self.state = VisualState::Hovered;
        }
        surface.set_style(self.layers.back, &cfg.vertex_blink.after);
    }
    fn out<S: Surface>(&mut self, surface: &mut S, cfg: &EditorConfig) {
        if self.state == VisualState::Hovered {
            self.state = VisualState::Idle;
        }
        surface.set_style(self.layers.back, &cfg.vertex_blink.default);
    }
}

impl Animatable for Vertex {
    fn blink_styles<'a>(&self, cfg: &'a EditorConfig) -> &'a BlinkStyles {
        &cfg.vertex_blink
    }
}

impl Draggable for Vertex {
    fn begin_drag<S: Surface>(&mut self, surface: &mut S) {
        self.state = VisualState::Dragging;
        surface.bring_to_front(self.layers.front);
    }
    fn drag_to<S: Surface>(&mut self, surface: &mut S, to: GeoPoint) {
        self.move_to(surface, to);
    }
    fn end_drag(&mut self) {
        self.state = VisualState::Idle;
    }
}
