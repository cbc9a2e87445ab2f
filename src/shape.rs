//! Capabilities shared by vertices and edges. Both are drawn as a backdrop
//! layer (animation, hover highlight) under a foreground layer (display).

use crate::config::{BlinkStyles, EditorConfig};
use crate::model::GeoPoint;
use crate::surface::{LayerId, Surface};

/// Pointer handlers currently registered on a shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Handlers {
    pub click: bool,
    pub hover: bool,
    pub context_menu: bool,
    pub drag: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerPair {
    pub back: LayerId,
    pub front: LayerId,
}

impl LayerPair {
    pub fn contains(&self, id: LayerId) -> bool {
        self.back == id || self.front == id
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlinkPhase {
    Before,
    After,
    Rest,
}

pub trait Drawable {
    fn layers(&self) -> LayerPair;
    fn handlers(&self) -> &Handlers;
    fn handlers_mut(&mut self) -> &mut Handlers;

    fn owns_layer(&self, id: LayerId) -> bool {
        self.layers().contains(id)
    }

    /// Registers click, hover and context-menu handlers.
    fn arm(&mut self) {
        let h = self.handlers_mut();
        h.click = true;
        h.hover = true;
        h.context_menu = true;
    }

    fn erase<S: Surface>(&mut self, surface: &mut S) {
        let l = self.layers();
        surface.remove_layer(l.back);
        surface.remove_layer(l.front);
        *self.handlers_mut() = Handlers::default();
    }
}

pub trait Hoverable: Drawable {
    fn hover<S: Surface>(&mut self, surface: &mut S, cfg: &EditorConfig);
    fn out<S: Surface>(&mut self, surface: &mut S, cfg: &EditorConfig);
}

pub trait Animatable: Drawable {
    fn blink_styles<'a>(&self, cfg: &'a EditorConfig) -> &'a BlinkStyles;

    fn apply_blink<S: Surface>(&mut self, surface: &mut S, cfg: &EditorConfig, phase: BlinkPhase) {
        let styles = self.blink_styles(cfg);
        let style = match phase {
            BlinkPhase::Before => &styles.before,
            BlinkPhase::After => &styles.after,
            BlinkPhase::Rest => &styles.default,
        };
        surface.set_style(self.layers().back, style);
    }
}

pub trait Draggable: Drawable {
    fn begin_drag<S: Surface>(&mut self, surface: &mut S);
    fn drag_to<S: Surface>(&mut self, surface: &mut S, to: GeoPoint);
    fn end_drag(&mut self);
}
