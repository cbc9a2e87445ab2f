use crate::animation::Blink;
use crate::events::EditEvent;
use crate::model::ShapeRef;
use crate::shape::{Animatable, BlinkPhase, Drawable};
use crate::surface::Surface;
use crate::PathCollection;

impl<S: Surface> PathCollection<S> {
    /// Selects `target`: it blinks until the next map click or until another
    /// shape is selected. Edges also show their direction arrowheads.
    pub(crate) fn start_blink(&mut self, target: ShapeRef, clicked: bool) {
        self.cancel_blink();
        self.menu = None;
        self.map.close_menu_once = false;

        let idx = match target {
            ShapeRef::Vertex(v) => self.session_of_vertex(v),
            ShapeRef::Edge(e) => self.session_of_edge(e),
        };
        let Some(idx) = idx else { return };
        self.apply_phase(idx, target, BlinkPhase::Before);
        self.set_hover_armed(idx, target, false);
        if let ShapeRef::Edge(_) = target {
            let (surface, cfg) = (&mut self.surface, &self.config);
            self.sessions[idx].show_arrowheads(surface, cfg);
        }
        self.blink = Some(Blink::new(target));
        self.map.cancel_blink_once = true;
        tracing::trace!(?target, "blink started");

        if clicked {
            let data = self.sessions[idx].path_data();
            self.events.publish(&EditEvent::PathClicked(data));
        }
    }

    /// Stops the running blink, restores the resting style and hover
    /// handling, and hides arrowheads. Does nothing when nothing blinks.
    pub fn cancel_blink(&mut self) {
        self.map.cancel_blink_once = false;
        let Some(b) = self.blink.take() else { return };
        let target = b.target();
        let idx = match target {
            ShapeRef::Vertex(v) => self.session_of_vertex(v),
            ShapeRef::Edge(e) => self.session_of_edge(e),
        };
        let Some(idx) = idx else { return };
        self.apply_phase(idx, target, BlinkPhase::Rest);
        self.set_hover_armed(idx, target, true);
        if let ShapeRef::Edge(_) = target {
            self.sessions[idx].hide_arrowheads(&mut self.surface);
        }
        tracing::trace!(?target, "blink cancelled");
    }

    /// Advances the blink timer by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u64) {
        let interval = self.config.blink_interval_ms;
        let Some(b) = self.blink.as_mut() else { return };
        let Some(phase) = b.advance(elapsed_ms, interval) else { return };
        let target = b.target();
        let idx = match target {
            ShapeRef::Vertex(v) => self.session_of_vertex(v),
            ShapeRef::Edge(e) => self.session_of_edge(e),
        };
        if let Some(idx) = idx {
            self.apply_phase(idx, target, phase);
        }
    }

    fn apply_phase(&mut self, idx: usize, target: ShapeRef, phase: BlinkPhase) {
        let (surface, cfg) = (&mut self.surface, &self.config);
        let s = &mut self.sessions[idx];
        match target {
            ShapeRef::Vertex(v) => {
                if let Some(v) = s.vertex_mut(v) {
                    v.apply_blink(surface, cfg, phase);
                }
            }
            ShapeRef::Edge(_) => {
                if let Some(e) = s.edge.as_mut() {
                    e.apply_blink(surface, cfg, phase);
                }
            }
        }
    }

    fn set_hover_armed(&mut self, idx: usize, target: ShapeRef, armed: bool) {
        let s = &mut self.sessions[idx];
        match target {
            ShapeRef::Vertex(v) => {
                if let Some(v) = s.vertex_mut(v) {
                    v.handlers_mut().hover = armed;
                }
            }
            ShapeRef::Edge(_) => {
                if let Some(e) = s.edge.as_mut() {
                    e.handlers_mut().hover = armed;
                }
            }
        }
    }
}
