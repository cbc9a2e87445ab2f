use crate::model::ShapeRef;
use crate::shape::BlinkPhase;

/// Repeating blink task for one shape, driven by the host loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Blink {
    target: ShapeRef,
    toggled: bool,
    pending_ms: u64,
}

impl Blink {
    pub fn new(target: ShapeRef) -> Self {
        Blink { target, toggled: false, pending_ms: 0 }
    }

    pub fn target(&self) -> ShapeRef {
        self.target
    }

    /// Advances the timer by `elapsed_ms`. Each full interval flips between
    /// the after and before styles; returns the phase to show now, if any
    /// interval completed.
    pub fn advance(&mut self, elapsed_ms: u64, interval_ms: u64) -> Option<BlinkPhase> {
        let interval = interval_ms.max(1);
        self.pending_ms = self.pending_ms.saturating_add(elapsed_ms);
        let ticks = self.pending_ms / interval;
        if ticks == 0 {
            return None;
        }
        self.pending_ms %= interval;
        if ticks % 2 == 1 {
            self.toggled = !self.toggled;
        }
        Some(if self.toggled { BlinkPhase::After } else { BlinkPhase::Before })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EdgeId;

    #[test]
    fn alternates_every_interval() {
        let mut b = Blink::new(ShapeRef::Edge(EdgeId(1)));
        assert_eq!(b.advance(999, 1000), None);
        assert_eq!(b.advance(1, 1000), Some(BlinkPhase::After));
        assert_eq!(b.advance(1000, 1000), Some(BlinkPhase::Before));
        assert_eq!(b.advance(3000, 1000), Some(BlinkPhase::After));
        assert_eq!(b.advance(2500, 1000), Some(BlinkPhase::After));
        assert_eq!(b.advance(500, 1000), Some(BlinkPhase::Before));
    }
}
