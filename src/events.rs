//! Synchronous publish/subscribe channel for host notifications.
//!
//! Delivery happens inside `publish`, in subscription order, exactly once per
//! matching subscriber. Handlers only see the event; they cannot reach back
//! into the collection while it is being mutated, so hosts queue any
//! follow-up calls (for example redeeming an [`IdBinder`]).

use crate::model::{PathData, PathId, SessionKey};

/// One-shot token handed out with [`EditEvent::DrawCompleted`]; redeem it
/// with `PathCollection::bind_path_id` to attach a persisted id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IdBinder(pub(crate) SessionKey);

impl IdBinder {
    pub fn session(&self) -> SessionKey {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EditEvent {
    DrawCompleted { path: PathData, binder: IdBinder },
    PathClicked(PathData),
    PathsDragged(Vec<PathData>),
    PathRemoved(Option<PathId>),
    PointAdded(PathData),
    PointsRemoved(Vec<PathData>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    DrawCompleted,
    PathClicked,
    PathsDragged,
    PathRemoved,
    PointAdded,
    PointsRemoved,
}

impl EditEvent {
    pub fn topic(&self) -> Topic {
        match self {
            EditEvent::DrawCompleted { .. } => Topic::DrawCompleted,
            EditEvent::PathClicked(_) => Topic::PathClicked,
            EditEvent::PathsDragged(_) => Topic::PathsDragged,
            EditEvent::PathRemoved(_) => Topic::PathRemoved,
            EditEvent::PointAdded(_) => Topic::PointAdded,
            EditEvent::PointsRemoved(_) => Topic::PointsRemoved,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Handler = Box<dyn FnMut(&EditEvent)>;

struct Subscriber {
    id: SubscriptionId,
    topic: Option<Topic>,
    handler: Handler,
}

#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
    next_id: u32,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").field("subscribers", &self.subscribers.len()).finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        EventBus::default()
    }

    /// Receives every event.
    pub fn subscribe<F: FnMut(&EditEvent) + 'static>(&mut self, handler: F) -> SubscriptionId {
        self.add(None, Box::new(handler))
    }

    pub fn subscribe_to<F: FnMut(&EditEvent) + 'static>(&mut self, topic: Topic, handler: F) -> SubscriptionId {
        self.add(Some(topic), Box::new(handler))
    }

    fn add(&mut self, topic: Option<Topic>, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber { id, topic, handler });
        id
    }

    /// Returns false if `id` was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn publish(&mut self, event: &EditEvent) {
        let topic = event.topic();
        tracing::trace!(?topic, subscribers = self.subscribers.len(), "publish");
        for s in self.subscribers.iter_mut() {
            if s.topic.map_or(true, |t| t == topic) {
                (s.handler)(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn delivers_in_subscription_order_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        let l1 = log.clone();
        bus.subscribe(move |_| l1.borrow_mut().push(1));
        let l2 = log.clone();
        bus.subscribe_to(Topic::PathRemoved, move |_| l2.borrow_mut().push(2));
        let l3 = log.clone();
        bus.subscribe_to(Topic::PathClicked, move |_| l3.borrow_mut().push(3));
        bus.publish(&EditEvent::PathRemoved(Some("a".into())));
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let mut bus = EventBus::new();
        let id = bus.subscribe(|_| {});
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.subscriber_count(), 0);
    }
}
