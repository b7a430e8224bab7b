//! Explicit subscription interface between the host's input events and the
//! effects.
//!
//! The front-end owns one bus per drawing surface and forwards DOM events
//! into it; effects never register global listeners themselves.

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    PointerLeave,
    Click,
    Resize,
    Visibility,
    KeyDown,
}

/// Input delivered to effects. Positions are surface-local CSS pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove(Vec2),
    PointerLeave,
    Click(Vec2),
    Resize(Vec2),
    Visibility(bool),
    KeyDown(String),
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::PointerMove(_) => EventKind::PointerMove,
            InputEvent::PointerLeave => EventKind::PointerLeave,
            InputEvent::Click(_) => EventKind::Click,
            InputEvent::Resize(_) => EventKind::Resize,
            InputEvent::Visibility(_) => EventKind::Visibility,
            InputEvent::KeyDown(_) => EventKind::KeyDown,
        }
    }
}

/// Token returned by [`EventBus::subscribe`]; hand it back to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    kind: EventKind,
    id: u64,
}

impl Subscription {
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

type Handler = Box<dyn FnMut(&InputEvent)>;

#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    handlers: Vec<(Subscription, Handler)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&InputEvent) + 'static,
    ) -> Subscription {
        let sub = Subscription {
            kind,
            id: self.next_id,
        };
        self.next_id += 1;
        self.handlers.push((sub, Box::new(handler)));
        sub
    }

    /// Returns false when the subscription was already gone.
    pub fn unsubscribe(&mut self, sub: Subscription) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(s, _)| *s != sub);
        self.handlers.len() != before
    }

    /// Delivers `event` to every handler of its kind, in subscription order.
    /// Returns how many handlers ran.
    pub fn emit(&mut self, event: &InputEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for (sub, handler) in self.handlers.iter_mut() {
            if sub.kind == kind {
                handler(event);
                delivered += 1;
            }
        }
        delivered
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
