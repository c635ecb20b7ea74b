use std::cell::RefCell;

use futures::channel::mpsc::{self, UnboundedReceiver};

use crate::event::{ChannelHandler, EventHandler, InkEvent};

/// A simple event bus for broadcasting drawing events to registered handlers.
/// Handlers see events in the order they were emitted.
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Subscribe through a channel; the receiver yields every later event
    pub fn channel(&self) -> UnboundedReceiver<InkEvent> {
        let (sender, receiver) = mpsc::unbounded();
        self.subscribe(Box::new(ChannelHandler::new(sender)));
        receiver
    }

    /// Emit an event to all registered handlers
    pub fn emit(&self, event: InkEvent) {
        for handler in &mut *self.handlers.borrow_mut() {
            handler.handle_event(&event);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}
