use futures::channel::mpsc::UnboundedSender;

use crate::event::{EventHandler, InkEvent};

/// Forwards every event into an unbounded channel.
///
/// Once the receiving side goes away, events are dropped silently.
#[derive(Debug)]
pub struct ChannelHandler {
    sender: UnboundedSender<InkEvent>,
}

impl ChannelHandler {
    pub fn new(sender: UnboundedSender<InkEvent>) -> Self {
        Self { sender }
    }
}

impl EventHandler for ChannelHandler {
    fn handle_event(&mut self, event: &InkEvent) {
        if self.sender.unbounded_send(*event).is_err() {
            log::trace!("Event receiver dropped, discarding {:?}", event);
        }
    }
}
