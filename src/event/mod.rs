mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::InkEvent;
pub use handlers::ChannelHandler;

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &InkEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&InkEvent) + Send,
{
    fn handle_event(&mut self, event: &InkEvent) {
        self(event)
    }
}
