//! Page notification bus.
//!
//! Published events are delivered one at a time, in FIFO order, to every
//! listener in wiring order. Events a listener emits while handling one are
//! queued behind it, so a listener's side effects that follow its emitted
//! event (the outlet's focus transfer) land before later listeners see that
//! event. Observers outside the page get a copy of every
//! delivered event over a broadcast channel.

use std::collections::VecDeque;

use shared::{error::PageError, protocol::PageEvent};
use tokio::sync::broadcast;
use tracing::debug;

use crate::document::Document;

const OBSERVER_CAPACITY: usize = 64;

pub trait PageListener {
    fn on_event(
        &mut self,
        document: &mut Document,
        event: &PageEvent,
    ) -> Result<Option<PageEvent>, PageError>;
}

pub struct EventBus {
    queue: VecDeque<PageEvent>,
    observers: broadcast::Sender<PageEvent>,
    delivered: u64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (observers, _) = broadcast::channel(OBSERVER_CAPACITY);
        Self {
            queue: VecDeque::new(),
            observers,
            delivered: 0,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PageEvent> {
        self.observers.subscribe()
    }

    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    pub fn publish(&mut self, event: PageEvent) {
        debug!(%event, "queued page event");
        self.queue.push_back(event);
    }

    /// Delivers queued events until the queue is empty. The first listener
    /// error drops whatever is still queued and is returned.
    pub fn dispatch(
        &mut self,
        document: &mut Document,
        listeners: &mut [&mut dyn PageListener],
    ) -> Result<(), PageError> {
        while let Some(event) = self.queue.pop_front() {
            self.delivered += 1;
            let _ = self.observers.send(event.clone());
            for listener in listeners.iter_mut() {
                match listener.on_event(document, &event) {
                    Ok(Some(next)) => self.publish(next),
                    Ok(None) => {}
                    Err(err) => {
                        self.queue.clear();
                        return Err(err);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/bus_tests.rs"]
mod tests;
