//! Event channel port
//!
//! A single-producer, single-consumer FIFO between the worker running the
//! tournament and the presentation consumer. The sender stamps every event
//! with a sequence number; the receiver is drained without blocking.

use tokio::sync::mpsc;
use tracing::trace;
use werewolf_domain::{EventEnvelope, GameEvent};

/// Create a connected sender/receiver pair
pub fn event_channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx, next_seq: 0 }, EventReceiver { rx })
}

/// Producer half, owned by the worker
///
/// Not `Clone`: there is exactly one producer, so sequence numbers are
/// assigned in publication order.
#[derive(Debug)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<EventEnvelope>,
    next_seq: u64,
}

impl EventSender {
    /// Publish an event and return its sequence number
    ///
    /// A dropped receiver is not an error; the engine keeps running.
    pub fn publish(&mut self, event: GameEvent) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        trace!(seq, kind = event.kind(), "publish event");
        let _ = self.tx.send(EventEnvelope { seq, event });
        seq
    }

    /// Number of events published so far
    pub fn published(&self) -> u64 {
        self.next_seq
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Whether more events may still arrive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Open,
    /// The sender is gone and everything has been drained
    Closed,
}

/// Consumer half, owned by the presentation loop
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::UnboundedReceiver<EventEnvelope>,
}

impl EventReceiver {
    /// Take every event currently queued, without waiting
    pub fn drain(&mut self) -> (Vec<EventEnvelope>, ChannelState) {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(envelope) => events.push(envelope),
                Err(mpsc::error::TryRecvError::Empty) => return (events, ChannelState::Open),
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    return (events, ChannelState::Closed);
                }
            }
        }
    }

    /// Wait for the next event; `None` once the sender is gone
    pub async fn recv(&mut self) -> Option<EventEnvelope> {
        self.rx.recv().await
    }
}
