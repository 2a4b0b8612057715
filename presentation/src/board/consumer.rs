//! Presentation consumer loop
//!
//! Polls the event channel on a fixed tick, drains everything queued, folds
//! each event into the [`BoardState`] and hands the rendered line to a sink.

use super::state::BoardState;
use crate::output::formatter::EventFormatter;
use std::time::Duration;
use tracing::debug;
use werewolf_application::{ChannelState, EventReceiver};

/// Where rendered lines go
pub trait LineSink {
    fn line(&mut self, text: &str);

    /// Called after every drained batch
    fn progress(&mut self, _board: &BoardState) {}

    fn finish(&mut self, _board: &BoardState) {}
}

impl LineSink for Vec<String> {
    fn line(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

pub struct EventConsumer<S: LineSink> {
    receiver: EventReceiver,
    tick: Duration,
    formatter: Box<dyn EventFormatter>,
    sink: S,
    board: BoardState,
}

impl<S: LineSink> EventConsumer<S> {
    pub fn new(receiver: EventReceiver, formatter: Box<dyn EventFormatter>, sink: S) -> Self {
        Self {
            receiver,
            tick: Duration::from_millis(100),
            formatter,
            sink,
            board: BoardState::new(),
        }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        if !tick.is_zero() {
            self.tick = tick;
        }
        self
    }

    /// Consume until the tournament finishes or the sender is gone
    pub async fn run(mut self) -> (BoardState, S) {
        let mut tick = tokio::time::interval(self.tick);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tick.tick().await;
            let (batch, state) = self.receiver.drain();
            if !batch.is_empty() {
                debug!(events = batch.len(), "drained event batch");
            }

            for envelope in &batch {
                self.board.apply(&envelope.event);
                if let Some(text) = self.formatter.format_event(envelope, &self.board) {
                    self.sink.line(&text);
                }
            }
            self.sink.progress(&self.board);

            if self.board.finished || state == ChannelState::Closed {
                break;
            }
        }

        if let Some(summary) = self.formatter.format_summary(&self.board) {
            self.sink.line(&summary);
        }
        self.sink.finish(&self.board);
        (self.board, self.sink)
    }
}
