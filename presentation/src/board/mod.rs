//! Event consumer and the board snapshot it maintains

pub mod consumer;
pub mod state;

pub use consumer::{EventConsumer, LineSink};
pub use state::{BoardState, SeatView};
