//! Seat decision providers
//!
//! Adapters implementing the application's `DecisionProvider` port: an
//! OpenAI-compatible chat client, a seeded random bot, and a router that
//! dispatches each seat to its configured provider.

pub mod error;
pub mod openai;
pub mod random_bot;
pub mod routing;

pub use error::ProviderError;
pub use openai::OpenAiChatProvider;
pub use random_bot::RandomBotProvider;
pub use routing::SeatRouter;
