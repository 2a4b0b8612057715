//! Infrastructure layer for ai-werewolf
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod config;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileEngineConfig, FilePresentationConfig,
    FileSeatConfig, FileTournamentConfig, SeatProviderKind,
};
pub use providers::{OpenAiChatProvider, ProviderError, RandomBotProvider, SeatRouter};
