//! Configuration file loading for ai-werewolf
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./werewolf.toml` or `./.werewolf.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/ai-werewolf/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileEngineConfig, FilePresentationConfig,
    FileSeatConfig, FileTournamentConfig, SeatProviderKind,
};
pub use loader::ConfigLoader;
