//! Use cases (application services)

pub mod resolve_action;
pub mod run_match;
pub mod run_tournament;
pub mod shared;

#[cfg(test)]
pub(crate) mod testing;
