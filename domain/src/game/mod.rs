//! Game state domain
//!
//! [`GameState`] is the single-owner, mutable snapshot of one match. It is
//! created from a [`RoleAssignment`](crate::role::RoleAssignment), mutated
//! by the role-action resolver in the application layer, and never shared
//! across threads: the presentation layer only ever sees events.

pub mod player;
pub mod score;
pub mod state;

pub use player::{Player, Potions};
pub use score::{FACTION_WIN_BONUS, LVP_PENALTY, MVP_BONUS, Scoreboard, Standing};
pub use state::{Death, DeathCause, GameState, PendingDeaths, Phase, evaluate_winner};
