//! Player entity

use crate::core::seat::SeatId;
use crate::role::Role;
use serde::{Deserialize, Serialize};

/// The witch's single-use potions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Potions {
    pub antidote: bool,
    pub poison: bool,
}

impl Potions {
    pub fn full() -> Self {
        Self {
            antidote: true,
            poison: true,
        }
    }
}

/// One seat's player for the duration of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub seat: SeatId,
    pub role: Role,
    pub alive: bool,
    /// `Some` only for roles that hold potions
    pub potions: Option<Potions>,
}

impl Player {
    pub fn new(seat: SeatId, role: Role) -> Self {
        Self {
            seat,
            role,
            alive: true,
            potions: role.capabilities().holds_potions.then(Potions::full),
        }
    }

    pub fn has_antidote(&self) -> bool {
        self.potions.is_some_and(|p| p.antidote)
    }

    pub fn has_poison(&self) -> bool {
        self.potions.is_some_and(|p| p.poison)
    }
}
