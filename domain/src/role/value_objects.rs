//! Role value objects and the capability table

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two sides that can win a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Wolves,
    /// Villagers plus the special roles
    Villagers,
}

impl Faction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Faction::Wolves => "wolves",
            Faction::Villagers => "villagers",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Faction::Wolves => "Wolves",
            Faction::Villagers => "Villagers",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Partition used by the win-condition check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WinGroup {
    Wolves,
    Villagers,
    /// Seer, Witch, Hunter
    Specials,
}

/// What a role is allowed to do
///
/// # Example
///
/// ```
/// use werewolf_domain::Role;
///
/// assert!(Role::Hunter.capabilities().can_retaliate);
/// assert!(!Role::Villager.capabilities().has_night_action);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCapabilities {
    pub faction: Faction,
    pub win_group: WinGroup,
    /// Acts during the night (seer check, wolf kill, witch potions)
    pub has_night_action: bool,
    /// May remove another seat upon its own death (except by poison)
    pub can_retaliate: bool,
    /// Starts the match holding one antidote and one poison
    pub holds_potions: bool,
    /// Knows the identity of the other members of its role
    pub knows_teammates: bool,
}

/// A player's role for the duration of one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Wolf,
    Villager,
    Seer,
    Witch,
    Hunter,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Wolf,
        Role::Villager,
        Role::Seer,
        Role::Witch,
        Role::Hunter,
    ];

    /// The capability table
    pub const fn capabilities(self) -> RoleCapabilities {
        match self {
            Role::Wolf => RoleCapabilities {
                faction: Faction::Wolves,
                win_group: WinGroup::Wolves,
                has_night_action: true,
                can_retaliate: false,
                holds_potions: false,
                knows_teammates: true,
            },
            Role::Villager => RoleCapabilities {
                faction: Faction::Villagers,
                win_group: WinGroup::Villagers,
                has_night_action: false,
                can_retaliate: false,
                holds_potions: false,
                knows_teammates: false,
            },
            Role::Seer => RoleCapabilities {
                faction: Faction::Villagers,
                win_group: WinGroup::Specials,
                has_night_action: true,
                can_retaliate: false,
                holds_potions: false,
                knows_teammates: false,
            },
            Role::Witch => RoleCapabilities {
                faction: Faction::Villagers,
                win_group: WinGroup::Specials,
                has_night_action: true,
                can_retaliate: false,
                holds_potions: true,
                knows_teammates: false,
            },
            Role::Hunter => RoleCapabilities {
                faction: Faction::Villagers,
                win_group: WinGroup::Specials,
                has_night_action: false,
                can_retaliate: true,
                holds_potions: false,
                knows_teammates: false,
            },
        }
    }

    pub fn faction(self) -> Faction {
        self.capabilities().faction
    }

    pub fn win_group(self) -> WinGroup {
        self.capabilities().win_group
    }

    pub fn is_wolf(self) -> bool {
        self.faction() == Faction::Wolves
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Wolf => "wolf",
            Role::Villager => "villager",
            Role::Seer => "seer",
            Role::Witch => "witch",
            Role::Hunter => "hunter",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Wolf => "Wolf",
            Role::Villager => "Villager",
            Role::Seer => "Seer",
            Role::Witch => "Witch",
            Role::Hunter => "Hunter",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
