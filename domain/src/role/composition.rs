//! Role composition and per-match assignment

use super::value_objects::Role;
use crate::core::error::DomainError;
use crate::core::seat::{SEAT_COUNT, SeatId};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// The multiset of roles dealt at the start of every match
///
/// The standard table is 3 Wolves, 3 Villagers, 1 Seer, 1 Witch and
/// 1 Hunter. The composition is data rather than code so the engine never
/// depends on a literal role list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleComposition {
    roles: Vec<Role>,
}

impl RoleComposition {
    /// Create a composition; it must cover every seat exactly once and
    /// deal the standard role counts in any order
    pub fn new(roles: Vec<Role>) -> Result<Self, DomainError> {
        if roles.len() != SEAT_COUNT {
            return Err(DomainError::CompositionSize {
                expected: SEAT_COUNT,
                actual: roles.len(),
            });
        }
        let composition = Self { roles };
        let standard = Self::standard();
        for role in Role::ALL {
            let (expected, actual) = (standard.count(role), composition.count(role));
            if expected != actual {
                return Err(DomainError::CompositionRoles {
                    role: role.display_name(),
                    expected,
                    actual,
                });
            }
        }
        Ok(composition)
    }

    /// 3 Wolves, 3 Villagers, 1 Seer, 1 Witch, 1 Hunter
    pub fn standard() -> Self {
        Self {
            roles: vec![
                Role::Wolf,
                Role::Wolf,
                Role::Wolf,
                Role::Villager,
                Role::Villager,
                Role::Villager,
                Role::Seer,
                Role::Witch,
                Role::Hunter,
            ],
        }
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// How many seats receive the given role
    pub fn count(&self, role: Role) -> usize {
        self.roles.iter().filter(|r| **r == role).count()
    }

    /// Human-readable summary, e.g. "3 Wolf, 3 Villager, 1 Seer, 1 Witch, 1 Hunter"
    pub fn summary(&self) -> String {
        Role::ALL
            .iter()
            .filter(|role| self.count(**role) > 0)
            .map(|role| format!("{} {}", self.count(*role), role))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Deal the roles over the seats with an unbiased shuffle
    pub fn assign<R: Rng + ?Sized>(&self, rng: &mut R) -> RoleAssignment {
        let mut roles = self.roles.clone();
        roles.shuffle(rng);
        RoleAssignment { roles }
    }
}

impl Default for RoleComposition {
    fn default() -> Self {
        Self::standard()
    }
}

/// A concrete distribution of roles over seats (index = seat - 1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    roles: Vec<Role>,
}

impl RoleAssignment {
    /// Build an assignment from an explicit seat order
    pub fn from_roles(roles: Vec<Role>) -> Result<Self, DomainError> {
        RoleComposition::new(roles).map(|c| Self { roles: c.roles })
    }

    pub fn role_of(&self, seat: SeatId) -> Role {
        self.roles[seat.index()]
    }

    /// Seats holding `role`, ascending
    pub fn seats_with(&self, role: Role) -> Vec<SeatId> {
        self.iter()
            .filter(|(_, r)| *r == role)
            .map(|(seat, _)| seat)
            .collect()
    }

    pub fn wolves(&self) -> Vec<SeatId> {
        self.iter()
            .filter(|(_, role)| role.is_wolf())
            .map(|(seat, _)| seat)
            .collect()
    }

    /// The other wolves a wolf knows about; empty for every other role
    pub fn wolf_teammates(&self, seat: SeatId) -> Vec<SeatId> {
        if !self.role_of(seat).capabilities().knows_teammates {
            return Vec::new();
        }
        self.wolves().into_iter().filter(|s| *s != seat).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SeatId, Role)> + '_ {
        SeatId::all().map(|seat| (seat, self.roles[seat.index()]))
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}
