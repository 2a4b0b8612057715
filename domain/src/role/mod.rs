//! Roles and role assignment
//!
//! - [`Role`]: tagged variant over the five roles, with a capability table
//!   ([`RoleCapabilities`]) consulted by the phase engine instead of
//!   scattered role comparisons
//! - [`Faction`]: the two win-condition sides
//! - [`RoleComposition`] / [`RoleAssignment`]: the multiset of roles for a
//!   match and its shuffled distribution over the seats

pub mod composition;
pub mod value_objects;

pub use composition::{RoleAssignment, RoleComposition};
pub use value_objects::{Faction, Role, RoleCapabilities, WinGroup};
