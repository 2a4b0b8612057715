//! Core domain concepts shared across all subdomains.
//!
//! - [`seat::SeatId`]: a numbered player slot at the table
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: UTF-8 safe text helpers

pub mod error;
pub mod seat;
pub mod string;
