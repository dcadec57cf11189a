//! Shared types, errors and small helpers.

pub mod error;
pub mod hash;
pub mod time;
pub mod types;
