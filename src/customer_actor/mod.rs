//! Customer registry: registration and profile updates.

pub mod entity;
pub mod error;

pub use error::*;
