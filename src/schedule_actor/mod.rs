//! Recurring delivery schedules and the per-date claim that keeps
//! materialization idempotent.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
