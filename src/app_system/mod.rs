//! System orchestration, startup, and shutdown logic.

pub mod error;
pub mod health;
pub mod materializer;
pub mod order_system;
pub mod telemetry;

pub use error::*;
pub use health::*;
pub use materializer::*;
pub use order_system::*;
pub use telemetry::*;
