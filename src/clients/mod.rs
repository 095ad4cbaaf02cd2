//! Typed clients over the resource actors. Cross-entity checks (does the
//! customer exist, what does a can cost) live here, not in the actors.

#[macro_use]
mod macros;

pub mod customer_client;
pub mod order_client;
pub mod schedule_client;

pub use customer_client::CustomerClient;
pub use order_client::OrderClient;
pub use schedule_client::ScheduleClient;
