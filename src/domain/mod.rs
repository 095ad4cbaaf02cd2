pub mod customer;
pub mod dashboard;
pub mod order;
pub mod schedule;

pub use customer::*;
pub use dashboard::*;
pub use order::*;
pub use schedule::*;
