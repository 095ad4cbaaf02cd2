//! Order lifecycle: the state machine every order moves through, and its
//! payment-verification sub-state.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
