//! Runtime orchestration and lifecycle management.
//!
//! - [`OrderSystem`] - spawns the three store actors, wires their clients into the
//!   order workflow and shuts everything down again
//! - [`setup_tracing`] - initializes logging

pub mod order_system;
pub mod tracing;

pub use order_system::*;
pub use self::tracing::setup_tracing;
