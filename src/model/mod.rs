//! Pure data structures managed by the store actors, plus the payloads used to
//! create and update them.

pub mod customer;
pub mod id;
pub mod order;
pub mod product;

pub use customer::*;
pub use id::*;
pub use order::*;
pub use product::*;
