//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`): the store actors
//! tag every event with an `entity_type` field instead.
//!
//! ```bash
//! RUST_LOG=info cargo run     # order lifecycle only
//! RUST_LOG=debug cargo run    # every store request, with payloads
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Actor started entity_type="Customer"
//! INFO Created entity_type="Customer" size=1
//! INFO Created entity_type="Product" size=1
//! INFO execute{customer_id=0190... items=1}:create{customer_id=0190... lines=1}: Created entity_type="Order" size=1
//! INFO execute{customer_id=0190... items=1}: Batch action ok entity_type="Product" count=1
//! INFO execute{customer_id=0190... items=1}: Order created order_id=0190... lines=1
//! ```
//!
//! **With `RUST_LOG=debug`** each store request is logged on arrival with its
//! payload (`GetMany requested=1 found=1`, `ActionMany count=1`, ...).

/// Installs the global subscriber.
///
/// Safe to call more than once: later calls leave the first subscriber in place,
/// so tests can call it freely.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
