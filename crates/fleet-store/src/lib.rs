//! In-memory record store for the fleet registry.
//!
//! [`ItemStore`] owns the authoritative collection of records and enforces
//! identifier assignment and version stamping. It is deliberately not
//! synchronized; [`SharedItemStore`] wraps it in the single mutex through
//! which all request handling must go, so every store operation appears
//! atomic with respect to every other.

pub mod error;
pub mod guard;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use guard::SharedItemStore;
pub use store::ItemStore;
