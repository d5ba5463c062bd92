//! Change notification fan-out for the fleet registry.
//!
//! [`ChangeFeed`] pushes every committed mutation to all currently
//! subscribed observers in commit order. Delivery is fire-and-forget: a
//! slow, lagging, or vanished observer never blocks the publisher and never
//! surfaces an error to the mutation that triggered the event.

pub mod feed;

pub use feed::{ChangeFeed, EventStream, DEFAULT_CAPACITY};
