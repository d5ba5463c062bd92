//! Foundation types for the fleet registry.
//!
//! This crate defines the record and event types shared by the store, the
//! change feed, and the HTTP server. It carries no behavior beyond
//! serialization and field-level validation.
//!
//! # Key Types
//!
//! - [`Item`] — A registered vehicle record with a version counter
//! - [`ItemDraft`] — The incoming request payload (every field optional)
//! - [`ChangeEvent`] — The notification pushed to connected observers

pub mod event;
pub mod item;

pub use event::ChangeEvent;
pub use item::{Item, ItemDraft};
