//! Core domain entities.
//!
//! The service has a single entity, [`Entry`], pairing a short code with the
//! long URL it resolves to.

pub mod entry;

pub use entry::Entry;
