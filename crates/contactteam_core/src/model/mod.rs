//! Directory domain model.
//!
//! # Responsibility
//! - Define the read-only records shared by lookup, filtering and rendering.
//! - Keep one canonical shape matching the bundled dataset wire format.
//!
//! # Invariants
//! - Records are never mutated after the dataset is loaded.
//! - Category and contact ids are stable render keys within their parent.

pub mod community;
