//! Entitygap Domain Layer
//!
//! This crate contains the core data model and pure logic for the entity gap
//! analyzer. It stays dependency-light (serde for the record type, async-trait
//! for the provider seams) and defines the fundamental concepts that all other
//! layers depend upon.
//!
//! ## Key Concepts
//!
//! - **EntityRecord**: one extracted entity mention for one source URL
//! - **EntityTable**: an ordered collection of records, relevance descending
//! - **Gap**: the records of a comparison table whose entity is absent from a
//!   target table - the content opportunities
//!
//! ## Architecture
//!
//! - Pure logic only; no I/O
//! - Trait definitions for the search and extraction providers; the
//!   infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod gap;
pub mod record;
pub mod table;
pub mod traits;

// Re-exports for convenience
pub use gap::compute_gap;
pub use record::EntityRecord;
pub use table::EntityTable;
