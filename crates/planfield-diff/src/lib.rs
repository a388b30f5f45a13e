//! Flat resource attribute diffs.
//!
//! A proposed change to a resource is recorded as a flat mapping from dotted
//! attribute paths to old/new string pairs. Nested structure is encoded in the
//! path itself:
//!
//! ```text
//! list.#            element count
//! list.0            first list element
//! map.key           map entry
//! set.2930241561    set element, keyed by hash code
//! set.10.index      field of a record inside a set element
//! ```
//!
//! This crate only holds and loads that mapping. Interpreting it against a
//! schema is the job of `planfield-reader`.
//!
//! # Key Types
//!
//! - [`AttrDiff`] -- One flat entry: old, new, not-yet-known and removed flags
//! - [`InstanceDiff`] -- The full path-keyed mapping, with prefix scans

pub mod attr;
pub mod error;
pub mod instance;

pub use attr::AttrDiff;
pub use error::{DiffError, DiffResult};
pub use instance::InstanceDiff;
