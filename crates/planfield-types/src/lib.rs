//! Foundation types for Planfield.
//!
//! Planfield decodes strongly-typed values out of flat, dot-addressed resource
//! diffs. This crate holds the pieces every other Planfield crate shares: the
//! schema model that describes a value's shape, the decoded [`Value`] itself,
//! the [`Address`] used to locate it, and the [`HashedSet`] that set-typed
//! attributes decode into.
//!
//! # Key Types
//!
//! - [`Schema`] / [`SchemaKind`] -- Closed description of a value's shape
//! - [`RecordSchema`] / [`SetSchema`] -- Nested record fields and set element schemas
//! - [`HashFn`] -- Deterministic set element hashing
//! - [`Value`] -- A decoded, typed value
//! - [`Address`] -- Ordered path segments, joined with `.` only at lookup time
//! - [`HashedSet`] -- Set members keyed by integer hash code

pub mod address;
pub mod error;
pub mod hashcode;
pub mod schema;
pub mod set;
pub mod value;

pub use address::Address;
pub use error::TypeError;
pub use schema::{HashFn, RecordSchema, Schema, SchemaKind, SetSchema};
pub use set::HashedSet;
pub use value::Value;
