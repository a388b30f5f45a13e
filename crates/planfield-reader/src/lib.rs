//! Schema-driven field readers for Planfield.
//!
//! A [`FieldReader`] answers one question: given an [`Address`] and a
//! [`Schema`], what typed value is stored there? [`DiffFieldReader`] answers it
//! for the new side of a flat [`InstanceDiff`], reassembling lists, maps,
//! hash-identified sets and records from dotted keys.
//!
//! # Quick Start
//!
//! ```rust
//! use planfield_diff::{AttrDiff, InstanceDiff};
//! use planfield_reader::{DiffFieldReader, FieldReader};
//! use planfield_types::{Address, Schema, Value};
//!
//! let diff = InstanceDiff::new()
//!     .with("list.#", AttrDiff::new("0", "2"))
//!     .with("list.0", AttrDiff::added("foo"))
//!     .with("list.1", AttrDiff::added("bar"));
//! let reader = DiffFieldReader::new(diff);
//!
//! let result = reader
//!     .read(&Address::new(["list"]), &Schema::list(Schema::String))
//!     .unwrap();
//! assert!(result.exists);
//! assert_eq!(
//!     result.value,
//!     Some(Value::List(vec![Value::from("foo"), Value::from("bar")]))
//! );
//! ```
//!
//! # Design Rules
//!
//! 1. Absence is not an error: it reads as `exists == false`.
//! 2. Decoding and schema failures abort the whole read; there are no partial results.
//! 3. Set members keep the code they are stored under; the reader never recomputes
//!    it unless [`ReaderConfig::verify_set_codes`] asks it to check.
//! 4. Reads never mutate the diff, so a reader can be shared across threads.
//!
//! [`Address`]: planfield_types::Address
//! [`Schema`]: planfield_types::Schema
//! [`InstanceDiff`]: planfield_diff::InstanceDiff

pub mod config;
pub mod diff;
pub mod error;
pub mod result;
pub mod traits;

pub use config::ReaderConfig;
pub use diff::DiffFieldReader;
pub use error::{ReaderError, ReaderResult};
pub use result::FieldReadResult;
pub use traits::FieldReader;
