use std::sync::Arc;

use planfield_types::{Address, Schema};

use crate::error::ReaderResult;
use crate::result::FieldReadResult;

/// Reads typed values out of some backing source.
///
/// All implementations must satisfy these invariants:
/// - Reading an address with nothing stored at it returns a result with
///   `exists == false`, `computed == false` and no value. It is not an error.
/// - Errors are reserved for malformed schemas and for stored data that does
///   not decode as the schema says it should. A failed read yields no partial
///   result.
/// - Reads have no side effects. Concurrent reads are always safe.
pub trait FieldReader: Send + Sync {
    /// Read the value at `address`, interpreting it according to `schema`.
    ///
    /// `address` must be non-empty.
    fn read(&self, address: &Address, schema: &Schema) -> ReaderResult<FieldReadResult>;

    /// Read the value at a dotted path such as `"setDeep.10.value"`.
    fn read_path(&self, path: &str, schema: &Schema) -> ReaderResult<FieldReadResult> {
        let address = Address::parse(path)?;
        self.read(&address, schema)
    }
}

impl<R: FieldReader + ?Sized> FieldReader for &R {
    fn read(&self, address: &Address, schema: &Schema) -> ReaderResult<FieldReadResult> {
        (**self).read(address, schema)
    }
}

impl<R: FieldReader + ?Sized> FieldReader for Box<R> {
    fn read(&self, address: &Address, schema: &Schema) -> ReaderResult<FieldReadResult> {
        (**self).read(address, schema)
    }
}

impl<R: FieldReader + ?Sized> FieldReader for Arc<R> {
    fn read(&self, address: &Address, schema: &Schema) -> ReaderResult<FieldReadResult> {
        (**self).read(address, schema)
    }
}
