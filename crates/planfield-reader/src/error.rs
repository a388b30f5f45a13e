use planfield_diff::DiffError;
use planfield_types::{Address, SchemaKind, TypeError};

/// Errors from field read operations.
///
/// An address with nothing stored at it is not an error; it reads as a
/// result with `exists == false`.
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// Reads require at least one path segment.
    #[error("cannot read an empty address")]
    EmptyAddress,

    /// A stored string is not a valid encoding of the expected kind.
    #[error("cannot decode {raw:?} at {address} as {kind}")]
    Decode {
        address: Address,
        kind: SchemaKind,
        raw: String,
    },

    /// The schema cannot describe data in the flat encoding.
    #[error("invalid schema at {address}: {reason}")]
    SchemaShape { address: Address, reason: String },

    /// A set member is stored under a segment that is not a hash code.
    #[error("invalid set code {segment:?} under {address}")]
    SetCode { address: Address, segment: String },

    /// A decoded set member does not hash to the code it is stored under.
    #[error("set member at {address} is stored under code {stored} but hashes to {computed}")]
    SetCodeMismatch {
        address: Address,
        stored: i64,
        computed: i64,
    },

    /// A stored element count disagrees with the elements present.
    #[error("count mismatch at {address}: expected {expected} elements, found {found}")]
    CountMismatch {
        address: Address,
        expected: usize,
        found: usize,
    },

    /// The address is longer than the configured maximum depth.
    #[error("address {address} exceeds maximum depth {max_depth}")]
    DepthExceeded { address: Address, max_depth: usize },

    /// The reader configuration could not be parsed.
    #[error("invalid reader config: {0}")]
    Config(String),

    #[error("address error: {0}")]
    Address(#[from] TypeError),

    #[error("diff error: {0}")]
    Diff(#[from] DiffError),
}

/// Result alias for read operations.
pub type ReaderResult<T> = Result<T, ReaderError>;
