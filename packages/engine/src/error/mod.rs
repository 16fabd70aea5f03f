//! Decode error types
//!
//! The only fallible operation in the engine is decoding a raw payload.
//! Path resolution never raises: missing or empty nodes surface as
//! default substitution at the query layer.

mod types;

pub use self::types::{DecodeError, DecodeResult};
