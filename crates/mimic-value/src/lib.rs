//! Values and structural fingerprints for the mimic test-double engine.
//!
//! This crate is the leaf of the workspace and knows nothing about mocks.
//! It represents the arguments a mock receives and reduces an argument list
//! to a [`Fingerprint`] that is stable under key reordering and (by default)
//! under undefined-valued object keys. [`FingerprintStore`] is keyed by it.

mod fingerprint;
mod store;
mod value;

pub use fingerprint::{
    fingerprint_args, fingerprint_value, structurally_equal, Fingerprint, FingerprintHasher,
    FingerprintPolicy,
};
pub use store::FingerprintStore;
pub use value::{FromValue, Value, ValueKind};

use thiserror::Error;

/// Errors converting a [`Value`] into a concrete Rust type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("number out of range: {0}")]
    OutOfRange(String),

    #[error("at index {0}: {1}")]
    IndexError(usize, Box<ConversionError>),
}

impl ConversionError {
    pub(crate) fn mismatch(expected: &str, got: &Value) -> Self {
        ConversionError::TypeMismatch {
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }
}
