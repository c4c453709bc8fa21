//! Error types for mocks.

use mimic_value::Value;
use serde::Serialize;
use thiserror::Error;

/// Errors raised by mock configuration, invocation and verification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MockError {
    /// Recorded calls did not satisfy the expectations placed on a mock.
    #[error(transparent)]
    Verification(#[from] VerificationFailure),

    /// A structured mock was asked for a member it was not built with.
    #[error("mock '{mock}' has no member '{member}'")]
    UnknownMember { mock: String, member: String },

    /// A `Throw` or `Call` behavior raised while invoking through a structured mock.
    #[error(transparent)]
    Thrown(#[from] Thrown),
}

/// A simulated failure produced by a `Throw` behavior or a failing `Call`
/// callback. Carries the thrown value unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("mock '{function}' threw {value}")]
pub struct Thrown {
    /// Name of the mock that threw.
    pub function: String,
    /// The configured error value.
    pub value: Value,
}

/// Context for a failed verification: which mock, which expectations were
/// unmet, and every call the mock recorded.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error(
    "verification failed for '{function}': {} ({} recorded call(s))",
    .unmet.join("; "),
    .calls.len()
)]
pub struct VerificationFailure {
    pub function: String,
    pub unmet: Vec<String>,
    pub calls: Vec<Vec<Value>>,
}
