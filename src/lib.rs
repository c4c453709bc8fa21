//! Mimic: test doubles with argument fingerprinting and declarative verification
//!
//! A mock stands in for a callable. Every call is intercepted, answered by a
//! configured behavior, and recorded so it can be queried or verified later.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     FunctionMock                     │
//! │                                                      │
//! │  BehaviorRegistry    - default + per-args overrides  │
//! │  CallLedger          - ordered + fingerprint index   │
//! │  SuppositionRegistry - expectations for verify()     │
//! │                                                      │
//! ├──────────────────────────────────────────────────────┤
//! │  matching  - literal / predicate argument patterns   │
//! ├──────────────────────────────────────────────────────┤
//! │  mimic-value - Value, Fingerprint, FingerprintStore  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use mimic::{args, pattern, Behavior, ExpectedArgs, ExpectedCount, FunctionMock, Value};
//! use mimic::matching::any_string;
//!
//! let mut greet = FunctionMock::with_default("greet", Behavior::Return(Value::from(666)));
//! greet.set_override(args!["1", 2, "Victor"], Behavior::Return(Value::from(22)));
//!
//! let hit = greet.invoke(args!["1", 2, "Victor"]).unwrap();
//! assert_eq!(hit.into_value(), Some(Value::from(22)));
//! let miss = greet.invoke(args!["a", 9, "Victor"]).unwrap();
//! assert_eq!(miss.into_value(), Some(Value::from(666)));
//!
//! greet.suppose(ExpectedArgs::Any, ExpectedCount::Exactly(2));
//! greet.verify().unwrap();
//! greet.verify_that().was_called_once_with(&pattern![any_string(), 9, "Victor"]).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod ledger;
pub mod matching;
pub mod mock;
pub mod reset;
pub mod verify;

pub use config::{ConfigError, MockConfig};
pub use error::{MockError, Thrown, VerificationFailure};
pub use ledger::{CallLedger, CallMatches, CallRecord, CallReport, MatchMode, Spy};
pub use matching::{Pattern, Predicate};
pub use mimic_value::{
    ConversionError, Fingerprint, FingerprintPolicy, FingerprintStore, FromValue, Value,
    ValueKind,
};
pub use mock::{Behavior, BehaviorKind, FunctionMock, Mock, Returned, Settled, StructuredMock};
pub use reset::{reset_all, ResetScope, Resettable};
pub use verify::{verify, ExpectedArgs, ExpectedCount, Supposition, VerifyThat};

/// Build a call's argument list: `args![1, "a", Value::Null]` is a `Vec<Value>`.
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),*]
    };
}

/// Build an expected argument list: `pattern![1, any_string()]` is a `Vec<Pattern>`.
#[macro_export]
macro_rules! pattern {
    ($($arg:expr),* $(,)?) => {
        ::std::vec![$($crate::Pattern::from($arg)),*]
    };
}
