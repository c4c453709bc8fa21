//! Verification Engine
//!
//! Two ways to check a mock's history:
//!
//! - [`verify`] evaluates every [`Supposition`] registered on the mock against
//!   its ledger. It is all-or-nothing: any unmet supposition fails the whole
//!   verification.
//! - [`VerifyThat`] asserts one query at a time straight against the spy,
//!   without going through the supposition registry.

mod assert;
mod supposition;

pub use assert::VerifyThat;
pub use supposition::{ExpectedArgs, ExpectedCount, Supposition, SuppositionRegistry};

use tracing::{debug, warn};

use crate::error::{MockError, VerificationFailure};
use crate::ledger::Spy;
use crate::mock::FunctionMock;

/// Check every supposition registered on `mock`.
pub fn verify(mock: &FunctionMock) -> Result<(), MockError> {
    let spy = mock.spy();
    let suppositions = mock.suppositions();

    // "Never called" vetoes regardless of the other suppositions.
    if let Some(veto) = suppositions.iter().find(|s| s.is_global_veto()) {
        if spy.call_count() > 0 {
            return Err(failure(&spy, vec![veto.to_string()]));
        }
    }

    let unmet: Vec<String> = suppositions
        .iter()
        .filter(|s| !s.holds(&spy))
        .map(ToString::to_string)
        .collect();

    if unmet.is_empty() {
        debug!(
            mock = spy.function(),
            suppositions = suppositions.len(),
            "verification passed"
        );
        Ok(())
    } else {
        Err(failure(&spy, unmet))
    }
}

/// Build the error for a failed check and log it.
pub(crate) fn failure(spy: &Spy<'_>, unmet: Vec<String>) -> MockError {
    warn!(
        mock = spy.function(),
        calls = spy.call_count(),
        unmet = unmet.len(),
        "verification failed"
    );
    MockError::Verification(VerificationFailure {
        function: spy.function().to_string(),
        unmet,
        calls: spy.calls().map(<[_]>::to_vec).collect(),
    })
}
