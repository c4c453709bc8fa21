//! Direct assertions over a mock's history.

use crate::error::MockError;
use crate::ledger::Spy;
use crate::matching::{describe_args, Pattern};

use super::failure;

/// One-shot assertions against a spy. Each method fails on its own with a
/// [`MockError::Verification`] naming the unmet expectation.
///
/// Every `*_with` method accepts literal patterns (exact mode) as well as
/// patterns holding predicates (predicate mode).
#[derive(Debug, Clone, Copy)]
pub struct VerifyThat<'a> {
    spy: Spy<'a>,
}

impl<'a> VerifyThat<'a> {
    pub fn new(spy: Spy<'a>) -> Self {
        Self { spy }
    }

    fn check(&self, ok: bool, expectation: impl FnOnce() -> String) -> Result<(), MockError> {
        if ok {
            Ok(())
        } else {
            Err(failure(&self.spy, vec![expectation()]))
        }
    }

    fn check_count(&self, expected: usize) -> Result<(), MockError> {
        self.check(self.spy.called_exactly(expected), || {
            format!("called exactly {expected} time(s)")
        })
    }

    fn check_count_with(&self, args: &[Pattern], expected: usize) -> Result<(), MockError> {
        self.check(self.spy.was_called_with(args).n_times(expected), || {
            format!("called exactly {expected} time(s) with {}", describe_args(args))
        })
    }

    pub fn was_called(&self) -> Result<(), MockError> {
        self.check(self.spy.called_at_least(1), || "called at least once".to_string())
    }

    pub fn was_never_called(&self) -> Result<(), MockError> {
        self.check(self.spy.called_exactly(0), || "never called".to_string())
    }

    pub fn was_called_once(&self) -> Result<(), MockError> {
        self.check_count(1)
    }

    pub fn was_called_twice(&self) -> Result<(), MockError> {
        self.check_count(2)
    }

    pub fn was_called_thrice(&self) -> Result<(), MockError> {
        self.check_count(3)
    }

    pub fn was_called_n_times(&self, n: usize) -> Result<(), MockError> {
        self.check_count(n)
    }

    pub fn was_called_with(&self, args: &[Pattern]) -> Result<(), MockError> {
        self.check(self.spy.was_called_with(args).at_least_once(), || {
            format!("called at least once with {}", describe_args(args))
        })
    }

    pub fn was_never_called_with(&self, args: &[Pattern]) -> Result<(), MockError> {
        self.check(self.spy.was_called_with(args).n_times(0), || {
            format!("never called with {}", describe_args(args))
        })
    }

    pub fn was_called_once_with(&self, args: &[Pattern]) -> Result<(), MockError> {
        self.check_count_with(args, 1)
    }

    pub fn was_called_twice_with(&self, args: &[Pattern]) -> Result<(), MockError> {
        self.check_count_with(args, 2)
    }

    pub fn was_called_thrice_with(&self, args: &[Pattern]) -> Result<(), MockError> {
        self.check_count_with(args, 3)
    }

    pub fn was_called_n_times_with(&self, args: &[Pattern], n: usize) -> Result<(), MockError> {
        self.check_count_with(args, n)
    }
}
