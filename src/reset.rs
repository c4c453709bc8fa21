//! Reset Controller
//!
//! Behavior, call history and suppositions are cleared independently.
//! Structured mocks fan every reset out to each member; there is no shared
//! state to clear once.

use tracing::debug;

use crate::mock::{FunctionMock, Mock, StructuredMock};

/// Which stores a reset clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetScope {
    /// Default back to `Return(undefined)`, overrides dropped.
    Behaviour,
    CallHistory,
    Suppositions,
    /// All three.
    Completely,
}

pub trait Resettable {
    fn reset_behaviour(&mut self);

    fn reset_call_history(&mut self);

    fn reset_suppositions(&mut self);

    fn reset_completely(&mut self) {
        self.reset_behaviour();
        self.reset_call_history();
        self.reset_suppositions();
    }

    fn reset(&mut self, scope: ResetScope) {
        match scope {
            ResetScope::Behaviour => self.reset_behaviour(),
            ResetScope::CallHistory => self.reset_call_history(),
            ResetScope::Suppositions => self.reset_suppositions(),
            ResetScope::Completely => self.reset_completely(),
        }
    }
}

/// Apply the same reset to many mocks.
pub fn reset_all<'a, I>(mocks: I, scope: ResetScope)
where
    I: IntoIterator<Item = &'a mut (dyn Resettable + 'a)>,
{
    for mock in mocks {
        mock.reset(scope);
    }
}

impl Resettable for FunctionMock {
    fn reset_behaviour(&mut self) {
        debug!(mock = %self.name, "reset behaviour");
        self.behaviors.reset();
    }

    fn reset_call_history(&mut self) {
        debug!(mock = %self.name, calls = self.ledger.len(), "reset call history");
        self.ledger.clear();
    }

    fn reset_suppositions(&mut self) {
        debug!(mock = %self.name, "reset suppositions");
        self.suppositions.clear();
    }
}

impl Resettable for StructuredMock {
    fn reset_behaviour(&mut self) {
        self.members.values_mut().for_each(Resettable::reset_behaviour);
    }

    fn reset_call_history(&mut self) {
        self.members
            .values_mut()
            .for_each(Resettable::reset_call_history);
    }

    fn reset_suppositions(&mut self) {
        self.members
            .values_mut()
            .for_each(Resettable::reset_suppositions);
    }
}

impl Resettable for Mock {
    fn reset_behaviour(&mut self) {
        match self {
            Mock::Function(mock) => mock.reset_behaviour(),
            Mock::Structured(mock) => mock.reset_behaviour(),
        }
    }

    fn reset_call_history(&mut self) {
        match self {
            Mock::Function(mock) => mock.reset_call_history(),
            Mock::Structured(mock) => mock.reset_call_history(),
        }
    }

    fn reset_suppositions(&mut self) {
        match self {
            Mock::Function(mock) => mock.reset_suppositions(),
            Mock::Structured(mock) => mock.reset_suppositions(),
        }
    }
}
