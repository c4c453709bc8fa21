//! Function mocks: the unit every other kind of mock is built from.

use mimic_value::Value;
use tracing::debug;

use crate::config::MockConfig;
use crate::error::{MockError, Thrown};
use crate::ledger::{CallLedger, Spy};
use crate::verify::{
    verify, ExpectedArgs, ExpectedCount, Supposition, SuppositionRegistry, VerifyThat,
};

use super::behavior::{Behavior, BehaviorRegistry, Returned};

/// A named, interceptable stand-in for one callable.
///
/// Owns exactly one behavior registry, one call ledger and one supposition
/// registry. Nothing is shared with other mocks.
#[derive(Debug)]
pub struct FunctionMock {
    pub(crate) name: String,
    pub(crate) config: MockConfig,
    pub(crate) behaviors: BehaviorRegistry,
    pub(crate) ledger: CallLedger,
    pub(crate) suppositions: SuppositionRegistry,
}

impl FunctionMock {
    /// A mock that returns `undefined` for every call.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_default(name, Behavior::default())
    }

    pub fn with_default(name: impl Into<String>, default: Behavior) -> Self {
        Self::build(name.into(), default, MockConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: MockConfig) -> Self {
        Self::build(name.into(), Behavior::default(), config)
    }

    fn build(name: String, default: Behavior, config: MockConfig) -> Self {
        let policy = config.policy();
        Self {
            name,
            config,
            behaviors: BehaviorRegistry::new(default, policy),
            ledger: CallLedger::new(policy),
            suppositions: SuppositionRegistry::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Behavior configuration
    // ------------------------------------------------------------------------

    /// Replace the behavior used when no override matches.
    pub fn set_default(&mut self, behavior: Behavior) -> &mut Self {
        self.behaviors.set_default(behavior);
        self
    }

    /// Bind a behavior to one exact argument list.
    pub fn set_override(&mut self, args: Vec<Value>, behavior: Behavior) -> &mut Self {
        self.behaviors.set_override(args, behavior);
        self
    }

    pub fn will_return(&mut self, value: impl Into<Value>) -> &mut Self {
        self.set_default(Behavior::Return(value.into()))
    }

    pub fn will_throw(&mut self, error: impl Into<Value>) -> &mut Self {
        self.set_default(Behavior::Throw(error.into()))
    }

    pub fn will_call<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        self.set_default(Behavior::call(f))
    }

    pub fn will_resolve(&mut self, value: impl Into<Value>) -> &mut Self {
        self.set_default(Behavior::Resolve(value.into()))
    }

    pub fn will_reject(&mut self, error: impl Into<Value>) -> &mut Self {
        self.set_default(Behavior::Reject(error.into()))
    }

    pub fn will_return_with(&mut self, args: Vec<Value>, value: impl Into<Value>) -> &mut Self {
        self.set_override(args, Behavior::Return(value.into()))
    }

    pub fn will_throw_with(&mut self, args: Vec<Value>, error: impl Into<Value>) -> &mut Self {
        self.set_override(args, Behavior::Throw(error.into()))
    }

    pub fn will_call_with<F>(&mut self, args: Vec<Value>, f: F) -> &mut Self
    where
        F: Fn(&[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        self.set_override(args, Behavior::call(f))
    }

    pub fn will_resolve_with(&mut self, args: Vec<Value>, value: impl Into<Value>) -> &mut Self {
        self.set_override(args, Behavior::Resolve(value.into()))
    }

    pub fn will_reject_with(&mut self, args: Vec<Value>, error: impl Into<Value>) -> &mut Self {
        self.set_override(args, Behavior::Reject(error.into()))
    }

    pub fn behaviors(&self) -> &BehaviorRegistry {
        &self.behaviors
    }

    // ------------------------------------------------------------------------
    // Invocation
    // ------------------------------------------------------------------------

    /// Intercept a call: resolve the behavior, record the call, then run the
    /// behavior. The call stays on record even when the behavior throws.
    pub fn invoke(&mut self, args: Vec<Value>) -> Result<Returned, Thrown> {
        let resolution = self.behaviors.resolve(&args);
        self.behaviors.record_match(&resolution);

        let record = self
            .ledger
            .append(args, resolution.behavior, resolution.fingerprint);
        debug!(
            mock = %self.name,
            sequence = record.sequence,
            overridden = resolution.overridden,
            behavior = ?record.behavior.kind(),
            fingerprint = %resolution.fingerprint,
            "intercepted call"
        );

        record.behavior.execute(&self.name, &record.arguments)
    }

    // ------------------------------------------------------------------------
    // History and verification
    // ------------------------------------------------------------------------

    pub fn spy(&self) -> Spy<'_> {
        Spy::new(&self.name, &self.ledger)
    }

    /// Register an expectation to be checked by [`FunctionMock::verify`].
    pub fn suppose(&mut self, args: ExpectedArgs, count: ExpectedCount) -> &mut Self {
        self.suppositions.add(Supposition::new(args, count));
        self
    }

    pub fn suppositions(&self) -> &SuppositionRegistry {
        &self.suppositions
    }

    pub fn verify(&self) -> Result<(), MockError> {
        verify(self)
    }

    pub fn verify_that(&self) -> VerifyThat<'_> {
        VerifyThat::new(self.spy())
    }
}
