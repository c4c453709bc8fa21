//! Behaviors and the per-mock behavior registry.
//!
//! A [`Behavior`] decides what an intercepted call produces. Each mock holds
//! one default behavior plus overrides keyed by argument fingerprint; on every
//! call exactly one of them is resolved, recorded and executed.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use mimic_value::{Fingerprint, FingerprintPolicy, FingerprintStore, Value};
use serde::Serialize;

use crate::error::Thrown;

/// Callback for [`Behavior::Call`]. `Err` is thrown to the caller unchanged.
pub type Callback = Arc<dyn Fn(&[Value]) -> Result<Value, Value> + Send + Sync>;

/// What a mock does when a call resolves to this behavior.
#[derive(Clone)]
pub enum Behavior {
    Return(Value),
    Throw(Value),
    Call(Callback),
    /// Produce an already-fulfilled [`Settled`] result.
    Resolve(Value),
    /// Produce an already-rejected [`Settled`] result.
    Reject(Value),
}

/// Payload-free tag of a [`Behavior`], for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorKind {
    Return,
    Throw,
    Call,
    Resolve,
    Reject,
}

impl Behavior {
    pub fn call<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        Behavior::Call(Arc::new(f))
    }

    pub fn kind(&self) -> BehaviorKind {
        match self {
            Behavior::Return(_) => BehaviorKind::Return,
            Behavior::Throw(_) => BehaviorKind::Throw,
            Behavior::Call(_) => BehaviorKind::Call,
            Behavior::Resolve(_) => BehaviorKind::Resolve,
            Behavior::Reject(_) => BehaviorKind::Reject,
        }
    }

    /// Run the behavior for a call to `function` with `args`.
    pub(crate) fn execute(&self, function: &str, args: &[Value]) -> Result<Returned, Thrown> {
        let thrown = |value: Value| Thrown {
            function: function.to_string(),
            value,
        };
        match self {
            Behavior::Return(value) => Ok(Returned::Value(value.clone())),
            Behavior::Throw(value) => Err(thrown(value.clone())),
            Behavior::Call(callback) => callback(args).map(Returned::Value).map_err(thrown),
            Behavior::Resolve(value) => Ok(Returned::Settled(Settled {
                function: function.to_string(),
                outcome: Ok(value.clone()),
            })),
            Behavior::Reject(value) => Ok(Returned::Settled(Settled {
                function: function.to_string(),
                outcome: Err(value.clone()),
            })),
        }
    }
}

/// `Return(undefined)`, the behavior every mock starts with.
impl Default for Behavior {
    fn default() -> Self {
        Behavior::Return(Value::Undefined)
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::Return(v) => f.debug_tuple("Return").field(v).finish(),
            Behavior::Throw(v) => f.debug_tuple("Throw").field(v).finish(),
            Behavior::Call(_) => f.write_str("Call(<callback>)"),
            Behavior::Resolve(v) => f.debug_tuple("Resolve").field(v).finish(),
            Behavior::Reject(v) => f.debug_tuple("Reject").field(v).finish(),
        }
    }
}

// ============================================================================
// Call results
// ============================================================================

/// The non-throwing result of an intercepted call.
#[derive(Debug, Clone, PartialEq)]
pub enum Returned {
    Value(Value),
    Settled(Settled),
}

impl Returned {
    /// The synchronous value, if the behavior produced one.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Returned::Value(v) => Some(v),
            Returned::Settled(_) => None,
        }
    }

    /// The asynchronous result, if the behavior produced one.
    pub fn into_settled(self) -> Option<Settled> {
        match self {
            Returned::Settled(s) => Some(s),
            Returned::Value(_) => None,
        }
    }
}

/// An asynchronous result that is already settled.
///
/// Awaiting it never suspends: the first poll is `Ready`, as is every
/// subsequent one.
#[derive(Debug, Clone, PartialEq)]
pub struct Settled {
    function: String,
    outcome: Result<Value, Value>,
}

impl Settled {
    pub fn is_fulfilled(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn is_rejected(&self) -> bool {
        self.outcome.is_err()
    }

    /// Read the outcome without awaiting.
    pub fn into_result(self) -> Result<Value, Thrown> {
        let function = self.function;
        self.outcome.map_err(|value| Thrown { function, value })
    }
}

impl Future for Settled {
    type Output = Result<Value, Thrown>;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        Poll::Ready(self.get_mut().clone().into_result())
    }
}

// ============================================================================
// Registry
// ============================================================================

/// An override bound to one argument fingerprint.
#[derive(Debug, Clone)]
pub struct Override {
    pub behavior: Behavior,
    /// Calls that resolved to this override, across reconfigurations of it.
    pub matched_calls: usize,
}

/// Outcome of resolving a call's arguments against the registry.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub behavior: Behavior,
    pub fingerprint: Fingerprint,
    /// Whether an override (rather than the default) was chosen.
    pub overridden: bool,
}

/// One default behavior plus per-argument overrides, for a single mock.
#[derive(Debug)]
pub struct BehaviorRegistry {
    default: Behavior,
    overrides: FingerprintStore<Override>,
}

impl BehaviorRegistry {
    pub fn new(default: Behavior, policy: FingerprintPolicy) -> Self {
        Self {
            default,
            overrides: FingerprintStore::new(policy),
        }
    }

    pub fn default_behavior(&self) -> &Behavior {
        &self.default
    }

    pub fn set_default(&mut self, behavior: Behavior) {
        self.default = behavior;
    }

    /// Bind `behavior` to `args`. Re-binding the same arguments replaces the
    /// behavior and keeps the matched-call count.
    pub fn set_override(&mut self, args: Vec<Value>, behavior: Behavior) {
        match self.overrides.get_mut(&args) {
            Some(existing) => existing.behavior = behavior,
            None => {
                self.overrides.set(
                    args,
                    Override {
                        behavior,
                        matched_calls: 0,
                    },
                );
            }
        }
    }

    /// Pick the behavior for `args`: an exact override if one exists,
    /// otherwise the default. Does not touch any state.
    pub fn resolve(&self, args: &[Value]) -> Resolution {
        let fingerprint = self.overrides.fingerprint(args);
        match self.overrides.get_at(&fingerprint) {
            Some(found) => Resolution {
                behavior: found.behavior.clone(),
                fingerprint,
                overridden: true,
            },
            None => Resolution {
                behavior: self.default.clone(),
                fingerprint,
                overridden: false,
            },
        }
    }

    /// Count a call against the override resolved for it.
    pub fn record_match(&mut self, resolution: &Resolution) {
        if !resolution.overridden {
            return;
        }
        if let Some(found) = self.overrides.get_mut_at(&resolution.fingerprint) {
            found.matched_calls += 1;
        }
    }

    pub fn find_override(&self, args: &[Value]) -> Option<&Override> {
        self.overrides.get(args)
    }

    /// Overrides with their literal argument keys, in configuration order.
    pub fn overrides(&self) -> impl Iterator<Item = (&[Value], &Override)> + '_ {
        self.overrides.iter()
    }

    /// Back to `Return(undefined)` with no overrides.
    pub fn reset(&mut self) {
        self.default = Behavior::default();
        self.overrides.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> BehaviorRegistry {
        BehaviorRegistry::new(Behavior::default(), FingerprintPolicy::default())
    }

    fn args(items: &[Value]) -> Vec<Value> {
        items.to_vec()
    }

    #[test]
    fn test_default_then_override_precedence() {
        let mut reg = registry();
        reg.set_default(Behavior::Return(Value::from(666)));
        let victor = args(&[Value::from("1"), Value::from(2), Value::from("Victor")]);
        reg.set_override(victor.clone(), Behavior::Return(Value::from(22)));

        let other = reg.resolve(&[Value::from("a"), Value::from(9), Value::from("Victor")]);
        assert!(!other.overridden);
        assert!(matches!(other.behavior, Behavior::Return(Value::Int(666))));

        let hit = reg.resolve(&victor);
        assert!(hit.overridden);
        assert!(matches!(hit.behavior, Behavior::Return(Value::Int(22))));
    }

    #[test]
    fn test_reconfiguring_override_keeps_count() {
        let mut reg = registry();
        let key = args(&[Value::from(1)]);
        reg.set_override(key.clone(), Behavior::Return(Value::from("a")));

        let first = reg.resolve(&key);
        reg.record_match(&first);
        reg.record_match(&first);
        reg.set_override(key.clone(), Behavior::Return(Value::from("b")));

        let found = reg.find_override(&key).expect("override");
        assert_eq!(found.matched_calls, 2);
        assert!(matches!(&found.behavior, Behavior::Return(Value::String(s)) if s == "b"));
        assert_eq!(reg.overrides().count(), 1);
    }

    #[test]
    fn test_resolve_is_side_effect_free() {
        let mut reg = registry();
        let key = args(&[Value::from(1)]);
        reg.set_override(key.clone(), Behavior::Return(Value::Null));
        for _ in 0..3 {
            reg.resolve(&key);
        }
        assert_eq!(reg.find_override(&key).map(|o| o.matched_calls), Some(0));
    }

    #[test]
    fn test_reset_restores_return_undefined() {
        let mut reg = registry();
        reg.set_default(Behavior::Throw(Value::from("boom")));
        reg.set_override(args(&[Value::from(1)]), Behavior::Return(Value::Null));
        reg.reset();

        assert!(matches!(reg.default_behavior(), Behavior::Return(Value::Undefined)));
        assert_eq!(reg.overrides().count(), 0);
        assert!(!reg.resolve(&[Value::from(1)]).overridden);
    }

    #[test]
    fn test_execute_call_propagates_error_unchanged() {
        let behavior = Behavior::call(|args| match args.first() {
            Some(Value::Int(n)) if *n > 0 => Ok(Value::Int(n * 2)),
            _ => Err(Value::object([("code", "EINVAL")])),
        });

        let ok = behavior.execute("double", &[Value::from(4)]).expect("ok");
        assert_eq!(ok, Returned::Value(Value::from(8)));

        let err = behavior.execute("double", &[Value::from(-1)]).unwrap_err();
        assert_eq!(err.function, "double");
        assert_eq!(err.value, Value::object([("code", "EINVAL")]));
    }

    #[test]
    fn test_settled_outcomes() {
        let resolved = Behavior::Resolve(Value::from(1))
            .execute("f", &[])
            .expect("resolve")
            .into_settled()
            .expect("settled");
        assert!(resolved.is_fulfilled());
        assert_eq!(resolved.into_result(), Ok(Value::from(1)));

        let rejected = Behavior::Reject(Value::from("no"))
            .execute("f", &[])
            .expect("reject")
            .into_settled()
            .expect("settled");
        assert!(rejected.is_rejected());
        assert_eq!(rejected.into_result().unwrap_err().value, Value::from("no"));
    }
}
