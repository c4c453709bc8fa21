//! Call Ledger and Spy
//!
//! Every intercepted call is appended to the mock's [`CallLedger`] before its
//! behavior runs, so a call that throws or rejects is still on record. The
//! ledger keeps two views in lockstep:
//!
//! - an ordered list of [`CallRecord`]s, for positional queries
//! - a fingerprint index from argument list to record positions, for exact
//!   pattern queries
//!
//! [`Spy`] is the read-only query surface over one ledger.

use mimic_value::{Fingerprint, FingerprintPolicy, FingerprintStore, Value};
use serde::Serialize;

use crate::matching::{literal_args, matches, Pattern};
use crate::mock::{Behavior, BehaviorKind};

/// One intercepted call.
#[derive(Debug, Clone)]
pub struct CallRecord {
    /// Zero-based position in invocation order.
    pub sequence: usize,
    pub arguments: Vec<Value>,
    /// The behavior that was resolved for this call.
    pub behavior: Behavior,
}

/// Ordered, fingerprint-indexed call history of one mock.
#[derive(Debug)]
pub struct CallLedger {
    records: Vec<CallRecord>,
    index: FingerprintStore<Vec<usize>>,
}

impl CallLedger {
    pub fn new(policy: FingerprintPolicy) -> Self {
        Self {
            records: Vec::new(),
            index: FingerprintStore::new(policy),
        }
    }

    pub fn policy(&self) -> FingerprintPolicy {
        self.index.policy()
    }

    /// Record a call. `fingerprint` must be the fingerprint of `arguments`
    /// under this ledger's policy.
    pub fn append(
        &mut self,
        arguments: Vec<Value>,
        behavior: Behavior,
        fingerprint: Fingerprint,
    ) -> &CallRecord {
        let sequence = self.records.len();
        self.index
            .get_or_insert_at(fingerprint, &arguments, Vec::new)
            .push(sequence);
        self.records.push(CallRecord {
            sequence,
            arguments,
            behavior,
        });
        &self.records[sequence]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, sequence: usize) -> Option<&CallRecord> {
        self.records.get(sequence)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CallRecord> + '_ {
        self.records.iter()
    }

    /// Records whose arguments are structurally equal to `args`.
    pub fn with_args(&self, args: &[Value]) -> impl Iterator<Item = &CallRecord> + '_ {
        self.index
            .get(args)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(|&sequence| self.records.get(sequence))
    }

    /// Distinct argument lists seen so far, in first-seen order.
    pub fn distinct_args(&self) -> impl Iterator<Item = &[Value]> + '_ {
        self.index.keys()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
    }
}

// ============================================================================
// Spy
// ============================================================================

/// How an expected argument list was compared against recorded calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// No predicates: deep structural equality through the fingerprint index.
    Exact,
    /// At least one predicate: each record checked by the structural matcher.
    Predicate,
}

/// Number of recorded calls matching one expected argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallMatches {
    count: usize,
    mode: MatchMode,
}

impl CallMatches {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn at_least_once(&self) -> bool {
        self.count >= 1
    }

    pub fn once(&self) -> bool {
        self.count == 1
    }

    pub fn twice(&self) -> bool {
        self.count == 2
    }

    pub fn thrice(&self) -> bool {
        self.count == 3
    }

    pub fn n_times(&self, n: usize) -> bool {
        self.count == n
    }
}

/// Read-only view over one mock's call history.
#[derive(Debug, Clone, Copy)]
pub struct Spy<'a> {
    function: &'a str,
    ledger: &'a CallLedger,
}

impl<'a> Spy<'a> {
    pub fn new(function: &'a str, ledger: &'a CallLedger) -> Self {
        Self { function, ledger }
    }

    pub fn function(&self) -> &'a str {
        self.function
    }

    pub fn call_count(&self) -> usize {
        self.ledger.len()
    }

    pub fn called_at_least(&self, n: usize) -> bool {
        self.ledger.len() >= n
    }

    pub fn called_exactly(&self, n: usize) -> bool {
        self.ledger.len() == n
    }

    /// The call at zero-based position `n`.
    pub fn nth_call(&self, n: usize) -> Option<&'a CallRecord> {
        self.ledger.get(n)
    }

    pub fn last_call(&self) -> Option<&'a CallRecord> {
        self.ledger.iter().last()
    }

    /// Arguments of every call, in order.
    pub fn calls(&self) -> impl Iterator<Item = &'a [Value]> + 'a {
        self.ledger.iter().map(|record| record.arguments.as_slice())
    }

    /// Count calls matching `expected`. Exact mode is used when `expected`
    /// holds no predicates, predicate mode otherwise.
    pub fn was_called_with(&self, expected: &[Pattern]) -> CallMatches {
        match literal_args(expected) {
            Some(literal) => CallMatches {
                count: self.ledger.with_args(&literal).count(),
                mode: MatchMode::Exact,
            },
            None => {
                let policy = self.ledger.policy();
                let count = self
                    .ledger
                    .iter()
                    .filter(|record| matches(expected, &record.arguments, policy))
                    .count();
                CallMatches {
                    count,
                    mode: MatchMode::Predicate,
                }
            }
        }
    }

    /// Snapshot of the history for diagnostic formatters.
    pub fn report(&self) -> CallReport {
        CallReport {
            function: self.function.to_string(),
            calls: self
                .ledger
                .iter()
                .map(|record| ReportedCall {
                    sequence: record.sequence,
                    arguments: record.arguments.clone(),
                    behavior: record.behavior.kind(),
                })
                .collect(),
        }
    }
}

/// Serializable snapshot of a mock's calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallReport {
    pub function: String,
    pub calls: Vec<ReportedCall>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportedCall {
    pub sequence: usize,
    pub arguments: Vec<Value>,
    pub behavior: BehaviorKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::any_number;
    use mimic_value::fingerprint_args;

    fn record(ledger: &mut CallLedger, args: Vec<Value>) {
        let fp = fingerprint_args(&args, ledger.policy());
        ledger.append(args, Behavior::default(), fp);
    }

    #[test]
    fn test_ordered_and_indexed_views_agree() {
        let mut ledger = CallLedger::new(FingerprintPolicy::default());
        record(&mut ledger, vec![Value::from(1)]);
        record(&mut ledger, vec![Value::from(2)]);
        record(&mut ledger, vec![Value::from(1)]);

        assert_eq!(ledger.len(), 3);
        let sequences: Vec<usize> = ledger.with_args(&[Value::from(1)]).map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![0, 2]);
        assert_eq!(ledger.distinct_args().count(), 2);

        ledger.clear();
        assert!(ledger.is_empty());
        assert_eq!(ledger.with_args(&[Value::from(1)]).count(), 0);
        assert_eq!(ledger.distinct_args().count(), 0);
    }

    #[test]
    fn test_spy_modes() {
        let mut ledger = CallLedger::new(FingerprintPolicy::default());
        record(&mut ledger, vec![Value::from("a"), Value::from(1)]);
        record(&mut ledger, vec![Value::from("a"), Value::from(2.5)]);

        let spy = Spy::new("f", &ledger);
        let exact = spy.was_called_with(&[Pattern::from("a"), Pattern::from(1)]);
        assert_eq!(exact.mode(), MatchMode::Exact);
        assert!(exact.once());

        let loose = spy.was_called_with(&[Pattern::from("a"), any_number()]);
        assert_eq!(loose.mode(), MatchMode::Predicate);
        assert!(loose.twice());
        assert!(!loose.thrice());
        assert!(loose.n_times(2));
    }

    #[test]
    fn test_positional_queries() {
        let mut ledger = CallLedger::new(FingerprintPolicy::default());
        record(&mut ledger, vec![Value::from("first")]);
        record(&mut ledger, vec![Value::from("second")]);

        let spy = Spy::new("f", &ledger);
        assert!(spy.called_at_least(2));
        assert!(spy.called_exactly(2));
        assert_eq!(spy.nth_call(0).map(|r| r.arguments.clone()), Some(vec![Value::from("first")]));
        assert_eq!(spy.last_call().map(|r| r.sequence), Some(1));
        assert!(spy.nth_call(2).is_none());
        assert_eq!(spy.calls().count(), 2);
    }

    #[test]
    fn test_report_serializes() {
        let mut ledger = CallLedger::new(FingerprintPolicy::default());
        record(&mut ledger, vec![Value::object([("x", 1)])]);

        let json = serde_json::to_value(Spy::new("save", &ledger).report()).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "function": "save",
                "calls": [{ "sequence": 0, "arguments": [{ "x": 1 }], "behavior": "return" }]
            })
        );
    }
}
