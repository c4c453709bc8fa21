//! Suppositions: declarative expectations checked at verification time.

use std::fmt;

use crate::ledger::Spy;
use crate::matching::{describe_args, Pattern};

/// Which calls a supposition is about.
#[derive(Debug, Clone)]
pub enum ExpectedArgs {
    /// Every call, whatever its arguments.
    Any,
    /// Calls matching these patterns (exact or predicate mode).
    Args(Vec<Pattern>),
}

impl<P: Into<Pattern>> FromIterator<P> for ExpectedArgs {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        ExpectedArgs::Args(iter.into_iter().map(Into::into).collect())
    }
}

/// How many matching calls a supposition demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedCount {
    Never,
    AtLeastOnce,
    Exactly(usize),
}

impl ExpectedCount {
    fn accepts(self, count: usize) -> bool {
        match self {
            ExpectedCount::Never => count == 0,
            ExpectedCount::AtLeastOnce => count >= 1,
            ExpectedCount::Exactly(n) => count == n,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Supposition {
    pub args: ExpectedArgs,
    pub count: ExpectedCount,
}

impl Supposition {
    pub fn new(args: ExpectedArgs, count: ExpectedCount) -> Self {
        Self { args, count }
    }

    /// "Never called at all", which vetoes verification on its own.
    pub fn is_global_veto(&self) -> bool {
        matches!(
            (&self.args, self.count),
            (ExpectedArgs::Any, ExpectedCount::Never)
        )
    }

    /// Evaluate against the calls visible through `spy`.
    pub fn holds(&self, spy: &Spy<'_>) -> bool {
        let count = match &self.args {
            ExpectedArgs::Any => spy.call_count(),
            ExpectedArgs::Args(patterns) => spy.was_called_with(patterns).count(),
        };
        self.count.accepts(count)
    }
}

impl fmt::Display for Supposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.count {
            ExpectedCount::Never => f.write_str("never called")?,
            ExpectedCount::AtLeastOnce => f.write_str("called at least once")?,
            ExpectedCount::Exactly(1) => f.write_str("called exactly once")?,
            ExpectedCount::Exactly(n) => write!(f, "called exactly {n} times")?,
        }
        match &self.args {
            ExpectedArgs::Any => Ok(()),
            ExpectedArgs::Args(patterns) => write!(f, " with {}", describe_args(patterns)),
        }
    }
}

/// Append-only list of suppositions for one mock.
#[derive(Debug, Clone, Default)]
pub struct SuppositionRegistry {
    entries: Vec<Supposition>,
}

impl SuppositionRegistry {
    pub fn add(&mut self, supposition: Supposition) {
        self.entries.push(supposition);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Supposition> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
