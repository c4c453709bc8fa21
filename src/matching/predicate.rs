//! Predicates usable as argument placeholders.
//!
//! A predicate stands in for a literal argument when querying history or
//! declaring expectations. Anything implementing [`Predicate`] can be
//! plugged in; the constructors below cover the common cases and return a
//! ready-to-use [`Pattern`].

use std::sync::Arc;

use mimic_value::{structurally_equal, FingerprintPolicy, Value, ValueKind};

use super::Pattern;

/// A test over a single value.
pub trait Predicate: Send + Sync {
    fn test(&self, value: &Value) -> bool;

    /// Short human-readable description, used in failure messages.
    fn describe(&self) -> String;
}

struct Anything;

impl Predicate for Anything {
    fn test(&self, _value: &Value) -> bool {
        true
    }

    fn describe(&self) -> String {
        "anything".to_string()
    }
}

struct OfKind(ValueKind);

impl Predicate for OfKind {
    fn test(&self, value: &Value) -> bool {
        value.kind() == self.0
    }

    fn describe(&self) -> String {
        format!("any {}", self.0)
    }
}

struct OneOf(Vec<Value>);

impl Predicate for OneOf {
    fn test(&self, value: &Value) -> bool {
        self.0
            .iter()
            .any(|candidate| structurally_equal(candidate, value, FingerprintPolicy::default()))
    }

    fn describe(&self) -> String {
        let options: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        format!("one of [{}]", options.join(", "))
    }
}

struct StringContaining(String);

impl Predicate for StringContaining {
    fn test(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|s| s.contains(&self.0))
    }

    fn describe(&self) -> String {
        format!("string containing {:?}", self.0)
    }
}

struct NumberBetween {
    min: f64,
    max: f64,
}

impl Predicate for NumberBetween {
    fn test(&self, value: &Value) -> bool {
        value.as_f64().is_some_and(|n| n >= self.min && n <= self.max)
    }

    fn describe(&self) -> String {
        format!("number in [{}, {}]", self.min, self.max)
    }
}

struct Satisfies<F> {
    description: String,
    check: F,
}

impl<F> Predicate for Satisfies<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn test(&self, value: &Value) -> bool {
        (self.check)(value)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

// ============================================================================
// Constructors
// ============================================================================

/// Matches any value, including `undefined`.
pub fn any() -> Pattern {
    Pattern::predicate(Anything)
}

pub fn any_of_kind(kind: ValueKind) -> Pattern {
    Pattern::predicate(OfKind(kind))
}

pub fn any_string() -> Pattern {
    any_of_kind(ValueKind::String)
}

/// Matches integers and floats alike.
pub fn any_number() -> Pattern {
    any_of_kind(ValueKind::Number)
}

pub fn any_bool() -> Pattern {
    any_of_kind(ValueKind::Bool)
}

pub fn one_of<V, I>(values: I) -> Pattern
where
    V: Into<Value>,
    I: IntoIterator<Item = V>,
{
    Pattern::predicate(OneOf(values.into_iter().map(Into::into).collect()))
}

pub fn string_containing(needle: impl Into<String>) -> Pattern {
    Pattern::predicate(StringContaining(needle.into()))
}

/// Inclusive on both ends.
pub fn number_between(min: f64, max: f64) -> Pattern {
    Pattern::predicate(NumberBetween { min, max })
}

/// Wrap an arbitrary check.
pub fn satisfies<F>(description: impl Into<String>, check: F) -> Pattern
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Pattern::predicate(Satisfies {
        description: description.into(),
        check,
    })
}

impl Pattern {
    pub fn predicate(predicate: impl Predicate + 'static) -> Self {
        Pattern::Predicate(Arc::new(predicate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(pattern: &Pattern, value: impl Into<Value>) -> bool {
        match pattern {
            Pattern::Predicate(p) => p.test(&value.into()),
            other => panic!("expected predicate, got {other:?}"),
        }
    }

    #[test]
    fn test_kind_predicates() {
        assert!(check(&any_string(), "x"));
        assert!(!check(&any_string(), 1));
        assert!(check(&any_number(), 1));
        assert!(check(&any_number(), 1.5));
        assert!(check(&any_bool(), false));
        assert!(check(&any(), Value::Undefined));
    }

    #[test]
    fn test_value_predicates() {
        assert!(check(&one_of(["a", "b"]), "b"));
        assert!(!check(&one_of(["a", "b"]), "c"));
        assert!(check(&string_containing("ict"), "Victor"));
        assert!(check(&number_between(1.0, 3.0), 3));
        assert!(!check(&number_between(1.0, 3.0), 3.5));
        let even = satisfies("even", |v| v.as_f64().is_some_and(|n| n % 2.0 == 0.0));
        assert!(check(&even, 4));
        assert!(!check(&even, 5));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(any_string().to_string(), "<any string>");
        assert_eq!(one_of([1, 2]).to_string(), "<one of [1, 2]>");
        assert_eq!(satisfies("even", |_| true).to_string(), "<even>");
    }
}
