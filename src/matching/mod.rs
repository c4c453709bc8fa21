//! Structural Matcher
//!
//! Decides whether an expected argument list (literals and/or predicates)
//! matches a recorded one. Literal subtrees compare with the same deep
//! equality the fingerprint store uses; predicates test the value found at
//! their position, however deeply nested.
//!
//! # Rules
//!
//! - Argument lists must have the same length
//! - A list pattern matches a list of the same length, element by element
//! - An object pattern matches an object with the same key set, field by field.
//!   Under the default policy a key whose value is `undefined` counts as absent
//!   on either side, and a missing actual key is tested as `undefined`

mod pattern;
mod predicate;

pub use pattern::{describe_args, literal_args, Pattern};
pub use predicate::{
    any, any_bool, any_number, any_of_kind, any_string, number_between, one_of, satisfies,
    string_containing, Predicate,
};

use std::collections::BTreeMap;

use mimic_value::{structurally_equal, FingerprintPolicy, Value};

/// Match a whole argument list.
pub fn matches(expected: &[Pattern], actual: &[Value], policy: FingerprintPolicy) -> bool {
    expected.len() == actual.len()
        && expected
            .iter()
            .zip(actual)
            .all(|(pattern, value)| match_value(pattern, value, policy))
}

/// Match a single value against a pattern.
pub fn match_value(pattern: &Pattern, actual: &Value, policy: FingerprintPolicy) -> bool {
    match (pattern, actual) {
        (Pattern::Literal(expected), _) => structurally_equal(expected, actual, policy),
        (Pattern::Predicate(predicate), _) => predicate.test(actual),
        (Pattern::List(items), Value::List(values)) => {
            items.len() == values.len()
                && items
                    .iter()
                    .zip(values)
                    .all(|(p, v)| match_value(p, v, policy))
        }
        (Pattern::Object(fields), Value::Object(values)) => match_object(fields, values, policy),
        _ => false,
    }
}

fn match_object(
    expected: &[(String, Pattern)],
    actual: &[(String, Value)],
    policy: FingerprintPolicy,
) -> bool {
    let mut wanted: BTreeMap<&str, &Pattern> = BTreeMap::new();
    for (key, pattern) in expected {
        wanted.insert(key.as_str(), pattern);
    }
    let mut present: BTreeMap<&str, &Value> = BTreeMap::new();
    for (key, value) in actual {
        present.insert(key.as_str(), value);
    }

    if policy.ignore_undefined_keys {
        wanted.retain(|_, p| !matches!(p, Pattern::Literal(Value::Undefined)));
        present.retain(|_, v| !v.is_undefined());
    }

    if present.keys().any(|key| !wanted.contains_key(key)) {
        return false;
    }

    wanted.iter().all(|(key, pattern)| match present.get(key) {
        Some(value) => match_value(pattern, value, policy),
        None if policy.ignore_undefined_keys => match_value(pattern, &Value::Undefined, policy),
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient() -> FingerprintPolicy {
        FingerprintPolicy::default()
    }

    #[test]
    fn test_literal_args() {
        let expected = [Pattern::from("1"), Pattern::from(2), Pattern::from("Victor")];
        let actual = [Value::from("1"), Value::from(2), Value::from("Victor")];
        assert!(matches(&expected, &actual, lenient()));
        assert!(!matches(&expected[..2], &actual, lenient()));
    }

    #[test]
    fn test_predicate_at_top_level() {
        let expected = [any_string(), Pattern::from(2)];
        assert!(matches(&expected, &[Value::from("x"), Value::from(2)], lenient()));
        assert!(!matches(&expected, &[Value::from(1), Value::from(2)], lenient()));
        assert!(!matches(&expected, &[Value::from("x"), Value::from(3)], lenient()));
    }

    #[test]
    fn test_predicate_nested_in_object_and_list() {
        let expected = [Pattern::object([
            ("id", any_number()),
            ("tags", Pattern::list([Pattern::from("a"), any_string()])),
            ("owner", Pattern::object([("name", string_containing("ict"))])),
        ])];
        let actual = Value::object([
            ("owner", Value::object([("name", "Victor")])),
            ("id", Value::from(10)),
            ("tags", Value::list(["a", "b"])),
        ]);
        assert!(matches(&expected, &[actual], lenient()));

        let wrong_tag = Value::object([
            ("owner", Value::object([("name", "Victor")])),
            ("id", Value::from(10)),
            ("tags", Value::list(["b", "b"])),
        ]);
        assert!(!matches(&expected, &[wrong_tag], lenient()));
    }

    #[test]
    fn test_object_pattern_requires_same_keys() {
        let expected = [Pattern::object([("x", any_number())])];
        let extra = Value::object([("x", Value::from(1)), ("y", Value::from(2))]);
        assert!(!matches(&expected, &[extra], lenient()));

        let undefined_extra = Value::object([("x", Value::from(1)), ("y", Value::Undefined)]);
        assert!(matches(&expected, &[undefined_extra.clone()], lenient()));
        assert!(!matches(&expected, &[undefined_extra], FingerprintPolicy::strict()));
    }

    #[test]
    fn test_missing_key_is_tested_as_undefined() {
        let expected = [Pattern::object([("x", Pattern::from(1)), ("y", any())])];
        assert!(matches(&expected, &[Value::object([("x", 1)])], lenient()));
        assert!(!matches(&expected, &[Value::object([("x", 1)])], FingerprintPolicy::strict()));
    }

    #[test]
    fn test_shape_mismatch() {
        let expected = [Pattern::list([any()])];
        assert!(!matches(&expected, &[Value::object([("0", 1)])], lenient()));
        assert!(!matches(&expected, &[Value::list([1, 2])], lenient()));
    }
}
