//! Expected-argument patterns.

use std::fmt;
use std::sync::Arc;

use mimic_value::Value;

use super::Predicate;

/// An expected argument: a literal value, a predicate, or a container whose
/// children are themselves patterns. Predicates may appear at any depth.
#[derive(Clone)]
pub enum Pattern {
    Literal(Value),
    Predicate(Arc<dyn Predicate>),
    List(Vec<Pattern>),
    Object(Vec<(String, Pattern)>),
}

impl Pattern {
    pub fn list<P, I>(items: I) -> Self
    where
        P: Into<Pattern>,
        I: IntoIterator<Item = P>,
    {
        Pattern::List(items.into_iter().map(Into::into).collect())
    }

    pub fn object<K, P, I>(fields: I) -> Self
    where
        K: Into<String>,
        P: Into<Pattern>,
        I: IntoIterator<Item = (K, P)>,
    {
        Pattern::Object(
            fields
                .into_iter()
                .map(|(k, p)| (k.into(), p.into()))
                .collect(),
        )
    }

    /// Whether a predicate appears anywhere in this pattern.
    pub fn has_predicates(&self) -> bool {
        match self {
            Pattern::Literal(_) => false,
            Pattern::Predicate(_) => true,
            Pattern::List(items) => items.iter().any(Pattern::has_predicates),
            Pattern::Object(fields) => fields.iter().any(|(_, p)| p.has_predicates()),
        }
    }

    /// The literal value this pattern denotes, if it contains no predicates.
    pub fn to_literal(&self) -> Option<Value> {
        match self {
            Pattern::Literal(v) => Some(v.clone()),
            Pattern::Predicate(_) => None,
            Pattern::List(items) => items
                .iter()
                .map(Pattern::to_literal)
                .collect::<Option<Vec<_>>>()
                .map(Value::List),
            Pattern::Object(fields) => fields
                .iter()
                .map(|(k, p)| p.to_literal().map(|v| (k.clone(), v)))
                .collect::<Option<Vec<_>>>()
                .map(Value::Object),
        }
    }
}

/// Literal form of a whole argument list, or `None` if any position holds a predicate.
pub fn literal_args(patterns: &[Pattern]) -> Option<Vec<Value>> {
    patterns.iter().map(Pattern::to_literal).collect()
}

/// Render an argument list for messages: `(1, "a", <any string>)`.
pub fn describe_args(patterns: &[Pattern]) -> String {
    let parts: Vec<String> = patterns.iter().map(ToString::to_string).collect();
    format!("({})", parts.join(", "))
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(v) => write!(f, "{v}"),
            Pattern::Predicate(p) => write!(f, "<{}>", p.describe()),
            Pattern::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Pattern::Object(fields) => {
                let parts: Vec<String> = fields.iter().map(|(k, p)| format!("{k}: {p}")).collect();
                if parts.is_empty() {
                    f.write_str("{}")
                } else {
                    write!(f, "{{ {} }}", parts.join(", "))
                }
            }
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

macro_rules! literal_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Pattern {
                fn from(v: $ty) -> Self {
                    Pattern::Literal(v.into())
                }
            }
        )*
    };
}

literal_from!(Value, (), bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, String, &str);
