//! Merkle-tree fingerprints for argument lists.
//!
//! Values are hashed structurally over their canonical form:
//!
//! - Numbers hash by identity, so `1` and `1.0` collide on purpose
//! - Object fields are sorted by key before hashing (key order is irrelevant)
//! - Object fields whose value is `undefined` are dropped when
//!   [`FingerprintPolicy::ignore_undefined_keys`] is set (the default)
//! - Compound values hash their children: `hash(list) = hash(TAG_LIST, n, hash(item)...)`
//!
//! Two argument lists get the same [`Fingerprint`] exactly when
//! [`structurally_equal`] holds for every position under the same policy.

use std::collections::BTreeMap;
use std::fmt;

use sha2::{Digest, Sha256};

use crate::value::{NumberIdentity, Value};

/// A 256-bit structural fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Format as hex string (for logs and reports).
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Display for Fingerprint {
    /// Shortened hex, enough to tell fingerprints apart in a log line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0[..6] {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// Comparison policy shared by fingerprinting and structural equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerprintPolicy {
    /// Treat an object key whose value is `undefined` as absent.
    pub ignore_undefined_keys: bool,
}

impl FingerprintPolicy {
    /// Every key counts, including undefined-valued ones.
    pub const fn strict() -> Self {
        Self {
            ignore_undefined_keys: false,
        }
    }
}

impl Default for FingerprintPolicy {
    fn default() -> Self {
        Self {
            ignore_undefined_keys: true,
        }
    }
}

// ============================================================================
// Hash Builder
// ============================================================================

/// Builder for computing fingerprints.
pub struct FingerprintHasher {
    hasher: Sha256,
}

impl FingerprintHasher {
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    /// Add a tag byte (identifies the kind of node being hashed).
    pub fn tag(mut self, tag: u8) -> Self {
        self.hasher.update([tag]);
        self
    }

    /// Add a string (length-prefixed).
    pub fn string(mut self, s: &str) -> Self {
        self.hasher.update((s.len() as u64).to_le_bytes());
        self.hasher.update(s.as_bytes());
        self
    }

    /// Add a fixed-width word.
    pub fn word(mut self, w: u64) -> Self {
        self.hasher.update(w.to_le_bytes());
        self
    }

    /// Add a child fingerprint.
    pub fn child(mut self, fp: &Fingerprint) -> Self {
        self.hasher.update(fp.as_bytes());
        self
    }

    /// Add a count (for lists of children).
    pub fn count(self, n: usize) -> Self {
        self.word(n as u64)
    }

    pub fn finish(self) -> Fingerprint {
        let result = self.hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&result);
        Fingerprint(bytes)
    }
}

impl Default for FingerprintHasher {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Hash Tags
// ============================================================================

const TAG_UNDEFINED: u8 = 0x01;
const TAG_NULL: u8 = 0x02;
const TAG_BOOL: u8 = 0x03;
const TAG_INT: u8 = 0x04;
const TAG_FLOAT: u8 = 0x05;
const TAG_NAN: u8 = 0x06;
const TAG_STRING: u8 = 0x07;
const TAG_LIST: u8 = 0x10;
const TAG_OBJECT: u8 = 0x11;
const TAG_ARGS: u8 = 0x20;

// ============================================================================
// Value Hashing
// ============================================================================

/// Fingerprint a single value.
pub fn fingerprint_value(value: &Value, policy: FingerprintPolicy) -> Fingerprint {
    let hasher = FingerprintHasher::new();
    match value {
        Value::Undefined => hasher.tag(TAG_UNDEFINED).finish(),
        Value::Null => hasher.tag(TAG_NULL).finish(),
        Value::Bool(b) => hasher.tag(TAG_BOOL).word(u64::from(*b)).finish(),
        Value::Int(_) | Value::Float(_) => match value.number_identity() {
            Some(NumberIdentity::Int(n)) => hasher.tag(TAG_INT).word(n as u64).finish(),
            Some(NumberIdentity::Float(bits)) => hasher.tag(TAG_FLOAT).word(bits).finish(),
            _ => hasher.tag(TAG_NAN).finish(),
        },
        Value::String(s) => hasher.tag(TAG_STRING).string(s).finish(),
        Value::List(items) => {
            let mut hasher = hasher.tag(TAG_LIST).count(items.len());
            for item in items {
                hasher = hasher.child(&fingerprint_value(item, policy));
            }
            hasher.finish()
        }
        Value::Object(fields) => {
            let canonical = canonical_fields(fields, policy);
            let mut hasher = hasher.tag(TAG_OBJECT).count(canonical.len());
            for (key, field) in canonical {
                hasher = hasher.string(key).child(&fingerprint_value(field, policy));
            }
            hasher.finish()
        }
    }
}

/// Fingerprint an argument list. Distinct from fingerprinting the same
/// items wrapped in a [`Value::List`].
pub fn fingerprint_args(args: &[Value], policy: FingerprintPolicy) -> Fingerprint {
    let mut hasher = FingerprintHasher::new().tag(TAG_ARGS).count(args.len());
    for arg in args {
        hasher = hasher.child(&fingerprint_value(arg, policy));
    }
    hasher.finish()
}

/// Deep equality with the same semantics as fingerprint identity.
pub fn structurally_equal(a: &Value, b: &Value, policy: FingerprintPolicy) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            a.number_identity() == b.number_identity()
        }
        (Value::List(xs), Value::List(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys)
                    .all(|(x, y)| structurally_equal(x, y, policy))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            let xs = canonical_fields(xs, policy);
            let ys = canonical_fields(ys, policy);
            xs.len() == ys.len()
                && xs.iter().zip(ys.iter()).all(|((kx, vx), (ky, vy))| {
                    kx == ky && structurally_equal(vx, vy, policy)
                })
        }
        _ => false,
    }
}

/// Sorted, deduplicated (last write wins) view of object fields.
fn canonical_fields(
    fields: &[(String, Value)],
    policy: FingerprintPolicy,
) -> BTreeMap<&str, &Value> {
    let mut map = BTreeMap::new();
    for (key, value) in fields {
        map.insert(key.as_str(), value);
    }
    if policy.ignore_undefined_keys {
        map.retain(|_, v| !v.is_undefined());
    }
    map
}
