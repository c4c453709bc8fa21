//! Fingerprint-keyed storage.
//!
//! [`FingerprintStore`] maps argument lists to payloads by structural
//! identity rather than by reference. Two literal argument lists that
//! normalize to the same fingerprint share one slot; the literal key kept
//! for that slot is the first one inserted.

use hashbrown::HashMap;

use crate::fingerprint::{fingerprint_args, Fingerprint, FingerprintPolicy};
use crate::value::Value;

struct Slot<T> {
    key: Vec<Value>,
    payload: T,
}

/// A map from argument list (compared structurally) to `T`.
///
/// Iteration follows insertion order.
pub struct FingerprintStore<T> {
    policy: FingerprintPolicy,
    slots: HashMap<Fingerprint, Slot<T>>,
    order: Vec<Fingerprint>,
}

impl<T> FingerprintStore<T> {
    pub fn new(policy: FingerprintPolicy) -> Self {
        Self {
            policy,
            slots: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn policy(&self) -> FingerprintPolicy {
        self.policy
    }

    /// Fingerprint `args` under this store's policy.
    pub fn fingerprint(&self, args: &[Value]) -> Fingerprint {
        fingerprint_args(args, self.policy)
    }

    /// Insert or replace the payload for `args`, returning the previous one.
    pub fn set(&mut self, args: Vec<Value>, payload: T) -> Option<T> {
        let fp = self.fingerprint(&args);
        match self.slots.get_mut(&fp) {
            Some(slot) => Some(std::mem::replace(&mut slot.payload, payload)),
            None => {
                self.order.push(fp);
                self.slots.insert(fp, Slot { key: args, payload });
                None
            }
        }
    }

    pub fn get(&self, args: &[Value]) -> Option<&T> {
        self.get_at(&self.fingerprint(args))
    }

    pub fn get_mut(&mut self, args: &[Value]) -> Option<&mut T> {
        let fp = self.fingerprint(args);
        self.get_mut_at(&fp)
    }

    pub fn has(&self, args: &[Value]) -> bool {
        self.slots.contains_key(&self.fingerprint(args))
    }

    /// Look up by a fingerprint computed earlier with [`Self::fingerprint`].
    pub fn get_at(&self, fp: &Fingerprint) -> Option<&T> {
        self.slots.get(fp).map(|slot| &slot.payload)
    }

    pub fn get_mut_at(&mut self, fp: &Fingerprint) -> Option<&mut T> {
        self.slots.get_mut(fp).map(|slot| &mut slot.payload)
    }

    /// Return the payload stored under `fp`, inserting `init()` keyed by
    /// `args` when the slot is empty. `fp` must be the fingerprint of `args`.
    pub fn get_or_insert_at(
        &mut self,
        fp: Fingerprint,
        args: &[Value],
        init: impl FnOnce() -> T,
    ) -> &mut T {
        let order = &mut self.order;
        let slot = self.slots.entry(fp).or_insert_with(|| {
            order.push(fp);
            Slot {
                key: args.to_vec(),
                payload: init(),
            }
        });
        &mut slot.payload
    }

    /// Original literal keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &[Value]> + '_ {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter().map(|(_, payload)| payload)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[Value], &T)> + '_ {
        self.order
            .iter()
            .filter_map(|fp| self.slots.get(fp))
            .map(|slot| (slot.key.as_slice(), &slot.payload))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
    }
}

impl<T> Default for FingerprintStore<T> {
    fn default() -> Self {
        Self::new(FingerprintPolicy::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for FingerprintStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
