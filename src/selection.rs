//! Framework-free selection state: the pending cart versus finalized
//! submissions, under one global cap. The reducer in `model` delegates all
//! cart/submitted bookkeeping here so it can be tested without any
//! rendering layer.

use std::collections::BTreeSet;
use thiserror::Error;

use crate::model::CellKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Maximum {cap} points per game reached!")]
    CapacityExceeded { cap: u32 },
}

/// Outcome of a toggle that did not error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    /// The key was already submitted: final, nothing to do.
    AlreadySubmitted,
}

/// Invariant: `cart` and `submitted` are disjoint and
/// `cart.len() + submitted.len() <= cap` after every operation.
/// Submitted entries are never removed within a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    cart: BTreeSet<CellKey>,
    submitted: BTreeSet<CellKey>,
    cap: u32,
}

impl Selection {
    pub fn new(cap: u32) -> Self {
        Self {
            cart: BTreeSet::new(),
            submitted: BTreeSet::new(),
            cap,
        }
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    pub fn cart_len(&self) -> usize {
        self.cart.len()
    }

    pub fn submitted_len(&self) -> usize {
        self.submitted.len()
    }

    pub fn total(&self) -> usize {
        self.cart.len() + self.submitted.len()
    }

    pub fn in_cart(&self, key: &CellKey) -> bool {
        self.cart.contains(key)
    }

    pub fn is_submitted(&self, key: &CellKey) -> bool {
        self.submitted.contains(key)
    }

    pub fn cart(&self) -> impl Iterator<Item = &CellKey> {
        self.cart.iter()
    }

    pub fn submitted(&self) -> impl Iterator<Item = &CellKey> {
        self.submitted.iter()
    }

    /// Add `key` to the cart, or remove it if pending. Submitted keys are
    /// final and left untouched. Fails without modification when the cap
    /// would be exceeded.
    pub fn toggle(&mut self, key: CellKey) -> Result<Toggle, SelectionError> {
        if self.submitted.contains(&key) {
            return Ok(Toggle::AlreadySubmitted);
        }
        if self.cart.remove(&key) {
            return Ok(Toggle::Removed);
        }
        if self.total() >= self.cap as usize {
            return Err(SelectionError::CapacityExceeded { cap: self.cap });
        }
        self.cart.insert(key);
        Ok(Toggle::Added)
    }

    /// Finalize the whole cart in one step; returns how many entries moved.
    /// There is no partial submission.
    pub fn submit(&mut self) -> usize {
        let moved = self.cart.len();
        self.submitted.append(&mut self.cart);
        moved
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RegionPos;
    use proptest::prelude::*;

    fn flag(rx: u32, ry: u32, x: u32, y: u32) -> CellKey {
        CellKey::Flag {
            region: RegionPos { x: rx, y: ry },
            x,
            y,
        }
    }

    #[test]
    fn double_toggle_restores_prior_state() {
        let mut sel = Selection::new(50);
        let key = flag(0, 0, 1, 2);
        assert_eq!(sel.toggle(key), Ok(Toggle::Added));
        assert!(sel.in_cart(&key));
        assert_eq!(sel.toggle(key), Ok(Toggle::Removed));
        assert!(!sel.in_cart(&key));
        assert_eq!(sel.total(), 0);
    }

    #[test]
    fn submitted_keys_are_final() {
        let mut sel = Selection::new(50);
        let key = flag(1, 1, 0, 0);
        sel.toggle(key).unwrap();
        assert_eq!(sel.submit(), 1);
        assert_eq!(sel.toggle(key), Ok(Toggle::AlreadySubmitted));
        assert!(sel.is_submitted(&key));
        assert_eq!(sel.cart_len(), 0);
    }

    #[test]
    fn submit_on_empty_cart_is_a_noop() {
        let mut sel = Selection::new(50);
        sel.toggle(flag(0, 0, 0, 0)).unwrap();
        sel.submit();
        let before = sel.clone();
        assert_eq!(sel.submit(), 0);
        assert_eq!(sel, before);
    }

    #[test]
    fn submit_moves_whole_cart_atomically() {
        let mut sel = Selection::new(50);
        for i in 0..5 {
            sel.toggle(flag(0, 0, i, 0)).unwrap();
        }
        assert_eq!(sel.submit(), 5);
        assert_eq!(sel.cart_len(), 0);
        assert_eq!(sel.submitted_len(), 5);
    }

    #[test]
    fn clear_cart_leaves_submitted_alone() {
        let mut sel = Selection::new(50);
        sel.toggle(flag(0, 0, 0, 0)).unwrap();
        sel.submit();
        sel.toggle(flag(0, 0, 1, 0)).unwrap();
        sel.clear_cart();
        assert_eq!(sel.cart_len(), 0);
        assert_eq!(sel.submitted_len(), 1);
    }

    #[test]
    fn cap_counts_cart_plus_submitted() {
        // cap=50, 48 submitted, two in cart: adding a third must fail.
        let mut sel = Selection::new(50);
        for i in 0..48 {
            sel.toggle(flag(i / 16, i % 16, 0, 0)).unwrap();
        }
        assert_eq!(sel.submit(), 48);
        sel.toggle(flag(100, 0, 0, 0)).unwrap();
        sel.toggle(flag(100, 0, 0, 1)).unwrap();
        let before = sel.clone();
        assert_eq!(
            sel.toggle(flag(100, 0, 0, 2)),
            Err(SelectionError::CapacityExceeded { cap: 50 })
        );
        assert_eq!(sel, before);
    }

    proptest! {
        /// For any interleaving of toggles, submits, and clears the cap
        /// invariant and set disjointness hold at every step.
        #[test]
        fn cap_invariant_holds_for_any_sequence(
            ops in proptest::collection::vec((0u32..6, 0u32..6, 0u8..8), 0..200),
            cap in 0u32..12,
        ) {
            let mut sel = Selection::new(cap);
            for (x, y, op) in ops {
                match op {
                    0..=5 => { let _ = sel.toggle(flag(0, 0, x, y)); }
                    6 => { sel.submit(); }
                    _ => { sel.clear_cart(); }
                }
                prop_assert!(sel.total() <= cap as usize);
                let overlap = sel.cart().any(|k| sel.is_submitted(k));
                prop_assert!(!overlap);
            }
        }
    }
}
