// Token Registry - Enumeration Index
// Dense token id array mirrored by a reverse position map.
//
// Removal swaps the last element into the freed slot and truncates, so
// both append and removal are O(1). The cost is that enumeration order is
// not insertion order after any removal; callers must not rely on order
// stability across mutating calls.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::TokenId;

/// Dense, reverse-indexed token id list
///
/// Invariant: `slots[positions[id]] == id` for every contained id, and
/// `positions` holds exactly the ids in `slots`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EnumIndex {
    slots: Vec<TokenId>,
    positions: HashMap<TokenId, usize>,
}

impl EnumIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contained ids
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the index is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether the id is present
    #[inline]
    pub fn contains(&self, id: TokenId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Id at the given position, if in bounds
    #[inline]
    pub fn get(&self, index: usize) -> Option<TokenId> {
        self.slots.get(index).copied()
    }

    /// Current position of an id
    #[inline]
    pub fn position(&self, id: TokenId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Append an id; returns false if it is already present
    pub fn push(&mut self, id: TokenId) -> bool {
        if self.positions.contains_key(&id) {
            return false;
        }
        self.positions.insert(id, self.slots.len());
        self.slots.push(id);
        true
    }

    /// Remove an id by swapping the last element into its slot
    ///
    /// Returns false if the id is not present. O(1) regardless of position.
    pub fn swap_remove(&mut self, id: TokenId) -> bool {
        let position = match self.positions.remove(&id) {
            Some(position) => position,
            None => return false,
        };
        let last = match self.slots.pop() {
            Some(last) => last,
            None => return false,
        };
        if position < self.slots.len() {
            self.slots[position] = last;
            self.positions.insert(last, position);
        }
        true
    }

    /// Iterate over contained ids in slot order
    pub fn iter(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.slots.iter().copied()
    }
}
