// Token Registry - In-Memory Ledger
// Reference storage backend holding the whole registry aggregate.
//
// The aggregate is one owned value: ownership table, balance counters,
// operator approvals, global and per-owner enumeration indices, retired
// ids and the signal log. It serializes as a whole so a host ledger can
// persist it between calls.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};
use crate::events::RegistryEvent;
use crate::index::EnumIndex;
use crate::operations::RegistryStorage;
use crate::types::{Address, RegistryConfig, RemintPolicy, Token, TokenId};

/// In-memory registry backend
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemoryLedger {
    config: RegistryConfig,
    tokens: HashMap<TokenId, Token>,
    balances: HashMap<Address, u64>,
    // owner -> operators holding blanket approval
    operators: HashMap<Address, HashSet<Address>>,
    global: EnumIndex,
    owned: IndexMap<Address, EnumIndex>,
    retired: HashSet<TokenId>,
    events: Vec<RegistryEvent>,
}

impl MemoryLedger {
    /// Create an empty ledger with the given configuration
    pub fn new(config: RegistryConfig) -> RegistryResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tokens: HashMap::new(),
            balances: HashMap::new(),
            operators: HashMap::new(),
            global: EnumIndex::new(),
            owned: IndexMap::new(),
            retired: HashSet::new(),
            events: Vec::new(),
        })
    }

    /// Signals recorded by committed operations, oldest first
    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    /// Drain the signal log
    pub fn take_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over all existing token ids in enumeration order
    pub fn token_ids(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.global.iter()
    }
}

impl RegistryStorage for MemoryLedger {
    fn get_token(&self, id: TokenId) -> Option<Token> {
        self.tokens.get(&id).cloned()
    }

    fn set_token(&mut self, token: &Token) -> RegistryResult<()> {
        self.tokens.insert(token.id, token.clone());
        Ok(())
    }

    fn delete_token(&mut self, id: TokenId) -> RegistryResult<()> {
        self.tokens.remove(&id);
        Ok(())
    }

    fn token_exists(&self, id: TokenId) -> bool {
        self.tokens.contains_key(&id)
    }

    fn get_balance(&self, owner: &Address) -> u64 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    fn increment_balance(&mut self, owner: &Address) -> RegistryResult<u64> {
        let balance = self.balances.entry(*owner).or_insert(0);
        *balance = balance.checked_add(1).ok_or(RegistryError::Overflow)?;
        Ok(*balance)
    }

    fn decrement_balance(&mut self, owner: &Address) -> RegistryResult<u64> {
        let balance = self.balances.entry(*owner).or_insert(0);
        *balance = balance.checked_sub(1).ok_or(RegistryError::Overflow)?;
        let updated = *balance;
        if updated == 0 {
            self.balances.remove(owner);
        }
        Ok(updated)
    }

    fn is_approved_for_all(&self, owner: &Address, operator: &Address) -> bool {
        self.operators
            .get(owner)
            .is_some_and(|set| set.contains(operator))
    }

    fn set_approval_for_all(
        &mut self,
        owner: &Address,
        operator: &Address,
        approved: bool,
    ) -> RegistryResult<()> {
        if approved {
            self.operators.entry(*owner).or_default().insert(*operator);
        } else if let Some(set) = self.operators.get_mut(owner) {
            set.remove(operator);
            if set.is_empty() {
                self.operators.remove(owner);
            }
        }
        Ok(())
    }

    fn total_supply(&self) -> u64 {
        self.global.len() as u64
    }

    fn token_by_index(&self, index: u64) -> Option<TokenId> {
        self.global.get(index as usize)
    }

    fn token_of_owner_by_index(&self, owner: &Address, index: u64) -> Option<TokenId> {
        self.owned
            .get(owner)
            .and_then(|index_of_owner| index_of_owner.get(index as usize))
    }

    fn enum_append(&mut self, owner: &Address, id: TokenId) -> RegistryResult<()> {
        if !self.global.push(id) {
            return Err(RegistryError::StorageError);
        }
        if !self.owned.entry(*owner).or_default().push(id) {
            return Err(RegistryError::StorageError);
        }
        Ok(())
    }

    fn enum_remove(&mut self, owner: &Address, id: TokenId) -> RegistryResult<()> {
        if !self.global.swap_remove(id) {
            return Err(RegistryError::StorageError);
        }
        let owner_index = self
            .owned
            .get_mut(owner)
            .ok_or(RegistryError::StorageError)?;
        if !owner_index.swap_remove(id) {
            return Err(RegistryError::StorageError);
        }
        if owner_index.is_empty() {
            self.owned.shift_remove(owner);
        }
        Ok(())
    }

    fn enum_move(&mut self, from: &Address, to: &Address, id: TokenId) -> RegistryResult<()> {
        let from_index = self
            .owned
            .get_mut(from)
            .ok_or(RegistryError::StorageError)?;
        if !from_index.swap_remove(id) {
            return Err(RegistryError::StorageError);
        }
        if from_index.is_empty() {
            self.owned.shift_remove(from);
        }
        if !self.owned.entry(*to).or_default().push(id) {
            return Err(RegistryError::StorageError);
        }
        Ok(())
    }

    fn config(&self) -> RegistryConfig {
        self.config.clone()
    }

    fn is_retired(&self, id: TokenId) -> bool {
        self.retired.contains(&id)
    }

    fn mark_retired(&mut self, id: TokenId) -> RegistryResult<()> {
        // Only tracked when re-minting is forbidden
        if self.config.remint == RemintPolicy::Forbid {
            self.retired.insert(id);
        }
        Ok(())
    }

    fn record_event(&mut self, event: RegistryEvent) {
        self.events.push(event);
    }
}
