// Registry Operations Module
// This module contains the core business logic for registry operations.
//
// The operations are designed to be runtime-agnostic:
// - Storage operations are abstracted via traits
// - Runtime facts (caller, block height) are passed as parameters
// - This allows testing and reuse across different host environments

mod approve;
mod burn;
mod mint;
mod query;
mod transfer;

pub use approve::*;
pub use burn::*;
pub use mint::*;
pub use query::*;
pub use transfer::*;

use crate::error::{RegistryError, RegistryResult};
use crate::events::RegistryEvent;
use crate::types::{Address, RegistryConfig, Token, TokenId};

// ========================================
// Storage Trait (for dependency injection)
// ========================================

/// Abstract storage interface for registry operations
///
/// Host environments provide concrete backends; `MemoryLedger` is the
/// in-crate reference implementation. The backend owns the ownership
/// table, balance counters, operator approvals and both enumeration
/// indices; operations orchestrate them but never bypass this interface.
pub trait RegistryStorage {
    // Token record operations
    fn get_token(&self, id: TokenId) -> Option<Token>;
    fn set_token(&mut self, token: &Token) -> RegistryResult<()>;
    fn delete_token(&mut self, id: TokenId) -> RegistryResult<()>;
    fn token_exists(&self, id: TokenId) -> bool;

    // Balance operations
    fn get_balance(&self, owner: &Address) -> u64;
    fn increment_balance(&mut self, owner: &Address) -> RegistryResult<u64>;
    fn decrement_balance(&mut self, owner: &Address) -> RegistryResult<u64>;

    // Operator approval operations
    fn is_approved_for_all(&self, owner: &Address, operator: &Address) -> bool;
    fn set_approval_for_all(
        &mut self,
        owner: &Address,
        operator: &Address,
        approved: bool,
    ) -> RegistryResult<()>;

    // Enumeration operations
    fn total_supply(&self) -> u64;
    fn token_by_index(&self, index: u64) -> Option<TokenId>;
    fn token_of_owner_by_index(&self, owner: &Address, index: u64) -> Option<TokenId>;

    /// Append a freshly minted id to the global and per-owner indices
    fn enum_append(&mut self, owner: &Address, id: TokenId) -> RegistryResult<()>;

    /// Remove a burned id from the global and per-owner indices
    fn enum_remove(&mut self, owner: &Address, id: TokenId) -> RegistryResult<()>;

    /// Move an id between per-owner indices; the global index is untouched
    fn enum_move(&mut self, from: &Address, to: &Address, id: TokenId) -> RegistryResult<()>;

    // Registry configuration
    fn config(&self) -> RegistryConfig;

    // Retired id bookkeeping (only meaningful under RemintPolicy::Forbid)
    fn is_retired(&self, id: TokenId) -> bool {
        let _ = id;
        false
    }

    fn mark_retired(&mut self, id: TokenId) -> RegistryResult<()> {
        let _ = id;
        Ok(())
    }

    // Signal recording
    fn record_event(&mut self, event: RegistryEvent) {
        let _ = event;
    }
}

// ========================================
// Runtime Context
// ========================================

/// Runtime context providing caller and block information
pub struct RuntimeContext {
    /// Current caller (transaction signer)
    pub caller: Address,
    /// Current block height
    pub block_height: u64,
}

impl RuntimeContext {
    /// Create a new runtime context
    pub fn new(caller: Address, block_height: u64) -> Self {
        Self {
            caller,
            block_height,
        }
    }
}

// ========================================
// Permission Checking Utilities
// ========================================

/// Check if the caller has permission to move or burn a token
///
/// The caller is authorized iff it is the owner, the approved spender, or
/// an operator blanket-approved by the owner. Operator approval is checked
/// dynamically against the current owner, not snapshotted.
pub fn check_token_permission<S: RegistryStorage + ?Sized>(
    storage: &S,
    token: &Token,
    caller: &Address,
) -> RegistryResult<()> {
    // Owner always has permission
    if token.owner == *caller {
        return Ok(());
    }

    // Single token approval
    if token.approved.as_ref() == Some(caller) {
        return Ok(());
    }

    // Blanket operator approval
    if storage.is_approved_for_all(&token.owner, caller) {
        return Ok(());
    }

    Err(RegistryError::Unauthorized)
}
