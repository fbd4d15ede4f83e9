// Registry Burn Operations
// This module contains the burn operation logic.

use log::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::events::RegistryEvent;
use crate::types::{Address, TokenId};

use super::{check_token_permission, RegistryStorage, RuntimeContext};

// ========================================
// Burn Operation
// ========================================

/// Burn (destroy) a token
///
/// # Parameters
/// - `storage`: Storage backend
/// - `ctx`: Runtime context (caller, block height)
/// - `id`: Token ID
///
/// # Returns
/// - `Ok(())`: Success
/// - `Err(RegistryError)`: Error code
pub fn burn<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    id: TokenId,
) -> RegistryResult<()> {
    // Step 1: Checks
    let token = storage.get_token(id).ok_or(RegistryError::TokenNotFound)?;
    check_token_permission(storage, &token, &ctx.caller)?;

    // Step 2: Effects
    // Deleting the record drops the approved spender with it
    storage.delete_token(id)?;
    storage.decrement_balance(&token.owner)?;
    storage.enum_remove(&token.owner, id)?;
    // Under RemintPolicy::Forbid the id can never come back
    storage.mark_retired(id)?;

    storage.record_event(RegistryEvent::Transfer {
        from: token.owner,
        to: Address::ZERO,
        id,
    });
    debug!("burned token {} of {}", id, token.owner);

    Ok(())
}
