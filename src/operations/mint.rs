// Registry Mint Operations
// This module contains the mint and safe mint operation logic.

use log::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::events::RegistryEvent;
use crate::types::{Address, Token, TokenId};

use super::transfer::{probe_accepts, RecipientProbe};
use super::{RegistryStorage, RuntimeContext};

// ========================================
// Mint Operation
// ========================================

/// Mint a new token with a caller-chosen id
///
/// Deployment-specific policy layers (owner gates, role gates) decide who
/// may call this; the core imposes no caller restriction.
///
/// # Parameters
/// - `storage`: Storage backend
/// - `ctx`: Runtime context (caller, block height)
/// - `to`: Recipient address
/// - `id`: Token ID
///
/// # Returns
/// - `Ok(())`: Success
/// - `Err(RegistryError)`: Error code
pub fn mint<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    to: &Address,
    id: TokenId,
) -> RegistryResult<()> {
    // Step 1: Checks
    mint_checks(storage, to, id)?;

    // Step 2: Effects
    apply_mint(storage, ctx, to, id)?;

    storage.record_event(RegistryEvent::Transfer {
        from: Address::ZERO,
        to: *to,
        id,
    });
    debug!("minted token {} to {}", id, to);

    Ok(())
}

/// Mint with a receiver capability probe
///
/// Identical to [`mint`] for plain accounts. When the recipient is a
/// contract-capable account the probe runs after all effects are applied;
/// a rejection rolls every effect back and the call fails with
/// `ReceiverRejected`.
///
/// # Parameters
/// - `storage`: Storage backend
/// - `probe`: Recipient capability probe
/// - `ctx`: Runtime context
/// - `to`: Recipient address
/// - `id`: Token ID
/// - `data`: Auxiliary payload forwarded to the receive hook
///
/// # Returns
/// - `Ok(())`: Success
/// - `Err(RegistryError)`: Error code
pub fn safe_mint<S: RegistryStorage + ?Sized, P: RecipientProbe + ?Sized>(
    storage: &mut S,
    probe: &P,
    ctx: &RuntimeContext,
    to: &Address,
    id: TokenId,
    data: &[u8],
) -> RegistryResult<()> {
    // Step 1: Checks
    mint_checks(storage, to, id)?;

    // Step 2: Effects, committed before the external call (CEI pattern)
    apply_mint(storage, ctx, to, id)?;

    // Step 3: Interactions
    if probe.is_contract(to) && !probe_accepts(probe, to, &ctx.caller, &Address::ZERO, id, data) {
        revert_mint(storage, to, id)?;
        return Err(RegistryError::ReceiverRejected);
    }

    storage.record_event(RegistryEvent::Transfer {
        from: Address::ZERO,
        to: *to,
        id,
    });
    debug!("safe minted token {} to {}", id, to);

    Ok(())
}

fn mint_checks<S: RegistryStorage + ?Sized>(
    storage: &S,
    to: &Address,
    id: TokenId,
) -> RegistryResult<()> {
    if to.is_zero() {
        return Err(RegistryError::InvalidRecipient);
    }
    if storage.token_exists(id) {
        return Err(RegistryError::TokenAlreadyExists);
    }
    if storage.is_retired(id) {
        return Err(RegistryError::TokenRetired);
    }
    Ok(())
}

fn apply_mint<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    to: &Address,
    id: TokenId,
) -> RegistryResult<()> {
    let token = Token::new(id, *to, ctx.block_height);
    storage.set_token(&token)?;
    storage.increment_balance(to)?;
    storage.enum_append(to, id)?;
    Ok(())
}

/// Exact inverse of [`apply_mint`], used when the probe rejects
fn revert_mint<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    to: &Address,
    id: TokenId,
) -> RegistryResult<()> {
    storage.delete_token(id)?;
    storage.decrement_balance(to)?;
    storage.enum_remove(to, id)?;
    Ok(())
}
