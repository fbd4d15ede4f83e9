// Registry Approve Operations
// This module contains single-token approval and blanket operator approval.

use log::trace;

use crate::error::{RegistryError, RegistryResult};
use crate::events::RegistryEvent;
use crate::types::{Address, TokenId};

use super::{RegistryStorage, RuntimeContext};

// ========================================
// Single Token Approval
// ========================================

/// Approve a spender for a single token
///
/// # Parameters
/// - `storage`: Storage backend
/// - `ctx`: Runtime context (caller, block height)
/// - `spender`: Account to approve
/// - `id`: Token ID
///
/// # Returns
/// - `Ok(())`: Success
/// - `Err(RegistryError)`: Error code
pub fn approve<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    spender: &Address,
    id: TokenId,
) -> RegistryResult<()> {
    // Step 1: Get token
    let mut token = storage.get_token(id).ok_or(RegistryError::TokenNotFound)?;

    // Step 2: Business rules check
    // 2.1 Approving the owner itself is meaningless
    if token.owner == *spender {
        return Err(RegistryError::SelfApproval);
    }

    // 2.2 Caller must be the owner or a blanket-approved operator. The
    // approved spender itself cannot re-delegate.
    if token.owner != ctx.caller && !storage.is_approved_for_all(&token.owner, &ctx.caller) {
        return Err(RegistryError::Unauthorized);
    }

    // Step 3: Record approval
    token.approved = Some(*spender);
    let owner = token.owner;
    storage.set_token(&token)?;

    storage.record_event(RegistryEvent::Approval {
        owner,
        spender: *spender,
        id,
    });
    trace!("approved {} for token {} of {}", spender, id, owner);

    Ok(())
}

// ========================================
// Blanket Operator Approval
// ========================================

/// Grant or revoke blanket operator rights over all of the caller's tokens
///
/// The delegation is dynamic: it covers every token the caller owns at the
/// time a later permission check runs, not a snapshot taken here.
///
/// # Parameters
/// - `storage`: Storage backend
/// - `ctx`: Runtime context
/// - `operator`: Operator account
/// - `approved`: New delegation flag
///
/// # Returns
/// - `Ok(())`: Success
/// - `Err(RegistryError)`: Error code
pub fn set_approval_for_all<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    operator: &Address,
    approved: bool,
) -> RegistryResult<()> {
    if *operator == ctx.caller {
        return Err(RegistryError::SelfApproval);
    }

    storage.set_approval_for_all(&ctx.caller, operator, approved)?;

    storage.record_event(RegistryEvent::ApprovalForAll {
        owner: ctx.caller,
        operator: *operator,
        approved,
    });
    trace!(
        "operator {} for {} set to {}",
        operator,
        ctx.caller,
        approved
    );

    Ok(())
}
