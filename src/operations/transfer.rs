// Registry Transfer Operations
// This module contains transfer and safe transfer operation logic, plus
// the recipient capability probe seam used by the safe variants.

use log::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::events::RegistryEvent;
use crate::interface::ON_TOKEN_RECEIVED;
use crate::types::{Address, Token, TokenId};

use super::{check_token_permission, RegistryStorage, RuntimeContext};

// ========================================
// Recipient Capability Probe
// ========================================

/// Outcome of invoking a recipient's receive hook
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReceiverResponse {
    /// Hook returned a value; only `ON_TOKEN_RECEIVED` counts as acceptance
    Value(u32),
    /// Hook raised an error or is not implemented
    Reverted,
}

/// Trait for detecting contract-capable accounts and invoking their
/// receive hook
///
/// The probe runs only during the interactions phase, after all effects
/// are committed; it receives no storage handle, so a reentrant call made
/// by the recipient observes a fully consistent post-mutation state.
pub trait RecipientProbe {
    /// Check if the address is a contract-capable account
    fn is_contract(&self, address: &Address) -> bool;

    /// Ask the recipient whether it accepts receipt of the token
    fn call_on_token_received(
        &self,
        contract: &Address,
        operator: &Address,
        from: &Address,
        id: TokenId,
        data: &[u8],
    ) -> ReceiverResponse;
}

/// True iff the recipient echoed the acceptance marker
pub(crate) fn probe_accepts<P: RecipientProbe + ?Sized>(
    probe: &P,
    contract: &Address,
    operator: &Address,
    from: &Address,
    id: TokenId,
    data: &[u8],
) -> bool {
    matches!(
        probe.call_on_token_received(contract, operator, from, id, data),
        ReceiverResponse::Value(value) if value == ON_TOKEN_RECEIVED
    )
}

// ========================================
// Transfer Operation
// ========================================

/// Transfer a token to a new owner
///
/// # Parameters
/// - `storage`: Storage backend
/// - `ctx`: Runtime context (caller, block height)
/// - `from`: Current owner address
/// - `to`: New owner address
/// - `id`: Token ID
///
/// # Returns
/// - `Ok(())`: Success
/// - `Err(RegistryError)`: Error code
pub fn transfer<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    ctx: &RuntimeContext,
    from: &Address,
    to: &Address,
    id: TokenId,
) -> RegistryResult<()> {
    // Step 1: Checks
    let token = transfer_checks(storage, ctx, from, to, id)?;

    // Step 2: Effects
    apply_transfer(storage, &token, to)?;

    storage.record_event(RegistryEvent::Transfer {
        from: *from,
        to: *to,
        id,
    });
    debug!("transferred token {} from {} to {}", id, from, to);

    Ok(())
}

/// Transfer with a receiver capability probe
///
/// State is fully committed before the recipient hook runs (CEI pattern);
/// a rejecting or failing hook rolls every effect back, including the
/// cleared approved spender.
///
/// # Parameters
/// - `storage`: Storage backend
/// - `probe`: Recipient capability probe
/// - `ctx`: Runtime context
/// - `from`: Current owner address
/// - `to`: New owner address
/// - `id`: Token ID
/// - `data`: Auxiliary payload forwarded to the receive hook
///
/// # Returns
/// - `Ok(())`: Success
/// - `Err(RegistryError)`: Error code
pub fn safe_transfer<S: RegistryStorage + ?Sized, P: RecipientProbe + ?Sized>(
    storage: &mut S,
    probe: &P,
    ctx: &RuntimeContext,
    from: &Address,
    to: &Address,
    id: TokenId,
    data: &[u8],
) -> RegistryResult<()> {
    // Step 1: Checks
    let token = transfer_checks(storage, ctx, from, to, id)?;

    // Step 2: Effects, committed before the external call (CEI pattern)
    apply_transfer(storage, &token, to)?;

    // Step 3: Interactions
    if probe.is_contract(to) && !probe_accepts(probe, to, &ctx.caller, from, id, data) {
        revert_transfer(storage, &token, to)?;
        return Err(RegistryError::ReceiverRejected);
    }

    storage.record_event(RegistryEvent::Transfer {
        from: *from,
        to: *to,
        id,
    });
    debug!("safe transferred token {} from {} to {}", id, from, to);

    Ok(())
}

fn transfer_checks<S: RegistryStorage + ?Sized>(
    storage: &S,
    ctx: &RuntimeContext,
    from: &Address,
    to: &Address,
    id: TokenId,
) -> RegistryResult<Token> {
    if to.is_zero() {
        return Err(RegistryError::InvalidRecipient);
    }

    let token = storage.get_token(id).ok_or(RegistryError::TokenNotFound)?;

    // `from` must name the current owner
    if token.owner != *from {
        return Err(RegistryError::Unauthorized);
    }

    if *to == *from {
        return Err(RegistryError::SelfTransfer);
    }

    check_token_permission(storage, &token, &ctx.caller)?;

    Ok(token)
}

fn apply_transfer<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    token: &Token,
    to: &Address,
) -> RegistryResult<()> {
    let from = token.owner;

    let mut updated = token.clone();
    updated.owner = *to;
    // Security: single-token approval never survives an ownership change
    updated.clear_approval();
    storage.set_token(&updated)?;

    storage.decrement_balance(&from)?;
    storage.increment_balance(to)?;
    storage.enum_move(&from, to, token.id)?;

    Ok(())
}

/// Exact inverse of [`apply_transfer`], used when the probe rejects
///
/// Restores the pre-call record, including the approved spender. The
/// per-owner enumeration slot the id returns to may differ, which the
/// order-unspecified enumeration contract allows.
fn revert_transfer<S: RegistryStorage + ?Sized>(
    storage: &mut S,
    prior: &Token,
    to: &Address,
) -> RegistryResult<()> {
    storage.set_token(prior)?;
    storage.decrement_balance(to)?;
    storage.increment_balance(&prior.owner)?;
    storage.enum_move(to, &prior.owner, prior.id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::approve::{approve, set_approval_for_all};
    use super::super::mint::mint;
    use super::super::query::{balance_of, get_approved, owner_of};
    use super::*;
    use crate::ledger::MemoryLedger;
    use crate::types::RegistryConfig;

    fn addr(byte: u8) -> Address {
        Address::new([byte; 20])
    }

    fn setup() -> (MemoryLedger, Address) {
        let mut ledger = MemoryLedger::new(RegistryConfig::new("Books", "BOOK")).unwrap();
        let owner = addr(1);
        let ctx = RuntimeContext::new(owner, 100);
        mint(&mut ledger, &ctx, &owner, 1).unwrap();
        ledger.take_events();
        (ledger, owner)
    }

    struct MockProbe {
        contracts: std::collections::HashSet<Address>,
        accepting: std::collections::HashSet<Address>,
        wrong_marker: std::collections::HashSet<Address>,
    }

    impl MockProbe {
        fn new() -> Self {
            Self {
                contracts: std::collections::HashSet::new(),
                accepting: std::collections::HashSet::new(),
                wrong_marker: std::collections::HashSet::new(),
            }
        }

        fn add_contract(&mut self, address: Address, accepts: bool) {
            self.contracts.insert(address);
            if accepts {
                self.accepting.insert(address);
            }
        }

        fn add_wrong_marker_contract(&mut self, address: Address) {
            self.contracts.insert(address);
            self.wrong_marker.insert(address);
        }
    }

    impl RecipientProbe for MockProbe {
        fn is_contract(&self, address: &Address) -> bool {
            self.contracts.contains(address)
        }

        fn call_on_token_received(
            &self,
            contract: &Address,
            _operator: &Address,
            _from: &Address,
            _id: TokenId,
            _data: &[u8],
        ) -> ReceiverResponse {
            if self.wrong_marker.contains(contract) {
                ReceiverResponse::Value(0xdead_beef)
            } else if self.accepting.contains(contract) {
                ReceiverResponse::Value(crate::interface::ON_TOKEN_RECEIVED)
            } else {
                ReceiverResponse::Reverted
            }
        }
    }

    #[test]
    fn test_transfer_success() {
        let (mut ledger, owner) = setup();
        let recipient = addr(2);
        let ctx = RuntimeContext::new(owner, 100);

        transfer(&mut ledger, &ctx, &owner, &recipient, 1).unwrap();

        assert_eq!(owner_of(&ledger, 1), Ok(recipient));
        assert_eq!(balance_of(&ledger, &owner), Ok(0));
        assert_eq!(balance_of(&ledger, &recipient), Ok(1));
        assert_eq!(
            ledger.events(),
            &[RegistryEvent::Transfer {
                from: owner,
                to: recipient,
                id: 1
            }]
        );
    }

    #[test]
    fn test_transfer_wrong_from() {
        let (mut ledger, owner) = setup();
        let ctx = RuntimeContext::new(owner, 100);
        assert_eq!(
            transfer(&mut ledger, &ctx, &addr(7), &addr(2), 1),
            Err(RegistryError::Unauthorized)
        );
    }

    #[test]
    fn test_transfer_missing_token() {
        let (mut ledger, owner) = setup();
        let ctx = RuntimeContext::new(owner, 100);
        assert_eq!(
            transfer(&mut ledger, &ctx, &owner, &addr(2), 42),
            Err(RegistryError::TokenNotFound)
        );
    }

    #[test]
    fn test_transfer_to_zero_address() {
        let (mut ledger, owner) = setup();
        let ctx = RuntimeContext::new(owner, 100);
        assert_eq!(
            transfer(&mut ledger, &ctx, &owner, &Address::ZERO, 1),
            Err(RegistryError::InvalidRecipient)
        );
    }

    #[test]
    fn test_transfer_to_self_fails() {
        let (mut ledger, owner) = setup();
        let ctx = RuntimeContext::new(owner, 100);
        assert_eq!(
            transfer(&mut ledger, &ctx, &owner, &owner, 1),
            Err(RegistryError::SelfTransfer)
        );
    }

    #[test]
    fn test_transfer_by_stranger_fails() {
        let (mut ledger, owner) = setup();
        let stranger = addr(9);
        let ctx = RuntimeContext::new(stranger, 100);
        assert_eq!(
            transfer(&mut ledger, &ctx, &owner, &stranger, 1),
            Err(RegistryError::Unauthorized)
        );
    }

    #[test]
    fn test_transfer_by_approved_spender_once() {
        let (mut ledger, owner) = setup();
        let spender = addr(2);
        let recipient = addr(3);

        let owner_ctx = RuntimeContext::new(owner, 100);
        approve(&mut ledger, &owner_ctx, &spender, 1).unwrap();

        let spender_ctx = RuntimeContext::new(spender, 100);
        transfer(&mut ledger, &spender_ctx, &owner, &recipient, 1).unwrap();

        assert_eq!(owner_of(&ledger, 1), Ok(recipient));
        // Approval was consumed by the ownership change
        assert_eq!(get_approved(&ledger, 1), Ok(None));
        assert_eq!(
            transfer(&mut ledger, &spender_ctx, &recipient, &addr(4), 1),
            Err(RegistryError::Unauthorized)
        );
    }

    #[test]
    fn test_transfer_by_operator() {
        let (mut ledger, owner) = setup();
        let operator = addr(2);
        let recipient = addr(3);

        let owner_ctx = RuntimeContext::new(owner, 100);
        set_approval_for_all(&mut ledger, &owner_ctx, &operator, true).unwrap();

        let operator_ctx = RuntimeContext::new(operator, 100);
        transfer(&mut ledger, &operator_ctx, &owner, &recipient, 1).unwrap();
        assert_eq!(owner_of(&ledger, 1), Ok(recipient));
    }

    #[test]
    fn test_safe_transfer_to_plain_account() {
        let (mut ledger, owner) = setup();
        let recipient = addr(2);
        let ctx = RuntimeContext::new(owner, 100);
        let probe = MockProbe::new();

        safe_transfer(&mut ledger, &probe, &ctx, &owner, &recipient, 1, &[]).unwrap();
        assert_eq!(owner_of(&ledger, 1), Ok(recipient));
    }

    #[test]
    fn test_safe_transfer_to_accepting_contract() {
        let (mut ledger, owner) = setup();
        let contract = addr(5);
        let ctx = RuntimeContext::new(owner, 100);
        let mut probe = MockProbe::new();
        probe.add_contract(contract, true);

        safe_transfer(&mut ledger, &probe, &ctx, &owner, &contract, 1, b"aux").unwrap();
        assert_eq!(owner_of(&ledger, 1), Ok(contract));
    }

    #[test]
    fn test_safe_transfer_rejected_rolls_back() {
        let (mut ledger, owner) = setup();
        let spender = addr(2);
        let contract = addr(5);
        let ctx = RuntimeContext::new(owner, 100);
        approve(&mut ledger, &ctx, &spender, 1).unwrap();
        ledger.take_events();

        let mut probe = MockProbe::new();
        probe.add_contract(contract, false);

        assert_eq!(
            safe_transfer(&mut ledger, &probe, &ctx, &owner, &contract, 1, &[]),
            Err(RegistryError::ReceiverRejected)
        );

        // Pre-call state fully restored, approval included
        assert_eq!(owner_of(&ledger, 1), Ok(owner));
        assert_eq!(balance_of(&ledger, &owner), Ok(1));
        assert_eq!(balance_of(&ledger, &contract), Ok(0));
        assert_eq!(get_approved(&ledger, 1), Ok(Some(spender)));
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_safe_transfer_wrong_marker_is_rejection() {
        let (mut ledger, owner) = setup();
        let contract = addr(5);
        let ctx = RuntimeContext::new(owner, 100);
        let mut probe = MockProbe::new();
        probe.add_wrong_marker_contract(contract);

        assert_eq!(
            safe_transfer(&mut ledger, &probe, &ctx, &owner, &contract, 1, &[]),
            Err(RegistryError::ReceiverRejected)
        );
        assert_eq!(owner_of(&ledger, 1), Ok(owner));
    }
}
