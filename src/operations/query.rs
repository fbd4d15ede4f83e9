// Registry Query Operations
// This module contains read-only query functions: ownership, balances,
// approvals, enumeration and the metadata facet.

use crate::error::{RegistryError, RegistryResult};
use crate::types::{Address, TokenId};

use super::RegistryStorage;

// ========================================
// Ownership Queries
// ========================================

/// Get the owner of a token
///
/// # Returns
/// - `Ok(Address)`: Current owner
/// - `Err(RegistryError)`: `TokenNotFound` if the token does not exist
pub fn owner_of<S: RegistryStorage + ?Sized>(storage: &S, id: TokenId) -> RegistryResult<Address> {
    let token = storage.get_token(id).ok_or(RegistryError::TokenNotFound)?;
    Ok(token.owner)
}

/// Check if a token exists
pub fn exists<S: RegistryStorage + ?Sized>(storage: &S, id: TokenId) -> bool {
    storage.token_exists(id)
}

/// Get the number of tokens owned by an account
///
/// Returns 0 for accounts that never held a token; the zero sentinel is
/// not a queryable account.
pub fn balance_of<S: RegistryStorage + ?Sized>(
    storage: &S,
    owner: &Address,
) -> RegistryResult<u64> {
    if owner.is_zero() {
        return Err(RegistryError::InvalidAccount);
    }
    Ok(storage.get_balance(owner))
}

// ========================================
// Approval Queries
// ========================================

/// Get the approved spender of a token, if any
///
/// # Returns
/// - `Ok(Option<Address>)`: Approved spender, `None` when unset
/// - `Err(RegistryError)`: `TokenNotFound` if the token does not exist
pub fn get_approved<S: RegistryStorage + ?Sized>(
    storage: &S,
    id: TokenId,
) -> RegistryResult<Option<Address>> {
    let token = storage.get_token(id).ok_or(RegistryError::TokenNotFound)?;
    Ok(token.approved)
}

/// Check blanket operator delegation
pub fn is_approved_for_all<S: RegistryStorage + ?Sized>(
    storage: &S,
    owner: &Address,
    operator: &Address,
) -> bool {
    storage.is_approved_for_all(owner, operator)
}

// ========================================
// Enumeration Queries
// ========================================

/// Number of existing tokens; O(1)
pub fn total_supply<S: RegistryStorage + ?Sized>(storage: &S) -> u64 {
    storage.total_supply()
}

/// Token id at a position in the global enumeration
///
/// Order is not insertion order after any removal; only density and
/// set-membership are guaranteed.
pub fn token_by_index<S: RegistryStorage + ?Sized>(
    storage: &S,
    index: u64,
) -> RegistryResult<TokenId> {
    storage
        .token_by_index(index)
        .ok_or(RegistryError::IndexOutOfBounds)
}

/// Token id at a position in an owner's enumeration
pub fn token_of_owner_by_index<S: RegistryStorage + ?Sized>(
    storage: &S,
    owner: &Address,
    index: u64,
) -> RegistryResult<TokenId> {
    storage
        .token_of_owner_by_index(owner, index)
        .ok_or(RegistryError::IndexOutOfBounds)
}

// ========================================
// Metadata Queries
// ========================================

/// Collection name
pub fn name<S: RegistryStorage + ?Sized>(storage: &S) -> String {
    storage.config().name
}

/// Collection symbol
pub fn symbol<S: RegistryStorage + ?Sized>(storage: &S) -> String {
    storage.config().symbol
}

/// Metadata URI of a token: base URI followed by the decimal id
///
/// An empty base URI yields an empty URI.
///
/// # Returns
/// - `Ok(String)`: Token URI
/// - `Err(RegistryError)`: `TokenNotFound` if the token does not exist
pub fn token_uri<S: RegistryStorage + ?Sized>(storage: &S, id: TokenId) -> RegistryResult<String> {
    if !storage.token_exists(id) {
        return Err(RegistryError::TokenNotFound);
    }
    let config = storage.config();
    if config.base_uri.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("{}{}", config.base_uri, id))
}

#[cfg(test)]
mod tests {
    use super::super::mint::mint;
    use super::super::RuntimeContext;
    use super::*;
    use crate::ledger::MemoryLedger;
    use crate::types::RegistryConfig;

    fn addr(byte: u8) -> Address {
        Address::new([byte; 20])
    }

    fn ledger_with_base(base_uri: &str) -> MemoryLedger {
        let config = RegistryConfig::new("Books", "BOOK").with_base_uri(base_uri);
        MemoryLedger::new(config).unwrap()
    }

    #[test]
    fn test_owner_of_missing() {
        let ledger = ledger_with_base("");
        assert_eq!(owner_of(&ledger, 1), Err(RegistryError::TokenNotFound));
    }

    #[test]
    fn test_balance_of_unknown_account_is_zero() {
        let ledger = ledger_with_base("");
        assert_eq!(balance_of(&ledger, &addr(9)), Ok(0));
    }

    #[test]
    fn test_balance_of_zero_address() {
        let ledger = ledger_with_base("");
        assert_eq!(
            balance_of(&ledger, &Address::ZERO),
            Err(RegistryError::InvalidAccount)
        );
    }

    #[test]
    fn test_enumeration_bounds() {
        let mut ledger = ledger_with_base("");
        let owner = addr(1);
        let ctx = RuntimeContext::new(owner, 100);
        mint(&mut ledger, &ctx, &owner, 10).unwrap();

        assert_eq!(token_by_index(&ledger, 0), Ok(10));
        assert_eq!(
            token_by_index(&ledger, 1),
            Err(RegistryError::IndexOutOfBounds)
        );
        assert_eq!(token_of_owner_by_index(&ledger, &owner, 0), Ok(10));
        assert_eq!(
            token_of_owner_by_index(&ledger, &owner, 1),
            Err(RegistryError::IndexOutOfBounds)
        );
        // An owner with no tokens has an empty enumeration
        assert_eq!(
            token_of_owner_by_index(&ledger, &addr(9), 0),
            Err(RegistryError::IndexOutOfBounds)
        );
    }

    #[test]
    fn test_metadata_facet() {
        let mut ledger = ledger_with_base("https://books.example/");
        let owner = addr(1);
        let ctx = RuntimeContext::new(owner, 100);
        mint(&mut ledger, &ctx, &owner, 7).unwrap();

        assert_eq!(name(&ledger), "Books");
        assert_eq!(symbol(&ledger), "BOOK");
        assert_eq!(token_uri(&ledger, 7), Ok("https://books.example/7".into()));
        assert_eq!(token_uri(&ledger, 8), Err(RegistryError::TokenNotFound));
    }

    #[test]
    fn test_token_uri_without_base() {
        let mut ledger = ledger_with_base("");
        let owner = addr(1);
        let ctx = RuntimeContext::new(owner, 100);
        mint(&mut ledger, &ctx, &owner, 7).unwrap();

        assert_eq!(token_uri(&ledger, 7), Ok(String::new()));
    }
}
