// Token Registry - Core Types
// This module defines the data structures shared by all registry operations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Token identifier, unique within the registry
pub type TokenId = u64;

// ========================================
// Protocol Constants
// ========================================

/// Maximum collection name length (bytes)
pub const MAX_NAME_LENGTH: usize = 64;

/// Maximum symbol length (bytes)
pub const MAX_SYMBOL_LENGTH: usize = 8;

/// Maximum base URI length (bytes)
pub const MAX_BASE_URI_LENGTH: usize = 256;

// ========================================
// Address
// ========================================

/// Opaque 20-byte account identifier
///
/// The all-zero value is the none-sentinel: it is never a valid owner,
/// recipient, spender or operator. Mint signals use it as the origin and
/// burn signals as the destination.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(#[serde(with = "hex")] [u8; 20]);

impl Address {
    /// The none-sentinel
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create an address from raw bytes
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Whether this is the none-sentinel
    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Raw bytes of the address
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

// ========================================
// Token
// ========================================

/// A single non-fungible token record
///
/// A token exists iff its record is present in storage; there is no
/// zero-owner resident state. The approved spender travels with the record
/// and is cleared on every ownership change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token identifier
    pub id: TokenId,

    /// Current owner
    pub owner: Address,

    /// Single token approval (auto-cleared on transfer/burn)
    pub approved: Option<Address>,

    /// Block height at mint
    pub created_at: u64,
}

impl Token {
    /// Create a freshly minted token record
    pub fn new(id: TokenId, owner: Address, created_at: u64) -> Self {
        Self {
            id,
            owner,
            approved: None,
            created_at,
        }
    }

    /// Clear approval (called on ownership change)
    pub fn clear_approval(&mut self) {
        self.approved = None;
    }
}

// ========================================
// Registry Configuration
// ========================================

/// Whether a burned token id may be minted again
///
/// The protocol does not pin this down, so it is an explicit deployment
/// choice rather than inferred behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemintPolicy {
    /// A burned id may be minted again with fresh state
    #[default]
    Allow,

    /// A burned id is retired forever
    Forbid,
}

/// Registry-wide configuration, fixed at creation
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Collection name (max 64 bytes)
    pub name: String,

    /// Symbol (max 8 bytes)
    pub symbol: String,

    /// Base URI for token metadata (max 256 bytes); token URI is the base
    /// followed by the decimal token id, empty base yields empty URIs
    pub base_uri: String,

    /// Re-mint policy for burned ids
    pub remint: RemintPolicy,
}

impl RegistryConfig {
    /// Create a configuration with the default re-mint policy and no base URI
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            base_uri: String::new(),
            remint: RemintPolicy::default(),
        }
    }

    /// Set the metadata base URI
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    /// Set the re-mint policy
    pub fn with_remint(mut self, remint: RemintPolicy) -> Self {
        self.remint = remint;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.name.len() > MAX_NAME_LENGTH {
            return Err(RegistryError::NameTooLong);
        }
        if self.symbol.len() > MAX_SYMBOL_LENGTH {
            return Err(RegistryError::SymbolTooLong);
        }
        if self.base_uri.len() > MAX_BASE_URI_LENGTH {
            return Err(RegistryError::UriTooLong);
        }
        Ok(())
    }
}
