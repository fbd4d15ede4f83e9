// Token Registry - Error Codes
// This module defines all error codes for registry operations.
//
// Error Code Ranges:
// - 0: Success
// - 100-199: Token errors
// - 200-299: Permission errors
// - 300-399: Input validation errors
// - 400-499: Enumeration errors
// - 500-599: Operation errors
// - 600-699: Safe transfer errors
// - 900-999: System errors

use thiserror::Error;

/// Registry operation result type
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry error type with numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[repr(u64)]
pub enum RegistryError {
    // ========================================
    // Token errors (100-199)
    // ========================================
    #[error("Token not found")]
    TokenNotFound = 100,

    #[error("Token already exists")]
    TokenAlreadyExists = 101,

    #[error("Token id was burned and cannot be minted again")]
    TokenRetired = 102,

    // ========================================
    // Permission errors (200-299)
    // ========================================
    #[error("Caller is not owner, approved spender or operator")]
    Unauthorized = 200,

    // ========================================
    // Input validation errors (300-399)
    // ========================================
    #[error("Recipient is the zero address")]
    InvalidRecipient = 300,

    #[error("Account is the zero address")]
    InvalidAccount = 301,

    #[error("Name too long")]
    NameTooLong = 302,

    #[error("Symbol too long")]
    SymbolTooLong = 303,

    #[error("URI too long")]
    UriTooLong = 304,

    // ========================================
    // Enumeration errors (400-499)
    // ========================================
    #[error("Index out of bounds")]
    IndexOutOfBounds = 400,

    // ========================================
    // Operation errors (500-599)
    // ========================================
    #[error("Self approval not allowed")]
    SelfApproval = 500,

    #[error("Self transfer not allowed")]
    SelfTransfer = 501,

    // ========================================
    // Safe transfer errors (600-699)
    // ========================================
    #[error("Receiver rejected the token")]
    ReceiverRejected = 600,

    // ========================================
    // System errors (900-999)
    // ========================================
    #[error("Arithmetic overflow")]
    Overflow = 900,

    #[error("Storage error")]
    StorageError = 901,
}

impl RegistryError {
    /// Get the numeric error code
    #[inline]
    pub fn code(&self) -> u64 {
        *self as u64
    }

    /// Create error from numeric code
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            100 => Some(Self::TokenNotFound),
            101 => Some(Self::TokenAlreadyExists),
            102 => Some(Self::TokenRetired),
            200 => Some(Self::Unauthorized),
            300 => Some(Self::InvalidRecipient),
            301 => Some(Self::InvalidAccount),
            302 => Some(Self::NameTooLong),
            303 => Some(Self::SymbolTooLong),
            304 => Some(Self::UriTooLong),
            400 => Some(Self::IndexOutOfBounds),
            500 => Some(Self::SelfApproval),
            501 => Some(Self::SelfTransfer),
            600 => Some(Self::ReceiverRejected),
            900 => Some(Self::Overflow),
            901 => Some(Self::StorageError),
            _ => None,
        }
    }
}
