// Token Registry - Signals
// Observable signals emitted on committed state changes.

use serde::{Deserialize, Serialize};

use crate::types::{Address, TokenId};

/// Signal emitted by a committed registry operation
///
/// Mint and burn reuse the `Transfer` shape with the zero address as the
/// origin and destination respectively. Signals are recorded only after an
/// operation has fully committed; a rolled-back call leaves no signal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// Ownership changed (mint, transfer or burn)
    Transfer {
        /// Previous owner, zero for mint
        from: Address,
        /// New owner, zero for burn
        to: Address,
        /// Token identifier
        id: TokenId,
    },

    /// Single-token approval set
    Approval {
        /// Token owner
        owner: Address,
        /// Approved spender
        spender: Address,
        /// Token identifier
        id: TokenId,
    },

    /// Blanket operator delegation changed
    ApprovalForAll {
        /// Granting owner
        owner: Address,
        /// Operator account
        operator: Address,
        /// New delegation flag
        approved: bool,
    },
}
