// Non-Fungible Token Registry
// This crate provides a runtime-agnostic non-fungible token registry.
//
// Features:
// - Ownership, balance and approval state machine
// - Blanket operator approvals alongside single-token approvals
// - Dense enumeration over the full token set and per-owner subsets,
//   with O(1) swap-and-pop removal
// - Safe mint/transfer with a recipient capability probe; effects commit
//   before the external call and roll back fully on rejection
// - Interface capability queries for interoperating contracts
// - Metadata facet (name, symbol, base-URI derived token URIs)
//
// Module Structure:
// - error: Error codes and types
// - types: Core data structures (Address, Token, RegistryConfig)
// - events: Observable signals on committed state changes
// - interface: Capability-query identifiers and the acceptance marker
// - index: Dense reverse-indexed enumeration array
// - ledger: In-memory reference storage backend
// - operations: Core operation logic (mint, transfer, burn, approve, query)

mod error;
mod events;
mod index;
mod interface;
mod ledger;
pub mod operations;
mod types;

pub use error::*;
pub use events::*;
pub use index::*;
pub use interface::*;
pub use ledger::*;
pub use operations::*;
pub use types::*;
