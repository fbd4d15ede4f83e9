// Token Registry - Interface Registry
// Capability-query identifiers and the receiver acceptance marker.
//
// Interface identifiers are the standard 4-byte selectors carried as u32.
// The supported set is closed: the query facet itself, the base token
// facet, the metadata facet and the enumeration facet. Unknown identifiers
// answer false and never fail.

/// 4-byte interface identifier carried as a u32
pub type InterfaceId = u32;

/// The capability-query protocol itself (ERC-165)
pub const INTERFACE_CAPABILITY_QUERY: InterfaceId = 0x01ff_c9a7;

/// Base token facet: ownership, approvals, transfers (ERC-721)
pub const INTERFACE_TOKEN: InterfaceId = 0x80ac_58cd;

/// Metadata facet: name, symbol, token URI
pub const INTERFACE_METADATA: InterfaceId = 0x5b5e_139f;

/// Enumeration facet: total supply and index queries
pub const INTERFACE_ENUMERATION: InterfaceId = 0x780e_9d63;

/// Acceptance marker a contract-capable recipient must echo from its
/// receive hook for a safe transfer to complete
pub const ON_TOKEN_RECEIVED: u32 = 0x150b_7a02;

/// Answer a capability query
pub fn supports_interface(interface_id: InterfaceId) -> bool {
    matches!(
        interface_id,
        INTERFACE_CAPABILITY_QUERY | INTERFACE_TOKEN | INTERFACE_METADATA | INTERFACE_ENUMERATION
    )
}
