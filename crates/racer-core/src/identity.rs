//! Opaque identifiers: the 20-byte caller identity and the 4-byte symbol
//! voted upon. Both compare bitwise — no case-folding or normalization.

/// A 20-byte address identifying a caller, voter, or cycle creator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct Identity(pub [u8; 20]);

impl Identity {
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<[u8; 20]> for Identity {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

/// An opaque 4-byte symbol identifier. Compared bitwise; no ordering beyond
/// insertion order into a `SymbolIndex` is ever meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol(pub [u8; 4]);

impl Symbol {
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl From<[u8; 4]> for Symbol {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}
