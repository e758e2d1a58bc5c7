//! # Event Definitions
//!
//! Struct-per-event: plain values returned from the Controller's mutating
//! methods, never pushed to a transport directly. Transport and indexing
//! are out of scope for this core; the event *values* themselves are still
//! part of its contract.

use crate::cycle::CycleId;
use crate::identity::{Identity, Symbol};
use crate::vote::VoteId;

/// Emitted by `create_cycle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleCreated {
    pub creator: Identity,
    pub id: CycleId,
    pub start_block: u64,
    pub block_length: u64,
    pub vote_price: u128,
}

/// Emitted by `place_vote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct VotePlaced {
    pub placer: Identity,
    pub cycle_id: CycleId,
    pub symbol: Symbol,
    pub vote_id: VoteId,
}

/// Emitted by `claim_reward`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct VoteClaimed {
    pub claimer: Identity,
    pub cycle_id: CycleId,
    pub symbol: Symbol,
    pub amount: u128,
}

/// Pairs a mutating method's return value with the event it produced.
/// Every `MarketController` mutator returns `CoreResult<Outcome<T, E>>`
/// rather than pushing its event to a transport — transport and indexing
/// are the environment's job, not the core's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome<T, E> {
    pub value: T,
    pub event: E,
}

impl<T, E> Outcome<T, E> {
    pub fn new(value: T, event: E) -> Self {
        Self { value, event }
    }
}
