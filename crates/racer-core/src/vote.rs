//! # Vote Store
//!
//! Per-cycle append-only log of votes with a per-symbol secondary index.
//! Writes are append-only; the only mutable field on a placed `Vote` is
//! `claimed`, flipped exactly once by `claim_reward`.

use std::collections::HashMap;

use crate::identity::{Identity, Symbol};

/// Per-cycle monotonic index assigned at placement.
pub type VoteId = u64;

/// A single placement of a cycle's fee on a symbol by an identity at a
/// block height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct Vote {
    pub vote_id: VoteId,
    pub symbol: Symbol,
    pub placer: Identity,
    pub claimed: bool,
    pub cycle_id: u64,
    pub placed_at_block: u64,
}

/// Append-only vote log for a single cycle, plus the per-symbol secondary
/// index the Top-Three Tracker and Reward Engine read from.
#[derive(Debug, Clone, Default)]
pub struct VoteStore {
    votes: Vec<Vote>,
    by_symbol: HashMap<Symbol, Vec<VoteId>>,
}

impl VoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `vote`, indexing it by symbol. The caller is responsible for
    /// assigning a correctly monotonic `vote_id` (see `Cycle::next_vote_id`).
    pub fn append(&mut self, vote: Vote) {
        debug_assert_eq!(vote.vote_id as usize, self.votes.len());
        self.by_symbol
            .entry(vote.symbol)
            .or_default()
            .push(vote.vote_id);
        self.votes.push(vote);
    }

    pub fn get(&self, vote_id: VoteId) -> Option<&Vote> {
        self.votes.get(vote_id as usize)
    }

    pub fn get_mut(&mut self, vote_id: VoteId) -> Option<&mut Vote> {
        self.votes.get_mut(vote_id as usize)
    }

    pub fn votes_for_symbol(&self, symbol: Symbol) -> &[VoteId] {
        self.by_symbol.get(&symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn symbol_vote_count(&self, symbol: Symbol) -> u64 {
        self.by_symbol.get(&symbol).map(Vec::len).unwrap_or(0) as u64
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}
