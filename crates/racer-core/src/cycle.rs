//! # Cycle Registry
//!
//! A Cycle is created once, accepts votes while `start <= now <= end`, and
//! thereafter is claim-only, indefinitely. Ids are dense, assigned from a
//! monotonic counter starting at 0. Each entry holds its own `SymbolIndex`,
//! `VoteStore`, and `TopThree` alongside the descriptor fields.

use std::collections::HashMap;

use crate::errors::{CoreResult, RacerError};
use crate::identity::{Identity, Symbol};
use crate::symbol_index::SymbolIndex;
use crate::top_three::TopThree;
use crate::vote::VoteStore;

/// Dense, monotonically-allocated cycle id.
pub type CycleId = u64;

/// Cycle descriptor plus its owned per-cycle state (Symbol Index, Vote
/// Store, Top-Three Tracker). Every cycle's state lives here; cycles are
/// never destroyed.
#[derive(Debug, Clone)]
pub struct Cycle {
    pub id: CycleId,
    pub start_block: u64,
    pub end_block: u64,
    pub vote_price: u128,
    pub creator: Identity,
    pub next_vote_id: u64,
    pub balance: u128,
    pub symbols: SymbolIndex,
    pub votes: VoteStore,
    pub top_three: TopThree,
}

impl Cycle {
    pub fn is_voting_open(&self, now: u64) -> bool {
        self.start_block <= now && now <= self.end_block
    }

    pub fn has_ended(&self, now: u64) -> bool {
        now > self.end_block
    }

    /// Resolves a `TopThree` slot to its symbol. `None` on a cycle with no
    /// votes ever placed, where `top_three` still holds its all-zero
    /// default and `symbols` is empty.
    pub fn top_three_symbol(&self, pos: usize) -> Option<Symbol> {
        self.symbols.get(pos)
    }
}

/// Map of cycle id -> cycle, plus the monotone id allocator.
#[derive(Debug, Clone, Default)]
pub struct CycleRegistry {
    cycles: HashMap<CycleId, Cycle>,
    next_id: CycleId,
}

impl CycleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new cycle. `price` must be strictly positive and
    /// `start + length` must not overflow `u64`.
    pub fn create(
        &mut self,
        start: u64,
        length: u64,
        price: u128,
        creator: Identity,
    ) -> CoreResult<CycleId> {
        if price == 0 {
            return Err(RacerError::InvalidVotePrice);
        }
        let end = start
            .checked_add(length)
            .ok_or(RacerError::ArithmeticOverflow)?;

        let id = self.next_id;
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(RacerError::ArithmeticOverflow)?;

        self.cycles.insert(
            id,
            Cycle {
                id,
                start_block: start,
                end_block: end,
                vote_price: price,
                creator,
                next_vote_id: 0,
                balance: 0,
                symbols: SymbolIndex::new(),
                votes: VoteStore::new(),
                top_three: TopThree::default(),
            },
        );
        Ok(id)
    }

    pub fn get(&self, id: CycleId) -> CoreResult<&Cycle> {
        self.cycles.get(&id).ok_or(RacerError::CycleDoesntExist(id))
    }

    pub fn get_mut(&mut self, id: CycleId) -> CoreResult<&mut Cycle> {
        self.cycles
            .get_mut(&id)
            .ok_or(RacerError::CycleDoesntExist(id))
    }

    pub fn contains(&self, id: CycleId) -> bool {
        self.cycles.contains_key(&id)
    }
}
