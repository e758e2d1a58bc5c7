//! # Market Controller
//!
//! Public surface: `create_cycle`, `place_vote`, `claim_reward`,
//! `batch_claim_reward`, `is_claim_available`, plus read-only queries.
//! Enforces lifecycle, fees, re-entrancy, and late-vote reassignment.
//! Every mutating method either fully applies or fully errors with no
//! partial mutation and no event.

use tracing::{debug, warn};

use crate::cycle::{Cycle, CycleId, CycleRegistry};
use crate::errors::{CoreResult, RacerError};
use crate::env::MarketEnv;
use crate::events::{CycleCreated, Outcome, VoteClaimed, VotePlaced};
use crate::identity::{Identity, Symbol};
use crate::reentrancy::{ReentrancyGuard, ReentrancyLock};
use crate::reward::{calculate_reward, place_of, timeliness};
use crate::top_three::TopThree;
use crate::vote::{Vote, VoteId};

/// Timeliness threshold above which a place-1 vote's reward is reassigned
/// to the cycle creator (2/3).
const PLACE_1_LATE_NUM: u64 = 2;
const PLACE_1_LATE_DEN: u64 = 3;
/// Timeliness threshold above which a place-2 vote's reward is reassigned
/// to the cycle creator (1/3).
const PLACE_2_LATE_NUM: u64 = 1;
const PLACE_2_LATE_DEN: u64 = 3;

/// A per-cycle, per-symbol view of how many votes a symbol has drawn and
/// where it first appeared. Computed on demand from the Symbol Index and
/// Vote Store rather than stored redundantly, so it can never drift from
/// the vote count it reports (`|votes_of(c, s)| == vote_count`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolStats {
    pub insertion_index: usize,
    pub vote_count: u64,
    pub vote_ids: Vec<VoteId>,
}

/// The market state machine: every cycle ever created, plus the single
/// reentrancy lock guarding value-transferring operations.
#[derive(Debug, Default)]
pub struct MarketController {
    registry: CycleRegistry,
    claim_lock: ReentrancyLock,
}

impl MarketController {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Mutating operations
    // ========================================================================

    pub fn create_cycle(
        &mut self,
        env: &impl MarketEnv,
        start: u64,
        length: u64,
        price: u128,
    ) -> CoreResult<Outcome<CycleId, CycleCreated>> {
        let creator = env.caller();
        let id = self.registry.create(start, length, price, creator)?;
        debug!(cycle = id, start, length, price = %price, "cycle created");
        Ok(Outcome::new(
            id,
            CycleCreated {
                creator,
                id,
                start_block: start,
                block_length: length,
                vote_price: price,
            },
        ))
    }

    pub fn place_vote(
        &mut self,
        env: &impl MarketEnv,
        cycle_id: CycleId,
        symbol: Symbol,
    ) -> CoreResult<Outcome<VoteId, VotePlaced>> {
        let now = env.now();
        let placer = env.caller();
        let value = env.value_in();

        let cycle = self.registry.get_mut(cycle_id)?;
        if !cycle.is_voting_open(now) {
            return Err(RacerError::CycleVotingUnavailable(cycle_id));
        }
        if value != cycle.vote_price {
            return Err(RacerError::InvalidVoteFee(cycle.vote_price));
        }

        let vote_id = cycle.next_vote_id;
        cycle.next_vote_id = cycle
            .next_vote_id
            .checked_add(1)
            .ok_or(RacerError::ArithmeticOverflow)?;
        cycle.balance = cycle
            .balance
            .checked_add(cycle.vote_price)
            .ok_or(RacerError::ArithmeticOverflow)?;

        cycle.symbols.insert(symbol);
        cycle.votes.append(Vote {
            vote_id,
            symbol,
            placer,
            claimed: false,
            cycle_id,
            placed_at_block: now,
        });

        recompute_top_three(cycle);

        debug!(cycle = cycle_id, vote = vote_id, ?symbol, "vote placed");
        Ok(Outcome::new(
            vote_id,
            VotePlaced {
                placer,
                cycle_id,
                symbol,
                vote_id,
            },
        ))
    }

    /// Re-entrancy-guarded. Validates, computes the reward, deducts it from
    /// the cycle balance (saturating at zero), marks `claimed` before
    /// transferring (checks-effects-interactions), and transfers the
    /// reward to the caller.
    pub fn claim_reward(
        &mut self,
        env: &mut impl MarketEnv,
        cycle_id: CycleId,
        vote_id: VoteId,
    ) -> CoreResult<Outcome<u128, VoteClaimed>> {
        let _guard = ReentrancyGuard::enter(&mut self.claim_lock)?;
        claim_reward_locked(&mut self.registry, env, cycle_id, vote_id)
    }

    /// Re-entrancy-guarded once for the whole batch. Applies `claim_reward`
    /// semantics per id, in order, stopping at the first error. Votes
    /// claimed earlier in the same batch call remain claimed and paid —
    /// their transfers already reached the environment and cannot be
    /// recalled — see DESIGN.md for the full rationale.
    pub fn batch_claim_reward(
        &mut self,
        env: &mut impl MarketEnv,
        cycle_id: CycleId,
        vote_ids: &[VoteId],
    ) -> CoreResult<Vec<Outcome<(VoteId, u128), VoteClaimed>>> {
        let _guard = ReentrancyGuard::enter(&mut self.claim_lock)?;
        let mut results = Vec::with_capacity(vote_ids.len());
        for &vote_id in vote_ids {
            let outcome = claim_reward_locked(&mut self.registry, env, cycle_id, vote_id)?;
            results.push(Outcome::new((vote_id, outcome.value), outcome.event));
        }
        Ok(results)
    }

    // ========================================================================
    // Read-only queries
    // ========================================================================

    pub fn get_cycle(&self, cycle_id: CycleId) -> CoreResult<&Cycle> {
        self.registry.get(cycle_id)
    }

    pub fn cycle_exists(&self, cycle_id: CycleId) -> bool {
        self.registry.contains(cycle_id)
    }

    pub fn vote(&self, cycle_id: CycleId, vote_id: VoteId) -> CoreResult<&Vote> {
        let cycle = self.registry.get(cycle_id)?;
        cycle
            .votes
            .get(vote_id)
            .ok_or(RacerError::VoteDoesntExist(vote_id))
    }

    pub fn symbol_vote_count(&self, cycle_id: CycleId, symbol: Symbol) -> CoreResult<u64> {
        let cycle = self.registry.get(cycle_id)?;
        Ok(cycle.votes.symbol_vote_count(symbol))
    }

    pub fn symbol_stats(&self, cycle_id: CycleId, symbol: Symbol) -> CoreResult<Option<SymbolStats>> {
        let cycle = self.registry.get(cycle_id)?;
        Ok(cycle.symbols.position_of(symbol).map(|insertion_index| {
            let vote_ids = cycle.votes.votes_for_symbol(symbol).to_vec();
            SymbolStats {
                insertion_index,
                vote_count: vote_ids.len() as u64,
                vote_ids,
            }
        }))
    }

    pub fn votes_for_symbol(&self, cycle_id: CycleId, symbol: Symbol) -> CoreResult<Vec<VoteId>> {
        let cycle = self.registry.get(cycle_id)?;
        Ok(cycle.votes.votes_for_symbol(symbol).to_vec())
    }

    pub fn total_vote_count(&self, cycle_id: CycleId) -> CoreResult<u64> {
        let cycle = self.registry.get(cycle_id)?;
        Ok(cycle.next_vote_id)
    }

    pub fn cycle_balance(&self, cycle_id: CycleId) -> CoreResult<u128> {
        let cycle = self.registry.get(cycle_id)?;
        Ok(cycle.balance)
    }

    /// Errors with `CycleHasNoVotes` rather than panicking on a cycle where
    /// no vote has ever been placed, since `top_three` then has no symbol to
    /// resolve its default positions against.
    pub fn top_three_symbols(&self, cycle_id: CycleId) -> CoreResult<[Symbol; 3]> {
        let cycle = self.registry.get(cycle_id)?;
        let tt = cycle.top_three;
        let resolve = |pos| cycle.top_three_symbol(pos).ok_or(RacerError::CycleHasNoVotes(cycle_id));
        Ok([resolve(tt.p0)?, resolve(tt.p1)?, resolve(tt.p2)?])
    }

    pub fn is_voting_open(&self, cycle_id: CycleId, now: u64) -> CoreResult<bool> {
        Ok(self.registry.get(cycle_id)?.is_voting_open(now))
    }

    pub fn is_ended(&self, cycle_id: CycleId, now: u64) -> CoreResult<bool> {
        Ok(self.registry.get(cycle_id)?.has_ended(now))
    }

    /// Read-only projection of `calculate_reward`; agrees bit-for-bit with
    /// the amount a subsequent `claim_reward` on the same vote would
    /// transfer, as long as no intervening claim on the same cycle changes
    /// `balance`.
    pub fn preview_reward(&self, cycle_id: CycleId, vote_id: VoteId) -> CoreResult<u128> {
        let cycle = self.registry.get(cycle_id)?;
        calculate_reward(cycle, vote_id)
    }

    /// `true` only if the cycle and vote exist, the cycle has ended, the
    /// vote is not already claimed, its symbol is in the top three, and
    /// `env.caller()` passes the late-vote rule for this vote. Never errors —
    /// any missing precondition simply yields `false`.
    pub fn is_claim_available(
        &self,
        env: &impl MarketEnv,
        cycle_id: CycleId,
        vote_id: VoteId,
    ) -> bool {
        let Ok(cycle) = self.registry.get(cycle_id) else {
            return false;
        };
        let now = env.now();
        if !cycle.has_ended(now) {
            return false;
        }
        let Some(vote) = cycle.votes.get(vote_id) else {
            return false;
        };
        if vote.claimed {
            return false;
        }
        let Some(place) = place_of(cycle, vote.symbol) else {
            return false;
        };
        let Ok(t) = timeliness(cycle, vote) else {
            return false;
        };
        let Ok(required) = required_claimant(cycle, vote, place, t) else {
            return false;
        };
        env.caller() == required
    }
}

fn recompute_top_three(cycle: &mut Cycle) {
    cycle.top_three = TopThree::recompute(&cycle.symbols, |pos| {
        let s = cycle.symbols.get(pos).expect("position within bounds");
        cycle.votes.symbol_vote_count(s)
    });
}

/// The late-vote rule: place-0 votes are always claimable by their placer
/// regardless of timeliness. Place-1 votes past `t >= 2/3`, and place-2
/// votes past `t >= 1/3`, are claimable only by the cycle creator.
fn required_claimant(
    cycle: &Cycle,
    vote: &Vote,
    place: u8,
    t: crate::fixed_point::Fp6464,
) -> CoreResult<Identity> {
    use crate::fixed_point::Fp6464;

    let late = match place {
        0 => false,
        1 => t >= Fp6464::divu(PLACE_1_LATE_NUM, PLACE_1_LATE_DEN)?,
        2 => t >= Fp6464::divu(PLACE_2_LATE_NUM, PLACE_2_LATE_DEN)?,
        _ => return Err(RacerError::VoteNotInTopThree),
    };
    Ok(if late { cycle.creator } else { vote.placer })
}

fn claim_reward_locked(
    registry: &mut CycleRegistry,
    env: &mut impl MarketEnv,
    cycle_id: CycleId,
    vote_id: VoteId,
) -> CoreResult<Outcome<u128, VoteClaimed>> {
    let now = env.now();
    let caller = env.caller();

    let cycle = registry.get_mut(cycle_id)?;
    let vote: Vote = *cycle
        .votes
        .get(vote_id)
        .ok_or(RacerError::VoteDoesntExist(vote_id))?;
    if !cycle.has_ended(now) {
        return Err(RacerError::CycleDidntEnd(cycle_id));
    }
    if vote.claimed {
        return Err(RacerError::VoteAlreadyClaimed);
    }

    let place = place_of(cycle, vote.symbol).ok_or(RacerError::VoteNotInTopThree)?;
    let t = timeliness(cycle, &vote)?;
    let required = required_claimant(cycle, &vote, place, t)?;
    if caller != required {
        return Err(RacerError::VoteNotPlacedByCaller(vote_id, caller));
    }

    let reward = calculate_reward(cycle, vote_id)?;
    let balance_before = cycle.balance;

    cycle.balance = cycle.balance.saturating_sub(reward);
    cycle
        .votes
        .get_mut(vote_id)
        .expect("vote existence already checked above")
        .claimed = true;

    if env.transfer(caller, reward).is_err() {
        warn!(cycle = cycle_id, vote = vote_id, "reward transfer failed");
        // Roll back the checks-effects-interactions mutations: a transfer
        // failure must abort the whole operation with no partial state,
        // not just skip the payout.
        let cycle = registry.get_mut(cycle_id).expect("cycle existed moments ago");
        cycle.balance = balance_before;
        cycle
            .votes
            .get_mut(vote_id)
            .expect("vote existed moments ago")
            .claimed = false;
        return Err(RacerError::TransferFailed);
    }

    debug!(cycle = cycle_id, vote = vote_id, reward, "claim resolved");
    Ok(Outcome::new(
        reward,
        VoteClaimed {
            claimer: caller,
            cycle_id,
            symbol: vote.symbol,
            amount: reward,
        },
    ))
}
