//! # Reward Engine
//!
//! Computes timeliness, per-place curve points, base reward, normalization
//! factor, and the final per-vote reward, entirely in FP64.64. Pure over
//! post-expiry state: identical `(cycle, vote)` state always yields an
//! identical reward, which is what lets `claim_reward` and the read-only
//! `preview_reward` query agree bit-for-bit.

use crate::cycle::Cycle;
use crate::errors::{CoreResult, RacerError};
use crate::fixed_point::Fp6464;
use crate::identity::Symbol;
use crate::top_three::TopThree;
use crate::vote::{Vote, VoteId};

/// A vote's rank within `(p0, p1, p2)`, or `None` if its symbol is outside
/// the top three.
pub fn place_of(cycle: &Cycle, symbol: Symbol) -> Option<u8> {
    let pos = cycle.symbols.position_of(symbol)?;
    let tt = cycle.top_three;
    if pos == tt.p0 {
        Some(0)
    } else if pos == tt.p1 {
        Some(1)
    } else if pos == tt.p2 {
        Some(2)
    } else {
        None
    }
}

/// `t(v) = (placed_at_block - start_block) / (end_block - start_block)`.
pub fn timeliness(cycle: &Cycle, vote: &Vote) -> CoreResult<Fp6464> {
    let numerator = vote
        .placed_at_block
        .checked_sub(cycle.start_block)
        .ok_or(RacerError::ArithmeticOverflow)?;
    let denominator = cycle
        .end_block
        .checked_sub(cycle.start_block)
        .ok_or(RacerError::ArithmeticOverflow)?;
    Fp6464::divu(numerator, denominator)
}

/// `φ(v, place)`, the per-place quadratic curve point.
///
/// - place 0: `(t - 1)^2`
/// - place 1: `(t/2 - 1/2)^2`
/// - place 2: `(t/3 - 1/3)^2`
pub fn curve_point(t: Fp6464, place: u8) -> CoreResult<Fp6464> {
    let one = Fp6464::from_uint(1)?;
    match place {
        0 => {
            let x = t.sub(one)?;
            x.mul(x)
        }
        1 => {
            let two = Fp6464::from_uint(2)?;
            let half = one.div(two)?;
            let x = t.div(two)?.sub(half)?;
            x.mul(x)
        }
        2 => {
            let three = Fp6464::from_uint(3)?;
            let third = one.div(three)?;
            let x = t.div(three)?.sub(third)?;
            x.mul(x)
        }
        _ => Err(RacerError::VoteNotInTopThree),
    }
}

/// `B(c) = balance / next_vote_id`. The caller must ensure
/// `next_vote_id > 0` (the engine is never invoked otherwise); dividing by
/// zero here surfaces as `DivByZero` rather than a panic.
pub fn base_reward(cycle: &Cycle) -> CoreResult<Fp6464> {
    let balance: u64 = cycle.balance.try_into().map_err(|_| RacerError::Overflow)?;
    Fp6464::divu(balance, cycle.next_vote_id)
}

/// Sums `φ(v, place)` over every vote cast for `symbol`.
fn sum_curve_for_symbol(cycle: &Cycle, symbol: Symbol, place: u8) -> CoreResult<Fp6464> {
    let mut total = Fp6464::ZERO;
    for &vote_id in cycle.votes.votes_for_symbol(symbol) {
        let vote = cycle
            .votes
            .get(vote_id)
            .ok_or(RacerError::VoteDoesntExist(vote_id))?;
        let t = timeliness(cycle, vote)?;
        total = total.add(curve_point(t, place)?)?;
    }
    Ok(total)
}

/// `N(c)`, the normalization factor: the reciprocal of the per-vote average
/// curve-point across the top-three voters. The third term is added iff
/// `p2 != p0` (not `p2 != p1`) — a deliberate anti-double-count rule for the
/// all-aliased case; see the Q1 resolution in DESIGN.md.
pub fn normalization_factor(cycle: &Cycle) -> CoreResult<Fp6464> {
    let tt: TopThree = cycle.top_three;
    let symbol_at = |pos| {
        cycle
            .top_three_symbol(pos)
            .ok_or(RacerError::CycleHasNoVotes(cycle.id))
    };

    let mut s = sum_curve_for_symbol(cycle, symbol_at(tt.p0)?, 0)?;
    if tt.p1 != tt.p0 {
        s = s.add(sum_curve_for_symbol(cycle, symbol_at(tt.p1)?, 1)?)?;
    }
    if tt.p2 != tt.p0 {
        s = s.add(sum_curve_for_symbol(cycle, symbol_at(tt.p2)?, 2)?)?;
    }

    let votes = Fp6464::from_uint(cycle.next_vote_id)?;
    let s = s.div(votes)?;
    let one = Fp6464::from_uint(1)?;
    one.div(s)
}

/// `R(v) = B(c) * phi(v, place(v)) * N(c)`, converted to a payable integer
/// amount via `to_uint` (truncating toward zero, per FP64.64 contract).
pub fn calculate_reward(cycle: &Cycle, vote_id: VoteId) -> CoreResult<u128> {
    let vote = cycle
        .votes
        .get(vote_id)
        .ok_or(RacerError::VoteDoesntExist(vote_id))?;
    let place = place_of(cycle, vote.symbol).ok_or(RacerError::VoteNotInTopThree)?;

    let t = timeliness(cycle, vote)?;
    let phi = curve_point(t, place)?;
    let b = base_reward(cycle)?;
    let n = normalization_factor(cycle)?;

    let reward = b.mul(phi)?.mul(n)?;
    Ok(reward.to_uint()? as u128)
}
