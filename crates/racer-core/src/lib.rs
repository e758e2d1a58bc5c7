//! # racer-core
//!
//! Environment-agnostic state machine and reward engine for Racer, a
//! time-weighted prediction market. A Cycle opens for voting over a block
//! range; votes are fee-denominated placements on a symbol; once a cycle
//! ends, the three most-voted symbols share its accumulated fee pool,
//! weighted by a quadratic timeliness curve, via `MarketController::claim_reward`.
//!
//! This crate draws the line at [`MarketEnv`]: everything on this side of
//! that trait is pure, synchronous, and has no notion of accounts, RPC,
//! wallets, or a ledger of its own. Wiring this core to an actual chain,
//! database, or test harness is the caller's job — implement `MarketEnv`
//! and drive a [`MarketController`].
//!
//! All reward arithmetic happens in [`fixed_point::Fp6464`], a signed
//! Q64.64 fixed-point type with bit-for-bit deterministic rounding; it never
//! crosses this crate's public boundary; every public method takes and
//! returns plain integers.

pub mod constants;
pub mod cycle;
pub mod env;
pub mod errors;
pub mod events;
pub mod fixed_point;
pub mod identity;
pub mod market;
pub mod reentrancy;
pub mod reward;
pub mod symbol_index;
pub(crate) mod uint256;
pub mod top_three;
pub mod vote;

pub use cycle::{Cycle, CycleId};
pub use env::{MarketEnv, TransferError};
pub use errors::{CoreResult, RacerError};
pub use events::{CycleCreated, Outcome, VoteClaimed, VotePlaced};
pub use identity::{Identity, Symbol};
pub use market::{MarketController, SymbolStats};
pub use vote::{Vote, VoteId};
