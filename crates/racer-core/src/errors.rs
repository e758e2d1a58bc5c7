//! # Core Error Types
//!
//! Every public operation either fully applies or fully fails: any error
//! here aborts the current call with no partial mutation and no event.

use thiserror::Error;

/// Racer protocol errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum RacerError {
    // ========================================================================
    // Cycle / Vote lifecycle
    // ========================================================================
    #[error("cycle {0} does not exist")]
    CycleDoesntExist(u64),

    #[error("vote price must be strictly positive")]
    InvalidVotePrice,

    #[error("start + length overflows")]
    ArithmeticOverflow,

    #[error("cycle {0} is not accepting votes")]
    CycleVotingUnavailable(u64),

    #[error("incorrect vote fee, required {0}")]
    InvalidVoteFee(u128),

    #[error("cycle {0} has not ended")]
    CycleDidntEnd(u64),

    #[error("vote {0} does not exist")]
    VoteDoesntExist(u64),

    #[error("cycle {0} has no votes")]
    CycleHasNoVotes(u64),

    #[error("vote already claimed")]
    VoteAlreadyClaimed,

    #[error("vote is not in the top three")]
    VoteNotInTopThree,

    #[error("vote {0} is not claimable by {1:?}")]
    VoteNotPlacedByCaller(u64, crate::identity::Identity),

    // ========================================================================
    // Concurrency
    // ========================================================================
    #[error("reentrant call rejected")]
    Reentrancy,

    // ========================================================================
    // FP64.64 faults
    // ========================================================================
    #[error("fixed-point overflow")]
    Overflow,

    #[error("division by zero")]
    DivByZero,

    #[error("negative value where unsigned result required")]
    Negative,

    // ========================================================================
    // Environment
    // ========================================================================
    #[error("value transfer failed")]
    TransferFailed,
}

/// Result type using core errors.
pub type CoreResult<T> = Result<T, RacerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_stable() {
        assert_eq!(
            format!("{}", RacerError::InvalidVotePrice),
            "vote price must be strictly positive"
        );
        assert_eq!(
            format!("{}", RacerError::CycleDoesntExist(7)),
            "cycle 7 does not exist"
        );
        assert_eq!(
            format!("{}", RacerError::InvalidVoteFee(42)),
            "incorrect vote fee, required 42"
        );
    }
}
