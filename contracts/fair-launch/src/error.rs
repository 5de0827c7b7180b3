use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("contract is paused")]
    Paused,

    #[error("invalid schedule: {reason}")]
    InvalidSchedule { reason: String },

    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("exactly one coin of the deposit denom must be sent")]
    InvalidFunds,

    #[error("expected denom {expected}, got {actual}")]
    WrongDenom { expected: String, actual: String },

    #[error("operation requires phase {expected}, current phase is {actual}")]
    WrongPhase { expected: String, actual: String },

    #[error("participation requires at least {min_balance} {denom}")]
    PassRequired { denom: String, min_balance: Uint128 },

    #[error("exchange would exceed the per-address cap of {cap}")]
    AddressCapExceeded { cap: Uint128 },

    #[error("exchange would exceed the global cap of {cap}")]
    GlobalCapExceeded { cap: Uint128 },

    #[error("raised {raised} is below the minimum {minimum}")]
    MinimumNotReached { raised: Uint128, minimum: Uint128 },

    #[error("launch already resolved")]
    AlreadyResolved,

    #[error("pool has not been created")]
    PoolNotCreated,

    #[error("launch is not refundable")]
    NotRefundable,

    #[error("nothing to claim")]
    NothingToClaim,

    #[error("nothing to refund")]
    NothingToRefund,

    #[error("nothing to sweep")]
    NothingToSweep,

    #[error("insufficient contract balance of {denom}: have {available}, need {required}")]
    InsufficientBalance {
        denom: String,
        available: Uint128,
        required: Uint128,
    },
}
