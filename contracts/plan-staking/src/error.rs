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

    #[error("contract is not paused")]
    NotPaused,

    #[error("no funds sent")]
    NoFundsSent,

    #[error("must send exactly one coin")]
    InvalidFunds,

    #[error("must send {expected}, got {denom}")]
    WrongDenom { expected: String, denom: String },

    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("plan {plan_id} not found")]
    PlanNotFound { plan_id: u64 },

    #[error("plan {plan_id} is frozen, no new stakes")]
    PlanFrozen { plan_id: u64 },

    #[error("plan duration must be greater than zero")]
    ZeroDuration,

    #[error("stake amount {amount} is below minimum {min_stake}")]
    StakeBelowMinimum { amount: Uint128, min_stake: Uint128 },

    #[error("plan {plan_id} capacity exceeded: committed {committed} + value {value} > {capacity}")]
    CapacityExceeded {
        plan_id: u64,
        committed: Uint128,
        value: Uint128,
        capacity: Uint128,
    },

    #[error("capacity {requested} is below currently committed value {committed}")]
    CapacityBelowCommitted {
        requested: Uint128,
        committed: Uint128,
    },

    #[error("stake {stake_id} not found for {address}")]
    StakeNotFound { address: String, stake_id: u64 },

    #[error("stake {stake_id} already claimed")]
    StakeAlreadyClaimed { stake_id: u64 },

    #[error("stake {stake_id} locked until {matures_at}")]
    StakeLocked { stake_id: u64, matures_at: u64 },

    #[error("pair pool has no {denom} side")]
    PairedReserveMissing { denom: String },

    #[error("pair has zero outstanding LP supply")]
    EmptyLpSupply,

    #[error("insufficient contract balance of {denom}: have {available}, need {required}")]
    InsufficientBalance {
        denom: String,
        available: Uint128,
        required: Uint128,
    },
}
