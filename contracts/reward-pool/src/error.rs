use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;
use vaultic_common::WindowError;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Window(#[from] WindowError),

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

    #[error("insufficient staked balance: have {available}, need {requested}")]
    InsufficientStake {
        available: Uint128,
        requested: Uint128,
    },

    #[error("a reward schedule is still active until {finish}")]
    ScheduleActive { finish: u64 },

    #[error("schedule requires {required} reward funding, got {provided}")]
    InsufficientRewardFunding {
        required: Uint128,
        provided: Uint128,
    },

    #[error("contract reward balance {available} cannot cover claim of {requested}")]
    InsufficientRewardBalance {
        available: Uint128,
        requested: Uint128,
    },
}
