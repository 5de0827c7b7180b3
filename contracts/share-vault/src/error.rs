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

    #[error("pool is outside its active window ({start} to {finish})")]
    OutsideWindow { start: u64, finish: u64 },

    #[error("reward window closed at {finish}, rewards can no longer be injected")]
    RewardWindowClosed { finish: u64 },

    #[error("spendable pool is empty, deposits cannot be priced")]
    EmptyPool,

    #[error("insufficient shares: have {available}, need {requested}")]
    InsufficientShares {
        available: Uint128,
        requested: Uint128,
    },

    #[error("deposit cooldown active until {until}")]
    CooldownActive { until: u64 },
}
