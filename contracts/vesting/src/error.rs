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

    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("exactly one coin of the grant denom must be sent")]
    InvalidFunds,

    #[error("expected denom {expected}, got {actual}")]
    WrongDenom { expected: String, actual: String },

    #[error("instant percentage must be at most 100, got {value}")]
    PercentageOutOfRange { value: u64 },

    #[error("{recipient} already holds a grant")]
    GrantExists { recipient: String },

    #[error("{address} holds no grant")]
    NoGrant { address: String },

    #[error("nothing releasable yet")]
    NothingReleasable,

    #[error("insufficient contract balance of {denom}: have {available}, need {required}")]
    InsufficientBalance {
        denom: String,
        available: Uint128,
        required: Uint128,
    },
}
