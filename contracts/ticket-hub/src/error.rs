use cosmwasm_std::{StdError, Uint128, VerificationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Verification(#[from] VerificationError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("contract is paused")]
    Paused,

    #[error("contract is not paused")]
    NotPaused,

    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("{signer} holds no signer capability")]
    UnknownSigner { signer: String },

    #[error("invalid signer pubkey: expected 33-byte compressed secp256k1 key, got {length} bytes")]
    InvalidPubkey { length: usize },

    #[error("ticket ({signer}, {nonce}) already executed or cancelled")]
    TicketReplayed { signer: String, nonce: u64 },

    #[error("nonce {nonce} is below {signer}'s watermark {min_nonce}")]
    NonceRevoked {
        signer: String,
        nonce: u64,
        min_nonce: u64,
    },

    #[error("ticket not valid before {start_time}")]
    TicketNotYetValid { start_time: u64 },

    #[error("ticket expired at {end_time}")]
    TicketExpired { end_time: u64 },

    #[error("signature does not match the ticket signer")]
    SignatureMismatch,

    #[error("validator must not be the ticket signer")]
    ValidatorIsSigner,

    #[error("watermark may only be raised (current {current}, requested {requested})")]
    WatermarkNotRaised { current: u64, requested: u64 },

    #[error("insufficient contract balance of {denom}: have {available}, need {required}")]
    InsufficientBalance {
        denom: String,
        available: Uint128,
        required: Uint128,
    },

    #[error("a proposal is still open until {end_time}")]
    ProposalStillOpen { end_time: u64 },

    #[error("proposal cooldown active until {until}")]
    ProposalCooldown { until: u64 },

    #[error("no proposal exists")]
    NoProposal,

    #[error("proposal {id} is closed")]
    ProposalClosed { id: u64 },

    #[error("proposal {id} has not ended yet (ends at {end_time})")]
    ProposalNotEnded { id: u64, end_time: u64 },

    #[error("voting on proposal {id} ended at {end_time}")]
    VotingEnded { id: u64, end_time: u64 },

    #[error("{voter} already voted on proposal {id}")]
    AlreadyVoted { voter: String, id: u64 },

    #[error("{voter} holds no {denom} to vote with")]
    NoVotingWeight { voter: String, denom: String },
}
