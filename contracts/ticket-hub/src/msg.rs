use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};

use crate::state::{Config, Proposal};

#[cw_serde]
pub struct InstantiateMsg {
    pub gov_denom: String,
    pub proposal_cooldown_seconds: u64,
}

/// An off-chain-signed, nonce-scoped, time-bounded transfer instruction.
/// The signature covers the sha256 digest of all other fields plus the chain
/// id and this contract's address.
#[cw_serde]
pub struct SignerTicket {
    pub signer: String,
    pub to: String,
    pub denom: String,
    pub amount: Uint128,
    pub nonce: u64,
    pub start_time: u64,
    pub end_time: u64,
    /// 64-byte r||s secp256k1 signature over the ticket digest.
    pub signature: Binary,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Verify a ticket and release its funds. Validator only; the validator
    /// must not be the ticket's signer.
    ExecuteTicket { ticket: SignerTicket },
    /// Verify a ticket and kill it without moving funds. Validator only.
    CancelTicket { ticket: SignerTicket },
    /// Bulk-invalidate all of the sender's unexecuted tickets with a nonce
    /// below the watermark. Signer only; raise-only.
    RevokeNoncesBelow { min_nonce: u64 },
    /// Admin only. `pubkey` is the signer's 33-byte compressed secp256k1 key.
    GrantSigner { address: String, pubkey: Binary },
    /// Admin only.
    RevokeSigner { address: String },
    /// Admin only.
    GrantValidator { address: String },
    /// Admin only.
    RevokeValidator { address: String },
    /// Open a proposal. Only one may be open system-wide, and the previous
    /// proposal's cooldown must have elapsed.
    CreateProposal { title: String, duration_seconds: u64 },
    /// Vote weighted by the sender's current gov-denom balance.
    Vote { support: bool },
    /// Close the current proposal once its end time has passed.
    CloseProposal {},
    /// Admin only.
    Pause {},
    /// Admin only.
    Unpause {},
    /// Recover funds while paused. Admin only.
    EmergencyWithdraw { denom: String, amount: Uint128 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(TicketStatusResponse)]
    TicketStatus { signer: String, nonce: u64 },
    #[returns(Vec<SignerEntry>)]
    Signers {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(Option<Proposal>)]
    Proposal {},
    #[returns(VoteReceiptResponse)]
    VoteReceipt { proposal_id: u64, address: String },
}

#[cw_serde]
pub struct TicketStatusResponse {
    pub signer: String,
    pub nonce: u64,
    /// Executed or cancelled.
    pub used: bool,
    pub min_nonce: u64,
}

#[cw_serde]
pub struct SignerEntry {
    pub address: String,
    pub pubkey: Binary,
}

#[cw_serde]
pub struct VoteReceiptResponse {
    pub proposal_id: u64,
    pub address: String,
    pub voted: bool,
}
