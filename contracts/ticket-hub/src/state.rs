use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<Config> = Item::new("config");
pub const PAUSED: Item<bool> = Item::new("paused");
/// Registered signers and their compressed secp256k1 pubkeys.
pub const SIGNERS: Map<&Addr, Binary> = Map::new("signers");
/// Validator capability holders, allowed to execute/cancel tickets.
pub const VALIDATORS: Map<&Addr, bool> = Map::new("validators");
/// One flag per `(signer, nonce)`, shared by execute and cancel: a flagged
/// ticket is dead either way.
pub const USED: Map<(&Addr, u64), bool> = Map::new("used_nonces");
/// Per-signer watermark; tickets with a lower nonce are bulk-invalidated.
pub const MIN_NONCE: Map<&Addr, u64> = Map::new("min_nonce");

pub const PROPOSAL_COUNT: Item<u64> = Item::new("proposal_count");
/// The single system-wide proposal slot (latest proposal, open or closed).
pub const CURRENT_PROPOSAL: Item<Proposal> = Item::new("current_proposal");
pub const VOTED: Map<(u64, &Addr), bool> = Map::new("voted");

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    /// Bank denom whose balance weighs votes.
    pub gov_denom: String,
    /// Seconds after a proposal's end_time before the next may be created.
    pub proposal_cooldown_seconds: u64,
}

#[cw_serde]
pub struct Proposal {
    pub id: u64,
    pub title: String,
    pub proposer: Addr,
    pub end_time: Timestamp,
    pub for_votes: Uint128,
    pub against_votes: Uint128,
    pub closed: bool,
}
