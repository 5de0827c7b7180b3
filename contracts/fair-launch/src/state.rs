use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<Config> = Item::new("config");
pub const PAUSED: Item<bool> = Item::new("paused");
/// Total deposit-denom raised across all participants.
pub const TOTAL_EXCHANGED: Item<Uint128> = Item::new("total_exchanged");
/// Total bootstrap-denom credited (claimable once the pool exists).
pub const TOTAL_CREDITED: Item<Uint128> = Item::new("total_credited");
pub const OUTCOME: Item<Outcome> = Item::new("outcome");
pub const ACCOUNTS: Map<&Addr, Account> = Map::new("accounts");

/// Minimum gap between the exchange window closing and the sweep phase
/// opening, so participants have time to claim or refund.
pub const MIN_CLOSE_GAP_SECONDS: u64 = 24 * 60 * 60;

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    /// Bootstrap denom the contract is funded with and credits to buyers.
    pub token_a: String,
    /// Deposit denom participants exchange in.
    pub token_b: String,
    /// token_a credited per unit of token_b.
    pub exchange_rate: Uint128,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// Sweep becomes available here; at least 24h after `end_time`.
    pub close_time: Timestamp,
    pub min_total_exchange: Uint128,
    pub max_total_exchange: Uint128,
    pub max_exchange_per_address: Uint128,
    pub pass_gate: Option<PassGate>,
    /// Consulted for a pre-existing pair before committing liquidity.
    pub factory: Addr,
    /// Receives both sides of the raised liquidity on success.
    pub pair: Addr,
}

/// Participation requires holding at least `min_balance` of `denom`.
#[cw_serde]
pub struct PassGate {
    pub denom: String,
    pub min_balance: Uint128,
}

/// Launch resolution. Both flags are one-way and mutually exclusive.
#[cw_serde]
#[derive(Default)]
pub struct Outcome {
    pub pool_created: bool,
    pub refundable: bool,
}

#[cw_serde]
#[derive(Default)]
pub struct Account {
    /// token_b deposited, returned on refund.
    pub deposited: Uint128,
    /// token_a credited, paid on claim.
    pub credited: Uint128,
}

/// Launch phase derived from timestamp comparison; never stored.
#[cw_serde]
pub enum Phase {
    NotStarted,
    Open,
    Ended,
    Closed,
}

impl Config {
    pub fn phase(&self, now: Timestamp) -> Phase {
        if now < self.start_time {
            Phase::NotStarted
        } else if now < self.end_time {
            Phase::Open
        } else if now < self.close_time {
            Phase::Ended
        } else {
            Phase::Closed
        }
    }
}
