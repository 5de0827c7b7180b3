use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};
use vaultic_common::TimeWindow;

pub const CONFIG: Item<Config> = Item::new("config");
pub const PAUSED: Item<bool> = Item::new("paused");
/// One grant per recipient.
pub const GRANTS: Map<&Addr, Grant> = Map::new("grants");

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    pub denom: String,
    /// Share of each grant paid out immediately, in whole percent (0-100).
    pub instant_percentage: u64,
    /// Length of the linear release window for the remainder, in seconds.
    pub release_duration: u64,
}

#[cw_serde]
pub struct Grant {
    /// Total funded at registration, instant portion included.
    pub total: Uint128,
    pub instant_paid: Uint128,
    /// The linearly vesting remainder (`total - instant_paid`).
    pub vest_base: Uint128,
    pub window: TimeWindow,
    /// Cumulative amount already released from `vest_base`.
    pub released: Uint128,
}
