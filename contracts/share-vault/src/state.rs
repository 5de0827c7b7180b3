use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};
use vaultic_common::TimeWindow;

pub const CONFIG: Item<Config> = Item::new("config");
pub const PAUSED: Item<bool> = Item::new("paused");
pub const TOTAL_SHARES: Item<Uint128> = Item::new("total_shares");
pub const SHARES: Map<&Addr, Uint128> = Map::new("shares");
/// Timestamp of each account's most recent deposit. Redeems and outbound
/// share transfers are blocked until `cooldown_seconds` have elapsed.
pub const LAST_DEPOSIT: Map<&Addr, Timestamp> = Map::new("last_deposit");
/// Running total of injected rewards. The still-frozen portion is
/// `window.locked_amount(TOTAL_REWARDS, now)` and is excluded from the
/// spendable pool.
pub const TOTAL_REWARDS: Item<Uint128> = Item::new("total_rewards");

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    /// Allowed to inject rewards.
    pub operator: Addr,
    pub deposit_denom: String,
    /// Deposit activity window; injected rewards also release linearly over it.
    pub window: TimeWindow,
    /// Seconds after a deposit during which redeem/transfer is blocked.
    pub cooldown_seconds: u64,
}
