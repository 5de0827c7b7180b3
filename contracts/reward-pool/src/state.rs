use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128, Uint256};
use cw_storage_plus::{Item, Map};
use vaultic_common::TimeWindow;

pub const CONFIG: Item<Config> = Item::new("config");
pub const PAUSED: Item<bool> = Item::new("paused");
pub const REWARD: Item<RewardState> = Item::new("reward_state");
pub const STAKERS: Map<&Addr, StakerState> = Map::new("stakers");

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    pub staking_denom: String,
    pub reward_denom: String,
}

/// Global accumulator state. `reward_per_token_stored` only ever grows; it is
/// folded forward before any stake balance changes (settle-before-mutate).
#[cw_serde]
pub struct RewardState {
    /// Cumulative reward per staked token, scaled by 10^18.
    pub reward_per_token_stored: Uint256,
    pub last_update: Timestamp,
    pub total_staked: Uint128,
    /// Reward tokens emitted per second while inside the window.
    pub reward_rate: Uint128,
    /// None until the first schedule is set.
    pub window: Option<TimeWindow>,
}

#[cw_serde]
#[derive(Default)]
pub struct StakerState {
    pub staked: Uint128,
    /// Accumulator snapshot at the account's last checkpoint.
    pub reward_per_token_paid: Uint256,
    /// Accrued but unclaimed reward.
    pub pending: Uint128,
}
