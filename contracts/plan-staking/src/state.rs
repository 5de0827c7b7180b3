use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<Config> = Item::new("config");
pub const PAUSED: Item<bool> = Item::new("paused");
pub const PLAN_COUNT: Item<u64> = Item::new("plan_count");
pub const PLANS: Map<u64, Plan> = Map::new("plans");
pub const STAKES: Map<(&Addr, u64), Stake> = Map::new("stakes");
pub const NEXT_STAKE_ID: Map<&Addr, u64> = Map::new("next_stake_id");

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    /// Protocol token; token-denominated plans stake it and all rewards are
    /// paid in it.
    pub stake_denom: String,
    pub min_stake: Uint128,
}

/// What a plan's stake is denominated in, and how its value is measured
/// against the plan capacity.
#[cw_serde]
pub enum PlanDenomination {
    /// Stake the protocol token; value is the staked amount itself.
    Token,
    /// Stake LP tokens of a pool pairing the protocol token. Value is the
    /// stake's claim on the protocol-token side of the pool, doubled:
    /// `amount * paired_reserve * 2 / lp_total_supply`. Spot reserves, no
    /// time-weighting: advisory only, manipulable within a block.
    Lp { pair: Addr, lp_denom: String },
}

#[cw_serde]
pub struct Plan {
    pub duration_seconds: u64,
    /// Reward rate; reward = value * apr * duration / SECONDS_PER_YEAR / 100.
    /// Read at claim time, so updating a plan retroactively changes the
    /// reward of unclaimed stakes.
    pub apr: Uint128,
    pub capacity: Uint128,
    /// Sum of the captured values of open stakes. Never exceeds `capacity`.
    pub total_committed_value: Uint128,
    pub frozen: bool,
    pub denomination: PlanDenomination,
}

#[cw_serde]
pub struct Stake {
    pub plan_id: u64,
    pub amount: Uint128,
    /// Plan-capacity value captured when the stake was created.
    pub value: Uint128,
    pub start_time: Timestamp,
    /// Captured from the plan at stake time; later plan updates do not move
    /// an existing stake's maturity.
    pub duration_seconds: u64,
    pub claimed: bool,
}
