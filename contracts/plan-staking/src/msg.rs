use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Coin, Timestamp, Uint128};

use crate::state::{Config, Plan, PlanDenomination, Stake};

#[cw_serde]
pub struct InstantiateMsg {
    pub stake_denom: String,
    pub min_stake: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Append a plan to the registry. Admin only.
    AddPlan {
        duration_seconds: u64,
        apr: Uint128,
        capacity: Uint128,
        denomination: PlanDenomination,
    },
    /// Mutate a plan in place. Admin only. Does not move existing stakes'
    /// maturity, but the apr applies retroactively to their unclaimed
    /// rewards.
    UpdatePlan {
        plan_id: u64,
        duration_seconds: Option<u64>,
        apr: Option<Uint128>,
        capacity: Option<Uint128>,
    },
    /// One-way: the plan accepts no further stakes. Admin only.
    FreezePlan { plan_id: u64 },
    /// Stake into a plan. Send the plan's denom in info.funds.
    Stake { plan_id: u64 },
    /// Pay out principal plus reward after maturity.
    Claim { stake_id: u64 },
    /// Early exit: principal back, reward forfeited. Any time before claim.
    Withdraw { stake_id: u64 },
    /// Admin only.
    UpdateConfig {
        admin: Option<String>,
        min_stake: Option<Uint128>,
    },
    /// Admin only.
    Pause {},
    /// Admin only.
    Unpause {},
    /// Recover funds while paused. Admin only, bypasses plan accounting.
    EmergencyWithdraw { denom: String, amount: Uint128 },
}

/// Query interface of the external pair contract used to value LP stakes.
#[cw_serde]
pub enum PairQueryMsg {
    Pool {},
}

#[cw_serde]
pub struct PoolResponse {
    pub assets: Vec<Coin>,
    pub total_share: Uint128,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(PlanResponse)]
    Plan { plan_id: u64 },
    #[returns(Vec<PlanResponse>)]
    Plans {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(Vec<StakeResponse>)]
    Stakes {
        address: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(PendingRewardResponse)]
    PendingReward { address: String, stake_id: u64 },
}

#[cw_serde]
pub struct PlanResponse {
    pub plan_id: u64,
    pub plan: Plan,
}

#[cw_serde]
pub struct StakeResponse {
    pub stake_id: u64,
    pub stake: Stake,
}

#[cw_serde]
pub struct PendingRewardResponse {
    pub stake_id: u64,
    /// Reward under the plan's current apr.
    pub reward: Uint128,
    pub matures_at: Timestamp,
    pub mature: bool,
}
