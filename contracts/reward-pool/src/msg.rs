use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Timestamp, Uint128, Uint256};

use crate::state::Config;

#[cw_serde]
pub struct InstantiateMsg {
    pub staking_denom: String,
    pub reward_denom: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Stake the staking denom. Send funds in info.funds.
    Stake {},
    /// Withdraw staked tokens. Accrued rewards stay pending.
    Withdraw { amount: Uint128 },
    /// Pay out pending rewards. A zero pending balance is a no-op, not an
    /// error.
    Claim {},
    /// Start a new emission schedule. Admin only; rejected while a previous
    /// schedule is still inside its window. Reward funding covering
    /// `rate * (finish - start)` must be sent along.
    SetSchedule {
        /// Reward tokens per second.
        rate: Uint128,
        start_time: u64,
        finish_time: u64,
    },
    /// Admin only.
    Pause {},
    /// Admin only.
    Unpause {},
    /// Recover funds while paused. Admin only, bypasses reward accounting.
    EmergencyWithdraw { denom: String, amount: Uint128 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(RewardStateResponse)]
    RewardState {},
    #[returns(StakerResponse)]
    Staker { address: String },
}

#[cw_serde]
pub struct RewardStateResponse {
    /// Accumulator folded forward to the current block time.
    pub reward_per_token: Uint256,
    pub total_staked: Uint128,
    pub reward_rate: Uint128,
    pub window_start: Option<Timestamp>,
    pub window_finish: Option<Timestamp>,
    pub paused: bool,
}

#[cw_serde]
pub struct StakerResponse {
    pub address: String,
    pub staked: Uint128,
    /// Total claimable right now (pending plus unsettled accrual).
    pub earned: Uint128,
}
