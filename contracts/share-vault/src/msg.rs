use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Decimal, Timestamp, Uint128};

use crate::state::Config;

#[cw_serde]
pub struct InstantiateMsg {
    pub operator: String,
    pub deposit_denom: String,
    /// Unix seconds. Deposits are accepted in `[start_time, finish_time)` and
    /// injected rewards release linearly over the same window.
    pub start_time: u64,
    pub finish_time: u64,
    /// Seconds after a deposit during which redeem/transfer is blocked.
    pub cooldown_seconds: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Deposit the pool denom to mint shares. Send funds in info.funds.
    Deposit {},
    /// Add rewards to the pool without minting shares. Operator only.
    /// Send funds in info.funds. Rejected once the window has finished.
    InjectReward {},
    /// Burn shares for the proportional slice of the spendable pool.
    Redeem { shares: Uint128 },
    /// Move shares to another account. Gated by the sender's deposit cooldown.
    TransferShares { recipient: String, amount: Uint128 },
    /// Move the window finish later. Admin only.
    ExtendWindow { new_finish: u64 },
    /// Update contract configuration. Admin only.
    UpdateConfig {
        admin: Option<String>,
        operator: Option<String>,
        cooldown_seconds: Option<u64>,
    },
    /// Admin only.
    Pause {},
    /// Admin only.
    Unpause {},
    /// Recover funds while paused. Admin only, bypasses share accounting.
    EmergencyWithdraw { denom: String, amount: Uint128 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(PoolStateResponse)]
    PoolState {},
    #[returns(StakerResponse)]
    Staker { address: String },
}

#[cw_serde]
pub struct PoolStateResponse {
    pub total_shares: Uint128,
    pub underlying_balance: Uint128,
    /// Injected rewards not yet time-released.
    pub frozen_rewards: Uint128,
    /// `underlying_balance - frozen_rewards`; what redeems are priced against.
    pub spendable_pool: Uint128,
    pub exchange_rate: Decimal,
    pub paused: bool,
}

#[cw_serde]
pub struct StakerResponse {
    pub address: String,
    pub shares: Uint128,
    pub last_deposit: Option<Timestamp>,
    /// Current redeem value of the account's shares.
    pub redeemable: Uint128,
}
