use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

use crate::state::{Config, PassGate, Phase};

#[cw_serde]
pub struct InstantiateMsg {
    pub token_a: String,
    pub token_b: String,
    /// token_a credited per unit of token_b.
    pub exchange_rate: Uint128,
    pub start_time: u64,
    pub end_time: u64,
    /// Must be at least 24h after `end_time`.
    pub close_time: u64,
    pub min_total_exchange: Uint128,
    pub max_total_exchange: Uint128,
    pub max_exchange_per_address: Uint128,
    pub pass_gate: Option<PassGate>,
    pub factory: String,
    pub pair: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Deposit token_b during the open window and get token_a credited at
    /// the fixed rate.
    Exchange {},
    /// Commit the raised liquidity to the pair. Admin only, after the window
    /// ends. Finding a pre-existing pair flips the launch to refundable
    /// instead.
    CreatePool {},
    /// Collect credited token_a once the pool exists. Zeroes the account.
    Claim {},
    /// Recover the exact token_b deposit when the launch failed. Zeroes the
    /// account.
    Refund {},
    /// Recover leftovers after close. Admin only.
    Sweep { denom: String },
    /// Admin only.
    Pause {},
    /// Admin only.
    Unpause {},
}

/// Query interface of the external pair factory. The query errors when no
/// pair exists for the denom pair.
#[cw_serde]
pub enum FactoryQueryMsg {
    Pair { denoms: [String; 2] },
}

#[cw_serde]
pub struct PairResponse {
    pub contract_addr: String,
}

/// Execute interface of the external pair contract; both sides of the
/// liquidity ride along as funds.
#[cw_serde]
pub enum PairExecuteMsg {
    ProvideLiquidity {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(LaunchStateResponse)]
    LaunchState {},
    #[returns(AccountResponse)]
    Account { address: String },
}

#[cw_serde]
pub struct LaunchStateResponse {
    pub phase: Phase,
    pub total_exchanged: Uint128,
    pub total_credited: Uint128,
    pub pool_created: bool,
    pub refundable: bool,
    pub paused: bool,
}

#[cw_serde]
pub struct AccountResponse {
    pub address: String,
    pub deposited: Uint128,
    pub credited: Uint128,
}
