use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

use crate::state::{Config, Grant};

#[cw_serde]
pub struct InstantiateMsg {
    pub denom: String,
    /// Share of each grant paid out immediately, in whole percent (0-100).
    pub instant_percentage: u64,
    /// Linear release window length for the vested remainder, in seconds.
    pub release_duration: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Fund a new grant for `recipient` with the attached coins. Admin only;
    /// the instant percentage is paid out in the same transaction and the
    /// remainder vests linearly from now. One grant per address.
    Register { recipient: String },
    /// Send the grantee everything unlocked so far and not yet released.
    Release {},
    /// Push a grant's release window finish later. Admin only.
    ExtendVesting { recipient: String, new_finish: u64 },
    /// Admin only.
    Pause {},
    /// Admin only.
    Unpause {},
    /// Recover funds while paused. Admin only.
    EmergencyWithdraw { denom: String, amount: Uint128 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(GrantResponse)]
    Grant { address: String },
    #[returns(ReleasableResponse)]
    Releasable { address: String },
}

#[cw_serde]
pub struct GrantResponse {
    pub address: String,
    pub grant: Option<Grant>,
}

#[cw_serde]
pub struct ReleasableResponse {
    pub address: String,
    /// Unlocked but not yet released.
    pub releasable: Uint128,
    /// Still locked by the release window.
    pub locked: Uint128,
}
