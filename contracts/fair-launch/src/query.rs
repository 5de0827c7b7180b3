use cosmwasm_std::{to_json_binary, Binary, Deps, Env, StdResult};

use crate::msg::{AccountResponse, LaunchStateResponse};
use crate::state::{ACCOUNTS, CONFIG, OUTCOME, PAUSED, TOTAL_CREDITED, TOTAL_EXCHANGED};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_launch_state(deps: Deps, env: Env) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let outcome = OUTCOME.load(deps.storage)?;
    to_json_binary(&LaunchStateResponse {
        phase: config.phase(env.block.time),
        total_exchanged: TOTAL_EXCHANGED.load(deps.storage)?,
        total_credited: TOTAL_CREDITED.load(deps.storage)?,
        pool_created: outcome.pool_created,
        refundable: outcome.refundable,
        paused: PAUSED.load(deps.storage)?,
    })
}

pub fn query_account(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let account = ACCOUNTS.may_load(deps.storage, &addr)?.unwrap_or_default();
    to_json_binary(&AccountResponse {
        address,
        deposited: account.deposited,
        credited: account.credited,
    })
}
