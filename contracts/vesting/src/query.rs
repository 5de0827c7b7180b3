use cosmwasm_std::{to_json_binary, Binary, Deps, Env, StdResult, Uint128};

use crate::execute::releasable;
use crate::msg::{GrantResponse, ReleasableResponse};
use crate::state::{CONFIG, GRANTS};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_grant(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let grant = GRANTS.may_load(deps.storage, &addr)?;
    to_json_binary(&GrantResponse { address, grant })
}

pub fn query_releasable(deps: Deps, env: Env, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let (amount, locked) = match GRANTS.may_load(deps.storage, &addr)? {
        Some(grant) => (
            releasable(&grant, env.block.time),
            grant.window.locked_amount(grant.vest_base, env.block.time),
        ),
        None => (Uint128::zero(), Uint128::zero()),
    };
    to_json_binary(&ReleasableResponse {
        address,
        releasable: amount,
        locked,
    })
}
