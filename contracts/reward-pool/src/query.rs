use cosmwasm_std::{to_json_binary, Binary, Deps, Env, StdError, StdResult};

use crate::execute::{earned, settle_global};
use crate::msg::{RewardStateResponse, StakerResponse};
use crate::state::{CONFIG, PAUSED, REWARD, STAKERS};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_reward_state(deps: Deps, env: Env) -> StdResult<Binary> {
    let mut state = REWARD.load(deps.storage)?;
    settle_global(&mut state, env.block.time);

    to_json_binary(&RewardStateResponse {
        reward_per_token: state.reward_per_token_stored,
        total_staked: state.total_staked,
        reward_rate: state.reward_rate,
        window_start: state.window.map(|w| w.start),
        window_finish: state.window.map(|w| w.finish),
        paused: PAUSED.load(deps.storage)?,
    })
}

pub fn query_staker(deps: Deps, env: Env, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let state = REWARD.load(deps.storage)?;
    let staker = STAKERS.may_load(deps.storage, &addr)?.unwrap_or_default();
    let earned = earned(&state, &staker, env.block.time)
        .map_err(|e| StdError::generic_err(e.to_string()))?;

    to_json_binary(&StakerResponse {
        address,
        staked: staker.staked,
        earned,
    })
}
