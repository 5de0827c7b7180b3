use cosmwasm_std::{to_json_binary, Binary, Deps, Env, Order, StdError, StdResult};
use cw_storage_plus::Bound;

use crate::execute::plan_reward;
use crate::msg::{PendingRewardResponse, PlanResponse, StakeResponse};
use crate::state::{CONFIG, PLANS, STAKES};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_plan(deps: Deps, plan_id: u64) -> StdResult<Binary> {
    let plan = PLANS.load(deps.storage, plan_id)?;
    to_json_binary(&PlanResponse { plan_id, plan })
}

pub fn query_plans(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(50).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let entries: Vec<PlanResponse> = PLANS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(plan_id, plan)| PlanResponse { plan_id, plan })
        .collect();

    to_json_binary(&entries)
}

pub fn query_stakes(
    deps: Deps,
    address: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let limit = limit.unwrap_or(50).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let entries: Vec<StakeResponse> = STAKES
        .prefix(&addr)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(stake_id, stake)| StakeResponse { stake_id, stake })
        .collect();

    to_json_binary(&entries)
}

pub fn query_pending_reward(
    deps: Deps,
    env: Env,
    address: String,
    stake_id: u64,
) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let stake = STAKES.load(deps.storage, (&addr, stake_id))?;
    let plan = PLANS.load(deps.storage, stake.plan_id)?;
    let reward = plan_reward(stake.value, plan.apr, stake.duration_seconds)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    let matures_at = stake.start_time.plus_seconds(stake.duration_seconds);

    to_json_binary(&PendingRewardResponse {
        stake_id,
        reward,
        matures_at,
        mature: env.block.time >= matures_at,
    })
}
