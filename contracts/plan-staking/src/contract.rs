use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query;
use crate::state::{Config, CONFIG, PAUSED, PLAN_COUNT};

const CONTRACT_NAME: &str = "crates.io:vaultic-plan-staking";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        admin: info.sender.clone(),
        stake_denom: msg.stake_denom,
        min_stake: msg.min_stake,
    };
    CONFIG.save(deps.storage, &config)?;
    PAUSED.save(deps.storage, &false)?;
    PLAN_COUNT.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "plan-staking")
        .add_attribute("admin", info.sender.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::AddPlan {
            duration_seconds,
            apr,
            capacity,
            denomination,
        } => execute::add_plan(deps, info, duration_seconds, apr, capacity, denomination),
        ExecuteMsg::UpdatePlan {
            plan_id,
            duration_seconds,
            apr,
            capacity,
        } => execute::update_plan(deps, info, plan_id, duration_seconds, apr, capacity),
        ExecuteMsg::FreezePlan { plan_id } => execute::freeze_plan(deps, info, plan_id),
        ExecuteMsg::Stake { plan_id } => execute::stake(deps, env, info, plan_id),
        ExecuteMsg::Claim { stake_id } => execute::claim(deps, env, info, stake_id),
        ExecuteMsg::Withdraw { stake_id } => execute::withdraw(deps, env, info, stake_id),
        ExecuteMsg::UpdateConfig { admin, min_stake } => {
            execute::update_config(deps, info, admin, min_stake)
        }
        ExecuteMsg::Pause {} => execute::pause(deps, info),
        ExecuteMsg::Unpause {} => execute::unpause(deps, info),
        ExecuteMsg::EmergencyWithdraw { denom, amount } => {
            execute::emergency_withdraw(deps, info, denom, amount)
        }
    }
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Plan { plan_id } => query::query_plan(deps, plan_id),
        QueryMsg::Plans { start_after, limit } => query::query_plans(deps, start_after, limit),
        QueryMsg::Stakes {
            address,
            start_after,
            limit,
        } => query::query_stakes(deps, address, start_after, limit),
        QueryMsg::PendingReward { address, stake_id } => {
            query::query_pending_reward(deps, env, address, stake_id)
        }
    }
}
