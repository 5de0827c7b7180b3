use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Timestamp, Uint128,
};
use cw2::set_contract_version;
use vaultic_common::TimeWindow;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query;
use crate::state::{Config, CONFIG, PAUSED, TOTAL_REWARDS, TOTAL_SHARES};

const CONTRACT_NAME: &str = "crates.io:vaultic-share-vault";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let window = TimeWindow::new(
        Timestamp::from_seconds(msg.start_time),
        Timestamp::from_seconds(msg.finish_time),
    )?;

    let config = Config {
        admin: info.sender.clone(),
        operator: deps.api.addr_validate(&msg.operator)?,
        deposit_denom: msg.deposit_denom,
        window,
        cooldown_seconds: msg.cooldown_seconds,
    };
    CONFIG.save(deps.storage, &config)?;
    PAUSED.save(deps.storage, &false)?;
    TOTAL_SHARES.save(deps.storage, &Uint128::zero())?;
    TOTAL_REWARDS.save(deps.storage, &Uint128::zero())?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "share-vault")
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
        ExecuteMsg::Deposit {} => execute::deposit(deps, env, info),
        ExecuteMsg::InjectReward {} => execute::inject_reward(deps, env, info),
        ExecuteMsg::Redeem { shares } => execute::redeem(deps, env, info, shares),
        ExecuteMsg::TransferShares { recipient, amount } => {
            execute::transfer_shares(deps, env, info, recipient, amount)
        }
        ExecuteMsg::ExtendWindow { new_finish } => {
            execute::extend_window(deps, env, info, new_finish)
        }
        ExecuteMsg::UpdateConfig {
            admin,
            operator,
            cooldown_seconds,
        } => execute::update_config(deps, env, info, admin, operator, cooldown_seconds),
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
        QueryMsg::PoolState {} => query::query_pool_state(deps, env),
        QueryMsg::Staker { address } => query::query_staker(deps, env, address),
    }
}
