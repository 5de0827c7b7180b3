use cosmwasm_std::{to_json_binary, Binary, Decimal, Deps, Env, StdResult, Uint128};

use crate::msg::{PoolStateResponse, StakerResponse};
use crate::state::{CONFIG, LAST_DEPOSIT, PAUSED, SHARES, TOTAL_REWARDS, TOTAL_SHARES};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_pool_state(deps: Deps, env: Env) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let total_shares = TOTAL_SHARES.load(deps.storage)?;
    let underlying_balance = deps
        .querier
        .query_balance(&env.contract.address, &config.deposit_denom)?
        .amount;
    let total_rewards = TOTAL_REWARDS.load(deps.storage)?;
    let frozen_rewards = config.window.locked_amount(total_rewards, env.block.time);
    let spendable_pool = underlying_balance.saturating_sub(frozen_rewards);
    let exchange_rate = if total_shares.is_zero() {
        Decimal::one()
    } else {
        Decimal::from_ratio(spendable_pool, total_shares)
    };

    to_json_binary(&PoolStateResponse {
        total_shares,
        underlying_balance,
        frozen_rewards,
        spendable_pool,
        exchange_rate,
        paused: PAUSED.load(deps.storage)?,
    })
}

pub fn query_staker(deps: Deps, env: Env, address: String) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let addr = deps.api.addr_validate(&address)?;
    let shares = SHARES.may_load(deps.storage, &addr)?.unwrap_or_default();
    let last_deposit = LAST_DEPOSIT.may_load(deps.storage, &addr)?;

    let total_shares = TOTAL_SHARES.load(deps.storage)?;
    let redeemable = if shares.is_zero() || total_shares.is_zero() {
        Uint128::zero()
    } else {
        let balance = deps
            .querier
            .query_balance(&env.contract.address, &config.deposit_denom)?
            .amount;
        let total_rewards = TOTAL_REWARDS.load(deps.storage)?;
        let pool =
            balance.saturating_sub(config.window.locked_amount(total_rewards, env.block.time));
        shares.multiply_ratio(pool, total_shares)
    };

    to_json_binary(&StakerResponse {
        address,
        shares,
        last_deposit,
        redeemable,
    })
}
