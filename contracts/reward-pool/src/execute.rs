use cosmwasm_std::{
    coins, BankMsg, Event, MessageInfo, Response, StdError, Storage, Timestamp, Uint128, Uint256,
};
use cosmwasm_std::{DepsMut, Env};
use vaultic_common::TimeWindow;

use crate::error::ContractError;
use crate::state::{Config, RewardState, StakerState, CONFIG, PAUSED, REWARD, STAKERS};

/// Accumulator scaling factor (10^18).
pub fn scale() -> Uint256 {
    Uint256::from(1_000_000_000_000_000_000u128)
}

fn ensure_not_paused(storage: &dyn Storage) -> Result<(), ContractError> {
    if PAUSED.load(storage)? {
        return Err(ContractError::Paused);
    }
    Ok(())
}

fn ensure_admin(config: &Config, info: &MessageInfo, action: &str) -> Result<(), ContractError> {
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: format!("only admin can {action}"),
        });
    }
    Ok(())
}

fn one_coin(info: &MessageInfo, expected: &str) -> Result<Uint128, ContractError> {
    if info.funds.is_empty() {
        return Err(ContractError::NoFundsSent);
    }
    if info.funds.len() != 1 {
        return Err(ContractError::InvalidFunds);
    }
    let sent = &info.funds[0];
    if sent.denom != expected {
        return Err(ContractError::WrongDenom {
            expected: expected.to_string(),
            denom: sent.denom.clone(),
        });
    }
    if sent.amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    Ok(sent.amount)
}

/// Fold global emission into the accumulator up to `min(now, window.finish)`.
/// Must run before any change to `total_staked` or an account's balance.
pub fn settle_global(state: &mut RewardState, now: Timestamp) {
    let Some(window) = state.window else {
        return;
    };
    let effective_now = if now < window.finish { now } else { window.finish };
    if effective_now <= state.last_update {
        return;
    }
    let elapsed = effective_now.seconds() - state.last_update.seconds();
    if !state.total_staked.is_zero() {
        let delta = Uint256::from(elapsed) * Uint256::from(state.reward_rate) * scale()
            / Uint256::from(state.total_staked);
        state.reward_per_token_stored += delta;
    }
    state.last_update = effective_now;
}

/// Checkpoint one account against the (already settled) global accumulator.
pub fn settle_account(
    state: &RewardState,
    staker: &mut StakerState,
) -> Result<(), ContractError> {
    let delta = Uint256::from(staker.staked)
        * (state.reward_per_token_stored - staker.reward_per_token_paid)
        / scale();
    staker.pending += Uint128::try_from(delta).map_err(StdError::from)?;
    staker.reward_per_token_paid = state.reward_per_token_stored;
    Ok(())
}

/// Claimable amount for an account at `now`, without mutating storage.
pub fn earned(
    state: &RewardState,
    staker: &StakerState,
    now: Timestamp,
) -> Result<Uint128, ContractError> {
    let mut projected = state.clone();
    settle_global(&mut projected, now);
    let delta = Uint256::from(staker.staked)
        * (projected.reward_per_token_stored - staker.reward_per_token_paid)
        / scale();
    Ok(staker.pending + Uint128::try_from(delta).map_err(StdError::from)?)
}

pub fn stake(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    let amount = one_coin(&info, &config.staking_denom)?;

    let mut state = REWARD.load(deps.storage)?;
    settle_global(&mut state, env.block.time);
    let mut staker = STAKERS
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_default();
    settle_account(&state, &mut staker)?;

    staker.staked += amount;
    state.total_staked += amount;
    STAKERS.save(deps.storage, &info.sender, &staker)?;
    REWARD.save(deps.storage, &state)?;

    Ok(Response::new()
        .add_attribute("action", "stake")
        .add_attribute("user", info.sender.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("vaultic_stake")
                .add_attribute("user", info.sender.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("total_staked", state.total_staked.to_string()),
        ))
}

pub fn withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let mut state = REWARD.load(deps.storage)?;
    settle_global(&mut state, env.block.time);
    let mut staker = STAKERS
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_default();
    settle_account(&state, &mut staker)?;

    if staker.staked < amount {
        return Err(ContractError::InsufficientStake {
            available: staker.staked,
            requested: amount,
        });
    }
    staker.staked -= amount;
    state.total_staked -= amount;
    STAKERS.save(deps.storage, &info.sender, &staker)?;
    REWARD.save(deps.storage, &state)?;

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: coins(amount.u128(), &config.staking_denom),
        })
        .add_attribute("action", "withdraw")
        .add_attribute("user", info.sender.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("vaultic_withdraw")
                .add_attribute("user", info.sender.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("total_staked", state.total_staked.to_string()),
        ))
}

/// Pay out pending rewards. Zero pending is a successful no-op so callers
/// composing claim into larger flows never trip over it.
pub fn claim(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;

    let mut state = REWARD.load(deps.storage)?;
    settle_global(&mut state, env.block.time);
    let mut staker = STAKERS
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_default();
    settle_account(&state, &mut staker)?;

    let reward = staker.pending;
    staker.pending = Uint128::zero();
    STAKERS.save(deps.storage, &info.sender, &staker)?;
    REWARD.save(deps.storage, &state)?;

    let mut response = Response::new()
        .add_attribute("action", "claim")
        .add_attribute("user", info.sender.to_string())
        .add_attribute("reward", reward.to_string())
        .add_event(
            Event::new("vaultic_claim")
                .add_attribute("user", info.sender.to_string())
                .add_attribute("reward", reward.to_string()),
        );

    if !reward.is_zero() {
        let available = deps
            .querier
            .query_balance(&env.contract.address, &config.reward_denom)?
            .amount;
        if available < reward {
            return Err(ContractError::InsufficientRewardBalance {
                available,
                requested: reward,
            });
        }
        response = response.add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: coins(reward.u128(), &config.reward_denom),
        });
    }
    Ok(response)
}

/// Start a new emission schedule. Rejected while a previous schedule is still
/// inside its window so the rate cannot be changed mid-stream.
pub fn set_schedule(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    rate: Uint128,
    start_time: u64,
    finish_time: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "set the reward schedule")?;
    if rate.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let mut state = REWARD.load(deps.storage)?;
    if let Some(window) = state.window {
        if env.block.time < window.finish {
            return Err(ContractError::ScheduleActive {
                finish: window.finish.seconds(),
            });
        }
    }
    // Fold the tail of the previous schedule before replacing it.
    settle_global(&mut state, env.block.time);

    let window = TimeWindow::new(
        Timestamp::from_seconds(start_time),
        Timestamp::from_seconds(finish_time),
    )?;

    let required = rate.checked_mul(Uint128::from(finish_time - start_time))
        .map_err(StdError::from)?;
    let provided = one_coin(&info, &config.reward_denom)?;
    if provided < required {
        return Err(ContractError::InsufficientRewardFunding { required, provided });
    }

    state.reward_rate = rate;
    state.window = Some(window);
    state.last_update = if env.block.time > window.start {
        env.block.time
    } else {
        window.start
    };
    REWARD.save(deps.storage, &state)?;

    Ok(Response::new()
        .add_attribute("action", "set_schedule")
        .add_attribute("rate", rate.to_string())
        .add_event(
            Event::new("vaultic_schedule_set")
                .add_attribute("rate", rate.to_string())
                .add_attribute("start", start_time.to_string())
                .add_attribute("finish", finish_time.to_string())
                .add_attribute("funding", provided.to_string()),
        ))
}

pub fn pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "pause")?;
    PAUSED.save(deps.storage, &true)?;
    Ok(Response::new()
        .add_attribute("action", "pause")
        .add_event(Event::new("vaultic_paused")))
}

pub fn unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "unpause")?;
    PAUSED.save(deps.storage, &false)?;
    Ok(Response::new()
        .add_attribute("action", "unpause")
        .add_event(Event::new("vaultic_unpaused")))
}

pub fn emergency_withdraw(
    deps: DepsMut,
    info: MessageInfo,
    denom: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "emergency withdraw")?;
    if !PAUSED.load(deps.storage)? {
        return Err(ContractError::NotPaused);
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: config.admin.to_string(),
            amount: coins(amount.u128(), &denom),
        })
        .add_attribute("action", "emergency_withdraw")
        .add_attribute("denom", denom.clone())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("vaultic_emergency_withdraw")
                .add_attribute("denom", denom)
                .add_attribute("amount", amount.to_string()),
        ))
}
