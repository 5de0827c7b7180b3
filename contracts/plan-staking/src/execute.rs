use cosmwasm_std::{
    coins, BankMsg, Coin, Deps, DepsMut, Env, Event, MessageInfo, Response, StdError, Storage,
    Uint128, Uint256,
};

use crate::error::ContractError;
use crate::msg::{PairQueryMsg, PoolResponse};
use crate::state::{
    Config, Plan, PlanDenomination, Stake, CONFIG, NEXT_STAKE_ID, PAUSED, PLANS, PLAN_COUNT,
    STAKES,
};

/// Julian year, matching the reward formula's annualization.
pub const SECONDS_PER_YEAR: u64 = 31_557_600;

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

fn load_plan(storage: &dyn Storage, plan_id: u64) -> Result<Plan, ContractError> {
    PLANS
        .may_load(storage, plan_id)?
        .ok_or(ContractError::PlanNotFound { plan_id })
}

/// Plan-capacity value of a stake. Identity for token plans; for LP plans the
/// stake's claim on the protocol-token reserve, doubled to represent both
/// pool sides. Spot reserves with no time-weighting: advisory only.
pub fn stake_value(
    deps: Deps,
    config: &Config,
    denomination: &PlanDenomination,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    match denomination {
        PlanDenomination::Token => Ok(amount),
        PlanDenomination::Lp { pair, .. } => {
            let pool: PoolResponse = deps
                .querier
                .query_wasm_smart(pair, &PairQueryMsg::Pool {})?;
            if pool.total_share.is_zero() {
                return Err(ContractError::EmptyLpSupply);
            }
            let paired_reserve = pool
                .assets
                .iter()
                .find(|c| c.denom == config.stake_denom)
                .map(|c| c.amount)
                .ok_or_else(|| ContractError::PairedReserveMissing {
                    denom: config.stake_denom.clone(),
                })?;
            let numerator = Uint256::from(amount)
                .checked_mul(Uint256::from(paired_reserve))
                .map_err(StdError::overflow)?
                .checked_mul(Uint256::from(2u8))
                .map_err(StdError::overflow)?;
            let value = numerator / Uint256::from(pool.total_share);
            Ok(Uint128::try_from(value).map_err(StdError::from)?)
        }
    }
}

/// `value * apr * duration / SECONDS_PER_YEAR / 100`, floored. The apr is the
/// plan's current one, not a snapshot from stake time.
pub fn plan_reward(
    value: Uint128,
    apr: Uint128,
    duration_seconds: u64,
) -> Result<Uint128, ContractError> {
    let numerator =
        Uint256::from(value) * Uint256::from(apr) * Uint256::from(duration_seconds);
    let reward = numerator / Uint256::from(SECONDS_PER_YEAR as u128 * 100);
    Ok(Uint128::try_from(reward).map_err(StdError::from)?)
}

fn staked_denom<'a>(config: &'a Config, plan: &'a Plan) -> &'a str {
    match &plan.denomination {
        PlanDenomination::Token => &config.stake_denom,
        PlanDenomination::Lp { lp_denom, .. } => lp_denom,
    }
}

pub fn add_plan(
    deps: DepsMut,
    info: MessageInfo,
    duration_seconds: u64,
    apr: Uint128,
    capacity: Uint128,
    denomination: PlanDenomination,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "add plans")?;
    if duration_seconds == 0 {
        return Err(ContractError::ZeroDuration);
    }

    if let PlanDenomination::Lp { pair, .. } = &denomination {
        deps.api.addr_validate(pair.as_str())?;
    }

    let plan_id = PLAN_COUNT.load(deps.storage)?;
    let plan = Plan {
        duration_seconds,
        apr,
        capacity,
        total_committed_value: Uint128::zero(),
        frozen: false,
        denomination,
    };
    PLANS.save(deps.storage, plan_id, &plan)?;
    PLAN_COUNT.save(deps.storage, &(plan_id + 1))?;

    Ok(Response::new()
        .add_attribute("action", "add_plan")
        .add_attribute("plan_id", plan_id.to_string())
        .add_event(
            Event::new("vaultic_plan_added")
                .add_attribute("plan_id", plan_id.to_string())
                .add_attribute("duration_seconds", duration_seconds.to_string())
                .add_attribute("apr", apr.to_string())
                .add_attribute("capacity", capacity.to_string()),
        ))
}

pub fn update_plan(
    deps: DepsMut,
    info: MessageInfo,
    plan_id: u64,
    duration_seconds: Option<u64>,
    apr: Option<Uint128>,
    capacity: Option<Uint128>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "update plans")?;

    let mut plan = load_plan(deps.storage, plan_id)?;
    if let Some(duration) = duration_seconds {
        if duration == 0 {
            return Err(ContractError::ZeroDuration);
        }
        plan.duration_seconds = duration;
    }
    if let Some(apr) = apr {
        plan.apr = apr;
    }
    if let Some(capacity) = capacity {
        if capacity < plan.total_committed_value {
            return Err(ContractError::CapacityBelowCommitted {
                requested: capacity,
                committed: plan.total_committed_value,
            });
        }
        plan.capacity = capacity;
    }
    PLANS.save(deps.storage, plan_id, &plan)?;

    Ok(Response::new()
        .add_attribute("action", "update_plan")
        .add_attribute("plan_id", plan_id.to_string())
        .add_event(
            Event::new("vaultic_plan_updated")
                .add_attribute("plan_id", plan_id.to_string())
                .add_attribute("duration_seconds", plan.duration_seconds.to_string())
                .add_attribute("apr", plan.apr.to_string())
                .add_attribute("capacity", plan.capacity.to_string()),
        ))
}

pub fn freeze_plan(
    deps: DepsMut,
    info: MessageInfo,
    plan_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "freeze plans")?;

    let mut plan = load_plan(deps.storage, plan_id)?;
    plan.frozen = true;
    PLANS.save(deps.storage, plan_id, &plan)?;

    Ok(Response::new()
        .add_attribute("action", "freeze_plan")
        .add_attribute("plan_id", plan_id.to_string())
        .add_event(Event::new("vaultic_plan_frozen").add_attribute("plan_id", plan_id.to_string())))
}

pub fn stake(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    plan_id: u64,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    let mut plan = load_plan(deps.storage, plan_id)?;
    if plan.frozen {
        return Err(ContractError::PlanFrozen { plan_id });
    }

    let amount = one_coin(&info, staked_denom(&config, &plan))?;
    if amount < config.min_stake {
        return Err(ContractError::StakeBelowMinimum {
            amount,
            min_stake: config.min_stake,
        });
    }

    let value = stake_value(deps.as_ref(), &config, &plan.denomination, amount)?;
    let committed = plan.total_committed_value;
    if committed + value > plan.capacity {
        return Err(ContractError::CapacityExceeded {
            plan_id,
            committed,
            value,
            capacity: plan.capacity,
        });
    }
    plan.total_committed_value = committed + value;
    PLANS.save(deps.storage, plan_id, &plan)?;

    let stake_id = NEXT_STAKE_ID
        .may_load(deps.storage, &info.sender)?
        .unwrap_or(0);
    let stake = Stake {
        plan_id,
        amount,
        value,
        start_time: env.block.time,
        duration_seconds: plan.duration_seconds,
        claimed: false,
    };
    STAKES.save(deps.storage, (&info.sender, stake_id), &stake)?;
    NEXT_STAKE_ID.save(deps.storage, &info.sender, &(stake_id + 1))?;

    Ok(Response::new()
        .add_attribute("action", "stake")
        .add_attribute("user", info.sender.to_string())
        .add_attribute("plan_id", plan_id.to_string())
        .add_attribute("stake_id", stake_id.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("vaultic_plan_stake")
                .add_attribute("user", info.sender.to_string())
                .add_attribute("plan_id", plan_id.to_string())
                .add_attribute("stake_id", stake_id.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("value", value.to_string()),
        ))
}

fn ensure_payable(
    deps: Deps,
    env: &Env,
    denom: &str,
    required: Uint128,
) -> Result<(), ContractError> {
    let available = deps
        .querier
        .query_balance(&env.contract.address, denom)?
        .amount;
    if available < required {
        return Err(ContractError::InsufficientBalance {
            denom: denom.to_string(),
            available,
            required,
        });
    }
    Ok(())
}

pub fn claim(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    stake_id: u64,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;

    let mut stake = STAKES
        .may_load(deps.storage, (&info.sender, stake_id))?
        .ok_or(ContractError::StakeNotFound {
            address: info.sender.to_string(),
            stake_id,
        })?;
    if stake.claimed {
        return Err(ContractError::StakeAlreadyClaimed { stake_id });
    }
    let matures_at = stake.start_time.plus_seconds(stake.duration_seconds);
    if env.block.time < matures_at {
        return Err(ContractError::StakeLocked {
            stake_id,
            matures_at: matures_at.seconds(),
        });
    }

    let mut plan = load_plan(deps.storage, stake.plan_id)?;
    let reward = plan_reward(stake.value, plan.apr, stake.duration_seconds)?;
    let denom = staked_denom(&config, &plan).to_string();

    // Payout messages: principal in the staked denom, reward in the protocol
    // token. Token plans collapse into a single send.
    let payout: Vec<Coin> = if denom == config.stake_denom {
        ensure_payable(deps.as_ref(), &env, &denom, stake.amount + reward)?;
        coins((stake.amount + reward).u128(), &denom)
    } else {
        ensure_payable(deps.as_ref(), &env, &denom, stake.amount)?;
        ensure_payable(deps.as_ref(), &env, &config.stake_denom, reward)?;
        let mut list = coins(stake.amount.u128(), &denom);
        if !reward.is_zero() {
            list.extend(coins(reward.u128(), &config.stake_denom));
        }
        list
    };

    stake.claimed = true;
    STAKES.save(deps.storage, (&info.sender, stake_id), &stake)?;
    plan.total_committed_value = plan.total_committed_value.saturating_sub(stake.value);
    PLANS.save(deps.storage, stake.plan_id, &plan)?;

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: payout,
        })
        .add_attribute("action", "claim")
        .add_attribute("user", info.sender.to_string())
        .add_attribute("stake_id", stake_id.to_string())
        .add_attribute("reward", reward.to_string())
        .add_event(
            Event::new("vaultic_plan_claim")
                .add_attribute("user", info.sender.to_string())
                .add_attribute("stake_id", stake_id.to_string())
                .add_attribute("principal", stake.amount.to_string())
                .add_attribute("reward", reward.to_string()),
        ))
}

/// Early exit: principal only, reward forfeited. Works at any time before
/// claim, matured or not.
pub fn withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    stake_id: u64,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;

    let mut stake = STAKES
        .may_load(deps.storage, (&info.sender, stake_id))?
        .ok_or(ContractError::StakeNotFound {
            address: info.sender.to_string(),
            stake_id,
        })?;
    if stake.claimed {
        return Err(ContractError::StakeAlreadyClaimed { stake_id });
    }

    let mut plan = load_plan(deps.storage, stake.plan_id)?;
    let denom = staked_denom(&config, &plan).to_string();
    ensure_payable(deps.as_ref(), &env, &denom, stake.amount)?;

    stake.claimed = true;
    STAKES.save(deps.storage, (&info.sender, stake_id), &stake)?;
    plan.total_committed_value = plan.total_committed_value.saturating_sub(stake.value);
    PLANS.save(deps.storage, stake.plan_id, &plan)?;

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: coins(stake.amount.u128(), &denom),
        })
        .add_attribute("action", "withdraw")
        .add_attribute("user", info.sender.to_string())
        .add_attribute("stake_id", stake_id.to_string())
        .add_event(
            Event::new("vaultic_plan_withdraw")
                .add_attribute("user", info.sender.to_string())
                .add_attribute("stake_id", stake_id.to_string())
                .add_attribute("principal", stake.amount.to_string()),
        ))
}

pub fn update_config(
    deps: DepsMut,
    info: MessageInfo,
    admin: Option<String>,
    min_stake: Option<Uint128>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "update config")?;

    if let Some(new_admin) = admin {
        config.admin = deps.api.addr_validate(&new_admin)?;
    }
    if let Some(new_min) = min_stake {
        config.min_stake = new_min;
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
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
