use cosmwasm_std::{
    coins, Addr, BankMsg, Deps, DepsMut, Env, Event, MessageInfo, Response, Storage, Timestamp,
    Uint128,
};
use vaultic_common::TimeWindow;

use crate::error::ContractError;
use crate::state::{Config, Grant, CONFIG, GRANTS, PAUSED};

pub fn ensure_not_paused(storage: &dyn Storage) -> Result<(), ContractError> {
    if PAUSED.load(storage)? {
        return Err(ContractError::Paused);
    }
    Ok(())
}

pub fn ensure_admin(config: &Config, sender: &Addr, action: &str) -> Result<(), ContractError> {
    if sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: format!("only admin can {action}"),
        });
    }
    Ok(())
}

fn one_coin(info: &MessageInfo, expected: &str) -> Result<Uint128, ContractError> {
    if info.funds.len() != 1 {
        return Err(ContractError::InvalidFunds);
    }
    let sent = &info.funds[0];
    if sent.denom != expected {
        return Err(ContractError::WrongDenom {
            expected: expected.to_string(),
            actual: sent.denom.clone(),
        });
    }
    if sent.amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    Ok(sent.amount)
}

/// Unlocked-but-unreleased portion of a grant at `now`.
pub fn releasable(grant: &Grant, now: Timestamp) -> Uint128 {
    grant
        .window
        .unlocked_amount(grant.vest_base, now)
        .saturating_sub(grant.released)
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

/// Fund a grant for `recipient`. The instant percentage is paid out in the
/// same transaction; the remainder vests linearly from now.
pub fn register(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "register grants")?;
    let total = one_coin(&info, &config.denom)?;

    let recipient = deps.api.addr_validate(&recipient)?;
    if GRANTS.has(deps.storage, &recipient) {
        return Err(ContractError::GrantExists {
            recipient: recipient.to_string(),
        });
    }

    let instant = total.multiply_ratio(config.instant_percentage, 100u64);
    let vest_base = total - instant;
    let window = TimeWindow::new(
        env.block.time,
        env.block.time.plus_seconds(config.release_duration),
    )?;

    let grant = Grant {
        total,
        instant_paid: instant,
        vest_base,
        window,
        released: Uint128::zero(),
    };
    GRANTS.save(deps.storage, &recipient, &grant)?;

    let mut response = Response::new()
        .add_attribute("action", "register")
        .add_attribute("recipient", recipient.to_string())
        .add_attribute("total", total.to_string())
        .add_attribute("instant", instant.to_string())
        .add_event(
            Event::new("vaultic_grant_registered")
                .add_attribute("recipient", recipient.to_string())
                .add_attribute("total", total.to_string())
                .add_attribute("instant", instant.to_string())
                .add_attribute("vest_base", vest_base.to_string())
                .add_attribute("finish", window.finish.seconds().to_string()),
        );
    if !instant.is_zero() {
        response = response.add_message(BankMsg::Send {
            to_address: recipient.to_string(),
            amount: coins(instant.u128(), &config.denom),
        });
    }
    Ok(response)
}

/// Send the caller everything their window has unlocked so far.
pub fn release(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;

    let mut grant = GRANTS
        .may_load(deps.storage, &info.sender)?
        .ok_or_else(|| ContractError::NoGrant {
            address: info.sender.to_string(),
        })?;

    let amount = releasable(&grant, env.block.time);
    if amount.is_zero() {
        return Err(ContractError::NothingReleasable);
    }
    ensure_payable(deps.as_ref(), &env, &config.denom, amount)?;

    grant.released += amount;
    GRANTS.save(deps.storage, &info.sender, &grant)?;

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: coins(amount.u128(), &config.denom),
        })
        .add_attribute("action", "release")
        .add_attribute("recipient", info.sender.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("vaultic_released")
                .add_attribute("recipient", info.sender.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("total_released", grant.released.to_string()),
        ))
}

/// Push a grant's release finish later. Admin only; shrinking is rejected.
pub fn extend_vesting(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    new_finish: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "extend vesting")?;

    let recipient = deps.api.addr_validate(&recipient)?;
    let mut grant = GRANTS
        .may_load(deps.storage, &recipient)?
        .ok_or_else(|| ContractError::NoGrant {
            address: recipient.to_string(),
        })?;
    grant.window.extend(Timestamp::from_seconds(new_finish))?;
    GRANTS.save(deps.storage, &recipient, &grant)?;

    Ok(Response::new()
        .add_attribute("action", "extend_vesting")
        .add_attribute("recipient", recipient.to_string())
        .add_attribute("new_finish", new_finish.to_string())
        .add_event(
            Event::new("vaultic_vesting_extended")
                .add_attribute("recipient", recipient.to_string())
                .add_attribute("new_finish", new_finish.to_string()),
        ))
}

pub fn pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "pause")?;
    PAUSED.save(deps.storage, &true)?;
    Ok(Response::new()
        .add_attribute("action", "pause")
        .add_event(Event::new("vaultic_paused")))
}

pub fn unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "unpause")?;
    PAUSED.save(deps.storage, &false)?;
    Ok(Response::new()
        .add_attribute("action", "unpause")
        .add_event(Event::new("vaultic_unpaused")))
}

/// Recover funds while paused. Admin only; the one deliberate bypass of
/// grant accounting.
pub fn emergency_withdraw(
    deps: DepsMut,
    info: MessageInfo,
    denom: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "emergency withdraw")?;
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
