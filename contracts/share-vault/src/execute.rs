use cosmwasm_std::{
    coins, Addr, BankMsg, Deps, DepsMut, Env, Event, MessageInfo, Response, Storage, Timestamp,
    Uint128,
};
use vaultic_common::TimeWindow;

use crate::error::ContractError;
use crate::state::{Config, CONFIG, LAST_DEPOSIT, PAUSED, SHARES, TOTAL_REWARDS, TOTAL_SHARES};

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

/// Validate that exactly one coin of the expected denom was sent, return its amount.
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

/// The redeemable pool: the contract's deposit-denom balance minus the
/// portion of injected rewards the window has not yet released.
pub fn spendable_pool(deps: Deps, env: &Env, config: &Config) -> Result<Uint128, ContractError> {
    let balance = deps
        .querier
        .query_balance(&env.contract.address, &config.deposit_denom)?
        .amount;
    let frozen = frozen_rewards(deps.storage, &config.window, env.block.time)?;
    Ok(balance.saturating_sub(frozen))
}

pub fn frozen_rewards(
    storage: &dyn Storage,
    window: &TimeWindow,
    now: Timestamp,
) -> Result<Uint128, ContractError> {
    let total_rewards = TOTAL_REWARDS.load(storage)?;
    Ok(window.locked_amount(total_rewards, now))
}

fn cooldown_gate(
    storage: &dyn Storage,
    config: &Config,
    account: &Addr,
    now: Timestamp,
) -> Result<(), ContractError> {
    if let Some(last) = LAST_DEPOSIT.may_load(storage, account)? {
        let until = last.plus_seconds(config.cooldown_seconds);
        if now < until {
            return Err(ContractError::CooldownActive {
                until: until.seconds(),
            });
        }
    }
    Ok(())
}

/// Deposit the pool denom, mint shares at the current exchange rate.
pub fn deposit(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    let amount = one_coin(&info, &config.deposit_denom)?;

    if !config.window.contains(env.block.time) {
        return Err(ContractError::OutsideWindow {
            start: config.window.start.seconds(),
            finish: config.window.finish.seconds(),
        });
    }

    let total_shares = TOTAL_SHARES.load(deps.storage)?;
    let minted = if total_shares.is_zero() {
        // Bootstrap 1:1
        amount
    } else {
        // The just-received funds are already in the bank balance; price the
        // deposit against the pool as it stood before this call. Floor
        // division, so rounding favors the pool.
        let pool = spendable_pool(deps.as_ref(), &env, &config)?.saturating_sub(amount);
        if pool.is_zero() {
            return Err(ContractError::EmptyPool);
        }
        amount.multiply_ratio(total_shares, pool)
    };

    TOTAL_SHARES.save(deps.storage, &(total_shares + minted))?;
    let shares = SHARES
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_default();
    SHARES.save(deps.storage, &info.sender, &(shares + minted))?;
    LAST_DEPOSIT.save(deps.storage, &info.sender, &env.block.time)?;

    Ok(Response::new()
        .add_attribute("action", "deposit")
        .add_attribute("user", info.sender.to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("shares_minted", minted.to_string())
        .add_event(
            Event::new("vaultic_deposit")
                .add_attribute("user", info.sender.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("shares_minted", minted.to_string()),
        ))
}

/// Add rewards to the pool without minting shares. Operator only.
pub fn inject_reward(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.operator {
        return Err(ContractError::Unauthorized {
            reason: "only operator can inject rewards".to_string(),
        });
    }
    let amount = one_coin(&info, &config.deposit_denom)?;

    // Once the distribution window has closed the exchange rate is final;
    // late injections would dilute nobody and reward snipers.
    if config.window.finished(env.block.time) {
        return Err(ContractError::RewardWindowClosed {
            finish: config.window.finish.seconds(),
        });
    }

    let total = TOTAL_REWARDS.load(deps.storage)?;
    TOTAL_REWARDS.save(deps.storage, &(total + amount))?;

    Ok(Response::new()
        .add_attribute("action", "inject_reward")
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("vaultic_reward_injected")
                .add_attribute("operator", info.sender.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("total_rewards", (total + amount).to_string()),
        ))
}

/// Burn shares for the proportional slice of the spendable pool.
pub fn redeem(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    shares: Uint128,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;

    if shares.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    cooldown_gate(deps.storage, &config, &info.sender, env.block.time)?;

    let held = SHARES
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_default();
    if held < shares {
        return Err(ContractError::InsufficientShares {
            available: held,
            requested: shares,
        });
    }

    let total_shares = TOTAL_SHARES.load(deps.storage)?;
    let pool = spendable_pool(deps.as_ref(), &env, &config)?;
    let amount = shares.multiply_ratio(pool, total_shares);

    // Burn before the bank send.
    let remaining = held - shares;
    if remaining.is_zero() {
        SHARES.remove(deps.storage, &info.sender);
    } else {
        SHARES.save(deps.storage, &info.sender, &remaining)?;
    }
    TOTAL_SHARES.save(deps.storage, &(total_shares - shares))?;

    let mut response = Response::new()
        .add_attribute("action", "redeem")
        .add_attribute("user", info.sender.to_string())
        .add_attribute("shares_burned", shares.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("vaultic_redeem")
                .add_attribute("user", info.sender.to_string())
                .add_attribute("shares_burned", shares.to_string())
                .add_attribute("amount", amount.to_string()),
        );
    if !amount.is_zero() {
        response = response.add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: coins(amount.u128(), &config.deposit_denom),
        });
    }
    Ok(response)
}

/// Move shares to another account. The sender's deposit cooldown applies,
/// otherwise a fresh depositor could hand shares to a clean account and
/// redeem around the gate.
pub fn transfer_shares(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;

    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    cooldown_gate(deps.storage, &config, &info.sender, env.block.time)?;

    let recipient = deps.api.addr_validate(&recipient)?;
    let held = SHARES
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_default();
    if held < amount {
        return Err(ContractError::InsufficientShares {
            available: held,
            requested: amount,
        });
    }

    let remaining = held - amount;
    if remaining.is_zero() {
        SHARES.remove(deps.storage, &info.sender);
    } else {
        SHARES.save(deps.storage, &info.sender, &remaining)?;
    }
    let existing = SHARES
        .may_load(deps.storage, &recipient)?
        .unwrap_or_default();
    SHARES.save(deps.storage, &recipient, &(existing + amount))?;

    Ok(Response::new()
        .add_attribute("action", "transfer_shares")
        .add_attribute("from", info.sender.to_string())
        .add_attribute("to", recipient.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("vaultic_share_transfer")
                .add_attribute("from", info.sender.to_string())
                .add_attribute("to", recipient.to_string())
                .add_attribute("amount", amount.to_string()),
        ))
}

/// Move the window finish later. Admin only; shrinking is rejected.
pub fn extend_window(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    new_finish: u64,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "extend the window")?;

    config
        .window
        .extend(Timestamp::from_seconds(new_finish))?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "extend_window")
        .add_attribute("new_finish", new_finish.to_string())
        .add_event(
            Event::new("vaultic_window_extended").add_attribute("new_finish", new_finish.to_string()),
        ))
}

pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    admin: Option<String>,
    operator: Option<String>,
    cooldown_seconds: Option<u64>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "update config")?;

    if let Some(new_admin) = admin {
        config.admin = deps.api.addr_validate(&new_admin)?;
    }
    if let Some(new_operator) = operator {
        config.operator = deps.api.addr_validate(&new_operator)?;
    }
    if let Some(new_cooldown) = cooldown_seconds {
        config.cooldown_seconds = new_cooldown;
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
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
/// share accounting.
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
