use cosmwasm_std::{
    coin, coins, to_json_binary, Addr, BankMsg, Deps, DepsMut, Env, Event, MessageInfo, Response,
    StdError, StdResult, Storage, Uint128, WasmMsg,
};

use crate::error::ContractError;
use crate::msg::{FactoryQueryMsg, PairExecuteMsg, PairResponse};
use crate::state::{
    Config, Phase, ACCOUNTS, CONFIG, OUTCOME, PAUSED, TOTAL_CREDITED, TOTAL_EXCHANGED,
};

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

fn ensure_phase(config: &Config, env: &Env, expected: Phase) -> Result<(), ContractError> {
    let actual = config.phase(env.block.time);
    if actual != expected {
        return Err(ContractError::WrongPhase {
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
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

/// Deposit token_b during the open window; token_a is credited at the fixed
/// rate, payable on claim once the pool exists.
pub fn exchange(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    ensure_phase(&config, &env, Phase::Open)?;
    let amount = one_coin(&info, &config.token_b)?;

    if let Some(gate) = &config.pass_gate {
        let held = deps
            .querier
            .query_balance(&info.sender, &gate.denom)?
            .amount;
        if held < gate.min_balance {
            return Err(ContractError::PassRequired {
                denom: gate.denom.clone(),
                min_balance: gate.min_balance,
            });
        }
    }

    let mut account = ACCOUNTS
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_default();
    if account.deposited + amount > config.max_exchange_per_address {
        return Err(ContractError::AddressCapExceeded {
            cap: config.max_exchange_per_address,
        });
    }
    let total = TOTAL_EXCHANGED.load(deps.storage)?;
    if total + amount > config.max_total_exchange {
        return Err(ContractError::GlobalCapExceeded {
            cap: config.max_total_exchange,
        });
    }

    let credited = amount
        .checked_mul(config.exchange_rate)
        .map_err(StdError::overflow)?;
    account.deposited += amount;
    account.credited += credited;
    ACCOUNTS.save(deps.storage, &info.sender, &account)?;
    TOTAL_EXCHANGED.save(deps.storage, &(total + amount))?;
    let total_credited = TOTAL_CREDITED.load(deps.storage)?;
    TOTAL_CREDITED.save(deps.storage, &(total_credited + credited))?;

    Ok(Response::new()
        .add_attribute("action", "exchange")
        .add_attribute("user", info.sender.to_string())
        .add_attribute("deposited", amount.to_string())
        .add_attribute("credited", credited.to_string())
        .add_event(
            Event::new("vaultic_exchange")
                .add_attribute("user", info.sender.to_string())
                .add_attribute("deposited", amount.to_string())
                .add_attribute("credited", credited.to_string())
                .add_attribute("total_exchanged", (total + amount).to_string()),
        ))
}

/// Commit the raised token_b plus the matching token_a to the pair. Admin
/// only, once the exchange window has ended. If the factory already reports
/// a pair for the denoms, the launch flips to refundable instead; either
/// outcome is terminal.
pub fn create_pool(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "create the pool")?;
    ensure_phase(&config, &env, Phase::Ended)?;

    let mut outcome = OUTCOME.load(deps.storage)?;
    if outcome.pool_created || outcome.refundable {
        return Err(ContractError::AlreadyResolved);
    }

    let raised = TOTAL_EXCHANGED.load(deps.storage)?;
    if raised < config.min_total_exchange {
        return Err(ContractError::MinimumNotReached {
            raised,
            minimum: config.min_total_exchange,
        });
    }

    // The factory errors when no pair exists; a successful response means
    // someone front-ran the pair creation and seeding it would hand them the
    // pricing. Fail over to refunds.
    let existing: StdResult<PairResponse> = deps.querier.query_wasm_smart(
        &config.factory,
        &FactoryQueryMsg::Pair {
            denoms: [config.token_a.clone(), config.token_b.clone()],
        },
    );
    if existing.is_ok() {
        outcome.refundable = true;
        OUTCOME.save(deps.storage, &outcome)?;
        return Ok(Response::new()
            .add_attribute("action", "create_pool")
            .add_attribute("refundable", "true")
            .add_event(
                Event::new("vaultic_launch_refundable")
                    .add_attribute("reason", "pair already exists"),
            ));
    }

    let liquidity_a = raised
        .checked_mul(config.exchange_rate)
        .map_err(StdError::overflow)?;
    let reserved_a = TOTAL_CREDITED.load(deps.storage)?;
    // The pool side of token_a must not eat into what claimants are owed.
    ensure_payable(deps.as_ref(), &env, &config.token_a, liquidity_a + reserved_a)?;
    ensure_payable(deps.as_ref(), &env, &config.token_b, raised)?;

    outcome.pool_created = true;
    OUTCOME.save(deps.storage, &outcome)?;

    Ok(Response::new()
        .add_message(WasmMsg::Execute {
            contract_addr: config.pair.to_string(),
            msg: to_json_binary(&PairExecuteMsg::ProvideLiquidity {})?,
            funds: vec![
                coin(liquidity_a.u128(), &config.token_a),
                coin(raised.u128(), &config.token_b),
            ],
        })
        .add_attribute("action", "create_pool")
        .add_attribute("liquidity_a", liquidity_a.to_string())
        .add_attribute("liquidity_b", raised.to_string())
        .add_event(
            Event::new("vaultic_pool_created")
                .add_attribute("pair", config.pair.to_string())
                .add_attribute("liquidity_a", liquidity_a.to_string())
                .add_attribute("liquidity_b", raised.to_string()),
        ))
}

/// Collect the credited token_a. Available only after the pool exists;
/// zeroes the whole account so a later refund finds nothing.
pub fn claim(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    let outcome = OUTCOME.load(deps.storage)?;
    if !outcome.pool_created {
        return Err(ContractError::PoolNotCreated);
    }

    let account = ACCOUNTS
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_default();
    if account.credited.is_zero() {
        return Err(ContractError::NothingToClaim);
    }
    ensure_payable(deps.as_ref(), &env, &config.token_a, account.credited)?;

    ACCOUNTS.remove(deps.storage, &info.sender);

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: coins(account.credited.u128(), &config.token_a),
        })
        .add_attribute("action", "claim")
        .add_attribute("user", info.sender.to_string())
        .add_attribute("amount", account.credited.to_string())
        .add_event(
            Event::new("vaultic_claimed")
                .add_attribute("user", info.sender.to_string())
                .add_attribute("amount", account.credited.to_string()),
        ))
}

/// Return the exact token_b deposit. Available once the launch has failed:
/// either the minimum was never reached after the window ended, or the
/// refundable flag was raised. Zeroes the whole account.
pub fn refund(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    let outcome = OUTCOME.load(deps.storage)?;

    if !outcome.refundable {
        if outcome.pool_created {
            return Err(ContractError::NotRefundable);
        }
        let phase = config.phase(env.block.time);
        if phase == Phase::NotStarted || phase == Phase::Open {
            return Err(ContractError::NotRefundable);
        }
        let raised = TOTAL_EXCHANGED.load(deps.storage)?;
        if raised >= config.min_total_exchange {
            return Err(ContractError::NotRefundable);
        }
    }

    let account = ACCOUNTS
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_default();
    if account.deposited.is_zero() {
        return Err(ContractError::NothingToRefund);
    }
    ensure_payable(deps.as_ref(), &env, &config.token_b, account.deposited)?;

    ACCOUNTS.remove(deps.storage, &info.sender);

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: coins(account.deposited.u128(), &config.token_b),
        })
        .add_attribute("action", "refund")
        .add_attribute("user", info.sender.to_string())
        .add_attribute("amount", account.deposited.to_string())
        .add_event(
            Event::new("vaultic_refunded")
                .add_attribute("user", info.sender.to_string())
                .add_attribute("amount", account.deposited.to_string()),
        ))
}

/// Recover whatever is left of `denom` after the close time. Admin only.
pub fn sweep(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    denom: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info.sender, "sweep")?;
    ensure_phase(&config, &env, Phase::Closed)?;

    let balance = deps
        .querier
        .query_balance(&env.contract.address, &denom)?
        .amount;
    if balance.is_zero() {
        return Err(ContractError::NothingToSweep);
    }

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: config.admin.to_string(),
            amount: coins(balance.u128(), &denom),
        })
        .add_attribute("action", "sweep")
        .add_attribute("denom", denom.clone())
        .add_attribute("amount", balance.to_string())
        .add_event(
            Event::new("vaultic_swept")
                .add_attribute("denom", denom)
                .add_attribute("amount", balance.to_string()),
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
