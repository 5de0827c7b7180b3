use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Timestamp, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query;
use crate::state::{
    Config, Outcome, CONFIG, MIN_CLOSE_GAP_SECONDS, OUTCOME, PAUSED, TOTAL_CREDITED,
    TOTAL_EXCHANGED,
};

const CONTRACT_NAME: &str = "crates.io:vaultic-fair-launch";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.start_time >= msg.end_time {
        return Err(ContractError::InvalidSchedule {
            reason: "end_time must be after start_time".to_string(),
        });
    }
    let close_gap_ok = msg
        .end_time
        .checked_add(MIN_CLOSE_GAP_SECONDS)
        .is_some_and(|min_close| msg.close_time >= min_close);
    if !close_gap_ok {
        return Err(ContractError::InvalidSchedule {
            reason: "close_time must be at least 24h after end_time".to_string(),
        });
    }
    if msg.token_a == msg.token_b {
        return Err(ContractError::InvalidSchedule {
            reason: "token_a and token_b must differ".to_string(),
        });
    }
    if msg.exchange_rate.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let config = Config {
        admin: info.sender.clone(),
        token_a: msg.token_a,
        token_b: msg.token_b,
        exchange_rate: msg.exchange_rate,
        start_time: Timestamp::from_seconds(msg.start_time),
        end_time: Timestamp::from_seconds(msg.end_time),
        close_time: Timestamp::from_seconds(msg.close_time),
        min_total_exchange: msg.min_total_exchange,
        max_total_exchange: msg.max_total_exchange,
        max_exchange_per_address: msg.max_exchange_per_address,
        pass_gate: msg.pass_gate,
        factory: deps.api.addr_validate(&msg.factory)?,
        pair: deps.api.addr_validate(&msg.pair)?,
    };
    CONFIG.save(deps.storage, &config)?;
    PAUSED.save(deps.storage, &false)?;
    TOTAL_EXCHANGED.save(deps.storage, &Uint128::zero())?;
    TOTAL_CREDITED.save(deps.storage, &Uint128::zero())?;
    OUTCOME.save(deps.storage, &Outcome::default())?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "fair-launch")
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
        ExecuteMsg::Exchange {} => execute::exchange(deps, env, info),
        ExecuteMsg::CreatePool {} => execute::create_pool(deps, env, info),
        ExecuteMsg::Claim {} => execute::claim(deps, env, info),
        ExecuteMsg::Refund {} => execute::refund(deps, env, info),
        ExecuteMsg::Sweep { denom } => execute::sweep(deps, env, info, denom),
        ExecuteMsg::Pause {} => execute::pause(deps, info),
        ExecuteMsg::Unpause {} => execute::unpause(deps, info),
    }
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::LaunchState {} => query::query_launch_state(deps, env),
        QueryMsg::Account { address } => query::query_account(deps, address),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::{AccountResponse, LaunchStateResponse, PairResponse};
    use crate::state::PassGate;
    use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi};
    use cosmwasm_std::{
        coin, coins, from_json, to_json_binary, Addr, BankMsg, ContractResult, CosmosMsg, SubMsg,
        SystemResult, WasmMsg,
    };

    const TOKEN_A: &str = "ubootstrap";
    const TOKEN_B: &str = "udeposit";
    const START: u64 = 100_000;
    const END: u64 = 200_000;
    const CLOSE: u64 = END + 86_400;
    const RATE: u128 = 2;
    const MIN_TOTAL: u128 = 1_000;
    const MAX_TOTAL: u128 = 10_000;
    const MAX_PER_ADDR: u128 = 5_000;

    fn addr(label: &str) -> Addr {
        MockApi::default().addr_make(label)
    }

    fn env_at(seconds: u64) -> Env {
        let mut env = mock_env();
        env.block.time = Timestamp::from_seconds(seconds);
        env
    }

    fn base_msg() -> InstantiateMsg {
        InstantiateMsg {
            token_a: TOKEN_A.to_string(),
            token_b: TOKEN_B.to_string(),
            exchange_rate: Uint128::new(RATE),
            start_time: START,
            end_time: END,
            close_time: CLOSE,
            min_total_exchange: Uint128::new(MIN_TOTAL),
            max_total_exchange: Uint128::new(MAX_TOTAL),
            max_exchange_per_address: Uint128::new(MAX_PER_ADDR),
            pass_gate: None,
            factory: MockApi::default().addr_make("factory").to_string(),
            pair: MockApi::default().addr_make("pair").to_string(),
        }
    }

    fn setup(deps: DepsMut, msg: InstantiateMsg) {
        let info = message_info(&addr("admin"), &[]);
        instantiate(deps, env_at(START - 1), info, msg).unwrap();
    }

    fn exchange_as(deps: DepsMut, at: u64, who: &Addr, amount: u128) -> Result<Response, ContractError> {
        let info = message_info(who, &coins(amount, TOKEN_B));
        execute(deps, env_at(at), info, ExecuteMsg::Exchange {})
    }

    fn launch_state(deps: Deps, at: u64) -> LaunchStateResponse {
        let bin = query(deps, env_at(at), QueryMsg::LaunchState {}).unwrap();
        from_json(&bin).unwrap()
    }

    fn account_of(deps: Deps, who: &Addr) -> AccountResponse {
        let bin = query(
            deps,
            env_at(START),
            QueryMsg::Account {
                address: who.to_string(),
            },
        )
        .unwrap();
        from_json(&bin).unwrap()
    }

    /// Factory reports no pair; the query fails the way a real factory does
    /// for an unknown denom pair.
    fn mock_no_pair(deps: &mut cosmwasm_std::OwnedDeps<
        cosmwasm_std::MemoryStorage,
        MockApi,
        cosmwasm_std::testing::MockQuerier,
    >) {
        deps.querier.update_wasm(|_| {
            SystemResult::Ok(ContractResult::Err("pair not found".to_string()))
        });
    }

    fn mock_existing_pair(deps: &mut cosmwasm_std::OwnedDeps<
        cosmwasm_std::MemoryStorage,
        MockApi,
        cosmwasm_std::testing::MockQuerier,
    >) {
        deps.querier.update_wasm(|_| {
            let res = PairResponse {
                contract_addr: MockApi::default().addr_make("sniped-pair").to_string(),
            };
            SystemResult::Ok(ContractResult::Ok(to_json_binary(&res).unwrap()))
        });
    }

    #[test]
    fn test_schedule_validation() {
        let mut deps = mock_dependencies();
        let info = message_info(&addr("admin"), &[]);

        let mut msg = base_msg();
        msg.close_time = END + 86_399;
        let err = instantiate(deps.as_mut(), env_at(0), info.clone(), msg).unwrap_err();
        assert!(matches!(err, ContractError::InvalidSchedule { .. }));

        let mut msg = base_msg();
        msg.start_time = END;
        let err = instantiate(deps.as_mut(), env_at(0), info.clone(), msg).unwrap_err();
        assert!(matches!(err, ContractError::InvalidSchedule { .. }));

        // end_time near the u64 ceiling must reject, not overflow the gap
        let mut msg = base_msg();
        msg.end_time = u64::MAX - 10;
        msg.close_time = u64::MAX;
        let err = instantiate(deps.as_mut(), env_at(0), info, msg).unwrap_err();
        assert!(matches!(err, ContractError::InvalidSchedule { .. }));
    }

    #[test]
    fn test_exchange_credits_at_rate() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut(), base_msg());

        exchange_as(deps.as_mut(), START + 10, &addr("alice"), 50).unwrap();

        let account = account_of(deps.as_ref(), &addr("alice"));
        assert_eq!(account.deposited, Uint128::new(50));
        assert_eq!(account.credited, Uint128::new(100));

        let state = launch_state(deps.as_ref(), START + 10);
        assert_eq!(state.total_exchanged, Uint128::new(50));
        assert_eq!(state.total_credited, Uint128::new(100));
    }

    #[test]
    fn test_exchange_only_while_open() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut(), base_msg());

        let err = exchange_as(deps.as_mut(), START - 10, &addr("alice"), 50).unwrap_err();
        assert!(matches!(err, ContractError::WrongPhase { .. }));

        let err = exchange_as(deps.as_mut(), END, &addr("alice"), 50).unwrap_err();
        assert!(matches!(err, ContractError::WrongPhase { .. }));
    }

    #[test]
    fn test_pass_gate() {
        let mut deps = mock_dependencies();
        let mut msg = base_msg();
        msg.pass_gate = Some(PassGate {
            denom: "upass".to_string(),
            min_balance: Uint128::new(10),
        });
        setup(deps.as_mut(), msg);

        let err = exchange_as(deps.as_mut(), START + 10, &addr("alice"), 50).unwrap_err();
        assert!(matches!(err, ContractError::PassRequired { .. }));

        deps.querier.bank.update_balance(addr("alice"), coins(10, "upass"));
        exchange_as(deps.as_mut(), START + 10, &addr("alice"), 50).unwrap();
    }

    #[test]
    fn test_caps_reject_and_leave_totals_unchanged() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut(), base_msg());

        exchange_as(deps.as_mut(), START + 10, &addr("alice"), MAX_PER_ADDR).unwrap();
        let err = exchange_as(deps.as_mut(), START + 10, &addr("alice"), 1).unwrap_err();
        assert!(matches!(err, ContractError::AddressCapExceeded { .. }));

        exchange_as(deps.as_mut(), START + 10, &addr("bob"), MAX_PER_ADDR).unwrap();
        let err = exchange_as(deps.as_mut(), START + 10, &addr("carol"), 1).unwrap_err();
        assert!(matches!(err, ContractError::GlobalCapExceeded { .. }));

        let state = launch_state(deps.as_ref(), START + 10);
        assert_eq!(state.total_exchanged, Uint128::new(MAX_TOTAL));
    }

    #[test]
    fn test_create_pool_gates() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut(), base_msg());
        exchange_as(deps.as_mut(), START + 10, &addr("alice"), 50).unwrap();

        let admin = message_info(&addr("admin"), &[]);
        // Window still open.
        let err = execute(
            deps.as_mut(),
            env_at(START + 20),
            admin.clone(),
            ExecuteMsg::CreatePool {},
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::WrongPhase { .. }));

        // Minimum not reached: the refund path applies instead.
        let err = execute(
            deps.as_mut(),
            env_at(END + 10),
            admin,
            ExecuteMsg::CreatePool {},
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::MinimumNotReached { .. }));
    }

    #[test]
    fn test_create_pool_commits_both_sides() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut(), base_msg());
        mock_no_pair(&mut deps);

        exchange_as(deps.as_mut(), START + 10, &addr("alice"), 1_000).unwrap();
        exchange_as(deps.as_mut(), START + 10, &addr("bob"), 1_000).unwrap();

        // 4000 A for the pool plus 4000 A reserved for claimants.
        deps.querier.bank.update_balance(
            mock_env().contract.address,
            vec![coin(8_000, TOKEN_A), coin(2_000, TOKEN_B)],
        );

        let admin = message_info(&addr("admin"), &[]);
        let res = execute(
            deps.as_mut(),
            env_at(END + 10),
            admin,
            ExecuteMsg::CreatePool {},
        )
        .unwrap();

        match &res.messages[..] {
            [SubMsg {
                msg: CosmosMsg::Wasm(WasmMsg::Execute { funds, .. }),
                ..
            }] => {
                assert_eq!(funds, &vec![coin(4_000, TOKEN_A), coin(2_000, TOKEN_B)]);
            }
            other => panic!("unexpected messages: {other:?}"),
        }

        let state = launch_state(deps.as_ref(), END + 10);
        assert!(state.pool_created);
        assert!(!state.refundable);

        // Claim pays the credited bootstrap tokens and zeroes the account.
        let res = execute(
            deps.as_mut(),
            env_at(END + 20),
            message_info(&addr("alice"), &[]),
            ExecuteMsg::Claim {},
        )
        .unwrap();
        assert_eq!(
            res.messages,
            vec![SubMsg::new(CosmosMsg::Bank(BankMsg::Send {
                to_address: addr("alice").to_string(),
                amount: coins(2_000, TOKEN_A),
            }))]
        );
        let err = execute(
            deps.as_mut(),
            env_at(END + 30),
            message_info(&addr("alice"), &[]),
            ExecuteMsg::Claim {},
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::NothingToClaim));

        // Success path excludes refunds.
        let err = execute(
            deps.as_mut(),
            env_at(END + 30),
            message_info(&addr("bob"), &[]),
            ExecuteMsg::Refund {},
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::NotRefundable));
    }

    #[test]
    fn test_preexisting_pair_flips_refundable() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut(), base_msg());
        mock_existing_pair(&mut deps);

        exchange_as(deps.as_mut(), START + 10, &addr("alice"), 1_000).unwrap();
        deps.querier
            .bank.update_balance(mock_env().contract.address, coins(1_000, TOKEN_B));

        let admin = message_info(&addr("admin"), &[]);
        let res = execute(
            deps.as_mut(),
            env_at(END + 10),
            admin.clone(),
            ExecuteMsg::CreatePool {},
        )
        .unwrap();
        assert!(res.messages.is_empty());

        let state = launch_state(deps.as_ref(), END + 10);
        assert!(state.refundable);
        assert!(!state.pool_created);

        // Resolution is terminal.
        let err = execute(
            deps.as_mut(),
            env_at(END + 20),
            admin,
            ExecuteMsg::CreatePool {},
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::AlreadyResolved));

        // Refund pays the exact deposit back; claim never opens.
        let res = execute(
            deps.as_mut(),
            env_at(END + 20),
            message_info(&addr("alice"), &[]),
            ExecuteMsg::Refund {},
        )
        .unwrap();
        assert_eq!(
            res.messages,
            vec![SubMsg::new(CosmosMsg::Bank(BankMsg::Send {
                to_address: addr("alice").to_string(),
                amount: coins(1_000, TOKEN_B),
            }))]
        );
        let err = execute(
            deps.as_mut(),
            env_at(END + 30),
            message_info(&addr("alice"), &[]),
            ExecuteMsg::Claim {},
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::PoolNotCreated));
    }

    #[test]
    fn test_refund_when_minimum_unmet() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut(), base_msg());

        exchange_as(deps.as_mut(), START + 10, &addr("alice"), 50).unwrap();
        deps.querier
            .bank.update_balance(mock_env().contract.address, coins(50, TOKEN_B));

        // Not refundable while the window is still open.
        let err = execute(
            deps.as_mut(),
            env_at(START + 20),
            message_info(&addr("alice"), &[]),
            ExecuteMsg::Refund {},
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::NotRefundable));

        let res = execute(
            deps.as_mut(),
            env_at(END + 10),
            message_info(&addr("alice"), &[]),
            ExecuteMsg::Refund {},
        )
        .unwrap();
        assert_eq!(
            res.messages,
            vec![SubMsg::new(CosmosMsg::Bank(BankMsg::Send {
                to_address: addr("alice").to_string(),
                amount: coins(50, TOKEN_B),
            }))]
        );

        let account = account_of(deps.as_ref(), &addr("alice"));
        assert_eq!(account.deposited, Uint128::zero());
        assert_eq!(account.credited, Uint128::zero());

        let err = execute(
            deps.as_mut(),
            env_at(END + 20),
            message_info(&addr("alice"), &[]),
            ExecuteMsg::Refund {},
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::NothingToRefund));
    }

    #[test]
    fn test_sweep_only_after_close() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut(), base_msg());
        deps.querier
            .bank.update_balance(mock_env().contract.address, coins(123, TOKEN_B));

        let admin = message_info(&addr("admin"), &[]);
        let err = execute(
            deps.as_mut(),
            env_at(END + 10),
            admin.clone(),
            ExecuteMsg::Sweep {
                denom: TOKEN_B.to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::WrongPhase { .. }));

        let res = execute(
            deps.as_mut(),
            env_at(CLOSE),
            admin.clone(),
            ExecuteMsg::Sweep {
                denom: TOKEN_B.to_string(),
            },
        )
        .unwrap();
        assert_eq!(
            res.messages,
            vec![SubMsg::new(CosmosMsg::Bank(BankMsg::Send {
                to_address: addr("admin").to_string(),
                amount: coins(123, TOKEN_B),
            }))]
        );

        let err = execute(
            deps.as_mut(),
            env_at(CLOSE),
            admin,
            ExecuteMsg::Sweep {
                denom: TOKEN_A.to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::NothingToSweep));
    }
}
