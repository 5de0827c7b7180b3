use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query;
use crate::state::{Config, CONFIG, PAUSED};

const CONTRACT_NAME: &str = "crates.io:vaultic-vesting";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.instant_percentage > 100 {
        return Err(ContractError::PercentageOutOfRange {
            value: msg.instant_percentage,
        });
    }

    let config = Config {
        admin: info.sender.clone(),
        denom: msg.denom,
        instant_percentage: msg.instant_percentage,
        release_duration: msg.release_duration,
    };
    CONFIG.save(deps.storage, &config)?;
    PAUSED.save(deps.storage, &false)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "vesting")
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
        ExecuteMsg::Register { recipient } => execute::register(deps, env, info, recipient),
        ExecuteMsg::Release {} => execute::release(deps, env, info),
        ExecuteMsg::ExtendVesting {
            recipient,
            new_finish,
        } => execute::extend_vesting(deps, info, recipient, new_finish),
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
        QueryMsg::Grant { address } => query::query_grant(deps, address),
        QueryMsg::Releasable { address } => query::query_releasable(deps, env, address),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::ReleasableResponse;
    use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi};
    use cosmwasm_std::{coins, from_json, Addr, BankMsg, CosmosMsg, SubMsg, Timestamp, Uint128};

    const DENOM: &str = "utoken";
    const DURATION: u64 = 10_000;
    const T0: u64 = 50_000;

    fn addr(label: &str) -> Addr {
        MockApi::default().addr_make(label)
    }

    fn env_at(seconds: u64) -> Env {
        let mut env = mock_env();
        env.block.time = Timestamp::from_seconds(seconds);
        env
    }

    fn setup(deps: DepsMut) {
        let msg = InstantiateMsg {
            denom: DENOM.to_string(),
            instant_percentage: 20,
            release_duration: DURATION,
        };
        let info = message_info(&addr("admin"), &[]);
        instantiate(deps, env_at(T0), info, msg).unwrap();
    }

    fn register_alice(deps: DepsMut) {
        let info = message_info(&addr("admin"), &coins(1_000, DENOM));
        execute(
            deps,
            env_at(T0),
            info,
            ExecuteMsg::Register {
                recipient: addr("alice").to_string(),
            },
        )
        .unwrap();
    }

    fn releasable_of(deps: Deps, at: u64, who: &Addr) -> ReleasableResponse {
        let bin = query(
            deps,
            env_at(at),
            QueryMsg::Releasable {
                address: who.to_string(),
            },
        )
        .unwrap();
        from_json(&bin).unwrap()
    }

    #[test]
    fn test_instant_percentage_bounds() {
        let mut deps = mock_dependencies();
        let msg = InstantiateMsg {
            denom: DENOM.to_string(),
            instant_percentage: 101,
            release_duration: DURATION,
        };
        let info = message_info(&addr("admin"), &[]);
        let err = instantiate(deps.as_mut(), env_at(T0), info, msg).unwrap_err();
        assert!(matches!(
            err,
            ContractError::PercentageOutOfRange { value: 101 }
        ));
    }

    #[test]
    fn test_register_pays_instant_portion() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());

        let info = message_info(&addr("admin"), &coins(1_000, DENOM));
        let res = execute(
            deps.as_mut(),
            env_at(T0),
            info,
            ExecuteMsg::Register {
                recipient: addr("alice").to_string(),
            },
        )
        .unwrap();

        // 20% of 1000 out the door immediately.
        assert_eq!(
            res.messages,
            vec![SubMsg::new(CosmosMsg::Bank(BankMsg::Send {
                to_address: addr("alice").to_string(),
                amount: coins(200, DENOM),
            }))]
        );

        let state = releasable_of(deps.as_ref(), T0, &addr("alice"));
        assert_eq!(state.releasable, Uint128::zero());
        assert_eq!(state.locked, Uint128::new(800));
    }

    #[test]
    fn test_one_grant_per_address() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());
        register_alice(deps.as_mut());

        let info = message_info(&addr("admin"), &coins(500, DENOM));
        let err = execute(
            deps.as_mut(),
            env_at(T0),
            info,
            ExecuteMsg::Register {
                recipient: addr("alice").to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::GrantExists { .. }));
    }

    #[test]
    fn test_register_requires_admin_and_denom() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());

        let info = message_info(&addr("mallory"), &coins(1_000, DENOM));
        let err = execute(
            deps.as_mut(),
            env_at(T0),
            info,
            ExecuteMsg::Register {
                recipient: addr("alice").to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::Unauthorized { .. }));

        let info = message_info(&addr("admin"), &coins(1_000, "uother"));
        let err = execute(
            deps.as_mut(),
            env_at(T0),
            info,
            ExecuteMsg::Register {
                recipient: addr("alice").to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::WrongDenom { .. }));
    }

    #[test]
    fn test_release_at_half_window() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());
        register_alice(deps.as_mut());
        deps.querier
            .bank.update_balance(mock_env().contract.address, coins(800, DENOM));

        let state = releasable_of(deps.as_ref(), T0 + DURATION / 2, &addr("alice"));
        assert_eq!(state.releasable, Uint128::new(400));

        let info = message_info(&addr("alice"), &[]);
        let res = execute(
            deps.as_mut(),
            env_at(T0 + DURATION / 2),
            info.clone(),
            ExecuteMsg::Release {},
        )
        .unwrap();
        assert_eq!(
            res.messages,
            vec![SubMsg::new(CosmosMsg::Bank(BankMsg::Send {
                to_address: addr("alice").to_string(),
                amount: coins(400, DENOM),
            }))]
        );

        // Same instant again: nothing new has unlocked.
        let err = execute(
            deps.as_mut(),
            env_at(T0 + DURATION / 2),
            info,
            ExecuteMsg::Release {},
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::NothingReleasable));
    }

    #[test]
    fn test_release_caps_at_vest_base() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());
        register_alice(deps.as_mut());
        deps.querier
            .bank.update_balance(mock_env().contract.address, coins(800, DENOM));

        let info = message_info(&addr("alice"), &[]);
        execute(
            deps.as_mut(),
            env_at(T0 + DURATION / 2),
            info.clone(),
            ExecuteMsg::Release {},
        )
        .unwrap();

        // Well past the window: only the remaining 400 is left, ever.
        let state = releasable_of(deps.as_ref(), T0 + DURATION * 3, &addr("alice"));
        assert_eq!(state.releasable, Uint128::new(400));

        let res = execute(
            deps.as_mut(),
            env_at(T0 + DURATION * 3),
            info.clone(),
            ExecuteMsg::Release {},
        )
        .unwrap();
        assert_eq!(
            res.messages,
            vec![SubMsg::new(CosmosMsg::Bank(BankMsg::Send {
                to_address: addr("alice").to_string(),
                amount: coins(400, DENOM),
            }))]
        );

        let err = execute(
            deps.as_mut(),
            env_at(T0 + DURATION * 4),
            info,
            ExecuteMsg::Release {},
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::NothingReleasable));
    }

    #[test]
    fn test_release_without_grant() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());

        let info = message_info(&addr("stranger"), &[]);
        let err = execute(deps.as_mut(), env_at(T0), info, ExecuteMsg::Release {}).unwrap_err();
        assert!(matches!(err, ContractError::NoGrant { .. }));
    }

    #[test]
    fn test_release_checks_contract_balance() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());
        register_alice(deps.as_mut());
        deps.querier
            .bank.update_balance(mock_env().contract.address, coins(100, DENOM));

        let info = message_info(&addr("alice"), &[]);
        let err = execute(
            deps.as_mut(),
            env_at(T0 + DURATION / 2),
            info,
            ExecuteMsg::Release {},
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::InsufficientBalance { .. }));

        // The failed call released nothing.
        let state = releasable_of(deps.as_ref(), T0 + DURATION / 2, &addr("alice"));
        assert_eq!(state.releasable, Uint128::new(400));
    }

    #[test]
    fn test_extend_vesting_slows_release() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());
        register_alice(deps.as_mut());

        // Shrinking is rejected.
        let info = message_info(&addr("admin"), &[]);
        let err = execute(
            deps.as_mut(),
            env_at(T0),
            info.clone(),
            ExecuteMsg::ExtendVesting {
                recipient: addr("alice").to_string(),
                new_finish: T0 + DURATION / 2,
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::Window(_)));

        // Doubling the window halves the slope.
        execute(
            deps.as_mut(),
            env_at(T0),
            info,
            ExecuteMsg::ExtendVesting {
                recipient: addr("alice").to_string(),
                new_finish: T0 + DURATION * 2,
            },
        )
        .unwrap();
        let state = releasable_of(deps.as_ref(), T0 + DURATION, &addr("alice"));
        assert_eq!(state.releasable, Uint128::new(400));
    }

    #[test]
    fn test_extend_vesting_requires_admin() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());
        register_alice(deps.as_mut());

        let info = message_info(&addr("alice"), &[]);
        let err = execute(
            deps.as_mut(),
            env_at(T0),
            info,
            ExecuteMsg::ExtendVesting {
                recipient: addr("alice").to_string(),
                new_finish: T0 + DURATION * 2,
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::Unauthorized { .. }));
    }

    #[test]
    fn test_pause_gates_release() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());
        register_alice(deps.as_mut());
        deps.querier
            .bank.update_balance(mock_env().contract.address, coins(800, DENOM));

        let admin = message_info(&addr("admin"), &[]);
        execute(deps.as_mut(), env_at(T0), admin, ExecuteMsg::Pause {}).unwrap();

        let info = message_info(&addr("alice"), &[]);
        let err = execute(
            deps.as_mut(),
            env_at(T0 + DURATION),
            info,
            ExecuteMsg::Release {},
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::Paused));
    }

    #[test]
    fn test_emergency_withdraw_requires_pause() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());

        let admin = message_info(&addr("admin"), &[]);
        let err = execute(
            deps.as_mut(),
            env_at(T0),
            admin.clone(),
            ExecuteMsg::EmergencyWithdraw {
                denom: DENOM.to_string(),
                amount: Uint128::new(100),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::NotPaused));

        execute(
            deps.as_mut(),
            env_at(T0),
            admin.clone(),
            ExecuteMsg::Pause {},
        )
        .unwrap();
        let res = execute(
            deps.as_mut(),
            env_at(T0),
            admin,
            ExecuteMsg::EmergencyWithdraw {
                denom: DENOM.to_string(),
                amount: Uint128::new(100),
            },
        )
        .unwrap();
        assert_eq!(res.messages.len(), 1);
    }
}
