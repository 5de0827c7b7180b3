use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query;
use crate::state::{Config, CONFIG, PAUSED, PROPOSAL_COUNT};

const CONTRACT_NAME: &str = "crates.io:vaultic-ticket-hub";
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
        gov_denom: msg.gov_denom,
        proposal_cooldown_seconds: msg.proposal_cooldown_seconds,
    };
    CONFIG.save(deps.storage, &config)?;
    PAUSED.save(deps.storage, &false)?;
    PROPOSAL_COUNT.save(deps.storage, &0)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "ticket-hub")
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
        ExecuteMsg::ExecuteTicket { ticket } => execute::execute_ticket(deps, env, info, ticket),
        ExecuteMsg::CancelTicket { ticket } => execute::cancel_ticket(deps, env, info, ticket),
        ExecuteMsg::RevokeNoncesBelow { min_nonce } => {
            execute::revoke_nonces_below(deps, info, min_nonce)
        }
        ExecuteMsg::GrantSigner { address, pubkey } => {
            execute::grant_signer(deps, info, address, pubkey)
        }
        ExecuteMsg::RevokeSigner { address } => execute::revoke_signer(deps, info, address),
        ExecuteMsg::GrantValidator { address } => execute::grant_validator(deps, info, address),
        ExecuteMsg::RevokeValidator { address } => execute::revoke_validator(deps, info, address),
        ExecuteMsg::CreateProposal {
            title,
            duration_seconds,
        } => execute::create_proposal(deps, env, info, title, duration_seconds),
        ExecuteMsg::Vote { support } => execute::vote(deps, env, info, support),
        ExecuteMsg::CloseProposal {} => execute::close_proposal(deps, env),
        ExecuteMsg::Pause {} => execute::pause(deps, info),
        ExecuteMsg::Unpause {} => execute::unpause(deps, info),
        ExecuteMsg::EmergencyWithdraw { denom, amount } => {
            execute::emergency_withdraw(deps, info, denom, amount)
        }
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::TicketStatus { signer, nonce } => {
            query::query_ticket_status(deps, signer, nonce)
        }
        QueryMsg::Signers { start_after, limit } => query::query_signers(deps, start_after, limit),
        QueryMsg::Proposal {} => query::query_proposal(deps),
        QueryMsg::VoteReceipt {
            proposal_id,
            address,
        } => query::query_vote_receipt(deps, proposal_id, address),
    }
}
