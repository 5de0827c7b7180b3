use cosmwasm_std::{
    coins, Addr, BankMsg, Binary, DepsMut, Env, Event, MessageInfo, Response, Storage, Uint128,
};
use vaultic_common::ticket_digest;

use crate::error::ContractError;
use crate::msg::SignerTicket;
use crate::state::{
    Config, Proposal, CONFIG, CURRENT_PROPOSAL, MIN_NONCE, PAUSED, PROPOSAL_COUNT, SIGNERS, USED,
    VALIDATORS, VOTED,
};

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

/// Run the full ticket validation chain. Returns the validated signer
/// address. Order matters: capability checks and replay guards come before
/// the (comparatively expensive) signature verification.
fn validate_ticket(
    deps: &DepsMut,
    env: &Env,
    info: &MessageInfo,
    ticket: &SignerTicket,
) -> Result<Addr, ContractError> {
    // 1. The ticket's signer must hold a signer capability.
    let signer = deps.api.addr_validate(&ticket.signer)?;
    let pubkey = SIGNERS
        .may_load(deps.storage, &signer)?
        .ok_or_else(|| ContractError::UnknownSigner {
            signer: ticket.signer.clone(),
        })?;

    // 2. The caller must hold the validator capability, and must not be the
    //    signer: the entity proposing a transfer cannot also approve it.
    if !VALIDATORS.has(deps.storage, &info.sender) {
        return Err(ContractError::Unauthorized {
            reason: "only validators can submit tickets".to_string(),
        });
    }
    if info.sender == signer {
        return Err(ContractError::ValidatorIsSigner);
    }

    // 3. Replay guards: per-ticket flag and per-signer watermark.
    if USED.has(deps.storage, (&signer, ticket.nonce)) {
        return Err(ContractError::TicketReplayed {
            signer: ticket.signer.clone(),
            nonce: ticket.nonce,
        });
    }
    let min_nonce = MIN_NONCE.may_load(deps.storage, &signer)?.unwrap_or(0);
    if ticket.nonce < min_nonce {
        return Err(ContractError::NonceRevoked {
            signer: ticket.signer.clone(),
            nonce: ticket.nonce,
            min_nonce,
        });
    }

    // 4. Validity window.
    let now = env.block.time.seconds();
    if now < ticket.start_time {
        return Err(ContractError::TicketNotYetValid {
            start_time: ticket.start_time,
        });
    }
    if now > ticket.end_time {
        return Err(ContractError::TicketExpired {
            end_time: ticket.end_time,
        });
    }

    // 5. The signature must verify against the registered pubkey over the
    //    domain-separated digest.
    let digest = ticket_digest(
        &env.block.chain_id,
        env.contract.address.as_str(),
        &ticket.signer,
        &ticket.to,
        &ticket.denom,
        ticket.amount.u128(),
        ticket.nonce,
        ticket.start_time,
        ticket.end_time,
    );
    let valid = deps
        .api
        .secp256k1_verify(&digest, &ticket.signature, &pubkey)?;
    if !valid {
        return Err(ContractError::SignatureMismatch);
    }

    Ok(signer)
}

/// Verify a ticket and release its funds. Terminal for the `(signer, nonce)`
/// pair.
pub fn execute_ticket(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    ticket: SignerTicket,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    if ticket.amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let signer = validate_ticket(&deps, &env, &info, &ticket)?;

    let available = deps
        .querier
        .query_balance(&env.contract.address, &ticket.denom)?
        .amount;
    if available < ticket.amount {
        return Err(ContractError::InsufficientBalance {
            denom: ticket.denom.clone(),
            available,
            required: ticket.amount,
        });
    }

    let to = deps.api.addr_validate(&ticket.to)?;

    // Flag before the transfer.
    USED.save(deps.storage, (&signer, ticket.nonce), &true)?;

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: to.to_string(),
            amount: coins(ticket.amount.u128(), &ticket.denom),
        })
        .add_attribute("action", "execute_ticket")
        .add_attribute("signer", ticket.signer.clone())
        .add_attribute("nonce", ticket.nonce.to_string())
        .add_event(
            Event::new("vaultic_ticket_executed")
                .add_attribute("signer", ticket.signer)
                .add_attribute("validator", info.sender.to_string())
                .add_attribute("to", ticket.to)
                .add_attribute("denom", ticket.denom)
                .add_attribute("amount", ticket.amount.to_string())
                .add_attribute("nonce", ticket.nonce.to_string()),
        ))
}

/// Verify a ticket and kill it without moving funds. Same terminal flag as
/// execution, so a cancelled ticket can never be executed later.
pub fn cancel_ticket(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    ticket: SignerTicket,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let signer = validate_ticket(&deps, &env, &info, &ticket)?;

    USED.save(deps.storage, (&signer, ticket.nonce), &true)?;

    Ok(Response::new()
        .add_attribute("action", "cancel_ticket")
        .add_attribute("signer", ticket.signer.clone())
        .add_attribute("nonce", ticket.nonce.to_string())
        .add_event(
            Event::new("vaultic_ticket_cancelled")
                .add_attribute("signer", ticket.signer)
                .add_attribute("validator", info.sender.to_string())
                .add_attribute("nonce", ticket.nonce.to_string()),
        ))
}

/// Raise the sender's nonce watermark, invalidating all unexecuted tickets
/// below it.
pub fn revoke_nonces_below(
    deps: DepsMut,
    info: MessageInfo,
    min_nonce: u64,
) -> Result<Response, ContractError> {
    if !SIGNERS.has(deps.storage, &info.sender) {
        return Err(ContractError::Unauthorized {
            reason: "only registered signers can revoke nonces".to_string(),
        });
    }
    let current = MIN_NONCE
        .may_load(deps.storage, &info.sender)?
        .unwrap_or(0);
    if min_nonce <= current {
        return Err(ContractError::WatermarkNotRaised {
            current,
            requested: min_nonce,
        });
    }
    MIN_NONCE.save(deps.storage, &info.sender, &min_nonce)?;

    Ok(Response::new()
        .add_attribute("action", "revoke_nonces_below")
        .add_attribute("signer", info.sender.to_string())
        .add_attribute("min_nonce", min_nonce.to_string())
        .add_event(
            Event::new("vaultic_nonces_revoked")
                .add_attribute("signer", info.sender.to_string())
                .add_attribute("min_nonce", min_nonce.to_string()),
        ))
}

pub fn grant_signer(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
    pubkey: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "grant signers")?;

    if pubkey.len() != 33 {
        return Err(ContractError::InvalidPubkey {
            length: pubkey.len(),
        });
    }
    let addr = deps.api.addr_validate(&address)?;
    SIGNERS.save(deps.storage, &addr, &pubkey)?;

    Ok(Response::new()
        .add_attribute("action", "grant_signer")
        .add_attribute("signer", address.clone())
        .add_event(Event::new("vaultic_signer_granted").add_attribute("signer", address)))
}

pub fn revoke_signer(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "revoke signers")?;

    let addr = deps.api.addr_validate(&address)?;
    SIGNERS.remove(deps.storage, &addr);

    Ok(Response::new()
        .add_attribute("action", "revoke_signer")
        .add_attribute("signer", address.clone())
        .add_event(Event::new("vaultic_signer_revoked").add_attribute("signer", address)))
}

pub fn grant_validator(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "grant validators")?;

    let addr = deps.api.addr_validate(&address)?;
    VALIDATORS.save(deps.storage, &addr, &true)?;

    Ok(Response::new()
        .add_attribute("action", "grant_validator")
        .add_attribute("validator", address.clone())
        .add_event(Event::new("vaultic_validator_granted").add_attribute("validator", address)))
}

pub fn revoke_validator(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "revoke validators")?;

    let addr = deps.api.addr_validate(&address)?;
    VALIDATORS.remove(deps.storage, &addr);

    Ok(Response::new()
        .add_attribute("action", "revoke_validator")
        .add_attribute("validator", address.clone())
        .add_event(Event::new("vaultic_validator_revoked").add_attribute("validator", address)))
}

/// Open a proposal. One open proposal system-wide; the previous proposal's
/// cooldown must have elapsed.
pub fn create_proposal(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    title: String,
    duration_seconds: u64,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;

    if let Some(previous) = CURRENT_PROPOSAL.may_load(deps.storage)? {
        if env.block.time < previous.end_time {
            return Err(ContractError::ProposalStillOpen {
                end_time: previous.end_time.seconds(),
            });
        }
        let cooldown_over = previous
            .end_time
            .plus_seconds(config.proposal_cooldown_seconds);
        if env.block.time < cooldown_over {
            return Err(ContractError::ProposalCooldown {
                until: cooldown_over.seconds(),
            });
        }
    }

    let id = PROPOSAL_COUNT.load(deps.storage)?;
    let proposal = Proposal {
        id,
        title: title.clone(),
        proposer: info.sender.clone(),
        end_time: env.block.time.plus_seconds(duration_seconds),
        for_votes: Uint128::zero(),
        against_votes: Uint128::zero(),
        closed: false,
    };
    CURRENT_PROPOSAL.save(deps.storage, &proposal)?;
    PROPOSAL_COUNT.save(deps.storage, &(id + 1))?;

    Ok(Response::new()
        .add_attribute("action", "create_proposal")
        .add_attribute("proposal_id", id.to_string())
        .add_event(
            Event::new("vaultic_proposal_created")
                .add_attribute("proposal_id", id.to_string())
                .add_attribute("proposer", info.sender.to_string())
                .add_attribute("title", title)
                .add_attribute("end_time", proposal.end_time.seconds().to_string()),
        ))
}

/// Vote weighted by the sender's current gov-denom balance. One vote per
/// address per proposal.
pub fn vote(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    support: bool,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;

    let mut proposal = CURRENT_PROPOSAL
        .may_load(deps.storage)?
        .ok_or(ContractError::NoProposal)?;
    if proposal.closed {
        return Err(ContractError::ProposalClosed { id: proposal.id });
    }
    if env.block.time >= proposal.end_time {
        return Err(ContractError::VotingEnded {
            id: proposal.id,
            end_time: proposal.end_time.seconds(),
        });
    }
    if VOTED.has(deps.storage, (proposal.id, &info.sender)) {
        return Err(ContractError::AlreadyVoted {
            voter: info.sender.to_string(),
            id: proposal.id,
        });
    }

    let weight = deps
        .querier
        .query_balance(&info.sender, &config.gov_denom)?
        .amount;
    if weight.is_zero() {
        return Err(ContractError::NoVotingWeight {
            voter: info.sender.to_string(),
            denom: config.gov_denom,
        });
    }

    if support {
        proposal.for_votes += weight;
    } else {
        proposal.against_votes += weight;
    }
    CURRENT_PROPOSAL.save(deps.storage, &proposal)?;
    VOTED.save(deps.storage, (proposal.id, &info.sender), &support)?;

    Ok(Response::new()
        .add_attribute("action", "vote")
        .add_attribute("proposal_id", proposal.id.to_string())
        .add_attribute("voter", info.sender.to_string())
        .add_event(
            Event::new("vaultic_vote_cast")
                .add_attribute("proposal_id", proposal.id.to_string())
                .add_attribute("voter", info.sender.to_string())
                .add_attribute("support", support.to_string())
                .add_attribute("weight", weight.to_string()),
        ))
}

pub fn close_proposal(deps: DepsMut, env: Env) -> Result<Response, ContractError> {
    let mut proposal = CURRENT_PROPOSAL
        .may_load(deps.storage)?
        .ok_or(ContractError::NoProposal)?;
    if proposal.closed {
        return Err(ContractError::ProposalClosed { id: proposal.id });
    }
    if env.block.time < proposal.end_time {
        return Err(ContractError::ProposalNotEnded {
            id: proposal.id,
            end_time: proposal.end_time.seconds(),
        });
    }

    proposal.closed = true;
    CURRENT_PROPOSAL.save(deps.storage, &proposal)?;

    let passed = proposal.for_votes > proposal.against_votes;
    Ok(Response::new()
        .add_attribute("action", "close_proposal")
        .add_attribute("proposal_id", proposal.id.to_string())
        .add_event(
            Event::new("vaultic_proposal_closed")
                .add_attribute("proposal_id", proposal.id.to_string())
                .add_attribute("for_votes", proposal.for_votes.to_string())
                .add_attribute("against_votes", proposal.against_votes.to_string())
                .add_attribute("passed", passed.to_string()),
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
