use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdResult};
use cw_storage_plus::Bound;

use crate::msg::{SignerEntry, TicketStatusResponse, VoteReceiptResponse};
use crate::state::{CONFIG, CURRENT_PROPOSAL, MIN_NONCE, SIGNERS, USED, VOTED};

const DEFAULT_LIMIT: u32 = 30;
const MAX_LIMIT: u32 = 100;

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_ticket_status(deps: Deps, signer: String, nonce: u64) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&signer)?;
    let used = USED.has(deps.storage, (&addr, nonce));
    let min_nonce = MIN_NONCE.may_load(deps.storage, &addr)?.unwrap_or(0);
    to_json_binary(&TicketStatusResponse {
        signer,
        nonce,
        used,
        min_nonce,
    })
}

pub fn query_signers(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after
        .map(|s| deps.api.addr_validate(&s))
        .transpose()?;
    let min = start.as_ref().map(Bound::exclusive);

    let signers = SIGNERS
        .range(deps.storage, min, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (address, pubkey) = item?;
            Ok(SignerEntry {
                address: address.to_string(),
                pubkey,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;
    to_json_binary(&signers)
}

pub fn query_proposal(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&CURRENT_PROPOSAL.may_load(deps.storage)?)
}

pub fn query_vote_receipt(deps: Deps, proposal_id: u64, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let voted = VOTED.has(deps.storage, (proposal_id, &addr));
    to_json_binary(&VoteReceiptResponse {
        proposal_id,
        address,
        voted,
    })
}
