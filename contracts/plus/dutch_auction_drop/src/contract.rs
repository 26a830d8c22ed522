#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;

use cosmwasm_std::{
    attr, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdError, StdResult,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use market_edition::EditionContract;

use crate::auction::{
    try_cancel_auction, try_create_auction, try_end_auction, try_set_auction_approval,
    try_set_collector_give_away,
};
use crate::error::ContractError;
use crate::msg::{
    ExecuteMsg, InstantiateMsg, MigrateMsg, NumberCanMintResponse, PaymentsOwedResponse, QueryMsg,
    SalePriceResponse, UpdateContractMsg,
};
use crate::payment::{owed_balance, owed_balances, try_withdraw};
use crate::price::sale_price;
use crate::purchase::try_purchase;
use crate::state::{
    auction_by_target, auctions, load_auction, AssetInfo, Auction, ContractInfo, EscrowedBalance,
    CONTRACT_INFO, DEFAULT_MIN_STEP_TIME,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:dutch_auction_drop";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let governance = match msg.governance {
        Some(governance) => deps.api.addr_validate(&governance)?,
        None => info.sender,
    };
    let contract_info = ContractInfo {
        name: msg.name,
        governance,
        denom: msg.denom,
        min_step_time: msg.min_step_time.unwrap_or(DEFAULT_MIN_STEP_TIME),
        payment_mode: msg.payment_mode.unwrap_or_default(),
    };
    CONTRACT_INFO.save(deps.storage, &contract_info)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "instantiate"),
        attr("governance", contract_info.governance),
    ]))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateAuction(msg) => try_create_auction(deps, env, info, msg),
        ExecuteMsg::SetAuctionApproval {
            auction_id,
            approved,
        } => try_set_auction_approval(deps, info, auction_id, approved),
        ExecuteMsg::Purchase { auction_id, amount } => {
            try_purchase(deps, env, info, auction_id, amount, None)
        }
        ExecuteMsg::PurchaseSeeded {
            auction_id,
            amount,
            seed,
        } => try_purchase(deps, env, info, auction_id, amount, Some(seed)),
        ExecuteMsg::CancelAuction { auction_id } => try_cancel_auction(deps, env, info, auction_id),
        ExecuteMsg::EndAuction { auction_id } => try_end_auction(deps, env, info, auction_id),
        ExecuteMsg::SetCollectorGiveAway {
            auction_id,
            enabled,
        } => try_set_collector_give_away(deps, env, info, auction_id, enabled),
        ExecuteMsg::Withdraw { principal } => try_withdraw(deps, principal),
        ExecuteMsg::UpdateInfo(msg) => try_update_info(deps, info, msg),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attributes(vec![
        attr("action", "migrate"),
        attr("version", CONTRACT_VERSION),
    ]))
}

// ============================== Message Handlers ==============================

pub fn try_update_info(
    deps: DepsMut,
    info: MessageInfo,
    msg: UpdateContractMsg,
) -> Result<Response, ContractError> {
    let governance = msg
        .governance
        .map(|governance| deps.api.addr_validate(&governance))
        .transpose()?;
    let new_contract_info = CONTRACT_INFO.update(deps.storage, |mut contract_info| {
        if !info.sender.eq(&contract_info.governance) {
            return Err(ContractError::Unauthorized {
                sender: info.sender.to_string(),
            });
        }
        if let Some(name) = msg.name {
            contract_info.name = name;
        }
        if let Some(governance) = governance {
            contract_info.governance = governance;
        }
        if let Some(denom) = msg.denom {
            contract_info.denom = denom;
        }
        if let Some(min_step_time) = msg.min_step_time {
            contract_info.min_step_time = min_step_time;
        }
        if let Some(payment_mode) = msg.payment_mode {
            contract_info.payment_mode = payment_mode;
        }
        Ok(contract_info)
    })?;

    Ok(Response::new()
        .add_attributes(vec![attr("action", "update_info")])
        .set_data(to_json_binary(&new_contract_info)?))
}

// ============================== Query Handlers ==============================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::GetContractInfo {} => to_json_binary(&CONTRACT_INFO.load(deps.storage)?),
        QueryMsg::Auction { auction_id } => to_json_binary(&query_auction(deps, auction_id)?),
        QueryMsg::AuctionByTarget { target } => {
            let target = deps.api.addr_validate(&target)?;
            to_json_binary(&auction_by_target(deps.storage, &target)?)
        }
        QueryMsg::Auctions { start_after, limit } => {
            to_json_binary(&query_auctions(deps, start_after, limit)?)
        }
        QueryMsg::AuctionsByCreator {
            creator,
            start_after,
            limit,
        } => {
            let creator = deps.api.addr_validate(&creator)?;
            to_json_binary(&query_auctions_by_creator(deps, creator, start_after, limit)?)
        }
        QueryMsg::SalePrice { auction_id } => {
            let auction = query_auction(deps, auction_id)?;
            to_json_binary(&SalePriceResponse {
                auction_id,
                price: sale_price(&auction, env.block.time.seconds())?,
            })
        }
        QueryMsg::NumberCanMint { auction_id } => {
            let auction = query_auction(deps, auction_id)?;
            let edition = EditionContract(auction.target.contract_addr);
            to_json_binary(&NumberCanMintResponse {
                auction_id,
                count: edition.number_can_mint(&deps.querier)?,
            })
        }
        QueryMsg::PaymentsOwed {
            principal,
            asset_info,
        } => to_json_binary(&query_payments_owed(deps, principal, asset_info)?),
    }
}

const MAX_LIMIT: u8 = 100;
const DEFAULT_LIMIT: u8 = 20;

fn query_auction(deps: Deps, auction_id: u64) -> StdResult<Auction> {
    load_auction(deps.storage, auction_id).map_err(|err| match err {
        ContractError::Std(err) => err,
        err => StdError::not_found(err.to_string()),
    })
}

fn query_auctions(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u8>,
) -> StdResult<Vec<Auction>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let min = start_after.map(Bound::exclusive);
    auctions()
        .range(deps.storage, min, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, auction)| auction))
        .collect()
}

fn query_auctions_by_creator(
    deps: Deps,
    creator: Addr,
    start_after: Option<u64>,
    limit: Option<u8>,
) -> StdResult<Vec<Auction>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let min = start_after.map(Bound::exclusive);
    auctions()
        .idx
        .creator
        .prefix(creator)
        .range(deps.storage, min, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, auction)| auction))
        .collect()
}

fn query_payments_owed(
    deps: Deps,
    principal: String,
    asset_info: Option<AssetInfo>,
) -> StdResult<PaymentsOwedResponse> {
    let principal = deps.api.addr_validate(&principal)?;
    let balances = match asset_info {
        Some(asset_info) => {
            let amount = owed_balance(deps.storage, &principal, &asset_info)?;
            vec![EscrowedBalance { asset_info, amount }]
        }
        None => owed_balances(deps.storage, &principal)?,
    };
    Ok(PaymentsOwedResponse {
        principal,
        balances,
    })
}
