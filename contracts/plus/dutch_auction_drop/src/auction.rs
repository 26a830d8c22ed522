use cosmwasm_std::{attr, to_json_binary, DepsMut, Env, MessageInfo, Response, Uint128};
use market_edition::{EditionContract, EditionTarget};

use crate::error::ContractError;
use crate::event::{
    AuctionApprovalUpdated, AuctionCanceled, AuctionCreated, AuctionEnded, AuctionEvent,
    CollectorGiveAwayUpdated,
};
use crate::msg::CreateAuctionMsg;
use crate::payment::BPS_DENOMINATOR;
use crate::state::{
    auction_by_target, auctions, increment_auctions, load_auction, AssetInfo, Auction,
    CONTRACT_INFO,
};

pub fn try_create_auction(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: CreateAuctionMsg,
) -> Result<Response, ContractError> {
    let contract_info = CONTRACT_INFO.load(deps.storage)?;
    let target_addr = deps.api.addr_validate(msg.target.contract_addr.as_str())?;
    let edition = EditionContract(target_addr.clone());

    // anything that does not answer the edition probe cannot be sold
    let edition_info = edition
        .edition_info(&deps.querier)
        .map_err(|_| ContractError::UnsupportedInterface {})?;
    let creator = edition.creator(&deps.querier)?;
    if info.sender != creator {
        return Err(ContractError::NotCreator {});
    }
    if edition_info.implementation != msg.target.implementation {
        return Err(ContractError::WrongEditionKind {
            expected: edition_info.implementation.as_str().to_string(),
        });
    }

    if msg.number_of_price_drops == 0 {
        return Err(ContractError::InvalidArgument {
            reason: "number_of_price_drops must be positive".to_string(),
        });
    }
    if msg.curator_royalty_bps as u128 > BPS_DENOMINATOR {
        return Err(ContractError::InvalidArgument {
            reason: format!("curator_royalty_bps cannot exceed {}", BPS_DENOMINATOR),
        });
    }
    // equal prices are only allowed for a free drop
    if msg.start_price < msg.end_price
        || (msg.start_price == msg.end_price && !msg.start_price.is_zero())
    {
        return Err(ContractError::InvalidPriceRange {});
    }
    let step_time = msg.duration / msg.number_of_price_drops as u64;
    if step_time <= contract_info.min_step_time {
        return Err(ContractError::StepTimeTooShort {
            min_step_time: contract_info.min_step_time,
        });
    }
    let curator = msg
        .curator
        .map(|curator| deps.api.addr_validate(&curator))
        .transpose()?;
    if curator.is_none() && msg.curator_royalty_bps > 0 {
        return Err(ContractError::RoyaltyWithoutCurator {});
    }
    if auction_by_target(deps.storage, &target_addr)?.is_some() {
        return Err(ContractError::DuplicateAuction {});
    }
    if msg.start_timestamp.checked_add(msg.duration).is_none() {
        return Err(ContractError::InvalidArgument {
            reason: "auction ends after the last representable timestamp".to_string(),
        });
    }

    let auction_currency = match msg.auction_currency {
        Some(token) => AssetInfo::Token {
            contract_addr: deps.api.addr_validate(&token)?,
        },
        None => AssetInfo::NativeToken {
            denom: contract_info.denom,
        },
    };
    let step_price =
        (msg.start_price - msg.end_price) / Uint128::from(msg.number_of_price_drops);
    // no third party to wait for
    let approved = match &curator {
        Some(curator) => curator.eq(&creator),
        None => true,
    };

    let auction = Auction {
        id: increment_auctions(deps.storage)?,
        target: EditionTarget {
            contract_addr: target_addr,
            implementation: msg.target.implementation,
        },
        creator,
        start_timestamp: msg.start_timestamp,
        duration: msg.duration,
        start_price: msg.start_price,
        end_price: msg.end_price,
        number_of_price_drops: msg.number_of_price_drops,
        step_time,
        step_price,
        curator,
        curator_royalty_bps: msg.curator_royalty_bps,
        approved,
        auction_currency,
        collector_give_away: false,
    };
    auctions().save(deps.storage, auction.id, &auction)?;

    let mut rsp = Response::new()
        .add_attributes(vec![
            attr("action", "create_auction"),
            attr("auction_id", auction.id.to_string()),
            attr("target", auction.target.contract_addr.as_str()),
        ])
        .set_data(to_json_binary(&auction.id)?);
    AuctionCreated {
        auction_id: auction.id,
        target: &auction.target.contract_addr,
        creator: &auction.creator,
    }
    .add_event(&mut rsp);
    AuctionApprovalUpdated {
        auction_id: auction.id,
        approved: auction.approved,
    }
    .add_event(&mut rsp);
    Ok(rsp)
}

pub fn try_set_auction_approval(
    deps: DepsMut,
    info: MessageInfo,
    auction_id: u64,
    approved: bool,
) -> Result<Response, ContractError> {
    let mut auction = load_auction(deps.storage, auction_id)?;
    if !auction.is_curator(&info.sender) {
        return Err(ContractError::NotCurator {});
    }
    auction.approved = approved;
    auctions().save(deps.storage, auction_id, &auction)?;

    let mut rsp = Response::new().add_attributes(vec![
        attr("action", "set_auction_approval"),
        attr("auction_id", auction_id.to_string()),
    ]);
    AuctionApprovalUpdated {
        auction_id,
        approved,
    }
    .add_event(&mut rsp);
    Ok(rsp)
}

pub fn try_cancel_auction(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    auction_id: u64,
) -> Result<Response, ContractError> {
    let auction = load_auction(deps.storage, auction_id)?;
    if !auction.is_creator_or_curator(&info.sender) {
        return Err(ContractError::NotCreatorOrCurator {});
    }
    if auction.has_started(env.block.time.seconds()) {
        return Err(ContractError::AlreadyStarted {});
    }
    auctions().remove(deps.storage, auction_id)?;

    let mut rsp = Response::new().add_attributes(vec![
        attr("action", "cancel_auction"),
        attr("auction_id", auction_id.to_string()),
    ]);
    AuctionCanceled {
        auction_id,
        target: &auction.target.contract_addr,
    }
    .add_event(&mut rsp);
    Ok(rsp)
}

pub fn try_end_auction(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    auction_id: u64,
) -> Result<Response, ContractError> {
    let auction = load_auction(deps.storage, auction_id)?;
    if !auction.is_creator_or_curator(&info.sender) {
        return Err(ContractError::NotCreatorOrCurator {});
    }
    if !auction.is_over(env.block.time.seconds()) {
        return Err(ContractError::NotOver {});
    }
    auctions().remove(deps.storage, auction_id)?;

    let mut rsp = Response::new().add_attributes(vec![
        attr("action", "end_auction"),
        attr("auction_id", auction_id.to_string()),
    ]);
    AuctionEnded {
        auction_id,
        target: &auction.target.contract_addr,
    }
    .add_event(&mut rsp);
    Ok(rsp)
}

pub fn try_set_collector_give_away(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    auction_id: u64,
    enabled: bool,
) -> Result<Response, ContractError> {
    let mut auction = load_auction(deps.storage, auction_id)?;
    if info.sender != auction.creator {
        return Err(ContractError::NotCreator {});
    }
    if !auction.is_over(env.block.time.seconds()) {
        return Err(ContractError::NotOver {});
    }
    auction.collector_give_away = enabled;
    auctions().save(deps.storage, auction_id, &auction)?;

    let mut rsp = Response::new().add_attributes(vec![
        attr("action", "set_collector_give_away"),
        attr("auction_id", auction_id.to_string()),
    ]);
    CollectorGiveAwayUpdated {
        auction_id,
        target: &auction.target.contract_addr,
        enabled,
    }
    .add_event(&mut rsp);
    Ok(rsp)
}
