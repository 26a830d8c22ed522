use cosmwasm_std::{attr, DepsMut, Env, MessageInfo, Response, Uint128};
use cw_utils::nonpayable;
use market_edition::{EditionContract, Implementation};

use crate::error::ContractError;
use crate::event::{AuctionEvent, EditionPurchased};
use crate::payment::{split_sale, verify_cw20_funds, verify_native_funds};
use crate::price::sale_price;
use crate::state::{load_auction, AssetInfo, CONTRACT_INFO};

/// Buys one unit of the auctioned edition. `seed` is given by the seeded
/// entry point only and is forwarded untouched to the mint.
pub fn try_purchase(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    auction_id: u64,
    amount: Uint128,
    seed: Option<u64>,
) -> Result<Response, ContractError> {
    let contract_info = CONTRACT_INFO.load(deps.storage)?;
    let auction = load_auction(deps.storage, auction_id)?;
    let now = env.block.time.seconds();

    if !auction.has_started(now) {
        return Err(ContractError::NotStarted {});
    }
    if !auction.approved {
        return Err(ContractError::NotApproved {});
    }
    match (auction.target.implementation, seed) {
        (Implementation::Standard, None) | (Implementation::Seeded, Some(_)) => {}
        (implementation, _) => {
            return Err(ContractError::WrongEditionKind {
                expected: implementation.as_str().to_string(),
            })
        }
    }

    let edition = EditionContract(auction.target.contract_addr.clone());
    let price = if auction.in_give_away(now) {
        if edition.balance_of(&deps.querier, &info.sender)? == 0 {
            return Err(ContractError::NotCollector {});
        }
        Uint128::zero()
    } else {
        let price = sale_price(&auction, now)?;
        if amount < price {
            return Err(ContractError::InsufficientPrice { amount, price });
        }
        price
    };

    if edition.number_can_mint(&deps.querier)? == 0 {
        return Err(ContractError::SoldOut {});
    }
    if !edition.is_approved_minter(&deps.querier, &env.contract.address)? {
        return Err(ContractError::NotApprovedMinter {});
    }

    match &auction.auction_currency {
        AssetInfo::NativeToken { denom } => verify_native_funds(&info, denom, price)?,
        AssetInfo::Token { contract_addr } => {
            nonpayable(&info)?;
            verify_cw20_funds(
                &deps.querier,
                &env.block,
                contract_addr,
                &info.sender,
                &env.contract.address,
                price,
            )?
        }
    }

    let payouts = split_sale(
        price,
        &auction.creator,
        auction.curator.as_ref(),
        auction.curator_royalty_bps,
    );
    let payment_msgs = contract_info.payment_mode.settle(
        deps.storage,
        &env.contract.address,
        &auction.auction_currency,
        &info.sender,
        &payouts,
    )?;

    // mint runs after every payment message in the same transaction
    let mut rsp = Response::new()
        .add_messages(payment_msgs)
        .add_message(edition.mint(&info.sender, seed)?)
        .add_attributes(vec![
            attr("action", "purchase"),
            attr("auction_id", auction_id.to_string()),
            attr("buyer", info.sender.as_str()),
            attr("price", price),
        ]);
    EditionPurchased {
        auction_id,
        buyer: &info.sender,
        amount_paid: price,
        seed,
    }
    .add_event(&mut rsp);
    Ok(rsp)
}
