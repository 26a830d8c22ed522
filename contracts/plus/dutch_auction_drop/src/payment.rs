use cosmwasm_std::{
    attr, to_json_binary, Addr, BankMsg, BlockInfo, Coin, CosmosMsg, DepsMut, MessageInfo, Order,
    QuerierWrapper, Response, StdResult, Storage, Uint128, WasmMsg,
};
use cw20::{AllowanceResponse, BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_utils::{must_pay, nonpayable};

use crate::error::ContractError;
use crate::event::{AuctionEvent, PaymentWithdrawn};
use crate::state::{AssetInfo, EscrowedBalance, PaymentMode, PAYMENTS_OWED};

pub const BPS_DENOMINATOR: u128 = 10_000;

/// Share of a sale owed to one payee
#[derive(Clone, Debug, PartialEq)]
pub struct Payout {
    pub recipient: Addr,
    pub amount: Uint128,
}

/// floor(price * bps / 10000)
pub fn curator_share(price: Uint128, curator_royalty_bps: u16) -> Uint128 {
    price.multiply_ratio(curator_royalty_bps as u128, BPS_DENOMINATOR)
}

/// Splits price between curator and creator, the creator taking the
/// remainder so that nothing is lost to rounding
pub fn split_sale(
    price: Uint128,
    creator: &Addr,
    curator: Option<&Addr>,
    curator_royalty_bps: u16,
) -> Vec<Payout> {
    let mut payouts = vec![];
    let mut creator_amount = price;
    if let Some(curator) = curator {
        let amount = curator_share(price, curator_royalty_bps);
        creator_amount -= amount;
        payouts.push(Payout {
            recipient: curator.clone(),
            amount,
        });
    }
    payouts.insert(
        0,
        Payout {
            recipient: creator.clone(),
            amount: creator_amount,
        },
    );
    payouts
}

/// Native auctions must be paid with exactly the price, free mints with no funds
pub fn verify_native_funds(
    info: &MessageInfo,
    denom: &str,
    price: Uint128,
) -> Result<(), ContractError> {
    if price.is_zero() {
        nonpayable(info)?;
        return Ok(());
    }
    let received = must_pay(info, denom)?;
    if received != price {
        return Err(ContractError::InvalidSentFundAmount {
            expected: price,
            received,
        });
    }
    Ok(())
}

/// The buyer must hold and have approved at least price of the token
pub fn verify_cw20_funds(
    querier: &QuerierWrapper,
    block: &BlockInfo,
    token: &Addr,
    owner: &Addr,
    spender: &Addr,
    price: Uint128,
) -> Result<(), ContractError> {
    if price.is_zero() {
        return Ok(());
    }
    let balance: BalanceResponse = querier.query_wasm_smart(
        token,
        &Cw20QueryMsg::Balance {
            address: owner.to_string(),
        },
    )?;
    if balance.balance < price {
        return Err(ContractError::TransferFailed {
            reason: format!("balance {} is lower than {}", balance.balance, price),
        });
    }
    let allowance: AllowanceResponse = querier.query_wasm_smart(
        token,
        &Cw20QueryMsg::Allowance {
            owner: owner.to_string(),
            spender: spender.to_string(),
        },
    )?;
    if allowance.expires.is_expired(block) || allowance.allowance < price {
        return Err(ContractError::TransferFailed {
            reason: format!("allowance {} is lower than {}", allowance.allowance, price),
        });
    }
    Ok(())
}

/// Pays amount held by this contract to recipient
pub fn transfer_msg(
    asset: &AssetInfo,
    recipient: &Addr,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    Ok(match asset {
        AssetInfo::NativeToken { denom } => BankMsg::Send {
            to_address: recipient.to_string(),
            amount: vec![Coin {
                denom: denom.clone(),
                amount,
            }],
        }
        .into(),
        AssetInfo::Token { contract_addr } => WasmMsg::Execute {
            contract_addr: contract_addr.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: recipient.to_string(),
                amount,
            })?,
            funds: vec![],
        }
        .into(),
    })
}

fn transfer_from_msg(
    token: &Addr,
    owner: &Addr,
    recipient: &Addr,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: owner.to_string(),
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    }
    .into())
}

pub fn credit(
    storage: &mut dyn Storage,
    principal: &Addr,
    asset: &AssetInfo,
    amount: Uint128,
) -> StdResult<EscrowedBalance> {
    PAYMENTS_OWED.update(storage, (principal, asset.key().as_str()), |owed| -> StdResult<_> {
        let mut owed = owed.unwrap_or(EscrowedBalance {
            asset_info: asset.clone(),
            amount: Uint128::zero(),
        });
        owed.amount = owed.amount.checked_add(amount)?;
        Ok(owed)
    })
}

pub fn owed_balance(
    storage: &dyn Storage,
    principal: &Addr,
    asset: &AssetInfo,
) -> StdResult<Uint128> {
    Ok(PAYMENTS_OWED
        .may_load(storage, (principal, asset.key().as_str()))?
        .map(|owed| owed.amount)
        .unwrap_or_default())
}

impl PaymentMode {
    /// Moves a purchase's payouts to their destination. Escrow credits are
    /// written here, the returned messages carry the actual transfers.
    pub fn settle(
        &self,
        storage: &mut dyn Storage,
        contract_addr: &Addr,
        asset: &AssetInfo,
        payer: &Addr,
        payouts: &[Payout],
    ) -> StdResult<Vec<CosmosMsg>> {
        let payouts: Vec<&Payout> = payouts.iter().filter(|p| !p.amount.is_zero()).collect();
        match self {
            PaymentMode::Direct => payouts
                .into_iter()
                .map(|payout| match asset {
                    AssetInfo::Token {
                        contract_addr: token,
                    } => transfer_from_msg(token, payer, &payout.recipient, payout.amount),
                    AssetInfo::NativeToken { .. } => {
                        transfer_msg(asset, &payout.recipient, payout.amount)
                    }
                })
                .collect(),
            PaymentMode::Escrow => {
                for payout in payouts.iter() {
                    credit(storage, &payout.recipient, asset, payout.amount)?;
                }
                let total: Uint128 = payouts.iter().map(|payout| payout.amount).sum();
                match asset {
                    AssetInfo::Token {
                        contract_addr: token,
                    } if !total.is_zero() => {
                        Ok(vec![transfer_from_msg(token, payer, contract_addr, total)?])
                    }
                    _ => Ok(vec![]),
                }
            }
        }
    }
}

/// Every asset escrowed for principal, whatever denom it was paid in
pub fn owed_balances(storage: &dyn Storage, principal: &Addr) -> StdResult<Vec<EscrowedBalance>> {
    PAYMENTS_OWED
        .prefix(principal)
        .range(storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, owed)| owed))
        .collect()
}

pub fn try_withdraw(deps: DepsMut, principal: String) -> Result<Response, ContractError> {
    let principal = deps.api.addr_validate(&principal)?;
    let owed = owed_balances(deps.storage, &principal)?;
    for balance in owed.iter() {
        PAYMENTS_OWED.remove(deps.storage, (&principal, balance.asset_info.key().as_str()));
    }

    let balances: Vec<EscrowedBalance> = owed
        .into_iter()
        .filter(|owed| !owed.amount.is_zero())
        .collect();
    if balances.is_empty() {
        return Err(ContractError::NothingToWithdraw {
            principal: principal.to_string(),
        });
    }

    let mut rsp = Response::new();
    let mut native_coins = vec![];
    for owed in balances.iter() {
        match &owed.asset_info {
            AssetInfo::NativeToken { denom } => native_coins.push(Coin {
                denom: denom.clone(),
                amount: owed.amount,
            }),
            AssetInfo::Token { .. } => {
                rsp = rsp.add_message(transfer_msg(&owed.asset_info, &principal, owed.amount)?)
            }
        }
        PaymentWithdrawn {
            principal: &principal,
            asset: owed.asset_info.key(),
            amount: owed.amount,
        }
        .add_event(&mut rsp);
    }
    if !native_coins.is_empty() {
        rsp = rsp.add_message(BankMsg::Send {
            to_address: principal.to_string(),
            amount: native_coins,
        });
    }

    Ok(rsp.add_attributes(vec![
        attr("action", "withdraw"),
        attr("principal", principal),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{mock_dependencies, mock_info};
    use cosmwasm_std::{coin, coins};
    use cw_utils::PaymentError;

    #[test]
    fn royalty_split_is_exact() {
        let creator = Addr::unchecked("creator");
        let curator = Addr::unchecked("curator");

        let payouts = split_sale(
            Uint128::new(1_000_000_000_000_000_000),
            &creator,
            Some(&curator),
            1_000,
        );
        assert_eq!(
            payouts,
            vec![
                Payout {
                    recipient: creator.clone(),
                    amount: Uint128::new(900_000_000_000_000_000)
                },
                Payout {
                    recipient: curator.clone(),
                    amount: Uint128::new(100_000_000_000_000_000)
                },
            ]
        );

        for (price, bps) in [(0u128, 0u16), (1, 9_999), (999, 333), (12_345, 10_000), (7, 5_000)] {
            let payouts = split_sale(Uint128::new(price), &creator, Some(&curator), bps);
            let total: Uint128 = payouts.iter().map(|p| p.amount).sum();
            assert_eq!(total, Uint128::new(price));
            assert_eq!(payouts[1].amount, Uint128::new(price * bps as u128 / 10_000));
        }

        let payouts = split_sale(Uint128::new(42), &creator, None, 0);
        assert_eq!(payouts.len(), 1);
        assert_eq!(payouts[0].amount, Uint128::new(42));
    }

    #[test]
    fn native_funds_must_match_price() {
        let price = Uint128::new(100);
        verify_native_funds(&mock_info("buyer", &coins(100, "orai")), "orai", price).unwrap();

        let err =
            verify_native_funds(&mock_info("buyer", &coins(150, "orai")), "orai", price).unwrap_err();
        assert_eq!(
            err,
            ContractError::InvalidSentFundAmount {
                expected: price,
                received: Uint128::new(150)
            }
        );

        let err = verify_native_funds(&mock_info("buyer", &[]), "orai", price).unwrap_err();
        assert_eq!(err, ContractError::Payment(PaymentError::NoFunds {}));

        let err = verify_native_funds(
            &mock_info("buyer", &[coin(100, "orai"), coin(1, "atom")]),
            "orai",
            price,
        )
        .unwrap_err();
        assert_eq!(err, ContractError::Payment(PaymentError::MultipleDenoms {}));

        verify_native_funds(&mock_info("buyer", &[]), "orai", Uint128::zero()).unwrap();
        let err = verify_native_funds(&mock_info("buyer", &coins(1, "orai")), "orai", Uint128::zero())
            .unwrap_err();
        assert_eq!(err, ContractError::Payment(PaymentError::NonPayable {}));
    }

    #[test]
    fn escrow_accumulates_until_withdrawn() {
        let mut deps = mock_dependencies();
        let creator = Addr::unchecked("creator");
        let native = AssetInfo::NativeToken {
            denom: "orai".to_string(),
        };
        let payouts = split_sale(Uint128::new(1_000), &creator, None, 0);

        for _ in 0..2 {
            let msgs = PaymentMode::Escrow
                .settle(
                    deps.as_mut().storage,
                    &Addr::unchecked("auction"),
                    &native,
                    &Addr::unchecked("buyer"),
                    &payouts,
                )
                .unwrap();
            assert!(msgs.is_empty());
        }
        assert_eq!(
            owed_balance(deps.as_ref().storage, &creator, &native).unwrap(),
            Uint128::new(2_000)
        );

        let rsp = try_withdraw(deps.as_mut(), creator.to_string()).unwrap();
        assert_eq!(rsp.messages.len(), 1);
        assert_eq!(
            owed_balance(deps.as_ref().storage, &creator, &native).unwrap(),
            Uint128::zero()
        );

        let err = try_withdraw(deps.as_mut(), creator.to_string()).unwrap_err();
        assert_eq!(
            err,
            ContractError::NothingToWithdraw {
                principal: creator.to_string()
            }
        );
    }
}
