use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};
use market_edition::EditionTarget;

use crate::state::{AssetInfo, Auction, ContractInfo, EscrowedBalance, PaymentMode};

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    /// defaults to the instantiating sender
    pub governance: Option<String>,
    pub denom: String,
    pub min_step_time: Option<u64>,
    pub payment_mode: Option<PaymentMode>,
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct CreateAuctionMsg {
    pub target: EditionTarget,
    pub start_timestamp: u64,
    /// seconds
    pub duration: u64,
    pub start_price: Uint128,
    pub end_price: Uint128,
    pub number_of_price_drops: u32,
    pub curator: Option<String>,
    pub curator_royalty_bps: u16,
    /// cw20 contract to be paid in, the native denom when omitted
    pub auction_currency: Option<String>,
}

#[cw_serde]
pub struct UpdateContractMsg {
    pub name: Option<String>,
    pub governance: Option<String>,
    pub denom: Option<String>,
    pub min_step_time: Option<u64>,
    pub payment_mode: Option<PaymentMode>,
}

#[cw_serde]
pub enum ExecuteMsg {
    CreateAuction(CreateAuctionMsg),
    SetAuctionApproval {
        auction_id: u64,
        approved: bool,
    },
    Purchase {
        auction_id: u64,
        amount: Uint128,
    },
    PurchaseSeeded {
        auction_id: u64,
        amount: Uint128,
        seed: u64,
    },
    CancelAuction {
        auction_id: u64,
    },
    EndAuction {
        auction_id: u64,
    },
    SetCollectorGiveAway {
        auction_id: u64,
        enabled: bool,
    },
    /// Pays out every escrowed balance owed to principal
    Withdraw {
        principal: String,
    },
    UpdateInfo(UpdateContractMsg),
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ContractInfo)]
    GetContractInfo {},
    #[returns(Auction)]
    Auction { auction_id: u64 },
    #[returns(Option<Auction>)]
    AuctionByTarget { target: String },
    #[returns(Vec<Auction>)]
    Auctions {
        start_after: Option<u64>,
        limit: Option<u8>,
    },
    #[returns(Vec<Auction>)]
    AuctionsByCreator {
        creator: String,
        start_after: Option<u64>,
        limit: Option<u8>,
    },
    #[returns(SalePriceResponse)]
    SalePrice { auction_id: u64 },
    #[returns(NumberCanMintResponse)]
    NumberCanMint { auction_id: u64 },
    /// every escrowed balance of principal unless one asset is asked for
    #[returns(PaymentsOwedResponse)]
    PaymentsOwed {
        principal: String,
        asset_info: Option<AssetInfo>,
    },
}

#[cw_serde]
pub struct SalePriceResponse {
    pub auction_id: u64,
    pub price: Uint128,
}

#[cw_serde]
pub struct NumberCanMintResponse {
    pub auction_id: u64,
    pub count: u64,
}

#[cw_serde]
pub struct PaymentsOwedResponse {
    pub principal: Addr,
    pub balances: Vec<EscrowedBalance>,
}
