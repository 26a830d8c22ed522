use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::{Index, IndexList, IndexedMap, Item, Map, MultiIndex, UniqueIndex};
use market_edition::EditionTarget;

use crate::ContractError;

pub const CONTRACT_INFO: Item<ContractInfo> = Item::new("contract_info");

pub const AUCTION_COUNT: Item<u64> = Item::new("auction_count");

/// (principal, asset key) -> balance waiting to be withdrawn
pub const PAYMENTS_OWED: Map<(&Addr, &str), EscrowedBalance> = Map::new("payments_owed");

/// Minimum seconds between two price drops unless configured otherwise
pub const DEFAULT_MIN_STEP_TIME: u64 = 60;

#[cw_serde]
pub struct ContractInfo {
    pub name: String,
    pub governance: Addr,
    /// native denom used by auctions created without a cw20 currency
    pub denom: String,
    pub min_step_time: u64,
    pub payment_mode: PaymentMode,
}

/// Where sale proceeds go once a purchase is accepted
#[cw_serde]
#[derive(Copy, Eq, Default)]
pub enum PaymentMode {
    /// forwarded to the creator and curator in the purchase transaction
    #[default]
    Direct,
    /// credited to the payees, who pull them out with withdraw
    Escrow,
}

#[cw_serde]
pub enum AssetInfo {
    Token { contract_addr: Addr },
    NativeToken { denom: String },
}

impl AssetInfo {
    pub fn key(&self) -> String {
        match self {
            AssetInfo::Token { contract_addr } => contract_addr.to_string(),
            AssetInfo::NativeToken { denom } => denom.clone(),
        }
    }
}

#[cw_serde]
pub struct EscrowedBalance {
    pub asset_info: AssetInfo,
    pub amount: Uint128,
}

#[cw_serde]
pub struct Auction {
    pub id: u64,
    pub target: EditionTarget,
    pub creator: Addr,
    pub start_timestamp: u64,
    pub duration: u64,
    pub start_price: Uint128,
    pub end_price: Uint128,
    pub number_of_price_drops: u32,
    pub step_time: u64,
    pub step_price: Uint128,
    pub curator: Option<Addr>,
    pub curator_royalty_bps: u16,
    pub approved: bool,
    pub auction_currency: AssetInfo,
    pub collector_give_away: bool,
}

impl Auction {
    pub fn end_timestamp(&self) -> u64 {
        self.start_timestamp.saturating_add(self.duration)
    }

    pub fn has_started(&self, now: u64) -> bool {
        now >= self.start_timestamp
    }

    pub fn is_over(&self, now: u64) -> bool {
        now >= self.end_timestamp()
    }

    /// free mints for holders once the window has elapsed and the creator opted in
    pub fn in_give_away(&self, now: u64) -> bool {
        self.collector_give_away && self.is_over(now)
    }

    pub fn is_curator(&self, addr: &Addr) -> bool {
        self.curator.as_ref() == Some(addr)
    }

    pub fn is_creator_or_curator(&self, addr: &Addr) -> bool {
        self.creator.eq(addr) || self.is_curator(addr)
    }
}

pub fn num_auctions(storage: &dyn Storage) -> StdResult<u64> {
    Ok(AUCTION_COUNT.may_load(storage)?.unwrap_or_default())
}

pub fn increment_auctions(storage: &mut dyn Storage) -> StdResult<u64> {
    let val = num_auctions(storage)? + 1;
    AUCTION_COUNT.save(storage, &val)?;
    Ok(val)
}

pub struct AuctionIndexes<'a> {
    /// one live auction per edition contract
    pub target: UniqueIndex<'a, Addr, Auction, u64>,
    pub creator: MultiIndex<'a, Addr, Auction, u64>,
}

impl<'a> IndexList<Auction> for AuctionIndexes<'a> {
    fn get_indexes(&'_ self) -> Box<dyn Iterator<Item = &'_ dyn Index<Auction>> + '_> {
        let v: Vec<&dyn Index<Auction>> = vec![&self.target, &self.creator];
        Box::new(v.into_iter())
    }
}

pub fn auctions<'a>() -> IndexedMap<'a, u64, Auction, AuctionIndexes<'a>> {
    let indexes = AuctionIndexes {
        target: UniqueIndex::new(|a| a.target.contract_addr.clone(), "auctions__target"),
        creator: MultiIndex::new(|_pk, a| a.creator.clone(), "auctions", "auctions__creator"),
    };
    IndexedMap::new("auctions", indexes)
}

pub fn load_auction(storage: &dyn Storage, auction_id: u64) -> Result<Auction, ContractError> {
    auctions()
        .may_load(storage, auction_id)?
        .ok_or(ContractError::NotFound { auction_id })
}

pub fn auction_by_target(storage: &dyn Storage, target: &Addr) -> StdResult<Option<Auction>> {
    Ok(auctions()
        .idx
        .target
        .item(storage, target.clone())?
        .map(|(_, auction)| auction))
}
