use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

use crate::Implementation;

#[cw_serde]
#[derive(QueryResponses)]
pub enum EditionQueryMsg {
    #[returns(CreatorResponse)]
    Creator {},
    /// Capability probe: contracts that are not editions fail this query
    #[returns(EditionInfoResponse)]
    EditionInfo {},
    #[returns(ApprovedMinterResponse)]
    IsApprovedMinter { minter: String },
    /// Remaining units that can still be minted
    #[returns(NumberCanMintResponse)]
    NumberCanMint {},
    #[returns(EditionBalanceResponse)]
    Balance { owner: String },
}

#[cw_serde]
pub struct CreatorResponse {
    pub creator: Addr,
}

#[cw_serde]
pub struct EditionInfoResponse {
    pub implementation: Implementation,
    pub edition_size: u64,
    pub total_minted: u64,
}

#[cw_serde]
pub struct ApprovedMinterResponse {
    pub approved: bool,
}

#[cw_serde]
pub struct NumberCanMintResponse {
    pub count: u64,
}

#[cw_serde]
pub struct EditionBalanceResponse {
    pub balance: u64,
}
