use cosmwasm_std::{StdError, Uint128};
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("Unauthorized: {sender} is not the governance")]
    Unauthorized { sender: String },

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Doesn't support edition interface")]
    UnsupportedInterface {},

    #[error("Caller must be creator of editions")]
    NotCreator {},

    #[error("Start price must be higher than end price")]
    InvalidPriceRange {},

    #[error("Step time must be higher than minimum step time of {min_step_time} seconds")]
    StepTimeTooShort { min_step_time: u64 },

    #[error("Royalties would be sent into the void")]
    RoyaltyWithoutCurator {},

    #[error("Auction already exists")]
    DuplicateAuction {},

    #[error("Auction {auction_id} doesn't exist")]
    NotFound { auction_id: u64 },

    #[error("Auction has not started yet")]
    NotStarted {},

    #[error("Auction has not been approved by its curator")]
    NotApproved {},

    #[error("Must be more or equal to sale price {price}, got {amount}")]
    InsufficientPrice { amount: Uint128, price: Uint128 },

    #[error("Must be {expected} edition contract")]
    WrongEditionKind { expected: String },

    #[error("Sold out")]
    SoldOut {},

    #[error("Auction contract is not an approved minter of the edition")]
    NotApprovedMinter {},

    #[error("Must be curator")]
    NotCurator {},

    #[error("Must be creator or curator")]
    NotCreatorOrCurator {},

    #[error("Auction has already started")]
    AlreadyStarted {},

    #[error("Auction is not over")]
    NotOver {},

    #[error("Must be a collector")]
    NotCollector {},

    #[error("Token transfer failed: {reason}")]
    TransferFailed { reason: String },

    #[error("Invalid sent fund: expected {expected}, got {received}")]
    InvalidSentFundAmount {
        expected: Uint128,
        received: Uint128,
    },

    #[error("No payments owed to {principal}")]
    NothingToWithdraw { principal: String },
}
