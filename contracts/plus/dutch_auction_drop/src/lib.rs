pub mod auction;
pub mod contract;
pub mod error;
pub mod event;
pub mod msg;
pub mod payment;
pub mod price;
pub mod purchase;
pub mod state;

pub use crate::error::ContractError;
