mod helpers;
mod msg;
mod query;

pub use crate::helpers::*;
pub use crate::msg::*;
pub use crate::query::*;
#[cfg(not(target_arch = "wasm32"))]
pub mod mock;
