use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;

/// Minting flavour of an edition contract. Seeded editions take an opaque
/// caller supplied seed with every mint.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum Implementation {
    Standard,
    Seeded,
}

impl Implementation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Implementation::Standard => "standard",
            Implementation::Seeded => "seeded",
        }
    }
}

/// An edition contract together with the minting flavour it exposes
#[cw_serde]
pub struct EditionTarget {
    pub contract_addr: Addr,
    pub implementation: Implementation,
}

#[cw_serde]
pub enum EditionExecuteMsg {
    /// Mints the next unit of the edition to recipient. Only approved minters may call it
    Mint { recipient: String },
    MintSeeded { recipient: String, seed: u64 },
}
