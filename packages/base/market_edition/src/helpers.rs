use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, QuerierWrapper, StdResult, WasmMsg};
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    ApprovedMinterResponse, CreatorResponse, EditionBalanceResponse, EditionExecuteMsg,
    EditionInfoResponse, EditionQueryMsg, NumberCanMintResponse,
};

/// EditionContract is a wrapper around Addr that provides a lot of helpers
/// for working with edition contracts
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct EditionContract(pub Addr);

impl EditionContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call<T: Into<EditionExecuteMsg>>(&self, msg: T) -> StdResult<CosmosMsg> {
        let msg = to_json_binary(&msg.into())?;
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg,
            funds: vec![],
        }
        .into())
    }

    /// Builds the mint message, seeded when a seed is given
    pub fn mint(&self, recipient: &Addr, seed: Option<u64>) -> StdResult<CosmosMsg> {
        let recipient = recipient.to_string();
        match seed {
            Some(seed) => self.call(EditionExecuteMsg::MintSeeded { recipient, seed }),
            None => self.call(EditionExecuteMsg::Mint { recipient }),
        }
    }

    fn query<T: DeserializeOwned>(
        &self,
        querier: &QuerierWrapper,
        msg: &EditionQueryMsg,
    ) -> StdResult<T> {
        querier.query_wasm_smart(self.addr(), msg)
    }

    pub fn creator(&self, querier: &QuerierWrapper) -> StdResult<Addr> {
        let res: CreatorResponse = self.query(querier, &EditionQueryMsg::Creator {})?;
        Ok(res.creator)
    }

    pub fn edition_info(&self, querier: &QuerierWrapper) -> StdResult<EditionInfoResponse> {
        self.query(querier, &EditionQueryMsg::EditionInfo {})
    }

    pub fn is_approved_minter(&self, querier: &QuerierWrapper, minter: &Addr) -> StdResult<bool> {
        let res: ApprovedMinterResponse = self.query(
            querier,
            &EditionQueryMsg::IsApprovedMinter {
                minter: minter.to_string(),
            },
        )?;
        Ok(res.approved)
    }

    pub fn number_can_mint(&self, querier: &QuerierWrapper) -> StdResult<u64> {
        let res: NumberCanMintResponse = self.query(querier, &EditionQueryMsg::NumberCanMint {})?;
        Ok(res.count)
    }

    pub fn balance_of(&self, querier: &QuerierWrapper, owner: &Addr) -> StdResult<u64> {
        let res: EditionBalanceResponse = self.query(
            querier,
            &EditionQueryMsg::Balance {
                owner: owner.to_string(),
            },
        )?;
        Ok(res.balance)
    }
}
