//! A minimal edition contract used as the minting collaborator in tests.
//! It keeps a capped supply, a set of approved minters, per-owner balances
//! and the seeds received by seeded mints.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    attr, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdError, StdResult,
};
use cw_storage_plus::{Item, Map};

use crate::{
    ApprovedMinterResponse, CreatorResponse, EditionBalanceResponse, EditionInfoResponse,
    Implementation, NumberCanMintResponse,
};

#[cw_serde]
pub struct MockEditionInstantiateMsg {
    /// defaults to the instantiating sender
    pub creator: Option<String>,
    pub implementation: Implementation,
    pub edition_size: u64,
    pub minters: Vec<String>,
}

#[cw_serde]
pub enum MockEditionExecuteMsg {
    Mint { recipient: String },
    MintSeeded { recipient: String, seed: u64 },
    SetApprovedMinter { minter: String, approved: bool },
}

#[cw_serde]
pub enum MockEditionQueryMsg {
    Creator {},
    EditionInfo {},
    IsApprovedMinter { minter: String },
    NumberCanMint {},
    Balance { owner: String },
    /// seeds of every seeded mint, in token order
    Seeds {},
}

#[cw_serde]
struct EditionConfig {
    creator: Addr,
    implementation: Implementation,
    edition_size: u64,
    total_minted: u64,
}

const EDITION_CONFIG: Item<EditionConfig> = Item::new("edition_config");
const MINTERS: Map<&Addr, bool> = Map::new("approved_minters");
const BALANCES: Map<&Addr, u64> = Map::new("balances");
const SEEDS: Map<u64, u64> = Map::new("seeds");

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: MockEditionInstantiateMsg,
) -> StdResult<Response> {
    let creator = match msg.creator {
        Some(creator) => deps.api.addr_validate(&creator)?,
        None => info.sender,
    };
    EDITION_CONFIG.save(
        deps.storage,
        &EditionConfig {
            creator,
            implementation: msg.implementation,
            edition_size: msg.edition_size,
            total_minted: 0,
        },
    )?;
    for minter in msg.minters {
        let minter = deps.api.addr_validate(&minter)?;
        MINTERS.save(deps.storage, &minter, &true)?;
    }
    Ok(Response::default())
}

pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: MockEditionExecuteMsg,
) -> StdResult<Response> {
    match msg {
        MockEditionExecuteMsg::Mint { recipient } => try_mint(deps, info, recipient, None),
        MockEditionExecuteMsg::MintSeeded { recipient, seed } => {
            try_mint(deps, info, recipient, Some(seed))
        }
        MockEditionExecuteMsg::SetApprovedMinter { minter, approved } => {
            let config = EDITION_CONFIG.load(deps.storage)?;
            if info.sender != config.creator {
                return Err(StdError::generic_err("Only creator"));
            }
            let minter = deps.api.addr_validate(&minter)?;
            MINTERS.save(deps.storage, &minter, &approved)?;
            Ok(Response::new().add_attributes(vec![
                attr("action", "set_approved_minter"),
                attr("minter", minter),
                attr("approved", approved.to_string()),
            ]))
        }
    }
}

fn is_approved_minter(deps: Deps, config: &EditionConfig, minter: &Addr) -> StdResult<bool> {
    Ok(config.creator.eq(minter) || MINTERS.may_load(deps.storage, minter)?.unwrap_or(false))
}

fn try_mint(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    seed: Option<u64>,
) -> StdResult<Response> {
    let mut config = EDITION_CONFIG.load(deps.storage)?;
    if (config.implementation == Implementation::Seeded) != seed.is_some() {
        return Err(StdError::generic_err("Wrong edition implementation"));
    }
    if !is_approved_minter(deps.as_ref(), &config, &info.sender)? {
        return Err(StdError::generic_err("Needs to be an allowed minter"));
    }
    if config.total_minted >= config.edition_size {
        return Err(StdError::generic_err("Sold out"));
    }

    let recipient = deps.api.addr_validate(&recipient)?;
    config.total_minted += 1;
    let token_id = config.total_minted;
    BALANCES.update(deps.storage, &recipient, |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default() + 1)
    })?;
    if let Some(seed) = seed {
        SEEDS.save(deps.storage, token_id, &seed)?;
    }
    EDITION_CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "mint"),
        attr("recipient", recipient),
        attr("token_id", token_id.to_string()),
    ]))
}

pub fn query(deps: Deps, _env: Env, msg: MockEditionQueryMsg) -> StdResult<Binary> {
    let config = EDITION_CONFIG.load(deps.storage)?;
    match msg {
        MockEditionQueryMsg::Creator {} => to_json_binary(&CreatorResponse {
            creator: config.creator,
        }),
        MockEditionQueryMsg::EditionInfo {} => to_json_binary(&EditionInfoResponse {
            implementation: config.implementation,
            edition_size: config.edition_size,
            total_minted: config.total_minted,
        }),
        MockEditionQueryMsg::IsApprovedMinter { minter } => {
            let minter = deps.api.addr_validate(&minter)?;
            to_json_binary(&ApprovedMinterResponse {
                approved: is_approved_minter(deps, &config, &minter)?,
            })
        }
        MockEditionQueryMsg::NumberCanMint {} => to_json_binary(&NumberCanMintResponse {
            count: config.edition_size.saturating_sub(config.total_minted),
        }),
        MockEditionQueryMsg::Balance { owner } => {
            let owner = deps.api.addr_validate(&owner)?;
            to_json_binary(&EditionBalanceResponse {
                balance: BALANCES.may_load(deps.storage, &owner)?.unwrap_or_default(),
            })
        }
        MockEditionQueryMsg::Seeds {} => {
            let seeds = SEEDS
                .range(deps.storage, None, None, Order::Ascending)
                .map(|item| item.map(|(_, seed)| seed))
                .collect::<StdResult<Vec<u64>>>()?;
            to_json_binary(&seeds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::from_json;
    use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info};

    const CREATOR: &str = "creator";
    const MINTER: &str = "minter";

    fn setup(deps: DepsMut, implementation: Implementation, edition_size: u64) {
        let msg = MockEditionInstantiateMsg {
            creator: None,
            implementation,
            edition_size,
            minters: vec![MINTER.to_string()],
        };
        instantiate(deps, mock_env(), mock_info(CREATOR, &[]), msg).unwrap();
    }

    #[test]
    fn mint_until_sold_out() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut(), Implementation::Standard, 2);

        for _ in 0..2 {
            let msg = MockEditionExecuteMsg::Mint {
                recipient: "buyer".to_string(),
            };
            execute(deps.as_mut(), mock_env(), mock_info(MINTER, &[]), msg).unwrap();
        }

        let msg = MockEditionExecuteMsg::Mint {
            recipient: "buyer".to_string(),
        };
        let err = execute(deps.as_mut(), mock_env(), mock_info(MINTER, &[]), msg).unwrap_err();
        assert_eq!(err, StdError::generic_err("Sold out"));

        let res: EditionBalanceResponse = from_json(
            query(
                deps.as_ref(),
                mock_env(),
                MockEditionQueryMsg::Balance {
                    owner: "buyer".to_string(),
                },
            )
            .unwrap(),
        )
        .unwrap();
        assert_eq!(res.balance, 2);
    }

    #[test]
    fn only_approved_minters_mint() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut(), Implementation::Standard, 10);

        let msg = MockEditionExecuteMsg::Mint {
            recipient: "buyer".to_string(),
        };
        let err = execute(deps.as_mut(), mock_env(), mock_info("stranger", &[]), msg).unwrap_err();
        assert_eq!(err, StdError::generic_err("Needs to be an allowed minter"));

        let res: ApprovedMinterResponse = from_json(
            query(
                deps.as_ref(),
                mock_env(),
                MockEditionQueryMsg::IsApprovedMinter {
                    minter: MINTER.to_string(),
                },
            )
            .unwrap(),
        )
        .unwrap();
        assert!(res.approved);
    }

    #[test]
    fn seeded_mint_records_seed() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut(), Implementation::Seeded, 10);

        let msg = MockEditionExecuteMsg::Mint {
            recipient: "buyer".to_string(),
        };
        let err = execute(deps.as_mut(), mock_env(), mock_info(MINTER, &[]), msg).unwrap_err();
        assert_eq!(err, StdError::generic_err("Wrong edition implementation"));

        let msg = MockEditionExecuteMsg::MintSeeded {
            recipient: "buyer".to_string(),
            seed: 7,
        };
        execute(deps.as_mut(), mock_env(), mock_info(MINTER, &[]), msg).unwrap();

        let seeds: Vec<u64> =
            from_json(query(deps.as_ref(), mock_env(), MockEditionQueryMsg::Seeds {}).unwrap())
                .unwrap();
        assert_eq!(seeds, vec![7]);
    }
}
