//! Ready made environments for the integration tests.

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::TokenClient,
    Address, Env, String,
};
use soroban_token_contract::{Token, TokenClient as AdminTokenClient};
use stakehouse_staking_pool::{StakingPool, StakingPoolClient};

/// Supply minted to the owner of each fixture token, 1M tokens with 18 decimals.
pub const INITIAL_SUPPLY: i128 = 1_000_000 * ONE_TOKEN;
/// Staking tokens handed to each fixture user.
pub const USER_FUNDING: i128 = ONE_TOKEN;
/// Reward tokens emitted per ledger by the fixture pool.
pub const DEFAULT_REWARD_RATE: i128 = 100;
/// Seconds added to the ledger timestamp for every mined block.
pub const LEDGER_CLOSE_SECONDS: u64 = 5;

const TOKEN_DECIMALS: u32 = 18;
const ONE_TOKEN: i128 = 1_000_000_000_000_000_000;

pub struct StakingPoolFixture<'a> {
    pub staking_pool: StakingPoolClient<'a>,
    pub staking_token: TokenClient<'a>,
    pub reward_token: TokenClient<'a>,
    pub owner: Address,
    pub user: Address,
    pub user2: Address,
}

/// Deploys a token whose whole initial supply belongs to `owner`.
///
/// Minting needs the authorization of `owner`, so auths must be mocked beforehand.
pub fn deploy_token<'a>(env: &Env, owner: &Address, name: &str, symbol: &str) -> TokenClient<'a> {
    let address = env.register(
        Token,
        (
            owner.clone(),
            TOKEN_DECIMALS,
            String::from_str(env, name),
            String::from_str(env, symbol),
        ),
    );
    AdminTokenClient::new(env, &address).mint(owner, &INITIAL_SUPPLY);

    TokenClient::new(env, &address)
}

/// Staking pool over fresh `StakingToken` and `RewardToken` contracts, with both users holding
/// [`USER_FUNDING`] staking tokens.
///
/// Mocks all authorizations of `env`.
pub fn deploy_staking_pool_fixture<'a>(env: &Env) -> StakingPoolFixture<'a> {
    env.mock_all_auths();

    let owner = Address::generate(env);
    let user = Address::generate(env);
    let user2 = Address::generate(env);

    let staking_token = deploy_token(env, &owner, "StakingToken", "STK");
    let reward_token = deploy_token(env, &owner, "RewardToken", "RWD");

    let staking_pool = StakingPoolClient::new(
        env,
        &env.register(
            StakingPool,
            (
                owner.clone(),
                staking_token.address.clone(),
                reward_token.address.clone(),
                DEFAULT_REWARD_RATE,
            ),
        ),
    );

    staking_token.transfer(&owner, &user, &USER_FUNDING);
    staking_token.transfer(&owner, &user2, &USER_FUNDING);

    StakingPoolFixture {
        staking_pool,
        staking_token,
        reward_token,
        owner,
        user,
        user2,
    }
}

/// Closes `blocks` ledgers.
pub fn mine(env: &Env, blocks: u32) {
    env.ledger().with_mut(|li| {
        li.sequence_number += blocks;
        li.timestamp += u64::from(blocks) * LEDGER_CLOSE_SECONDS;
    });
}
