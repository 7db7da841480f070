use soroban_sdk::{testutils::Address as _, token::StellarAssetClient, Address, Env};

use crate::{
    contract::{StakingPool, StakingPoolClient},
    token_contract,
};

pub const DEFAULT_REWARD_RATE: i128 = 100;

pub fn deploy_token_contract<'a>(
    env: &Env,
    admin: &Address,
) -> (token_contract::Client<'a>, StellarAssetClient<'a>) {
    let address = env
        .register_stellar_asset_contract_v2(admin.clone())
        .address();
    (
        token_contract::Client::new(env, &address),
        StellarAssetClient::new(env, &address),
    )
}

pub fn deploy_staking_pool<'a>(
    env: &Env,
    admin: impl Into<Option<Address>>,
    staking_token: &Address,
    reward_token: &Address,
    reward_rate: impl Into<Option<i128>>,
) -> StakingPoolClient<'a> {
    let admin = admin.into().unwrap_or(Address::generate(env));
    let reward_rate = reward_rate.into().unwrap_or(DEFAULT_REWARD_RATE);

    StakingPoolClient::new(
        env,
        &env.register(
            StakingPool,
            (
                admin,
                staking_token.clone(),
                reward_token.clone(),
                reward_rate,
            ),
        ),
    )
}

#[test]
#[should_panic(expected = "Error(Contract, #500)")]
fn constructor_rejects_same_tokens() {
    let env = Env::default();
    let admin = Address::generate(&env);
    let (token, _) = deploy_token_contract(&env, &admin);

    deploy_staking_pool(&env, admin, &token.address, &token.address, None);
}

#[test]
#[should_panic(expected = "Error(Contract, #501)")]
fn constructor_rejects_negative_rate() {
    let env = Env::default();
    let admin = Address::generate(&env);
    let (staking_token, _) = deploy_token_contract(&env, &admin);
    let (reward_token, _) = deploy_token_contract(&env, &admin);

    deploy_staking_pool(
        &env,
        admin,
        &staking_token.address,
        &reward_token.address,
        -1i128,
    );
}
