use pretty_assertions::assert_eq;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address, Env,
};
use stakehouse::utils::SECONDS_PER_YEAR;
use test_case::test_case;

use crate::{
    error::ContractError,
    storage::{Config, Position},
    tests::setup::{
        deploy_simple_lending, deploy_token_contract, initialize_simple_lending,
        COLLATERAL_FACTOR_BPS, INTEREST_RATE_BPS,
    },
};

#[test]
fn initialize_stores_config() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let (token, _) = deploy_token_contract(&env, &admin);
    let lending = initialize_simple_lending(&env, &admin, &token.address);

    assert_eq!(
        lending.query_config(),
        Config {
            asset: token.address.clone(),
            collateral_factor_bps: COLLATERAL_FACTOR_BPS,
            interest_rate_bps: INTEREST_RATE_BPS,
        }
    );
    assert_eq!(lending.query_admin(), admin);
    assert_eq!(lending.query_total_deposits(), 0);
    assert_eq!(lending.query_total_borrows(), 0);
    assert_eq!(lending.query_available_liquidity(), 0);
}

#[test]
fn initialize_twice_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let (token, _) = deploy_token_contract(&env, &admin);
    let lending = initialize_simple_lending(&env, &admin, &token.address);

    assert_eq!(
        lending.try_initialize(&admin, &token.address, &5_000, &100),
        Err(Ok(ContractError::AlreadyInitialized))
    );
}

#[test]
#[should_panic(expected = "The value 10001 is out of range. Must be between 0 and 10000 bps.")]
fn initialize_with_collateral_factor_above_max() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let (token, _) = deploy_token_contract(&env, &admin);
    let lending = deploy_simple_lending(&env);

    lending.initialize(&admin, &token.address, &10_001, &INTEREST_RATE_BPS);
}

#[test]
fn calls_before_initialize_fail() {
    let env = Env::default();
    env.mock_all_auths();

    let user = Address::generate(&env);
    let lending = deploy_simple_lending(&env);

    assert_eq!(
        lending.try_deposit(&user, &100),
        Err(Ok(ContractError::NotInitialized))
    );
    assert_eq!(
        lending.try_query_config(),
        Err(Ok(ContractError::NotInitialized))
    );
    assert_eq!(
        lending.try_query_admin(),
        Err(Ok(ContractError::NotInitialized))
    );
}

#[test]
fn deposit_and_withdraw() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let (token, token_admin) = deploy_token_contract(&env, &admin);
    token_admin.mint(&user, &1_000);

    let lending = initialize_simple_lending(&env, &admin, &token.address);

    lending.deposit(&user, &600);
    assert_eq!(token.balance(&user), 400);
    assert_eq!(token.balance(&lending.address), 600);
    assert_eq!(lending.query_total_deposits(), 600);
    assert_eq!(lending.query_borrow_limit(&user), 450);

    lending.withdraw(&user, &200);
    assert_eq!(token.balance(&user), 600);
    assert_eq!(lending.query_total_deposits(), 400);
    assert_eq!(
        lending.query_position(&user),
        Position {
            deposited: 400,
            principal: 0,
            interest: 0,
            interest_index: 0,
        }
    );
}

#[test_case(0 ; "zero")]
#[test_case(-5 ; "negative")]
fn non_positive_amounts_are_rejected(amount: i128) {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let (token, _) = deploy_token_contract(&env, &admin);
    let lending = initialize_simple_lending(&env, &admin, &token.address);

    assert_eq!(
        lending.try_deposit(&user, &amount),
        Err(Ok(ContractError::InvalidAmount))
    );
    assert_eq!(
        lending.try_withdraw(&user, &amount),
        Err(Ok(ContractError::InvalidAmount))
    );
    assert_eq!(
        lending.try_borrow(&user, &amount),
        Err(Ok(ContractError::InvalidAmount))
    );
    assert_eq!(
        lending.try_repay(&user, &amount),
        Err(Ok(ContractError::InvalidAmount))
    );
}

#[test]
fn withdraw_more_than_deposited_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let (token, token_admin) = deploy_token_contract(&env, &admin);
    token_admin.mint(&user, &1_000);

    let lending = initialize_simple_lending(&env, &admin, &token.address);
    lending.deposit(&user, &500);

    assert_eq!(
        lending.try_withdraw(&user, &501),
        Err(Ok(ContractError::InsufficientDeposit))
    );
}

#[test]
fn borrow_within_limit() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let (token, token_admin) = deploy_token_contract(&env, &admin);
    token_admin.mint(&user, &1_000);

    let lending = initialize_simple_lending(&env, &admin, &token.address);
    lending.deposit(&user, &1_000);

    lending.borrow(&user, &750);
    assert_eq!(token.balance(&user), 750);
    assert_eq!(lending.query_total_borrows(), 750);
    assert_eq!(lending.query_available_liquidity(), 250);

    assert_eq!(
        lending.try_borrow(&user, &1),
        Err(Ok(ContractError::BorrowLimitExceeded))
    );
}

#[test]
fn withdraw_is_limited_by_outstanding_debt() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let (token, token_admin) = deploy_token_contract(&env, &admin);
    token_admin.mint(&user, &1_000);

    let lending = initialize_simple_lending(&env, &admin, &token.address);
    lending.deposit(&user, &1_000);
    lending.borrow(&user, &300);

    // 300 of debt needs at least 400 deposited at 75%
    assert_eq!(
        lending.try_withdraw(&user, &601),
        Err(Ok(ContractError::BorrowLimitExceeded))
    );
    lending.withdraw(&user, &600);
    assert_eq!(lending.query_position(&user).deposited, 400);
}

#[test]
fn withdraw_and_borrow_are_bounded_by_market_balance() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let (token, token_admin) = deploy_token_contract(&env, &admin);
    token_admin.mint(&user, &1_000);

    let lending = initialize_simple_lending(&env, &admin, &token.address);
    lending.deposit(&user, &1_000);

    // market loses funds outside of the lending flows
    token.burn(&lending.address, &900);
    assert_eq!(lending.query_available_liquidity(), 100);

    assert_eq!(
        lending.try_withdraw(&user, &1_000),
        Err(Ok(ContractError::InsufficientLiquidity))
    );
    assert_eq!(
        lending.try_borrow(&user, &750),
        Err(Ok(ContractError::InsufficientLiquidity))
    );

    lending.borrow(&user, &100);
    assert_eq!(lending.query_available_liquidity(), 0);
    assert_eq!(lending.query_position(&user).debt(), 100);
}

#[test]
fn lenders_fund_borrowers() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let lender = Address::generate(&env);
    let borrower = Address::generate(&env);
    let (token, token_admin) = deploy_token_contract(&env, &admin);
    token_admin.mint(&lender, &1_000);
    token_admin.mint(&borrower, &1_000);

    let lending = initialize_simple_lending(&env, &admin, &token.address);
    lending.deposit(&lender, &1_000);
    lending.deposit(&borrower, &1_000);
    lending.borrow(&borrower, &750);

    assert_eq!(lending.query_total_deposits(), 2_000);
    assert_eq!(lending.query_total_borrows(), 750);
    assert_eq!(lending.query_available_liquidity(), 1_250);

    lending.withdraw(&lender, &1_000);
    assert_eq!(token.balance(&lender), 1_000);
    assert_eq!(lending.query_available_liquidity(), 250);
}

#[test]
fn interest_accrues_over_a_year() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = 1_000);

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let (token, token_admin) = deploy_token_contract(&env, &admin);
    token_admin.mint(&user, &3_000_000);

    let lending = initialize_simple_lending(&env, &admin, &token.address);
    lending.deposit(&user, &2_000_000);
    lending.borrow(&user, &1_000_000);

    env.ledger()
        .with_mut(|li| li.timestamp = 1_000 + SECONDS_PER_YEAR);

    // 5% yearly on 1_000_000
    assert_eq!(
        lending.query_position(&user),
        Position {
            deposited: 2_000_000,
            principal: 1_000_000,
            interest: 50_000,
            interest_index: 500 * SECONDS_PER_YEAR as i128,
        }
    );
    assert_eq!(lending.query_total_borrows(), 1_000_000);

    let repaid = lending.repay(&user, &2_000_000);
    assert_eq!(repaid, 1_050_000);
    assert_eq!(lending.query_position(&user).debt(), 0);
    assert_eq!(lending.query_total_borrows(), 0);
    assert_eq!(token.balance(&user), 3_000_000 - 2_000_000 + 1_000_000 - 1_050_000);
    assert_eq!(lending.query_available_liquidity(), 2_050_000);
}

#[test]
fn partial_repay() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let (token, token_admin) = deploy_token_contract(&env, &admin);
    token_admin.mint(&user, &1_000);

    let lending = initialize_simple_lending(&env, &admin, &token.address);
    lending.deposit(&user, &1_000);
    lending.borrow(&user, &500);

    assert_eq!(lending.repay(&user, &200), 200);
    assert_eq!(lending.query_position(&user).debt(), 300);
    assert_eq!(lending.query_total_borrows(), 300);
    assert_eq!(token.balance(&user), 300);
}

#[test]
fn repay_without_debt_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let (token, token_admin) = deploy_token_contract(&env, &admin);
    token_admin.mint(&user, &1_000);

    let lending = initialize_simple_lending(&env, &admin, &token.address);
    lending.deposit(&user, &1_000);

    assert_eq!(
        lending.try_repay(&user, &100),
        Err(Ok(ContractError::NoOutstandingDebt))
    );
}

#[test]
fn update_config() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let (token, token_admin) = deploy_token_contract(&env, &admin);
    token_admin.mint(&user, &1_000);

    let lending = initialize_simple_lending(&env, &admin, &token.address);
    lending.deposit(&user, &1_000);

    lending.update_config(&Some(5_000), &None);
    assert_eq!(lending.query_config().collateral_factor_bps, 5_000);
    assert_eq!(lending.query_config().interest_rate_bps, INTEREST_RATE_BPS);
    assert_eq!(lending.query_borrow_limit(&user), 500);

    lending.update_config(&None, &Some(1_000));
    assert_eq!(lending.query_config().interest_rate_bps, 1_000);
}

#[test]
#[should_panic(expected = "The value 12000 is out of range. Must be between 0 and 10000 bps.")]
fn update_config_with_interest_rate_above_max() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let (token, _) = deploy_token_contract(&env, &admin);
    let lending = initialize_simple_lending(&env, &admin, &token.address);

    lending.update_config(&None, &Some(12_000));
}

#[test]
#[should_panic(expected = "HostError: Error(Auth, InvalidAction)")]
fn update_config_requires_admin() {
    let env = Env::default();

    let admin = Address::generate(&env);
    let (token, _) = deploy_token_contract(&env, &admin);
    let lending = initialize_simple_lending(&env, &admin, &token.address);

    lending.update_config(&Some(5_000), &None);
}

#[test]
fn rate_change_applies_from_the_moment_it_is_made() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let (token, token_admin) = deploy_token_contract(&env, &admin);
    token_admin.mint(&user, &2_000_000);

    let lending = initialize_simple_lending(&env, &admin, &token.address);
    lending.deposit(&user, &2_000_000);
    lending.borrow(&user, &1_000_000);

    env.ledger()
        .with_mut(|li| li.timestamp += SECONDS_PER_YEAR);
    lending.update_config(&None, &Some(10_000));

    // the year that already passed stays at 5%
    assert_eq!(lending.query_position(&user).debt(), 1_050_000);

    env.ledger()
        .with_mut(|li| li.timestamp += SECONDS_PER_YEAR / 2);
    assert_eq!(lending.query_position(&user).debt(), 1_050_000 + 500_000);
}

#[test]
fn frequent_touches_do_not_skip_interest() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let (token, token_admin) = deploy_token_contract(&env, &admin);
    token_admin.mint(&user, &10_000);

    let lending = initialize_simple_lending(&env, &admin, &token.address);
    lending.deposit(&user, &2_000);
    lending.borrow(&user, &1_000);

    for _ in 0..365 {
        env.ledger().with_mut(|li| li.timestamp += 24 * 60 * 60);
        lending.deposit(&user, &1);
        lending.withdraw(&user, &1);
    }

    assert_eq!(lending.query_position(&user).debt(), 1_050);
    assert_eq!(lending.repay(&user, &2_000), 1_050);
    assert_eq!(lending.query_position(&user).debt(), 0);
    assert_eq!(lending.query_total_borrows(), 0);
}

#[test]
fn repay_covers_interest_before_principal() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let (token, token_admin) = deploy_token_contract(&env, &admin);
    token_admin.mint(&user, &2_000_000);

    let lending = initialize_simple_lending(&env, &admin, &token.address);
    lending.deposit(&user, &2_000_000);
    lending.borrow(&user, &1_000_000);
    env.ledger()
        .with_mut(|li| li.timestamp += SECONDS_PER_YEAR);

    assert_eq!(lending.repay(&user, &60_000), 60_000);

    let position = lending.query_position(&user);
    assert_eq!(position.interest, 0);
    assert_eq!(position.principal, 990_000);
    assert_eq!(lending.query_total_borrows(), 990_000);
}

#[test]
fn rate_change_cannot_push_position_over_limit_retroactively() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let (token, token_admin) = deploy_token_contract(&env, &admin);
    token_admin.mint(&user, &1_000);

    let lending = initialize_simple_lending(&env, &admin, &token.address);
    lending.deposit(&user, &1_000);
    lending.borrow(&user, &700);

    env.ledger()
        .with_mut(|li| li.timestamp += SECONDS_PER_YEAR);
    lending.update_config(&None, &Some(10_000));

    // 700 at 5% for a year, still within the 750 limit
    assert_eq!(lending.query_position(&user).debt(), 735);
    assert_eq!(lending.query_borrow_limit(&user), 750);
    lending.borrow(&user, &15);
}
