use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env};
use stakehouse::{utils::AdminChange, validate_bps};

use crate::{
    error::ContractError,
    interest::{borrow_limit, checkpoint, current_debt, current_index, settle},
    storage::{
        get_config, get_position, save_config, save_position,
        utils::{
            self, get_admin, get_interest_index, get_pending_admin, get_total_borrows,
            get_total_deposits, is_initialized, remove_pending_admin, save_pending_admin,
            set_initialized,
        },
        Config, InterestIndex, Position,
    },
    token_contract,
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Stakehouse single asset lending market with simple interest"
);

#[contract]
pub struct SimpleLending;

pub trait SimpleLendingTrait {
    // Deployed without arguments, configured once afterwards
    fn initialize(
        env: Env,
        admin: Address,
        asset: Address,
        collateral_factor_bps: i64,
        interest_rate_bps: i64,
    ) -> Result<(), ContractError>;

    fn deposit(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    fn withdraw(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    fn borrow(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    // Repays at most the outstanding debt, returns the amount actually repaid
    fn repay(env: Env, sender: Address, amount: i128) -> Result<i128, ContractError>;

    fn update_config(
        env: Env,
        collateral_factor_bps: Option<i64>,
        interest_rate_bps: Option<i64>,
    ) -> Result<(), ContractError>;

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError>;

    fn revoke_admin_change(env: Env) -> Result<(), ContractError>;

    fn accept_admin(env: Env) -> Result<Address, ContractError>;

    // QUERIES

    fn query_config(env: Env) -> Result<Config, ContractError>;

    fn query_admin(env: Env) -> Result<Address, ContractError>;

    // Position with interest settled up to the current ledger timestamp
    fn query_position(env: Env, address: Address) -> Result<Position, ContractError>;

    fn query_borrow_limit(env: Env, address: Address) -> Result<i128, ContractError>;

    fn query_total_deposits(env: Env) -> i128;

    // Outstanding principal, interest not included
    fn query_total_borrows(env: Env) -> i128;

    fn query_available_liquidity(env: Env) -> Result<i128, ContractError>;
}

#[contractimpl]
impl SimpleLendingTrait for SimpleLending {
    fn initialize(
        env: Env,
        admin: Address,
        asset: Address,
        collateral_factor_bps: i64,
        interest_rate_bps: i64,
    ) -> Result<(), ContractError> {
        if is_initialized(&env) {
            log!(
                &env,
                "Simple Lending: Initialize: initializing contract twice is not allowed"
            );
            return Err(ContractError::AlreadyInitialized);
        }
        validate_bps!(collateral_factor_bps, interest_rate_bps);

        set_initialized(&env);
        save_config(
            &env,
            &Config {
                asset: asset.clone(),
                collateral_factor_bps,
                interest_rate_bps,
            },
        );
        utils::save_admin(&env, &admin);
        utils::save_total_deposits(&env, 0);
        utils::save_total_borrows(&env, 0);
        utils::save_interest_index(
            &env,
            &InterestIndex {
                accumulated: 0,
                last_update: env.ledger().timestamp(),
            },
        );

        env.events()
            .publish(("initialize", "Simple lending asset"), &asset);

        Ok(())
    }

    fn deposit(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();
        ensure_positive(&env, amount)?;

        let config = get_config(&env)?;
        let mut position = get_position(&env, &sender);

        let token_client = token_contract::Client::new(&env, &config.asset);
        token_client.transfer(&sender, &env.current_contract_address(), &amount);

        position.deposited = position
            .deposited
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        save_position(&env, &sender, &position);

        let total = get_total_deposits(&env)
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        utils::save_total_deposits(&env, total);

        env.events().publish(("deposit", "user"), &sender);
        env.events().publish(("deposit", "amount"), amount);

        Ok(())
    }

    fn withdraw(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();
        ensure_positive(&env, amount)?;

        let config = get_config(&env)?;
        let accumulated = checkpoint(&env, &config)?;
        let mut position = get_position(&env, &sender);

        if position.deposited < amount {
            log!(
                &env,
                "Simple Lending: Withdraw: trying to withdraw {} while only {} is deposited",
                amount,
                position.deposited
            );
            return Err(ContractError::InsufficientDeposit);
        }

        let remaining = position.deposited - amount;
        let debt = current_debt(&position, accumulated)?;
        if debt > borrow_limit(&config, remaining)? {
            log!(
                &env,
                "Simple Lending: Withdraw: remaining deposit {} does not cover debt {}",
                remaining,
                debt
            );
            return Err(ContractError::BorrowLimitExceeded);
        }
        ensure_liquidity(&env, &config, amount)?;

        position.deposited = remaining;
        save_position(&env, &sender, &position);
        utils::save_total_deposits(&env, get_total_deposits(&env) - amount);

        let token_client = token_contract::Client::new(&env, &config.asset);
        token_client.transfer(&env.current_contract_address(), &sender, &amount);

        env.events().publish(("withdraw", "user"), &sender);
        env.events().publish(("withdraw", "amount"), amount);

        Ok(())
    }

    fn borrow(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();
        ensure_positive(&env, amount)?;

        let config = get_config(&env)?;
        let accumulated = checkpoint(&env, &config)?;
        let mut position = get_position(&env, &sender);
        settle(&mut position, accumulated)?;

        let new_debt = position
            .debt()
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        let limit = borrow_limit(&config, position.deposited)?;
        if new_debt > limit {
            log!(
                &env,
                "Simple Lending: Borrow: debt {} would exceed the limit of {}",
                new_debt,
                limit
            );
            return Err(ContractError::BorrowLimitExceeded);
        }
        ensure_liquidity(&env, &config, amount)?;

        position.principal += amount;
        save_position(&env, &sender, &position);

        let total = get_total_borrows(&env)
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        utils::save_total_borrows(&env, total);

        let token_client = token_contract::Client::new(&env, &config.asset);
        token_client.transfer(&env.current_contract_address(), &sender, &amount);

        env.events().publish(("borrow", "user"), &sender);
        env.events().publish(("borrow", "amount"), amount);

        Ok(())
    }

    fn repay(env: Env, sender: Address, amount: i128) -> Result<i128, ContractError> {
        sender.require_auth();
        ensure_positive(&env, amount)?;

        let config = get_config(&env)?;
        let accumulated = checkpoint(&env, &config)?;
        let mut position = get_position(&env, &sender);
        settle(&mut position, accumulated)?;

        let debt = position.debt();
        if debt == 0 {
            log!(&env, "Simple Lending: Repay: nothing to repay");
            return Err(ContractError::NoOutstandingDebt);
        }

        let repaid = amount.min(debt);
        let token_client = token_contract::Client::new(&env, &config.asset);
        token_client.transfer(&sender, &env.current_contract_address(), &repaid);

        // interest is paid off first
        let interest_repaid = repaid.min(position.interest);
        let principal_repaid = repaid - interest_repaid;
        position.interest -= interest_repaid;
        position.principal -= principal_repaid;
        save_position(&env, &sender, &position);
        utils::save_total_borrows(&env, get_total_borrows(&env) - principal_repaid);

        env.events().publish(("repay", "user"), &sender);
        env.events().publish(("repay", "amount"), repaid);

        Ok(repaid)
    }

    fn update_config(
        env: Env,
        collateral_factor_bps: Option<i64>,
        interest_rate_bps: Option<i64>,
    ) -> Result<(), ContractError> {
        let mut config = get_config(&env)?;
        get_admin(&env).require_auth();

        // time so far is charged at the rate in force until now
        checkpoint(&env, &config)?;

        if let Some(collateral_factor_bps) = collateral_factor_bps {
            validate_bps!(collateral_factor_bps);
            config.collateral_factor_bps = collateral_factor_bps;
            env.events().publish(
                ("update_config", "collateral_factor_bps"),
                collateral_factor_bps,
            );
        }
        if let Some(interest_rate_bps) = interest_rate_bps {
            validate_bps!(interest_rate_bps);
            config.interest_rate_bps = interest_rate_bps;
            env.events()
                .publish(("update_config", "interest_rate_bps"), interest_rate_bps);
        }

        save_config(&env, &config);

        Ok(())
    }

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError> {
        if !is_initialized(&env) {
            return Err(ContractError::NotInitialized);
        }
        let current_admin = get_admin(&env);
        current_admin.require_auth();

        if current_admin == new_admin {
            log!(&env, "Simple Lending: Trying to set new admin as new");
            return Err(ContractError::SameAdmin);
        }

        save_pending_admin(
            &env,
            &AdminChange {
                new_admin: new_admin.clone(),
                time_limit,
            },
        );

        env.events().publish(
            ("Simple Lending: ", "Admin replacement requested by old admin: "),
            &current_admin,
        );
        env.events()
            .publish(("Simple Lending: ", "Replace with new admin: "), &new_admin);

        Ok(new_admin)
    }

    fn revoke_admin_change(env: Env) -> Result<(), ContractError> {
        if !is_initialized(&env) {
            return Err(ContractError::NotInitialized);
        }
        let current_admin = get_admin(&env);
        current_admin.require_auth();

        if get_pending_admin(&env).is_none() {
            log!(&env, "Simple Lending: No admin change in place");
            return Err(ContractError::NoAdminChangeInPlace);
        }
        remove_pending_admin(&env);

        env.events()
            .publish(("Simple Lending: ", "Undo admin change: "), ());

        Ok(())
    }

    fn accept_admin(env: Env) -> Result<Address, ContractError> {
        let admin_change = get_pending_admin(&env).ok_or_else(|| {
            log!(&env, "Simple Lending: No admin change request is in place");
            ContractError::NoAdminChangeInPlace
        })?;

        let pending_admin = admin_change.new_admin.clone();
        pending_admin.require_auth();

        if admin_change.is_expired(env.ledger().timestamp()) {
            log!(&env, "Simple Lending: Admin change expired");
            return Err(ContractError::AdminChangeExpired);
        }

        remove_pending_admin(&env);
        utils::save_admin(&env, &pending_admin);

        env.events()
            .publish(("Simple Lending: ", "Accepted new admin: "), &pending_admin);

        Ok(pending_admin)
    }

    fn query_config(env: Env) -> Result<Config, ContractError> {
        get_config(&env)
    }

    fn query_admin(env: Env) -> Result<Address, ContractError> {
        if !is_initialized(&env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(get_admin(&env))
    }

    fn query_position(env: Env, address: Address) -> Result<Position, ContractError> {
        let config = get_config(&env)?;
        let index = current_index(&env, &config, &get_interest_index(&env))?;
        let mut position = get_position(&env, &address);
        settle(&mut position, index.accumulated)?;

        Ok(position)
    }

    fn query_borrow_limit(env: Env, address: Address) -> Result<i128, ContractError> {
        let config = get_config(&env)?;
        borrow_limit(&config, get_position(&env, &address).deposited)
    }

    fn query_total_deposits(env: Env) -> i128 {
        get_total_deposits(&env)
    }

    fn query_total_borrows(env: Env) -> i128 {
        get_total_borrows(&env)
    }

    fn query_available_liquidity(env: Env) -> Result<i128, ContractError> {
        let config = get_config(&env)?;
        Ok(token_contract::Client::new(&env, &config.asset).balance(&env.current_contract_address()))
    }
}

fn ensure_positive(env: &Env, amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        log!(env, "Simple Lending: amount must be positive, got {}", amount);
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}

fn ensure_liquidity(env: &Env, config: &Config, amount: i128) -> Result<(), ContractError> {
    let available =
        token_contract::Client::new(env, &config.asset).balance(&env.current_contract_address());
    if available < amount {
        log!(
            env,
            "Simple Lending: requested {} while only {} is available",
            amount,
            available
        );
        return Err(ContractError::InsufficientLiquidity);
    }
    Ok(())
}
