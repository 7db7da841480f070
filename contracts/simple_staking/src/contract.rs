use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env};

use crate::{
    error::ContractError,
    storage::{
        get_config, get_stake, save_config, save_stake,
        utils::{self, get_admin, get_total_staked, is_initialized, set_initialized},
        Config, StakeInfo,
    },
    token_contract,
};

// Metadata that is added on to the WASM custom section
contractmeta!(key = "Description", val = "Stakehouse simple token staking");

#[contract]
pub struct SimpleStaking;

pub trait SimpleStakingTrait {
    // Deployed without arguments, configured once afterwards
    fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        min_stake: i128,
    ) -> Result<(), ContractError>;

    fn stake(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    fn unstake(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    fn update_config(env: Env, min_stake: i128) -> Result<(), ContractError>;

    // QUERIES

    fn query_config(env: Env) -> Result<Config, ContractError>;

    fn query_admin(env: Env) -> Result<Address, ContractError>;

    fn query_staked(env: Env, address: Address) -> StakeInfo;

    fn query_total_staked(env: Env) -> i128;
}

#[contractimpl]
impl SimpleStakingTrait for SimpleStaking {
    fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        min_stake: i128,
    ) -> Result<(), ContractError> {
        if is_initialized(&env) {
            log!(
                &env,
                "Simple Staking: Initialize: initializing contract twice is not allowed"
            );
            return Err(ContractError::AlreadyInitialized);
        }
        if min_stake <= 0 {
            log!(
                &env,
                "Simple Staking: Initialize: minimum stake can not be smaller or equal to 0"
            );
            return Err(ContractError::InvalidMinStake);
        }

        set_initialized(&env);
        save_config(
            &env,
            &Config {
                token: token.clone(),
                min_stake,
            },
        );
        utils::save_admin(&env, &admin);
        utils::save_total_staked(&env, 0);

        env.events()
            .publish(("initialize", "Simple staking token"), &token);

        Ok(())
    }

    fn stake(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();

        let config = get_config(&env)?;
        if amount < config.min_stake {
            log!(
                &env,
                "Simple Staking: Stake: trying to stake {} which is less then minimum {} required!",
                amount,
                config.min_stake
            );
            return Err(ContractError::StakeLessThanMinStake);
        }

        let token_client = token_contract::Client::new(&env, &config.token);
        token_client.transfer(&sender, &env.current_contract_address(), &amount);

        let mut stake = get_stake(&env, &sender);
        stake.amount = stake
            .amount
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        stake.last_stake_timestamp = env.ledger().timestamp();
        save_stake(&env, &sender, &stake);

        let total = get_total_staked(&env)
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        utils::save_total_staked(&env, total);

        env.events().publish(("stake", "user"), &sender);
        env.events().publish(("stake", "amount"), amount);

        Ok(())
    }

    fn unstake(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();

        if amount <= 0 {
            log!(&env, "Simple Staking: Unstake: amount must be positive");
            return Err(ContractError::InvalidAmount);
        }

        let config = get_config(&env)?;
        let mut stake = get_stake(&env, &sender);
        if stake.amount < amount {
            log!(
                &env,
                "Simple Staking: Unstake: trying to unstake {} while only {} is staked",
                amount,
                stake.amount
            );
            return Err(ContractError::InsufficientStake);
        }

        stake.amount -= amount;
        save_stake(&env, &sender, &stake);
        utils::save_total_staked(&env, get_total_staked(&env) - amount);

        let token_client = token_contract::Client::new(&env, &config.token);
        token_client.transfer(&env.current_contract_address(), &sender, &amount);

        env.events().publish(("unstake", "user"), &sender);
        env.events().publish(("unstake", "amount"), amount);

        Ok(())
    }

    fn update_config(env: Env, min_stake: i128) -> Result<(), ContractError> {
        let mut config = get_config(&env)?;
        get_admin(&env).require_auth();

        if min_stake <= 0 {
            log!(
                &env,
                "Simple Staking: Update config: minimum stake can not be smaller or equal to 0"
            );
            return Err(ContractError::InvalidMinStake);
        }

        config.min_stake = min_stake;
        save_config(&env, &config);

        env.events()
            .publish(("update_config", "min_stake"), min_stake);

        Ok(())
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

    fn query_staked(env: Env, address: Address) -> StakeInfo {
        get_stake(&env, &address)
    }

    fn query_total_staked(env: Env) -> i128 {
        get_total_staked(&env)
    }
}
