use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error, Address, Env,
};
use stakehouse::utils::AdminChange;

use crate::{
    distribution::{checkpoint, current_reward_per_token, pending_rewards, settle_staker},
    error::ContractError,
    msg::ConfigResponse,
    storage::{
        get_config, get_staker, save_config, save_staker,
        utils::{
            self, get_admin, get_pending_admin, get_reward_state, get_total_staked,
            remove_pending_admin, save_pending_admin,
        },
        Config, RewardState,
    },
    token_contract,
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Stakehouse single asset staking pool with per ledger rewards"
);

#[contract]
pub struct StakingPool;

pub trait StakingPoolTrait {
    fn stake(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    fn withdraw(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    // Pays out everything accrued so far, returns the amount paid
    fn claim_rewards(env: Env, sender: Address) -> Result<i128, ContractError>;

    // Withdraws the whole stake and claims the rewards, returns the amount of rewards paid.
    // If the pool cannot cover the rewards the stake is still returned and 0 is paid
    fn exit(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn fund_rewards(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    fn update_reward_rate(env: Env, new_rate: i128) -> Result<(), ContractError>;

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError>;

    fn revoke_admin_change(env: Env) -> Result<(), ContractError>;

    fn accept_admin(env: Env) -> Result<Address, ContractError>;

    // QUERIES

    fn staking_token(env: Env) -> Result<Address, ContractError>;

    fn reward_token(env: Env) -> Result<Address, ContractError>;

    fn reward_rate(env: Env) -> Result<i128, ContractError>;

    fn total_staked_supply(env: Env) -> i128;

    fn staked_balance(env: Env, address: Address) -> i128;

    fn earned(env: Env, address: Address) -> Result<i128, ContractError>;

    // Accumulated reward per staked token as 18 decimals fixed point atomics
    fn reward_per_token(env: Env) -> Result<i128, ContractError>;

    fn query_config(env: Env) -> Result<ConfigResponse, ContractError>;

    fn query_admin(env: Env) -> Address;
}

#[contractimpl]
impl StakingPool {
    pub fn __constructor(
        env: Env,
        admin: Address,
        staking_token: Address,
        reward_token: Address,
        reward_rate: i128,
    ) {
        if staking_token == reward_token {
            log!(
                &env,
                "Staking Pool: Constructor: staking and reward token must be different"
            );
            panic_with_error!(&env, ContractError::SameStakingAndRewardToken);
        }
        if reward_rate < 0 {
            log!(
                &env,
                "Staking Pool: Constructor: reward rate can not be negative"
            );
            panic_with_error!(&env, ContractError::InvalidRewardRate);
        }

        let config = Config {
            staking_token: staking_token.clone(),
            reward_token: reward_token.clone(),
            reward_rate,
        };
        save_config(&env, &config);

        utils::save_admin(&env, &admin);
        utils::init_total_staked(&env);
        utils::save_reward_state(
            &env,
            &RewardState {
                reward_per_token_stored: 0,
                last_update_ledger: env.ledger().sequence(),
                undistributed: 0,
            },
        );

        env.events()
            .publish(("initialize", "staking token"), staking_token);
        env.events()
            .publish(("initialize", "reward token"), reward_token);
    }
}

#[contractimpl]
impl StakingPoolTrait for StakingPool {
    fn stake(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();

        if amount <= 0 {
            log!(&env, "Staking Pool: Stake: amount must be positive, got {}", amount);
            return Err(ContractError::InvalidAmount);
        }

        let config = get_config(&env)?;
        let reward_per_token = checkpoint(&env, &config)?;

        let mut staker = get_staker(&env, &sender);
        settle_staker(&mut staker, reward_per_token)?;

        let staking_token = token_contract::Client::new(&env, &config.staking_token);
        staking_token.transfer(&sender, &env.current_contract_address(), &amount);

        staker.balance = staker
            .balance
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        save_staker(&env, &sender, &staker);
        utils::increase_total_staked(&env, amount)?;

        env.events().publish(("stake", "user"), &sender);
        env.events().publish(("stake", "amount"), amount);

        Ok(())
    }

    fn withdraw(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();

        let config = get_config(&env)?;
        withdraw_stake(&env, &config, &sender, amount)
    }

    fn claim_rewards(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();

        let config = get_config(&env)?;
        pay_rewards(&env, &config, &sender)
    }

    fn exit(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();

        let config = get_config(&env)?;
        let balance = get_staker(&env, &sender).balance;
        if balance > 0 {
            withdraw_stake(&env, &config, &sender, balance)?;
        }

        match pay_rewards(&env, &config, &sender) {
            // the stake is returned anyway, rewards stay recorded for a later claim
            Err(ContractError::InsufficientRewardBalance) => {
                log!(&env, "Staking Pool: Exit: rewards left unpaid until the pool is funded");
                Ok(0)
            }
            paid => paid,
        }
    }

    fn fund_rewards(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();

        if amount <= 0 {
            log!(&env, "Staking Pool: Fund rewards: amount must be positive");
            return Err(ContractError::InvalidAmount);
        }

        let config = get_config(&env)?;
        let reward_token = token_contract::Client::new(&env, &config.reward_token);
        reward_token.transfer(&sender, &env.current_contract_address(), &amount);

        env.events().publish(("fund_rewards", "sender"), &sender);
        env.events().publish(("fund_rewards", "amount"), amount);

        Ok(())
    }

    fn update_reward_rate(env: Env, new_rate: i128) -> Result<(), ContractError> {
        let admin = get_admin(&env);
        admin.require_auth();

        if new_rate < 0 {
            log!(&env, "Staking Pool: Update reward rate: rate can not be negative");
            return Err(ContractError::InvalidRewardRate);
        }

        let mut config = get_config(&env)?;
        // everything emitted so far is accounted at the old rate
        checkpoint(&env, &config)?;

        config.reward_rate = new_rate;
        save_config(&env, &config);

        env.events().publish(("update_reward_rate", "rate"), new_rate);

        Ok(())
    }

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError> {
        let current_admin = get_admin(&env);
        current_admin.require_auth();

        if current_admin == new_admin {
            log!(&env, "Staking Pool: Trying to set new admin as new");
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
            ("Staking Pool: ", "Admin replacement requested by old admin: "),
            &current_admin,
        );
        env.events()
            .publish(("Staking Pool: ", "Replace with new admin: "), &new_admin);

        Ok(new_admin)
    }

    fn revoke_admin_change(env: Env) -> Result<(), ContractError> {
        let current_admin = get_admin(&env);
        current_admin.require_auth();

        if get_pending_admin(&env).is_none() {
            log!(&env, "Staking Pool: No admin change in place");
            return Err(ContractError::NoAdminChangeInPlace);
        }
        remove_pending_admin(&env);

        env.events()
            .publish(("Staking Pool: ", "Undo admin change: "), ());

        Ok(())
    }

    fn accept_admin(env: Env) -> Result<Address, ContractError> {
        let admin_change = get_pending_admin(&env).ok_or_else(|| {
            log!(&env, "Staking Pool: No admin change request is in place");
            ContractError::NoAdminChangeInPlace
        })?;

        let pending_admin = admin_change.new_admin.clone();
        pending_admin.require_auth();

        if admin_change.is_expired(env.ledger().timestamp()) {
            log!(&env, "Staking Pool: Admin change expired");
            return Err(ContractError::AdminChangeExpired);
        }

        remove_pending_admin(&env);
        utils::save_admin(&env, &pending_admin);

        env.events()
            .publish(("Staking Pool: ", "Accepted new admin: "), &pending_admin);

        Ok(pending_admin)
    }

    // QUERIES

    fn staking_token(env: Env) -> Result<Address, ContractError> {
        Ok(get_config(&env)?.staking_token)
    }

    fn reward_token(env: Env) -> Result<Address, ContractError> {
        Ok(get_config(&env)?.reward_token)
    }

    fn reward_rate(env: Env) -> Result<i128, ContractError> {
        Ok(get_config(&env)?.reward_rate)
    }

    fn total_staked_supply(env: Env) -> i128 {
        get_total_staked(&env)
    }

    fn staked_balance(env: Env, address: Address) -> i128 {
        get_staker(&env, &address).balance
    }

    fn earned(env: Env, address: Address) -> Result<i128, ContractError> {
        let config = get_config(&env)?;
        let reward_per_token = current_reward_per_token(
            &env,
            &config,
            &get_reward_state(&env),
            get_total_staked(&env),
        )?;

        pending_rewards(&get_staker(&env, &address), reward_per_token)
    }

    fn reward_per_token(env: Env) -> Result<i128, ContractError> {
        let config = get_config(&env)?;
        let reward_per_token = current_reward_per_token(
            &env,
            &config,
            &get_reward_state(&env),
            get_total_staked(&env),
        )?;

        Ok(reward_per_token.atomics())
    }

    fn query_config(env: Env) -> Result<ConfigResponse, ContractError> {
        let config = get_config(&env)?;
        let total_staked = get_total_staked(&env);
        let reward_per_token =
            current_reward_per_token(&env, &config, &get_reward_state(&env), total_staked)?;

        Ok(ConfigResponse {
            config,
            total_staked,
            reward_per_token: reward_per_token.atomics(),
        })
    }

    fn query_admin(env: Env) -> Address {
        get_admin(&env)
    }
}

fn withdraw_stake(
    env: &Env,
    config: &Config,
    sender: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount <= 0 {
        log!(env, "Staking Pool: Withdraw: amount must be positive, got {}", amount);
        return Err(ContractError::InvalidAmount);
    }

    let mut staker = get_staker(env, sender);
    if staker.balance < amount {
        log!(
            env,
            "Staking Pool: Withdraw: trying to withdraw {} while only {} is staked",
            amount,
            staker.balance
        );
        return Err(ContractError::InsufficientStake);
    }

    let reward_per_token = checkpoint(env, config)?;
    settle_staker(&mut staker, reward_per_token)?;

    staker.balance -= amount;
    save_staker(env, sender, &staker);
    utils::decrease_total_staked(env, amount)?;

    let staking_token = token_contract::Client::new(env, &config.staking_token);
    staking_token.transfer(&env.current_contract_address(), sender, &amount);

    env.events().publish(("withdraw", "user"), sender);
    env.events().publish(("withdraw", "amount"), amount);

    Ok(())
}

fn pay_rewards(env: &Env, config: &Config, sender: &Address) -> Result<i128, ContractError> {
    let reward_per_token = checkpoint(env, config)?;

    let mut staker = get_staker(env, sender);
    settle_staker(&mut staker, reward_per_token)?;

    let reward = staker.rewards;
    if reward == 0 {
        save_staker(env, sender, &staker);
        return Ok(0);
    }

    let reward_token = token_contract::Client::new(env, &config.reward_token);
    let available = reward_token.balance(&env.current_contract_address());
    if available < reward {
        log!(
            env,
            "Staking Pool: Claim rewards: pool holds {} reward tokens but {} are owed",
            available,
            reward
        );
        return Err(ContractError::InsufficientRewardBalance);
    }

    staker.rewards = 0;
    save_staker(env, sender, &staker);
    reward_token.transfer(&env.current_contract_address(), sender, &reward);

    env.events().publish(("claim_rewards", "user"), sender);
    env.events().publish(("claim_rewards", "amount"), reward);

    Ok(reward)
}
