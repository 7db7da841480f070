use soroban_sdk::{
    contracttype, log, panic_with_error, symbol_short, Address, ConversionError, Env, Symbol,
    TryFromVal, Val,
};
use stakehouse::{
    ttl::{extend_instance_ttl, extend_persistent_ttl},
    utils::AdminChange,
};

use crate::error::ContractError;

pub const ADMIN: Symbol = symbol_short!("ADMIN");
pub const PENDING_ADMIN: Symbol = symbol_short!("p_admin");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Token accepted by `stake` and returned by `withdraw`
    pub staking_token: Address,
    /// Token paid out by `claim_rewards`
    pub reward_token: Address,
    /// Amount of reward tokens emitted per ledger, shared by all stakers
    pub reward_rate: i128,
}
const CONFIG: Symbol = symbol_short!("CONFIG");

pub fn get_config(env: &Env) -> Result<Config, ContractError> {
    let config = env.storage().instance().get(&CONFIG).ok_or_else(|| {
        log!(env, "Staking Pool: Config not set");
        ContractError::ConfigNotSet
    })?;
    extend_instance_ttl(env);

    Ok(config)
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&CONFIG, config);
    extend_instance_ttl(env);
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakerInfo {
    /// Amount of staking tokens deposited by the staker
    pub balance: i128,
    /// Reward per token (18 decimals atomics) at the staker's last checkpoint
    pub reward_per_token_paid: i128,
    /// Rewards settled at the last checkpoint and not claimed yet
    pub rewards: i128,
}

pub fn get_staker(env: &Env, key: &Address) -> StakerInfo {
    let staker = env
        .storage()
        .persistent()
        .get::<_, StakerInfo>(key)
        .unwrap_or_default();
    extend_persistent_ttl(env, key);

    staker
}

pub fn save_staker(env: &Env, key: &Address, staker: &StakerInfo) {
    env.storage().persistent().set(key, staker);
    extend_persistent_ttl(env, key);
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RewardState {
    /// Reward per staked token accumulated up to `last_update_ledger` (18 decimals atomics)
    pub reward_per_token_stored: i128,
    pub last_update_ledger: u32,
    /// Scaled emission left over from the last division by the total stake
    pub undistributed: i128,
}

pub mod utils {
    use super::*;

    #[derive(Clone, Copy)]
    #[repr(u32)]
    pub enum DataKey {
        TotalStaked = 0,
        RewardState = 1,
    }

    impl TryFromVal<Env, DataKey> for Val {
        type Error = ConversionError;

        fn try_from_val(_env: &Env, v: &DataKey) -> Result<Self, Self::Error> {
            Ok((*v as u32).into())
        }
    }

    pub fn save_admin(e: &Env, address: &Address) {
        e.storage().instance().set(&ADMIN, address);
        extend_instance_ttl(e);
    }

    pub fn get_admin(e: &Env) -> Address {
        extend_instance_ttl(e);

        e.storage().instance().get(&ADMIN).unwrap_or_else(|| {
            log!(e, "Staking Pool: Admin not set");
            panic_with_error!(&e, ContractError::AdminNotSet)
        })
    }

    pub fn save_pending_admin(e: &Env, change: &AdminChange) {
        e.storage().instance().set(&PENDING_ADMIN, change);
    }

    pub fn get_pending_admin(e: &Env) -> Option<AdminChange> {
        e.storage().instance().get(&PENDING_ADMIN)
    }

    pub fn remove_pending_admin(e: &Env) {
        e.storage().instance().remove(&PENDING_ADMIN);
    }

    pub fn init_total_staked(e: &Env) {
        e.storage().instance().set(&DataKey::TotalStaked, &0i128);
    }

    pub fn get_total_staked(e: &Env) -> i128 {
        e.storage()
            .instance()
            .get(&DataKey::TotalStaked)
            .unwrap_or(0i128)
    }

    pub fn increase_total_staked(e: &Env, amount: i128) -> Result<(), ContractError> {
        let total = get_total_staked(e)
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        e.storage().instance().set(&DataKey::TotalStaked, &total);

        Ok(())
    }

    pub fn decrease_total_staked(e: &Env, amount: i128) -> Result<(), ContractError> {
        let total = get_total_staked(e)
            .checked_sub(amount)
            .ok_or(ContractError::ContractMathError)?;
        e.storage().instance().set(&DataKey::TotalStaked, &total);

        Ok(())
    }

    pub fn get_reward_state(e: &Env) -> RewardState {
        e.storage()
            .instance()
            .get(&DataKey::RewardState)
            .unwrap_or_default()
    }

    pub fn save_reward_state(e: &Env, state: &RewardState) {
        e.storage().instance().set(&DataKey::RewardState, state);
    }
}
