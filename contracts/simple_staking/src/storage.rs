use soroban_sdk::{
    contracttype, log, panic_with_error, symbol_short, Address, ConversionError, Env, Symbol,
    TryFromVal, Val,
};
use stakehouse::ttl::{extend_instance_ttl, extend_persistent_ttl};

use crate::error::ContractError;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Token accepted for staking
    pub token: Address,
    /// Smallest amount accepted by a single `stake` call
    pub min_stake: i128,
}
const CONFIG: Symbol = symbol_short!("CONFIG");

pub fn get_config(env: &Env) -> Result<Config, ContractError> {
    let config = env.storage().instance().get(&CONFIG).ok_or_else(|| {
        log!(env, "Simple Staking: Contract has not been initialized");
        ContractError::NotInitialized
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
pub struct StakeInfo {
    /// The amount of staked tokens
    pub amount: i128,
    /// The timestamp of the latest stake
    pub last_stake_timestamp: u64,
}

pub fn get_stake(env: &Env, key: &Address) -> StakeInfo {
    let stake = env
        .storage()
        .persistent()
        .get::<_, StakeInfo>(key)
        .unwrap_or_default();
    extend_persistent_ttl(env, key);

    stake
}

pub fn save_stake(env: &Env, key: &Address, stake: &StakeInfo) {
    env.storage().persistent().set(key, stake);
    extend_persistent_ttl(env, key);
}

pub mod utils {
    use super::*;

    #[derive(Clone, Copy)]
    #[repr(u32)]
    pub enum DataKey {
        Admin = 0,
        TotalStaked = 1,
        Initialized = 2,
    }

    impl TryFromVal<Env, DataKey> for Val {
        type Error = ConversionError;

        fn try_from_val(_env: &Env, v: &DataKey) -> Result<Self, Self::Error> {
            Ok((*v as u32).into())
        }
    }

    pub fn is_initialized(e: &Env) -> bool {
        e.storage()
            .instance()
            .get(&DataKey::Initialized)
            .unwrap_or(false)
    }

    pub fn set_initialized(e: &Env) {
        e.storage().instance().set(&DataKey::Initialized, &true);
    }

    pub fn save_admin(e: &Env, address: &Address) {
        e.storage().instance().set(&DataKey::Admin, address);
    }

    pub fn get_admin(e: &Env) -> Address {
        e.storage()
            .instance()
            .get(&DataKey::Admin)
            .unwrap_or_else(|| {
                log!(e, "Simple Staking: Admin not set");
                panic_with_error!(&e, ContractError::AdminNotSet)
            })
    }

    pub fn get_total_staked(e: &Env) -> i128 {
        e.storage()
            .instance()
            .get(&DataKey::TotalStaked)
            .unwrap_or(0i128)
    }

    pub fn save_total_staked(e: &Env, total: i128) {
        e.storage().instance().set(&DataKey::TotalStaked, &total);
    }
}
