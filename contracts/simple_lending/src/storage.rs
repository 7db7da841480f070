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
    /// The single asset that is supplied, used as collateral and borrowed
    pub asset: Address,
    /// Share of a deposit that can be borrowed against, in bps
    pub collateral_factor_bps: i64,
    /// Simple yearly interest charged on debt, in bps
    pub interest_rate_bps: i64,
}
const CONFIG: Symbol = symbol_short!("CONFIG");

pub fn get_config(env: &Env) -> Result<Config, ContractError> {
    let config = env.storage().instance().get(&CONFIG).ok_or_else(|| {
        log!(env, "Simple Lending: Contract has not been initialized");
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
pub struct Position {
    /// Supplied amount, doubles as collateral
    pub deposited: i128,
    /// Borrowed amount not repaid yet, interest is charged on it
    pub principal: i128,
    /// Interest charged up to `interest_index`, does not bear interest itself
    pub interest: i128,
    /// Value of the market interest index when `interest` was last settled
    pub interest_index: i128,
}

impl Position {
    pub fn debt(&self) -> i128 {
        self.principal + self.interest
    }
}

/// Running sum of `interest_rate_bps * seconds` over the lifetime of the market.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InterestIndex {
    pub accumulated: i128,
    pub last_update: u64,
}

pub fn get_position(env: &Env, key: &Address) -> Position {
    let position = env
        .storage()
        .persistent()
        .get::<_, Position>(key)
        .unwrap_or_default();
    extend_persistent_ttl(env, key);

    position
}

pub fn save_position(env: &Env, key: &Address, position: &Position) {
    env.storage().persistent().set(key, position);
    extend_persistent_ttl(env, key);
}

pub mod utils {
    use super::*;

    #[derive(Clone, Copy)]
    #[repr(u32)]
    pub enum DataKey {
        TotalDeposits = 0,
        TotalBorrows = 1,
        Initialized = 2,
        InterestIndex = 3,
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
        e.storage().instance().set(&ADMIN, address);
    }

    pub fn get_admin(e: &Env) -> Address {
        extend_instance_ttl(e);

        e.storage().instance().get(&ADMIN).unwrap_or_else(|| {
            log!(e, "Simple Lending: Admin not set");
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

    pub fn get_total_deposits(e: &Env) -> i128 {
        e.storage()
            .instance()
            .get(&DataKey::TotalDeposits)
            .unwrap_or(0i128)
    }

    pub fn save_total_deposits(e: &Env, amount: i128) {
        e.storage().instance().set(&DataKey::TotalDeposits, &amount);
    }

    pub fn get_total_borrows(e: &Env) -> i128 {
        e.storage()
            .instance()
            .get(&DataKey::TotalBorrows)
            .unwrap_or(0i128)
    }

    pub fn save_total_borrows(e: &Env, amount: i128) {
        e.storage().instance().set(&DataKey::TotalBorrows, &amount);
    }

    pub fn get_interest_index(e: &Env) -> InterestIndex {
        e.storage()
            .instance()
            .get(&DataKey::InterestIndex)
            .unwrap_or_default()
    }

    pub fn save_interest_index(e: &Env, index: &InterestIndex) {
        e.storage().instance().set(&DataKey::InterestIndex, index);
    }
}
