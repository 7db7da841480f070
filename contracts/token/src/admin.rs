use soroban_sdk::{log, Address, Env};

use crate::storage_types::DataKey;

pub fn read_administrator(e: &Env) -> Address {
    let key = DataKey::Admin;
    e.storage().instance().get(&key).unwrap_or_else(|| {
        log!(e, "Token: Read administrator: Admin not set");
        panic!("Token: admin not set")
    })
}

pub fn write_administrator(e: &Env, id: &Address) {
    let key = DataKey::Admin;
    e.storage().instance().set(&key, id);
}

pub fn read_total_supply(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn increase_total_supply(e: &Env, amount: i128) {
    let total = read_total_supply(e)
        .checked_add(amount)
        .unwrap_or_else(|| panic!("Token: total supply overflow"));
    e.storage().instance().set(&DataKey::TotalSupply, &total);
}

pub fn decrease_total_supply(e: &Env, amount: i128) {
    let total = read_total_supply(e) - amount;
    e.storage().instance().set(&DataKey::TotalSupply, &total);
}
