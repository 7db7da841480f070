#![no_std]
mod contract;
mod error;
mod storage;

pub mod token_contract {
    pub use soroban_sdk::token::TokenClient as Client;
}

pub use contract::{SimpleStaking, SimpleStakingClient};
pub use error::ContractError;
pub use storage::{Config, StakeInfo};
