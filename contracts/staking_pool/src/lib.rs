#![no_std]
mod contract;
mod distribution;
mod error;
mod msg;
mod storage;

pub mod token_contract {
    pub use soroban_sdk::token::TokenClient as Client;
}

pub use contract::{StakingPool, StakingPoolClient};
pub use error::ContractError;
pub use msg::ConfigResponse;
pub use storage::{Config, StakerInfo};
