#![no_std]
mod contract;
mod error;
mod interest;
mod storage;

pub mod token_contract {
    pub use soroban_sdk::token::TokenClient as Client;
}

pub use contract::{SimpleLending, SimpleLendingClient};
pub use error::ContractError;
pub use storage::{Config, Position};
