use soroban_sdk::contracttype;

use crate::storage::Config;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigResponse {
    pub config: Config,
    /// Sum of all stakes currently held by the pool
    pub total_staked: i128,
    /// Accumulated reward per staked token, as 18 decimal fixed point atomics
    pub reward_per_token: i128,
}
