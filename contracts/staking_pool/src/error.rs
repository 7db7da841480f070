use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    SameStakingAndRewardToken = 500,
    InvalidRewardRate = 501,
    InvalidAmount = 502,
    InsufficientStake = 503,
    InsufficientRewardBalance = 504,
    AdminNotSet = 505,
    ConfigNotSet = 506,
    ContractMathError = 507,
    SameAdmin = 508,
    NoAdminChangeInPlace = 509,
    AdminChangeExpired = 510,
}
