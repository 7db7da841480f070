use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 700,
    NotInitialized = 701,
    InvalidMinStake = 702,
    StakeLessThanMinStake = 703,
    InvalidAmount = 704,
    InsufficientStake = 705,
    AdminNotSet = 706,
    ContractMathError = 707,
}
