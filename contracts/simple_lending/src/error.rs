use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 800,
    NotInitialized = 801,
    InvalidAmount = 802,
    InsufficientDeposit = 803,
    BorrowLimitExceeded = 804,
    InsufficientLiquidity = 805,
    NoOutstandingDebt = 806,
    AdminNotSet = 807,
    ContractMathError = 808,
    SameAdmin = 809,
    NoAdminChangeInPlace = 810,
    AdminChangeExpired = 811,
}
