use soroban_sdk::{contracttype, Address};

/// Seconds in a (non leap) year, used to annualize rates.
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60;

/// Upper bound of any basis points parameter (100%).
pub const MAX_BPS: i64 = 10_000;

// Validate if every bps value is within 0..=10_000
#[macro_export]
macro_rules! validate_bps {
    ($($value:expr),+) => {
        $(
            if !(0..=$crate::utils::MAX_BPS).contains(&$value) {
                panic!("The value {} is out of range. Must be between 0 and 10000 bps.", $value);
            }
        )+
    }
}

/// A pending two-step admin handover.
///
/// The current admin proposes `new_admin`; the handover completes when `new_admin` accepts it
/// before `time_limit` (a ledger timestamp), or at any time if no limit was set.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChange {
    pub new_admin: Address,
    pub time_limit: Option<u64>,
}

impl AdminChange {
    pub fn is_expired(&self, now: u64) -> bool {
        matches!(self.time_limit, Some(limit) if now > limit)
    }
}
