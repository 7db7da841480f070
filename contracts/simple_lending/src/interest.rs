//! Simple (non compounding) interest on borrowed principal.
//!
//! The market keeps a single index, the running sum of `interest_rate_bps * seconds`. It is
//! brought up to date before the rate is read or changed, so every second is charged at the
//! rate that was in force during it. A position owes its settled interest plus
//! `principal * (index - position.interest_index) / (10_000 * SECONDS_PER_YEAR)`.
//!
//! The index is an exact integer. Only settlement divides, and it rounds up.

use soroban_decimal::Decimal;
use soroban_sdk::{log, Env};
use stakehouse::utils::{MAX_BPS, SECONDS_PER_YEAR};

use crate::{
    error::ContractError,
    storage::{
        utils::{get_interest_index, save_interest_index},
        Config, InterestIndex, Position,
    },
};

const INTEREST_DENOMINATOR: i128 = (MAX_BPS as i128) * (SECONDS_PER_YEAR as i128);

/// Index as of the current ledger timestamp, without persisting it.
pub fn current_index(
    env: &Env,
    config: &Config,
    index: &InterestIndex,
) -> Result<InterestIndex, ContractError> {
    let now = env.ledger().timestamp();
    let elapsed = now.saturating_sub(index.last_update);

    let accumulated = (config.interest_rate_bps as i128)
        .checked_mul(elapsed as i128)
        .and_then(|growth| index.accumulated.checked_add(growth))
        .ok_or_else(|| {
            log!(
                env,
                "Simple Lending: Interest index: rate {} over {} seconds overflows",
                config.interest_rate_bps,
                elapsed
            );
            ContractError::ContractMathError
        })?;

    Ok(InterestIndex {
        accumulated,
        last_update: now.max(index.last_update),
    })
}

/// Persists the index as of the current ledger and returns its value.
///
/// Must run before anything that reads positions or changes the interest rate.
pub fn checkpoint(env: &Env, config: &Config) -> Result<i128, ContractError> {
    let index = current_index(env, config, &get_interest_index(env))?;
    save_interest_index(env, &index);

    Ok(index.accumulated)
}

/// Interest owed on `principal` while the index moved from `from` to `to`, rounded up.
pub fn interest_between(principal: i128, from: i128, to: i128) -> Result<i128, ContractError> {
    let growth = to.checked_sub(from).ok_or(ContractError::ContractMathError)?;
    if principal == 0 || growth <= 0 {
        return Ok(0);
    }

    principal
        .checked_mul(growth)
        .and_then(|owed| owed.checked_add(INTEREST_DENOMINATOR - 1))
        .map(|owed| owed / INTEREST_DENOMINATOR)
        .ok_or(ContractError::ContractMathError)
}

/// Moves the interest accrued since the last settlement into `position.interest`.
///
/// Only needed before the principal changes; settling more often only adds rounding.
pub fn settle(position: &mut Position, accumulated: i128) -> Result<(), ContractError> {
    let accrued = interest_between(position.principal, position.interest_index, accumulated)?;
    position.interest = position
        .interest
        .checked_add(accrued)
        .ok_or(ContractError::ContractMathError)?;
    position.interest_index = accumulated;

    Ok(())
}

/// Debt of `position` at index value `accumulated`, without settling it.
pub fn current_debt(position: &Position, accumulated: i128) -> Result<i128, ContractError> {
    let mut position = position.clone();
    settle(&mut position, accumulated)?;

    Ok(position.debt())
}

/// Maximum debt that `deposited` can back.
pub fn borrow_limit(config: &Config, deposited: i128) -> Result<i128, ContractError> {
    Decimal::bps(config.collateral_factor_bps)
        .checked_mul_int(deposited)
        .ok_or(ContractError::ContractMathError)
}
