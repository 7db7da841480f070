//! Constant-rate reward emission shared pro rata between stakers.
//!
//! The pool emits `reward_rate` reward tokens per ledger. Emission is tracked as an
//! ever-growing "reward per staked token" accumulator; a staker's rewards are its balance
//! multiplied by the growth of the accumulator since its last checkpoint.

use soroban_decimal::Decimal;
use soroban_sdk::{log, Env};

use crate::{
    error::ContractError,
    storage::{
        utils::{get_reward_state, get_total_staked, save_reward_state},
        Config, RewardState, StakerInfo,
    },
};

/// Reward state as of the current ledger, without persisting it.
///
/// Emission is scaled to 18 decimals and divided by the total stake. The remainder of that
/// division is kept in `undistributed` and joins the next emission, so frequent updates against
/// a large stake do not round rewards away.
pub fn current_reward_state(
    env: &Env,
    config: &Config,
    state: &RewardState,
    total_staked: i128,
) -> Result<RewardState, ContractError> {
    let ledger = env.ledger().sequence();
    // nothing is emitted while the pool is empty
    if total_staked == 0 {
        return Ok(RewardState {
            last_update_ledger: ledger.max(state.last_update_ledger),
            ..state.clone()
        });
    }

    let elapsed = ledger.saturating_sub(state.last_update_ledger);
    let scaled_emission = config
        .reward_rate
        .checked_mul(elapsed as i128)
        .and_then(|emitted| emitted.checked_mul(Decimal::one().atomics()))
        .and_then(|scaled| scaled.checked_add(state.undistributed))
        .ok_or_else(|| {
            log!(
                env,
                "Staking Pool: Reward per token: emission over {} ledgers overflows",
                elapsed
            );
            ContractError::ContractMathError
        })?;

    let reward_per_token = Decimal::raw(state.reward_per_token_stored)
        .checked_add(Decimal::raw(scaled_emission / total_staked))
        .ok_or(ContractError::ContractMathError)?;

    Ok(RewardState {
        reward_per_token_stored: reward_per_token.atomics(),
        last_update_ledger: ledger.max(state.last_update_ledger),
        undistributed: scaled_emission % total_staked,
    })
}

/// Accumulator value as of the current ledger, without persisting it.
pub fn current_reward_per_token(
    env: &Env,
    config: &Config,
    state: &RewardState,
    total_staked: i128,
) -> Result<Decimal, ContractError> {
    let state = current_reward_state(env, config, state, total_staked)?;
    Ok(Decimal::raw(state.reward_per_token_stored))
}

/// Rewards of `staker` given the accumulator value `reward_per_token`.
pub fn pending_rewards(
    staker: &StakerInfo,
    reward_per_token: Decimal,
) -> Result<i128, ContractError> {
    let growth = reward_per_token
        .checked_sub(Decimal::raw(staker.reward_per_token_paid))
        .ok_or(ContractError::ContractMathError)?;

    growth
        .checked_mul_int(staker.balance)
        .and_then(|accrued| accrued.checked_add(staker.rewards))
        .ok_or(ContractError::ContractMathError)
}

/// Persists the accumulator as of the current ledger and returns it.
///
/// Must run before anything that changes the total stake or the reward rate.
pub fn checkpoint(env: &Env, config: &Config) -> Result<Decimal, ContractError> {
    let state = current_reward_state(env, config, &get_reward_state(env), get_total_staked(env))?;
    save_reward_state(env, &state);

    Ok(Decimal::raw(state.reward_per_token_stored))
}

/// Settles the rewards of `staker` against an accumulator value returned by [`checkpoint`].
pub fn settle_staker(
    staker: &mut StakerInfo,
    reward_per_token: Decimal,
) -> Result<(), ContractError> {
    staker.rewards = pending_rewards(staker, reward_per_token)?;
    staker.reward_per_token_paid = reward_per_token.atomics();

    Ok(())
}
