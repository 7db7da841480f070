use soroban_sdk::Env;
use stakehouse_simple_lending::{SimpleLending, SimpleLendingClient};
use stakehouse_simple_staking::{SimpleStaking, SimpleStakingClient};

use crate::{
    error::DeploymentError,
    module::{DeployedModule, DeploymentModule, ModuleBuilder},
};

/// Deploys one uninitialized [`SimpleLending`] contract keyed `lending`.
pub struct LendingModule;

impl LendingModule {
    pub const LENDING: &'static str = "lending";

    /// Client for the `lending` contract of a deployed [`LendingModule`].
    pub fn lending<'a>(
        env: &Env,
        module: &DeployedModule,
    ) -> Result<SimpleLendingClient<'a>, DeploymentError> {
        Ok(SimpleLendingClient::new(env, module.address(Self::LENDING)?))
    }
}

impl DeploymentModule for LendingModule {
    const ID: &'static str = "LendingModule";

    fn build(m: &mut ModuleBuilder<'_>) -> Result<(), DeploymentError> {
        m.contract(Self::LENDING, |env| env.register(SimpleLending, ()))?;
        Ok(())
    }
}

/// Deploys one uninitialized [`SimpleStaking`] contract keyed `staking`.
pub struct StakingModule;

impl StakingModule {
    pub const STAKING: &'static str = "staking";

    /// Client for the `staking` contract of a deployed [`StakingModule`].
    pub fn staking<'a>(
        env: &Env,
        module: &DeployedModule,
    ) -> Result<SimpleStakingClient<'a>, DeploymentError> {
        Ok(SimpleStakingClient::new(env, module.address(Self::STAKING)?))
    }
}

impl DeploymentModule for StakingModule {
    const ID: &'static str = "StakingModule";

    fn build(m: &mut ModuleBuilder<'_>) -> Result<(), DeploymentError> {
        m.contract(Self::STAKING, |env| env.register(SimpleStaking, ()))?;
        Ok(())
    }
}
