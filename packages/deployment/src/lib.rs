//! Declarative deployment of the Stakehouse contracts into a Soroban test environment.
//!
//! A [`DeploymentModule`] names the contracts it needs by key; [`deploy`] registers them and
//! hands back a [`DeployedModule`] to look the addresses up. [`Deployer`] remembers what was
//! already deployed so running a module twice against the same environment is a no-op.

mod error;
pub mod fixtures;
mod module;
mod modules;

pub use error::DeploymentError;
pub use module::{deploy, DeployedModule, Deployer, DeploymentModule, ModuleBuilder};
pub use modules::{LendingModule, StakingModule};
