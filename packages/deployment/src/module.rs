use std::collections::{btree_map::Entry, BTreeMap};

use soroban_sdk::{Address, Env};

use crate::error::DeploymentError;

/// A named set of contracts deployed together.
pub trait DeploymentModule {
    /// Unique module name, also the key under which a [`Deployer`] records the result.
    const ID: &'static str;

    /// Declares the contracts of the module.
    ///
    /// # Errors
    ///
    /// Returns [`DeploymentError`] when a declaration is rejected by the builder.
    fn build(m: &mut ModuleBuilder<'_>) -> Result<(), DeploymentError>;
}

/// Collects the contracts declared by a [`DeploymentModule`].
pub struct ModuleBuilder<'a> {
    env: &'a Env,
    module: &'static str,
    contracts: BTreeMap<String, Address>,
}

impl<'a> ModuleBuilder<'a> {
    fn new(env: &'a Env, module: &'static str) -> Self {
        Self {
            env,
            module,
            contracts: BTreeMap::new(),
        }
    }

    /// Registers a contract through `register` and records its address under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DeploymentError::DuplicateContract`] if `key` is already taken; nothing is
    /// registered in that case.
    pub fn contract<F>(&mut self, key: &str, register: F) -> Result<Address, DeploymentError>
    where
        F: FnOnce(&Env) -> Address,
    {
        if self.contracts.contains_key(key) {
            return Err(DeploymentError::DuplicateContract {
                module: self.module,
                key: key.to_owned(),
            });
        }

        let address = register(self.env);
        self.contracts.insert(key.to_owned(), address.clone());

        Ok(address)
    }

    pub fn env(&self) -> &Env {
        self.env
    }
}

/// Addresses of the contracts of a deployed module, keyed by declaration name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployedModule {
    id: &'static str,
    contracts: BTreeMap<String, Address>,
}

impl DeployedModule {
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Address of the contract declared under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DeploymentError::UnknownContract`] when the module declared no such key.
    pub fn address(&self, key: &str) -> Result<&Address, DeploymentError> {
        self.contracts
            .get(key)
            .ok_or_else(|| DeploymentError::UnknownContract {
                module: self.id,
                key: key.to_owned(),
            })
    }

    pub fn contracts(&self) -> impl Iterator<Item = (&str, &Address)> {
        self.contracts.iter().map(|(key, address)| (key.as_str(), address))
    }
}

/// Builds module `M` and registers all of its contracts in `env`.
///
/// # Errors
///
/// Propagates the [`DeploymentError`] returned by [`DeploymentModule::build`].
pub fn deploy<M: DeploymentModule>(env: &Env) -> Result<DeployedModule, DeploymentError> {
    let mut builder = ModuleBuilder::new(env, M::ID);
    M::build(&mut builder)?;

    Ok(DeployedModule {
        id: M::ID,
        contracts: builder.contracts,
    })
}

/// Deploys modules into one environment, each at most once.
pub struct Deployer {
    env: Env,
    deployed: BTreeMap<&'static str, DeployedModule>,
}

impl Deployer {
    pub fn new(env: &Env) -> Self {
        Self {
            env: env.clone(),
            deployed: BTreeMap::new(),
        }
    }

    /// Deploys `M` unless it was deployed before, in which case the recorded result is
    /// returned and no contract is registered.
    ///
    /// # Errors
    ///
    /// Propagates the [`DeploymentError`] of a first deployment. A failed deployment is not
    /// recorded.
    pub fn deploy<M: DeploymentModule>(&mut self) -> Result<&DeployedModule, DeploymentError> {
        match self.deployed.entry(M::ID) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let module = deploy::<M>(&self.env)?;
                Ok(entry.insert(module))
            }
        }
    }

    pub fn deployed(&self, id: &str) -> Option<&DeployedModule> {
        self.deployed.get(id)
    }
}
