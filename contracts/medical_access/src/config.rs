use soroban_sdk::{contracttype, Address, Env, String};

use crate::{storage, ContractError};

/// Contract-wide configuration, written once by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Address allowed to assign organizations to callers.
    pub admin: Address,
    /// The only organization whose members may verify doctors.
    pub verifier_org: String,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&storage::INITIALIZED)
}

pub fn require_initialized(env: &Env) -> Result<(), ContractError> {
    if is_initialized(env) {
        Ok(())
    } else {
        Err(ContractError::NotInitialized)
    }
}

pub fn get_config(env: &Env) -> Result<Config, ContractError> {
    env.storage()
        .instance()
        .get(&storage::CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub(crate) fn store(env: &Env, config: &Config) {
    env.storage().instance().set(&storage::CONFIG, config);
    env.storage().instance().set(&storage::INITIALIZED, &true);
    storage::extend_instance_ttl(env);
}
