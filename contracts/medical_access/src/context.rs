use soroban_sdk::{Address, Env, String, Symbol};

use crate::errors::raise;
use crate::{config, membership, storage, ContractError};

/// Everything a mutating operation may learn about the transaction it runs in.
///
/// Built once at the start of each mutating entry point and passed down
/// explicitly. The timestamp is the ledger close time shared by every node
/// executing the transaction; nothing in this crate reads any other clock.
pub struct TxContext {
    pub env: Env,
    /// The authenticated caller.
    pub caller: Address,
    /// Organization the caller acts for.
    pub org: String,
    /// Deterministic transaction timestamp, seconds since the Unix epoch.
    pub timestamp: u64,
    /// Contract-scoped transaction identifier, strictly increasing across
    /// committed mutating invocations.
    pub tx_id: u64,
}

impl TxContext {
    /// Authenticates `caller` and resolves its organization. Callers without an
    /// organization are not allowed to mutate state.
    pub fn begin(env: &Env, caller: Address, operation: Symbol) -> Result<Self, ContractError> {
        config::require_initialized(env).map_err(|e| raise(env, e, operation.clone()))?;
        caller.require_auth();

        let org = match membership::org_of(env, &caller) {
            Ok(org) => org,
            Err(ContractError::MemberNotFound) => {
                return Err(raise(env, ContractError::Unauthorized, operation))
            }
            Err(e) => return Err(raise(env, e, operation)),
        };

        Self::open(env, caller, org)
    }

    /// Opens a context for an already-authenticated caller.
    pub(crate) fn open(env: &Env, caller: Address, org: String) -> Result<Self, ContractError> {
        let tx_id = storage::next_sequence(env, &storage::TX_SEQ)?;
        storage::extend_instance_ttl(env);
        Ok(Self {
            env: env.clone(),
            caller,
            org,
            timestamp: env.ledger().timestamp(),
            tx_id,
        })
    }
}
