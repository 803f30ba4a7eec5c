use soroban_sdk::{symbol_short, Env, IntoVal, String, Symbol, TryFromVal, Val, Vec};

use crate::ContractError;

const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 3_110_400;

// ── Instance keys ─────────────────────────────────────────────

pub const CONFIG: Symbol = symbol_short!("CONFIG");
pub const INITIALIZED: Symbol = symbol_short!("INIT");
pub const TX_SEQ: Symbol = symbol_short!("TX_SEQ");
pub const LOG_SEQ: Symbol = symbol_short!("LOG_SEQ");
pub const GRANT_SEQ: Symbol = symbol_short!("ACC_SEQ");
pub const LOG_HEAD: Symbol = symbol_short!("LOG_HEAD");

// ── Persistent namespaces ─────────────────────────────────────

pub const PATIENT: Symbol = symbol_short!("PATIENT");
pub const DOCTOR: Symbol = symbol_short!("DOCTOR");
pub const ACCESS: Symbol = symbol_short!("ACCESS");
pub const LOG: Symbol = symbol_short!("LOG");
pub const MEMBER: Symbol = symbol_short!("MEMBER");
pub const PATIENT_GRANTS: Symbol = symbol_short!("PAT_ACC");
pub const PATIENT_LOGS: Symbol = symbol_short!("PAT_LOG");
pub const DOCTOR_LOGS: Symbol = symbol_short!("DOC_LOG");

pub fn patient_key(patient_id: &String) -> (Symbol, String) {
    (PATIENT, patient_id.clone())
}

pub fn doctor_key(doctor_id: &String) -> (Symbol, String) {
    (DOCTOR, doctor_id.clone())
}

pub fn log_key(sequence: u64) -> (Symbol, u64) {
    (LOG, sequence)
}

/// Reads a persistent value, keeping "absent" (`Ok(None)`) apart from a value that
/// exists but does not decode as `V` (`Err(CorruptData)`).
pub fn read<K, V>(env: &Env, key: &K) -> Result<Option<V>, ContractError>
where
    K: IntoVal<Env, Val>,
    V: TryFromVal<Env, Val>,
{
    let raw: Option<Val> = env.storage().persistent().get(key);
    match raw {
        None => Ok(None),
        Some(val) => V::try_from_val(env, &val)
            .map(Some)
            .map_err(|_| ContractError::CorruptData),
    }
}

/// Writes a persistent value and extends its time-to-live so that records
/// outlive the grants and audits that reference them.
pub fn write<K, V>(env: &Env, key: &K, value: &V)
where
    K: IntoVal<Env, Val>,
    V: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn has<K>(env: &Env, key: &K) -> bool
where
    K: IntoVal<Env, Val>,
{
    env.storage().persistent().has(key)
}

/// Loads a secondary index. A missing index is an empty one.
pub fn read_index<K, T>(env: &Env, key: &K) -> Result<Vec<T>, ContractError>
where
    K: IntoVal<Env, Val>,
    T: IntoVal<Env, Val> + TryFromVal<Env, Val>,
{
    Ok(read(env, key)?.unwrap_or_else(|| Vec::new(env)))
}

/// Appends one entry to a secondary index. Indexes are only ever written in the
/// same invocation as the record they point at.
pub fn push_index<K, T>(env: &Env, key: &K, item: T) -> Result<(), ContractError>
where
    K: IntoVal<Env, Val>,
    T: IntoVal<Env, Val> + TryFromVal<Env, Val>,
{
    let mut entries: Vec<T> = read_index(env, key)?;
    entries.push_back(item);
    write(env, key, &entries);
    Ok(())
}

/// Allocates the next value of an instance counter. The first value is 1.
pub fn next_sequence(env: &Env, counter: &Symbol) -> Result<u64, ContractError> {
    let current: u64 = env.storage().instance().get(counter).unwrap_or(0);
    let next = current
        .checked_add(1)
        .ok_or(ContractError::StorageError)?;
    env.storage().instance().set(counter, &next);
    Ok(next)
}

pub fn current_sequence(env: &Env, counter: &Symbol) -> u64 {
    env.storage().instance().get(counter).unwrap_or(0)
}

/// Extends the time-to-live for instance storage (config, counters, chain head).
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
