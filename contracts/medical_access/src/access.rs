
use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

use crate::audit::{AuditAction, AuditTrail};
use crate::context::TxContext;
use crate::errors::raise;
use crate::text::{format_rfc3339, TextBuf};
use crate::{events, registry, storage, validation, ContractError};

pub const SECONDS_PER_HOUR: u64 = 3600;

/// Key of an access grant. Derived only from the transaction (its timestamp and
/// the contract's grant counter), so every node executing the same transaction
/// derives the same key. `nonce` keeps two grants for the same pair in the same
/// ledger second apart.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessKey {
    pub patient_id: String,
    pub doctor_id: String,
    pub granted_at: u64,
    pub nonce: u64,
}

/// A time-bound grant of a doctor's access to a patient's records.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRecord {
    pub access_key: AccessKey,
    pub patient_id: String,
    pub doctor_id: String,
    pub granted_at: u64,
    /// Always `granted_at + duration_hours * 3600`.
    pub expiry_time: u64,
    pub duration_hours: u32,
    pub purpose: String,
    pub revoked: bool,
    /// Zero until revoked.
    pub revoked_at: u64,
    pub granted_by_org: String,
}

/// Details of a grant that is currently usable.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidAccess {
    pub patient_id: String,
    pub doctor_id: String,
    pub seconds_remaining: u64,
    pub expires_at: u64,
    /// `expires_at` as RFC 3339 UTC.
    pub expiry_time: String,
}

/// Outcome of a validity check. Revocation is reported even when the grant
/// has also expired.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AccessValidity {
    NotFound,
    /// Carries the revocation timestamp.
    Revoked(u64),
    /// Carries the expiry timestamp.
    Expired(u64),
    Valid(ValidAccess),
}

fn record_key(access_key: &AccessKey) -> (Symbol, AccessKey) {
    (storage::ACCESS, access_key.clone())
}

fn grants_key(patient_id: &String) -> (Symbol, String) {
    (storage::PATIENT_GRANTS, patient_id.clone())
}

fn load(env: &Env, access_key: &AccessKey) -> Result<Option<AccessRecord>, ContractError> {
    storage::read(env, &record_key(access_key))
}

/// `granted_at + duration_hours * 3600`, or `None` on overflow.
pub fn expiry_for(granted_at: u64, duration_hours: u32) -> Option<u64> {
    u64::from(duration_hours)
        .checked_mul(SECONDS_PER_HOUR)
        .and_then(|seconds| granted_at.checked_add(seconds))
}

/// Issues a grant for a verified doctor to access a registered patient's records.
pub fn grant_access(
    env: &Env,
    caller: Address,
    patient_id: String,
    doctor_id: String,
    duration_hours: u32,
    purpose: String,
) -> Result<AccessKey, ContractError> {
    let op = symbol_short!("grant");
    validation::validate_duration_hours(duration_hours)
        .and_then(|_| validation::validate_purpose(&purpose))
        .map_err(|e| raise(env, e, op.clone()))?;

    let ctx = TxContext::begin(env, caller, op.clone())?;

    registry::get_patient(env, &patient_id)?;
    let doctor = registry::get_doctor(env, &doctor_id)?;
    if !doctor.verified {
        return Err(raise(env, ContractError::DoctorNotVerified, op));
    }

    let expiry_time = expiry_for(ctx.timestamp, duration_hours)
        .ok_or_else(|| raise(env, ContractError::InvalidInput, op.clone()))?;
    let nonce = storage::next_sequence(env, &storage::GRANT_SEQ)
        .map_err(|e| raise(env, e, op.clone()))?;

    let access_key = AccessKey {
        patient_id: patient_id.clone(),
        doctor_id: doctor_id.clone(),
        granted_at: ctx.timestamp,
        nonce,
    };

    let record = AccessRecord {
        access_key: access_key.clone(),
        patient_id: patient_id.clone(),
        doctor_id: doctor_id.clone(),
        granted_at: ctx.timestamp,
        expiry_time,
        duration_hours,
        purpose: purpose.clone(),
        revoked: false,
        revoked_at: 0,
        granted_by_org: ctx.org.clone(),
    };
    storage::write(env, &record_key(&access_key), &record);
    storage::push_index(env, &grants_key(&patient_id), access_key.clone())?;

    let mut details = TextBuf::new();
    details.push_bytes(b"Access granted for ");
    details.push_number(u64::from(duration_hours), 1);
    details.push_bytes(b" hours: ");
    details.push_string(&purpose);
    AuditTrail::append(
        &ctx,
        &patient_id,
        &doctor_id,
        AuditAction::GrantAccess,
        details.to_string(env),
    )?;

    events::publish_access_granted(env, access_key.clone(), expiry_time, duration_hours);

    Ok(access_key)
}

/// Revokes a grant. A grant is revoked at most once.
pub fn revoke_access(env: &Env, caller: Address, access_key: AccessKey) -> Result<(), ContractError> {
    let op = symbol_short!("revoke");
    let ctx = TxContext::begin(env, caller, op.clone())?;

    let mut record = load(env, &access_key)
        .map_err(|e| raise(env, e, op.clone()))?
        .ok_or_else(|| raise(env, ContractError::AccessNotFound, op.clone()))?;

    if record.revoked {
        return Err(raise(env, ContractError::AlreadyRevoked, op));
    }

    record.revoked = true;
    record.revoked_at = ctx.timestamp;
    storage::write(env, &record_key(&access_key), &record);

    let mut details = TextBuf::new();
    details.push_bytes(b"Access manually revoked by ");
    details.push_string(&ctx.org);
    AuditTrail::append(
        &ctx,
        &record.patient_id,
        &record.doctor_id,
        AuditAction::RevokeAccess,
        details.to_string(env),
    )?;

    events::publish_access_revoked(env, access_key, ctx.timestamp);

    Ok(())
}

pub fn get_access_record(env: &Env, access_key: &AccessKey) -> Result<AccessRecord, ContractError> {
    let op = symbol_short!("get_acc");
    load(env, access_key)
        .map_err(|e| raise(env, e, op.clone()))?
        .ok_or_else(|| raise(env, ContractError::AccessNotFound, op))
}

/// Evaluates a grant at `now`: revocation first, then expiry.
/// A grant is valid up to and including its expiry second.
pub fn evaluate(env: &Env, record: &AccessRecord, now: u64) -> AccessValidity {
    if record.revoked {
        return AccessValidity::Revoked(record.revoked_at);
    }
    if now > record.expiry_time {
        return AccessValidity::Expired(record.expiry_time);
    }
    AccessValidity::Valid(ValidAccess {
        patient_id: record.patient_id.clone(),
        doctor_id: record.doctor_id.clone(),
        seconds_remaining: record.expiry_time - now,
        expires_at: record.expiry_time,
        expiry_time: format_rfc3339(env, record.expiry_time),
    })
}

pub fn check_access_validity(
    env: &Env,
    access_key: &AccessKey,
) -> Result<AccessValidity, ContractError> {
    let record = match load(env, access_key)
        .map_err(|e| raise(env, e, symbol_short!("check")))?
    {
        Some(record) => record,
        None => return Ok(AccessValidity::NotFound),
    };
    Ok(evaluate(env, &record, env.ledger().timestamp()))
}

/// Grants of `patient_id` that are neither revoked nor expired, in grant order.
pub fn get_active_accesses_for_patient(
    env: &Env,
    patient_id: &String,
) -> Result<Vec<AccessRecord>, ContractError> {
    let op = symbol_short!("active");
    let now = env.ledger().timestamp();
    let keys: Vec<AccessKey> = storage::read_index(env, &grants_key(patient_id))
        .map_err(|e| raise(env, e, op.clone()))?;

    let mut active = Vec::new(env);
    for key in keys.iter() {
        let record = load(env, &key)
            .map_err(|e| raise(env, e, op.clone()))?
            .ok_or_else(|| raise(env, ContractError::CorruptData, op.clone()))?;
        if !record.revoked && now <= record.expiry_time {
            active.push_back(record);
        }
    }
    Ok(active)
}
