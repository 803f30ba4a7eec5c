use soroban_sdk::{contracttype, log, symbol_short, xdr::ToXdr, BytesN, Env, String, Vec};

use crate::context::TxContext;
use crate::errors::raise;
use crate::{storage, ContractError};

/// Action tag recorded with every audit entry.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuditAction {
    Initialize,
    AssignOrg,
    RegisterPatient,
    RegisterDoctor,
    VerifyDoctor,
    GrantAccess,
    RevokeAccess,
}

impl AuditAction {
    pub fn tag(&self) -> &'static str {
        match self {
            AuditAction::Initialize => "INITIALIZE",
            AuditAction::AssignOrg => "ASSIGN_ORG",
            AuditAction::RegisterPatient => "REGISTER_PATIENT",
            AuditAction::RegisterDoctor => "REGISTER_DOCTOR",
            AuditAction::VerifyDoctor => "VERIFY_DOCTOR",
            AuditAction::GrantAccess => "GRANT_ACCESS",
            AuditAction::RevokeAccess => "REVOKE_ACCESS",
        }
    }
}

/// Identifier of an audit entry. `sequence` alone is unique; the other fields
/// make the identifier self-describing.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogId {
    pub timestamp: u64,
    pub patient_id: String,
    pub doctor_id: String,
    pub sequence: u64,
}

/// One append-only audit trail entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuditLog {
    pub log_id: LogId,
    /// Empty when the action does not concern a patient.
    pub patient_id: String,
    /// Empty when the action does not concern a doctor.
    pub doctor_id: String,
    pub action: AuditAction,
    pub details: String,
    pub timestamp: u64,
    /// Organization of the caller that produced the entry.
    pub org: String,
    pub tx_id: u64,
    pub ledger_sequence: u32,
    /// SHA-256 of the previous entry's XDR encoding (zero for the first entry).
    pub prev_hash: BytesN<32>,
}

fn zero_hash(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[0u8; 32])
}

/// Compute the SHA-256 hash of an entry's XDR encoding.
fn hash_entry(env: &Env, entry: &AuditLog) -> BytesN<32> {
    env.crypto().sha256(&entry.clone().to_xdr(env)).into()
}

fn chain_head(env: &Env) -> BytesN<32> {
    env.storage()
        .instance()
        .get(&storage::LOG_HEAD)
        .unwrap_or_else(|| zero_hash(env))
}

fn load(env: &Env, sequence: u64) -> Result<Option<AuditLog>, ContractError> {
    storage::read(env, &storage::log_key(sequence))
}

/// Append-only, hash-chained audit trail.
pub struct AuditTrail;

impl AuditTrail {
    /// Appends one entry on behalf of the operation running in `ctx`.
    ///
    /// Any error must be propagated by the caller: the entry and the mutation it
    /// records commit together or not at all.
    pub fn append(
        ctx: &TxContext,
        patient_id: &String,
        doctor_id: &String,
        action: AuditAction,
        details: String,
    ) -> Result<LogId, ContractError> {
        let env = &ctx.env;
        let sequence = storage::next_sequence(env, &storage::LOG_SEQ)
            .map_err(|e| raise(env, e, symbol_short!("audit")))?;

        let log_id = LogId {
            timestamp: ctx.timestamp,
            patient_id: patient_id.clone(),
            doctor_id: doctor_id.clone(),
            sequence,
        };

        let entry = AuditLog {
            log_id: log_id.clone(),
            patient_id: patient_id.clone(),
            doctor_id: doctor_id.clone(),
            action,
            details,
            timestamp: ctx.timestamp,
            org: ctx.org.clone(),
            tx_id: ctx.tx_id,
            ledger_sequence: env.ledger().sequence(),
            prev_hash: chain_head(env),
        };

        storage::write(env, &storage::log_key(sequence), &entry);
        env.storage()
            .instance()
            .set(&storage::LOG_HEAD, &hash_entry(env, &entry));

        if !patient_id.is_empty() {
            storage::push_index(env, &(storage::PATIENT_LOGS, patient_id.clone()), sequence)?;
        }
        if !doctor_id.is_empty() {
            storage::push_index(env, &(storage::DOCTOR_LOGS, doctor_id.clone()), sequence)?;
        }

        log!(env, "audit {} {} tx {}", sequence, action, ctx.tx_id);

        Ok(log_id)
    }

    /// Fetches a single entry by its sequence number.
    pub fn get_entry(env: &Env, sequence: u64) -> Result<AuditLog, ContractError> {
        load(env, sequence)?.ok_or(ContractError::AuditEntryNotFound)
    }

    /// Number of entries appended so far.
    pub fn count(env: &Env) -> u64 {
        storage::current_sequence(env, &storage::LOG_SEQ)
    }

    /// Every entry recorded against `patient_id`, whatever the action, in append order.
    pub fn for_patient(env: &Env, patient_id: &String) -> Result<Vec<AuditLog>, ContractError> {
        Self::collect(env, &(storage::PATIENT_LOGS, patient_id.clone()), patient_id)
    }

    /// Every entry recorded against `doctor_id`, in append order.
    pub fn for_doctor(env: &Env, doctor_id: &String) -> Result<Vec<AuditLog>, ContractError> {
        Self::collect(env, &(storage::DOCTOR_LOGS, doctor_id.clone()), doctor_id)
    }

    fn collect(
        env: &Env,
        index_key: &(soroban_sdk::Symbol, String),
        id: &String,
    ) -> Result<Vec<AuditLog>, ContractError> {
        let op = symbol_short!("trail");
        if id.is_empty() {
            return Err(raise(env, ContractError::InvalidInput, op));
        }

        let sequences: Vec<u64> = storage::read_index(env, index_key)?;
        let mut entries = Vec::new(env);
        for sequence in sequences.iter() {
            let entry = load(env, sequence)?
                .ok_or_else(|| raise(env, ContractError::CorruptData, op.clone()))?;
            entries.push_back(entry);
        }
        Ok(entries)
    }

    /// Verifies that the entries `from_sequence..=to_sequence` are intact.
    /// Returns `true` if every entry exists, carries its own sequence number and
    /// links to the hash of its predecessor, the first entry of the trail
    /// linking to the zero hash. A range ending at the newest entry must also
    /// hash to the stored chain head, since no successor vouches for it.
    pub fn verify_chain(env: &Env, from_sequence: u64, to_sequence: u64) -> bool {
        if from_sequence == 0 || from_sequence > to_sequence {
            return false;
        }

        let mut expected_prev = if from_sequence == 1 {
            zero_hash(env)
        } else {
            match load(env, from_sequence - 1) {
                Ok(Some(prev)) => hash_entry(env, &prev),
                _ => return false,
            }
        };

        for sequence in from_sequence..=to_sequence {
            let entry = match load(env, sequence) {
                Ok(Some(entry)) => entry,
                _ => return false,
            };
            if entry.log_id.sequence != sequence || entry.prev_hash != expected_prev {
                return false;
            }
            expected_prev = hash_entry(env, &entry);
        }

        if to_sequence == Self::count(env) {
            return expected_prev == chain_head(env);
        }

        true
    }
}
