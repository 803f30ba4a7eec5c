#![no_std]

pub mod access;
pub mod audit;
pub mod config;
pub mod context;
pub mod errors;
pub mod events;
pub mod membership;
pub mod registry;
pub mod storage;
pub mod text;
pub mod validation;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Vec};

pub use access::{AccessKey, AccessRecord, AccessValidity, ValidAccess};
pub use audit::{AuditAction, AuditLog, AuditTrail, LogId};
pub use config::Config;
pub use errors::{ContractError, ErrorCategory, ErrorSeverity};
pub use membership::Membership;
pub use registry::{Doctor, Patient};

use context::TxContext;
use errors::raise;

#[contract]
pub struct MedicalAccessContract;

#[contractimpl]
impl MedicalAccessContract {
    /// Initialize the contract. `admin` is placed in `admin_org` and becomes
    /// the only address that can assign organizations; members of
    /// `verifier_org` are the only callers that can verify doctors.
    pub fn initialize(
        env: Env,
        admin: Address,
        admin_org: String,
        verifier_org: String,
    ) -> Result<(), ContractError> {
        let op = symbol_short!("init");
        if config::is_initialized(&env) {
            return Err(raise(&env, ContractError::AlreadyInitialized, op));
        }
        validation::validate_org(&admin_org)
            .and_then(|_| validation::validate_org(&verifier_org))
            .map_err(|e| raise(&env, e, op.clone()))?;

        admin.require_auth();

        config::store(
            &env,
            &Config {
                admin: admin.clone(),
                verifier_org: verifier_org.clone(),
            },
        );
        membership::set_org(&env, &admin, &admin_org, env.ledger().timestamp());

        let ctx = TxContext::open(&env, admin.clone(), admin_org.clone())
            .map_err(|e| raise(&env, e, op))?;
        let none = String::from_str(&env, "");
        AuditTrail::append(
            &ctx,
            &none,
            &none,
            AuditAction::Initialize,
            String::from_str(&env, "Contract initialized"),
        )?;

        events::publish_initialized(&env, admin, admin_org, verifier_org);

        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        config::is_initialized(&env)
    }

    pub fn get_config(env: Env) -> Result<Config, ContractError> {
        config::get_config(&env)
    }

    /// Assign `member` to `org`, replacing any previous assignment. Admin only.
    pub fn assign_org(
        env: Env,
        admin: Address,
        member: Address,
        org: String,
    ) -> Result<(), ContractError> {
        membership::assign_org(&env, admin, member, org)
    }

    pub fn get_org(env: Env, member: Address) -> Result<String, ContractError> {
        membership::org_of(&env, &member)
    }

    // ── Identity registry ─────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    pub fn register_patient(
        env: Env,
        caller: Address,
        patient_id: String,
        name: String,
        date_of_birth: String,
        phone: String,
        national_id: String,
        biometric_ref: u32,
    ) -> Result<(), ContractError> {
        registry::register_patient(
            &env,
            caller,
            patient_id,
            name,
            date_of_birth,
            phone,
            national_id,
            biometric_ref,
        )
    }

    pub fn get_patient(env: Env, patient_id: String) -> Result<Patient, ContractError> {
        registry::get_patient(&env, &patient_id)
    }

    pub fn register_doctor(
        env: Env,
        caller: Address,
        doctor_id: String,
        name: String,
        license_number: String,
        specialization: String,
        hospital_name: String,
    ) -> Result<(), ContractError> {
        registry::register_doctor(
            &env,
            caller,
            doctor_id,
            name,
            license_number,
            specialization,
            hospital_name,
        )
    }

    pub fn get_doctor(env: Env, doctor_id: String) -> Result<Doctor, ContractError> {
        registry::get_doctor(&env, &doctor_id)
    }

    /// Mark a doctor as verified. Restricted to the verifying organization.
    pub fn verify_doctor(env: Env, caller: Address, doctor_id: String) -> Result<(), ContractError> {
        registry::verify_doctor(&env, caller, doctor_id)
    }

    // ── Access grants ─────────────────────────────────────────

    /// Grant a verified doctor time-bound access to a patient's records.
    /// Returns the key under which the grant is stored.
    pub fn grant_access(
        env: Env,
        caller: Address,
        patient_id: String,
        doctor_id: String,
        duration_hours: u32,
        purpose: String,
    ) -> Result<AccessKey, ContractError> {
        access::grant_access(&env, caller, patient_id, doctor_id, duration_hours, purpose)
    }

    pub fn revoke_access(
        env: Env,
        caller: Address,
        access_key: AccessKey,
    ) -> Result<(), ContractError> {
        access::revoke_access(&env, caller, access_key)
    }

    pub fn get_access_record(
        env: Env,
        access_key: AccessKey,
    ) -> Result<AccessRecord, ContractError> {
        access::get_access_record(&env, &access_key)
    }

    /// Check a grant against the current ledger time.
    pub fn check_access_validity(
        env: Env,
        access_key: AccessKey,
    ) -> Result<AccessValidity, ContractError> {
        access::check_access_validity(&env, &access_key)
    }

    pub fn get_active_accesses_for_patient(
        env: Env,
        patient_id: String,
    ) -> Result<Vec<AccessRecord>, ContractError> {
        access::get_active_accesses_for_patient(&env, &patient_id)
    }

    // ── Audit trail ───────────────────────────────────────────

    /// All audit entries that concern `patient_id`, oldest first.
    pub fn get_audit_trail(env: Env, patient_id: String) -> Result<Vec<AuditLog>, ContractError> {
        AuditTrail::for_patient(&env, &patient_id)
    }

    pub fn get_doctor_audit_trail(
        env: Env,
        doctor_id: String,
    ) -> Result<Vec<AuditLog>, ContractError> {
        AuditTrail::for_doctor(&env, &doctor_id)
    }

    pub fn get_audit_entry(env: Env, sequence: u64) -> Result<AuditLog, ContractError> {
        AuditTrail::get_entry(&env, sequence)
    }

    pub fn get_audit_count(env: Env) -> u64 {
        AuditTrail::count(&env)
    }

    /// Check the hash chain over entries `from_sequence..=to_sequence`.
    pub fn verify_audit_chain(env: Env, from_sequence: u64, to_sequence: u64) -> bool {
        AuditTrail::verify_chain(&env, from_sequence, to_sequence)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }
}




#[cfg(test)]
mod test_events;
