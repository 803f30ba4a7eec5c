use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::audit::{AuditAction, AuditTrail};
use crate::context::TxContext;
use crate::errors::raise;
use crate::text::TextBuf;
use crate::{config, events, storage, validation, ContractError};

/// A registered patient. Never updated once written.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Patient {
    pub patient_id: String,
    pub name: String,
    pub date_of_birth: String,
    pub phone: String,
    /// Exactly 12 bytes.
    pub national_id: String,
    /// Opaque handle of the patient's biometric template.
    pub biometric_ref: u32,
    pub registered_at: u64,
    pub registered_by_org: String,
}

/// A registered doctor. `verified` is the only field that ever changes, and
/// only from `false` to `true`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Doctor {
    pub doctor_id: String,
    pub name: String,
    pub license_number: String,
    pub specialization: String,
    pub hospital_name: String,
    pub verified: bool,
    pub registered_at: u64,
    pub registered_by_org: String,
}

#[allow(clippy::too_many_arguments)]
pub fn register_patient(
    env: &Env,
    caller: Address,
    patient_id: String,
    name: String,
    date_of_birth: String,
    phone: String,
    national_id: String,
    biometric_ref: u32,
) -> Result<(), ContractError> {
    let op = symbol_short!("reg_pat");
    validation::validate_id(&patient_id)
        .and_then(|_| validation::validate_name(&name))
        .and_then(|_| validation::validate_contact(&date_of_birth))
        .and_then(|_| validation::validate_contact(&phone))
        .and_then(|_| validation::validate_national_id(&national_id))
        .map_err(|e| raise(env, e, op.clone()))?;

    let ctx = TxContext::begin(env, caller, op.clone())?;

    let key = storage::patient_key(&patient_id);
    if storage::has(env, &key) {
        return Err(raise(env, ContractError::PatientAlreadyExists, op));
    }

    let patient = Patient {
        patient_id: patient_id.clone(),
        name,
        date_of_birth,
        phone,
        national_id,
        biometric_ref,
        registered_at: ctx.timestamp,
        registered_by_org: ctx.org.clone(),
    };
    storage::write(env, &key, &patient);

    let mut details = TextBuf::new();
    details.push_bytes(b"Patient registered by ");
    details.push_string(&ctx.org);
    AuditTrail::append(
        &ctx,
        &patient_id,
        &String::from_str(env, ""),
        AuditAction::RegisterPatient,
        details.to_string(env),
    )?;

    events::publish_patient_registered(env, patient_id, ctx.org.clone());

    Ok(())
}

pub fn get_patient(env: &Env, patient_id: &String) -> Result<Patient, ContractError> {
    let op = symbol_short!("get_pat");
    storage::read(env, &storage::patient_key(patient_id))
        .map_err(|e| raise(env, e, op.clone()))?
        .ok_or_else(|| raise(env, ContractError::PatientNotFound, op))
}

pub fn register_doctor(
    env: &Env,
    caller: Address,
    doctor_id: String,
    name: String,
    license_number: String,
    specialization: String,
    hospital_name: String,
) -> Result<(), ContractError> {
    let op = symbol_short!("reg_doc");
    validation::validate_id(&doctor_id)
        .and_then(|_| validation::validate_name(&name))
        .and_then(|_| validation::validate_license(&license_number))
        .and_then(|_| validation::validate_profile_text(&specialization))
        .and_then(|_| validation::validate_profile_text(&hospital_name))
        .map_err(|e| raise(env, e, op.clone()))?;

    let ctx = TxContext::begin(env, caller, op.clone())?;

    let key = storage::doctor_key(&doctor_id);
    if storage::has(env, &key) {
        return Err(raise(env, ContractError::DoctorAlreadyExists, op));
    }

    let doctor = Doctor {
        doctor_id: doctor_id.clone(),
        name,
        license_number,
        specialization,
        hospital_name,
        verified: false,
        registered_at: ctx.timestamp,
        registered_by_org: ctx.org.clone(),
    };
    storage::write(env, &key, &doctor);

    let mut details = TextBuf::new();
    details.push_bytes(b"Doctor registered by ");
    details.push_string(&ctx.org);
    AuditTrail::append(
        &ctx,
        &String::from_str(env, ""),
        &doctor_id,
        AuditAction::RegisterDoctor,
        details.to_string(env),
    )?;

    events::publish_doctor_registered(env, doctor_id, ctx.org.clone());

    Ok(())
}

pub fn get_doctor(env: &Env, doctor_id: &String) -> Result<Doctor, ContractError> {
    let op = symbol_short!("get_doc");
    storage::read(env, &storage::doctor_key(doctor_id))
        .map_err(|e| raise(env, e, op.clone()))?
        .ok_or_else(|| raise(env, ContractError::DoctorNotFound, op))
}

/// Marks a doctor as verified. Only members of the configured verifying
/// organization may call this. Verifying an already-verified doctor is
/// accepted and audited again.
pub fn verify_doctor(env: &Env, caller: Address, doctor_id: String) -> Result<(), ContractError> {
    let op = symbol_short!("ver_doc");
    let ctx = TxContext::begin(env, caller, op.clone())?;

    let config = config::get_config(env)?;
    if ctx.org != config.verifier_org {
        return Err(raise(env, ContractError::Unauthorized, op));
    }

    let mut doctor = get_doctor(env, &doctor_id)?;
    doctor.verified = true;
    storage::write(env, &storage::doctor_key(&doctor_id), &doctor);

    let mut details = TextBuf::new();
    details.push_bytes(b"Doctor verified by ");
    details.push_string(&ctx.org);
    AuditTrail::append(
        &ctx,
        &String::from_str(env, ""),
        &doctor_id,
        AuditAction::VerifyDoctor,
        details.to_string(env),
    )?;

    events::publish_doctor_verified(env, doctor_id, ctx.org.clone());

    Ok(())
}
