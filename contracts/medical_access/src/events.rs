use soroban_sdk::{symbol_short, Address, Env, String};

use crate::access::AccessKey;

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub admin_org: String,
    pub verifier_org: String,
    pub timestamp: u64,
}

/// Event published when an address is assigned to an organization.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrgAssignedEvent {
    pub member: Address,
    pub org: String,
    pub timestamp: u64,
}

/// Event published when a patient or doctor is registered, or a doctor verified.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdentityEvent {
    pub id: String,
    pub org: String,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessGrantedEvent {
    pub access_key: AccessKey,
    pub duration_hours: u32,
    pub expires_at: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRevokedEvent {
    pub access_key: AccessKey,
    pub revoked_at: u64,
}

#[allow(deprecated)]
pub fn publish_initialized(env: &Env, admin: Address, admin_org: String, verifier_org: String) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        admin_org,
        verifier_org,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[allow(deprecated)]
pub fn publish_org_assigned(env: &Env, member: Address, org: String) {
    let topics = (symbol_short!("ORG_SET"), member.clone());
    let data = OrgAssignedEvent {
        member,
        org,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[allow(deprecated)]
pub fn publish_patient_registered(env: &Env, patient_id: String, org: String) {
    let topics = (symbol_short!("PAT_REG"), patient_id.clone());
    let data = IdentityEvent {
        id: patient_id,
        org,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[allow(deprecated)]
pub fn publish_doctor_registered(env: &Env, doctor_id: String, org: String) {
    let topics = (symbol_short!("DOC_REG"), doctor_id.clone());
    let data = IdentityEvent {
        id: doctor_id,
        org,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[allow(deprecated)]
pub fn publish_doctor_verified(env: &Env, doctor_id: String, org: String) {
    let topics = (symbol_short!("DOC_VER"), doctor_id.clone());
    let data = IdentityEvent {
        id: doctor_id,
        org,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[allow(deprecated)]
pub fn publish_access_granted(
    env: &Env,
    access_key: AccessKey,
    expires_at: u64,
    duration_hours: u32,
) {
    let topics = (
        symbol_short!("ACC_GRT"),
        access_key.patient_id.clone(),
        access_key.doctor_id.clone(),
    );
    let data = AccessGrantedEvent {
        access_key,
        duration_hours,
        expires_at,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[allow(deprecated)]
pub fn publish_access_revoked(env: &Env, access_key: AccessKey, revoked_at: u64) {
    let topics = (
        symbol_short!("ACC_REV"),
        access_key.patient_id.clone(),
        access_key.doctor_id.clone(),
    );
    let data = AccessRevokedEvent {
        access_key,
        revoked_at,
    };
    env.events().publish(topics, data);
}
