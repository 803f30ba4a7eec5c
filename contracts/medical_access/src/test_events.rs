#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

use super::*;
use crate::test::{register_d1, register_p1, s, setup, Setup, START};
use soroban_sdk::testutils::{Address as _, Events as _, Ledger};
use soroban_sdk::{symbol_short, vec, IntoVal};

fn verified_pair() -> Setup {
    let t = setup();
    register_p1(&t);
    register_d1(&t);
    t.client.verify_doctor(&t.regulator, &s(&t.env, "D1"));
    t
}

fn identity_event(t: &Setup, id: &str, org: &str) -> events::IdentityEvent {
    events::IdentityEvent {
        id: s(&t.env, id),
        org: s(&t.env, org),
        timestamp: t.env.ledger().timestamp(),
    }
}

#[test]
fn test_initialize_event() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);
    let contract_id = env.register(MedicalAccessContract, ());
    let client = MedicalAccessContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);

    client.initialize(&admin, &s(&env, "AdminOrg"), &s(&env, "RegulatorOrg"));

    let payload = events::InitializedEvent {
        admin: admin.clone(),
        admin_org: s(&env, "AdminOrg"),
        verifier_org: s(&env, "RegulatorOrg"),
        timestamp: START,
    };
    assert_eq!(
        env.events().all(),
        vec![
            &env,
            (
                contract_id.clone(),
                (symbol_short!("INIT"),).into_val(&env),
                payload.into_val(&env),
            ),
        ]
    );
}

#[test]
fn test_assign_org_event() {
    let t = setup();
    let member = Address::generate(&t.env);

    t.client.assign_org(&t.admin, &member, &s(&t.env, "LabOrg"));

    let payload = events::OrgAssignedEvent {
        member: member.clone(),
        org: s(&t.env, "LabOrg"),
        timestamp: START,
    };
    assert_eq!(
        t.env.events().all(),
        vec![
            &t.env,
            (
                t.client.address.clone(),
                (symbol_short!("ORG_SET"), member).into_val(&t.env),
                payload.into_val(&t.env),
            ),
        ]
    );
}

#[test]
fn test_register_patient_event() {
    let t = setup();
    register_p1(&t);

    assert_eq!(
        t.env.events().all(),
        vec![
            &t.env,
            (
                t.client.address.clone(),
                (symbol_short!("PAT_REG"), s(&t.env, "P1")).into_val(&t.env),
                identity_event(&t, "P1", "HospitalOrg").into_val(&t.env),
            ),
        ]
    );
}

#[test]
fn test_register_and_verify_doctor_events() {
    let t = setup();
    register_d1(&t);

    assert_eq!(
        t.env.events().all(),
        vec![
            &t.env,
            (
                t.client.address.clone(),
                (symbol_short!("DOC_REG"), s(&t.env, "D1")).into_val(&t.env),
                identity_event(&t, "D1", "HospitalOrg").into_val(&t.env),
            ),
        ]
    );

    t.client.verify_doctor(&t.regulator, &s(&t.env, "D1"));

    assert_eq!(
        t.env.events().all(),
        vec![
            &t.env,
            (
                t.client.address.clone(),
                (symbol_short!("DOC_VER"), s(&t.env, "D1")).into_val(&t.env),
                identity_event(&t, "D1", "RegulatorOrg").into_val(&t.env),
            ),
        ]
    );
}

#[test]
fn test_grant_and_revoke_events() {
    let t = verified_pair();
    let key = t.client.grant_access(
        &t.clinic,
        &s(&t.env, "P1"),
        &s(&t.env, "D1"),
        &24,
        &s(&t.env, "checkup"),
    );

    let granted = events::AccessGrantedEvent {
        access_key: key.clone(),
        duration_hours: 24,
        expires_at: START + 24 * 3600,
        timestamp: START,
    };
    assert_eq!(
        t.env.events().all(),
        vec![
            &t.env,
            (
                t.client.address.clone(),
                (symbol_short!("ACC_GRT"), s(&t.env, "P1"), s(&t.env, "D1")).into_val(&t.env),
                granted.into_val(&t.env),
            ),
        ]
    );

    t.env.ledger().set_timestamp(START + 60);
    t.client.revoke_access(&t.clinic, &key);

    let revoked = events::AccessRevokedEvent {
        access_key: key.clone(),
        revoked_at: START + 60,
    };
    assert_eq!(
        t.env.events().all(),
        vec![
            &t.env,
            (
                t.client.address.clone(),
                (symbol_short!("ACC_REV"), s(&t.env, "P1"), s(&t.env, "D1")).into_val(&t.env),
                revoked.into_val(&t.env),
            ),
        ]
    );
}

#[test]
fn test_failed_operations_emit_nothing() {
    let t = setup();
    register_p1(&t);
    register_d1(&t);

    let result = t.client.try_grant_access(
        &t.clinic,
        &s(&t.env, "P1"),
        &s(&t.env, "D1"),
        &24,
        &s(&t.env, "checkup"),
    );
    assert_eq!(result, Err(Ok(ContractError::DoctorNotVerified)));
    assert!(t.env.events().all().events().is_empty());

    let result = t.client.try_verify_doctor(&t.clinic, &s(&t.env, "D1"));
    assert_eq!(result, Err(Ok(ContractError::Unauthorized)));
    assert!(t.env.events().all().events().is_empty());
}
