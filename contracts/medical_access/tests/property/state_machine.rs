//! Property-based state machine tests for the MedicalAccess contract.
//!
//! Random operation sequences run against the contract and a small in-memory
//! model side by side. After every sequence:
//! - each operation succeeded exactly when the model said it should
//! - the active grants of every patient match the model, in grant order
//! - the audit trail grew by one entry per successful mutation and still verifies

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::Ledger;

use crate::common::{setup_test_env, text, TestContext};
use medical_access::{AccessKey, ContractError};

const PATIENTS: [&str; 3] = ["P1", "P2", "P3"];
const DOCTORS: [&str; 2] = ["D1", "D2"];

#[derive(Arbitrary, Clone, Debug)]
enum Op {
    RegisterPatient(#[proptest(strategy = "0usize..3")] usize),
    RegisterDoctor(#[proptest(strategy = "0usize..2")] usize),
    VerifyDoctor(#[proptest(strategy = "0usize..2")] usize),
    Grant {
        #[proptest(strategy = "0usize..3")]
        patient: usize,
        #[proptest(strategy = "0usize..2")]
        doctor: usize,
        #[proptest(strategy = "1u32..=6")]
        hours: u32,
    },
    Revoke(#[proptest(strategy = "0usize..8")] usize),
    Advance(#[proptest(strategy = "1u64..=14_400")] u64),
}

struct ModelGrant {
    key: AccessKey,
    patient: usize,
    expiry: u64,
    revoked: bool,
}

#[derive(Default)]
struct Model {
    patients: [bool; 3],
    doctors: [bool; 2],
    verified: [bool; 2],
    grants: Vec<ModelGrant>,
    mutations: u64,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn apply(ctx: &TestContext, model: &mut Model, op: &Op) -> Result<(), TestCaseError> {
    let env = &ctx.env;
    match *op {
        Op::RegisterPatient(p) => {
            let result = ctx.client.try_register_patient(
                &ctx.clinic,
                &text(env, PATIENTS[p]),
                &text(env, "Model Patient"),
                &text(env, ""),
                &text(env, ""),
                &text(env, "123456789012"),
                &0,
            );
            if model.patients[p] {
                prop_assert_eq!(result, Err(Ok(ContractError::PatientAlreadyExists)));
            } else {
                prop_assert!(result.is_ok());
                model.patients[p] = true;
                model.mutations += 1;
            }
        }
        Op::RegisterDoctor(d) => {
            let result = ctx.client.try_register_doctor(
                &ctx.clinic,
                &text(env, DOCTORS[d]),
                &text(env, "Dr. Model"),
                &text(env, "LIC-1"),
                &text(env, ""),
                &text(env, ""),
            );
            if model.doctors[d] {
                prop_assert_eq!(result, Err(Ok(ContractError::DoctorAlreadyExists)));
            } else {
                prop_assert!(result.is_ok());
                model.doctors[d] = true;
                model.mutations += 1;
            }
        }
        Op::VerifyDoctor(d) => {
            let result = ctx
                .client
                .try_verify_doctor(&ctx.regulator, &text(env, DOCTORS[d]));
            if model.doctors[d] {
                prop_assert!(result.is_ok());
                model.verified[d] = true;
                model.mutations += 1;
            } else {
                prop_assert_eq!(result, Err(Ok(ContractError::DoctorNotFound)));
            }
        }
        Op::Grant {
            patient,
            doctor,
            hours,
        } => {
            let result = ctx.client.try_grant_access(
                &ctx.clinic,
                &text(env, PATIENTS[patient]),
                &text(env, DOCTORS[doctor]),
                &hours,
                &text(env, "model"),
            );
            let expected = if !model.patients[patient] {
                Some(ContractError::PatientNotFound)
            } else if !model.doctors[doctor] {
                Some(ContractError::DoctorNotFound)
            } else if !model.verified[doctor] {
                Some(ContractError::DoctorNotVerified)
            } else {
                None
            };
            match expected {
                Some(err) => {
                    prop_assert_eq!(result, Err(Ok(err)));
                }
                None => {
                    let key = result.unwrap().unwrap();
                    let now = env.ledger().timestamp();
                    model.grants.push(ModelGrant {
                        key,
                        patient,
                        expiry: now + u64::from(hours) * 3600,
                        revoked: false,
                    });
                    model.mutations += 1;
                }
            }
        }
        Op::Revoke(slot) => {
            if model.grants.is_empty() {
                return Ok(());
            }
            let index = slot % model.grants.len();
            let key = model.grants[index].key.clone();
            let result = ctx.client.try_revoke_access(&ctx.clinic, &key);
            if model.grants[index].revoked {
                prop_assert_eq!(result, Err(Ok(ContractError::AlreadyRevoked)));
            } else {
                prop_assert!(result.is_ok());
                model.grants[index].revoked = true;
                model.mutations += 1;
            }
        }
        Op::Advance(seconds) => {
            let now = env.ledger().timestamp();
            env.ledger().set_timestamp(now + seconds);
        }
    }
    Ok(())
}

fn check_active(ctx: &TestContext, model: &Model) -> Result<(), TestCaseError> {
    let now = ctx.env.ledger().timestamp();
    for (p, patient_id) in PATIENTS.iter().enumerate() {
        let expected: Vec<AccessKey> = model
            .grants
            .iter()
            .filter(|g| g.patient == p && !g.revoked && now <= g.expiry)
            .map(|g| g.key.clone())
            .collect();
        let actual: Vec<AccessKey> = ctx
            .client
            .get_active_accesses_for_patient(&text(&ctx.env, patient_id))
            .iter()
            .map(|record| record.access_key)
            .collect();
        prop_assert_eq!(actual, expected);
    }
    Ok(())
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Any sequence of operations keeps the contract in step with the model.
    #[test]
    fn prop_contract_tracks_model(ops in prop::collection::vec(any::<Op>(), 1..24)) {
        let ctx = setup_test_env();
        let baseline = ctx.client.get_audit_count();
        let mut model = Model::default();

        for op in &ops {
            apply(&ctx, &mut model, op)?;
        }

        check_active(&ctx, &model)?;

        let count = ctx.client.get_audit_count();
        prop_assert_eq!(count, baseline + model.mutations);
        prop_assert!(ctx.client.verify_audit_chain(&1, &count));
    }
}
