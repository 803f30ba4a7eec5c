#![allow(dead_code)]

use medical_access::{AccessKey, MedicalAccessContract, MedicalAccessContractClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, Env, String};

pub const START: u64 = 1_700_000_000;
pub const HOSPITAL: &str = "HospitalOrg";
pub const REGULATOR: &str = "RegulatorOrg";

pub struct TestContext {
    pub env: Env,
    pub client: MedicalAccessContractClient<'static>,
    pub admin: Address,
    /// Member of the hospital organization.
    pub clinic: Address,
    /// Member of the verifying organization.
    pub regulator: Address,
}

/// Creates a mocked Soroban environment, deploys and initializes the contract,
/// and assigns one hospital member and one regulator member.
pub fn setup_test_env() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let contract_id = env.register(MedicalAccessContract, ());
    let client = MedicalAccessContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &text(&env, "AdminOrg"), &text(&env, REGULATOR));

    let clinic = Address::generate(&env);
    client.assign_org(&admin, &clinic, &text(&env, HOSPITAL));
    let regulator = Address::generate(&env);
    client.assign_org(&admin, &regulator, &text(&env, REGULATOR));

    TestContext {
        env,
        client,
        admin,
        clinic,
        regulator,
    }
}

pub fn text(env: &Env, value: &str) -> String {
    String::from_str(env, value)
}

/// Registers a patient with placeholder demographics.
pub fn create_patient(ctx: &TestContext, patient_id: &str) {
    let env = &ctx.env;
    ctx.client.register_patient(
        &ctx.clinic,
        &text(env, patient_id),
        &text(env, "Test Patient"),
        &text(env, "1985-01-01"),
        &text(env, "555-0100"),
        &text(env, "123456789012"),
        &0,
    );
}

/// Registers a doctor and, when asked, has the regulator verify them.
pub fn create_doctor(ctx: &TestContext, doctor_id: &str, verified: bool) {
    let env = &ctx.env;
    ctx.client.register_doctor(
        &ctx.clinic,
        &text(env, doctor_id),
        &text(env, "Dr. Test"),
        &text(env, "LIC-1"),
        &text(env, "General Practice"),
        &text(env, "Test Hospital"),
    );
    if verified {
        ctx.client.verify_doctor(&ctx.regulator, &text(env, doctor_id));
    }
}

pub fn grant(ctx: &TestContext, patient_id: &str, doctor_id: &str, hours: u32) -> AccessKey {
    let env = &ctx.env;
    ctx.client.grant_access(
        &ctx.clinic,
        &text(env, patient_id),
        &text(env, doctor_id),
        &hours,
        &text(env, "treatment"),
    )
}

pub fn advance(ctx: &TestContext, seconds: u64) {
    let now = ctx.env.ledger().timestamp();
    ctx.env.ledger().set_timestamp(now + seconds);
}
