#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use medical_access::{AccessKey, MedicalAccessContract, MedicalAccessContractClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, Env, String};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    RegisterPatient { id: u8, national_id_len: u8 },
    RegisterDoctor { id: u8 },
    VerifyDoctor { id: u8, as_regulator: bool },
    Grant { patient: u8, doctor: u8, hours: u32, purpose_len: u16 },
    Revoke { slot: u8 },
    Check { slot: u8 },
    Advance { seconds: u32 },
}

fn id(env: &Env, prefix: &str, n: u8) -> String {
    String::from_str(env, &format!("{}{}", prefix, n % 8))
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_700_000_000);

    let contract_id = env.register(MedicalAccessContract, ());
    let client = MedicalAccessContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(
        &admin,
        &String::from_str(&env, "AdminOrg"),
        &String::from_str(&env, "RegulatorOrg"),
    );
    let clinic = Address::generate(&env);
    client.assign_org(&admin, &clinic, &String::from_str(&env, "HospitalOrg"));
    let regulator = Address::generate(&env);
    client.assign_org(&admin, &regulator, &String::from_str(&env, "RegulatorOrg"));

    let mut keys: Vec<AccessKey> = Vec::new();

    for action in actions {
        match action {
            FuzzAction::RegisterPatient { id: n, national_id_len } => {
                let national_id = "9".repeat(national_id_len as usize % 20);
                let _ = client.try_register_patient(
                    &clinic,
                    &id(&env, "P", n),
                    &String::from_str(&env, "Fuzz Patient"),
                    &String::from_str(&env, ""),
                    &String::from_str(&env, ""),
                    &String::from_str(&env, &national_id),
                    &u32::from(n),
                );
            }
            FuzzAction::RegisterDoctor { id: n } => {
                let _ = client.try_register_doctor(
                    &clinic,
                    &id(&env, "D", n),
                    &String::from_str(&env, "Dr. Fuzz"),
                    &String::from_str(&env, "LIC-1"),
                    &String::from_str(&env, ""),
                    &String::from_str(&env, ""),
                );
            }
            FuzzAction::VerifyDoctor { id: n, as_regulator } => {
                let caller = if as_regulator { &regulator } else { &clinic };
                let _ = client.try_verify_doctor(caller, &id(&env, "D", n));
            }
            FuzzAction::Grant {
                patient,
                doctor,
                hours,
                purpose_len,
            } => {
                let purpose = "p".repeat(purpose_len as usize % 300);
                if let Ok(Ok(key)) = client.try_grant_access(
                    &clinic,
                    &id(&env, "P", patient),
                    &id(&env, "D", doctor),
                    &hours,
                    &String::from_str(&env, &purpose),
                ) {
                    keys.push(key);
                }
            }
            FuzzAction::Revoke { slot } => {
                if let Some(key) = keys.get(slot as usize % keys.len().max(1)) {
                    let _ = client.try_revoke_access(&clinic, key);
                }
            }
            FuzzAction::Check { slot } => {
                if let Some(key) = keys.get(slot as usize % keys.len().max(1)) {
                    let _ = client.check_access_validity(key);
                }
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(u64::from(seconds)));
            }
        }
    }

    // Whatever happened, the trail must still link up.
    let count = client.get_audit_count();
    assert!(client.verify_audit_chain(&1, &count));
});
