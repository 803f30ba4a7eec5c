use soroban_sdk::String;

use crate::ContractError;

pub const MAX_ID_LEN: u32 = 64;
pub const MAX_NAME_LEN: u32 = 128;
pub const NATIONAL_ID_LEN: u32 = 12;
pub const MAX_LICENSE_LEN: u32 = 64;
pub const MAX_CONTACT_LEN: u32 = 64;
pub const MAX_PROFILE_LEN: u32 = 128;
pub const MAX_ORG_LEN: u32 = 64;
pub const MAX_PURPOSE_LEN: u32 = 256;

pub const MIN_DURATION_HOURS: u32 = 1;
pub const MAX_DURATION_HOURS: u32 = 43_800; // 5 years

const SCRATCH_LEN: usize = MAX_PURPOSE_LEN as usize;

/// How strictly the bytes of a field are checked.
#[derive(Clone, Copy)]
enum Charset {
    /// Printable ASCII without spaces: identifiers and organization names.
    Token,
    /// Anything except ASCII control bytes: names and free text, UTF-8 included.
    Text,
}

fn check(value: &String, min: u32, max: u32, charset: Charset) -> Result<(), ContractError> {
    let len = value.len();
    if !(min..=max).contains(&len) {
        return Err(ContractError::InvalidInput);
    }
    if len == 0 {
        return Ok(());
    }

    let mut buf = [0u8; SCRATCH_LEN];
    value.copy_into_slice(&mut buf[..len as usize]);

    let valid = buf[..len as usize].iter().all(|&b| match charset {
        Charset::Token => (33..=126).contains(&b),
        Charset::Text => b >= 32 && b != 127,
    });

    if valid {
        Ok(())
    } else {
        Err(ContractError::InvalidInput)
    }
}

/// Patient and doctor identifiers: 1..=64 printable bytes, no whitespace.
pub fn validate_id(id: &String) -> Result<(), ContractError> {
    check(id, 1, MAX_ID_LEN, Charset::Token)
}

pub fn validate_name(name: &String) -> Result<(), ContractError> {
    check(name, 1, MAX_NAME_LEN, Charset::Text)
}

/// National identity numbers are exactly 12 bytes long. Their content is not
/// interpreted.
pub fn validate_national_id(national_id: &String) -> Result<(), ContractError> {
    if national_id.len() != NATIONAL_ID_LEN {
        return Err(ContractError::InvalidInput);
    }
    check(national_id, NATIONAL_ID_LEN, NATIONAL_ID_LEN, Charset::Text)
}

pub fn validate_license(license_number: &String) -> Result<(), ContractError> {
    check(license_number, 1, MAX_LICENSE_LEN, Charset::Text)
}

/// Date of birth and phone are optional and free-form.
pub fn validate_contact(value: &String) -> Result<(), ContractError> {
    check(value, 0, MAX_CONTACT_LEN, Charset::Text)
}

/// Specialization and hospital name are optional and free-form.
pub fn validate_profile_text(value: &String) -> Result<(), ContractError> {
    check(value, 0, MAX_PROFILE_LEN, Charset::Text)
}

pub fn validate_org(org: &String) -> Result<(), ContractError> {
    check(org, 1, MAX_ORG_LEN, Charset::Token)
}

pub fn validate_purpose(purpose: &String) -> Result<(), ContractError> {
    check(purpose, 0, MAX_PURPOSE_LEN, Charset::Text)
}

/// Validate a grant duration.
/// Zero-hour grants would be expired on arrival; the upper bound keeps expiry
/// arithmetic far from overflow.
pub fn validate_duration_hours(duration_hours: u32) -> Result<(), ContractError> {
    if !(MIN_DURATION_HOURS..=MAX_DURATION_HOURS).contains(&duration_hours) {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}
