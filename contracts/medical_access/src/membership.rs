use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::audit::{AuditAction, AuditTrail};
use crate::context::TxContext;
use crate::errors::raise;
use crate::text::TextBuf;
use crate::{config, events, storage, validation, ContractError};

/// Organizational identity of a caller address.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Membership {
    pub member: Address,
    pub org: String,
    pub assigned_at: u64,
}

fn member_key(member: &Address) -> (soroban_sdk::Symbol, Address) {
    (storage::MEMBER, member.clone())
}

pub fn get_membership(env: &Env, member: &Address) -> Result<Membership, ContractError> {
    storage::read(env, &member_key(member))?.ok_or(ContractError::MemberNotFound)
}

/// Resolves the organization an address acts for.
pub fn org_of(env: &Env, member: &Address) -> Result<String, ContractError> {
    get_membership(env, member).map(|membership| membership.org)
}

pub(crate) fn set_org(env: &Env, member: &Address, org: &String, now: u64) {
    let membership = Membership {
        member: member.clone(),
        org: org.clone(),
        assigned_at: now,
    };
    storage::write(env, &member_key(member), &membership);
}

/// Creates or replaces the organization of `member`. Only the configured admin
/// may do this.
pub fn assign_org(
    env: &Env,
    admin: Address,
    member: Address,
    org: String,
) -> Result<(), ContractError> {
    let op = symbol_short!("assign");
    validation::validate_org(&org).map_err(|e| raise(env, e, op.clone()))?;

    let ctx = TxContext::begin(env, admin, op.clone())?;
    let config = config::get_config(env)?;
    if ctx.caller != config.admin {
        return Err(raise(env, ContractError::Unauthorized, op));
    }

    set_org(env, &member, &org, ctx.timestamp);

    let mut details = TextBuf::new();
    details.push_bytes(b"Member assigned to ");
    details.push_string(&org);
    let none = String::from_str(env, "");
    AuditTrail::append(
        &ctx,
        &none,
        &none,
        AuditAction::AssignOrg,
        details.to_string(env),
    )?;

    events::publish_org_assigned(env, member, org);

    Ok(())
}
