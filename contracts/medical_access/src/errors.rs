use soroban_sdk::{log, Env, Symbol};

/// Error categories for classifying contract failures.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Malformed or missing input
    Validation = 1,
    /// The caller's organization lacks the role required for the action
    Authorization = 2,
    /// A referenced identifier is absent
    NotFound = 3,
    /// Uniqueness violations and one-way state transitions
    StateConflict = 4,
    /// Stored values or the ledger itself misbehaved
    Storage = 5,
}

/// Error severity levels indicating the impact and urgency of errors
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    /// Caller mistakes, nothing to investigate
    Low = 1,
    /// Rejected attempts worth surfacing to operators
    Medium = 2,
    /// Ledger state no longer matches what the contract wrote
    Critical = 3,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    PatientAlreadyExists = 5,
    DoctorAlreadyExists = 6,
    PatientNotFound = 7,
    DoctorNotFound = 8,
    AccessNotFound = 9,
    MemberNotFound = 10,
    AuditEntryNotFound = 11,
    DoctorNotVerified = 12,
    AlreadyRevoked = 13,
    CorruptData = 14,
    StorageError = 15,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::InvalidInput => ErrorCategory::Validation,
            ContractError::Unauthorized | ContractError::DoctorNotVerified => {
                ErrorCategory::Authorization
            }
            ContractError::NotInitialized
            | ContractError::PatientNotFound
            | ContractError::DoctorNotFound
            | ContractError::AccessNotFound
            | ContractError::MemberNotFound
            | ContractError::AuditEntryNotFound => ErrorCategory::NotFound,
            ContractError::AlreadyInitialized
            | ContractError::PatientAlreadyExists
            | ContractError::DoctorAlreadyExists
            | ContractError::AlreadyRevoked => ErrorCategory::StateConflict,
            ContractError::CorruptData | ContractError::StorageError => ErrorCategory::Storage,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::InvalidInput
            | ContractError::PatientNotFound
            | ContractError::DoctorNotFound
            | ContractError::AccessNotFound
            | ContractError::MemberNotFound
            | ContractError::AuditEntryNotFound
            | ContractError::PatientAlreadyExists
            | ContractError::DoctorAlreadyExists
            | ContractError::AlreadyRevoked => ErrorSeverity::Low,
            ContractError::Unauthorized | ContractError::DoctorNotVerified => {
                ErrorSeverity::Medium
            }
            ContractError::CorruptData | ContractError::StorageError => ErrorSeverity::Critical,
        }
    }

    /// None of these errors are transient from the contract's point of view.
    /// Ledger-level retries belong to the submitting client.
    pub fn retryable(&self) -> bool {
        false
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Caller's organization is not authorized for this operation",
            ContractError::InvalidInput => "Invalid input parameters provided",
            ContractError::PatientAlreadyExists => "Patient is already registered",
            ContractError::DoctorAlreadyExists => "Doctor is already registered",
            ContractError::PatientNotFound => "Patient not found",
            ContractError::DoctorNotFound => "Doctor not found",
            ContractError::AccessNotFound => "Access grant not found",
            ContractError::MemberNotFound => "Address has no organization",
            ContractError::AuditEntryNotFound => "Audit entry not found",
            ContractError::DoctorNotVerified => "Doctor has not been verified",
            ContractError::AlreadyRevoked => "Access grant is already revoked",
            ContractError::CorruptData => "Stored value does not match the expected record shape",
            ContractError::StorageError => "Ledger storage operation failed",
        }
    }
}

/// Reports a failure of `operation` to the host's debug log and hands the error back,
/// so call sites read `return Err(raise(env, err, op))`.
pub fn raise(env: &Env, error: ContractError, operation: Symbol) -> ContractError {
    log!(
        env,
        "operation {} failed: error {} category {} severity {}",
        operation,
        error as u32,
        error.category() as u32,
        error.severity() as u32
    );
    error
}
