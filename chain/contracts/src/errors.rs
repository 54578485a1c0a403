//! Program-specific error types
//!
//! Every failure surfaces synchronously to the caller of the failing
//! instruction. None of them leave partial state behind.

use crowdfunding_types::ids::Pubkey;
use crowdfunding_types::numeric::{Lamports, UnixTimestamp};
use thiserror::Error;

/// Coarse classification of [`ProgramError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Caller identity does not match the stored field
    Authorization,
    /// Well-formed request that the campaign's current phase forbids
    StateGate,
    /// A balance cannot cover the requested amount
    Resource,
    /// Addressing or uniqueness violation
    Existence,
    /// Malformed input
    Validation,
    /// Arithmetic would overflow
    Arithmetic,
    /// Engine could not be reached
    Unavailable,
}

/// Errors returned by the four instructions and the read accessors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgramError {
    #[error("Record already exists at {address}")]
    AlreadyExists { address: Pubkey },

    #[error("Campaign not found: {address}")]
    NotFound { address: Pubkey },

    #[error("No contribution from {contributor} to campaign {campaign}")]
    NoContribution { campaign: Pubkey, contributor: Pubkey },

    #[error("Unauthorized: caller is not the campaign owner")]
    InvalidAdmin,

    #[error("Campaign ended at {deadline}")]
    CampaignEnded { deadline: UnixTimestamp },

    #[error("Campaign still active until {deadline}")]
    CampaignStillActive { deadline: UnixTimestamp },

    #[error("Target not reached: raised {raised}, target {target}")]
    TargetNotReached { raised: Lamports, target: Lamports },

    #[error("Target was reached: raised {raised}, target {target}")]
    TargetWasReached { raised: Lamports, target: Lamports },

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Lamports,
        available: Lamports,
    },

    #[error("Insufficient custody: requested {requested}, available {available}")]
    InsufficientCustody {
        requested: Lamports,
        available: Lamports,
    },

    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Caller {caller} is a program record address")]
    RecordAddressCaller { caller: Pubkey },

    #[error("Campaign name is empty")]
    EmptyName,

    #[error("Campaign name too long: {len} bytes, max {max}")]
    NameTooLong { len: usize, max: usize },

    #[error("Description too long: {len} bytes, max {max}")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("Duration must be positive and at most {max_secs}s")]
    InvalidDuration { max_secs: u64 },

    #[error("Target amount must be positive")]
    InvalidTarget,

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,

    #[error("Program unavailable: {reason}")]
    Unavailable { reason: String },
}

impl ProgramError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProgramError::InvalidAdmin => ErrorCategory::Authorization,
            ProgramError::CampaignEnded { .. }
            | ProgramError::CampaignStillActive { .. }
            | ProgramError::TargetNotReached { .. }
            | ProgramError::TargetWasReached { .. } => ErrorCategory::StateGate,
            ProgramError::InsufficientFunds { .. } | ProgramError::InsufficientCustody { .. } => {
                ErrorCategory::Resource
            }
            ProgramError::AlreadyExists { .. }
            | ProgramError::NotFound { .. }
            | ProgramError::NoContribution { .. } => ErrorCategory::Existence,
            ProgramError::InvalidAmount
            | ProgramError::RecordAddressCaller { .. }
            | ProgramError::EmptyName
            | ProgramError::NameTooLong { .. }
            | ProgramError::DescriptionTooLong { .. }
            | ProgramError::InvalidDuration { .. }
            | ProgramError::InvalidTarget => ErrorCategory::Validation,
            ProgramError::Overflow => ErrorCategory::Arithmetic,
            ProgramError::Unavailable { .. } => ErrorCategory::Unavailable,
        }
    }

    /// Phase errors clear up by waiting or by choosing the other instruction.
    pub fn is_retryable_later(&self) -> bool {
        self.category() == ErrorCategory::StateGate
    }
}

/// Errors reported by the external ledger when applying transfers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient funds in {account}: required {required}, available {available}")]
    InsufficientFunds {
        account: Pubkey,
        required: Lamports,
        available: Lamports,
    },

    #[error("Arithmetic overflow crediting {account}")]
    Overflow { account: Pubkey },
}

/// Configuration loading errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },

    #[error("Malformed configuration: {0}")]
    Malformed(String),
}

/// Snapshot encoding and verification errors
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Integrity check failed: expected {expected}, got {actual}")]
    IntegrityFailure { expected: String, actual: String },

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_error_display() {
        let err = ProgramError::TargetNotReached {
            raised: 1_000,
            target: 2_000,
        };
        assert_eq!(err.to_string(), "Target not reached: raised 1000, target 2000");
    }

    #[test]
    fn test_insufficient_custody_carries_shortfall() {
        let err = ProgramError::InsufficientCustody {
            requested: 500,
            available: 120,
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("120"));
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            ProgramError::InvalidAdmin.category(),
            ErrorCategory::Authorization
        );
        assert_eq!(
            ProgramError::CampaignEnded { deadline: 5 }.category(),
            ErrorCategory::StateGate
        );
        assert_eq!(
            ProgramError::InsufficientFunds {
                required: 2,
                available: 1
            }
            .category(),
            ErrorCategory::Resource
        );
        assert_eq!(
            ProgramError::NotFound {
                address: Pubkey::default()
            }
            .category(),
            ErrorCategory::Existence
        );
        assert_eq!(
            ProgramError::RecordAddressCaller {
                caller: Pubkey::default()
            }
            .category(),
            ErrorCategory::Validation
        );
        assert_eq!(ProgramError::Overflow.category(), ErrorCategory::Arithmetic);
    }

    #[test]
    fn test_only_state_gates_are_retryable() {
        assert!(ProgramError::CampaignStillActive { deadline: 9 }.is_retryable_later());
        assert!(!ProgramError::InvalidAdmin.is_retryable_later());
        assert!(!ProgramError::InvalidAmount.is_retryable_later());
    }

    #[test]
    fn test_ledger_error_display() {
        let err = LedgerError::InsufficientFunds {
            account: Pubkey::default(),
            required: 10,
            available: 3,
        };
        assert!(err.to_string().contains("required 10"));
    }
}
