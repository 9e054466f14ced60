//! Ledger error taxonomy
//!
//! Every failure is synchronous and leaves `LedgerState` and collaborator
//! balances untouched; callers resubmit a corrected operation, nothing is
//! retried internally.

use thiserror::Error;

use crate::ports::{OracleError, TransferError};
use crate::types::{AccountId, PositionId, StrategyId};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Unauthorized: caller is not the record's authority")]
    Unauthorized,

    #[error("Strategy is not active")]
    StrategyInactive,

    #[error("Position is already closed")]
    AlreadyClosed,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Strategy not found: {0}")]
    StrategyNotFound(StrategyId),

    #[error("Position not found: {0}")]
    PositionNotFound(PositionId),

    #[error("No stats recorded for user: {0}")]
    UserNotFound(AccountId),

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("Ledger is paused")]
    ContractPaused,

    #[error("Math overflow")]
    MathOverflow,

    #[error("No price available for asset: {0}")]
    PriceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TransferError> for LedgerError {
    fn from(err: TransferError) -> Self {
        match err {
            TransferError::InsufficientFunds {
                required,
                available,
            } => LedgerError::InsufficientFunds {
                required,
                available,
            },
        }
    }
}

impl From<OracleError> for LedgerError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::UnknownAsset(asset) => LedgerError::PriceUnavailable(asset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_error_conversion() {
        let err: LedgerError = TransferError::InsufficientFunds {
            required: 100,
            available: 40,
        }
        .into();
        assert!(matches!(
            err,
            LedgerError::InsufficientFunds {
                required: 100,
                available: 40
            }
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = LedgerError::StrategyNotFound(StrategyId(7));
        assert_eq!(
            err.to_string(),
            "Strategy not found: STR-0000000000000007"
        );
    }
}
