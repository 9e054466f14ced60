//! Authorization guards
//!
//! Every mutating operation funnels its signer checks through these
//! functions; no operation does its own identity comparison.

use crate::error::LedgerError;
use crate::state::LedgerState;
use crate::types::{AccountId, Position, Strategy};

/// Caller must be the strategy's recorded authority.
pub fn require_authority(caller: &AccountId, strategy: &Strategy) -> Result<(), LedgerError> {
    if caller != &strategy.authority {
        return Err(LedgerError::Unauthorized);
    }
    Ok(())
}

/// Caller must be the identity that funded the position.
pub fn require_owner(caller: &AccountId, position: &Position) -> Result<(), LedgerError> {
    if caller != &position.owner {
        return Err(LedgerError::Unauthorized);
    }
    Ok(())
}

/// Caller must be the protocol owner.
pub fn require_protocol_owner(
    caller: &AccountId,
    state: &LedgerState,
) -> Result<(), LedgerError> {
    if caller != &state.owner {
        return Err(LedgerError::Unauthorized);
    }
    Ok(())
}

/// Strategy must be active to trade against or fund.
pub fn require_active(strategy: &Strategy) -> Result<(), LedgerError> {
    if !strategy.is_active {
        return Err(LedgerError::StrategyInactive);
    }
    Ok(())
}

/// Mutations are rejected while the ledger is paused.
pub fn require_not_paused(state: &LedgerState) -> Result<(), LedgerError> {
    if state.paused {
        return Err(LedgerError::ContractPaused);
    }
    Ok(())
}
