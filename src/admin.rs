//! Platform fee and pause control
//!
//! Owner-only. These operations are exempt from the pause gate so the owner
//! can always adjust the fee and, critically, unpause a paused ledger.

use tracing::{info, warn};

use crate::auth;
use crate::error::LedgerError;
use crate::state::LedgerState;
use crate::types::{AccountId, MAX_PLATFORM_FEE_BPS};

pub(crate) fn set_platform_fee(
    state: &mut LedgerState,
    bps: u16,
    caller: &AccountId,
) -> Result<(), LedgerError> {
    auth::require_protocol_owner(caller, state)?;
    if bps > MAX_PLATFORM_FEE_BPS {
        return Err(LedgerError::InvalidParameter(format!(
            "platform fee {} bps exceeds maximum {}",
            bps, MAX_PLATFORM_FEE_BPS
        )));
    }
    state.platform_fee_bps = bps;
    info!("Platform fee set to {} bps", bps);
    Ok(())
}

pub(crate) fn pause(state: &mut LedgerState, caller: &AccountId) -> Result<(), LedgerError> {
    auth::require_protocol_owner(caller, state)?;
    state.paused = true;
    warn!("Ledger paused");
    Ok(())
}

pub(crate) fn unpause(state: &mut LedgerState, caller: &AccountId) -> Result<(), LedgerError> {
    auth::require_protocol_owner(caller, state)?;
    state.paused = false;
    info!("Ledger unpaused");
    Ok(())
}
