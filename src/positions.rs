//! Position lifecycle
//!
//! Opening escrows the committed amount through the transfer port and
//! records the oracle price as the entry; closing is terminal, settles the
//! position at the current oracle price, routes the platform fee to the
//! treasury and folds the result into the owner's running stats.
//!
//! State is mutated only after every collaborator call has succeeded, so a
//! failed transfer or price lookup leaves the ledger exactly as it was.

use chrono::Utc;
use tracing::info;

use crate::auth;
use crate::error::LedgerError;
use crate::ports::{PriceOracle, TokenTransferPort};
use crate::state::LedgerState;
use crate::types::{AccountId, Position, PositionId, StrategyId, BPS_DENOMINATOR};

pub(crate) fn open_position(
    state: &mut LedgerState,
    transfers: &dyn TokenTransferPort,
    oracle: &dyn PriceOracle,
    strategy_id: StrategyId,
    amount: u64,
    owner: &AccountId,
) -> Result<PositionId, LedgerError> {
    auth::require_not_paused(state)?;
    let strategy = state.strategy(strategy_id)?;
    auth::require_active(strategy)?;
    if amount == 0 {
        return Err(LedgerError::InvalidParameter(
            "position amount must be positive".to_string(),
        ));
    }

    let entry_price = oracle.current_price(&strategy.config.asset)?;
    if entry_price == 0 {
        return Err(LedgerError::InvalidParameter(format!(
            "oracle returned zero price for {}",
            strategy.config.asset
        )));
    }

    let escrow = state.escrow.clone();
    transfers.transfer(owner, &escrow, amount)?;

    let id = state.allocate_position_id();
    let position = Position {
        id,
        strategy_id,
        owner: owner.clone(),
        amount,
        entry_price,
        is_open: true,
        opened_at: Utc::now(),
        closed_at: None,
        realized_pnl: None,
    };
    state.insert_position(position);

    info!(
        "Position opened: {} on {} amount={} entry_price={}",
        id, strategy_id, amount, entry_price
    );
    Ok(id)
}

pub(crate) fn close_position(
    state: &mut LedgerState,
    transfers: &dyn TokenTransferPort,
    oracle: &dyn PriceOracle,
    position_id: PositionId,
    caller: &AccountId,
) -> Result<i64, LedgerError> {
    auth::require_not_paused(state)?;
    let position = state.position(position_id)?;
    auth::require_owner(caller, position)?;
    if !position.is_open {
        return Err(LedgerError::AlreadyClosed);
    }

    let strategy = state.strategy(position.strategy_id)?;
    let exit_price = oracle.current_price(&strategy.config.asset)?;
    let amount = position.amount;
    let entry_price = position.entry_price;

    let pnl = settlement_pnl(amount, entry_price, exit_price)?;
    let fee = platform_fee(amount, state.platform_fee_bps);
    let payout = settlement_payout(amount, pnl, fee)?;

    let escrow = state.escrow.clone();
    let treasury = state.treasury.clone();
    let owner = position.owner.clone();
    if payout > 0 {
        transfers.transfer(&escrow, &owner, payout)?;
    }
    if fee > 0 {
        if let Err(err) = transfers.transfer(&escrow, &treasury, fee) {
            // Unwind the payout so a failed fee leg leaves every balance
            // exactly as it was before the call
            if payout > 0 {
                transfers.transfer(&owner, &escrow, payout)?;
            }
            return Err(err.into());
        }
    }

    let now = Utc::now();
    let position = state.position_mut(position_id)?;
    position.is_open = false;
    position.closed_at = Some(now);
    position.realized_pnl = Some(pnl);

    let stats = state.user_stats_mut(&owner);
    stats.total_volume = stats
        .total_volume
        .checked_add(amount)
        .ok_or(LedgerError::MathOverflow)?;
    stats.total_profit = stats
        .total_profit
        .checked_add(pnl)
        .ok_or(LedgerError::MathOverflow)?;
    state.total_volume = state
        .total_volume
        .checked_add(amount)
        .ok_or(LedgerError::MathOverflow)?;

    info!(
        "Position closed: {} exit_price={} pnl={} fee={} payout={}",
        position_id, exit_price, pnl, fee, payout
    );
    Ok(pnl)
}

/// Proportional return on the committed amount:
/// `amount * (exit - entry) / entry`, 6-decimal fixed point throughout.
fn settlement_pnl(amount: u64, entry_price: u64, exit_price: u64) -> Result<i64, LedgerError> {
    let price_diff = exit_price as i128 - entry_price as i128;
    let pnl = (amount as i128)
        .checked_mul(price_diff)
        .ok_or(LedgerError::MathOverflow)?
        / entry_price as i128;
    i64::try_from(pnl).map_err(|_| LedgerError::MathOverflow)
}

fn platform_fee(amount: u64, fee_bps: u16) -> u64 {
    // amount * fee_bps fits u128 comfortably
    ((amount as u128 * fee_bps as u128) / BPS_DENOMINATOR as u128) as u64
}

/// Committed amount plus PnL minus fee, floored at zero; the escrow absorbs
/// losses beyond the commitment.
fn settlement_payout(amount: u64, pnl: i64, fee: u64) -> Result<u64, LedgerError> {
    let payout = amount as i128 + pnl as i128 - fee as i128;
    if payout <= 0 {
        Ok(0)
    } else {
        u64::try_from(payout).map_err(|_| LedgerError::MathOverflow)
    }
}
