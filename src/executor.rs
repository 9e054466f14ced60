//! Trade execution against an active strategy
//!
//! Moves funds between the two supplied settlement accounts and bumps the
//! strategy's running counters. The PnL counter follows the raw-amount
//! bookkeeping convention inherited from the reference deployment: buys
//! debit the full trade amount, sells credit it, independent of price. A
//! mark-to-market figure would need `(exit - entry) * amount`; the position
//! ledger computes that at close, this counter deliberately does not.

use tracing::info;

use crate::auth;
use crate::error::LedgerError;
use crate::ports::TokenTransferPort;
use crate::state::LedgerState;
use crate::types::{AccountId, StrategyId, TradeType};

#[allow(clippy::too_many_arguments)]
pub(crate) fn execute_trade(
    state: &mut LedgerState,
    transfers: &dyn TokenTransferPort,
    strategy_id: StrategyId,
    trade_type: TradeType,
    amount: u64,
    price: u64,
    from: &AccountId,
    to: &AccountId,
    caller: &AccountId,
) -> Result<(), LedgerError> {
    auth::require_not_paused(state)?;
    let strategy = state.strategy(strategy_id)?;
    auth::require_authority(caller, strategy)?;
    auth::require_active(strategy)?;
    if amount == 0 {
        return Err(LedgerError::InvalidParameter(
            "trade amount must be positive".to_string(),
        ));
    }
    if price == 0 {
        return Err(LedgerError::InvalidParameter(
            "trade price must be positive".to_string(),
        ));
    }

    let trade_pnl = match trade_type {
        TradeType::Buy => -(i64::try_from(amount).map_err(|_| LedgerError::MathOverflow)?),
        TradeType::Sell => i64::try_from(amount).map_err(|_| LedgerError::MathOverflow)?,
    };

    // Stage every counter update before funds move so a failed transfer
    // leaves nothing half-applied.
    let new_total_trades = strategy
        .total_trades
        .checked_add(1)
        .ok_or(LedgerError::MathOverflow)?;
    let new_total_pnl = strategy
        .total_pnl
        .checked_add(trade_pnl)
        .ok_or(LedgerError::MathOverflow)?;
    let new_total_volume = state
        .total_volume
        .checked_add(amount)
        .ok_or(LedgerError::MathOverflow)?;
    let stats = state.user_stats(caller).map(Clone::clone).unwrap_or_default();
    let new_user_volume = stats
        .total_volume
        .checked_add(amount)
        .ok_or(LedgerError::MathOverflow)?;
    let new_user_profit = stats
        .total_profit
        .checked_add(trade_pnl)
        .ok_or(LedgerError::MathOverflow)?;

    transfers.transfer(from, to, amount)?;

    let strategy = state.strategy_mut(strategy_id)?;
    strategy.total_trades = new_total_trades;
    strategy.total_pnl = new_total_pnl;
    let user_stats = state.user_stats_mut(caller);
    user_stats.total_volume = new_user_volume;
    user_stats.total_profit = new_user_profit;
    state.total_volume = new_total_volume;

    info!(
        "Trade executed: {:?} {} at price {} on {}",
        trade_type, amount, price, strategy_id
    );
    Ok(())
}
