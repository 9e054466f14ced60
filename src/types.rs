//! Core types for the strategy ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LedgerError;

/// Basis-point denominator (10_000 bps = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Prices and amounts use 6 decimal precision (USDC convention)
pub const PRICE_SCALE: u64 = 1_000_000;

/// Hard ceiling for the platform fee (10%)
pub const MAX_PLATFORM_FEE_BPS: u16 = 1_000;

/// Unique identifier for strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrategyId(pub u64);

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "STR-{:016X}", self.0)
    }
}

/// Unique identifier for positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionId(pub u64);

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POS-{:016X}", self.0)
    }
}

/// Identity of a signer (wallet, agent, protocol account)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    Buy,
    Sell,
}

/// Strategy parameters, all risk values in basis points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Asset symbol (e.g. "SOL")
    pub asset: String,
    /// Strategy type tag (e.g. "breakout")
    pub strategy_type: String,
    /// Candle timeframe (e.g. "1h")
    pub timeframe: String,
    pub stop_loss_bps: u16,
    pub take_profit_bps: u16,
    pub position_size_bps: u16,
    /// Free-form volume condition tag
    pub volume_condition: String,
    /// Free-form breakout condition tag
    pub breakout_condition: String,
}

impl StrategyConfig {
    /// Reject configs the ledger cannot act on.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.asset.is_empty() {
            return Err(LedgerError::InvalidParameter(
                "config requires an asset symbol".to_string(),
            ));
        }
        for (field, bps) in [
            ("stop_loss_bps", self.stop_loss_bps),
            ("take_profit_bps", self.take_profit_bps),
            ("position_size_bps", self.position_size_bps),
        ] {
            if u64::from(bps) > BPS_DENOMINATOR {
                return Err(LedgerError::InvalidParameter(format!(
                    "{} exceeds {} bps",
                    field, BPS_DENOMINATOR
                )));
            }
        }
        Ok(())
    }
}

/// A registered trading strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strategy {
    pub id: StrategyId,
    /// Creator identity; sole mutator of this record
    pub authority: AccountId,
    pub name: String,
    pub config: StrategyConfig,
    pub is_active: bool,
    pub total_trades: u64,
    pub total_pnl: i64,
    pub created_at: DateTime<Utc>,
}

/// A funded commitment against a strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    /// Foreign key only; never an owning back-reference
    pub strategy_id: StrategyId,
    /// Identity that funded the position
    pub owner: AccountId,
    /// Funds committed, 6 decimals
    pub amount: u64,
    /// Oracle price at open, 6 decimals
    pub entry_price: u64,
    pub is_open: bool,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    /// Set exactly once, at close
    pub realized_pnl: Option<i64>,
}

/// Per-user running totals across closed positions and executed trades
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_volume: u64,
    pub total_profit: i64,
}
