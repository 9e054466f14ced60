//! Ledger state
//!
//! The single explicit store of all strategies, positions, per-user stats and
//! platform scalars. Initialized once at deployment and mutated only through
//! the operation modules; records are created once and never deleted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::LedgerError;
use crate::types::{AccountId, Position, PositionId, Strategy, StrategyId, UserStats};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerState {
    /// Protocol owner (admin); distinct from any strategy authority
    pub owner: AccountId,
    /// Holding account for funds committed to open positions
    pub escrow: AccountId,
    /// Recipient of platform fees
    pub treasury: AccountId,
    /// Fee rate in basis points (e.g. 10 = 0.1%)
    pub platform_fee_bps: u16,
    /// While set, every mutating operation is rejected
    pub paused: bool,
    /// Aggregate volume across all closes and trades
    pub total_volume: u64,
    strategies: HashMap<StrategyId, Strategy>,
    positions: HashMap<PositionId, Position>,
    user_stats: HashMap<AccountId, UserStats>,
    next_strategy_id: u64,
    next_position_id: u64,
}

impl LedgerState {
    pub fn new(owner: AccountId, escrow: AccountId, treasury: AccountId) -> Self {
        Self {
            owner,
            escrow,
            treasury,
            platform_fee_bps: 0,
            paused: false,
            total_volume: 0,
            strategies: HashMap::new(),
            positions: HashMap::new(),
            user_stats: HashMap::new(),
            next_strategy_id: 1,
            next_position_id: 1,
        }
    }

    pub(crate) fn allocate_strategy_id(&mut self) -> StrategyId {
        let id = StrategyId(self.next_strategy_id);
        self.next_strategy_id += 1;
        id
    }

    pub(crate) fn allocate_position_id(&mut self) -> PositionId {
        let id = PositionId(self.next_position_id);
        self.next_position_id += 1;
        id
    }

    pub fn strategy(&self, id: StrategyId) -> Result<&Strategy, LedgerError> {
        self.strategies
            .get(&id)
            .ok_or(LedgerError::StrategyNotFound(id))
    }

    pub(crate) fn strategy_mut(&mut self, id: StrategyId) -> Result<&mut Strategy, LedgerError> {
        self.strategies
            .get_mut(&id)
            .ok_or(LedgerError::StrategyNotFound(id))
    }

    pub(crate) fn insert_strategy(&mut self, strategy: Strategy) {
        self.strategies.insert(strategy.id, strategy);
    }

    pub fn position(&self, id: PositionId) -> Result<&Position, LedgerError> {
        self.positions
            .get(&id)
            .ok_or(LedgerError::PositionNotFound(id))
    }

    pub(crate) fn position_mut(&mut self, id: PositionId) -> Result<&mut Position, LedgerError> {
        self.positions
            .get_mut(&id)
            .ok_or(LedgerError::PositionNotFound(id))
    }

    pub(crate) fn insert_position(&mut self, position: Position) {
        self.positions.insert(position.id, position);
    }

    pub fn user_stats(&self, account: &AccountId) -> Result<&UserStats, LedgerError> {
        self.user_stats
            .get(account)
            .ok_or_else(|| LedgerError::UserNotFound(account.clone()))
    }

    pub(crate) fn user_stats_mut(&mut self, account: &AccountId) -> &mut UserStats {
        self.user_stats.entry(account.clone()).or_default()
    }

    /// All positions funded by `owner`, open or closed.
    pub fn positions_by_owner(&self, owner: &AccountId) -> Vec<&Position> {
        let mut positions: Vec<&Position> = self
            .positions
            .values()
            .filter(|p| &p.owner == owner)
            .collect();
        positions.sort_by_key(|p| p.id.0);
        positions
    }

    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }
}
