//! Ledger facade
//!
//! `StrategyLedger` owns the state behind a `RwLock` and the injected
//! collaborator ports, and exposes one method per public operation. Each
//! method runs as a single atomic unit: it either fully commits or returns
//! an error with the state untouched. Callers retry; the ledger never does.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::admin;
use crate::error::LedgerError;
use crate::executor;
use crate::ports::{PriceOracle, TokenTransferPort};
use crate::positions;
use crate::registry;
use crate::state::LedgerState;
use crate::types::{
    AccountId, Position, PositionId, Strategy, StrategyConfig, StrategyId, TradeType, UserStats,
};

pub struct StrategyLedger {
    state: RwLock<LedgerState>,
    transfers: Arc<dyn TokenTransferPort>,
    oracle: Arc<dyn PriceOracle>,
}

impl StrategyLedger {
    pub fn new(
        owner: AccountId,
        escrow: AccountId,
        treasury: AccountId,
        transfers: Arc<dyn TokenTransferPort>,
        oracle: Arc<dyn PriceOracle>,
    ) -> Self {
        Self {
            state: RwLock::new(LedgerState::new(owner, escrow, treasury)),
            transfers,
            oracle,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LedgerState>, LedgerError> {
        self.state
            .read()
            .map_err(|_| LedgerError::Internal("state lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, LedgerError> {
        self.state
            .write()
            .map_err(|_| LedgerError::Internal("state lock poisoned".to_string()))
    }

    // --- Strategy registry ---

    pub fn create_strategy(
        &self,
        name: &str,
        config: StrategyConfig,
        authority: &AccountId,
    ) -> Result<StrategyId, LedgerError> {
        let mut state = self.write()?;
        registry::create_strategy(&mut state, name, config, authority)
    }

    pub fn activate_strategy(
        &self,
        id: StrategyId,
        caller: &AccountId,
    ) -> Result<(), LedgerError> {
        let mut state = self.write()?;
        registry::activate_strategy(&mut state, id, caller)
    }

    pub fn deactivate_strategy(
        &self,
        id: StrategyId,
        caller: &AccountId,
    ) -> Result<(), LedgerError> {
        let mut state = self.write()?;
        registry::deactivate_strategy(&mut state, id, caller)
    }

    pub fn update_strategy_config(
        &self,
        id: StrategyId,
        new_config: StrategyConfig,
        caller: &AccountId,
    ) -> Result<(), LedgerError> {
        let mut state = self.write()?;
        registry::update_strategy_config(&mut state, id, new_config, caller)
    }

    // --- Position ledger ---

    pub fn open_position(
        &self,
        strategy_id: StrategyId,
        amount: u64,
        owner: &AccountId,
    ) -> Result<PositionId, LedgerError> {
        let mut state = self.write()?;
        positions::open_position(
            &mut state,
            self.transfers.as_ref(),
            self.oracle.as_ref(),
            strategy_id,
            amount,
            owner,
        )
    }

    /// Closes the position at the current oracle price and returns the
    /// realized PnL.
    pub fn close_position(
        &self,
        position_id: PositionId,
        caller: &AccountId,
    ) -> Result<i64, LedgerError> {
        let mut state = self.write()?;
        positions::close_position(
            &mut state,
            self.transfers.as_ref(),
            self.oracle.as_ref(),
            position_id,
            caller,
        )
    }

    // --- Trade execution ---

    #[allow(clippy::too_many_arguments)]
    pub fn execute_trade(
        &self,
        strategy_id: StrategyId,
        trade_type: TradeType,
        amount: u64,
        price: u64,
        from: &AccountId,
        to: &AccountId,
        caller: &AccountId,
    ) -> Result<(), LedgerError> {
        let mut state = self.write()?;
        executor::execute_trade(
            &mut state,
            self.transfers.as_ref(),
            strategy_id,
            trade_type,
            amount,
            price,
            from,
            to,
            caller,
        )
    }

    // --- Fee & pause control ---

    pub fn set_platform_fee(&self, bps: u16, caller: &AccountId) -> Result<(), LedgerError> {
        let mut state = self.write()?;
        admin::set_platform_fee(&mut state, bps, caller)
    }

    pub fn pause(&self, caller: &AccountId) -> Result<(), LedgerError> {
        let mut state = self.write()?;
        admin::pause(&mut state, caller)
    }

    pub fn unpause(&self, caller: &AccountId) -> Result<(), LedgerError> {
        let mut state = self.write()?;
        admin::unpause(&mut state, caller)
    }

    // --- Reads (available while paused) ---

    pub fn fetch_strategy(&self, id: StrategyId) -> Result<Strategy, LedgerError> {
        let state = self.read()?;
        state.strategy(id).map(Clone::clone)
    }

    pub fn fetch_position(&self, id: PositionId) -> Result<Position, LedgerError> {
        let state = self.read()?;
        state.position(id).map(Clone::clone)
    }

    pub fn fetch_user_stats(&self, account: &AccountId) -> Result<UserStats, LedgerError> {
        let state = self.read()?;
        state.user_stats(account).map(Clone::clone)
    }

    pub fn fetch_positions_by_owner(
        &self,
        owner: &AccountId,
    ) -> Result<Vec<Position>, LedgerError> {
        let state = self.read()?;
        Ok(state
            .positions_by_owner(owner)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn platform_fee_bps(&self) -> Result<u16, LedgerError> {
        Ok(self.read()?.platform_fee_bps)
    }

    pub fn is_paused(&self) -> Result<bool, LedgerError> {
        Ok(self.read()?.paused)
    }

    pub fn total_volume(&self) -> Result<u64, LedgerError> {
        Ok(self.read()?.total_volume)
    }
}
