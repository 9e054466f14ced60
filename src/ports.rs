//! Collaborator ports
//!
//! Fund movement and price discovery live outside the ledger. The core only
//! calls these traits and propagates their failures; per-deployment adapters
//! (on-chain token program, exchange custody API) implement them. The
//! in-memory implementations below back tests and demo deployments.

use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

use crate::types::AccountId;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },
}

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("No price feed for asset: {0}")]
    UnknownAsset(String),
}

/// Moves funds between accounts; enforces its own sufficient-balance check.
pub trait TokenTransferPort: Send + Sync {
    fn transfer(&self, from: &AccountId, to: &AccountId, amount: u64)
        -> Result<(), TransferError>;
}

/// Returns the current price for an asset, 6 decimal precision.
pub trait PriceOracle: Send + Sync {
    fn current_price(&self, asset: &str) -> Result<u64, OracleError>;
}

/// In-memory balances keyed by account.
#[derive(Debug, Default)]
pub struct InMemoryTransferPort {
    balances: RwLock<HashMap<AccountId, u64>>,
}

impl InMemoryTransferPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account out of thin air (test/demo funding).
    pub fn credit(&self, account: &AccountId, amount: u64) {
        let mut balances = self.balances.write().expect("balance lock poisoned");
        *balances.entry(account.clone()).or_insert(0) += amount;
    }

    pub fn balance_of(&self, account: &AccountId) -> u64 {
        let balances = self.balances.read().expect("balance lock poisoned");
        balances.get(account).copied().unwrap_or(0)
    }
}

impl TokenTransferPort for InMemoryTransferPort {
    fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), TransferError> {
        let mut balances = self.balances.write().expect("balance lock poisoned");
        let available = balances.get(from).copied().unwrap_or(0);
        if available < amount {
            return Err(TransferError::InsufficientFunds {
                required: amount,
                available,
            });
        }
        balances.insert(from.clone(), available - amount);
        *balances.entry(to.clone()).or_insert(0) += amount;
        Ok(())
    }
}

/// Fixed price table, settable at runtime.
#[derive(Debug, Default)]
pub struct StaticPriceOracle {
    prices: RwLock<HashMap<String, u64>>,
}

impl StaticPriceOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_price(&self, asset: &str, price: u64) {
        let mut prices = self.prices.write().expect("price lock poisoned");
        prices.insert(asset.to_uppercase(), price);
    }
}

impl PriceOracle for StaticPriceOracle {
    fn current_price(&self, asset: &str) -> Result<u64, OracleError> {
        let prices = self.prices.read().expect("price lock poisoned");
        prices
            .get(&asset.to_uppercase())
            .copied()
            .ok_or_else(|| OracleError::UnknownAsset(asset.to_string()))
    }
}
