//! Strategy Ledger
//!
//! A strategy registry and position ledger for funded trading strategies.
//! Callers register a strategy, toggle it active, and open or close funded
//! positions against it; every mutation is gated by signer authorization and
//! every trade lands in running counters. Fund movement and price lookup are
//! delegated to injected collaborators so the same ledger runs against any
//! settlement backend.

mod admin;
pub mod auth;
pub mod error;
mod executor;
pub mod ledger;
pub mod ports;
mod positions;
mod registry;
pub mod state;
pub mod types;

pub use error::LedgerError;
pub use ledger::StrategyLedger;
pub use ports::{InMemoryTransferPort, PriceOracle, StaticPriceOracle, TokenTransferPort};
pub use state::LedgerState;
pub use types::*;
