//! Strategy registry operations
//!
//! Creation, activation toggling and reconfiguration of strategy records.
//! Anyone may register a strategy for themselves; every later mutation
//! requires the recorded authority.

use chrono::Utc;
use tracing::info;

use crate::auth;
use crate::error::LedgerError;
use crate::state::LedgerState;
use crate::types::{AccountId, Strategy, StrategyConfig, StrategyId};

pub(crate) fn create_strategy(
    state: &mut LedgerState,
    name: &str,
    config: StrategyConfig,
    authority: &AccountId,
) -> Result<StrategyId, LedgerError> {
    auth::require_not_paused(state)?;
    if name.is_empty() {
        return Err(LedgerError::InvalidParameter(
            "strategy name must not be empty".to_string(),
        ));
    }
    config.validate()?;

    let id = state.allocate_strategy_id();
    let strategy = Strategy {
        id,
        authority: authority.clone(),
        name: name.to_string(),
        config,
        is_active: false,
        total_trades: 0,
        total_pnl: 0,
        created_at: Utc::now(),
    };
    state.insert_strategy(strategy);

    info!("Strategy created: {} ({}) by {}", id, name, authority);
    Ok(id)
}

pub(crate) fn activate_strategy(
    state: &mut LedgerState,
    id: StrategyId,
    caller: &AccountId,
) -> Result<(), LedgerError> {
    auth::require_not_paused(state)?;
    let strategy = state.strategy(id)?;
    auth::require_authority(caller, strategy)?;

    state.strategy_mut(id)?.is_active = true;
    info!("Strategy activated: {}", id);
    Ok(())
}

pub(crate) fn deactivate_strategy(
    state: &mut LedgerState,
    id: StrategyId,
    caller: &AccountId,
) -> Result<(), LedgerError> {
    auth::require_not_paused(state)?;
    let strategy = state.strategy(id)?;
    auth::require_authority(caller, strategy)?;

    state.strategy_mut(id)?.is_active = false;
    info!("Strategy deactivated: {}", id);
    Ok(())
}

/// Overwrites the config in place; legal in any activation state and never
/// touches the trade counters.
pub(crate) fn update_strategy_config(
    state: &mut LedgerState,
    id: StrategyId,
    new_config: StrategyConfig,
    caller: &AccountId,
) -> Result<(), LedgerError> {
    auth::require_not_paused(state)?;
    let strategy = state.strategy(id)?;
    auth::require_authority(caller, strategy)?;
    new_config.validate()?;

    state.strategy_mut(id)?.config = new_config;
    info!("Strategy config updated: {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_state() -> LedgerState {
        LedgerState::new(
            AccountId::new("owner"),
            AccountId::new("escrow"),
            AccountId::new("treasury"),
        )
    }

    fn sample_config() -> StrategyConfig {
        StrategyConfig {
            asset: "SOL".to_string(),
            strategy_type: "breakout".to_string(),
            timeframe: "1h".to_string(),
            stop_loss_bps: 200,
            take_profit_bps: 600,
            position_size_bps: 1000,
            volume_condition: "above_average".to_string(),
            breakout_condition: "resistance".to_string(),
        }
    }

    #[test]
    fn test_create_starts_inactive_with_zero_counters() {
        let mut state = fresh_state();
        let alice = AccountId::new("alice");
        let id = create_strategy(&mut state, "Test Strategy", sample_config(), &alice).unwrap();

        let strategy = state.strategy(id).unwrap();
        assert!(!strategy.is_active);
        assert_eq!(strategy.total_trades, 0);
        assert_eq!(strategy.total_pnl, 0);
        assert_eq!(strategy.authority, alice);
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let mut state = fresh_state();
        let err =
            create_strategy(&mut state, "", sample_config(), &AccountId::new("alice"))
                .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidParameter(_)));
        assert_eq!(state.strategy_count(), 0);
    }

    #[test]
    fn test_only_authority_toggles() {
        let mut state = fresh_state();
        let alice = AccountId::new("alice");
        let bob = AccountId::new("bob");
        let id = create_strategy(&mut state, "Test Strategy", sample_config(), &alice).unwrap();

        assert!(matches!(
            activate_strategy(&mut state, id, &bob),
            Err(LedgerError::Unauthorized)
        ));
        assert!(!state.strategy(id).unwrap().is_active);

        activate_strategy(&mut state, id, &alice).unwrap();
        assert!(state.strategy(id).unwrap().is_active);

        assert!(matches!(
            deactivate_strategy(&mut state, id, &bob),
            Err(LedgerError::Unauthorized)
        ));
        deactivate_strategy(&mut state, id, &alice).unwrap();
        assert!(!state.strategy(id).unwrap().is_active);
    }

    #[test]
    fn test_activate_unknown_strategy() {
        let mut state = fresh_state();
        assert!(matches!(
            activate_strategy(&mut state, StrategyId(42), &AccountId::new("alice")),
            Err(LedgerError::StrategyNotFound(_))
        ));
    }

    #[test]
    fn test_update_config_preserves_counters() {
        let mut state = fresh_state();
        let alice = AccountId::new("alice");
        let id = create_strategy(&mut state, "Test Strategy", sample_config(), &alice).unwrap();

        state.strategy_mut(id).unwrap().total_trades = 5;
        state.strategy_mut(id).unwrap().total_pnl = -300;

        let mut new_config = sample_config();
        new_config.timeframe = "15m".to_string();
        update_strategy_config(&mut state, id, new_config.clone(), &alice).unwrap();

        let strategy = state.strategy(id).unwrap();
        assert_eq!(strategy.config, new_config);
        assert_eq!(strategy.total_trades, 5);
        assert_eq!(strategy.total_pnl, -300);
    }

    #[test]
    fn test_update_config_rejects_non_authority() {
        let mut state = fresh_state();
        let alice = AccountId::new("alice");
        let id = create_strategy(&mut state, "Test Strategy", sample_config(), &alice).unwrap();
        let original = state.strategy(id).unwrap().config.clone();

        let mut new_config = sample_config();
        new_config.asset = "BTC".to_string();
        assert!(matches!(
            update_strategy_config(&mut state, id, new_config, &AccountId::new("mallory")),
            Err(LedgerError::Unauthorized)
        ));
        assert_eq!(state.strategy(id).unwrap().config, original);
    }

    #[test]
    fn test_update_config_checks_identity_before_shape() {
        let mut state = fresh_state();
        let alice = AccountId::new("alice");
        let id = create_strategy(&mut state, "Test Strategy", sample_config(), &alice).unwrap();

        let mut malformed = sample_config();
        malformed.asset = String::new();

        // A stranger with a malformed config learns nothing about the shape
        assert!(matches!(
            update_strategy_config(&mut state, id, malformed.clone(), &AccountId::new("mallory")),
            Err(LedgerError::Unauthorized)
        ));
        assert!(matches!(
            update_strategy_config(&mut state, StrategyId(42), malformed.clone(), &alice),
            Err(LedgerError::StrategyNotFound(_))
        ));

        // The authority on a real record still gets the parameter error
        assert!(matches!(
            update_strategy_config(&mut state, id, malformed, &alice),
            Err(LedgerError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_toggle_preserves_record() {
        let mut state = fresh_state();
        let alice = AccountId::new("alice");
        let id = create_strategy(&mut state, "Test Strategy", sample_config(), &alice).unwrap();

        activate_strategy(&mut state, id, &alice).unwrap();
        state.strategy_mut(id).unwrap().total_trades = 3;
        state.strategy_mut(id).unwrap().total_pnl = 1_000;

        deactivate_strategy(&mut state, id, &alice).unwrap();
        activate_strategy(&mut state, id, &alice).unwrap();

        let strategy = state.strategy(id).unwrap();
        assert_eq!(strategy.config, sample_config());
        assert_eq!(strategy.total_trades, 3);
        assert_eq!(strategy.total_pnl, 1_000);
    }

    #[test]
    fn test_paused_rejects_mutation() {
        let mut state = fresh_state();
        state.paused = true;
        assert!(matches!(
            create_strategy(
                &mut state,
                "Test Strategy",
                sample_config(),
                &AccountId::new("alice")
            ),
            Err(LedgerError::ContractPaused)
        ));
    }
}
