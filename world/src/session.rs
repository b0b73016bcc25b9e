//! Currency, base health and terminal state of a session.

use wild_defense_config::EconomyPolicy;
use wild_defense_core::{PlacementError, SessionOutcome};

#[derive(Clone, Debug)]
pub(crate) struct Session {
    currency: u32,
    base_health: i32,
    max_base_health: i32,
    outcome: SessionOutcome,
}

impl Session {
    pub(crate) fn new(policy: &EconomyPolicy) -> Self {
        Self {
            currency: policy.starting_currency(),
            base_health: policy.base_health(),
            max_base_health: policy.base_health(),
            outcome: SessionOutcome::Running,
        }
    }

    pub(crate) const fn currency(&self) -> u32 {
        self.currency
    }

    pub(crate) const fn base_health(&self) -> i32 {
        self.base_health
    }

    pub(crate) const fn max_base_health(&self) -> i32 {
        self.max_base_health
    }

    pub(crate) const fn outcome(&self) -> SessionOutcome {
        self.outcome
    }

    pub(crate) fn credit(&mut self, reward: u32) {
        self.currency = self.currency.saturating_add(reward);
    }

    /// Debits `cost` when the balance covers it.
    pub(crate) fn charge(&mut self, cost: u32) -> Result<(), PlacementError> {
        if self.currency < cost {
            return Err(PlacementError::InsufficientFunds {
                cost,
                available: self.currency,
            });
        }
        self.currency -= cost;
        Ok(())
    }

    /// Removes base health and reports whether this loss ended the session.
    pub(crate) fn damage_base(&mut self, penalty: i32) -> bool {
        self.base_health = self.base_health.saturating_sub(penalty);
        if self.base_health <= 0 && self.outcome == SessionOutcome::Running {
            self.outcome = SessionOutcome::Lost;
            return true;
        }
        false
    }

    /// Marks the session won unless it already ended.
    pub(crate) fn declare_victory(&mut self) -> bool {
        if self.outcome.is_terminal() {
            return false;
        }
        self.outcome = SessionOutcome::Won;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn session() -> Session {
        Session::new(&EconomyPolicy::new(
            200,
            20,
            10,
            Duration::from_millis(100),
        ))
    }

    #[test]
    fn charge_rejects_without_debiting() {
        let mut session = session();
        assert_eq!(session.charge(150), Ok(()));
        assert_eq!(
            session.charge(100),
            Err(PlacementError::InsufficientFunds {
                cost: 100,
                available: 50
            })
        );
        assert_eq!(session.currency(), 50);
    }

    #[test]
    fn base_loss_is_reported_once() {
        let mut session = session();
        assert!(!session.damage_base(10));
        assert!(session.damage_base(10));
        assert!(!session.damage_base(10));
        assert_eq!(session.outcome(), SessionOutcome::Lost);
        assert!(!session.declare_victory());
    }
}
