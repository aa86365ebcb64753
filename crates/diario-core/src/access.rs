//! PIN access gate
//!
//! A cosmetic barrier: the journal starts `Locked` until the shared PIN is
//! entered once on this device. The unlocked flag is persisted by the journal
//! and never expires.

use serde::Serialize;

use crate::error::{JournalError, JournalResult};

/// The shared PIN
pub const APP_PIN: &str = "1309";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessState {
    Locked,
    Unlocked,
}

/// Two-state PIN gate
#[derive(Debug, Clone)]
pub struct AccessGate {
    state: AccessState,
}

impl AccessGate {
    /// Start from the persisted flag
    pub fn from_flag(unlocked: bool) -> Self {
        let state = if unlocked {
            AccessState::Unlocked
        } else {
            AccessState::Locked
        };
        Self { state }
    }

    pub fn state(&self) -> AccessState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == AccessState::Unlocked
    }

    /// Submit a PIN attempt
    ///
    /// Returns `Ok(true)` when this attempt unlocked the gate and `Ok(false)`
    /// when it was already unlocked. The input must match exactly; there is
    /// no attempt limit.
    pub fn submit(&mut self, input: &str) -> JournalResult<bool> {
        if self.is_unlocked() {
            return Ok(false);
        }
        if input != APP_PIN {
            return Err(JournalError::IncorrectPin);
        }
        self.state = AccessState::Unlocked;
        Ok(true)
    }

    /// Fail with `Locked` unless the gate is open
    pub fn ensure_unlocked(&self) -> JournalResult<()> {
        if self.is_unlocked() {
            Ok(())
        } else {
            Err(JournalError::Locked)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_from_flag() {
        assert_eq!(AccessGate::from_flag(false).state(), AccessState::Locked);
        assert_eq!(AccessGate::from_flag(true).state(), AccessState::Unlocked);
    }

    #[test]
    fn test_correct_pin_unlocks_once() {
        let mut gate = AccessGate::from_flag(false);
        assert!(gate.submit(APP_PIN).unwrap());
        assert!(gate.is_unlocked());

        // Already unlocked: no second transition
        assert!(!gate.submit(APP_PIN).unwrap());
        assert!(!gate.submit("anything").unwrap());
    }

    #[test]
    fn test_wrong_pin_stays_locked() {
        let mut gate = AccessGate::from_flag(false);
        for attempt in ["", "0000", "1309 ", " 1309", "13090", "1308"] {
            assert!(matches!(
                gate.submit(attempt),
                Err(JournalError::IncorrectPin)
            ));
            assert_eq!(gate.state(), AccessState::Locked);
        }

        // Unlimited retries
        assert!(gate.submit(APP_PIN).unwrap());
    }

    #[test]
    fn test_ensure_unlocked() {
        let gate = AccessGate::from_flag(false);
        assert!(matches!(gate.ensure_unlocked(), Err(JournalError::Locked)));

        let gate = AccessGate::from_flag(true);
        assert!(gate.ensure_unlocked().is_ok());
    }
}
