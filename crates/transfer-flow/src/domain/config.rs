//! Transfer flow configuration
//!
//! Limits and delays are configuration, never constants in the flow logic.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use super::amount::{Amount, AmountLimits};
use super::auth::AuthTiming;
use crate::error::{FlowError, FlowResult};

/// Complete transfer flow configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Single-transfer limit and available balance.
    pub limits: AmountLimits,
    /// Authentication phase delays.
    pub auth: AuthTiming,
    /// Wall-clock refresh period.
    pub clock_refresh: Duration,
    /// How long a toast stays visible.
    pub toast_duration: Duration,
    /// Preset quick-amount chips on the amount screen.
    pub quick_amounts: Vec<Amount>,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            limits: AmountLimits::default(),
            auth: AuthTiming::default(),
            clock_refresh: Duration::from_secs(60),
            toast_duration: Duration::from_millis(3_000),
            quick_amounts: vec![1_000, 5_000, 10_000],
        }
    }
}

fn env_u64(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl TransferConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CT_MAX_SINGLE_TRANSFER`: Single-transfer limit (default: 50000)
    /// - `CT_AVAILABLE_BALANCE`: Available balance (default: 168520)
    /// - `CT_AUTH_VERIFY_DELAY_MS`: Verifying phase length (default: 2000)
    /// - `CT_AUTH_COMMIT_DELAY_MS`: Success-to-commit delay (default: 1500)
    /// - `CT_CLOCK_REFRESH_SECS`: Clock refresh period (default: 60)
    /// - `CT_TOAST_DURATION_MS`: Toast visibility (default: 3000)
    ///
    /// Unparsable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            limits: AmountLimits {
                max_single_transfer: env_u64("CT_MAX_SINGLE_TRANSFER")
                    .unwrap_or(defaults.limits.max_single_transfer),
                available_balance: env_u64("CT_AVAILABLE_BALANCE")
                    .unwrap_or(defaults.limits.available_balance),
            },
            auth: AuthTiming {
                verify_delay: env_u64("CT_AUTH_VERIFY_DELAY_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.auth.verify_delay),
                commit_delay: env_u64("CT_AUTH_COMMIT_DELAY_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.auth.commit_delay),
            },
            clock_refresh: env_u64("CT_CLOCK_REFRESH_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.clock_refresh),
            toast_duration: env_u64("CT_TOAST_DURATION_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.toast_duration),
            quick_amounts: defaults.quick_amounts,
        }
    }

    pub fn with_limits(mut self, max_single_transfer: Amount, available_balance: Amount) -> Self {
        self.limits = AmountLimits {
            max_single_transfer,
            available_balance,
        };
        self
    }

    /// Reject values that would make the flow unusable.
    pub fn validate(&self) -> FlowResult<()> {
        if self.limits.max_single_transfer == 0 {
            return Err(FlowError::InvalidConfig {
                reason: "max_single_transfer must be greater than zero".into(),
            });
        }
        if self.limits.available_balance == 0 {
            return Err(FlowError::InvalidConfig {
                reason: "available_balance must be greater than zero".into(),
            });
        }
        if self.clock_refresh.is_zero() {
            return Err(FlowError::InvalidConfig {
                reason: "clock_refresh must be non-zero".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TransferConfig::default();
        assert_eq!(config.limits.max_single_transfer, 50_000);
        assert_eq!(config.limits.available_balance, 168_520);
        assert_eq!(config.auth.verify_delay, Duration::from_millis(2_000));
        assert_eq!(config.auth.commit_delay, Duration::from_millis(1_500));
        assert_eq!(config.clock_refresh, Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_limits() {
        let config = TransferConfig::default().with_limits(10, 20);
        assert_eq!(config.limits.max_single_transfer, 10);
        assert_eq!(config.limits.available_balance, 20);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        assert!(TransferConfig::default().with_limits(0, 1).validate().is_err());
        assert!(TransferConfig::default().with_limits(1, 0).validate().is_err());

        let mut config = TransferConfig::default();
        config.clock_refresh = Duration::ZERO;
        assert!(matches!(
            config.validate(),
            Err(FlowError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_from_env_overrides_and_fallbacks() {
        // Single test touches the environment to avoid races between tests
        env::set_var("CT_MAX_SINGLE_TRANSFER", "75000");
        env::set_var("CT_AVAILABLE_BALANCE", "not-a-number");
        env::set_var("CT_AUTH_VERIFY_DELAY_MS", "250");

        let config = TransferConfig::from_env();
        assert_eq!(config.limits.max_single_transfer, 75_000);
        assert_eq!(config.limits.available_balance, 168_520);
        assert_eq!(config.auth.verify_delay, Duration::from_millis(250));
        assert_eq!(config.auth.commit_delay, Duration::from_millis(1_500));

        env::remove_var("CT_MAX_SINGLE_TRANSFER");
        env::remove_var("CT_AVAILABLE_BALANCE");
        env::remove_var("CT_AUTH_VERIFY_DELAY_MS");
    }
}
