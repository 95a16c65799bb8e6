use std::{env, str::FromStr};

use rust_decimal::Decimal;
use thiserror::Error;

pub const DEFAULT_BRANCH_CODE: &str = "0001";
pub const DEFAULT_WITHDRAWAL_LIMIT: Decimal = Decimal::from_parts(500, 0, 0, false, 0);
pub const DEFAULT_DAILY_WITHDRAWALS: u32 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value `{value}` for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Limits applied uniformly to every account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalLimits {
    pub per_withdrawal: Decimal,
    /// Withdrawals allowed per account for the lifetime of the process.
    pub daily_withdrawals: u32,
}

impl Default for WithdrawalLimits {
    fn default() -> Self {
        Self {
            per_withdrawal: DEFAULT_WITHDRAWAL_LIMIT,
            daily_withdrawals: DEFAULT_DAILY_WITHDRAWALS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankConfig {
    pub branch_code: String,
    pub limits: WithdrawalLimits,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            branch_code: DEFAULT_BRANCH_CODE.to_string(),
            limits: WithdrawalLimits::default(),
        }
    }
}

impl BankConfig {
    /// Defaults overridden by `BANK_BRANCH_CODE`, `BANK_WITHDRAWAL_LIMIT`
    /// and `BANK_DAILY_WITHDRAWALS` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(branch) = lookup("BANK_BRANCH_CODE") {
            let branch = branch.trim();
            if branch.is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: "BANK_BRANCH_CODE",
                    value: branch.to_string(),
                    reason: "branch code cannot be empty".to_string(),
                });
            }
            config.branch_code = branch.to_string();
        }
        if let Some(limit) = lookup("BANK_WITHDRAWAL_LIMIT") {
            let limit: Decimal = parse_var("BANK_WITHDRAWAL_LIMIT", &limit)?;
            if limit <= Decimal::ZERO {
                return Err(ConfigError::InvalidValue {
                    var: "BANK_WITHDRAWAL_LIMIT",
                    value: limit.to_string(),
                    reason: "limit must be greater than zero".to_string(),
                });
            }
            config.limits.per_withdrawal = limit;
        }
        if let Some(count) = lookup("BANK_DAILY_WITHDRAWALS") {
            config.limits.daily_withdrawals = parse_var("BANK_DAILY_WITHDRAWALS", &count)?;
        }
        Ok(config)
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|err: T::Err| ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rust_decimal::prelude::FromPrimitive;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults() {
        let config = BankConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, BankConfig::default());
        assert_eq!(config.branch_code, "0001");
        assert_eq!(
            config.limits.per_withdrawal,
            Decimal::from_u32(500).unwrap()
        );
        assert_eq!(config.limits.daily_withdrawals, 3);
    }

    #[test]
    fn overrides() {
        let config = BankConfig::from_lookup(lookup(&[
            ("BANK_BRANCH_CODE", "0042"),
            ("BANK_WITHDRAWAL_LIMIT", "1000.50"),
            ("BANK_DAILY_WITHDRAWALS", " 5 "),
        ]))
        .unwrap();
        assert_eq!(config.branch_code, "0042");
        assert_eq!(
            config.limits.per_withdrawal,
            Decimal::from_str_exact("1000.50").unwrap()
        );
        assert_eq!(config.limits.daily_withdrawals, 5);
    }

    #[test]
    fn invalid_values() {
        let err = BankConfig::from_lookup(lookup(&[("BANK_DAILY_WITHDRAWALS", "many")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                var: "BANK_DAILY_WITHDRAWALS",
                ..
            }
        ));
        assert!(BankConfig::from_lookup(lookup(&[("BANK_WITHDRAWAL_LIMIT", "-1")])).is_err());
        assert!(BankConfig::from_lookup(lookup(&[("BANK_BRANCH_CODE", "  ")])).is_err());
    }
}
