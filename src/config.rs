//! # Configuration
//!
//! [`OrderConfig`] selects how the order workflow treats odd quantities and how
//! it takes stock. Every field has a default, so an empty environment yields a
//! working configuration.
//!
//! | variable | values | default |
//! |---|---|---|
//! | `ORDER_DESK_QUANTITY_RULE` | `reject_non_positive`, `drop_non_positive`, `accept_all` | `reject_non_positive` |
//! | `ORDER_DESK_STOCK_POLICY` | `conditional`, `unchecked` | `conditional` |
//! | `ORDER_DESK_MAILBOX_CAPACITY` | positive integer | `32` |

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub const QUANTITY_RULE_VAR: &str = "ORDER_DESK_QUANTITY_RULE";
pub const STOCK_POLICY_VAR: &str = "ORDER_DESK_STOCK_POLICY";
pub const MAILBOX_CAPACITY_VAR: &str = "ORDER_DESK_MAILBOX_CAPACITY";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// What to do with requested items whose quantity is zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityRule {
    /// Fail the whole request with `InvalidQuantity`.
    #[default]
    RejectNonPositive,
    /// Silently leave such items out of the order.
    DropNonPositive,
    /// Keep them as requested.
    AcceptAll,
}

/// How stock is taken once the order is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Atomic check-and-decrement in the catalog; a failed reservation removes
    /// the stored order again.
    #[default]
    Conditional,
    /// Plain decrement with no check. Concurrent orders can oversell.
    Unchecked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    pub quantity_rule: QuantityRule,
    pub stock_policy: StockPolicy,
    pub mailbox_capacity: usize,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            quantity_rule: QuantityRule::default(),
            stock_policy: StockPolicy::default(),
            mailbox_capacity: 32,
        }
    }
}

impl OrderConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset keys keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(QUANTITY_RULE_VAR) {
            config.quantity_rule = value.parse()?;
        }
        if let Some(value) = lookup(STOCK_POLICY_VAR) {
            config.stock_policy = value.parse()?;
        }
        if let Some(value) = lookup(MAILBOX_CAPACITY_VAR) {
            config.mailbox_capacity = match value.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: MAILBOX_CAPACITY_VAR,
                        value,
                        expected: "a positive integer",
                    })
                }
            };
        }
        Ok(config)
    }
}

impl FromStr for QuantityRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject_non_positive" => Ok(Self::RejectNonPositive),
            "drop_non_positive" => Ok(Self::DropNonPositive),
            "accept_all" => Ok(Self::AcceptAll),
            _ => Err(ConfigError::InvalidValue {
                key: QUANTITY_RULE_VAR,
                value: s.to_string(),
                expected: "reject_non_positive, drop_non_positive or accept_all",
            }),
        }
    }
}

impl FromStr for StockPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conditional" => Ok(Self::Conditional),
            "unchecked" => Ok(Self::Unchecked),
            _ => Err(ConfigError::InvalidValue {
                key: STOCK_POLICY_VAR,
                value: s.to_string(),
                expected: "conditional or unchecked",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = OrderConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, OrderConfig::default());
        assert_eq!(config.quantity_rule, QuantityRule::RejectNonPositive);
        assert_eq!(config.stock_policy, StockPolicy::Conditional);
        assert_eq!(config.mailbox_capacity, 32);
    }

    #[test]
    fn reads_every_variable() {
        let config = OrderConfig::from_lookup(lookup(&[
            (QUANTITY_RULE_VAR, "Accept_All"),
            (STOCK_POLICY_VAR, "unchecked"),
            (MAILBOX_CAPACITY_VAR, "8"),
        ]))
        .unwrap();
        assert_eq!(config.quantity_rule, QuantityRule::AcceptAll);
        assert_eq!(config.stock_policy, StockPolicy::Unchecked);
        assert_eq!(config.mailbox_capacity, 8);
    }

    #[test]
    fn rejects_bad_values() {
        let err = OrderConfig::from_lookup(lookup(&[(STOCK_POLICY_VAR, "sometimes")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == STOCK_POLICY_VAR));

        let zero = OrderConfig::from_lookup(lookup(&[(MAILBOX_CAPACITY_VAR, "0")]));
        assert!(zero.is_err());
    }

    #[test]
    fn deserializes_partial_json() {
        let config: OrderConfig =
            serde_json::from_str(r#"{"quantity_rule":"drop_non_positive"}"#).unwrap();
        assert_eq!(config.quantity_rule, QuantityRule::DropNonPositive);
        assert_eq!(config.mailbox_capacity, 32);
    }
}
