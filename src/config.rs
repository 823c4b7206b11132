// Copyright (c) 2025 - Cowboy AI, Inc.
//! Fleet configuration
//!
//! Defaults reproduce the dashboard's observed behavior. Every field can be
//! overridden from the environment:
//!
//! | variable | default |
//! |---|---|
//! | `FLEET_ID_STRATEGY` | `sequential` (or `uuid`) |
//! | `FLEET_LICENSE_WARNING_DAYS` | `90` |
//! | `FLEET_RESTORE_AFTER_MAINTENANCE` | `false` |
//! | `FLEET_ENFORCE_ODOMETER` | `false` |
//! | `FLEET_HISTORY_LIMIT` | `1000` |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::IdStrategy;
use crate::errors::{FleetError, FleetResult};

pub const ID_STRATEGY_VAR: &str = "FLEET_ID_STRATEGY";
pub const LICENSE_WARNING_DAYS_VAR: &str = "FLEET_LICENSE_WARNING_DAYS";
pub const RESTORE_AFTER_MAINTENANCE_VAR: &str = "FLEET_RESTORE_AFTER_MAINTENANCE";
pub const ENFORCE_ODOMETER_VAR: &str = "FLEET_ENFORCE_ODOMETER";
pub const HISTORY_LIMIT_VAR: &str = "FLEET_HISTORY_LIMIT";

/// Rule switches consulted by the command handlers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulePolicy {
    /// Reject trip completion when the end odometer is below the start
    pub enforce_odometer_monotonic: bool,

    /// Completing the last open maintenance log returns an InShop vehicle
    /// to Available
    pub restore_vehicle_after_maintenance: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetConfig {
    pub id_strategy: IdStrategy,

    /// Days ahead of the reference date a license counts as expiring soon
    pub license_warning_days: i64,

    pub rules: RulePolicy,

    /// Applied events kept in the service's in-memory history
    pub history_limit: usize,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::Sequential,
            license_warning_days: 90,
            rules: RulePolicy::default(),
            history_limit: 1000,
        }
    }
}

impl FleetConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> FleetResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> FleetResult<Self> {
        let defaults = Self::default();

        let id_strategy = match lookup(ID_STRATEGY_VAR) {
            None => defaults.id_strategy,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "sequential" => IdStrategy::Sequential,
                "uuid" => IdStrategy::Uuid,
                other => {
                    return Err(FleetError::Configuration(format!(
                        "{ID_STRATEGY_VAR} must be 'sequential' or 'uuid', got '{other}'"
                    )))
                }
            },
        };

        let license_warning_days =
            parse_var(&lookup, LICENSE_WARNING_DAYS_VAR)?.unwrap_or(defaults.license_warning_days);
        if license_warning_days < 0 {
            return Err(FleetError::Configuration(format!(
                "{LICENSE_WARNING_DAYS_VAR} must not be negative"
            )));
        }

        let rules = RulePolicy {
            enforce_odometer_monotonic: parse_flag(&lookup, ENFORCE_ODOMETER_VAR)?
                .unwrap_or(defaults.rules.enforce_odometer_monotonic),
            restore_vehicle_after_maintenance: parse_flag(&lookup, RESTORE_AFTER_MAINTENANCE_VAR)?
                .unwrap_or(defaults.rules.restore_vehicle_after_maintenance),
        };

        let history_limit =
            parse_var(&lookup, HISTORY_LIMIT_VAR)?.unwrap_or(defaults.history_limit);

        Ok(Self {
            id_strategy,
            license_warning_days,
            rules,
            history_limit,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> FleetResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| FleetError::Configuration(format!("{key}: {e}")))
        })
        .transpose()
}

fn parse_flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> FleetResult<Option<bool>> {
    lookup(key)
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(FleetError::Configuration(format!(
                "{key} must be a boolean, got '{other}'"
            ))),
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = FleetConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, FleetConfig::default());
        assert_eq!(config.license_warning_days, 90);
        assert!(!config.rules.restore_vehicle_after_maintenance);
    }

    #[test]
    fn test_overrides() {
        let config = FleetConfig::from_lookup(lookup_from(&[
            (ID_STRATEGY_VAR, "UUID"),
            (LICENSE_WARNING_DAYS_VAR, "30"),
            (RESTORE_AFTER_MAINTENANCE_VAR, "true"),
            (ENFORCE_ODOMETER_VAR, "1"),
            (HISTORY_LIMIT_VAR, "10"),
        ]))
        .unwrap();

        assert_eq!(config.id_strategy, IdStrategy::Uuid);
        assert_eq!(config.license_warning_days, 30);
        assert!(config.rules.restore_vehicle_after_maintenance);
        assert!(config.rules.enforce_odometer_monotonic);
        assert_eq!(config.history_limit, 10);
    }

    #[test]
    fn test_unparseable_values_are_configuration_errors() {
        for pairs in [
            [(ID_STRATEGY_VAR, "random")],
            [(LICENSE_WARNING_DAYS_VAR, "soon")],
            [(ENFORCE_ODOMETER_VAR, "maybe")],
            [(LICENSE_WARNING_DAYS_VAR, "-5")],
        ] {
            let result = FleetConfig::from_lookup(lookup_from(&pairs));
            assert!(matches!(result, Err(FleetError::Configuration(_))));
        }
    }
}
