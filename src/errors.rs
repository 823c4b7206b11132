// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for fleet operations

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{DriverStatus, EntityKind, VehicleStatus, VehicleType};
use crate::state_machine::TransitionError;

/// Errors that can occur in fleet operations
///
/// Every command either succeeds or fails with exactly one of these. A failed
/// command never leaves a partial mutation behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FleetError {
    /// Referenced entity does not exist
    #[error("{kind} {id} not found")]
    EntityNotFound { kind: EntityKind, id: String },

    /// Vehicle is not in a dispatchable state
    #[error("Vehicle {vehicle_id} is not available (status: {status})")]
    VehicleUnavailable {
        vehicle_id: String,
        status: VehicleStatus,
    },

    /// Driver is not in a dispatchable state
    #[error("Driver {driver_id} is not available (status: {status})")]
    DriverUnavailable {
        driver_id: String,
        status: DriverStatus,
    },

    /// Cargo weight exceeds the vehicle's capacity
    #[error("Cargo ({cargo_weight}kg) exceeds vehicle capacity ({max_capacity}kg)")]
    CapacityExceeded { cargo_weight: f64, max_capacity: f64 },

    /// Driver is not licensed for the vehicle type
    #[error("Driver {driver_id} is not licensed for {vehicle_type}")]
    LicenseMismatch {
        driver_id: String,
        vehicle_type: VehicleType,
    },

    /// Driver license expired before the dispatch date
    #[error("Driver {driver_id} license expired on {expiry} (dispatch date {as_of})")]
    LicenseExpired {
        driver_id: String,
        expiry: NaiveDate,
        as_of: NaiveDate,
    },

    /// License plate already registered
    #[error("License plate {0} already exists")]
    DuplicateLicensePlate(String),

    /// Trip end odometer is below its start odometer
    #[error("End odometer {end} is below start odometer {start}")]
    OdometerRegression { start: f64, end: f64 },

    /// Capacity, cost or reading below zero
    #[error("{field} must be a non-negative number, got {value}")]
    NegativeValue { field: String, value: f64 },

    /// A cross-entity reference does not line up
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Lifecycle table rejected a status change
    #[error("{kind} {id}: {source}")]
    InvalidTransition {
        kind: EntityKind,
        id: String,
        #[source]
        source: TransitionError,
    },

    /// A record changed between planning and commit
    #[error("Concurrency conflict on {kind} {id}: expected version {expected}, got {actual}")]
    ConcurrencyConflict {
        kind: EntityKind,
        id: String,
        expected: u64,
        actual: u64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Report rendering failed
    #[error("Export error: {0}")]
    Export(String),
}

impl FleetError {
    /// Build a not-found error for any entity kind
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        FleetError::EntityNotFound {
            kind,
            id: id.into(),
        }
    }

    /// Wrap a lifecycle rejection with the entity it happened on
    pub fn transition(kind: EntityKind, id: impl Into<String>, source: TransitionError) -> Self {
        FleetError::InvalidTransition {
            kind,
            id: id.into(),
            source,
        }
    }

    /// Whether the failure is a precondition failure the caller can re-prompt on
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            FleetError::ConcurrencyConflict { .. }
                | FleetError::Configuration(_)
                | FleetError::Export(_)
        )
    }
}

/// Result type for fleet operations
pub type FleetResult<T> = Result<T, FleetError>;

impl From<csv::Error> for FleetError {
    fn from(err: csv::Error) -> Self {
        FleetError::Export(err.to_string())
    }
}

impl From<serde_json::Error> for FleetError {
    fn from(err: serde_json::Error) -> Self {
        FleetError::Export(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(FleetError::not_found(EntityKind::Vehicle, "v9") => true ; "missing record")]
    #[test_case(FleetError::DuplicateLicensePlate("KA-01".into()) => true ; "duplicate plate")]
    #[test_case(FleetError::ConcurrencyConflict {
        kind: EntityKind::Vehicle,
        id: "v1".into(),
        expected: 1,
        actual: 2,
    } => false ; "stale plan")]
    #[test_case(FleetError::Configuration("bad history limit".into()) => false ; "configuration")]
    #[test_case(FleetError::Export("disk full".into()) => false ; "export")]
    fn test_is_validation(err: FleetError) -> bool {
        err.is_validation()
    }
}
