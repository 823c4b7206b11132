// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Domain Invariants
//!
//! Business rule checks for dispatching and recording fleet work. All
//! functions are pure: no I/O, no clock, no mutation.
//!
//! # Dispatch Preconditions
//!
//! Checked in this order, first failure wins:
//!
//! 1. Vehicle is `Available`
//! 2. Driver is `OnDuty` and the license has not expired on the dispatch date
//! 3. Cargo weight fits the vehicle's capacity
//! 4. Driver's license categories include the vehicle type
//!
//! Existence of the vehicle and driver is checked by the caller against the
//! store, interleaved with the steps above (vehicle lookup before step 1,
//! driver lookup before step 2).

use chrono::NaiveDate;

use crate::domain::{Driver, DriverStatus, Trip, Vehicle, VehicleId, VehicleStatus};
use crate::errors::{FleetError, FleetResult};

/// Validation result with detailed error information
pub type ValidationResult = FleetResult<()>;

/// Vehicle must be `Available` to take a trip
pub fn validate_vehicle_available(vehicle: &Vehicle) -> ValidationResult {
    if vehicle.status != VehicleStatus::Available {
        return Err(FleetError::VehicleUnavailable {
            vehicle_id: vehicle.id.to_string(),
            status: vehicle.status,
        });
    }
    Ok(())
}

/// Driver must be `OnDuty` with a license valid on `as_of`
pub fn validate_driver_available(driver: &Driver, as_of: NaiveDate) -> ValidationResult {
    if driver.status != DriverStatus::OnDuty {
        return Err(FleetError::DriverUnavailable {
            driver_id: driver.id.to_string(),
            status: driver.status,
        });
    }
    if driver.is_license_expired(as_of) {
        return Err(FleetError::LicenseExpired {
            driver_id: driver.id.to_string(),
            expiry: driver.license_expiry,
            as_of,
        });
    }
    Ok(())
}

pub fn validate_cargo_capacity(cargo_weight: f64, vehicle: &Vehicle) -> ValidationResult {
    if cargo_weight > vehicle.max_capacity {
        return Err(FleetError::CapacityExceeded {
            cargo_weight,
            max_capacity: vehicle.max_capacity,
        });
    }
    Ok(())
}

pub fn validate_license_category(driver: &Driver, vehicle: &Vehicle) -> ValidationResult {
    if !driver.is_licensed_for(vehicle.vehicle_type) {
        return Err(FleetError::LicenseMismatch {
            driver_id: driver.id.to_string(),
            vehicle_type: vehicle.vehicle_type,
        });
    }
    Ok(())
}

/// Steps 2-4 of the dispatch preconditions, for an already available vehicle
pub fn validate_assignment(
    driver: &Driver,
    vehicle: &Vehicle,
    cargo_weight: f64,
    as_of: NaiveDate,
) -> ValidationResult {
    validate_driver_available(driver, as_of)?;
    validate_cargo_capacity(cargo_weight, vehicle)?;
    validate_license_category(driver, vehicle)
}

/// License plates are unique across the whole fleet, retired vehicles included
///
/// `except` skips the vehicle being edited.
pub fn validate_unique_plate<'a>(
    plate: &str,
    vehicles: impl IntoIterator<Item = &'a Vehicle>,
    except: Option<&VehicleId>,
) -> ValidationResult {
    let taken = vehicles
        .into_iter()
        .filter(|v| Some(&v.id) != except)
        .any(|v| v.license_plate == plate);
    if taken {
        return Err(FleetError::DuplicateLicensePlate(plate.to_string()));
    }
    Ok(())
}

/// Trip end reading must not be below its start reading
pub fn validate_odometer_progress(trip: &Trip, end_odometer: f64) -> ValidationResult {
    match trip.start_odometer {
        Some(start) if end_odometer < start => Err(FleetError::OdometerRegression {
            start,
            end: end_odometer,
        }),
        _ => Ok(()),
    }
}

/// Non-negative quantity check for capacities, costs and readings
pub fn validate_non_negative(field: &str, value: f64) -> ValidationResult {
    if value.is_nan() || value < 0.0 {
        return Err(FleetError::NegativeValue {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}
