// Copyright (c) 2025 - Cowboy AI, Inc.
//! Who and what can be dispatched, and whose license needs attention

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Driver, DriverId, DriverStatus, Vehicle, VehicleStatus};
use crate::store::FleetSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseAlertLevel {
    Expired,
    ExpiringSoon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseAlert {
    pub driver_id: DriverId,
    pub name: String,
    pub expiry: NaiveDate,
    pub level: LicenseAlertLevel,
    /// Negative once expired
    pub days_remaining: i64,
}

/// Drivers whose license is expired, or expires within `warning_days` of
/// `as_of`, soonest first
pub fn license_alerts(
    snapshot: &FleetSnapshot,
    as_of: NaiveDate,
    warning_days: i64,
) -> Vec<LicenseAlert> {
    let mut alerts: Vec<LicenseAlert> = snapshot
        .drivers
        .iter()
        .filter_map(|d| {
            let level = if d.is_license_expired(as_of) {
                LicenseAlertLevel::Expired
            } else if d.is_license_expiring_within(as_of, warning_days) {
                LicenseAlertLevel::ExpiringSoon
            } else {
                return None;
            };
            Some(LicenseAlert {
                driver_id: d.id.clone(),
                name: d.name.clone(),
                expiry: d.license_expiry,
                level,
                days_remaining: (d.license_expiry - as_of).num_days(),
            })
        })
        .collect();
    alerts.sort_by_key(|a| a.expiry);
    alerts
}

pub fn available_vehicles(snapshot: &FleetSnapshot) -> Vec<&Vehicle> {
    snapshot
        .vehicles
        .iter()
        .filter(|v| v.status == VehicleStatus::Available)
        .collect()
}

/// OnDuty drivers whose license is valid on `as_of`
pub fn available_drivers(snapshot: &FleetSnapshot, as_of: NaiveDate) -> Vec<&Driver> {
    snapshot
        .drivers
        .iter()
        .filter(|d| d.status == DriverStatus::OnDuty && !d.is_license_expired(as_of))
        .collect()
}

/// The choices a trip form offers
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchCandidates<'a> {
    pub vehicles: Vec<&'a Vehicle>,
    pub drivers: Vec<&'a Driver>,
}

impl<'a> DispatchCandidates<'a> {
    pub fn for_date(snapshot: &'a FleetSnapshot, as_of: NaiveDate) -> Self {
        Self {
            vehicles: available_vehicles(snapshot),
            drivers: available_drivers(snapshot, as_of),
        }
    }

    /// Drivers licensed for the given vehicle
    pub fn drivers_for(&self, vehicle: &Vehicle) -> Vec<&'a Driver> {
        self.drivers
            .iter()
            .copied()
            .filter(|d| d.is_licensed_for(vehicle.vehicle_type))
            .collect()
    }
}
