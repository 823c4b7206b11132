// Copyright (c) 2025 - Cowboy AI, Inc.
//! Command center KPIs

use serde::{Deserialize, Serialize};

use super::round1;
use crate::domain::{DriverStatus, Trip, TripStatus, VehicleStatus};
use crate::store::FleetSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKpis {
    /// Vehicles on a trip
    pub active_fleet: usize,
    pub in_shop: usize,
    pub available: usize,
    pub total_vehicles: usize,
    /// Percentage, one decimal
    pub utilization_rate: f64,
    /// Draft trips
    pub pending_trips: usize,
    pub total_fuel_cost: f64,
    /// Drivers OnDuty or OnTrip
    pub active_drivers: usize,
    pub total_drivers: usize,
    pub total_trips: usize,
    pub completed_trips: usize,
}

fn count_vehicles(snapshot: &FleetSnapshot, status: VehicleStatus) -> usize {
    snapshot.vehicles.iter().filter(|v| v.status == status).count()
}

pub fn active_fleet_count(snapshot: &FleetSnapshot) -> usize {
    count_vehicles(snapshot, VehicleStatus::OnTrip)
}

/// `onTrip / (total - retired)` as a percentage; 0 without a working fleet
pub fn utilization_rate(snapshot: &FleetSnapshot) -> f64 {
    let retired = count_vehicles(snapshot, VehicleStatus::Retired);
    let working = snapshot.vehicles.len() - retired;
    if working == 0 {
        return 0.0;
    }
    round1(active_fleet_count(snapshot) as f64 / working as f64 * 100.0)
}

pub fn dashboard_kpis(snapshot: &FleetSnapshot) -> DashboardKpis {
    let trips_in = |status: TripStatus| snapshot.trips.iter().filter(|t| t.status == status).count();

    DashboardKpis {
        active_fleet: active_fleet_count(snapshot),
        in_shop: count_vehicles(snapshot, VehicleStatus::InShop),
        available: count_vehicles(snapshot, VehicleStatus::Available),
        total_vehicles: snapshot.vehicles.len(),
        utilization_rate: utilization_rate(snapshot),
        pending_trips: trips_in(TripStatus::Draft),
        total_fuel_cost: snapshot.fuel_logs.iter().map(|f| f.cost).sum(),
        active_drivers: snapshot
            .drivers
            .iter()
            .filter(|d| matches!(d.status, DriverStatus::OnDuty | DriverStatus::OnTrip))
            .count(),
        total_drivers: snapshot.drivers.len(),
        total_trips: snapshot.trips.len(),
        completed_trips: trips_in(TripStatus::Completed),
    }
}

/// Newest trips first by created date, at most `limit`
pub fn recent_trips(snapshot: &FleetSnapshot, limit: usize) -> Vec<&Trip> {
    let mut trips: Vec<&Trip> = snapshot.trips.iter().collect();
    // Stable: same-day trips keep insertion order
    trips.sort_by(|a, b| b.created_date.cmp(&a.created_date));
    trips.truncate(limit);
    trips
}
