// Copyright (c) 2025 - Cowboy AI, Inc.
//! Analytics & Reports
//!
//! Per-vehicle money and distance figures, fleet-wide expense totals, status
//! distributions and driver performance.
//!
//! Revenue and distance count Completed trips only. Fuel and maintenance
//! costs count every log regardless of status.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::round1;
use crate::domain::{DriverId, DriverStatus, TripStatus, VehicleId, VehicleStatus};
use crate::store::FleetSnapshot;

/// Running totals for one vehicle
#[derive(Debug, Default, Clone, Copy)]
struct Ledger {
    revenue: f64,
    distance_km: f64,
    fuel_cost: f64,
    liters: f64,
    maintenance_cost: f64,
}

fn ledgers(snapshot: &FleetSnapshot) -> HashMap<&str, Ledger> {
    let mut ledgers: HashMap<&str, Ledger> = HashMap::new();

    for trip in snapshot.trips.iter().filter(|t| t.status == TripStatus::Completed) {
        let ledger = ledgers.entry(trip.vehicle_id.as_str()).or_default();
        ledger.revenue += trip.revenue;
        if let Some(distance) = trip.distance() {
            ledger.distance_km += distance;
        }
    }
    for fuel in &snapshot.fuel_logs {
        let ledger = ledgers.entry(fuel.vehicle_id.as_str()).or_default();
        ledger.fuel_cost += fuel.cost;
        ledger.liters += fuel.liters;
    }
    for log in &snapshot.maintenance_logs {
        ledgers.entry(log.vehicle_id.as_str()).or_default().maintenance_cost += log.cost;
    }

    ledgers
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFuelEfficiency {
    pub vehicle_id: VehicleId,
    pub name: String,
    pub distance_km: f64,
    pub liters: f64,
    /// One decimal; 0 when no fuel was logged
    pub km_per_liter: f64,
    pub fuel_cost: f64,
}

/// km/l per vehicle, from completed-trip distance over logged liters
pub fn fuel_efficiency(snapshot: &FleetSnapshot) -> Vec<VehicleFuelEfficiency> {
    let ledgers = ledgers(snapshot);
    snapshot
        .vehicles
        .iter()
        .map(|v| {
            let ledger = ledgers.get(v.id.as_str()).copied().unwrap_or_default();
            let km_per_liter = if ledger.liters > 0.0 {
                round1(ledger.distance_km / ledger.liters)
            } else {
                0.0
            };
            VehicleFuelEfficiency {
                vehicle_id: v.id.clone(),
                name: v.name.clone(),
                distance_km: ledger.distance_km,
                liters: ledger.liters,
                km_per_liter,
                fuel_cost: ledger.fuel_cost,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleCosts {
    pub vehicle_id: VehicleId,
    pub name: String,
    pub fuel: f64,
    pub maintenance: f64,
    pub total: f64,
    pub revenue: f64,
}

pub fn cost_breakdown(snapshot: &FleetSnapshot) -> Vec<VehicleCosts> {
    let ledgers = ledgers(snapshot);
    snapshot
        .vehicles
        .iter()
        .map(|v| {
            let ledger = ledgers.get(v.id.as_str()).copied().unwrap_or_default();
            VehicleCosts {
                vehicle_id: v.id.clone(),
                name: v.name.clone(),
                fuel: ledger.fuel_cost,
                maintenance: ledger.maintenance_cost,
                total: ledger.fuel_cost + ledger.maintenance_cost,
                revenue: ledger.revenue,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRoi {
    pub vehicle_id: VehicleId,
    pub name: String,
    pub revenue: f64,
    pub fuel_cost: f64,
    pub maintenance_cost: f64,
    pub acquisition_cost: f64,
    /// `(revenue - fuel - maintenance) / acquisition * 100`, one decimal
    pub roi_pct: f64,
}

impl VehicleRoi {
    pub fn expenses(&self) -> f64 {
        self.fuel_cost + self.maintenance_cost
    }
}

/// ROI for every vehicle; 0 where the acquisition cost is 0
pub fn vehicle_roi(snapshot: &FleetSnapshot) -> Vec<VehicleRoi> {
    let ledgers = ledgers(snapshot);
    snapshot
        .vehicles
        .iter()
        .map(|v| {
            let ledger = ledgers.get(v.id.as_str()).copied().unwrap_or_default();
            let roi_pct = if v.acquisition_cost > 0.0 {
                let net = ledger.revenue - ledger.fuel_cost - ledger.maintenance_cost;
                round1(net / v.acquisition_cost * 100.0)
            } else {
                0.0
            };
            VehicleRoi {
                vehicle_id: v.id.clone(),
                name: v.name.clone(),
                revenue: ledger.revenue,
                fuel_cost: ledger.fuel_cost,
                maintenance_cost: ledger.maintenance_cost,
                acquisition_cost: v.acquisition_cost,
                roi_pct,
            }
        })
        .collect()
}

/// Report rows: vehicles that earned or spent anything
pub fn roi_report(snapshot: &FleetSnapshot) -> Vec<VehicleRoi> {
    vehicle_roi(snapshot)
        .into_iter()
        .filter(|r| r.revenue > 0.0 || r.expenses() > 0.0)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseTotals {
    pub total_fuel_cost: f64,
    pub total_maintenance_cost: f64,
    pub total_liters: f64,
    /// Completed trips only
    pub total_revenue: f64,
}

pub fn expense_totals(snapshot: &FleetSnapshot) -> ExpenseTotals {
    ExpenseTotals {
        total_fuel_cost: snapshot.fuel_logs.iter().map(|f| f.cost).sum(),
        total_maintenance_cost: snapshot.maintenance_logs.iter().map(|m| m.cost).sum(),
        total_liters: snapshot.fuel_logs.iter().map(|f| f.liters).sum(),
        total_revenue: snapshot
            .trips
            .iter()
            .filter(|t| t.status == TripStatus::Completed)
            .map(|t| t.revenue)
            .sum(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount<S> {
    pub status: S,
    pub count: usize,
}

/// Every status in declaration order, zero counts included
fn distribution<S: Copy + PartialEq>(
    all: &[S],
    statuses: impl Iterator<Item = S> + Clone,
) -> Vec<StatusCount<S>> {
    all.iter()
        .map(|&status| StatusCount {
            status,
            count: statuses.clone().filter(|s| *s == status).count(),
        })
        .collect()
}

pub fn vehicle_status_distribution(snapshot: &FleetSnapshot) -> Vec<StatusCount<VehicleStatus>> {
    distribution(&VehicleStatus::ALL, snapshot.vehicles.iter().map(|v| v.status))
}

pub fn driver_status_distribution(snapshot: &FleetSnapshot) -> Vec<StatusCount<DriverStatus>> {
    distribution(&DriverStatus::ALL, snapshot.drivers.iter().map(|d| d.status))
}

pub fn trip_status_distribution(snapshot: &FleetSnapshot) -> Vec<StatusCount<TripStatus>> {
    distribution(&TripStatus::ALL, snapshot.trips.iter().map(|t| t.status))
}

/// Safety score band used for driver badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyBand {
    /// 90 and above
    Good,
    /// 70 to 89
    Fair,
    Poor,
}

impl SafetyBand {
    pub fn of(score: u8) -> Self {
        match score {
            90.. => SafetyBand::Good,
            70..=89 => SafetyBand::Fair,
            _ => SafetyBand::Poor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverPerformance {
    pub driver_id: DriverId,
    pub name: String,
    pub safety_score: u8,
    pub safety_band: SafetyBand,
    pub trips_completed: u32,
    pub trips_total: u32,
    /// Percentage, one decimal
    pub completion_rate: f64,
}

pub fn driver_performance(snapshot: &FleetSnapshot) -> Vec<DriverPerformance> {
    snapshot
        .drivers
        .iter()
        .map(|d| DriverPerformance {
            driver_id: d.id.clone(),
            name: d.name.clone(),
            safety_score: d.safety_score,
            safety_band: SafetyBand::of(d.safety_score),
            trips_completed: d.trips_completed,
            trips_total: d.trips_total,
            completion_rate: round1(d.completion_rate()),
        })
        .collect()
}
