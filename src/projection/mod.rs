// Copyright (c) 2025 - Cowboy AI, Inc.
//! Query / Aggregation Layer
//!
//! Read-only views over a [`FleetSnapshot`](crate::store::FleetSnapshot).
//! Every function is pure and recomputes from the snapshot on each call;
//! nothing here mutates or caches.
//!
//! ```text
//! FleetStore ──snapshot()──▶ FleetSnapshot ──project──▶ KPIs / reports
//! ```
//!
//! # Rounding
//!
//! Ratios (utilization, km/l, ROI %) are rounded to one decimal place.
//! Currency sums are left unrounded.
//!
//! # Modules
//!
//! - [`dashboard`] - headline KPIs, utilization, recent trips
//! - [`analytics`] - fuel efficiency, ROI, cost breakdown, distributions
//! - [`availability`] - license alerts and dispatch candidates

pub mod analytics;
pub mod availability;
pub mod dashboard;

pub use analytics::{
    cost_breakdown, driver_performance, driver_status_distribution, expense_totals,
    fuel_efficiency, roi_report, trip_status_distribution, vehicle_roi,
    vehicle_status_distribution, DriverPerformance, ExpenseTotals, SafetyBand, StatusCount,
    VehicleCosts, VehicleFuelEfficiency, VehicleRoi,
};
pub use availability::{
    available_drivers, available_vehicles, license_alerts, DispatchCandidates, LicenseAlert,
    LicenseAlertLevel,
};
pub use dashboard::{active_fleet_count, dashboard_kpis, recent_trips, utilization_rate, DashboardKpis};

/// Round to one decimal place
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::round1;

    #[test]
    fn test_round1() {
        assert_eq!(round1(66.666), 66.7);
        assert_eq!(round1(0.04), 0.0);
        assert_eq!(round1(2.25), 2.3);
    }
}
