// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for fleet-ops
//!
//! Deterministic vehicles, drivers and commands for the integration tests.
//! Every date is a fixed constant so runs are reproducible.
//!
//! # Design Principles
//! - No `Utc::now()`: dispatch and completion dates are explicit
//! - Services start from the demo fleet or from a fresh store built here
//! - Tests go through the service, never through store internals

#![allow(dead_code)]

use chrono::NaiveDate;

use fleet_ops::aggregate::{DispatchTripCommand, LogMaintenanceCommand};
use fleet_ops::domain::{
    DriverId, IdStrategy, MaintenanceStatus, NewDriver, NewVehicle, VehicleId, VehicleType,
};
use fleet_ops::{seed, FleetConfig, FleetService};

/// Dispatch date used throughout the scenarios
pub fn dispatch_date() -> NaiveDate {
    date(2026, 3, 1)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// The demo fleet under the default configuration
pub fn demo_service() -> FleetService {
    demo_service_with(FleetConfig::default())
}

pub fn demo_service_with(config: FleetConfig) -> FleetService {
    let store = seed::demo_fleet(IdStrategy::Sequential).expect("demo fleet loads");
    FleetService::with_store(config, store)
}

/// An empty fleet under the default configuration
pub fn empty_service() -> FleetService {
    FleetService::new(FleetConfig::default())
}

pub fn van(plate: &str) -> NewVehicle {
    NewVehicle {
        name: format!("Van {plate}"),
        vehicle_type: VehicleType::Van,
        license_plate: plate.to_string(),
        max_capacity: 500.0,
        odometer: 67200.0,
        region: "East".to_string(),
        acquisition_cost: 35000.0,
        added_date: date(2023, 3, 22),
    }
}

pub fn truck(plate: &str) -> NewVehicle {
    NewVehicle {
        name: format!("Truck {plate}"),
        vehicle_type: VehicleType::Truck,
        license_plate: plate.to_string(),
        max_capacity: 10000.0,
        odometer: 45600.0,
        region: "South".to_string(),
        acquisition_cost: 110000.0,
        added_date: date(2024, 5, 1),
    }
}

pub fn driver(name: &str, categories: &[VehicleType], license_expiry: NaiveDate) -> NewDriver {
    let handle = name.to_lowercase().replace(' ', ".");
    NewDriver {
        name: name.to_string(),
        email: format!("{handle}@fleet.test"),
        phone: "+1-555-0199".to_string(),
        license_number: format!("DL-{handle}"),
        license_expiry,
        license_categories: categories.iter().copied().collect(),
        joined_date: date(2022, 1, 10),
    }
}

/// A van driver whose license is valid well past the dispatch date
pub fn van_driver(name: &str) -> NewDriver {
    driver(name, &[VehicleType::Van, VehicleType::Bike], date(2027, 6, 30))
}

pub fn dispatch(vehicle_id: &VehicleId, driver_id: &DriverId, cargo_weight: f64) -> DispatchTripCommand {
    DispatchTripCommand {
        vehicle_id: vehicle_id.clone(),
        driver_id: driver_id.clone(),
        origin: "Warehouse A".to_string(),
        destination: "Market F".to_string(),
        cargo_weight,
        cargo_description: "Food Supplies".to_string(),
        revenue: 650.0,
        date: dispatch_date(),
    }
}

pub fn maintenance(vehicle_id: &VehicleId, cost: f64, status: MaintenanceStatus) -> LogMaintenanceCommand {
    LogMaintenanceCommand {
        vehicle_id: vehicle_id.clone(),
        service_type: "Oil Change".to_string(),
        description: "Synthetic oil and filter".to_string(),
        cost,
        date: dispatch_date(),
        status,
    }
}
