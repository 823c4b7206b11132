// Copyright (c) 2025 - Cowboy AI, Inc.
//! Demo fleet
//!
//! The sample data the dashboard ships with: eight vehicles, six drivers,
//! six trips, five maintenance logs and seven fuel logs. Records are
//! inserted as-is with their published ids; sequential ids minted afterwards
//! continue from there (`v9`, `d7`, `t7`, ...).

use chrono::NaiveDate;

use crate::domain::{
    Driver, DriverStatus, FuelLog, IdStrategy, MaintenanceLog, MaintenanceStatus, Trip,
    TripStatus, Vehicle, VehicleStatus, VehicleType,
};
use crate::errors::{FleetError, FleetResult};
use crate::store::FleetStore;

fn date(value: &str) -> FleetResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| FleetError::Configuration(format!("invalid seed date {value}: {e}")))
}

#[allow(clippy::too_many_arguments)]
fn vehicle(
    id: &str,
    name: &str,
    vehicle_type: VehicleType,
    plate: &str,
    max_capacity: f64,
    odometer: f64,
    status: VehicleStatus,
    region: &str,
    acquisition_cost: f64,
    added: &str,
) -> FleetResult<Vehicle> {
    Ok(Vehicle {
        id: id.into(),
        name: name.to_string(),
        vehicle_type,
        license_plate: plate.to_string(),
        max_capacity,
        odometer,
        status,
        region: region.to_string(),
        acquisition_cost,
        added_date: date(added)?,
    })
}

fn vehicles() -> FleetResult<Vec<Vehicle>> {
    use VehicleStatus::*;
    use VehicleType::*;

    Ok(vec![
        vehicle("v1", "Truck-01", Truck, "TRK-1001", 5000.0, 125400.0, OnTrip, "North", 85000.0, "2023-01-15")?,
        vehicle("v2", "Van-05", Van, "VAN-5005", 500.0, 67200.0, Available, "East", 35000.0, "2023-03-22")?,
        vehicle("v3", "Truck-02", Truck, "TRK-1002", 8000.0, 210300.0, InShop, "North", 95000.0, "2022-06-10")?,
        vehicle("v4", "Bike-01", Bike, "BKE-2001", 20.0, 15400.0, Available, "South", 5000.0, "2024-01-05")?,
        vehicle("v5", "Van-02", Van, "VAN-5002", 600.0, 89100.0, OnTrip, "West", 38000.0, "2023-07-18")?,
        vehicle("v6", "Truck-03", Truck, "TRK-1003", 10000.0, 45600.0, Available, "South", 110000.0, "2024-05-01")?,
        vehicle("v7", "Van-03", Van, "VAN-5003", 450.0, 102000.0, Retired, "East", 32000.0, "2021-11-20")?,
        vehicle("v8", "Bike-02", Bike, "BKE-2002", 25.0, 8700.0, OnTrip, "North", 5500.0, "2024-03-12")?,
    ])
}

#[allow(clippy::too_many_arguments)]
fn driver(
    id: &str,
    name: &str,
    license_number: &str,
    expiry: &str,
    categories: &[VehicleType],
    status: DriverStatus,
    safety_score: u8,
    trips: (u32, u32),
    joined: &str,
) -> FleetResult<Driver> {
    let first_name = name.split(' ').next().unwrap_or(name).to_lowercase();
    Ok(Driver {
        id: id.into(),
        name: name.to_string(),
        email: format!("{first_name}@fleet.com"),
        phone: format!("+1-555-01{:02}", id.trim_start_matches('d').parse::<u32>().unwrap_or(0)),
        license_number: license_number.to_string(),
        license_expiry: date(expiry)?,
        license_categories: categories.iter().copied().collect(),
        status,
        safety_score,
        trips_completed: trips.0,
        trips_total: trips.1,
        joined_date: date(joined)?,
    })
}

fn drivers() -> FleetResult<Vec<Driver>> {
    use DriverStatus::*;
    use VehicleType::*;

    Ok(vec![
        driver("d1", "Alex Johnson", "DL-001", "2026-08-15", &[Truck, Van], OnTrip, 92, (145, 150), "2022-03-01")?,
        driver("d2", "Maria Santos", "DL-002", "2026-12-01", &[Van, Bike], OnDuty, 97, (210, 215), "2021-07-15")?,
        driver("d3", "James Wilson", "DL-003", "2025-03-10", &[Truck], OffDuty, 78, (89, 102), "2023-01-20")?,
        driver("d4", "Sarah Chen", "DL-004", "2027-06-20", &[Truck, Van, Bike], OnTrip, 95, (178, 180), "2022-09-05")?,
        driver("d5", "Mike Brown", "DL-005", "2024-11-30", &[Bike], Suspended, 55, (45, 60), "2023-06-10")?,
        driver("d6", "Priya Patel", "DL-006", "2027-02-14", &[Bike, Van], OnTrip, 88, (64, 66), "2024-02-01")?,
    ])
}

#[allow(clippy::too_many_arguments)]
fn trip(
    id: &str,
    vehicle_id: &str,
    driver_id: &str,
    route: (&str, &str),
    cargo: (f64, &str),
    status: TripStatus,
    created: &str,
    completed: Option<&str>,
    odometer: (Option<f64>, Option<f64>),
    revenue: f64,
) -> FleetResult<Trip> {
    Ok(Trip {
        id: id.into(),
        vehicle_id: vehicle_id.into(),
        driver_id: driver_id.into(),
        origin: route.0.to_string(),
        destination: route.1.to_string(),
        cargo_weight: cargo.0,
        cargo_description: cargo.1.to_string(),
        status,
        created_date: date(created)?,
        completed_date: completed.map(date).transpose()?,
        start_odometer: odometer.0,
        end_odometer: odometer.1,
        revenue,
    })
}

fn trips() -> FleetResult<Vec<Trip>> {
    use TripStatus::*;

    Ok(vec![
        trip("t1", "v1", "d1", ("Warehouse A", "Distribution Center B"), (4500.0, "Electronics"), Dispatched, "2026-02-20", None, (Some(125000.0), None), 2500.0)?,
        trip("t2", "v5", "d4", ("Port Terminal", "Retail Hub C"), (450.0, "Textiles"), Dispatched, "2026-02-19", None, (Some(88900.0), None), 800.0)?,
        trip("t3", "v8", "d6", ("Store D", "Customer E"), (15.0, "Documents"), Dispatched, "2026-02-21", None, (Some(8600.0), None), 50.0)?,
        trip("t4", "v2", "d2", ("Warehouse A", "Market F"), (380.0, "Food Supplies"), Completed, "2026-02-15", Some("2026-02-16"), (Some(66800.0), Some(67200.0)), 650.0)?,
        trip("t5", "v6", "d3", ("Factory G", "Depot H"), (7500.0, "Machinery Parts"), Completed, "2026-02-10", Some("2026-02-12"), (Some(44800.0), Some(45600.0)), 4200.0)?,
        trip("t6", "v4", "d5", ("Office I", "Client J"), (10.0, "Samples"), Cancelled, "2026-02-18", None, (None, None), 0.0)?,
    ])
}

fn maintenance_logs() -> FleetResult<Vec<MaintenanceLog>> {
    use MaintenanceStatus::*;

    let log = |id: &str, vehicle_id: &str, service_type: &str, description: &str, cost: f64, on: &str, status| {
        Ok::<_, FleetError>(MaintenanceLog {
            id: id.into(),
            vehicle_id: vehicle_id.into(),
            service_type: service_type.to_string(),
            description: description.to_string(),
            cost,
            date: date(on)?,
            status,
        })
    };

    Ok(vec![
        log("m1", "v3", "Oil Change", "Full synthetic oil change + filter replacement", 350.0, "2026-02-19", InProgress)?,
        log("m2", "v1", "Tire Rotation", "Rotate and balance all tires", 200.0, "2026-02-05", Completed)?,
        log("m3", "v5", "Brake Inspection", "Full brake system inspection and pad replacement", 800.0, "2026-01-28", Completed)?,
        log("m4", "v2", "Engine Tune-up", "Scheduled 50k service tune-up", 600.0, "2026-01-22", Completed)?,
        log("m5", "v7", "Transmission Repair", "Major transmission overhaul", 4500.0, "2026-01-15", Completed)?,
    ])
}

fn fuel_logs() -> FleetResult<Vec<FuelLog>> {
    let fuel = |id: &str, vehicle_id: &str, trip_id: Option<&str>, liters: f64, cost: f64, on: &str, odometer: f64| {
        Ok::<_, FleetError>(FuelLog {
            id: id.into(),
            vehicle_id: vehicle_id.into(),
            trip_id: trip_id.map(Into::into),
            liters,
            cost,
            date: date(on)?,
            odometer,
        })
    };

    Ok(vec![
        fuel("f1", "v1", Some("t1"), 120.0, 180.0, "2026-02-20", 125200.0)?,
        fuel("f2", "v5", Some("t2"), 45.0, 67.5, "2026-02-19", 89000.0)?,
        fuel("f3", "v2", Some("t4"), 38.0, 57.0, "2026-02-15", 67000.0)?,
        fuel("f4", "v6", Some("t5"), 180.0, 270.0, "2026-02-10", 45200.0)?,
        fuel("f5", "v8", None, 5.0, 7.5, "2026-02-18", 8650.0)?,
        fuel("f6", "v1", None, 110.0, 165.0, "2026-02-12", 124800.0)?,
        fuel("f7", "v3", None, 150.0, 225.0, "2026-02-08", 210000.0)?,
    ])
}

/// The demo fleet in a fresh store
pub fn demo_fleet(id_strategy: IdStrategy) -> FleetResult<FleetStore> {
    let mut store = FleetStore::new(id_strategy);
    for record in vehicles()? {
        store.insert(record)?;
    }
    for record in drivers()? {
        store.insert(record)?;
    }
    for record in trips()? {
        store.insert(record)?;
    }
    for record in maintenance_logs()? {
        store.insert(record)?;
    }
    for record in fuel_logs()? {
        store.insert(record)?;
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DriverId, VehicleId};

    #[test]
    fn test_demo_fleet_loads() {
        let store = demo_fleet(IdStrategy::Sequential).unwrap();
        assert_eq!(store.vehicles().len(), 8);
        assert_eq!(store.drivers().len(), 6);
        assert_eq!(store.trips().len(), 6);
        assert_eq!(store.maintenance_logs().len(), 5);
        assert_eq!(store.fuel_logs().len(), 7);
        assert_eq!(store.next_id::<Vehicle>().as_str(), "v9");
    }

    #[test]
    fn test_demo_statuses_agree_with_trips() {
        let store = demo_fleet(IdStrategy::Sequential).unwrap();
        for vehicle in store.vehicles() {
            let held = store.active_trip_for_vehicle(&vehicle.id).is_some();
            assert_eq!(held, vehicle.status == VehicleStatus::OnTrip, "{}", vehicle.id);
        }
        for driver in store.drivers() {
            let held = store.active_trip_for_driver(&driver.id).is_some();
            assert_eq!(held, driver.status == DriverStatus::OnTrip, "{}", driver.id);
        }
        assert_eq!(
            store.require(&VehicleId::new("v2")).unwrap().odometer,
            67200.0
        );
        assert_eq!(
            store.require(&DriverId::new("d2")).unwrap().status,
            DriverStatus::OnDuty
        );
    }
}
