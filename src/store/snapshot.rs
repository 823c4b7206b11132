// Copyright (c) 2025 - Cowboy AI, Inc.
//! Owned, serializable copy of the store for the query layer

use serde::{Deserialize, Serialize};

use crate::domain::{
    Driver, DriverId, FuelLog, MaintenanceLog, Trip, TripId, TripStatus, Vehicle, VehicleId,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSnapshot {
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub trips: Vec<Trip>,
    pub maintenance_logs: Vec<MaintenanceLog>,
    pub fuel_logs: Vec<FuelLog>,
}

impl FleetSnapshot {
    pub fn vehicle(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| &v.id == id)
    }

    pub fn driver(&self, id: &DriverId) -> Option<&Driver> {
        self.drivers.iter().find(|d| &d.id == id)
    }

    pub fn trip(&self, id: &TripId) -> Option<&Trip> {
        self.trips.iter().find(|t| &t.id == id)
    }

    /// Trips currently holding a vehicle and a driver
    pub fn active_trips(&self) -> impl Iterator<Item = &Trip> {
        self.trips.iter().filter(|t| t.status == TripStatus::Dispatched)
    }

    pub fn trips_for_vehicle<'a>(
        &'a self,
        vehicle_id: &'a VehicleId,
    ) -> impl Iterator<Item = &'a Trip> + 'a {
        self.trips.iter().filter(move |t| &t.vehicle_id == vehicle_id)
    }

    pub fn fuel_logs_for_vehicle<'a>(
        &'a self,
        vehicle_id: &'a VehicleId,
    ) -> impl Iterator<Item = &'a FuelLog> + 'a {
        self.fuel_logs.iter().filter(move |f| &f.vehicle_id == vehicle_id)
    }

    pub fn maintenance_for_vehicle<'a>(
        &'a self,
        vehicle_id: &'a VehicleId,
    ) -> impl Iterator<Item = &'a MaintenanceLog> + 'a {
        self.maintenance_logs
            .iter()
            .filter(move |m| &m.vehicle_id == vehicle_id)
    }
}
