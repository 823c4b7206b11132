// Copyright (c) 2025 - Cowboy AI, Inc.
//! Fleet Domain Events
//!
//! Events are immutable facts produced by command handlers. A command
//! yields the complete list of its events before anything is written; the
//! service then applies the list to the store in one commit.
//!
//! # Event Flow
//!
//! ```text
//! Command → handle_*() → [FleetEvent] → commit → FleetStore
//!  (intent)   (validate)   (what happens)  (CAS + apply)
//! ```
//!
//! Status events carry both `from` and `to` so a reader of the history can
//! follow each entity's lifecycle without replaying the store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Driver, DriverId, DriverPatch, DriverStatus, EntityKind, FuelLog, MaintenanceLog,
    MaintenanceLogId, MaintenanceStatus, Trip, TripId, TripStatus, Vehicle, VehicleId,
    VehiclePatch, VehicleStatus,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FleetEvent {
    VehicleRegistered {
        vehicle: Vehicle,
    },
    VehicleUpdated {
        vehicle_id: VehicleId,
        patch: VehiclePatch,
    },
    VehicleStatusChanged {
        vehicle_id: VehicleId,
        from: VehicleStatus,
        to: VehicleStatus,
    },
    /// Odometer set from a completed trip
    VehicleOdometerRecorded {
        vehicle_id: VehicleId,
        odometer: f64,
    },

    DriverRegistered {
        driver: Driver,
    },
    DriverUpdated {
        driver_id: DriverId,
        patch: DriverPatch,
    },
    DriverStatusChanged {
        driver_id: DriverId,
        from: DriverStatus,
        to: DriverStatus,
    },
    /// Absolute counter values after the change
    DriverTripCountersChanged {
        driver_id: DriverId,
        trips_completed: u32,
        trips_total: u32,
    },

    /// A trip record entering the store, in whatever status it was created with
    TripCreated {
        trip: Trip,
    },
    /// A draft trip activated
    TripDispatched {
        trip_id: TripId,
        start_odometer: f64,
    },
    TripCompleted {
        trip_id: TripId,
        end_odometer: f64,
        completed_date: NaiveDate,
    },
    TripCancelled {
        trip_id: TripId,
        from: TripStatus,
    },

    MaintenanceLogged {
        log: MaintenanceLog,
    },
    MaintenanceStatusChanged {
        log_id: MaintenanceLogId,
        from: MaintenanceStatus,
        to: MaintenanceStatus,
    },

    FuelLogged {
        log: FuelLog,
    },
}

impl FleetEvent {
    /// Entity the event writes to
    pub fn subject(&self) -> (EntityKind, &str) {
        use FleetEvent::*;

        match self {
            VehicleRegistered { vehicle } => (EntityKind::Vehicle, vehicle.id.as_str()),
            VehicleUpdated { vehicle_id, .. }
            | VehicleStatusChanged { vehicle_id, .. }
            | VehicleOdometerRecorded { vehicle_id, .. } => {
                (EntityKind::Vehicle, vehicle_id.as_str())
            }
            DriverRegistered { driver } => (EntityKind::Driver, driver.id.as_str()),
            DriverUpdated { driver_id, .. }
            | DriverStatusChanged { driver_id, .. }
            | DriverTripCountersChanged { driver_id, .. } => {
                (EntityKind::Driver, driver_id.as_str())
            }
            TripCreated { trip } => (EntityKind::Trip, trip.id.as_str()),
            TripDispatched { trip_id, .. }
            | TripCompleted { trip_id, .. }
            | TripCancelled { trip_id, .. } => (EntityKind::Trip, trip_id.as_str()),
            MaintenanceLogged { log } => (EntityKind::MaintenanceLog, log.id.as_str()),
            MaintenanceStatusChanged { log_id, .. } => {
                (EntityKind::MaintenanceLog, log_id.as_str())
            }
            FuelLogged { log } => (EntityKind::FuelLog, log.id.as_str()),
        }
    }

    /// True for events that insert a new record rather than modify one
    pub fn creates_record(&self) -> bool {
        matches!(
            self,
            FleetEvent::VehicleRegistered { .. }
                | FleetEvent::DriverRegistered { .. }
                | FleetEvent::TripCreated { .. }
                | FleetEvent::MaintenanceLogged { .. }
                | FleetEvent::FuelLogged { .. }
        )
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        use FleetEvent::*;

        match self {
            VehicleRegistered { .. } => "vehicle_registered",
            VehicleUpdated { .. } => "vehicle_updated",
            VehicleStatusChanged { .. } => "vehicle_status_changed",
            VehicleOdometerRecorded { .. } => "vehicle_odometer_recorded",
            DriverRegistered { .. } => "driver_registered",
            DriverUpdated { .. } => "driver_updated",
            DriverStatusChanged { .. } => "driver_status_changed",
            DriverTripCountersChanged { .. } => "driver_trip_counters_changed",
            TripCreated { .. } => "trip_created",
            TripDispatched { .. } => "trip_dispatched",
            TripCompleted { .. } => "trip_completed",
            TripCancelled { .. } => "trip_cancelled",
            MaintenanceLogged { .. } => "maintenance_logged",
            MaintenanceStatusChanged { .. } => "maintenance_status_changed",
            FuelLogged { .. } => "fuel_logged",
        }
    }
}

/// An applied event as kept in the service's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub event_id: Uuid,

    /// Shared by every event of one command
    pub correlation_id: Uuid,

    pub recorded_at: DateTime<Utc>,

    pub event: FleetEvent,
}

impl RecordedEvent {
    pub fn new(event: FleetEvent, correlation_id: Uuid, recorded_at: DateTime<Utc>) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            correlation_id,
            recorded_at,
            event,
        }
    }
}
