// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event application and commit
//!
//! `apply_event` does no business validation; that already happened in the
//! handler. `commit` is the only path from a [`CommandOutcome`] into the
//! store and is all-or-nothing.

use crate::aggregate::handlers::CommandOutcome;
use crate::domain::invariants::validate_unique_plate;
use crate::domain::{IdStrategy, TripStatus, VehiclePatch};
use crate::errors::{FleetError, FleetResult};
use crate::events::FleetEvent;
use crate::store::FleetStore;

/// Write one event into the store
pub fn apply_event(store: &mut FleetStore, event: &FleetEvent) -> FleetResult<()> {
    use FleetEvent::*;

    match event {
        VehicleRegistered { vehicle } => store.insert(vehicle.clone()),
        VehicleUpdated { vehicle_id, patch } => {
            store.update(vehicle_id, patch.clone()).map(|_| ())
        }
        VehicleStatusChanged { vehicle_id, to, .. } => {
            store.modify(vehicle_id, |v| v.status = *to).map(|_| ())
        }
        VehicleOdometerRecorded {
            vehicle_id,
            odometer,
        } => store.modify(vehicle_id, |v| v.odometer = *odometer).map(|_| ()),

        DriverRegistered { driver } => store.insert(driver.clone()),
        DriverUpdated { driver_id, patch } => store.update(driver_id, patch.clone()).map(|_| ()),
        DriverStatusChanged { driver_id, to, .. } => {
            store.modify(driver_id, |d| d.status = *to).map(|_| ())
        }
        DriverTripCountersChanged {
            driver_id,
            trips_completed,
            trips_total,
        } => store
            .modify(driver_id, |d| {
                d.trips_completed = *trips_completed;
                d.trips_total = *trips_total;
            })
            .map(|_| ()),

        TripCreated { trip } => store.insert(trip.clone()),
        TripDispatched {
            trip_id,
            start_odometer,
        } => store
            .modify(trip_id, |t| {
                t.status = TripStatus::Dispatched;
                t.start_odometer = Some(*start_odometer);
            })
            .map(|_| ()),
        TripCompleted {
            trip_id,
            end_odometer,
            completed_date,
        } => store
            .modify(trip_id, |t| {
                t.status = TripStatus::Completed;
                t.end_odometer = Some(*end_odometer);
                t.completed_date = Some(*completed_date);
            })
            .map(|_| ()),
        TripCancelled { trip_id, .. } => store
            .modify(trip_id, |t| t.status = TripStatus::Cancelled)
            .map(|_| ()),

        MaintenanceLogged { log } => store.insert(log.clone()),
        MaintenanceStatusChanged { log_id, to, .. } => {
            store.modify(log_id, |m| m.status = *to).map(|_| ())
        }

        FuelLogged { log } => store.insert(log.clone()),
    }
}

/// Re-check what a plan assumed about records it did not read
fn check_applicable(store: &FleetStore, event: &FleetEvent) -> FleetResult<()> {
    if event.creates_record() {
        let (kind, id) = event.subject();
        let actual = store.version_of(kind, id);
        if actual != 0 {
            return Err(FleetError::ConcurrencyConflict {
                kind,
                id: id.to_string(),
                expected: 0,
                actual,
            });
        }
    }

    match event {
        FleetEvent::VehicleRegistered { vehicle } => {
            validate_unique_plate(&vehicle.license_plate, store.vehicles(), None)
        }
        FleetEvent::VehicleUpdated {
            vehicle_id,
            patch:
                VehiclePatch {
                    license_plate: Some(plate),
                    ..
                },
        } => validate_unique_plate(plate, store.vehicles(), Some(vehicle_id)),
        _ => Ok(()),
    }
}

/// Apply a planned command atomically
///
/// 1. Every version the plan read must still be current (compare-and-swap)
/// 2. Records the plan creates must not exist yet; plates stay unique
/// 3. Events are applied to a staged copy that replaces the store only when
///    all of them went through
pub fn commit(store: &mut FleetStore, outcome: &CommandOutcome) -> FleetResult<()> {
    for read in &outcome.reads {
        store.check_version(read.kind, &read.id, read.version)?;
    }
    for event in &outcome.events {
        check_applicable(store, event)?;
    }

    let mut staged = store.clone();
    for event in &outcome.events {
        apply_event(&mut staged, event)?;
    }
    *store = staged;
    Ok(())
}

/// Rebuild a store by folding events in order
pub fn replay<'a>(
    id_strategy: IdStrategy,
    events: impl IntoIterator<Item = &'a FleetEvent>,
) -> FleetResult<FleetStore> {
    events
        .into_iter()
        .try_fold(FleetStore::new(id_strategy), |mut store, event| {
            apply_event(&mut store, event)?;
            Ok(store)
        })
}
