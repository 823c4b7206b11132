// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Command Handlers
//!
//! Command handlers are pure functions that:
//! 1. Read the records they need from the store
//! 2. Validate business rules and consult the lifecycle tables
//! 3. Return the complete list of events (success) or a `FleetError`
//!
//! # Handler Pattern
//!
//! ```text
//! handle_*(&FleetStore, Command) → Result<CommandOutcome, FleetError>
//! ```
//!
//! Handlers never write. Every record a handler reads is noted with its
//! version in [`CommandOutcome::reads`] so the commit can refuse to apply a
//! plan whose inputs moved in the meantime.

use serde::{Deserialize, Serialize};

use crate::aggregate::commands::*;
use crate::config::RulePolicy;
use crate::domain::invariants::{
    validate_assignment, validate_non_negative, validate_odometer_progress, validate_unique_plate,
    validate_vehicle_available,
};
use crate::domain::{
    Driver, DriverPatch, Entity, EntityId, EntityKind, FuelLog, MaintenanceLog,
    MaintenanceLogId, NewMaintenanceLog, Patch, Trip, TripStatus, Vehicle, VehiclePatch,
    VehicleStatus,
};
use crate::errors::{FleetError, FleetResult};
use crate::events::FleetEvent;
use crate::state_machine::{
    DriverCommand, MaintenanceCommand, StateMachine, TransitionError, TripCommand, VehicleCommand,
};
use crate::store::{FleetStore, HasCollection};

/// Version of a record as seen while planning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionExpectation {
    pub kind: EntityKind,
    pub id: String,
    pub version: u64,
}

/// Everything a successful command wants to write, not yet applied
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    /// Events in application order
    pub events: Vec<FleetEvent>,

    /// Records the plan depends on
    pub reads: Vec<VersionExpectation>,

    /// Accepted-but-suspicious conditions (e.g. odometer going backwards)
    pub warnings: Vec<String>,

    /// The record the command is about
    pub subject: (EntityKind, String),
}

impl CommandOutcome {
    pub fn subject_id(&self) -> &str {
        &self.subject.1
    }
}

/// Accumulates reads, events and warnings while a handler runs
struct Plan<'s> {
    store: &'s FleetStore,
    reads: Vec<VersionExpectation>,
    events: Vec<FleetEvent>,
    warnings: Vec<String>,
}

impl<'s> Plan<'s> {
    fn new(store: &'s FleetStore) -> Self {
        Self {
            store,
            reads: Vec::new(),
            events: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn read<E: Entity>(&mut self, id: &EntityId<E>) -> FleetResult<&'s E>
    where
        FleetStore: HasCollection<E>,
    {
        let store = self.store;
        let entity = store.require(id)?;
        let seen = self
            .reads
            .iter()
            .any(|r| r.kind == E::KIND && r.id == id.as_str());
        if !seen {
            self.reads.push(VersionExpectation {
                kind: E::KIND,
                id: id.as_str().to_string(),
                version: store.version_of(E::KIND, id.as_str()),
            });
        }
        Ok(entity)
    }

    fn emit(&mut self, event: FleetEvent) {
        self.events.push(event);
    }

    fn warn(&mut self, kind: EntityKind, id: &str, warnings: Vec<String>) {
        self.warnings
            .extend(warnings.into_iter().map(|w| format!("{kind} {id}: {w}")));
    }

    fn vehicle(&mut self, vehicle: &Vehicle, input: VehicleCommand) -> FleetResult<VehicleStatus> {
        let (next, output) = vehicle
            .status
            .transition(&input)
            .map_err(|e| FleetError::transition(EntityKind::Vehicle, vehicle.id.as_str(), e))?;
        self.warn(EntityKind::Vehicle, vehicle.id.as_str(), output.warnings);
        if output.changed && next != vehicle.status {
            self.emit(FleetEvent::VehicleStatusChanged {
                vehicle_id: vehicle.id.clone(),
                from: vehicle.status,
                to: next,
            });
        }
        Ok(next)
    }

    fn driver(&mut self, driver: &Driver, input: DriverCommand) -> FleetResult<()> {
        let (next, output) = driver
            .status
            .transition(&input)
            .map_err(|e| FleetError::transition(EntityKind::Driver, driver.id.as_str(), e))?;
        self.warn(EntityKind::Driver, driver.id.as_str(), output.warnings);
        if output.changed && next != driver.status {
            self.emit(FleetEvent::DriverStatusChanged {
                driver_id: driver.id.clone(),
                from: driver.status,
                to: next,
            });
        }
        Ok(())
    }

    fn trip(&mut self, trip: &Trip, input: TripCommand) -> FleetResult<TripStatus> {
        let (next, _) = trip
            .status
            .transition(&input)
            .map_err(|e| FleetError::transition(EntityKind::Trip, trip.id.as_str(), e))?;
        Ok(next)
    }

    fn finish(self, kind: EntityKind, id: &str) -> CommandOutcome {
        CommandOutcome {
            events: self.events,
            reads: self.reads,
            warnings: self.warnings,
            subject: (kind, id.to_string()),
        }
    }
}

/// Route any command to its handler
pub fn handle(
    store: &FleetStore,
    policy: &RulePolicy,
    command: FleetCommand,
) -> FleetResult<CommandOutcome> {
    match command {
        FleetCommand::AddVehicle(c) => handle_add_vehicle(store, c),
        FleetCommand::UpdateVehicle(c) => handle_update_vehicle(store, c),
        FleetCommand::RetireVehicle(c) => handle_retire_vehicle(store, c),
        FleetCommand::ReactivateVehicle(c) => handle_reactivate_vehicle(store, c),
        FleetCommand::AddDriver(c) => handle_add_driver(store, c),
        FleetCommand::UpdateDriver(c) => handle_update_driver(store, c),
        FleetCommand::SetDriverDutyStatus(c) => handle_set_driver_duty_status(store, c),
        FleetCommand::DispatchTrip(c) => handle_dispatch_trip(store, c),
        FleetCommand::CreateDraftTrip(c) => handle_create_draft_trip(store, c),
        FleetCommand::DispatchDraftTrip(c) => handle_dispatch_draft_trip(store, c),
        FleetCommand::CompleteTrip(c) => handle_complete_trip(store, policy, c),
        FleetCommand::CancelTrip(c) => handle_cancel_trip(store, c),
        FleetCommand::LogMaintenance(c) => handle_log_maintenance(store, policy, c),
        FleetCommand::UpdateMaintenanceStatus(c) => {
            handle_update_maintenance_status(store, policy, c)
        }
        FleetCommand::AddFuelLog(c) => handle_add_fuel_log(store, c),
    }
}

fn validate_vehicle_patch(patch: &VehiclePatch) -> FleetResult<()> {
    if let Some(capacity) = patch.max_capacity {
        validate_non_negative("maxCapacity", capacity)?;
    }
    if let Some(odometer) = patch.odometer {
        validate_non_negative("odometer", odometer)?;
    }
    if let Some(cost) = patch.acquisition_cost {
        validate_non_negative("acquisitionCost", cost)?;
    }
    Ok(())
}

/// Handle AddVehicle
///
/// # Business Rules
/// - License plate unique across the fleet
/// - Capacity, odometer and acquisition cost non-negative
pub fn handle_add_vehicle(
    store: &FleetStore,
    command: AddVehicleCommand,
) -> FleetResult<CommandOutcome> {
    let draft = command.vehicle;
    validate_non_negative("maxCapacity", draft.max_capacity)?;
    validate_non_negative("odometer", draft.odometer)?;
    validate_non_negative("acquisitionCost", draft.acquisition_cost)?;
    validate_unique_plate(&draft.license_plate, store.vehicles(), None)?;

    let vehicle = Vehicle::from_draft(store.next_id(), draft);
    let id = vehicle.id.clone();

    let mut plan = Plan::new(store);
    plan.emit(FleetEvent::VehicleRegistered { vehicle });
    Ok(plan.finish(EntityKind::Vehicle, id.as_str()))
}

/// Handle UpdateVehicle
///
/// Plain merge; a changed plate is checked for uniqueness. Status is not
/// patchable.
pub fn handle_update_vehicle(
    store: &FleetStore,
    command: UpdateVehicleCommand,
) -> FleetResult<CommandOutcome> {
    let mut plan = Plan::new(store);
    let vehicle = plan.read(&command.vehicle_id)?;

    validate_vehicle_patch(&command.patch)?;
    if let Some(plate) = &command.patch.license_plate {
        validate_unique_plate(plate, store.vehicles(), Some(&vehicle.id))?;
    }

    if !command.patch.is_empty() {
        plan.emit(FleetEvent::VehicleUpdated {
            vehicle_id: vehicle.id.clone(),
            patch: command.patch,
        });
    }
    Ok(plan.finish(EntityKind::Vehicle, vehicle.id.as_str()))
}

/// A vehicle held by a dispatched trip keeps its status until the trip ends
fn ensure_no_active_trip(store: &FleetStore, vehicle: &Vehicle) -> FleetResult<()> {
    if let Some(trip) = store.active_trip_for_vehicle(&vehicle.id) {
        return Err(FleetError::transition(
            EntityKind::Vehicle,
            vehicle.id.as_str(),
            TransitionError::BusinessRuleViolation(format!(
                "Vehicle is held by dispatched trip {}",
                trip.id
            )),
        ));
    }
    Ok(())
}

/// Handle RetireVehicle: Available or InShop → Retired
pub fn handle_retire_vehicle(
    store: &FleetStore,
    command: RetireVehicleCommand,
) -> FleetResult<CommandOutcome> {
    let mut plan = Plan::new(store);
    let vehicle = plan.read(&command.vehicle_id)?;
    ensure_no_active_trip(store, vehicle)?;
    plan.vehicle(vehicle, VehicleCommand::Retire)?;
    Ok(plan.finish(EntityKind::Vehicle, vehicle.id.as_str()))
}

/// Handle ReactivateVehicle: InShop or Retired → Available
pub fn handle_reactivate_vehicle(
    store: &FleetStore,
    command: ReactivateVehicleCommand,
) -> FleetResult<CommandOutcome> {
    let mut plan = Plan::new(store);
    let vehicle = plan.read(&command.vehicle_id)?;
    ensure_no_active_trip(store, vehicle)?;
    plan.vehicle(vehicle, VehicleCommand::Reactivate)?;
    Ok(plan.finish(EntityKind::Vehicle, vehicle.id.as_str()))
}

/// Handle AddDriver. New drivers start OnDuty with a full safety score.
pub fn handle_add_driver(
    store: &FleetStore,
    command: AddDriverCommand,
) -> FleetResult<CommandOutcome> {
    let driver = Driver::from_draft(store.next_id(), command.driver);
    let id = driver.id.clone();

    let mut plan = Plan::new(store);
    plan.emit(FleetEvent::DriverRegistered { driver });
    Ok(plan.finish(EntityKind::Driver, id.as_str()))
}

pub fn handle_update_driver(
    store: &FleetStore,
    command: UpdateDriverCommand,
) -> FleetResult<CommandOutcome> {
    let mut plan = Plan::new(store);
    let driver = plan.read(&command.driver_id)?;

    let patch: DriverPatch = command.patch;
    if !patch.is_empty() {
        plan.emit(FleetEvent::DriverUpdated {
            driver_id: driver.id.clone(),
            patch,
        });
    }
    Ok(plan.finish(EntityKind::Driver, driver.id.as_str()))
}

/// Handle SetDriverDutyStatus
///
/// # Business Rules
/// - Only OnDuty, OffDuty and Suspended can be set by hand
/// - A driver on a trip is released by the trip, not by hand
pub fn handle_set_driver_duty_status(
    store: &FleetStore,
    command: SetDriverDutyStatusCommand,
) -> FleetResult<CommandOutcome> {
    let mut plan = Plan::new(store);
    let driver = plan.read(&command.driver_id)?;
    plan.driver(driver, DriverCommand::SetDuty(command.status))?;
    Ok(plan.finish(EntityKind::Driver, driver.id.as_str()))
}

/// Status coupling shared by both dispatch paths
fn bind_vehicle_and_driver(
    plan: &mut Plan<'_>,
    vehicle: &Vehicle,
    driver: &Driver,
) -> FleetResult<()> {
    plan.vehicle(vehicle, VehicleCommand::Dispatch)?;
    plan.driver(driver, DriverCommand::Assign)?;
    plan.emit(FleetEvent::DriverTripCountersChanged {
        driver_id: driver.id.clone(),
        trips_completed: driver.trips_completed,
        trips_total: driver.trips_total + 1,
    });
    Ok(())
}

/// Handle DispatchTrip
///
/// # Business Rules (first failure wins)
/// 1. Vehicle exists and is Available
/// 2. Driver exists, is OnDuty, license valid on the dispatch date
/// 3. Cargo fits the vehicle
/// 4. Driver licensed for the vehicle type
///
/// # Events
/// `TripCreated` (Dispatched), vehicle → OnTrip, driver → OnTrip,
/// driver trip total + 1
pub fn handle_dispatch_trip(
    store: &FleetStore,
    command: DispatchTripCommand,
) -> FleetResult<CommandOutcome> {
    validate_non_negative("cargoWeight", command.cargo_weight)?;
    validate_non_negative("revenue", command.revenue)?;

    let mut plan = Plan::new(store);
    let vehicle = plan.read(&command.vehicle_id)?;
    validate_vehicle_available(vehicle)?;
    let driver = plan.read(&command.driver_id)?;
    validate_assignment(driver, vehicle, command.cargo_weight, command.date)?;

    let trip_id = store.next_id::<Trip>();
    plan.emit(FleetEvent::TripCreated {
        trip: Trip {
            id: trip_id.clone(),
            vehicle_id: vehicle.id.clone(),
            driver_id: driver.id.clone(),
            origin: command.origin,
            destination: command.destination,
            cargo_weight: command.cargo_weight,
            cargo_description: command.cargo_description,
            status: TripStatus::Dispatched,
            created_date: command.date,
            completed_date: None,
            start_odometer: Some(vehicle.odometer),
            end_odometer: None,
            revenue: command.revenue,
        },
    });
    bind_vehicle_and_driver(&mut plan, vehicle, driver)?;

    Ok(plan.finish(EntityKind::Trip, trip_id.as_str()))
}

/// Handle CreateDraftTrip: references must exist, nothing is bound
pub fn handle_create_draft_trip(
    store: &FleetStore,
    command: CreateDraftTripCommand,
) -> FleetResult<CommandOutcome> {
    validate_non_negative("cargoWeight", command.cargo_weight)?;
    validate_non_negative("revenue", command.revenue)?;

    let mut plan = Plan::new(store);
    let vehicle = plan.read(&command.vehicle_id)?;
    let driver = plan.read(&command.driver_id)?;

    let trip_id = store.next_id::<Trip>();
    plan.emit(FleetEvent::TripCreated {
        trip: Trip {
            id: trip_id.clone(),
            vehicle_id: vehicle.id.clone(),
            driver_id: driver.id.clone(),
            origin: command.origin,
            destination: command.destination,
            cargo_weight: command.cargo_weight,
            cargo_description: command.cargo_description,
            status: TripStatus::Draft,
            created_date: command.date,
            completed_date: None,
            start_odometer: None,
            end_odometer: None,
            revenue: command.revenue,
        },
    });
    Ok(plan.finish(EntityKind::Trip, trip_id.as_str()))
}

/// Handle DispatchDraftTrip: DispatchTrip's preconditions against the draft
pub fn handle_dispatch_draft_trip(
    store: &FleetStore,
    command: DispatchDraftTripCommand,
) -> FleetResult<CommandOutcome> {
    let mut plan = Plan::new(store);
    let trip = plan.read(&command.trip_id)?;
    plan.trip(trip, TripCommand::Dispatch)?;

    let vehicle = plan.read(&trip.vehicle_id)?;
    validate_vehicle_available(vehicle)?;
    let driver = plan.read(&trip.driver_id)?;
    validate_assignment(driver, vehicle, trip.cargo_weight, command.date)?;

    plan.emit(FleetEvent::TripDispatched {
        trip_id: trip.id.clone(),
        start_odometer: vehicle.odometer,
    });
    bind_vehicle_and_driver(&mut plan, vehicle, driver)?;

    Ok(plan.finish(EntityKind::Trip, trip.id.as_str()))
}

/// Handle CompleteTrip
///
/// # Business Rules
/// - Trip must be Dispatched
/// - End odometer below start is a warning, or an error under
///   `enforce_odometer_monotonic`
///
/// # Events
/// trip → Completed, vehicle → Available with the end odometer,
/// driver → OnDuty with one more completed trip
pub fn handle_complete_trip(
    store: &FleetStore,
    policy: &RulePolicy,
    command: CompleteTripCommand,
) -> FleetResult<CommandOutcome> {
    validate_non_negative("endOdometer", command.end_odometer)?;

    let mut plan = Plan::new(store);
    let trip = plan.read(&command.trip_id)?;
    plan.trip(trip, TripCommand::Complete)?;

    if let Err(regression) = validate_odometer_progress(trip, command.end_odometer) {
        if policy.enforce_odometer_monotonic {
            return Err(regression);
        }
        plan.warn(EntityKind::Trip, trip.id.as_str(), vec![regression.to_string()]);
    }

    let vehicle = plan.read(&trip.vehicle_id)?;
    let driver = plan.read(&trip.driver_id)?;

    plan.emit(FleetEvent::TripCompleted {
        trip_id: trip.id.clone(),
        end_odometer: command.end_odometer,
        completed_date: command.completed_date,
    });
    plan.vehicle(vehicle, VehicleCommand::ReturnFromTrip)?;
    plan.emit(FleetEvent::VehicleOdometerRecorded {
        vehicle_id: vehicle.id.clone(),
        odometer: command.end_odometer,
    });
    plan.driver(driver, DriverCommand::Release)?;
    plan.emit(FleetEvent::DriverTripCountersChanged {
        driver_id: driver.id.clone(),
        trips_completed: driver.trips_completed + 1,
        trips_total: driver.trips_total,
    });

    Ok(plan.finish(EntityKind::Trip, trip.id.as_str()))
}

/// Handle CancelTrip
///
/// Draft and Dispatched trips can be cancelled. Cancelling a dispatched
/// trip reverts an OnTrip vehicle to Available and an OnTrip driver to
/// OnDuty; other statuses are left alone. A draft binds nothing, so only
/// the trip changes.
pub fn handle_cancel_trip(
    store: &FleetStore,
    command: CancelTripCommand,
) -> FleetResult<CommandOutcome> {
    let mut plan = Plan::new(store);
    let trip = plan.read(&command.trip_id)?;
    plan.trip(trip, TripCommand::Cancel)?;

    plan.emit(FleetEvent::TripCancelled {
        trip_id: trip.id.clone(),
        from: trip.status,
    });

    if trip.status == TripStatus::Dispatched {
        let vehicle = plan.read(&trip.vehicle_id)?;
        plan.vehicle(vehicle, VehicleCommand::TripCancelled)?;
        let driver = plan.read(&trip.driver_id)?;
        plan.driver(driver, DriverCommand::TripCancelled)?;
    }

    Ok(plan.finish(EntityKind::Trip, trip.id.as_str()))
}

/// Completing work may hand the vehicle back, when the policy allows it and
/// nothing else holds the vehicle
fn restore_after_maintenance(
    plan: &mut Plan<'_>,
    policy: &RulePolicy,
    vehicle: &Vehicle,
    closing: Option<&MaintenanceLogId>,
) -> FleetResult<()> {
    if !policy.restore_vehicle_after_maintenance || vehicle.status != VehicleStatus::InShop {
        return Ok(());
    }
    let store = plan.store;
    if store.active_trip_for_vehicle(&vehicle.id).is_some() {
        return Ok(());
    }
    let still_open = store
        .open_maintenance_for_vehicle(&vehicle.id)
        .any(|log| Some(&log.id) != closing);
    if still_open {
        return Ok(());
    }
    plan.vehicle(vehicle, VehicleCommand::Reactivate)?;
    Ok(())
}

/// Handle LogMaintenance
///
/// Scheduled or InProgress work forces the vehicle InShop from any status;
/// pulling a vehicle off an active trip is accepted with a warning.
pub fn handle_log_maintenance(
    store: &FleetStore,
    policy: &RulePolicy,
    command: LogMaintenanceCommand,
) -> FleetResult<CommandOutcome> {
    validate_non_negative("cost", command.cost)?;

    let mut plan = Plan::new(store);
    let vehicle = plan.read(&command.vehicle_id)?;

    let log = MaintenanceLog::from_draft(
        store.next_id(),
        NewMaintenanceLog {
            vehicle_id: vehicle.id.clone(),
            service_type: command.service_type,
            description: command.description,
            cost: command.cost,
            date: command.date,
            status: command.status,
        },
    );
    let log_id = log.id.clone();
    let status = log.status;
    plan.emit(FleetEvent::MaintenanceLogged { log });

    if status.is_open() {
        plan.vehicle(vehicle, VehicleCommand::EnterShop)?;
    } else {
        restore_after_maintenance(&mut plan, policy, vehicle, None)?;
    }

    Ok(plan.finish(EntityKind::MaintenanceLog, log_id.as_str()))
}

/// Handle UpdateMaintenanceStatus
///
/// Scheduled → InProgress | Completed, InProgress → Completed.
pub fn handle_update_maintenance_status(
    store: &FleetStore,
    policy: &RulePolicy,
    command: UpdateMaintenanceStatusCommand,
) -> FleetResult<CommandOutcome> {
    let mut plan = Plan::new(store);
    let log = plan.read(&command.log_id)?;

    let input = MaintenanceCommand::toward(command.status).ok_or_else(|| {
        FleetError::transition(
            EntityKind::MaintenanceLog,
            log.id.as_str(),
            TransitionError::invalid(log.status, command.status),
        )
    })?;
    let (next, _) = log.status.transition(&input).map_err(|e| {
        FleetError::transition(EntityKind::MaintenanceLog, log.id.as_str(), e)
    })?;

    plan.emit(FleetEvent::MaintenanceStatusChanged {
        log_id: log.id.clone(),
        from: log.status,
        to: next,
    });

    let vehicle = plan.read(&log.vehicle_id)?;
    if next.is_open() {
        plan.vehicle(vehicle, VehicleCommand::EnterShop)?;
    } else {
        restore_after_maintenance(&mut plan, policy, vehicle, Some(&log.id))?;
    }

    Ok(plan.finish(EntityKind::MaintenanceLog, log.id.as_str()))
}

/// Handle AddFuelLog
///
/// # Business Rules
/// - Vehicle exists
/// - A referenced trip exists and ran on the same vehicle
pub fn handle_add_fuel_log(
    store: &FleetStore,
    command: AddFuelLogCommand,
) -> FleetResult<CommandOutcome> {
    let draft = command.fuel;
    validate_non_negative("liters", draft.liters)?;
    validate_non_negative("cost", draft.cost)?;
    validate_non_negative("odometer", draft.odometer)?;

    let mut plan = Plan::new(store);
    let vehicle = plan.read(&draft.vehicle_id)?;
    if let Some(trip_id) = &draft.trip_id {
        let trip = plan.read(trip_id)?;
        if trip.vehicle_id != vehicle.id {
            return Err(FleetError::InvalidReference(format!(
                "trip {} ran on vehicle {}, not {}",
                trip.id, trip.vehicle_id, vehicle.id
            )));
        }
    }

    let log = FuelLog::from_draft(store.next_id(), draft);
    let id = log.id.clone();
    plan.emit(FleetEvent::FuelLogged { log });
    Ok(plan.finish(EntityKind::FuelLog, id.as_str()))
}
