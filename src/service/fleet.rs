// Copyright (c) 2025 - Cowboy AI, Inc.
//! Fleet Service
//!
//! Owns the store, the configuration and the event history, and runs every
//! command as one transaction:
//!
//! 1. Plan the command (pure handler)
//! 2. Commit the plan (version check + apply, all or nothing)
//! 3. Append the applied events to the history
//!
//! If any step fails the store is left exactly as it was.

use std::collections::VecDeque;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::aggregate::{self, commands::*, CommandOutcome};
use crate::config::FleetConfig;
use crate::domain::{
    Driver, DriverId, DriverPatch, DriverStatus, Entity, EntityId, EntityKind, FuelLog,
    MaintenanceLog, MaintenanceLogId, MaintenanceStatus, NewDriver, NewFuelLog, NewVehicle, Trip,
    TripId, Vehicle, VehicleId, VehiclePatch,
};
use crate::errors::FleetResult;
use crate::events::{FleetEvent, RecordedEvent};
use crate::store::{FleetSnapshot, FleetStore, HasCollection};

/// What a committed command did
#[derive(Debug, Clone, PartialEq)]
pub struct CommandReceipt {
    pub correlation_id: Uuid,
    pub events: Vec<FleetEvent>,
    pub warnings: Vec<String>,
    pub subject: (EntityKind, String),
}

/// Single-writer facade over the fleet store
#[derive(Debug, Clone)]
pub struct FleetService {
    store: FleetStore,
    config: FleetConfig,
    history: VecDeque<RecordedEvent>,
}

impl FleetService {
    /// Empty fleet
    pub fn new(config: FleetConfig) -> Self {
        let store = FleetStore::new(config.id_strategy);
        Self::with_store(config, store)
    }

    /// Service over an existing store (e.g. the demo fleet)
    pub fn with_store(config: FleetConfig, store: FleetStore) -> Self {
        Self {
            store,
            config,
            history: VecDeque::new(),
        }
    }

    pub fn store(&self) -> &FleetStore {
        &self.store
    }

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    pub fn snapshot(&self) -> FleetSnapshot {
        self.store.snapshot()
    }

    /// Applied events, oldest first, capped at `history_limit`
    pub fn history(&self) -> impl Iterator<Item = &RecordedEvent> {
        self.history.iter()
    }

    /// Run a command handler against the current store without writing
    pub fn plan(&self, command: FleetCommand) -> FleetResult<CommandOutcome> {
        let name = command.name();
        aggregate::handle(&self.store, &self.config.rules, command).map_err(|e| {
            warn!("Rejected {}: {}", name, e);
            e
        })
    }

    /// Apply a plan produced by [`plan`](Self::plan)
    pub fn commit(&mut self, name: &str, outcome: CommandOutcome) -> FleetResult<CommandReceipt> {
        if let Err(e) = aggregate::commit(&mut self.store, &outcome) {
            if e.is_validation() {
                warn!("Commit of {} rejected: {}", name, e);
            } else {
                debug!("Commit of {} failed: {}", name, e);
            }
            return Err(e);
        }

        let correlation_id = Uuid::now_v7();
        let recorded_at = Utc::now();
        for event in &outcome.events {
            let (kind, id) = event.subject();
            debug!("Applied {} to {} {}", event.name(), kind, id);
            self.record(RecordedEvent::new(event.clone(), correlation_id, recorded_at));
        }
        for warning in &outcome.warnings {
            warn!("{}: {}", name, warning);
        }

        let (kind, id) = &outcome.subject;
        info!(
            "{} applied to {} {} ({} events)",
            name,
            kind,
            id,
            outcome.events.len()
        );

        Ok(CommandReceipt {
            correlation_id,
            events: outcome.events,
            warnings: outcome.warnings,
            subject: outcome.subject,
        })
    }

    fn record(&mut self, event: RecordedEvent) {
        if self.config.history_limit == 0 {
            return;
        }
        while self.history.len() >= self.config.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(event);
    }

    /// Plan and commit any command
    pub fn execute(&mut self, command: impl Into<FleetCommand>) -> FleetResult<CommandReceipt> {
        let command = command.into();
        let name = command.name();
        let outcome = self.plan(command)?;
        self.commit(name, outcome)
    }

    /// Execute and return the record the command was about
    fn execute_for<E: Entity>(&mut self, command: impl Into<FleetCommand>) -> FleetResult<E>
    where
        FleetStore: HasCollection<E>,
    {
        let receipt = self.execute(command)?;
        subject_record(&self.store, &receipt)
    }

    pub fn add_vehicle(&mut self, vehicle: NewVehicle) -> FleetResult<Vehicle> {
        self.execute_for(AddVehicleCommand { vehicle })
    }

    pub fn update_vehicle(
        &mut self,
        vehicle_id: VehicleId,
        patch: VehiclePatch,
    ) -> FleetResult<Vehicle> {
        self.execute_for(UpdateVehicleCommand { vehicle_id, patch })
    }

    pub fn retire_vehicle(&mut self, vehicle_id: VehicleId) -> FleetResult<Vehicle> {
        self.execute_for(RetireVehicleCommand { vehicle_id })
    }

    pub fn reactivate_vehicle(&mut self, vehicle_id: VehicleId) -> FleetResult<Vehicle> {
        self.execute_for(ReactivateVehicleCommand { vehicle_id })
    }

    pub fn add_driver(&mut self, driver: NewDriver) -> FleetResult<Driver> {
        self.execute_for(AddDriverCommand { driver })
    }

    pub fn update_driver(&mut self, driver_id: DriverId, patch: DriverPatch) -> FleetResult<Driver> {
        self.execute_for(UpdateDriverCommand { driver_id, patch })
    }

    pub fn set_driver_duty_status(
        &mut self,
        driver_id: DriverId,
        status: DriverStatus,
    ) -> FleetResult<Driver> {
        self.execute_for(SetDriverDutyStatusCommand { driver_id, status })
    }

    pub fn dispatch_trip(&mut self, command: DispatchTripCommand) -> FleetResult<Trip> {
        self.execute_for(command)
    }

    pub fn create_draft_trip(&mut self, command: CreateDraftTripCommand) -> FleetResult<Trip> {
        self.execute_for(command)
    }

    pub fn dispatch_draft_trip(&mut self, trip_id: TripId, date: NaiveDate) -> FleetResult<Trip> {
        self.execute_for(DispatchDraftTripCommand { trip_id, date })
    }

    pub fn complete_trip(
        &mut self,
        trip_id: TripId,
        end_odometer: f64,
        completed_date: NaiveDate,
    ) -> FleetResult<Trip> {
        self.execute_for(CompleteTripCommand {
            trip_id,
            end_odometer,
            completed_date,
        })
    }

    pub fn cancel_trip(&mut self, trip_id: TripId) -> FleetResult<Trip> {
        self.execute_for(CancelTripCommand { trip_id })
    }

    pub fn log_maintenance(&mut self, command: LogMaintenanceCommand) -> FleetResult<MaintenanceLog> {
        self.execute_for(command)
    }

    pub fn update_maintenance_status(
        &mut self,
        log_id: MaintenanceLogId,
        status: MaintenanceStatus,
    ) -> FleetResult<MaintenanceLog> {
        self.execute_for(UpdateMaintenanceStatusCommand { log_id, status })
    }

    pub fn add_fuel_log(&mut self, fuel: NewFuelLog) -> FleetResult<FuelLog> {
        self.execute_for(AddFuelLogCommand { fuel })
    }
}

/// Current state of the record a receipt is about
pub(crate) fn subject_record<E: Entity>(store: &FleetStore, receipt: &CommandReceipt) -> FleetResult<E>
where
    FleetStore: HasCollection<E>,
{
    let id = EntityId::<E>::new(receipt.subject.1.clone());
    store.require(&id).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VehicleType;

    fn van(plate: &str) -> NewVehicle {
        NewVehicle {
            name: "Van".to_string(),
            vehicle_type: VehicleType::Van,
            license_plate: plate.to_string(),
            max_capacity: 500.0,
            odometer: 100.0,
            region: "South".to_string(),
            acquisition_cost: 30000.0,
            added_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        }
    }

    #[test]
    fn test_failed_command_leaves_store_untouched() {
        let mut service = FleetService::new(FleetConfig::default());
        service.add_vehicle(van("KA-01")).unwrap();
        let before = service.snapshot();

        let err = service.add_vehicle(van("KA-01")).unwrap_err();
        assert_eq!(err, crate::errors::FleetError::DuplicateLicensePlate("KA-01".into()));
        assert_eq!(service.snapshot(), before);
        assert_eq!(service.history().count(), 1);
    }

    #[test]
    fn test_history_is_capped() {
        let config = FleetConfig {
            history_limit: 2,
            ..FleetConfig::default()
        };
        let mut service = FleetService::new(config);
        for plate in ["A", "B", "C"] {
            service.add_vehicle(van(plate)).unwrap();
        }

        let kept: Vec<_> = service
            .history()
            .map(|r| r.event.subject().1.to_string())
            .collect();
        assert_eq!(kept, vec!["v2", "v3"]);
    }

    #[test]
    fn test_service_over_replayed_history_keeps_minting_fresh_ids() {
        let config = FleetConfig {
            history_limit: 1,
            ..FleetConfig::default()
        };
        let mut service = FleetService::new(config.clone());
        service.add_vehicle(van("A")).unwrap();
        service.add_vehicle(van("B")).unwrap();

        // Only v2's registration survived the cap
        let store =
            aggregate::replay(config.id_strategy, service.history().map(|r| &r.event)).unwrap();
        let mut restored = FleetService::with_store(config, store);

        let added = restored.add_vehicle(van("C")).unwrap();
        assert_eq!(added.id.as_str(), "v3");
        assert_eq!(restored.snapshot().vehicles.len(), 2);
    }

    #[test]
    fn test_stale_plan_is_not_a_validation_failure() {
        let mut service = FleetService::new(FleetConfig::default());
        let vehicle = service.add_vehicle(van("KA-03")).unwrap();
        let stale = service
            .plan(FleetCommand::RetireVehicle(RetireVehicleCommand {
                vehicle_id: vehicle.id.clone(),
            }))
            .unwrap();
        service.retire_vehicle(vehicle.id).unwrap();

        let err = service.commit("retire_vehicle", stale).unwrap_err();
        assert!(matches!(err, crate::errors::FleetError::ConcurrencyConflict { .. }));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_events_of_one_command_share_correlation() {
        let mut service = FleetService::new(FleetConfig::default());
        let vehicle = service.add_vehicle(van("KA-02")).unwrap();
        service
            .log_maintenance(LogMaintenanceCommand {
                vehicle_id: vehicle.id,
                service_type: "Brake Inspection".to_string(),
                description: "Pads worn".to_string(),
                cost: 240.0,
                date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
                status: MaintenanceStatus::Scheduled,
            })
            .unwrap();

        let last_two: Vec<_> = service.history().skip(1).collect();
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two[0].correlation_id, last_two[1].correlation_id);
    }
}
