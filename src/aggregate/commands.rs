// Copyright (c) 2025 - Cowboy AI, Inc.
//! Fleet Commands
//!
//! Commands express intent and can be rejected. They carry every input the
//! handler needs, dates included.
//!
//! # Time Handling
//!
//! Dispatch, completion and log dates are explicit command fields.
//! **Domain logic never reads the clock.**

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    DriverId, DriverPatch, DriverStatus, MaintenanceLogId, MaintenanceStatus, NewDriver,
    NewFuelLog, NewVehicle, TripId, VehicleId, VehiclePatch,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddVehicleCommand {
    pub vehicle: NewVehicle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleCommand {
    pub vehicle_id: VehicleId,
    pub patch: VehiclePatch,
}

/// Soft delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetireVehicleCommand {
    pub vehicle_id: VehicleId,
}

/// Return a retired or serviced vehicle to the pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactivateVehicleCommand {
    pub vehicle_id: VehicleId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDriverCommand {
    pub driver: NewDriver,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDriverCommand {
    pub driver_id: DriverId,
    pub patch: DriverPatch,
}

/// Manual duty change: OnDuty, OffDuty or Suspended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDriverDutyStatusCommand {
    pub driver_id: DriverId,
    pub status: DriverStatus,
}

/// Create a trip and bind its vehicle and driver in one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchTripCommand {
    pub vehicle_id: VehicleId,
    pub driver_id: DriverId,
    pub origin: String,
    pub destination: String,
    pub cargo_weight: f64,
    pub cargo_description: String,
    pub revenue: f64,

    /// Dispatch date; also the license validity reference
    pub date: NaiveDate,
}

/// Record a planned trip without binding anything
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDraftTripCommand {
    pub vehicle_id: VehicleId,
    pub driver_id: DriverId,
    pub origin: String,
    pub destination: String,
    pub cargo_weight: f64,
    pub cargo_description: String,
    pub revenue: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchDraftTripCommand {
    pub trip_id: TripId,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTripCommand {
    pub trip_id: TripId,
    pub end_odometer: f64,
    pub completed_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelTripCommand {
    pub trip_id: TripId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogMaintenanceCommand {
    pub vehicle_id: VehicleId,
    #[serde(rename = "type")]
    pub service_type: String,
    pub description: String,
    pub cost: f64,
    pub date: NaiveDate,
    pub status: MaintenanceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaintenanceStatusCommand {
    pub log_id: MaintenanceLogId,
    pub status: MaintenanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFuelLogCommand {
    pub fuel: NewFuelLog,
}

/// Any command the service accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum FleetCommand {
    AddVehicle(AddVehicleCommand),
    UpdateVehicle(UpdateVehicleCommand),
    RetireVehicle(RetireVehicleCommand),
    ReactivateVehicle(ReactivateVehicleCommand),
    AddDriver(AddDriverCommand),
    UpdateDriver(UpdateDriverCommand),
    SetDriverDutyStatus(SetDriverDutyStatusCommand),
    DispatchTrip(DispatchTripCommand),
    CreateDraftTrip(CreateDraftTripCommand),
    DispatchDraftTrip(DispatchDraftTripCommand),
    CompleteTrip(CompleteTripCommand),
    CancelTrip(CancelTripCommand),
    LogMaintenance(LogMaintenanceCommand),
    UpdateMaintenanceStatus(UpdateMaintenanceStatusCommand),
    AddFuelLog(AddFuelLogCommand),
}

impl FleetCommand {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            FleetCommand::AddVehicle(_) => "add_vehicle",
            FleetCommand::UpdateVehicle(_) => "update_vehicle",
            FleetCommand::RetireVehicle(_) => "retire_vehicle",
            FleetCommand::ReactivateVehicle(_) => "reactivate_vehicle",
            FleetCommand::AddDriver(_) => "add_driver",
            FleetCommand::UpdateDriver(_) => "update_driver",
            FleetCommand::SetDriverDutyStatus(_) => "set_driver_duty_status",
            FleetCommand::DispatchTrip(_) => "dispatch_trip",
            FleetCommand::CreateDraftTrip(_) => "create_draft_trip",
            FleetCommand::DispatchDraftTrip(_) => "dispatch_draft_trip",
            FleetCommand::CompleteTrip(_) => "complete_trip",
            FleetCommand::CancelTrip(_) => "cancel_trip",
            FleetCommand::LogMaintenance(_) => "log_maintenance",
            FleetCommand::UpdateMaintenanceStatus(_) => "update_maintenance_status",
            FleetCommand::AddFuelLog(_) => "add_fuel_log",
        }
    }
}

macro_rules! into_fleet_command {
    ($($command:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$command> for FleetCommand {
                fn from(command: $command) -> Self {
                    FleetCommand::$variant(command)
                }
            }
        )*
    };
}

into_fleet_command! {
    AddVehicleCommand => AddVehicle,
    UpdateVehicleCommand => UpdateVehicle,
    RetireVehicleCommand => RetireVehicle,
    ReactivateVehicleCommand => ReactivateVehicle,
    AddDriverCommand => AddDriver,
    UpdateDriverCommand => UpdateDriver,
    SetDriverDutyStatusCommand => SetDriverDutyStatus,
    DispatchTripCommand => DispatchTrip,
    CreateDraftTripCommand => CreateDraftTrip,
    DispatchDraftTripCommand => DispatchDraftTrip,
    CompleteTripCommand => CompleteTrip,
    CancelTripCommand => CancelTrip,
    LogMaintenanceCommand => LogMaintenance,
    UpdateMaintenanceStatusCommand => UpdateMaintenanceStatus,
    AddFuelLogCommand => AddFuelLog,
}
