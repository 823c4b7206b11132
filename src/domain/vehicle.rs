// Copyright (c) 2025 - Cowboy AI, Inc.
//! Vehicle entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Entity, EntityId, EntityKind, Patch};

pub type VehicleId = EntityId<Vehicle>;

/// Vehicle class; drivers are licensed per class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VehicleType {
    Truck,
    Van,
    Bike,
}

impl VehicleType {
    pub const ALL: [VehicleType; 3] = [VehicleType::Truck, VehicleType::Van, VehicleType::Bike];
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VehicleType::Truck => "Truck",
            VehicleType::Van => "Van",
            VehicleType::Bike => "Bike",
        };
        f.write_str(name)
    }
}

/// Vehicle lifecycle status
///
/// Transitions are governed by the vehicle lifecycle table in
/// [`crate::state_machine::vehicle_lifecycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleStatus {
    /// Ready to be dispatched
    Available,
    /// Bound to exactly one dispatched trip
    OnTrip,
    /// Under maintenance
    InShop,
    /// Soft-deleted
    Retired,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 4] = [
        VehicleStatus::Available,
        VehicleStatus::OnTrip,
        VehicleStatus::InShop,
        VehicleStatus::Retired,
    ];
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VehicleStatus::Available => "Available",
            VehicleStatus::OnTrip => "On Trip",
            VehicleStatus::InShop => "In Shop",
            VehicleStatus::Retired => "Retired",
        };
        f.write_str(name)
    }
}

/// A fleet vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    /// Unique across the fleet
    pub license_plate: String,
    /// Maximum cargo in kg
    pub max_capacity: f64,
    /// Odometer in km
    pub odometer: f64,
    pub status: VehicleStatus,
    pub region: String,
    pub acquisition_cost: f64,
    pub added_date: NaiveDate,
}

/// Fields for registering a vehicle. New vehicles start `Available`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub name: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub license_plate: String,
    pub max_capacity: f64,
    pub odometer: f64,
    pub region: String,
    pub acquisition_cost: f64,
    pub added_date: NaiveDate,
}

/// Partial vehicle edit. Status is changed only through lifecycle commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<VehicleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odometer: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquisition_cost: Option<f64>,
}

impl Patch<Vehicle> for VehiclePatch {
    fn apply_to(self, vehicle: &mut Vehicle) {
        if let Some(name) = self.name {
            vehicle.name = name;
        }
        if let Some(vehicle_type) = self.vehicle_type {
            vehicle.vehicle_type = vehicle_type;
        }
        if let Some(plate) = self.license_plate {
            vehicle.license_plate = plate;
        }
        if let Some(capacity) = self.max_capacity {
            vehicle.max_capacity = capacity;
        }
        if let Some(odometer) = self.odometer {
            vehicle.odometer = odometer;
        }
        if let Some(region) = self.region {
            vehicle.region = region;
        }
        if let Some(cost) = self.acquisition_cost {
            vehicle.acquisition_cost = cost;
        }
    }

    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.vehicle_type.is_none()
            && self.license_plate.is_none()
            && self.max_capacity.is_none()
            && self.odometer.is_none()
            && self.region.is_none()
            && self.acquisition_cost.is_none()
    }
}

impl Entity for Vehicle {
    const KIND: EntityKind = EntityKind::Vehicle;
    type Draft = NewVehicle;
    type Patch = VehiclePatch;

    fn from_draft(id: VehicleId, draft: NewVehicle) -> Self {
        Vehicle {
            id,
            name: draft.name,
            vehicle_type: draft.vehicle_type,
            license_plate: draft.license_plate,
            max_capacity: draft.max_capacity,
            odometer: draft.odometer,
            status: VehicleStatus::Available,
            region: draft.region,
            acquisition_cost: draft.acquisition_cost,
            added_date: draft.added_date,
        }
    }

    fn id(&self) -> &VehicleId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn van() -> Vehicle {
        Vehicle::from_draft(
            VehicleId::new("v2"),
            NewVehicle {
                name: "Van-05".to_string(),
                vehicle_type: VehicleType::Van,
                license_plate: "VAN-5005".to_string(),
                max_capacity: 500.0,
                odometer: 67200.0,
                region: "East".to_string(),
                acquisition_cost: 35000.0,
                added_date: NaiveDate::from_ymd_opt(2023, 3, 22).unwrap(),
            },
        )
    }

    #[test]
    fn test_new_vehicle_starts_available() {
        assert_eq!(van().status, VehicleStatus::Available);
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let mut vehicle = van();
        let patch = VehiclePatch {
            region: Some("West".to_string()),
            max_capacity: Some(650.0),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        patch.apply_to(&mut vehicle);

        assert_eq!(vehicle.region, "West");
        assert_eq!(vehicle.max_capacity, 650.0);
        assert_eq!(vehicle.name, "Van-05");
        assert_eq!(vehicle.odometer, 67200.0);
    }

    #[test]
    fn test_vehicle_json_uses_type_key() {
        let json = serde_json::to_value(van()).unwrap();
        assert_eq!(json["type"], "Van");
        assert_eq!(json["licensePlate"], "VAN-5005");
        assert_eq!(json["status"], "Available");
    }
}
