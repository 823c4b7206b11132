// Copyright (c) 2025 - Cowboy AI, Inc.
//! Trip entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DriverId, Entity, EntityId, EntityKind, Patch, VehicleId};

pub type TripId = EntityId<Trip>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripStatus {
    /// Planned, binds nothing yet
    Draft,
    /// Active: holds its vehicle and driver
    Dispatched,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub const ALL: [TripStatus; 4] = [
        TripStatus::Draft,
        TripStatus::Dispatched,
        TripStatus::Completed,
        TripStatus::Cancelled,
    ];

    pub fn is_active(&self) -> bool {
        matches!(self, TripStatus::Dispatched)
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TripStatus::Draft => "Draft",
            TripStatus::Dispatched => "Dispatched",
            TripStatus::Completed => "Completed",
            TripStatus::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: TripId,
    pub vehicle_id: VehicleId,
    pub driver_id: DriverId,
    pub origin: String,
    pub destination: String,
    pub cargo_weight: f64,
    pub cargo_description: String,
    pub status: TripStatus,
    pub created_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_odometer: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_odometer: Option<f64>,
    pub revenue: f64,
}

impl Trip {
    /// Kilometres driven, known once both odometer readings exist
    pub fn distance(&self) -> Option<f64> {
        match (self.start_odometer, self.end_odometer) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

/// Raw trip fields for the store's `create`.
///
/// The rules engine builds these itself; callers dispatch through
/// [`crate::aggregate::DispatchTrip`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrip {
    pub vehicle_id: VehicleId,
    pub driver_id: DriverId,
    pub origin: String,
    pub destination: String,
    pub cargo_weight: f64,
    pub cargo_description: String,
    pub status: TripStatus,
    pub created_date: NaiveDate,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub start_odometer: Option<f64>,
    #[serde(default)]
    pub end_odometer: Option<f64>,
    pub revenue: f64,
}

/// Edit of descriptive trip fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
}

impl Patch<Trip> for TripPatch {
    fn apply_to(self, trip: &mut Trip) {
        if let Some(origin) = self.origin {
            trip.origin = origin;
        }
        if let Some(destination) = self.destination {
            trip.destination = destination;
        }
        if let Some(description) = self.cargo_description {
            trip.cargo_description = description;
        }
        if let Some(revenue) = self.revenue {
            trip.revenue = revenue;
        }
    }

    fn is_empty(&self) -> bool {
        self.origin.is_none()
            && self.destination.is_none()
            && self.cargo_description.is_none()
            && self.revenue.is_none()
    }
}

impl Entity for Trip {
    const KIND: EntityKind = EntityKind::Trip;
    type Draft = NewTrip;
    type Patch = TripPatch;

    fn from_draft(id: TripId, draft: NewTrip) -> Self {
        Trip {
            id,
            vehicle_id: draft.vehicle_id,
            driver_id: draft.driver_id,
            origin: draft.origin,
            destination: draft.destination,
            cargo_weight: draft.cargo_weight,
            cargo_description: draft.cargo_description,
            status: draft.status,
            created_date: draft.created_date,
            completed_date: draft.completed_date,
            start_odometer: draft.start_odometer,
            end_odometer: draft.end_odometer,
            revenue: draft.revenue,
        }
    }

    fn id(&self) -> &TripId {
        &self.id
    }
}
