// Copyright (c) 2025 - Cowboy AI, Inc.
//! Fuel log entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, EntityKind, Patch, TripId, VehicleId};

pub type FuelLogId = EntityId<FuelLog>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelLog {
    pub id: FuelLogId,
    pub vehicle_id: VehicleId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<TripId>,
    pub liters: f64,
    pub cost: f64,
    pub date: NaiveDate,
    /// Odometer reading at the time of the fill
    pub odometer: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFuelLog {
    pub vehicle_id: VehicleId,
    #[serde(default)]
    pub trip_id: Option<TripId>,
    pub liters: f64,
    pub cost: f64,
    pub date: NaiveDate,
    pub odometer: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelLogPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odometer: Option<f64>,
}

impl Patch<FuelLog> for FuelLogPatch {
    fn apply_to(self, log: &mut FuelLog) {
        if let Some(liters) = self.liters {
            log.liters = liters;
        }
        if let Some(cost) = self.cost {
            log.cost = cost;
        }
        if let Some(date) = self.date {
            log.date = date;
        }
        if let Some(odometer) = self.odometer {
            log.odometer = odometer;
        }
    }

    fn is_empty(&self) -> bool {
        self.liters.is_none() && self.cost.is_none() && self.date.is_none() && self.odometer.is_none()
    }
}

impl Entity for FuelLog {
    const KIND: EntityKind = EntityKind::FuelLog;
    type Draft = NewFuelLog;
    type Patch = FuelLogPatch;

    fn from_draft(id: FuelLogId, draft: NewFuelLog) -> Self {
        FuelLog {
            id,
            vehicle_id: draft.vehicle_id,
            trip_id: draft.trip_id,
            liters: draft.liters,
            cost: draft.cost,
            date: draft.date,
            odometer: draft.odometer,
        }
    }

    fn id(&self) -> &FuelLogId {
        &self.id
    }
}
