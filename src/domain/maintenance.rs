// Copyright (c) 2025 - Cowboy AI, Inc.
//! Maintenance log entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Entity, EntityId, EntityKind, Patch, VehicleId};

pub type MaintenanceLogId = EntityId<MaintenanceLog>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Completed,
}

impl MaintenanceStatus {
    /// Open work keeps the vehicle in the shop
    pub fn is_open(&self) -> bool {
        matches!(self, MaintenanceStatus::Scheduled | MaintenanceStatus::InProgress)
    }
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MaintenanceStatus::Scheduled => "Scheduled",
            MaintenanceStatus::InProgress => "In Progress",
            MaintenanceStatus::Completed => "Completed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLog {
    pub id: MaintenanceLogId,
    pub vehicle_id: VehicleId,
    /// Kind of service, e.g. "Oil Change"
    #[serde(rename = "type")]
    pub service_type: String,
    pub description: String,
    pub cost: f64,
    pub date: NaiveDate,
    pub status: MaintenanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaintenanceLog {
    pub vehicle_id: VehicleId,
    #[serde(rename = "type")]
    pub service_type: String,
    pub description: String,
    pub cost: f64,
    pub date: NaiveDate,
    pub status: MaintenanceStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenancePatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Patch<MaintenanceLog> for MaintenancePatch {
    fn apply_to(self, log: &mut MaintenanceLog) {
        if let Some(service_type) = self.service_type {
            log.service_type = service_type;
        }
        if let Some(description) = self.description {
            log.description = description;
        }
        if let Some(cost) = self.cost {
            log.cost = cost;
        }
        if let Some(date) = self.date {
            log.date = date;
        }
    }

    fn is_empty(&self) -> bool {
        self.service_type.is_none()
            && self.description.is_none()
            && self.cost.is_none()
            && self.date.is_none()
    }
}

impl Entity for MaintenanceLog {
    const KIND: EntityKind = EntityKind::MaintenanceLog;
    type Draft = NewMaintenanceLog;
    type Patch = MaintenancePatch;

    fn from_draft(id: MaintenanceLogId, draft: NewMaintenanceLog) -> Self {
        MaintenanceLog {
            id,
            vehicle_id: draft.vehicle_id,
            service_type: draft.service_type,
            description: draft.description,
            cost: draft.cost,
            date: draft.date,
            status: draft.status,
        }
    }

    fn id(&self) -> &MaintenanceLogId {
        &self.id
    }
}
