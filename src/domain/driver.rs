// Copyright (c) 2025 - Cowboy AI, Inc.
//! Driver entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::{Entity, EntityId, EntityKind, Patch, VehicleType};

pub type DriverId = EntityId<Driver>;

/// Driver duty status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverStatus {
    OnDuty,
    OffDuty,
    Suspended,
    /// Bound to exactly one dispatched trip
    OnTrip,
}

impl DriverStatus {
    pub const ALL: [DriverStatus; 4] = [
        DriverStatus::OnDuty,
        DriverStatus::OffDuty,
        DriverStatus::Suspended,
        DriverStatus::OnTrip,
    ];

    /// Statuses a dispatcher may set by hand
    pub fn is_manual(&self) -> bool {
        !matches!(self, DriverStatus::OnTrip)
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverStatus::OnDuty => "On Duty",
            DriverStatus::OffDuty => "Off Duty",
            DriverStatus::Suspended => "Suspended",
            DriverStatus::OnTrip => "On Trip",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub license_categories: BTreeSet<VehicleType>,
    pub status: DriverStatus,
    /// 0-100
    pub safety_score: u8,
    pub trips_completed: u32,
    pub trips_total: u32,
    pub joined_date: NaiveDate,
}

impl Driver {
    /// A license is valid through its expiry date inclusive
    pub fn is_license_expired(&self, as_of: NaiveDate) -> bool {
        self.license_expiry < as_of
    }

    /// Still valid, but expires within `days` of `as_of`
    pub fn is_license_expiring_within(&self, as_of: NaiveDate, days: i64) -> bool {
        !self.is_license_expired(as_of) && (self.license_expiry - as_of).num_days() <= days
    }

    pub fn is_licensed_for(&self, vehicle_type: VehicleType) -> bool {
        self.license_categories.contains(&vehicle_type)
    }

    /// Completed trips as a percentage of assigned trips
    pub fn completion_rate(&self) -> f64 {
        if self.trips_total == 0 {
            return 0.0;
        }
        f64::from(self.trips_completed) / f64::from(self.trips_total) * 100.0
    }
}

/// Fields for onboarding a driver.
///
/// New drivers start `OnDuty` with a safety score of 100 and no trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDriver {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub license_categories: BTreeSet<VehicleType>,
    pub joined_date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_expiry: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_categories: Option<BTreeSet<VehicleType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_score: Option<u8>,
}

impl Patch<Driver> for DriverPatch {
    fn apply_to(self, driver: &mut Driver) {
        if let Some(name) = self.name {
            driver.name = name;
        }
        if let Some(email) = self.email {
            driver.email = email;
        }
        if let Some(phone) = self.phone {
            driver.phone = phone;
        }
        if let Some(number) = self.license_number {
            driver.license_number = number;
        }
        if let Some(expiry) = self.license_expiry {
            driver.license_expiry = expiry;
        }
        if let Some(categories) = self.license_categories {
            driver.license_categories = categories;
        }
        if let Some(score) = self.safety_score {
            driver.safety_score = score.min(100);
        }
    }

    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.license_number.is_none()
            && self.license_expiry.is_none()
            && self.license_categories.is_none()
            && self.safety_score.is_none()
    }
}

impl Entity for Driver {
    const KIND: EntityKind = EntityKind::Driver;
    type Draft = NewDriver;
    type Patch = DriverPatch;

    fn from_draft(id: DriverId, draft: NewDriver) -> Self {
        Driver {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            license_number: draft.license_number,
            license_expiry: draft.license_expiry,
            license_categories: draft.license_categories,
            status: DriverStatus::OnDuty,
            safety_score: 100,
            trips_completed: 0,
            trips_total: 0,
            joined_date: draft.joined_date,
        }
    }

    fn id(&self) -> &DriverId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn driver(expiry: NaiveDate) -> Driver {
        Driver::from_draft(
            DriverId::new("d2"),
            NewDriver {
                name: "Maria Santos".to_string(),
                email: "maria@fleet.com".to_string(),
                phone: "+1-555-0102".to_string(),
                license_number: "DL-002".to_string(),
                license_expiry: expiry,
                license_categories: [VehicleType::Van, VehicleType::Bike].into_iter().collect(),
                joined_date: date(2021, 7, 15),
            },
        )
    }

    #[test]
    fn test_new_driver_defaults() {
        let d = driver(date(2027, 1, 1));
        assert_eq!(d.status, DriverStatus::OnDuty);
        assert_eq!(d.safety_score, 100);
        assert_eq!(d.trips_completed, 0);
        assert_eq!(d.completion_rate(), 0.0);
    }

    #[test]
    fn test_license_valid_through_expiry_day() {
        let d = driver(date(2026, 3, 1));
        assert!(!d.is_license_expired(date(2026, 3, 1)));
        assert!(d.is_license_expired(date(2026, 3, 2)));
    }

    #[test]
    fn test_license_expiring_window() {
        let d = driver(date(2026, 3, 31));
        assert!(d.is_license_expiring_within(date(2026, 3, 1), 90));
        assert!(!d.is_license_expiring_within(date(2025, 1, 1), 90));
        assert!(!d.is_license_expiring_within(date(2026, 4, 1), 90));
    }

    #[test]
    fn test_licensed_for_category() {
        let d = driver(date(2027, 1, 1));
        assert!(d.is_licensed_for(VehicleType::Van));
        assert!(!d.is_licensed_for(VehicleType::Truck));
    }

    #[test]
    fn test_patch_clamps_safety_score() {
        let mut d = driver(date(2027, 1, 1));
        DriverPatch {
            safety_score: Some(140),
            ..Default::default()
        }
        .apply_to(&mut d);
        assert_eq!(d.safety_score, 100);
    }
}
