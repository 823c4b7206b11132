// Copyright (c) 2025 - Cowboy AI, Inc.
//! Fleet Domain Models
//!
//! Entities tracked by the fleet store, their creation payloads and partial
//! edits, plus the pure invariant checks the rules engine composes.
//!
//! # Entities
//!
//! - [`Vehicle`] - fleet vehicle with a lifecycle status
//! - [`Driver`] - licensed driver with a duty status
//! - [`Trip`] - binds one vehicle and one driver while dispatched
//! - [`MaintenanceLog`] - shop work against a vehicle
//! - [`FuelLog`] - fuel expenditure against a vehicle (optionally a trip)
//!
//! # Creation and Edits
//!
//! Every entity has a `New*` payload (all fields but the id) and a `*Patch`
//! of optional fields. Applying a patch is a shallow merge: `None` leaves the
//! field untouched. Status fields never appear in patches; they move only
//! through the lifecycle tables in [`crate::state_machine`].

pub mod driver;
pub mod fuel;
pub mod ids;
pub mod invariants;
pub mod maintenance;
pub mod trip;
pub mod vehicle;

pub use driver::{Driver, DriverId, DriverPatch, DriverStatus, NewDriver};
pub use fuel::{FuelLog, FuelLogId, FuelLogPatch, NewFuelLog};
pub use ids::{EntityId, EntityKind, IdStrategy};
pub use invariants::ValidationResult;
pub use maintenance::{
    MaintenanceLog, MaintenanceLogId, MaintenancePatch, MaintenanceStatus, NewMaintenanceLog,
};
pub use trip::{NewTrip, Trip, TripId, TripPatch, TripStatus};
pub use vehicle::{NewVehicle, Vehicle, VehicleId, VehiclePatch, VehicleStatus, VehicleType};

/// A record held by the fleet store
pub trait Entity: Clone + Sized {
    /// Which collection the entity lives in
    const KIND: EntityKind;

    /// Creation payload: every field except the id
    type Draft;

    /// Partial edit
    type Patch: Patch<Self>;

    /// Build the entity from a freshly minted id and its payload
    fn from_draft(id: EntityId<Self>, draft: Self::Draft) -> Self;

    fn id(&self) -> &EntityId<Self>;
}

/// Shallow merge of optional fields into an entity
pub trait Patch<E> {
    fn apply_to(self, entity: &mut E);

    /// True when the patch would change nothing
    fn is_empty(&self) -> bool;
}
