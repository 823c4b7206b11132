// Copyright (c) 2025 - Cowboy AI, Inc.
//! Entity Store
//!
//! In-memory home of the five fleet collections. The store is an explicit
//! object: construct one per process (or per test) and hand it to the
//! service and the query layer by reference.
//!
//! # Contract
//!
//! - `create` mints an identifier and inserts the record
//! - `update` shallow-merges a patch; unknown ids fail with `EntityNotFound`
//! - `get` / `list` read; `list` keeps insertion order
//!
//! The store validates nothing beyond identifier existence. Business rules
//! live in [`crate::aggregate`].
//!
//! # Record Versions
//!
//! Every record carries a version, starting at 1 and bumped on every write.
//! Version 0 stands for "no such record". Command handlers note the versions
//! of what they read; a commit re-checks them before writing
//! ([`FleetStore::check_version`]), which turns status flips such as
//! Available → OnTrip into compare-and-swap operations.

pub mod snapshot;

pub use snapshot::FleetSnapshot;

use std::collections::HashMap;

use crate::domain::{
    Driver, DriverId, Entity, EntityId, EntityKind, FuelLog, IdStrategy, MaintenanceLog, Patch,
    Trip, TripStatus, Vehicle, VehicleId,
};
use crate::errors::{FleetError, FleetResult};

/// One entity collection with an id index and per-record versions
#[derive(Debug, Clone)]
pub struct Collection<E> {
    records: Vec<E>,
    versions: Vec<u64>,
    index: HashMap<String, usize>,
    /// Highest sequential ordinal in use
    issued: u64,
}

impl<E: Entity> Collection<E> {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            versions: Vec::new(),
            index: HashMap::new(),
            issued: 0,
        }
    }

    pub fn get(&self, id: &str) -> Option<&E> {
        self.index.get(id).map(|&slot| &self.records[slot])
    }

    /// Current version, 0 when absent
    pub fn version(&self, id: &str) -> u64 {
        self.index.get(id).map_or(0, |&slot| self.versions[slot])
    }

    pub fn list(&self) -> &[E] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn next_id(&self, strategy: IdStrategy) -> EntityId<E> {
        EntityId::new(strategy.mint(E::KIND, self.issued + 1))
    }

    fn insert(&mut self, entity: E) -> FleetResult<()> {
        let id = entity.id().as_str().to_string();
        if let Some(&slot) = self.index.get(&id) {
            return Err(FleetError::ConcurrencyConflict {
                kind: E::KIND,
                id,
                expected: 0,
                actual: self.versions[slot],
            });
        }
        // Records inserted under their own ids push the counter past them
        if let Some(ordinal) = sequential_ordinal(E::KIND, &id) {
            self.issued = self.issued.max(ordinal);
        }
        self.index.insert(id, self.records.len());
        self.records.push(entity);
        self.versions.push(1);
        Ok(())
    }

    fn modify(&mut self, id: &str, change: impl FnOnce(&mut E)) -> FleetResult<&E> {
        let slot = *self
            .index
            .get(id)
            .ok_or_else(|| FleetError::not_found(E::KIND, id))?;
        change(&mut self.records[slot]);
        self.versions[slot] += 1;
        Ok(&self.records[slot])
    }
}

/// `n` for an id of the form `<prefix><n>`
fn sequential_ordinal(kind: EntityKind, id: &str) -> Option<u64> {
    id.strip_prefix(kind.prefix())?.parse().ok()
}

/// Access to the collection holding entities of type `E`
pub trait HasCollection<E: Entity> {
    fn collection(&self) -> &Collection<E>;
    fn collection_mut(&mut self) -> &mut Collection<E>;
}

/// The fleet's in-memory entity store
#[derive(Debug, Clone)]
pub struct FleetStore {
    id_strategy: IdStrategy,
    vehicles: Collection<Vehicle>,
    drivers: Collection<Driver>,
    trips: Collection<Trip>,
    maintenance_logs: Collection<MaintenanceLog>,
    fuel_logs: Collection<FuelLog>,
}

macro_rules! impl_has_collection {
    ($entity:ty, $field:ident) => {
        impl HasCollection<$entity> for FleetStore {
            fn collection(&self) -> &Collection<$entity> {
                &self.$field
            }

            fn collection_mut(&mut self) -> &mut Collection<$entity> {
                &mut self.$field
            }
        }
    };
}

impl_has_collection!(Vehicle, vehicles);
impl_has_collection!(Driver, drivers);
impl_has_collection!(Trip, trips);
impl_has_collection!(MaintenanceLog, maintenance_logs);
impl_has_collection!(FuelLog, fuel_logs);

impl Default for FleetStore {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

impl FleetStore {
    pub fn new(id_strategy: IdStrategy) -> Self {
        Self {
            id_strategy,
            vehicles: Collection::new(),
            drivers: Collection::new(),
            trips: Collection::new(),
            maintenance_logs: Collection::new(),
            fuel_logs: Collection::new(),
        }
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.id_strategy
    }

    /// Insert a record built from `draft` under a freshly minted id
    pub fn create<E: Entity>(&mut self, draft: E::Draft) -> FleetResult<EntityId<E>>
    where
        Self: HasCollection<E>,
    {
        let id = self.next_id::<E>();
        let entity = E::from_draft(id.clone(), draft);
        HasCollection::<E>::collection_mut(self).insert(entity)?;
        Ok(id)
    }

    pub fn get<E: Entity>(&self, id: &EntityId<E>) -> Option<&E>
    where
        Self: HasCollection<E>,
    {
        HasCollection::<E>::collection(self).get(id.as_str())
    }

    /// Like [`get`](Self::get) but absent records are an error
    pub fn require<E: Entity>(&self, id: &EntityId<E>) -> FleetResult<&E>
    where
        Self: HasCollection<E>,
    {
        self.get(id)
            .ok_or_else(|| FleetError::not_found(E::KIND, id.as_str()))
    }

    /// Shallow-merge `patch` into the record
    pub fn update<E: Entity>(&mut self, id: &EntityId<E>, patch: E::Patch) -> FleetResult<&E>
    where
        Self: HasCollection<E>,
    {
        HasCollection::<E>::collection_mut(self).modify(id.as_str(), |entity| {
            patch.apply_to(entity)
        })
    }

    pub fn list<E: Entity>(&self) -> &[E]
    where
        Self: HasCollection<E>,
    {
        HasCollection::<E>::collection(self).list()
    }

    /// Identifier the next `create` of this kind would use.
    ///
    /// Sequential ids are deterministic; UUID ids differ on every call.
    pub fn next_id<E: Entity>(&self) -> EntityId<E>
    where
        Self: HasCollection<E>,
    {
        HasCollection::<E>::collection(self).next_id(self.id_strategy)
    }

    pub(crate) fn insert<E: Entity>(&mut self, entity: E) -> FleetResult<()>
    where
        Self: HasCollection<E>,
    {
        HasCollection::<E>::collection_mut(self).insert(entity)
    }

    pub(crate) fn modify<E: Entity>(
        &mut self,
        id: &EntityId<E>,
        change: impl FnOnce(&mut E),
    ) -> FleetResult<&E>
    where
        Self: HasCollection<E>,
    {
        HasCollection::<E>::collection_mut(self).modify(id.as_str(), change)
    }

    /// Version of any record by kind, 0 when absent
    pub fn version_of(&self, kind: EntityKind, id: &str) -> u64 {
        match kind {
            EntityKind::Vehicle => self.vehicles.version(id),
            EntityKind::Driver => self.drivers.version(id),
            EntityKind::Trip => self.trips.version(id),
            EntityKind::MaintenanceLog => self.maintenance_logs.version(id),
            EntityKind::FuelLog => self.fuel_logs.version(id),
        }
    }

    /// Compare-and-swap guard: fail if the record moved past `expected`
    pub fn check_version(&self, kind: EntityKind, id: &str, expected: u64) -> FleetResult<()> {
        let actual = self.version_of(kind, id);
        if actual != expected {
            return Err(FleetError::ConcurrencyConflict {
                kind,
                id: id.to_string(),
                expected,
                actual,
            });
        }
        Ok(())
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        self.vehicles.list()
    }

    pub fn drivers(&self) -> &[Driver] {
        self.drivers.list()
    }

    pub fn trips(&self) -> &[Trip] {
        self.trips.list()
    }

    pub fn maintenance_logs(&self) -> &[MaintenanceLog] {
        self.maintenance_logs.list()
    }

    pub fn fuel_logs(&self) -> &[FuelLog] {
        self.fuel_logs.list()
    }

    /// The dispatched trip holding this vehicle, if any
    pub fn active_trip_for_vehicle(&self, vehicle_id: &VehicleId) -> Option<&Trip> {
        self.trips()
            .iter()
            .find(|t| t.status == TripStatus::Dispatched && &t.vehicle_id == vehicle_id)
    }

    /// The dispatched trip holding this driver, if any
    pub fn active_trip_for_driver(&self, driver_id: &DriverId) -> Option<&Trip> {
        self.trips()
            .iter()
            .find(|t| t.status == TripStatus::Dispatched && &t.driver_id == driver_id)
    }

    /// Scheduled or in-progress work on a vehicle
    pub fn open_maintenance_for_vehicle<'a>(
        &'a self,
        vehicle_id: &'a VehicleId,
    ) -> impl Iterator<Item = &'a MaintenanceLog> + 'a {
        self.maintenance_logs()
            .iter()
            .filter(move |m| &m.vehicle_id == vehicle_id && m.status.is_open())
    }

    /// Owned copy of all five collections for the query layer
    pub fn snapshot(&self) -> FleetSnapshot {
        FleetSnapshot {
            vehicles: self.vehicles().to_vec(),
            drivers: self.drivers().to_vec(),
            trips: self.trips().to_vec(),
            maintenance_logs: self.maintenance_logs().to_vec(),
            fuel_logs: self.fuel_logs().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewVehicle, VehiclePatch, VehicleStatus, VehicleType};
    use chrono::NaiveDate;

    fn new_vehicle(plate: &str) -> NewVehicle {
        NewVehicle {
            name: format!("Van {plate}"),
            vehicle_type: VehicleType::Van,
            license_plate: plate.to_string(),
            max_capacity: 500.0,
            odometer: 1000.0,
            region: "East".to_string(),
            acquisition_cost: 35000.0,
            added_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_sequential_ids_per_kind() {
        let mut store = FleetStore::default();
        let a: VehicleId = store.create(new_vehicle("A-1")).unwrap();
        let b: VehicleId = store.create(new_vehicle("A-2")).unwrap();

        assert_eq!(a.as_str(), "v1");
        assert_eq!(b.as_str(), "v2");
        assert_eq!(store.next_id::<Vehicle>().as_str(), "v3");
        assert_eq!(store.next_id::<Trip>().as_str(), "t1");
    }

    #[test]
    fn test_uuid_ids_are_unique() {
        let mut store = FleetStore::new(IdStrategy::Uuid);
        let a: VehicleId = store.create(new_vehicle("A-1")).unwrap();
        let b: VehicleId = store.create(new_vehicle("A-2")).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.vehicles().len(), 2);
    }

    #[test]
    fn test_update_is_shallow_merge() {
        let mut store = FleetStore::default();
        let id: VehicleId = store.create(new_vehicle("A-1")).unwrap();

        let updated = store
            .update(
                &id,
                VehiclePatch {
                    name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.license_plate, "A-1");
        assert_eq!(updated.status, VehicleStatus::Available);
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let mut store = FleetStore::default();
        let err = store
            .update(&VehicleId::new("v99"), VehiclePatch::default())
            .unwrap_err();
        assert_eq!(err, FleetError::not_found(EntityKind::Vehicle, "v99"));
    }

    #[test]
    fn test_versions_track_writes() {
        let mut store = FleetStore::default();
        let id: VehicleId = store.create(new_vehicle("A-1")).unwrap();
        assert_eq!(store.version_of(EntityKind::Vehicle, id.as_str()), 1);

        store.update(&id, VehiclePatch::default()).unwrap();
        assert_eq!(store.version_of(EntityKind::Vehicle, id.as_str()), 2);

        assert!(store.check_version(EntityKind::Vehicle, id.as_str(), 2).is_ok());
        assert!(matches!(
            store.check_version(EntityKind::Vehicle, id.as_str(), 1),
            Err(FleetError::ConcurrencyConflict {
                expected: 1,
                actual: 2,
                ..
            })
        ));
        assert_eq!(store.version_of(EntityKind::Vehicle, "v42"), 0);
    }

    #[test]
    fn test_insert_rejects_existing_id() {
        let mut store = FleetStore::default();
        let id: VehicleId = store.create(new_vehicle("A-1")).unwrap();
        let duplicate = store.require(&id).unwrap().clone();
        assert!(store.insert(duplicate).is_err());
        assert_eq!(store.vehicles().len(), 1);
    }

    #[test]
    fn test_inserted_ids_advance_the_counter() {
        let mut store = FleetStore::default();
        let published = Vehicle::from_draft(VehicleId::new("v2"), new_vehicle("B-2"));
        store.insert(published).unwrap();
        assert_eq!(store.next_id::<Vehicle>().as_str(), "v3");

        let id: VehicleId = store.create(new_vehicle("C-3")).unwrap();
        assert_eq!(id.as_str(), "v3");
        let plates: Vec<_> = store
            .vehicles()
            .iter()
            .map(|v| (v.id.as_str(), v.license_plate.as_str()))
            .collect();
        assert_eq!(plates, vec![("v2", "B-2"), ("v3", "C-3")]);

        // Ids outside the sequential scheme leave the counter alone
        let custom = Vehicle::from_draft(VehicleId::new("truck-9"), new_vehicle("X-9"));
        store.insert(custom).unwrap();
        assert_eq!(store.next_id::<Vehicle>().as_str(), "v4");
    }

    #[test]
    fn test_create_never_hands_out_a_taken_id() {
        let mut store = FleetStore::default();
        for id in ["v5", "v1"] {
            let published = Vehicle::from_draft(VehicleId::new(id), new_vehicle(id));
            store.insert(published).unwrap();
        }
        let id: VehicleId = store.create(new_vehicle("N-1")).unwrap();
        assert_eq!(id.as_str(), "v6");
        assert_eq!(store.vehicles().len(), 3);
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let mut store = FleetStore::default();
        for plate in ["C", "A", "B"] {
            let _: VehicleId = store.create(new_vehicle(plate)).unwrap();
        }
        let plates: Vec<_> = store
            .list::<Vehicle>()
            .iter()
            .map(|v| v.license_plate.as_str())
            .collect();
        assert_eq!(plates, vec!["C", "A", "B"]);
    }
}
