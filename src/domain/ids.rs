// Copyright (c) 2025 - Cowboy AI, Inc.
//! Typed entity identifiers
//!
//! Identifiers are opaque strings. The phantom type parameter keeps a
//! `VehicleId` from being passed where a `DriverId` is expected while the
//! wire form stays a plain string.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use uuid::Uuid;

/// Kinds of entity held by the fleet store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Vehicle,
    Driver,
    Trip,
    MaintenanceLog,
    FuelLog,
}

impl EntityKind {
    /// Prefix used by sequential identifiers
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Vehicle => "v",
            EntityKind::Driver => "d",
            EntityKind::Trip => "t",
            EntityKind::MaintenanceLog => "m",
            EntityKind::FuelLog => "f",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Vehicle => "Vehicle",
            EntityKind::Driver => "Driver",
            EntityKind::Trip => "Trip",
            EntityKind::MaintenanceLog => "Maintenance log",
            EntityKind::FuelLog => "Fuel log",
        };
        f.write_str(name)
    }
}

/// How the store mints new identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// `<prefix><n>` with one counter per entity kind (`v1`, `d1`, ...)
    #[default]
    Sequential,
    /// UUID v7 strings
    Uuid,
}

impl IdStrategy {
    /// Mint the identifier for the `ordinal`-th record of `kind` (1-based)
    pub fn mint(&self, kind: EntityKind, ordinal: u64) -> String {
        match self {
            IdStrategy::Sequential => format!("{}{}", kind.prefix(), ordinal),
            IdStrategy::Uuid => Uuid::now_v7().to_string(),
        }
    }
}

/// Identifier of an entity of type `T`
pub struct EntityId<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> EntityId<T> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> Clone for EntityId<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T> PartialEq for EntityId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for EntityId<T> {}

impl<T> Hash for EntityId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.value)
    }
}

impl<T> fmt::Display for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> From<&str> for EntityId<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T> From<String> for EntityId<T> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<T> Serialize for EntityId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T> Deserialize<'de> for EntityId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn test_sequential_ids_carry_kind_prefix() {
        let strategy = IdStrategy::Sequential;
        assert_eq!(strategy.mint(EntityKind::Vehicle, 1), "v1");
        assert_eq!(strategy.mint(EntityKind::MaintenanceLog, 12), "m12");
    }

    #[test]
    fn test_uuid_ids_do_not_repeat() {
        let strategy = IdStrategy::Uuid;
        let a = strategy.mint(EntityKind::Trip, 1);
        let b = strategy.mint(EntityKind::Trip, 1);
        assert_ne!(a, b);
    }

    #[test]
    fn test_entity_id_serializes_as_plain_string() {
        let id: EntityId<Marker> = EntityId::new("v2");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"v2\"");

        let back: EntityId<Marker> = serde_json::from_str("\"v2\"").unwrap();
        assert_eq!(back, id);
    }
}
