// Copyright (c) 2025 - Cowboy AI, Inc.
//! Shared Fleet Service
//!
//! [`FleetService`] behind `Arc<tokio::sync::RwLock<_>>` for embedding in a
//! multi-client backend.
//!
//! # Transaction Semantics
//!
//! 1. Plan under the read lock (many callers at once)
//! 2. Commit under the write lock, re-checking every version the plan read
//! 3. On a version conflict, plan again under the write lock and commit
//!
//! Step 3 cannot conflict again: nothing else writes while the write lock
//! is held. Two dispatches racing for one vehicle therefore end with one
//! trip and one `VehicleUnavailable`.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::aggregate::commands::*;
use crate::domain::{MaintenanceLog, Trip, TripId};
use crate::errors::{FleetError, FleetResult};
use crate::service::fleet::{subject_record, CommandReceipt, FleetService};
use crate::store::FleetSnapshot;

/// Async fleet operations
#[async_trait]
pub trait FleetOperations: Send + Sync {
    /// Plan and commit any command
    async fn execute(&self, command: FleetCommand) -> FleetResult<CommandReceipt>;

    async fn dispatch_trip(&self, command: DispatchTripCommand) -> FleetResult<Trip>;

    async fn complete_trip(&self, command: CompleteTripCommand) -> FleetResult<Trip>;

    async fn cancel_trip(&self, trip_id: TripId) -> FleetResult<Trip>;

    async fn log_maintenance(&self, command: LogMaintenanceCommand) -> FleetResult<MaintenanceLog>;

    /// Consistent copy of the store
    async fn snapshot(&self) -> FleetSnapshot;
}

#[derive(Debug, Clone)]
pub struct SharedFleetService {
    inner: Arc<RwLock<FleetService>>,
}

impl SharedFleetService {
    pub fn new(service: FleetService) -> Self {
        Self {
            inner: Arc::new(RwLock::new(service)),
        }
    }

    /// Run a query under the read lock
    pub async fn read<R>(&self, query: impl FnOnce(&FleetService) -> R) -> R {
        let guard = self.inner.read().await;
        query(&guard)
    }

    /// Execute a command, then read from the store before releasing the
    /// write lock
    async fn execute_with<T>(
        &self,
        command: FleetCommand,
        read_back: impl FnOnce(&FleetService, &CommandReceipt) -> FleetResult<T> + Send,
    ) -> FleetResult<T> {
        let name = command.name();
        let planned = {
            let guard = self.inner.read().await;
            guard.plan(command.clone())?
        };

        let mut guard = self.inner.write().await;
        let receipt = match guard.commit(name, planned) {
            Err(FleetError::ConcurrencyConflict { kind, id, .. }) => {
                debug!("{} {} moved while planning {}, planning again", kind, id, name);
                let outcome = guard.plan(command)?;
                guard.commit(name, outcome)?
            }
            other => other?,
        };
        read_back(&guard, &receipt)
    }
}

#[async_trait]
impl FleetOperations for SharedFleetService {
    async fn execute(&self, command: FleetCommand) -> FleetResult<CommandReceipt> {
        self.execute_with(command, |_, receipt| Ok(receipt.clone()))
            .await
    }

    async fn dispatch_trip(&self, command: DispatchTripCommand) -> FleetResult<Trip> {
        self.execute_with(command.into(), |service, receipt| {
            subject_record(service.store(), receipt)
        })
        .await
    }

    async fn complete_trip(&self, command: CompleteTripCommand) -> FleetResult<Trip> {
        self.execute_with(command.into(), |service, receipt| {
            subject_record(service.store(), receipt)
        })
        .await
    }

    async fn cancel_trip(&self, trip_id: TripId) -> FleetResult<Trip> {
        self.execute_with(CancelTripCommand { trip_id }.into(), |service, receipt| {
            subject_record(service.store(), receipt)
        })
        .await
    }

    async fn log_maintenance(&self, command: LogMaintenanceCommand) -> FleetResult<MaintenanceLog> {
        self.execute_with(command.into(), |service, receipt| {
            subject_record(service.store(), receipt)
        })
        .await
    }

    async fn snapshot(&self) -> FleetSnapshot {
        self.read(FleetService::snapshot).await
    }
}
