// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer for Fleet Operations
//!
//! Orchestrates the pure command handlers, the store commit and the event
//! history.
//!
//! # Architecture
//!
//! ```text
//! Client Request
//!     ↓
//! Service Layer (this module)
//!     ↓
//! Command Handler → CommandOutcome
//!     ↓
//! Commit (version check + apply) → FleetStore
//!     ↓
//! Event history / tracing
//! ```
//!
//! # Design Principles
//!
//! 1. **Transaction Boundaries**: one command, one commit
//! 2. **Command/Query Separation**: commands go through `execute`, queries
//!    read a [`FleetSnapshot`](crate::store::FleetSnapshot)
//! 3. **Pure Domain Logic**: the service only sequences pure functions
//!
//! # Example
//!
//! ```rust,ignore
//! use fleet_ops::service::{FleetOperations, FleetService, SharedFleetService};
//!
//! let service = SharedFleetService::new(FleetService::new(config));
//! let trip = service.dispatch_trip(command).await?;
//! let snapshot = service.snapshot().await;
//! ```

pub mod fleet;
pub mod shared;

pub use fleet::{CommandReceipt, FleetService};
pub use shared::{FleetOperations, SharedFleetService};
