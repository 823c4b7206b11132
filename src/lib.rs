// Copyright (c) 2025 - Cowboy AI, Inc.
//! Fleet operations domain core
//!
//! Tracks vehicles, drivers, trips, maintenance and fuel spend, enforces the
//! rules that couple vehicle, driver and trip lifecycles, and derives fleet
//! analytics from a consistent snapshot.
//!
//! # Layers
//!
//! ```text
//! service ──▶ aggregate (handlers, commit) ──▶ store
//!                  │                             │
//!           state_machine / domain          snapshot ──▶ projection ──▶ export
//! ```
//!
//! - [`store`]: the five entity collections with per-record versions
//! - [`aggregate`]: pure command handlers producing [`events`], committed
//!   atomically with compare-and-swap on record versions
//! - [`state_machine`]: one lifecycle table per status-bearing entity
//! - [`projection`]: read-only KPIs and reports over a snapshot
//! - [`service`]: sync facade and a lock-serialized async wrapper

pub mod aggregate;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod export;
pub mod projection;
pub mod seed;
pub mod service;
pub mod state_machine;
pub mod store;

// Re-export commonly used types
pub use aggregate::{CommandOutcome, FleetCommand};
pub use config::{FleetConfig, RulePolicy};
pub use errors::{FleetError, FleetResult};
pub use events::{FleetEvent, RecordedEvent};
pub use service::{CommandReceipt, FleetOperations, FleetService, SharedFleetService};
pub use state_machine::{StateMachine, TransitionError, TransitionOutput};
pub use store::{FleetSnapshot, FleetStore};
