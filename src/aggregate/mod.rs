// Copyright (c) 2025 - Cowboy AI, Inc.
//! Domain Rules Engine
//!
//! Commands are handled by pure functions over the store; the result is a
//! plan of events that is committed in one step.
//!
//! # Command Flow
//!
//! ```text
//! Command → handle_*(&FleetStore) → CommandOutcome → commit → FleetStore
//!    ↓            ↓                       ↓              ↓
//! Intent     Validation              Facts + reads    CAS + apply
//! ```
//!
//! # Design Principles
//!
//! ## 1. Command-Event Separation
//! - Commands express intent (what should happen)
//! - Events express facts (what did happen)
//! - Commands can fail; a committed plan cannot half-apply
//!
//! ## 2. Status Coupling via Lifecycle Tables
//! Every status change a command causes is looked up in the entity's
//! [`StateMachine`](crate::state_machine::StateMachine) table. Handlers
//! never assign statuses directly.
//!
//! ## 3. Compare-and-Swap Commit
//! Handlers note the version of each record they read. [`commit`] refuses a
//! plan when any of those records moved, so a vehicle's Available → OnTrip
//! flip is never a blind read-then-write.
//!
//! ## 4. Fold
//! [`replay`] rebuilds a store from its event history.

pub mod apply;
pub mod commands;
pub mod handlers;

pub use apply::{apply_event, commit, replay};
pub use commands::*;
pub use handlers::{handle, CommandOutcome, VersionExpectation};
