// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Random command sequences against a small fleet: status coupling, atomic
//! rejection and replay of the event history.

mod fleet_invariants;
