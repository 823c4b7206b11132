// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Entry Point
//!
//! This test suite uses proptest to drive the fleet through arbitrary
//! command sequences and check the status coupling that must hold after
//! every one of them.

mod fixtures;
mod property;
