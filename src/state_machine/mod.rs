// Copyright (c) 2025 - Cowboy AI, Inc.
//! Finite State Machine Abstractions
//!
//! Generic state machine types and one lifecycle table per fleet entity.
//! All transitions are pure functions: the table says whether a status may
//! move under an input, what it moves to, and which warnings the move
//! carries. Cross-entity effects are applied by the command handlers in
//! [`crate::aggregate`], which look up each affected entity's table.
//!
//! # State Machine Type
//!
//! Every lifecycle is a **Mealy machine**: the output (warnings) depends on
//! both the current state and the input.
//!
//! ```text
//! (State, Input) → (State, Output)
//! ```
//!
//! # Lifecycles
//!
//! - [`vehicle_lifecycle`] - Available / OnTrip / InShop / Retired
//! - [`driver_lifecycle`] - OnDuty / OffDuty / Suspended / OnTrip
//! - [`trip_lifecycle`] - Draft / Dispatched / Completed / Cancelled
//! - [`maintenance_lifecycle`] - Scheduled / InProgress / Completed
//!
//! # Design Principles
//!
//! 1. **Type Safety**: States are strongly typed enums
//! 2. **Pure Functions**: All transitions are pure
//! 3. **Explicit**: Every (state, input) pair is matched; illegal pairs are errors

pub mod driver_lifecycle;
pub mod maintenance_lifecycle;
pub mod trip_lifecycle;
pub mod vehicle_lifecycle;

pub use driver_lifecycle::DriverCommand;
pub use maintenance_lifecycle::MaintenanceCommand;
pub use trip_lifecycle::TripCommand;
pub use vehicle_lifecycle::VehicleCommand;

/// Result of a state transition
pub type TransitionResult<S> = Result<S, TransitionError>;

/// Errors that can occur during state transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Transition from current state under this input is not allowed
    #[error("Invalid transition from {from} via {input}")]
    InvalidTransition { from: String, input: String },

    /// Business rule prevents transition
    #[error("Business rule violated: {0}")]
    BusinessRuleViolation(String),
}

impl TransitionError {
    pub(crate) fn invalid(from: impl std::fmt::Display, input: impl std::fmt::Debug) -> Self {
        TransitionError::InvalidTransition {
            from: from.to_string(),
            input: format!("{:?}", input),
        }
    }
}

/// Trait for finite state machines
pub trait StateMachine: Sized + Clone {
    /// Input type that triggers transitions
    type Input;

    /// Output type produced by transitions (use () if none)
    type Output;

    /// Attempt to transition to a new state given an input
    ///
    /// # Returns
    /// - Ok((new_state, output)) if transition is valid
    /// - Err(TransitionError) if transition is invalid
    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)>;

    /// Check if a transition is valid without performing it
    fn can_transition(&self, input: &Self::Input) -> bool {
        self.transition(input).is_ok()
    }

    /// Get all valid inputs from current state (if enumerable)
    fn valid_inputs(&self) -> Vec<Self::Input>
    where
        Self::Input: Clone,
    {
        Vec::new()
    }
}

/// Transition output with metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionOutput {
    /// Warnings generated during transition
    pub warnings: Vec<String>,

    /// Whether the transition changed the state
    pub changed: bool,
}

impl TransitionOutput {
    /// A state change with no warnings
    pub fn ok() -> Self {
        Self {
            warnings: Vec::new(),
            changed: true,
        }
    }

    /// A state change with warnings
    pub fn with_warnings(warnings: Vec<String>) -> Self {
        Self {
            warnings,
            changed: true,
        }
    }

    /// Accepted input that leaves the state as it was
    pub fn unchanged() -> Self {
        Self {
            warnings: Vec::new(),
            changed: false,
        }
    }
}
