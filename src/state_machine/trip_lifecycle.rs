// Copyright (c) 2025 - Cowboy AI, Inc.
//! Trip Lifecycle State Machine
//!
//! ```text
//! Draft ──Dispatch──▶ Dispatched ──Complete──▶ Completed
//!   │                     │
//!   └──────Cancel─────────┴──────────────────▶ Cancelled
//! ```
//!
//! Completed and Cancelled are terminal.

use super::{StateMachine, TransitionError, TransitionOutput, TransitionResult};
use crate::domain::TripStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripCommand {
    Dispatch,
    Complete,
    Cancel,
}

impl StateMachine for TripStatus {
    type Input = TripCommand;
    type Output = TransitionOutput;

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        use TripCommand::*;
        use TripStatus::*;

        match (self, input) {
            (Draft, Dispatch) => Ok((Dispatched, TransitionOutput::ok())),
            (Dispatched, Complete) => Ok((Completed, TransitionOutput::ok())),
            (Draft | Dispatched, Cancel) => Ok((Cancelled, TransitionOutput::ok())),
            _ => Err(TransitionError::invalid(self, input)),
        }
    }

    fn valid_inputs(&self) -> Vec<Self::Input> {
        use TripCommand::*;
        use TripStatus::*;

        match self {
            Draft => vec![Dispatch, Cancel],
            Dispatched => vec![Complete, Cancel],
            Completed | Cancelled => Vec::new(),
        }
    }
}
