// Copyright (c) 2025 - Cowboy AI, Inc.
//! Maintenance Log Lifecycle
//!
//! Scheduled → InProgress → Completed, with Scheduled → Completed allowed
//! for work closed out in one visit. Completed is terminal.

use super::{StateMachine, TransitionError, TransitionOutput, TransitionResult};
use crate::domain::MaintenanceStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceCommand {
    Start,
    Complete,
}

impl MaintenanceCommand {
    /// Input that moves a log to `target`, if any does
    pub fn toward(target: MaintenanceStatus) -> Option<Self> {
        match target {
            MaintenanceStatus::Scheduled => None,
            MaintenanceStatus::InProgress => Some(MaintenanceCommand::Start),
            MaintenanceStatus::Completed => Some(MaintenanceCommand::Complete),
        }
    }
}

impl StateMachine for MaintenanceStatus {
    type Input = MaintenanceCommand;
    type Output = TransitionOutput;

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        use MaintenanceCommand::*;
        use MaintenanceStatus::*;

        match (self, input) {
            (Scheduled, Start) => Ok((InProgress, TransitionOutput::ok())),
            (Scheduled | InProgress, Complete) => Ok((Completed, TransitionOutput::ok())),
            _ => Err(TransitionError::invalid(self, input)),
        }
    }

    fn valid_inputs(&self) -> Vec<Self::Input> {
        use MaintenanceCommand::*;
        use MaintenanceStatus::*;

        match self {
            Scheduled => vec![Start, Complete],
            InProgress => vec![Complete],
            Completed => Vec::new(),
        }
    }
}
