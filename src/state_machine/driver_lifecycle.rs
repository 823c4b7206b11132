// Copyright (c) 2025 - Cowboy AI, Inc.
//! Driver Lifecycle State Machine
//!
//! - Assign: OnDuty → OnTrip
//! - Release: OnTrip → OnDuty (trip completed)
//! - TripCancelled: OnTrip → OnDuty, any other status unchanged
//! - SetDuty(target): OnDuty | OffDuty | Suspended → target, where target
//!   is one of those three. A driver on a trip is released only by the trip.

use super::{StateMachine, TransitionError, TransitionOutput, TransitionResult};
use crate::domain::DriverStatus;

/// Driver lifecycle input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCommand {
    Assign,
    Release,
    TripCancelled,
    SetDuty(DriverStatus),
}

impl StateMachine for DriverStatus {
    type Input = DriverCommand;
    type Output = TransitionOutput;

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        use DriverCommand::*;
        use DriverStatus::*;

        match (self, input) {
            (OnDuty, Assign) => Ok((OnTrip, TransitionOutput::ok())),
            (_, Assign) => Err(TransitionError::invalid(self, input)),

            (OnTrip, Release) => Ok((OnDuty, TransitionOutput::ok())),
            (_, Release) => Err(TransitionError::invalid(self, input)),

            (OnTrip, TripCancelled) => Ok((OnDuty, TransitionOutput::ok())),
            (_, TripCancelled) => Ok((*self, TransitionOutput::unchanged())),

            (_, SetDuty(OnTrip)) => Err(TransitionError::BusinessRuleViolation(
                "On Trip is set by dispatch only".to_string(),
            )),
            (OnTrip, SetDuty(_)) => Err(TransitionError::BusinessRuleViolation(
                "Driver is on an active trip".to_string(),
            )),
            (current, SetDuty(target)) if current == target => {
                Ok((*target, TransitionOutput::unchanged()))
            }
            (_, SetDuty(target)) => Ok((*target, TransitionOutput::ok())),
        }
    }

    fn valid_inputs(&self) -> Vec<Self::Input> {
        use DriverCommand::*;
        use DriverStatus::*;

        match self {
            OnTrip => vec![Release, TripCancelled],
            OnDuty => vec![
                Assign,
                TripCancelled,
                SetDuty(OnDuty),
                SetDuty(OffDuty),
                SetDuty(Suspended),
            ],
            OffDuty | Suspended => vec![
                TripCancelled,
                SetDuty(OnDuty),
                SetDuty(OffDuty),
                SetDuty(Suspended),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DriverCommand::*;
    use DriverStatus::*;

    #[test]
    fn test_assign_and_release() {
        let (on_trip, _) = OnDuty.transition(&Assign).unwrap();
        assert_eq!(on_trip, OnTrip);
        let (back, _) = on_trip.transition(&Release).unwrap();
        assert_eq!(back, OnDuty);
    }

    #[test]
    fn test_only_on_duty_drivers_can_be_assigned() {
        for status in [OffDuty, Suspended, OnTrip] {
            assert!(!status.can_transition(&Assign));
        }
    }

    #[test]
    fn test_manual_status_changes() {
        let (next, output) = OnDuty.transition(&SetDuty(Suspended)).unwrap();
        assert_eq!(next, Suspended);
        assert!(output.changed);

        let (next, output) = OffDuty.transition(&SetDuty(OffDuty)).unwrap();
        assert_eq!(next, OffDuty);
        assert!(!output.changed);
    }

    #[test]
    fn test_manual_change_cannot_touch_on_trip() {
        assert!(OnDuty.transition(&SetDuty(OnTrip)).is_err());
        assert!(OnTrip.transition(&SetDuty(OffDuty)).is_err());
    }

    #[test]
    fn test_valid_inputs_agree_with_table() {
        let mut all = vec![Assign, Release, TripCancelled];
        all.extend(DriverStatus::ALL.map(SetDuty));
        for status in DriverStatus::ALL {
            let valid = status.valid_inputs();
            for input in &all {
                assert_eq!(valid.contains(input), status.can_transition(input));
            }
        }
    }
}
