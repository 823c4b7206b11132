// Copyright (c) 2025 - Cowboy AI, Inc.
//! Vehicle Lifecycle State Machine
//!
//! # States
//!
//! - Available: Ready for dispatch
//! - OnTrip: Bound to a dispatched trip
//! - InShop: Under maintenance
//! - Retired: Soft-deleted
//!
//! # Inputs
//!
//! - Dispatch: Available → OnTrip
//! - ReturnFromTrip: OnTrip → Available (trip completed)
//! - TripCancelled: OnTrip → Available, any other status unchanged
//! - EnterShop: Any → InShop (open maintenance logged)
//! - Reactivate: InShop | Retired → Available
//! - Retire: Available | InShop → Retired
//!
//! `EnterShop` never fails. A vehicle sent to the shop while on a trip
//! stays bound to that trip; the output carries a warning so the caller can
//! surface it.

use super::{StateMachine, TransitionError, TransitionOutput, TransitionResult};
use crate::domain::VehicleStatus;

/// Vehicle lifecycle input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleCommand {
    Dispatch,
    ReturnFromTrip,
    TripCancelled,
    EnterShop,
    Reactivate,
    Retire,
}

impl StateMachine for VehicleStatus {
    type Input = VehicleCommand;
    type Output = TransitionOutput;

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        use VehicleCommand::*;
        use VehicleStatus::*;

        match (self, input) {
            (Available, Dispatch) => Ok((OnTrip, TransitionOutput::ok())),
            (_, Dispatch) => Err(TransitionError::invalid(self, input)),

            (OnTrip, ReturnFromTrip) => Ok((Available, TransitionOutput::ok())),
            (InShop, ReturnFromTrip) => Ok((
                Available,
                TransitionOutput::with_warnings(vec![
                    "Vehicle released from shop by trip completion".to_string(),
                ]),
            )),
            (Available | Retired, ReturnFromTrip) => Err(TransitionError::invalid(self, input)),

            // Keyed on status alone: at most one trip can hold the vehicle
            (OnTrip, TripCancelled) => Ok((Available, TransitionOutput::ok())),
            (_, TripCancelled) => Ok((*self, TransitionOutput::unchanged())),

            (OnTrip, EnterShop) => Ok((
                InShop,
                TransitionOutput::with_warnings(vec![
                    "Vehicle sent to shop while on an active trip".to_string(),
                ]),
            )),
            (Retired, EnterShop) => Ok((
                InShop,
                TransitionOutput::with_warnings(vec![
                    "Retired vehicle sent to shop".to_string(),
                ]),
            )),
            (InShop, EnterShop) => Ok((InShop, TransitionOutput::unchanged())),
            (Available, EnterShop) => Ok((InShop, TransitionOutput::ok())),

            (InShop | Retired, Reactivate) => Ok((Available, TransitionOutput::ok())),
            (Available | OnTrip, Reactivate) => Err(TransitionError::invalid(self, input)),

            (Available | InShop, Retire) => Ok((Retired, TransitionOutput::ok())),
            (OnTrip, Retire) => Err(TransitionError::BusinessRuleViolation(
                "Cannot retire a vehicle on an active trip".to_string(),
            )),
            (Retired, Retire) => Err(TransitionError::invalid(self, input)),
        }
    }

    fn valid_inputs(&self) -> Vec<Self::Input> {
        use VehicleCommand::*;
        use VehicleStatus::*;

        match self {
            Available => vec![Dispatch, TripCancelled, EnterShop, Retire],
            OnTrip => vec![ReturnFromTrip, TripCancelled, EnterShop],
            InShop => vec![ReturnFromTrip, TripCancelled, EnterShop, Reactivate, Retire],
            Retired => vec![TripCancelled, EnterShop, Reactivate],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use VehicleCommand::*;
    use VehicleStatus::*;

    #[test]
    fn test_dispatch_only_from_available() {
        let (next, output) = Available.transition(&Dispatch).unwrap();
        assert_eq!(next, OnTrip);
        assert!(output.warnings.is_empty());

        for status in [OnTrip, InShop, Retired] {
            assert!(!status.can_transition(&Dispatch));
        }
    }

    #[test]
    fn test_trip_return_frees_vehicle() {
        let (next, _) = OnTrip.transition(&ReturnFromTrip).unwrap();
        assert_eq!(next, Available);
    }

    #[test]
    fn test_cancellation_reverts_only_on_trip() {
        assert_eq!(OnTrip.transition(&TripCancelled).unwrap().0, Available);

        for status in [Available, InShop, Retired] {
            let (next, output) = status.transition(&TripCancelled).unwrap();
            assert_eq!(next, status);
            assert!(!output.changed);
        }
    }

    #[test]
    fn test_enter_shop_from_any_status() {
        for status in VehicleStatus::ALL {
            let (next, _) = status.transition(&EnterShop).unwrap();
            assert_eq!(next, InShop);
        }
    }

    #[test]
    fn test_enter_shop_on_trip_warns() {
        let (_, output) = OnTrip.transition(&EnterShop).unwrap();
        assert_eq!(output.warnings.len(), 1);
    }

    #[test]
    fn test_retire_on_trip_is_business_violation() {
        assert!(matches!(
            OnTrip.transition(&Retire),
            Err(TransitionError::BusinessRuleViolation(_))
        ));
    }

    #[test]
    fn test_valid_inputs_agree_with_table() {
        let all = [Dispatch, ReturnFromTrip, TripCancelled, EnterShop, Reactivate, Retire];
        for status in VehicleStatus::ALL {
            let valid = status.valid_inputs();
            for input in all {
                assert_eq!(
                    valid.contains(&input),
                    status.can_transition(&input),
                    "{status:?} / {input:?}"
                );
            }
        }
    }
}
