// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Fleet Status Coupling
//!
//! Any sequence of commands, accepted or rejected, must leave the fleet in a
//! state where vehicles, drivers and trips agree with each other. Rejected
//! commands must leave no trace, and the recorded events must rebuild the
//! same fleet.

use std::collections::HashMap;

use fleet_ops::aggregate::{
    replay, CancelTripCommand, CompleteTripCommand, CreateDraftTripCommand,
    DispatchDraftTripCommand, FleetCommand, ReactivateVehicleCommand, RetireVehicleCommand,
    SetDriverDutyStatusCommand, UpdateMaintenanceStatusCommand,
};
use fleet_ops::domain::{
    DriverId, DriverStatus, IdStrategy, MaintenanceStatus, TripStatus, VehicleId, VehicleStatus,
    VehicleType,
};
use fleet_ops::{FleetConfig, FleetService, FleetSnapshot, RulePolicy};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use crate::fixtures::{dispatch, dispatch_date, driver, maintenance, truck, van, date};

// ============================================================================
// Fleet Under Test
// ============================================================================

/// Three vehicles (van, truck, bike) and three drivers with overlapping
/// license categories, built through commands so the history covers them
fn small_fleet(rules: RulePolicy) -> FleetService {
    let config = FleetConfig {
        rules,
        history_limit: 100_000,
        ..FleetConfig::default()
    };
    let mut service = FleetService::new(config);

    let mut bike = van("BKE-1");
    bike.vehicle_type = VehicleType::Bike;
    bike.max_capacity = 20.0;
    for vehicle in [van("VAN-1"), truck("TRK-1"), bike] {
        service.add_vehicle(vehicle).expect("fixture vehicle");
    }

    let expiry = date(2027, 6, 30);
    for new_driver in [
        driver("Van Bike", &[VehicleType::Van, VehicleType::Bike], expiry),
        driver("Truck Only", &[VehicleType::Truck], expiry),
        driver("All Round", &VehicleType::ALL, expiry),
    ] {
        service.add_driver(new_driver).expect("fixture driver");
    }
    service
}

const VEHICLES: usize = 3;
const DRIVERS: usize = 3;

// ============================================================================
// Operations
// ============================================================================

/// A command with its references still unresolved; trip and log indexes are
/// taken modulo whatever exists when the step runs
#[derive(Debug, Clone)]
enum Op {
    Dispatch { vehicle: usize, driver: usize, cargo: f64 },
    Draft { vehicle: usize, driver: usize, cargo: f64 },
    DispatchDraft { trip: usize },
    Complete { trip: usize, distance: f64 },
    Cancel { trip: usize },
    Maintenance { vehicle: usize, status: MaintenanceStatus },
    AdvanceMaintenance { log: usize, status: MaintenanceStatus },
    Retire { vehicle: usize },
    Reactivate { vehicle: usize },
    SetDuty { driver: usize, status: DriverStatus },
}

fn vehicle_id(n: usize) -> VehicleId {
    VehicleId::new(format!("v{}", n % VEHICLES + 1))
}

fn driver_id(n: usize) -> DriverId {
    DriverId::new(format!("d{}", n % DRIVERS + 1))
}

fn pick<T: Clone>(items: &[T], n: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[n % items.len()].clone())
    }
}

impl Op {
    fn to_command(&self, snapshot: &FleetSnapshot) -> FleetCommand {
        let trip = |n: usize| {
            let trip = pick(&snapshot.trips, n);
            let id = trip.as_ref().map_or_else(|| "t404".into(), |t| t.id.clone());
            (id, trip)
        };

        match self {
            Op::Dispatch { vehicle, driver, cargo } => {
                dispatch(&vehicle_id(*vehicle), &driver_id(*driver), *cargo).into()
            }
            Op::Draft { vehicle, driver, cargo } => CreateDraftTripCommand {
                vehicle_id: vehicle_id(*vehicle),
                driver_id: driver_id(*driver),
                origin: "Depot".to_string(),
                destination: "Site".to_string(),
                cargo_weight: *cargo,
                cargo_description: "Mixed".to_string(),
                revenue: 120.0,
                date: dispatch_date(),
            }
            .into(),
            Op::DispatchDraft { trip: n } => DispatchDraftTripCommand {
                trip_id: trip(*n).0,
                date: dispatch_date(),
            }
            .into(),
            Op::Complete { trip: n, distance } => {
                let (trip_id, trip) = trip(*n);
                let start = trip.and_then(|t| t.start_odometer).unwrap_or(0.0);
                CompleteTripCommand {
                    trip_id,
                    end_odometer: (start + distance).max(0.0),
                    completed_date: date(2026, 3, 2),
                }
                .into()
            }
            Op::Cancel { trip: n } => CancelTripCommand { trip_id: trip(*n).0 }.into(),
            Op::Maintenance { vehicle, status } => {
                maintenance(&vehicle_id(*vehicle), 150.0, *status).into()
            }
            Op::AdvanceMaintenance { log, status } => UpdateMaintenanceStatusCommand {
                log_id: pick(&snapshot.maintenance_logs, *log)
                    .map_or_else(|| "m404".into(), |l| l.id),
                status: *status,
            }
            .into(),
            Op::Retire { vehicle } => RetireVehicleCommand {
                vehicle_id: vehicle_id(*vehicle),
            }
            .into(),
            Op::Reactivate { vehicle } => ReactivateVehicleCommand {
                vehicle_id: vehicle_id(*vehicle),
            }
            .into(),
            Op::SetDuty { driver, status } => SetDriverDutyStatusCommand {
                driver_id: driver_id(*driver),
                status: *status,
            }
            .into(),
        }
    }
}

// ============================================================================
// Property Test Strategies
// ============================================================================

fn maintenance_status() -> impl Strategy<Value = MaintenanceStatus> {
    prop_oneof![
        Just(MaintenanceStatus::Scheduled),
        Just(MaintenanceStatus::InProgress),
        Just(MaintenanceStatus::Completed),
    ]
}

fn duty_status() -> impl Strategy<Value = DriverStatus> {
    prop_oneof![
        3 => Just(DriverStatus::OnDuty),
        1 => Just(DriverStatus::OffDuty),
        1 => Just(DriverStatus::Suspended),
        1 => Just(DriverStatus::OnTrip),
    ]
}

/// Cargo from a bike parcel to beyond the largest truck
fn cargo() -> impl Strategy<Value = f64> {
    prop_oneof![0.0..20.0f64, 0.0..600.0f64, 0.0..12000.0f64]
}

/// Weighted toward dispatch and completion so trips actually cycle
fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..VEHICLES, 0..DRIVERS, cargo())
            .prop_map(|(vehicle, driver, cargo)| Op::Dispatch { vehicle, driver, cargo }),
        1 => (0..VEHICLES, 0..DRIVERS, cargo())
            .prop_map(|(vehicle, driver, cargo)| Op::Draft { vehicle, driver, cargo }),
        1 => (0..8usize).prop_map(|trip| Op::DispatchDraft { trip }),
        3 => (0..8usize, -50.0..900.0f64)
            .prop_map(|(trip, distance)| Op::Complete { trip, distance }),
        2 => (0..8usize).prop_map(|trip| Op::Cancel { trip }),
        1 => (0..VEHICLES, maintenance_status())
            .prop_map(|(vehicle, status)| Op::Maintenance { vehicle, status }),
        1 => (0..8usize, maintenance_status())
            .prop_map(|(log, status)| Op::AdvanceMaintenance { log, status }),
        1 => (0..VEHICLES).prop_map(|vehicle| Op::Retire { vehicle }),
        1 => (0..VEHICLES).prop_map(|vehicle| Op::Reactivate { vehicle }),
        1 => (0..DRIVERS, duty_status())
            .prop_map(|(driver, status)| Op::SetDuty { driver, status }),
    ]
}

fn op_sequence() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op(), 1..60)
}

fn rule_policy() -> impl Strategy<Value = RulePolicy> {
    (any::<bool>(), any::<bool>()).prop_map(|(enforce, restore)| RulePolicy {
        enforce_odometer_monotonic: enforce,
        restore_vehicle_after_maintenance: restore,
    })
}

// ============================================================================
// Invariant Checks
// ============================================================================

fn check_coupling(snapshot: &FleetSnapshot) -> Result<(), TestCaseError> {
    let mut per_vehicle: HashMap<&str, usize> = HashMap::new();
    let mut per_driver: HashMap<&str, usize> = HashMap::new();
    for trip in snapshot.active_trips() {
        *per_vehicle.entry(trip.vehicle_id.as_str()).or_default() += 1;
        *per_driver.entry(trip.driver_id.as_str()).or_default() += 1;

        let vehicle = snapshot.vehicle(&trip.vehicle_id).expect("trip vehicle exists");
        prop_assert!(
            matches!(vehicle.status, VehicleStatus::OnTrip | VehicleStatus::InShop),
            "vehicle {} holds dispatched trip {} while {}",
            vehicle.id,
            trip.id,
            vehicle.status
        );
        prop_assert!(trip.start_odometer.is_some(), "dispatched trip {} has no start", trip.id);
    }

    for vehicle in &snapshot.vehicles {
        let held = per_vehicle.get(vehicle.id.as_str()).copied().unwrap_or(0);
        prop_assert!(held <= 1, "vehicle {} holds {} trips", vehicle.id, held);
        if vehicle.status == VehicleStatus::OnTrip {
            prop_assert_eq!(held, 1, "vehicle {} OnTrip without a trip", vehicle.id);
        }
    }

    for driver in &snapshot.drivers {
        let held = per_driver.get(driver.id.as_str()).copied().unwrap_or(0);
        prop_assert!(held <= 1, "driver {} holds {} trips", driver.id, held);
        prop_assert_eq!(
            held == 1,
            driver.status == DriverStatus::OnTrip,
            "driver {} is {} holding {} trips",
            driver.id,
            driver.status,
            held
        );
        prop_assert!(driver.trips_completed <= driver.trips_total);
    }

    for trip in snapshot.trips.iter().filter(|t| t.status == TripStatus::Completed) {
        prop_assert!(trip.end_odometer.is_some() && trip.completed_date.is_some());
    }

    let mut plates: Vec<&str> = snapshot.vehicles.iter().map(|v| v.license_plate.as_str()).collect();
    plates.sort_unstable();
    plates.dedup();
    prop_assert_eq!(plates.len(), snapshot.vehicles.len(), "plates must stay unique");

    Ok(())
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: Status coupling holds after every command
    ///
    /// At most one dispatched trip per vehicle and per driver, and an OnTrip
    /// status always has the trip behind it.
    #[test]
    fn prop_status_coupling_holds(rules in rule_policy(), ops in op_sequence()) {
        let mut service = small_fleet(rules);
        for op in &ops {
            let command = op.to_command(&service.snapshot());
            let _ = service.execute(command);
            check_coupling(&service.snapshot())?;
        }
    }

    /// Property: Rejected commands leave no trace
    ///
    /// The snapshot and the history are exactly as they were before a
    /// command that failed.
    #[test]
    fn prop_rejection_is_atomic(rules in rule_policy(), ops in op_sequence()) {
        let mut service = small_fleet(rules);
        for op in &ops {
            let before = service.snapshot();
            let recorded = service.history().count();
            let command = op.to_command(&before);

            if let Err(err) = service.execute(command.clone()) {
                prop_assert_eq!(&service.snapshot(), &before, "{} left changes: {}", command.name(), err);
                prop_assert_eq!(service.history().count(), recorded);
            }
        }
    }

    /// Property: The event history rebuilds the fleet
    ///
    /// Folding every recorded event into an empty store yields the same
    /// records as the live store.
    #[test]
    fn prop_history_replays_to_same_fleet(rules in rule_policy(), ops in op_sequence()) {
        let mut service = small_fleet(rules);
        for op in &ops {
            let command = op.to_command(&service.snapshot());
            let _ = service.execute(command);
        }

        let rebuilt = replay(
            IdStrategy::Sequential,
            service.history().map(|recorded| &recorded.event),
        )
        .expect("recorded events replay");
        prop_assert_eq!(rebuilt.snapshot(), service.snapshot());
    }

    /// Property: Validation failures never count as trips
    ///
    /// A driver's trip total only moves on a successful dispatch.
    #[test]
    fn prop_trip_totals_match_dispatches(ops in op_sequence()) {
        let mut service = small_fleet(RulePolicy::default());
        let mut dispatched: HashMap<String, u32> = HashMap::new();
        for op in &ops {
            let command = op.to_command(&service.snapshot());
            if let Ok(receipt) = service.execute(command.clone()) {
                if matches!(command, FleetCommand::DispatchTrip(_) | FleetCommand::DispatchDraftTrip(_)) {
                    let trip = service
                        .snapshot()
                        .trip(&receipt.subject.1.as_str().into())
                        .map(|t| t.driver_id.to_string())
                        .expect("dispatched trip exists");
                    *dispatched.entry(trip).or_default() += 1;
                }
            }
        }

        for driver in &service.snapshot().drivers {
            let expected = dispatched.get(driver.id.as_str()).copied().unwrap_or(0);
            prop_assert_eq!(driver.trips_total, expected, "driver {}", driver.id);
        }
    }
}
