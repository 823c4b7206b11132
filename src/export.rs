// Copyright (c) 2025 - Cowboy AI, Inc.
//! Report rendering
//!
//! The core exposes report rows as data; this module turns them into the
//! CSV and JSON documents the dashboard downloads.

use std::io;

use crate::errors::{FleetError, FleetResult};
use crate::projection::VehicleRoi;
use crate::store::FleetSnapshot;

pub const ROI_REPORT_HEADER: [&str; 5] = [
    "Vehicle",
    "Revenue",
    "Fuel Cost",
    "Maintenance Cost",
    "ROI %",
];

/// Stream ROI rows as CSV into any writer
pub fn write_roi_report<W: io::Write>(writer: W, rows: &[VehicleRoi]) -> FleetResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(ROI_REPORT_HEADER)?;
    for row in rows {
        csv.write_record([
            row.name.clone(),
            row.revenue.to_string(),
            row.fuel_cost.to_string(),
            row.maintenance_cost.to_string(),
            row.roi_pct.to_string(),
        ])?;
    }
    csv.flush().map_err(|e| FleetError::Export(e.to_string()))?;
    Ok(())
}

/// ROI rows as a CSV document
pub fn roi_report_csv(rows: &[VehicleRoi]) -> FleetResult<String> {
    let mut buffer = Vec::new();
    write_roi_report(&mut buffer, rows)?;
    String::from_utf8(buffer).map_err(|e| FleetError::Export(e.to_string()))
}

/// Pretty-printed snapshot
pub fn snapshot_json(snapshot: &FleetSnapshot) -> FleetResult<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}
