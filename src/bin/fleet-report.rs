// Copyright (c) 2025 - Cowboy AI, Inc.
//! Fleet Report
//!
//! Loads the demo fleet, logs the command-center KPIs and license alerts,
//! and prints a report to stdout.
//!
//! Run with: cargo run --bin fleet-report
//!
//! Environment:
//! - `FLEET_*` variables, see `fleet_ops::config`
//! - `FLEET_REPORT_DATE` (YYYY-MM-DD): reference date for license checks,
//!   defaults to today
//! - `FLEET_REPORT_FORMAT`: `csv` (ROI report, default) or `json` (snapshot)

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use fleet_ops::{
    export,
    projection::{self, DispatchCandidates, LicenseAlertLevel},
    seed, FleetConfig, FleetOperations, FleetService, SharedFleetService,
};
use tracing::{info, warn};

/// Output selection for this run
#[derive(Debug, Clone)]
struct ReportConfig {
    as_of: NaiveDate,
    format: ReportFormat,
}

#[derive(Debug, Clone, Copy)]
enum ReportFormat {
    Csv,
    Json,
}

impl ReportConfig {
    /// Load report options from environment variables
    fn from_env() -> Result<Self> {
        let as_of = match std::env::var("FLEET_REPORT_DATE") {
            Ok(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .with_context(|| format!("FLEET_REPORT_DATE is not a date: {raw}"))?,
            Err(_) => Utc::now().date_naive(),
        };

        let format = match std::env::var("FLEET_REPORT_FORMAT")
            .unwrap_or_else(|_| "csv".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "csv" => ReportFormat::Csv,
            "json" => ReportFormat::Json,
            other => bail!("FLEET_REPORT_FORMAT must be 'csv' or 'json', got '{other}'"),
        };

        Ok(Self { as_of, format })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("🚚 Starting fleet report");

    let config = FleetConfig::from_env().context("Failed to load fleet configuration")?;
    let report = ReportConfig::from_env()?;
    info!("📋 Configuration loaded:");
    info!("  - Id strategy: {:?}", config.id_strategy);
    info!("  - License warning window: {} days", config.license_warning_days);
    info!("  - Reference date: {}", report.as_of);

    let store = seed::demo_fleet(config.id_strategy).context("Failed to load demo fleet")?;
    let service = SharedFleetService::new(FleetService::with_store(config.clone(), store));
    let snapshot = service.snapshot().await;

    let kpis = projection::dashboard_kpis(&snapshot);
    info!(
        "Active fleet {}/{} ({}% utilization), {} in shop, {} available",
        kpis.active_fleet,
        kpis.total_vehicles,
        kpis.utilization_rate,
        kpis.in_shop,
        kpis.available
    );
    info!(
        "Trips: {} total, {} completed, {} pending; {} active drivers of {}",
        kpis.total_trips,
        kpis.completed_trips,
        kpis.pending_trips,
        kpis.active_drivers,
        kpis.total_drivers
    );

    let totals = projection::expense_totals(&snapshot);
    info!(
        "Spend: fuel {:.2} ({:.1} l), maintenance {:.2}; revenue {:.2}",
        totals.total_fuel_cost,
        totals.total_liters,
        totals.total_maintenance_cost,
        totals.total_revenue
    );

    for alert in projection::license_alerts(&snapshot, report.as_of, config.license_warning_days) {
        match alert.level {
            LicenseAlertLevel::Expired => warn!(
                "⚠️  License of {} ({}) expired on {}",
                alert.name, alert.driver_id, alert.expiry
            ),
            LicenseAlertLevel::ExpiringSoon => warn!(
                "License of {} ({}) expires in {} days",
                alert.name, alert.driver_id, alert.days_remaining
            ),
        }
    }

    let candidates = DispatchCandidates::for_date(&snapshot, report.as_of);
    info!(
        "Ready to dispatch: {} vehicles, {} drivers",
        candidates.vehicles.len(),
        candidates.drivers.len()
    );

    let output = match report.format {
        ReportFormat::Csv => export::roi_report_csv(&projection::roi_report(&snapshot))
            .context("Failed to render ROI report")?,
        ReportFormat::Json => {
            export::snapshot_json(&snapshot).context("Failed to render snapshot")?
        }
    };
    print!("{output}");

    info!("✅ Report complete");
    Ok(())
}
