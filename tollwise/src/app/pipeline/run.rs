use super::{ingest, PipelineConfig, PipelineError};
use crate::app::cli::CliArgs;
use crate::app::output;
use chrono::Datelike;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tollwise_core::model::audit::{AuditPartition, Auditor, ComplianceReport};
use tollwise_core::model::compare::{border_effect, quarterly_volumes};
use tollwise_core::model::impute::{monthly_aggregates, PeriodImputer};
use tollwise_core::model::run::RunContext;
use tollwise_core::model::trip::{Period, TripId, TripRecord};
use tollwise_core::model::velocity::{paired_comparison, VelocityAggregate, VelocityEstimator};
use tollwise_core::model::weather::{daily_aggregates, PrecipitationSeries, WeatherEstimator};
use tollwise_core::model::zone::ZoneRegistry;

/// everything one period contributes to the cross-period stage.
struct PeriodArtifacts {
    period: Period,
    clean: Vec<TripRecord>,
    velocity: Vec<VelocityAggregate>,
}

/// runs the full pipeline described by the CLI arguments. the run summary
/// is written even when a period fails structurally or a later stage
/// surfaces an error.
pub fn run_pipeline(args: &CliArgs) -> Result<(), PipelineError> {
    let config = PipelineConfig::from_file(Path::new(&args.config_file))?;
    log::info!("loading zone registry");
    let registry = ZoneRegistry::from_config(&config.zones)?;
    log::info!("zone registry loaded with {} zones", registry.len());

    let mut ctx = RunContext::new(config.analysis.clone());
    let outcome = run_stages(args, &config, &registry, &mut ctx);

    let summary_path = config.output_directory.join("run_summary.json");
    output::write_json(&summary_path, &ctx.summary)?;
    log::info!("run summary written to {}", summary_path.display());
    outcome
}

fn run_stages(
    args: &CliArgs,
    config: &PipelineConfig,
    registry: &ZoneRegistry,
    ctx: &mut RunContext,
) -> Result<(), PipelineError> {
    let mut artifacts: Vec<PeriodArtifacts> = Vec::new();
    for period in args.selected_periods() {
        match run_period(args, config, registry, ctx, period) {
            Ok(period_artifacts) => artifacts.push(period_artifacts),
            // a period without usable input fails alone; the run continues
            Err(PipelineError::Ingest(e)) => {
                log::error!("{period} period failed: {e}");
                ctx.summary.record_period_failure(period);
            }
            Err(e) => return Err(e),
        }
    }

    let baseline = artifacts.iter().find(|a| a.period == Period::Baseline);
    let treatment = artifacts.iter().find(|a| a.period == Period::Treatment);
    if let (Some(baseline), Some(treatment)) = (baseline, treatment) {
        write_cross_period_outputs(config, registry, ctx, baseline, treatment)?;
    }
    Ok(())
}

fn run_period(
    args: &CliArgs,
    config: &PipelineConfig,
    registry: &ZoneRegistry,
    ctx: &mut RunContext,
    period: Period,
) -> Result<PeriodArtifacts, PipelineError> {
    let year = ctx.config.year_of(period);
    log::info!("starting {period} period (year {year})");
    let (records, norm_summary) = ingest::ingest_period(
        &config.input_directory,
        &config.services,
        period,
        year,
        &config.io,
    )?;
    ctx.summary.absorb_normalization(&norm_summary);
    ctx.summary.refund_rows += records.iter().filter(|r| r.is_refund()).count() as u64;

    write_normalized_partitions(&config.output_directory, period, &records)?;

    log::info!("auditing {} {period} records", records.len());
    let auditor = Auditor::new(registry, &ctx.config);
    let partition = auditor.audit_all(&records);
    ctx.summary.record_flagged_rows(partition.flagged.len() as u64);
    ctx.summary.clean_rows += partition.clean.len() as u64;
    for finding in &partition.findings {
        ctx.summary.record_finding(finding.reason);
    }
    write_audit_log(&config.output_directory, period, &partition)?;

    let estimator = VelocityEstimator::new(ctx.config.min_trip_count_threshold);
    let velocity = estimator.estimate(&partition.clean);
    ctx.summary.velocity_aggregates += velocity.len() as u64;
    let velocity_dir = config.output_directory.join("velocity");
    create_dir(&velocity_dir)?;
    output::write_csv(
        &velocity_dir.join(format!("{period}_aggregates.csv")),
        &velocity,
    )?;

    write_monthly_aggregates(config, ctx, period, &partition.clean)?;

    if period == Period::Treatment {
        write_weather_outputs(args, config, ctx, &partition.clean)?;
    }

    Ok(PeriodArtifacts {
        period,
        clean: partition.clean,
        velocity,
    })
}

/// normalized trips as parquet, one file per calendar month.
fn write_normalized_partitions(
    output_directory: &Path,
    period: Period,
    records: &[TripRecord],
) -> Result<(), PipelineError> {
    let dir = output_directory.join("normalized").join(period.label());
    create_dir(&dir)?;
    let mut by_month: std::collections::BTreeMap<(i32, u32), Vec<&TripRecord>> =
        std::collections::BTreeMap::new();
    for record in records {
        by_month
            .entry((record.pickup_ts.year(), record.pickup_ts.month()))
            .or_default()
            .push(record);
    }
    for ((year, month), rows) in by_month {
        let path = dir.join(format!("{year}-{month:02}.parquet"));
        output::write_parquet(&path, &rows)?;
        log::debug!("wrote {} normalized rows to {}", rows.len(), path.display());
    }
    Ok(())
}

/// findings as JSON lines per month, appended so the log survives reruns.
fn write_audit_log(
    output_directory: &Path,
    period: Period,
    partition: &AuditPartition,
) -> Result<(), PipelineError> {
    let dir = output_directory.join("audit").join(period.label());
    create_dir(&dir)?;
    let month_of: HashMap<TripId, (i32, u32)> = partition
        .flagged
        .iter()
        .map(|r| (r.trip_id, (r.pickup_ts.year(), r.pickup_ts.month())))
        .collect();
    let mut by_month: std::collections::BTreeMap<(i32, u32), Vec<_>> =
        std::collections::BTreeMap::new();
    for finding in &partition.findings {
        if let Some(key) = month_of.get(&finding.trip_id) {
            by_month.entry(*key).or_default().push(finding);
        }
    }
    for ((year, month), findings) in by_month {
        let path = dir.join(format!("{year}-{month:02}.jsonl"));
        output::append_jsonl(&path, &findings)?;
    }
    Ok(())
}

/// monthly aggregates over the period's full calendar window, with
/// missing months filled by the imputer. an imputation failure leaves
/// the observed rows in place and the run alive.
fn write_monthly_aggregates(
    config: &PipelineConfig,
    ctx: &mut RunContext,
    period: Period,
    clean: &[TripRecord],
) -> Result<(), PipelineError> {
    let observed = monthly_aggregates(period, clean);
    let imputer = PeriodImputer::new(ctx.config.imputation_policy, ctx.config.allow_single_neighbor);
    let window = ctx.config.window_of(period);
    let completed = match imputer.fill_gaps(&window, &observed) {
        Ok(completed) => completed,
        Err(e) => {
            log::error!("{period} imputation failed: {e}");
            observed
        }
    };
    for month in completed.iter().filter(|m| m.is_imputed) {
        ctx.summary
            .record_imputed_month(period, month.year, month.month);
    }
    let dir = config.output_directory.join("monthly");
    create_dir(&dir)?;
    output::write_csv(&dir.join(format!("{period}_monthly.csv")), &completed)?;
    Ok(())
}

fn write_weather_outputs(
    args: &CliArgs,
    config: &PipelineConfig,
    ctx: &mut RunContext,
    clean: &[TripRecord],
) -> Result<(), PipelineError> {
    log::info!(
        "joining daily demand with precipitation from {}",
        config.weather_path.display()
    );
    let series = PrecipitationSeries::from_csv_path(&config.weather_path)?;
    let daily = daily_aggregates(clean);
    let estimator = WeatherEstimator::new(
        ctx.config.rain_threshold_mm,
        args.allow_reduced_weather_window,
    );
    let report = estimator.estimate(&daily, &series)?;
    ctx.summary.weather_rows += report.rows.len() as u64;
    ctx.summary.weather_gap_days += report.uncovered_dates.len() as u64;
    for date in &report.uncovered_dates {
        log::warn!("no precipitation reading for {date}, day excluded from the join");
    }

    let dir = config.output_directory.join("weather");
    create_dir(&dir)?;
    output::write_csv(&dir.join("elasticity.csv"), &report.rows)?;
    output::write_json(&dir.join("summary.json"), &report.summary)?;
    Ok(())
}

fn write_cross_period_outputs(
    config: &PipelineConfig,
    registry: &ZoneRegistry,
    ctx: &mut RunContext,
    baseline: &PeriodArtifacts,
    treatment: &PeriodArtifacts,
) -> Result<(), PipelineError> {
    let comparisons = paired_comparison(&baseline.velocity, &treatment.velocity);
    ctx.summary.velocity_comparisons += comparisons.len() as u64;
    let velocity_dir = config.output_directory.join("velocity");
    create_dir(&velocity_dir)?;
    output::write_csv(&velocity_dir.join("comparison.csv"), &comparisons)?;

    let compare_dir = config.output_directory.join("compare");
    create_dir(&compare_dir)?;
    let border = border_effect(
        &ctx.config.border_zone_ids,
        &baseline.clean,
        &treatment.clean,
    );
    output::write_csv(&compare_dir.join("border_effect.csv"), &border)?;
    let volumes = quarterly_volumes(registry, &baseline.clean, &treatment.clean);
    output::write_csv(&compare_dir.join("quarterly_volumes.csv"), &volumes)?;

    let compliance =
        ComplianceReport::from_clean_records(&treatment.clean, registry, &ctx.config, 10);
    let audit_dir = config.output_directory.join("audit");
    create_dir(&audit_dir)?;
    output::write_json(&audit_dir.join("compliance.json"), &compliance)?;
    Ok(())
}

fn create_dir(dir: &PathBuf) -> Result<(), PipelineError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        PipelineError::Output(crate::app::output::OutputError::Write {
            path: dir.clone(),
            source: e,
        })
    })
}
