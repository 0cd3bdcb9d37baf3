use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use alchemist_cli::logging::redact_value;
use alchemist_cli::pipeline::{load_into, search_file};
use alchemist_cli::summary::{anomaly_table, print_mapping, print_summary, search_table};
use alchemist_cli::types::{CheckSummary, ValidateResult, check_summaries};
use alchemist_core::{Session, SessionOptions};
use alchemist_ingest::sample_dataset;
use alchemist_map::ReconcileOptions;
use alchemist_model::{EntityKind, RowSet};
use alchemist_report::{findings_to_json, read_rules, write_outputs, write_rows_csv};
use alchemist_validate::DetectorOptions;

use crate::cli::{
    AnomaliesArgs, CommonOptions, FileArgs, OutputFormatArg, SampleArgs, SearchArgs, ValidateArgs,
};

/// JSON form of the validate output.
#[derive(Serialize)]
struct ValidateDocument<'a> {
    checks: Vec<CheckSummary>,
    report: serde_json::Value,
    written: &'a [PathBuf],
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidateResult> {
    let inputs = args.inputs();
    if inputs.is_empty() {
        bail!("nothing to validate: pass at least one of --clients, --workers, --tasks");
    }
    let span = info_span!("validate", entity_count = inputs.len());
    let _guard = span.enter();

    let mut session = Session::new(session_options(args.options, None));
    for (kind, path) in &inputs {
        load_into(&mut session, *kind, path)?;
    }
    let report = session.validate_all().context("validate")?.clone();
    info!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        info = report.info_count(),
        "validation complete"
    );

    let mut written = Vec::new();
    if let Some(output_dir) = &args.output_dir {
        let rules = match &args.rules {
            Some(path) => Some(
                read_rules(path).with_context(|| format!("read rules {}", path.display()))?,
            ),
            None => None,
        };
        let row_sets = inputs
            .iter()
            .map(|(kind, _)| session.rows(*kind))
            .collect::<alchemist_core::Result<Vec<RowSet>>>()?;
        let refs: Vec<&RowSet> = row_sets.iter().collect();
        written = write_outputs(output_dir, &refs, &report, rules.as_ref())
            .with_context(|| format!("write outputs to {}", output_dir.display()))?;
    } else if args.rules.is_some() {
        warn!("--rules has no effect without --output-dir");
    }

    let result = ValidateResult {
        field_reports: session.field_reports().to_vec(),
        report,
        written,
    };
    match args.options.format {
        OutputFormatArg::Table => print_summary(&result),
        OutputFormatArg::Json => {
            let report: serde_json::Value = serde_json::from_str(&findings_to_json(&result.report)?)
                .context("re-read findings document")?;
            print_json(&ValidateDocument {
                checks: check_summaries(&result.field_reports, &result.report),
                report,
                written: &result.written,
            })?;
        }
    }
    Ok(result)
}

pub fn run_map(args: &FileArgs) -> Result<()> {
    let kind = EntityKind::from(args.entity);
    let mut session = Session::new(session_options(args.options, None));
    load_into(&mut session, kind, &args.file)?;
    let state = session.entity(kind)?.mapping();
    match args.options.format {
        OutputFormatArg::Table => print_mapping(state),
        OutputFormatArg::Json => print_json(state.mapping())?,
    }
    Ok(())
}

pub fn run_anomalies(args: &AnomaliesArgs) -> Result<()> {
    let input = &args.input;
    let kind = EntityKind::from(input.entity);
    let detector = DetectorOptions {
        max_anomalies: args.max_anomalies,
    };
    let mut session = Session::new(session_options(input.options, Some(detector)));
    load_into(&mut session, kind, &input.file)?;

    let anomalies = session.detect_anomalies(kind)?;
    match input.options.format {
        OutputFormatArg::Table => {
            if anomalies.is_empty() {
                println!("No anomalies found.");
            } else {
                println!("{}", anomaly_table(&anomalies));
            }
        }
        OutputFormatArg::Json => print_json(&anomalies)?,
    }

    if !args.apply {
        return Ok(());
    }
    let Some(out) = &args.out else {
        bail!("--apply requires --out");
    };
    let mut rows = session.rows(kind)?;
    let mut applied = 0usize;
    for anomaly in anomalies.iter().filter(|a| a.is_actionable()) {
        rows = session
            .apply_anomaly(kind, anomaly)
            .with_context(|| format!("apply anomaly {}", anomaly.id))?;
        applied += 1;
        debug!(
            id = %anomaly.id,
            row = anomaly.row,
            field = %anomaly.field,
            original = %redact_value(&anomaly.original_value.render()),
            suggested = %redact_value(&anomaly.suggested_value.render()),
            "anomaly applied"
        );
    }
    write_rows_csv(out, &rows).with_context(|| format!("write {}", out.display()))?;
    info!(applied, path = %out.display(), "fixed rows written");
    if input.options.format == OutputFormatArg::Table {
        println!("Applied {applied} fixes, wrote {}", out.display());
    }
    Ok(())
}

pub fn run_search(args: &SearchArgs) -> Result<()> {
    let input = &args.input;
    let kind = EntityKind::from(input.entity);
    let (rows, result) = search_file(
        session_options(input.options, None),
        kind,
        &input.file,
        &args.query,
        args.errors_only,
    )?;
    match input.options.format {
        OutputFormatArg::Table => {
            println!("{} ({} of {} rows)", result.description, result.hits.len(), rows.len());
            if !result.hits.is_empty() {
                println!("{}", search_table(&rows, &result));
            }
        }
        OutputFormatArg::Json => print_json(&result)?,
    }
    Ok(())
}

pub fn run_sample(args: &SampleArgs) -> Result<()> {
    let dataset = sample_dataset().context("load sample dataset")?;
    std::fs::create_dir_all(&args.dir)
        .with_context(|| format!("create {}", args.dir.display()))?;
    for kind in EntityKind::all() {
        let path = args.dir.join(format!("{}.csv", kind.plural()));
        write_rows_csv(&path, dataset.get(*kind))
            .with_context(|| format!("write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn session_options(options: CommonOptions, detector: Option<DetectorOptions>) -> SessionOptions {
    SessionOptions {
        reconcile: ReconcileOptions {
            min_confidence: options.min_confidence,
        },
        detector: detector.unwrap_or_default(),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
