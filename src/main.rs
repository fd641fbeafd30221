use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use log::info;

use cohort_engine::algorithm::classify::Classifiers;
use cohort_engine::utils::logging::console::{print_dataset_summary, print_report_summary};
use cohort_engine::utils::logging::init_logging;
use cohort_engine::{
    ClinicalDataset, EngineConfig, FileFormat, ReportKind, ReportSchema, complexity_statistics,
    diabetic_cohort, hypertensive_cohort, load_dataset, write_report,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Parquet,
}

impl From<OutputFormat> for FileFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => Self::Csv,
            OutputFormat::Parquet => Self::Parquet,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportChoice {
    Diabetic,
    Hypertensive,
    Complexity,
    All,
}

impl ReportChoice {
    fn kinds(self) -> Vec<ReportKind> {
        match self {
            Self::Diabetic => vec![ReportKind::Diabetic],
            Self::Hypertensive => vec![ReportKind::Hypertensive],
            Self::Complexity => vec![ReportKind::Complexity],
            Self::All => ReportKind::ALL.to_vec(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "cohort-engine",
    version,
    about = "Load clinical practice reports and export cohort reports."
)]
struct Args {
    /// Directory holding the report files (patients.csv, a1c.csv, ...)
    #[arg(short, long)]
    data_dir: PathBuf,

    /// JSON file with ingest and cohort settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the reports are written to; nothing is written when omitted
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Export format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Report to run
    #[arg(short, long, value_enum, default_value_t = ReportChoice::All)]
    report: ReportChoice,

    /// Evaluate the cohorts as of this date (YYYY-MM-DD)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Number of rows of each report to print
    #[arg(long, default_value_t = 10)]
    preview: usize,
}

fn run_report(
    kind: ReportKind,
    dataset: &ClinicalDataset,
    config: &EngineConfig,
    args: &Args,
) -> anyhow::Result<()> {
    match kind {
        ReportKind::Diabetic => {
            let rows = diabetic_cohort(dataset, &config.cohort);
            export_and_print(kind, &rows, args)
        }
        ReportKind::Hypertensive => {
            let rows = hypertensive_cohort(dataset, &config.cohort);
            export_and_print(kind, &rows, args)
        }
        ReportKind::Complexity => {
            let rows = complexity_statistics(dataset);
            export_and_print(kind, &rows, args)
        }
    }
}

fn export_and_print<R>(kind: ReportKind, rows: &[R], args: &Args) -> anyhow::Result<()>
where
    R: ReportSchema + std::fmt::Display,
{
    let path = match &args.output_dir {
        Some(dir) => Some(
            write_report(rows, kind, args.format.into(), dir)
                .with_context(|| format!("Failed to export {kind}"))?,
        ),
        None => None,
    };
    print_report_summary(kind.title(), rows, path.as_deref(), args.preview);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if args.as_of.is_some() {
        config.cohort.as_of = args.as_of;
    }
    config.validate().context("Invalid configuration")?;
    info!("{}", config.cohort);

    let start = Instant::now();
    let classifiers = Classifiers::default();
    let dataset = load_dataset(&args.data_dir, &config.ingest, &classifiers)
        .with_context(|| format!("Failed to load reports from {}", args.data_dir.display()))?;
    info!("Loaded reports in {:?}", start.elapsed());

    print_dataset_summary(&dataset.summary());

    for kind in args.report.kinds() {
        run_report(kind, &dataset, &config, &args)?;
    }

    Ok(())
}
