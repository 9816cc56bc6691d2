use crate::infra::parse_change;
use clap::Args;
use pie_destroyer::chart::export::{DirectoryDownload, ExportOutcome, ExportPipeline, SvgCapture};
use pie_destroyer::chart::{ChartReportView, ChartSession, OptionChange};
use pie_destroyer::config::AppConfig;
use pie_destroyer::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Share-link query to start from (e.g. "s=12&3d=1&c=neon")
    #[arg(long, default_value = "")]
    pub(crate) query: String,
    /// Option change applied through the budget guard, in order (repeatable, e.g. --set 3d=1)
    #[arg(long = "set", value_parser = parse_change)]
    pub(crate) changes: Vec<OptionChange>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ExportArgs {
    /// Share-link query describing the chart to export
    #[arg(long, default_value = "")]
    pub(crate) query: String,
    /// Directory for the downloaded image (defaults to APP_EXPORT_DIR)
    #[arg(long)]
    pub(crate) out_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Also export the final chart into this directory
    #[arg(long)]
    pub(crate) export_to: Option<PathBuf>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        query,
        changes,
        json,
    } = args;

    let config = AppConfig::load()?;
    let mut session = ChartSession::from_query(config.evaluation, &query);
    for change in changes {
        session.apply(change)?;
    }

    if json {
        let view = ChartReportView::from_session(&session);
        let rendered = serde_json::to_string_pretty(&view).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        render_report(&session);
    }

    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let ExportArgs { query, out_dir } = args;

    let config = AppConfig::load()?;
    let output_dir = out_dir.unwrap_or(config.export.output_dir);

    let session = ChartSession::from_query(config.evaluation, &query);
    let outcome = export_session(&session, output_dir);
    println!("{}", outcome.message());
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let script = [
        "3d=1", "e=1", "c=neon", "tl=1", "sh=1", "bg=checkered", "ol=1", "d=1", "td=1",
    ];

    let config = AppConfig::load()?;
    println!(
        "Pie Chart Destroyer demo (budget: {} bad choices)",
        config.evaluation.max_bad_choices
    );
    let mut session = ChartSession::new(config.evaluation);

    for raw in script {
        let change = raw.parse::<OptionChange>()?;

        match session.apply(change) {
            Ok(report) => println!(
                "- {raw:<14} accepted | bad choices {}/{}",
                report.chargeable_count, report.max_bad_choices
            ),
            Err(err) => println!("- {raw:<14} blocked  | {err}"),
        }
    }

    println!();
    render_report(&session);

    if let Some(dir) = args.export_to {
        let outcome = export_session(&session, dir);
        println!("\n{}", outcome.message());
    }

    Ok(())
}

fn export_session(session: &ChartSession, output_dir: PathBuf) -> ExportOutcome {
    let chart = session.chart(&mut rand::rng());
    let pipeline = ExportPipeline::new(
        Box::new(SvgCapture),
        None,
        Box::new(DirectoryDownload::new(output_dir)),
    );
    pipeline.run(&chart)
}

fn render_report(session: &ChartSession) {
    let report = session.report();

    println!("Share link query: ?{}", session.share_query());
    println!(
        "Bad choices used: {}/{}{}",
        report.chargeable_count,
        report.max_bad_choices,
        if report.budget_exhausted() {
            " (budget exhausted)"
        } else {
            ""
        }
    );

    if report.violations.is_empty() {
        println!("Violations: none. This chart is almost respectable.");
    } else {
        println!("Violations ({}):", report.violations.len());
        for violation in &report.violations {
            println!("  - {violation}");
        }
    }

    if !report.good_practices.is_empty() {
        println!("Good practices:");
        for practice in &report.good_practices {
            println!("  + {practice}");
        }
    }

    println!("Certificate code: {}", report.attestation_code);
}
