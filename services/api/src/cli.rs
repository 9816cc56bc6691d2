use crate::demo::{run_demo, run_export, run_report, DemoArgs, ExportArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use pie_destroyer::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Pie Chart Destroyer",
    about = "Build deliberately bad pie charts and audit every bad choice",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a share-link query, optionally applying changes through the budget guard
    Report(ReportArgs),
    /// Render the chart and save it through the export fallbacks
    Export(ExportArgs),
    /// Walk through a scripted session that runs into the bad-choice budget
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Export(args) => run_export(args),
        Command::Demo(args) => run_demo(args),
    }
}
