use crate::demo::{run_demo, DemoArgs};
use crate::report::{run_cohort_report, run_score, CohortArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use wellbeing_pulse::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Wellbeing Pulse",
    about = "Score wellbeing assessments and report cohort analytics",
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
    /// Score a single answer set and print the result
    Score(ScoreArgs),
    /// Aggregate stored results into a cohort snapshot and optional CSV export
    Cohort(CohortArgs),
    /// Seed a demo cohort in memory and print its dashboard
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
        Command::Score(args) => run_score(args),
        Command::Cohort(args) => run_cohort_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
