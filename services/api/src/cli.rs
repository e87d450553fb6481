use crate::demo::{run_demo, run_draw_report, DemoArgs, DrawReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use visascope::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Visascope",
    about = "Score and match immigration profiles from the command line",
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
    /// Analyze historical Express Entry invitation rounds
    Draws {
        #[command(subcommand)]
        command: DrawCommand,
    },
    /// Run an end-to-end CLI demo covering every destination
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum DrawCommand {
    /// Analyze a draw history CSV and predict the next cutoff
    Report(DrawReportArgs),
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
        Command::Draws {
            command: DrawCommand::Report(args),
        } => run_draw_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
