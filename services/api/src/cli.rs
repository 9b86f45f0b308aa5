use crate::demo::{run_demo, run_export, run_wizard_describe, DemoArgs, DescribeArgs, ExportArgs};
use crate::server;
use carelead::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Care Lead Intake",
    about = "Run and demonstrate the care lead intake service from the command line",
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
    /// Inspect the lead wizards
    Wizard {
        #[command(subcommand)]
        command: WizardCommand,
    },
    /// Work with saved application records
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
    /// Walk a care lead and a job application end to end against in-memory stand-ins
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum WizardCommand {
    /// Print a wizard's steps as JSON
    Describe(DescribeArgs),
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// Filter a saved applications response and write the matches to CSV
    Export(ExportArgs),
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
        Command::Wizard {
            command: WizardCommand::Describe(args),
        } => run_wizard_describe(args),
        Command::Admin {
            command: AdminCommand::Export(args),
        } => run_export(args),
        Command::Demo(args) => run_demo(args),
    }
}
