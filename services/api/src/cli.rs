use crate::commands::{
    run_batch, run_calculate, run_demo, run_describe, BatchArgs, CalculateArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use church_crm::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Church Visit Ratings",
    about = "Run the church visit rating service or score visits from the command line",
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
    /// Score visit observations without starting the service
    Rating {
        #[command(subcommand)]
        command: RatingCommand,
    },
    /// Walk through submitting ratings for a few visits and the resulting church rollup
    Demo,
}

#[derive(Subcommand, Debug)]
enum RatingCommand {
    /// Score a single visit from flags
    Calculate(CalculateArgs),
    /// Score every row of a visit observation CSV export
    Batch(BatchArgs),
    /// Print the mission openness and hospitality level descriptions
    Describe,
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
        Command::Rating { command } => match command {
            RatingCommand::Calculate(args) => run_calculate(args),
            RatingCommand::Batch(args) => run_batch(args),
            RatingCommand::Describe => {
                run_describe();
                Ok(())
            }
        },
        Command::Demo => run_demo(),
    }
}
