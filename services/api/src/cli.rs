use crate::commands::{run_award, run_history, run_leaderboard, AwardArgs, HistoryArgs, LeaderboardArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use recognition::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Employee of the Month",
    about = "Score a monthly roster, select the Employee of the Month, and keep the winner history",
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
    /// Rank a roster export without recording anything
    Leaderboard(LeaderboardArgs),
    /// Select and record the winner for a period
    Award(AwardArgs),
    /// List recorded winners
    History(HistoryArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the winner history file
    #[arg(long)]
    pub(crate) history: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Leaderboard(args) => run_leaderboard(args),
        Command::Award(args) => run_award(args),
        Command::History(args) => run_history(args),
    }
}
