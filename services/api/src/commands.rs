use crate::infra::{load_config, open_service, parse_period, WeightArgs};
use clap::Args;
use recognition::error::AppError;
use recognition::telemetry;
use recognition::workflows::awards::{
    department_summaries, department_wins, write_history_csv, CycleError, Leaderboard,
    NotificationStatus, Period, WinnerHistoryEntry,
};
use recognition::workflows::roster::RosterImporter;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct LeaderboardArgs {
    /// Roster CSV export for the month
    #[arg(long)]
    pub(crate) csv: PathBuf,
    #[command(flatten)]
    pub(crate) weights: WeightArgs,
    /// Only print the top N rows
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Override the winner history file
    #[arg(long)]
    pub(crate) history: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct AwardArgs {
    /// Roster CSV export for the month
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Award period (YYYY-MM). Defaults to the current month.
    #[arg(long, value_parser = parse_period)]
    pub(crate) period: Option<Period>,
    #[command(flatten)]
    pub(crate) weights: WeightArgs,
    /// Override the winner history file
    #[arg(long)]
    pub(crate) history: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct HistoryArgs {
    /// Override the winner history file
    #[arg(long)]
    pub(crate) history: Option<PathBuf>,
    /// Print the history as CSV instead of a table
    #[arg(long)]
    pub(crate) csv: bool,
}

pub(crate) fn run_leaderboard(args: LeaderboardArgs) -> Result<(), AppError> {
    let config = load_config(args.history)?;
    telemetry::init(&config.telemetry)?;

    let weights = args.weights.to_config()?;
    let cohort = RosterImporter::from_path(&args.csv)?;
    let service = open_service(&config)?;
    let leaderboard = service.leaderboard(&cohort, &weights)?;

    render_leaderboard(&leaderboard, args.limit);
    Ok(())
}

pub(crate) fn run_award(args: AwardArgs) -> Result<(), AppError> {
    let config = load_config(args.history)?;
    telemetry::init(&config.telemetry)?;

    let period = match args.period {
        Some(period) => period,
        None => Period::current().map_err(CycleError::from)?,
    };
    let weights = args.weights.to_config()?;
    let cohort = RosterImporter::from_path(&args.csv)?;
    let service = open_service(&config)?;
    let outcome = service.award(period, &cohort, &weights)?;

    println!("Employee of the Month for {}", period.label());
    println!(
        "- {} ({}, {}) with a recognition score of {:.2}",
        outcome.winner.record.name,
        outcome.winner.record.employee_id,
        outcome.winner.record.department,
        outcome.winner.composite_score
    );
    println!("  Score breakdown:");
    for component in &outcome.winner.components {
        println!(
            "    - {}: raw {} -> {:.1} normalized x {:.0}% = {:.2}",
            component.metric.label(),
            component.raw,
            component.normalized,
            component.weight_share * 100.0,
            component.contribution
        );
    }
    println!(
        "  Recorded in {}",
        config.recognition.history_path.display()
    );
    match &outcome.notification {
        NotificationStatus::Delivered => println!("  Notification: queued for {}", outcome.winner.record.email),
        NotificationStatus::Failed { reason } => println!("  Notification failed: {}", reason),
    }

    Ok(())
}

pub(crate) fn run_history(args: HistoryArgs) -> Result<(), AppError> {
    let config = load_config(args.history)?;
    telemetry::init(&config.telemetry)?;

    let service = open_service(&config)?;
    let entries = service.history()?;
    if args.csv {
        write_history_csv(&entries, std::io::stdout().lock()).map_err(std::io::Error::from)?;
    } else {
        render_history(&entries);
    }
    Ok(())
}

fn render_leaderboard(leaderboard: &Leaderboard, limit: Option<usize>) {
    let entries = leaderboard.entries();
    let shown = limit.unwrap_or(entries.len()).min(entries.len());

    println!(
        "Leaderboard ({} employees, {} eligible)",
        entries.len(),
        leaderboard.eligible_count()
    );
    if let Some(previous) = leaderboard.previous_winner() {
        println!(
            "Previous winner: {} ({}) for {}",
            previous.name,
            previous.employee_id,
            previous.period.label()
        );
    }

    for entry in &entries[..shown] {
        println!(
            "{:>4}  {:<10} {:<24} {:<16} {:>6.2}  {}",
            entry.rank,
            entry.record.employee_id,
            entry.record.name,
            entry.record.department,
            entry.composite_score,
            entry.eligibility.summary()
        );
    }
    if shown < entries.len() {
        println!("  ... {} more", entries.len() - shown);
    }

    match leaderboard.winner() {
        Ok(winner) => println!(
            "\nWinner: {} ({}) with {:.2}",
            winner.record.name, winner.record.employee_id, winner.composite_score
        ),
        Err(err) => println!("\nNo winner: {}", err),
    }

    println!("\nDepartments:");
    for summary in department_summaries(entries) {
        println!(
            "  - {}: {} employees ({} eligible) | mean {:.2} | top {} ({:.2})",
            summary.department,
            summary.headcount,
            summary.eligible,
            summary.mean_composite,
            summary.top_employee,
            summary.top_score
        );
    }
}

fn render_history(entries: &[WinnerHistoryEntry]) {
    if entries.is_empty() {
        println!("No winners recorded yet");
        return;
    }

    println!("Winner history ({} periods)", entries.len());
    for entry in entries.iter().rev() {
        println!(
            "  {}  {:<24} {:<10} {:<16} {:>6.2}",
            entry.period,
            entry.name,
            entry.employee_id,
            entry.department,
            entry.composite_score
        );
    }

    println!("\nWins by department:");
    for wins in department_wins(entries) {
        println!("  - {}: {}", wins.department, wins.wins);
    }
}
