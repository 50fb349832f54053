//! # trivia CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trivia_cli::options::{run_options, OptionsArgs};
use trivia_cli::play::{run_play, PlayArgs};
use trivia_cli::query::{run_query, QueryArgs};

/// Trivia in the terminal.
///
/// Pick a country and period, then watch questions and answers cycle on a
/// timer with optional spoken narration.
#[derive(Parser, Debug)]
#[command(name = "trivia", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a timed trivia session.
    Play(PlayArgs),

    /// Print shuffled trivia for a country/period filter.
    Query(QueryArgs),

    /// List selectable countries, periods, and question counts.
    Options(OptionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level. Logs go to stderr so
    // they never interleave with rendered frames.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("trivia CLI starting");

    let result = match cli.command {
        Commands::Play(args) => run_play(&args),
        Commands::Query(args) => run_query(&args),
        Commands::Options(args) => run_options(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::TextSize;

    #[test]
    fn cli_parse_play_defaults() {
        let cli = Cli::try_parse_from(["trivia", "play", "--country", "USA"]).unwrap();
        let Commands::Play(args) = cli.command else {
            panic!("expected play");
        };
        assert_eq!(args.country.as_deref(), Some("USA"));
        assert_eq!(args.count, 10);
        assert_eq!(args.text_size, TextSize::Medium);
        assert!(!args.high_contrast);
        assert!(args.period.is_none());
        assert!(args.source.server.is_none());
    }

    #[test]
    fn cli_parse_play_full() {
        let cli = Cli::try_parse_from([
            "trivia",
            "-vv",
            "play",
            "--country",
            "Japan",
            "--period",
            "Medieval",
            "--count",
            "5",
            "--high-contrast",
            "--text-size",
            "large",
            "--speech-command",
            "espeak",
            "--server",
            "http://localhost:8080",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Play(args) = cli.command else {
            panic!("expected play");
        };
        assert_eq!(args.count, 5);
        assert_eq!(args.text_size, TextSize::Large);
        assert!(args.high_contrast);
        assert_eq!(args.speech_command.as_deref(), Some("espeak"));
        assert_eq!(
            args.selection().unwrap().to_query_string(),
            "country=Japan&period=Medieval&count=5"
        );
    }

    #[test]
    fn cli_rejects_zero_count() {
        assert!(Cli::try_parse_from(["trivia", "play", "--country", "USA", "--count", "0"]).is_err());
    }

    #[test]
    fn cli_requires_country_for_play() {
        assert!(Cli::try_parse_from(["trivia", "play"]).is_err());
    }

    #[test]
    fn cli_parse_play_selection() {
        let cli = Cli::try_parse_from([
            "trivia",
            "play",
            "--selection",
            "country=Peru&period=Ancient&count=15",
        ])
        .unwrap();
        let Commands::Play(args) = cli.command else {
            panic!("expected play");
        };
        let selection = args.selection().unwrap();
        assert_eq!(selection.country, "Peru");
        assert_eq!(selection.question_count, 15);

        assert!(Cli::try_parse_from([
            "trivia",
            "play",
            "--selection",
            "country=Peru",
            "--country",
            "Japan"
        ])
        .is_err());
    }

    #[test]
    fn cli_server_conflicts_with_catalog() {
        assert!(Cli::try_parse_from([
            "trivia",
            "query",
            "--country",
            "USA",
            "--server",
            "http://x",
            "--catalog",
            "c.json"
        ])
        .is_err());
    }

    #[test]
    fn cli_parse_options_periods() {
        let cli =
            Cli::try_parse_from(["trivia", "options", "periods", "--country", "Egypt"]).unwrap();
        assert!(matches!(cli.command, Commands::Options(_)));
    }
}
