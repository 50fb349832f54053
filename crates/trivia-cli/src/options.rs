//! # Options Subcommand
//!
//! Lists what the selection flags accept: the countries in the catalog,
//! the periods for a country, and the question-count choices.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use trivia_core::QUESTION_COUNT_OPTIONS;

use crate::source::{ItemSource, SourceArgs};

/// Arguments for the `trivia options` subcommand.
#[derive(Args, Debug)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: OptionsCommand,
}

/// Option listings.
#[derive(Subcommand, Debug)]
pub enum OptionsCommand {
    /// Countries present in the catalog.
    Countries,
    /// Periods, optionally for one country. "Any Time" is always first.
    Periods {
        #[arg(long)]
        country: Option<String>,
    },
    /// Question-count choices.
    Counts,
}

/// Execute the options subcommand.
pub fn run_options(args: &OptionsArgs) -> Result<u8> {
    let source = ItemSource::from_args(&args.source)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    let lines = runtime.block_on(list(&source, &args.command))?;
    for line in lines {
        println!("{line}");
    }
    Ok(0)
}

async fn list(source: &ItemSource, command: &OptionsCommand) -> Result<Vec<String>> {
    match command {
        OptionsCommand::Countries => source.countries().await,
        OptionsCommand::Periods { country } => source.periods(country.as_deref()).await,
        OptionsCommand::Counts => Ok(QUESTION_COUNT_OPTIONS.iter().map(usize::to_string).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_listings() {
        let source = ItemSource::from_args(&SourceArgs::default()).unwrap();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let countries = runtime.block_on(list(&source, &OptionsCommand::Countries)).unwrap();
        assert!(countries.contains(&"Japan".to_string()));

        let periods = runtime
            .block_on(list(
                &source,
                &OptionsCommand::Periods {
                    country: Some("Japan".into()),
                },
            ))
            .unwrap();
        assert_eq!(periods[0], "Any Time");
        assert!(periods.len() > 1);

        let counts = runtime.block_on(list(&source, &OptionsCommand::Counts)).unwrap();
        assert_eq!(counts, ["5", "10", "15", "20"]);
    }
}
