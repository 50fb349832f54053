//! # Query Subcommand
//!
//! One-shot retrieval without playback: prints the shuffled items for a
//! country (or comma-separated country list) and period, as text or as
//! the same `{"items": [...]}` document the API returns.

use anyhow::{Context, Result};
use clap::Args;

use trivia_core::{TriviaItem, DEFAULT_QUESTION_COUNT};

use crate::source::{ItemSource, SourceArgs};

/// Arguments for the `trivia query` subcommand.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Single country.
    #[arg(long)]
    pub country: Option<String>,

    /// Comma-separated countries; takes precedence over --country.
    #[arg(long)]
    pub countries: Option<String>,

    /// Period filter. "any" or "Any Time" matches every period.
    #[arg(long)]
    pub period: Option<String>,

    /// Maximum number of items.
    #[arg(long, default_value_t = DEFAULT_QUESTION_COUNT)]
    pub count: usize,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Execute the query subcommand.
pub fn run_query(args: &QueryArgs) -> Result<u8> {
    let source = ItemSource::from_args(&args.source)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    let items = runtime.block_on(source.query(
        args.country.as_deref(),
        args.countries.as_deref(),
        args.period.as_deref(),
        args.count,
    ))?;

    if args.json {
        println!("{}", to_json(&items)?);
    } else if items.is_empty() {
        println!("No trivia found.");
    } else {
        print!("{}", to_text(&items));
    }
    Ok(0)
}

fn to_json(items: &[TriviaItem]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&serde_json::json!({ "items": items }))?)
}

fn to_text(items: &[TriviaItem]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!(
            "{}. [{} / {}] {}\n   {}\n",
            i + 1,
            item.country,
            item.period,
            item.question,
            item.answer
        ));
        if let Some(fact) = item.fun_fact() {
            out.push_str(&format!("   Fun fact: {fact}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TriviaItem> {
        vec![
            TriviaItem {
                country: "Peru".into(),
                period: "Ancient".into(),
                question: "Q1".into(),
                answer: "A1".into(),
                fun_fact: Some("F1".into()),
            },
            TriviaItem {
                country: "Peru".into(),
                period: "Modern".into(),
                question: "Q2".into(),
                answer: "A2".into(),
                fun_fact: None,
            },
        ]
    }

    #[test]
    fn text_lists_items_with_fun_facts() {
        let text = to_text(&sample());
        assert_eq!(
            text,
            "1. [Peru / Ancient] Q1\n   A1\n   Fun fact: F1\n2. [Peru / Modern] Q2\n   A2\n"
        );
    }

    #[test]
    fn json_matches_api_shape() {
        let json: serde_json::Value = serde_json::from_str(&to_json(&sample()).unwrap()).unwrap();
        assert_eq!(json["items"][0]["funFact"], "F1");
        assert!(json["items"][1].get("funFact").is_none());
    }
}
