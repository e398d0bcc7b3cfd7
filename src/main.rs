use std::io::{self, BufRead, BufWriter, Write};
use std::process::ExitCode;

use anyhow::Context;

use qreftag::config::AppConfig;
use qreftag::core::reformulation::QueryPairClassifier;

const USAGE: &str = "usage: qreftag [PREVIOUS QUERY]
  with two arguments, prints the reformulation category of the pair
  with no arguments, reads PREVIOUS<TAB>QUERY lines from stdin and prints
  CATEGORY<TAB>SIMILARITY for each";

/// What the command line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Pair { previous: &'a str, query: &'a str },
    Stdin,
}

impl<'a> Command<'a> {
    /// `None` when the arguments match no form in [`USAGE`].
    fn parse(args: &'a [String]) -> Option<Self> {
        match args {
            [previous, query] => Some(Self::Pair { previous, query }),
            [] => Some(Self::Stdin),
            _ => None,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let (config, config_source) = AppConfig::load();

    // Initialize logging, then report how the config was resolved
    let _log_guard = qreftag::core::logging::init(&config.logging);
    log::debug!("qreftag v{} starting", qreftag::VERSION);
    config_source.log();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = Command::parse(&args) else {
        eprintln!("{USAGE}");
        return Ok(ExitCode::from(2));
    };

    let classifier =
        QueryPairClassifier::new(config.classifier).context("Failed to build classifier")?;

    match command {
        Command::Pair { previous, query } => {
            let category = classifier.classify(
                &QueryPairClassifier::normalize(previous),
                &QueryPairClassifier::normalize(query),
            );
            println!("{category}");
        }
        Command::Stdin => classify_stdin(&classifier)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn classify_stdin(classifier: &QueryPairClassifier) -> anyhow::Result<()> {
    let _span = tracing::info_span!("classify_stdin").entered();
    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());
    let mut classified = 0usize;
    let mut skipped = 0usize;

    for (idx, line) in stdin.lock().lines().enumerate() {
        let line = line.context("Failed to read stdin")?;
        let Some((previous, query)) = line.split_once('\t') else {
            log::warn!("Skipping line {}: expected PREVIOUS<TAB>QUERY", idx + 1);
            skipped += 1;
            continue;
        };

        let result = classifier.analyze(
            &QueryPairClassifier::normalize(previous),
            &QueryPairClassifier::normalize(query),
        );
        writeln!(out, "{}\t{:.4}", result.category, result.query_similarity)?;
        classified += 1;
    }

    out.flush()?;
    log::debug!("Classified {classified} pairs, skipped {skipped} lines");
    Ok(())
}
