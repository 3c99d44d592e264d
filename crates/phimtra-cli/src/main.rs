mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use phimtra_core::config::AppConfig;
use phimtra_core::evaluate;
use phimtra_core::{PhimtraError, QueryIntentExtractor};

/// Understand Vietnamese movie search queries.
#[derive(Debug, Parser)]
#[command(name = "phimtra", version, about)]
struct Cli {
    /// Config file to use instead of the user config.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify a query and print the extracted filters.
    Extract {
        query: String,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
        /// Skip the semantic keyword fallback.
        #[arg(long)]
        lexical: bool,
    },
    /// Score the extractor against labelled queries.
    Eval {
        /// JSON file of cases; defaults to the built-in acceptance set.
        #[arg(long)]
        cases: Option<PathBuf>,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration.
    Config {
        /// Print only the user config file path.
        #[arg(long)]
        path: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("phimtra: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _guard = match logging::init(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("phimtra: logging disabled: {e}");
            None
        }
    };

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("phimtra: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &AppConfig) -> Result<(), PhimtraError> {
    match command {
        Command::Extract {
            query,
            json,
            lexical,
        } => {
            let extractor = if lexical {
                QueryIntentExtractor::lexical_only()
            } else {
                QueryIntentExtractor::from_config(config)
            };
            let result = extractor.extract(&query);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{result}");
            }
        }
        Command::Eval { cases, json } => {
            let cases = match cases {
                Some(path) => evaluate::load_cases(&path)?,
                None => evaluate::builtin_cases()?,
            };
            let extractor = QueryIntentExtractor::from_config(config);
            let report = evaluate::evaluate(&extractor, &cases);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
        }
        Command::Config { path } => {
            if path {
                println!("{}", AppConfig::config_path().display());
            } else {
                print!("{}", config.to_toml()?);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_extract_flags() {
        let cli = Cli::parse_from(["phimtra", "extract", "phim hài", "--json", "--lexical"]);
        match cli.command {
            Command::Extract {
                query,
                json,
                lexical,
            } => {
                assert_eq!(query, "phim hài");
                assert!(json);
                assert!(lexical);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_config_flag() {
        let cli = Cli::parse_from(["phimtra", "eval", "--config", "custom.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Command::Eval { cases: None, json: false }));
    }

    #[test]
    fn eval_with_cases_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cases.json");
        std::fs::write(&path, r#"[{"query": "Mai", "expected_type": "title_search"}]"#).unwrap();
        let command = Command::Eval {
            cases: Some(path),
            json: true,
        };
        run(command, &AppConfig::default()).unwrap();
    }
}
