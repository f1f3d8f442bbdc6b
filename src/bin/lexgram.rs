//! Command-line interface for lexgram
//! Loads a grammar definition and resolves it against a set of token categories,
//! reporting every rule that fails to bind.
//!
//! Usage:
//!   lexgram check `<path>` --category `<name>`... [--categories-file `<file>`]
//!                [--config `<file>`] [--collect] [--format text|json]
//!
//! Configuration layers, lowest first: built-in defaults, `lexgram.toml` in the
//! working directory (if present), `--config`, then `--collect`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use lexgram::lexgram::builder::ResolutionReport;
use lexgram::lexgram::category::CategoryTable;
use lexgram::lexgram::config::Loader;
use lexgram::lexgram::error::BuildError;
use lexgram::lexgram::grammar::Grammar;
use lexgram::lexgram::loading::GrammarDefinition;
use lexgram::lexgram::resolver::Resolver;
use serde::Serialize;
use std::error::Error;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOCAL_CONFIG_FILE: &str = "lexgram.toml";

fn main() -> ExitCode {
    init_logging();

    let matches = Command::new("lexgram")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Check declarative lexical grammars")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("check")
                .about("Resolve a grammar definition and report failing rules")
                .arg(
                    Arg::new("path")
                        .help("Path to the grammar definition (.yaml, .yml or .json)")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .short('c')
                        .help("Register a token category (repeatable)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("categories-file")
                        .long("categories-file")
                        .help("File listing one token category per line"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("Configuration file layered over the defaults and ./lexgram.toml"),
                )
                .arg(
                    Arg::new("collect")
                        .long("collect")
                        .help("Report every failing rule instead of stopping at the first")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("check", check_matches)) => match handle_check_command(check_matches) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(e) => {
                eprintln!("Error: {}", render_chain(e.as_ref()));
                ExitCode::FAILURE
            }
        },
        _ => unreachable!(),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Handle the check command. Returns whether every rule resolved.
fn handle_check_command(matches: &ArgMatches) -> Result<bool, Box<dyn Error>> {
    let path = matches.get_one::<String>("path").unwrap();
    let format = matches.get_one::<String>("format").unwrap();

    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    if let Some(config_path) = matches.get_one::<String>("config") {
        loader = loader.with_file(config_path);
    }
    if matches.get_flag("collect") {
        loader = loader.set_override("resolution.on_failure", "collect")?;
    }
    let config = loader.build()?;

    let mut names: Vec<String> = matches
        .get_many::<String>("category")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    if let Some(file) = matches.get_one::<String>("categories-file") {
        let contents = std::fs::read_to_string(file)?;
        names.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        );
    }
    let categories = CategoryTable::from_names(&names);
    let resolver = Resolver::from_config(&categories, &config);

    let builder = GrammarDefinition::from_path(path)?.into_builder();
    let summary = match builder.build(&resolver, config.resolution.on_failure) {
        Ok((grammar, report)) => CheckSummary::from_report(&grammar, &report),
        Err(BuildError::Resolution {
            index,
            descriptor,
            source,
        }) => CheckSummary::aborted(index, descriptor, &source),
    };

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => print!("{}", summary.to_text()),
    }

    Ok(summary.failures.is_empty())
}

#[derive(Debug, Serialize)]
struct CheckSummary {
    grammar: Option<String>,
    states: Vec<StateSummary>,
    failures: Vec<FailureSummary>,
}

#[derive(Debug, Serialize)]
struct StateSummary {
    name: String,
    rules: usize,
}

#[derive(Debug, Serialize)]
struct FailureSummary {
    index: usize,
    rule: String,
    error: String,
}

impl CheckSummary {
    fn from_report(grammar: &Grammar, report: &ResolutionReport) -> Self {
        let states = grammar
            .state_names()
            .into_iter()
            .map(|name| StateSummary {
                name: name.to_string(),
                rules: grammar.state(name).map(|s| s.len()).unwrap_or(0),
            })
            .collect();
        let failures = report
            .failures
            .iter()
            .map(|f| FailureSummary {
                index: f.index,
                rule: f.descriptor.clone(),
                error: render_chain(&f.error),
            })
            .collect();
        Self {
            grammar: Some(grammar.name().to_string()),
            states,
            failures,
        }
    }

    fn aborted(index: usize, descriptor: String, error: &dyn Error) -> Self {
        Self {
            grammar: None,
            states: Vec::new(),
            failures: vec![FailureSummary {
                index,
                rule: descriptor,
                error: render_chain(error),
            }],
        }
    }

    fn to_text(&self) -> String {
        let mut out = String::new();
        if let Some(name) = &self.grammar {
            out.push_str(&format!("grammar {name}\n"));
            for state in &self.states {
                out.push_str(&format!("  {}: {} rule(s)\n", state.name, state.rules));
            }
        }
        for failure in &self.failures {
            out.push_str(&format!(
                "error: rule #{} ({}): {}\n",
                failure.index, failure.rule, failure.error
            ));
        }
        out
    }
}

/// Join an error and its sources into one line.
fn render_chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}
