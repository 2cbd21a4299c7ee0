//! `scenario-engine` command-line tooling over scenario record files

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use scenario_config::{normalize_with, ScenarioKey};
use scenario_engine::{EngineConfig, MemoryScenarioStore, ScenarioEngine, ScenarioStore};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let file = Arg::new("file")
        .long("file")
        .short('f')
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("JSON file with one scenario record or an array of them");

    Command::new("scenario-engine")
        .version(scenario_engine::VERSION)
        .about("Offline tooling for scenario records")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Engine configuration (TOML)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("normalize")
                .about("Print canonical configs and warnings")
                .arg(file.clone())
                .arg(
                    Arg::new("key")
                        .long("key")
                        .short('k')
                        .value_parser(value_parser!(ScenarioKey))
                        .help("Only this scenario (scene:subscene)"),
                ),
        )
        .subcommand(
            Command::new("resolve")
                .about("Resolve a tile interaction")
                .arg(file.clone())
                .arg(
                    Arg::new("key")
                        .long("key")
                        .short('k')
                        .required(true)
                        .value_parser(value_parser!(ScenarioKey))
                        .help("Scenario (scene:subscene)"),
                )
                .arg(
                    Arg::new("tile")
                        .long("tile")
                        .short('t')
                        .required(true)
                        .help("Tile address, e.g. B2"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Check the scenario graph")
                .arg(file)
                .arg(
                    Arg::new("root")
                        .long("root")
                        .value_parser(value_parser!(ScenarioKey))
                        .help("Entry scenario (scene:subscene)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Fail on non-advisory graph issues too"),
                ),
        )
}

fn init_tracing(config: &EngineConfig, json_logs: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_engine(args: &ArgMatches, config: EngineConfig) -> Result<ScenarioEngine> {
    let path = args
        .get_one::<PathBuf>("file")
        .context("--file is required")?;
    let store = MemoryScenarioStore::load(path)
        .with_context(|| format!("loading scenarios from {}", path.display()))?;
    Ok(ScenarioEngine::in_memory(store, config))
}

fn run_normalize(engine: &ScenarioEngine, args: &ArgMatches) -> Result<ExitCode> {
    if let Some(&key) = args.get_one::<ScenarioKey>("key") {
        let normalized = engine.scenario(key)?;
        println!("{}", serde_json::to_string_pretty(&normalized)?);
        return Ok(ExitCode::SUCCESS);
    }

    let options = engine.config().normalize_options();
    let mut failed = false;
    let mut out = Vec::new();
    for raw in engine.store().raw_scenarios()? {
        match normalize_with(&raw, &options) {
            Ok(normalized) => out.push(serde_json::to_value(&normalized)?),
            Err(e) => {
                failed = true;
                out.push(json!({ "error": e.to_string() }));
            }
        }
    }
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn run_resolve(engine: &ScenarioEngine, args: &ArgMatches) -> Result<ExitCode> {
    let key = *args.get_one::<ScenarioKey>("key").context("--key is required")?;
    let tile = args.get_one::<String>("tile").context("--tile is required")?;
    let decision = engine.trigger_str(key, tile, None)?;
    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(ExitCode::SUCCESS)
}

fn run_validate(engine: &ScenarioEngine, args: &ArgMatches) -> Result<ExitCode> {
    let root = args.get_one::<ScenarioKey>("root").copied();
    let report = engine.validate(root)?;

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Scenario Graph Report");
        println!("=====================");
        match report.root {
            Some(root) => println!("Root: {root}"),
            None => println!("Root: (none)"),
        }
        println!("Scenarios: {}", report.scenarios);
        println!("Failures: {}", report.failures.len());
        for failure in &report.failures {
            match failure.key {
                Some(key) => println!("  #{} ({key}): {}", failure.index, failure.error),
                None => println!("  #{}: {}", failure.index, failure.error),
            }
        }
        println!("Issues: {}", report.issues.len());
        for issue in &report.issues {
            let marker = if issue.is_advisory() { "note" } else { "error" };
            println!("  [{marker}] {issue}");
        }
        let warning_count: usize = report.warnings.iter().map(|w| w.warnings.len()).sum();
        println!("Warnings: {warning_count}");
        for entry in &report.warnings {
            for warning in &entry.warnings {
                println!("  {}: {warning}", entry.key);
            }
        }
    }

    let strict = args.get_flag("strict");
    let failed = report.has_failures() || (strict && report.has_defects());
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn main() -> Result<ExitCode> {
    let matches = cli().get_matches();

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    init_tracing(&config, matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("normalize", args)) => run_normalize(&load_engine(args, config)?, args),
        Some(("resolve", args)) => run_resolve(&load_engine(args, config)?, args),
        Some(("validate", args)) => run_validate(&load_engine(args, config)?, args),
        _ => Ok(ExitCode::FAILURE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn parses_keys() {
        let m = cli()
            .try_get_matches_from(["scenario-engine", "resolve", "-f", "s.json", "--key", "1:2", "--tile", "B2"])
            .unwrap();
        let (_, args) = m.subcommand().unwrap();
        assert_eq!(args.get_one::<ScenarioKey>("key"), Some(&ScenarioKey::new(1, 2)));
    }

    #[test]
    fn rejects_bad_key() {
        assert!(cli()
            .try_get_matches_from(["scenario-engine", "validate", "-f", "s.json", "--root", "one"])
            .is_err());
    }
}
