use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use gunner_app::game_loop::{spawn_match, MatchEvent};
use gunner_app::scenario::Scenario;
use gunner_core::config::ControllerConfig;

#[derive(Parser, Debug)]
#[command(name = "gunner")]
#[command(about = "Run the gunner targeting controller against an arena or a recorded match")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scenario and print one JSON line per tick, then a summary line
    Run {
        /// Scenario JSON file (built-in duel when omitted)
        scenario: Option<PathBuf>,
        /// Controller config JSON file, replacing the scenario's own
        #[arg(long)]
        config: Option<PathBuf>,
        /// Navigator seed override
        #[arg(long)]
        seed: Option<u64>,
        /// Tick count override
        #[arg(long)]
        ticks: Option<u64>,
        /// Pace the match to this many ticks per second
        #[arg(long)]
        tick_rate: Option<u32>,
        /// Print only the summary line
        #[arg(long, default_value_t = false)]
        summary_only: bool,
    },
    /// Print the default controller config
    DefaultConfig,
    /// Print the built-in duel scenario
    ExampleScenario,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("gunner=info"))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            scenario,
            config,
            seed,
            ticks,
            tick_rate,
            summary_only,
        } => {
            let scenario = load_scenario(scenario.as_deref(), config.as_deref(), seed, ticks)?;
            cmd_run(scenario, tick_rate, summary_only)
        }
        Commands::DefaultConfig => print_json(&ControllerConfig::default()),
        Commands::ExampleScenario => print_json(&Scenario::duel()),
    }
}

fn load_scenario(
    path: Option<&Path>,
    config: Option<&Path>,
    seed: Option<u64>,
    ticks: Option<u64>,
) -> Result<Scenario> {
    let mut scenario = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading scenario {}", path.display()))?;
            Scenario::from_json(&json)
                .with_context(|| format!("parsing scenario {}", path.display()))?
        }
        None => Scenario::duel(),
    };

    if let Some(path) = config {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        scenario.controller = ControllerConfig::from_json(&json)
            .with_context(|| format!("parsing config {}", path.display()))?;
    }
    if let Some(seed) = seed {
        scenario.controller.nav.seed = seed;
    }
    if let Some(ticks) = ticks {
        scenario.ticks = ticks;
    }

    scenario
        .controller
        .validate()
        .with_context(|| format!("invalid controller config for '{}'", scenario.name))?;
    Ok(scenario)
}

fn cmd_run(scenario: Scenario, tick_rate: Option<u32>, summary_only: bool) -> Result<()> {
    let (events, handle) = spawn_match(scenario, tick_rate).context("spawning match thread")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut outcome = Err(anyhow!("match thread exited without a result"));
    for event in events {
        match event {
            MatchEvent::Tick(record) => {
                if !summary_only {
                    serde_json::to_writer(&mut out, &record)?;
                    writeln!(out)?;
                }
            }
            MatchEvent::Finished(summary) => {
                serde_json::to_writer(&mut out, &summary)?;
                writeln!(out)?;
                outcome = Ok(());
            }
            MatchEvent::Failed(err) => {
                outcome = Err(anyhow!(err).context("controller rejected its config"));
            }
        }
    }

    handle
        .join()
        .map_err(|_| anyhow!("match thread panicked"))?;
    outcome
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
