//! Headless scenario runner
//!
//! Loads a scenario and lets every civilization's units attack automatically
//! for a number of turns, then prints a summary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use warpath::automation::BattleHelper;
use warpath::combat::{CombatOutcome, CombatRecord};
use warpath::core::types::CivId;
use warpath::core::{Result, TargetingConfig};
use warpath::rules::{builtin_ruleset, load_ruleset};
use warpath::world::{GameState, Scenario, WorldActions};

/// Headless runner for automated combat
#[derive(Parser, Debug)]
#[command(name = "warpath")]
#[command(about = "Run automated combat turns on a scenario and report the outcome")]
struct Args {
    /// Scenario file (TOML)
    #[arg(default_value = "data/scenarios/coastal_raid.toml")]
    scenario: PathBuf,

    /// Unit rules file (TOML); the built-in catalog is used when omitted
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Targeting config override (TOML)
    #[arg(long)]
    targeting: Option<PathBuf>,

    /// Number of turns to play
    #[arg(long, default_value_t = 5)]
    turns: u32,

    /// Override the scenario's combat seed
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Log every decision
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize)]
struct CivSummary {
    id: u32,
    name: String,
    units: usize,
    cities: Vec<String>,
}

#[derive(Serialize)]
struct RunSummary {
    scenario: String,
    turns: u32,
    attacks: usize,
    kills: usize,
    captures: usize,
    civs: Vec<CivSummary>,
    log: Vec<CombatRecord>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "warpath=debug" } else { "warpath=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let rules = match &args.rules {
        Some(path) => load_ruleset(path)?,
        None => builtin_ruleset()?,
    };

    let mut scenario = Scenario::load(&args.scenario)?;
    if let Some(seed) = args.seed {
        scenario.combat.seed = seed;
    }
    if let Some(path) = &args.targeting {
        scenario.targeting = TargetingConfig::load(path)?;
    }

    let mut state = scenario.build(&rules)?;
    let helper = BattleHelper::new(scenario.targeting.clone());

    tracing::info!(scenario = %scenario.name, turns = args.turns, "starting run");
    for _ in 0..args.turns {
        for civ in state.civ_ids() {
            play_civ_turn(&helper, &mut state, civ)?;
        }
        state.start_turn();
    }

    let summary = summarize(&scenario, &state, args.turns);
    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => print_text(&summary),
    }
    Ok(())
}

/// Embarked units try to land next to a target first; then everyone attacks if safe
fn play_civ_turn(helper: &BattleHelper, state: &mut GameState, civ: CivId) -> Result<()> {
    for id in state.units_of(civ) {
        // Earlier attacks this turn may have killed or captured it
        let Some(unit) = state.unit(id) else {
            continue;
        };
        if unit.civ != civ {
            continue;
        }
        if unit.is_embarked() {
            helper.disembark_toward_attack(state, id)?;
        }
        if state.unit(id).is_some_and(|u| u.has_movement_left()) {
            helper.attack_if_safe(state, id, false)?;
        }
    }
    Ok(())
}

fn summarize(scenario: &Scenario, state: &GameState, turns: u32) -> RunSummary {
    let log = state.combat_log.records().to_vec();
    let civs = state
        .civ_ids()
        .into_iter()
        .map(|id| {
            let mut cities: Vec<String> = state.cities_of(id).map(|c| c.name.clone()).collect();
            cities.sort();
            CivSummary {
                id: id.0,
                name: state.civs.get(&id).map(|c| c.name.clone()).unwrap_or_default(),
                units: state.units_of(id).len(),
                cities,
            }
        })
        .collect();

    RunSummary {
        scenario: scenario.name.clone(),
        turns,
        attacks: log.len(),
        kills: state.combat_log.count_outcome(CombatOutcome::Killed),
        captures: state.combat_log.count_outcome(CombatOutcome::CityCaptured)
            + state.combat_log.count_outcome(CombatOutcome::CivilianCaptured),
        civs,
        log,
    }
}

fn print_text(summary: &RunSummary) {
    println!("=== {} after {} turns ===", summary.scenario, summary.turns);
    println!(
        "attacks: {}  kills: {}  captures: {}",
        summary.attacks, summary.kills, summary.captures
    );
    println!();
    for civ in &summary.civs {
        println!(
            "{:<12} units: {:>3}  cities: {}",
            civ.name,
            civ.units,
            if civ.cities.is_empty() {
                "-".to_string()
            } else {
                civ.cities.join(", ")
            }
        );
    }
    println!();
    for record in &summary.log {
        println!(
            "turn {:>2}: {} {} ({},{}) -> ({},{}) dealt {} took {} [{:?}]",
            record.turn,
            record.attacker_civ,
            record.attacker,
            record.attack_from.q,
            record.attack_from.r,
            record.target.q,
            record.target.r,
            record.damage_dealt,
            record.damage_taken,
            record.outcome
        );
    }
}
