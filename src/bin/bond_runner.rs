//! Headless Bond Runner
//!
//! Seeds a random board from a recipe catalog, runs a full bond
//! recompute, and prints the resulting molecules as JSON or text.

use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use hexbond::board::{Board, HexCoord};
use hexbond::bonding::{BondEngine, Unit};
use hexbond::catalog::{BondType, Recipe, RecipeCatalog, Requirement};
use hexbond::core::types::{PlayerId, Species, Stats};
use hexbond::core::BondConfig;

/// Headless Bond Runner - random boards through the matcher
#[derive(Parser, Debug)]
#[command(name = "bond_runner")]
#[command(about = "Run bond matching over a randomly seeded board")]
struct Args {
    /// Recipe catalog file (TOML or JSON); a built-in catalog is used
    /// when omitted
    #[arg(long)]
    catalog: Option<std::path::PathBuf>,

    /// Board width in hexes
    #[arg(long, default_value_t = 7)]
    width: u32,

    /// Board height in hexes
    #[arg(long, default_value_t = 4)]
    height: u32,

    /// Units to place per side
    #[arg(long, default_value_t = 12)]
    units: usize,

    /// Number of sides
    #[arg(long, default_value_t = 2)]
    players: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Disable partial bonds
    #[arg(long)]
    no_partial: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    units_placed: usize,
    molecules: Vec<MoleculeSummary>,
    partial_bonds: usize,
}

#[derive(Serialize)]
struct MoleculeSummary {
    recipe: String,
    core_species: String,
    component_count: usize,
}

fn builtin_catalog() -> RecipeCatalog {
    let req = |s: &str, count: u32| Requirement {
        species: Species::new(s),
        count,
    };
    RecipeCatalog::new(vec![
        Recipe {
            name: "Water".into(),
            core: "O".into(),
            requires: vec![req("H", 2)],
            bond_type: BondType::Covalent,
            hp_multiplier: 1.5,
            damage_multiplier: 1.2,
        },
        Recipe {
            name: "Salt".into(),
            core: "Na".into(),
            requires: vec![req("Cl", 1)],
            bond_type: BondType::Ionic,
            hp_multiplier: 1.0,
            damage_multiplier: 1.0,
        },
        Recipe {
            name: "Steel".into(),
            core: "Fe".into(),
            requires: vec![req("C", 2)],
            bond_type: BondType::Metallic,
            hp_multiplier: 1.0,
            damage_multiplier: 1.0,
        },
        Recipe {
            name: "Methane".into(),
            core: "C".into(),
            requires: vec![req("H", 4)],
            bond_type: BondType::Covalent,
            hp_multiplier: 2.0,
            damage_multiplier: 1.5,
        },
    ])
}

/// Species pool drawn from the catalog: cores plus everything required
fn species_pool(catalog: &RecipeCatalog) -> Vec<Species> {
    let mut pool = Vec::new();
    for recipe in catalog.recipes() {
        if !pool.contains(&recipe.core) {
            pool.push(recipe.core.clone());
        }
        for req in &recipe.requires {
            if !pool.contains(&req.species) {
                pool.push(req.species.clone());
            }
        }
    }
    pool
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => match RecipeCatalog::load(path) {
            Ok(catalog) => catalog,
            Err(err) => {
                eprintln!("failed to load catalog {}: {err}", path.display());
                std::process::exit(1);
            }
        },
        None => builtin_catalog(),
    };

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    tracing::info!(seed, recipes = catalog.len(), "seeding board");

    let pool = species_pool(&catalog);
    let mut board = Board::new(args.width, args.height);
    let mut placed = 0usize;

    for p in 0..args.players {
        let player = PlayerId(p);
        board.add_player(player);

        let mut coords: Vec<HexCoord> = (0..args.width as i32)
            .flat_map(|q| (0..args.height as i32).map(move |r| HexCoord::new(q, r)))
            .collect();
        coords.shuffle(&mut rng);

        for coord in coords.into_iter().take(args.units) {
            let species = pool.choose(&mut rng).cloned().unwrap_or_else(|| "H".into());
            let stats = Stats::new(
                rng.gen_range(60.0..140.0),
                rng.gen_range(5.0..15.0),
                rng.gen_range(1..=3),
            );
            let unit = Unit::new(species, player, stats);
            match board.spawn_unit(unit) {
                Ok(id) => match board.place_unit(id, coord) {
                    Ok(()) => placed += 1,
                    Err(err) => tracing::warn!(%err, "placement skipped"),
                },
                Err(err) => tracing::warn!(%err, "spawn skipped"),
            }
        }
    }

    let mut config = BondConfig::default();
    config.partial_bonds_enabled = !args.no_partial;
    let mut engine = BondEngine::new(catalog, config);
    let events = engine.match_all(&mut board);

    let molecules: Vec<MoleculeSummary> = engine
        .active_molecules()
        .iter()
        .filter_map(|id| engine.molecule(*id))
        .map(|m| MoleculeSummary {
            recipe: m.recipe.name.clone(),
            core_species: m.recipe.core.to_string(),
            component_count: m.components.len(),
        })
        .collect();
    let partial_bonds = events
        .events
        .iter()
        .filter(|e| matches!(e.event_type, hexbond::bonding::BondEventType::PartialBond { .. }))
        .count();

    let summary = RunSummary {
        seed,
        units_placed: placed,
        molecules,
        partial_bonds,
    };

    if args.format == "text" {
        println!("seed: {}", summary.seed);
        println!("units placed: {}", summary.units_placed);
        println!("partial bonds: {}", summary.partial_bonds);
        for m in &summary.molecules {
            println!(
                "  {} (core {}, {} components)",
                m.recipe, m.core_species, m.component_count
            );
        }
    } else {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("serialization failed: {err}"),
        }
    }
}
