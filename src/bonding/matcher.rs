//! Deterministic recipe matching over the board
//!
//! Full recompute (`match_all`) and localized recompute (`match_for_unit`).
//! Both are synchronous and deterministic for a fixed board and catalog:
//! recipes iterate in catalog order, players in sorted order, board units
//! in row-major scan order, neighbors in fixed direction order. Once a
//! unit is consumed it stays consumed for the rest of the pass, so catalog
//! order is the priority rule for contested units.

use crate::board::topology::Board;
use crate::bonding::events::BondEventLog;
use crate::bonding::lifecycle::MoleculeManager;
use crate::bonding::mechanics;
use crate::catalog::recipe::{Recipe, RecipeCatalog};
use crate::core::config::BondConfig;
use crate::core::types::UnitId;

/// Outcome of trying one recipe against one candidate core
#[derive(Debug, Clone, Copy, PartialEq)]
enum MatchOutcome {
    /// Core or species mismatch, or core not free
    NotApplicable,
    /// Committed: a molecule was formed
    Formed,
    /// Requirements not fully covered; completion ratio in [0, 1)
    Incomplete(f32),
}

/// Full recompute: break every formed molecule, then re-match the whole
/// board from a clean slate. Not order-dependent on prior partial state.
pub fn match_all(
    board: &mut Board,
    catalog: &RecipeCatalog,
    manager: &mut MoleculeManager,
    config: &BondConfig,
) -> BondEventLog {
    let mut events = BondEventLog::new();
    manager.break_all(board, config, &mut events);

    for recipe in catalog.recipes() {
        for owner in board.players() {
            for core in board.units_in_scan_order(owner) {
                attempt(board, recipe, core, manager, config, &mut events);
            }
        }
    }

    tracing::debug!(
        molecules = manager.len(),
        events = events.events.len(),
        "full bond recompute"
    );
    events
}

/// Localized recompute for a single placed unit: re-evaluates only the
/// placed unit and each of its neighbors as candidate cores. Deliberately
/// NOT a full scan; the resulting partition may differ from `match_all`
/// on the same board.
pub fn match_for_unit(
    board: &mut Board,
    placed: UnitId,
    catalog: &RecipeCatalog,
    manager: &mut MoleculeManager,
    config: &BondConfig,
) -> BondEventLog {
    let mut events = BondEventLog::new();

    let Some(unit) = board.unit(placed) else {
        return events;
    };
    let Some(position) = unit.position else {
        return events; // bench placements never bond
    };
    let owner = unit.owner;

    let mut candidates = vec![placed];
    candidates.extend(board.neighbor_ids(owner, position));

    for candidate in candidates {
        for recipe in catalog.recipes() {
            match attempt(board, recipe, candidate, manager, config, &mut events) {
                MatchOutcome::Formed => break, // candidate is consumed now
                MatchOutcome::NotApplicable | MatchOutcome::Incomplete(_) => {}
            }
        }
    }
    events
}

/// Try one recipe on one candidate core: greedy requirement satisfaction
/// over the core's free neighbors, commit on full cover, partial buff on
/// partial cover when enabled.
fn attempt(
    board: &mut Board,
    recipe: &Recipe,
    core: UnitId,
    manager: &mut MoleculeManager,
    config: &BondConfig,
    events: &mut BondEventLog,
) -> MatchOutcome {
    let Some(unit) = board.unit(core) else {
        return MatchOutcome::NotApplicable;
    };
    if !unit.can_bond() || unit.species != recipe.core {
        return MatchOutcome::NotApplicable;
    }
    let owner = unit.owner;
    let Some(position) = unit.position else {
        return MatchOutcome::NotApplicable;
    };

    // Free neighbors in fixed direction order
    let free_neighbors: Vec<UnitId> = board
        .neighbor_units(owner, position)
        .into_iter()
        .filter(|u| u.can_bond())
        .map(|u| u.id)
        .collect();

    // Greedy assignment: first neighbor of a still-needed species wins a
    // slot; no unit ever fills two slots.
    let mut remaining: Vec<(crate::core::types::Species, u32)> = recipe
        .requires
        .iter()
        .map(|r| (r.species.clone(), r.count))
        .collect();
    let mut assigned: Vec<UnitId> = Vec::new();

    for neighbor in &free_neighbors {
        let Some(unit) = board.unit(*neighbor) else {
            continue;
        };
        if let Some(slot) = remaining
            .iter_mut()
            .find(|(species, count)| *count > 0 && *species == unit.species)
        {
            slot.1 -= 1;
            assigned.push(*neighbor);
        }
    }

    if remaining.iter().all(|(_, count)| *count == 0) {
        manager.form_molecule(board, recipe, core, assigned, config, events);
        return MatchOutcome::Formed;
    }

    let ratio = completion_ratio(board, recipe, &free_neighbors);
    if config.partial_bonds_enabled && ratio > 0.0 {
        mechanics::apply_partial_buff(board, core, recipe, ratio, config);
        events.push(
            crate::bonding::events::BondEventType::PartialBond {
                unit_id: core,
                recipe: recipe.name.clone(),
                ratio,
            },
            format!("{} partial bond at {:.0}%", recipe.name, ratio * 100.0),
        );
    }
    MatchOutcome::Incomplete(ratio)
}

/// Completion ratio: sum over required species of min(available, required)
/// divided by the total required count.
fn completion_ratio(board: &Board, recipe: &Recipe, free_neighbors: &[UnitId]) -> f32 {
    let total = recipe.total_required();
    if total == 0 {
        return 0.0;
    }
    let satisfied: u32 = recipe
        .requires
        .iter()
        .map(|req| {
            let available = free_neighbors
                .iter()
                .filter_map(|id| board.unit(*id))
                .filter(|u| u.species == req.species)
                .count() as u32;
            available.min(req.count)
        })
        .sum();
    satisfied as f32 / total as f32
}
