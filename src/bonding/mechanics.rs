//! Bond mechanics: the three stat-transform strategies
//!
//! Covalent merges components into the core, Ionic buffs every
//! participant in place, Metallic pools hit points. Apply and revert are
//! free functions dispatching on the recipe's bond type, in the same style
//! as combat resolution.

use crate::board::topology::Board;
use crate::bonding::molecule::Molecule;
use crate::catalog::recipe::{BondType, Recipe};
use crate::core::config::BondConfig;
use crate::core::types::UnitId;

/// Result of routing damage through a metallic pool
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoolDamage {
    /// Pool survived; remaining pool value after redistribution
    Absorbed(f32),
    /// Pool reached zero or below; the molecule must break
    Depleted,
}

/// Apply this molecule's bond transform to its participants.
/// Bonding states are set by the lifecycle manager, not here.
pub fn apply_bond(board: &mut Board, molecule: &mut Molecule, config: &BondConfig) {
    match molecule.bond_type() {
        BondType::Covalent => apply_covalent(board, molecule, config),
        BondType::Ionic => apply_ionic(board, molecule, config),
        BondType::Metallic => apply_metallic(board, molecule),
    }
}

/// Revert this molecule's bond transform on every surviving participant.
pub fn revert_bond(board: &mut Board, molecule: &mut Molecule, config: &BondConfig) {
    match molecule.bond_type() {
        BondType::Covalent => revert_covalent(board, molecule, config),
        BondType::Ionic => revert_ionic(board, molecule, config),
        BondType::Metallic => revert_metallic(board, molecule),
    }
}

/// Covalent merge: the core absorbs a share of each component's base
/// stats; components go inactive but are retained for exact restoration.
fn apply_covalent(board: &mut Board, molecule: &Molecule, config: &BondConfig) {
    let star = config.star_multiplier;

    let mut hp_sum = 0.0;
    let mut dmg_sum = 0.0;
    for id in &molecule.components {
        if let Some(unit) = board.unit(*id) {
            hp_sum += unit.scaled_base_hp(star) * config.covalent_hp_share;
            dmg_sum += unit.scaled_base_damage(star) * config.covalent_damage_share;
        }
    }

    if let Some(core) = board.unit_mut(molecule.core) {
        let new_hp = core.scaled_base_hp(star) * molecule.recipe.hp_multiplier + hp_sum;
        let new_dmg =
            core.scaled_base_damage(star) * molecule.recipe.damage_multiplier + dmg_sum;
        core.max_hp = new_hp;
        core.hp = new_hp;
        core.damage = new_dmg;
    }

    for id in &molecule.components {
        if let Some(unit) = board.unit_mut(*id) {
            unit.set_active(false);
        }
    }
}

fn revert_covalent(board: &mut Board, molecule: &Molecule, config: &BondConfig) {
    for id in molecule.participants() {
        if let Some(unit) = board.unit_mut(id) {
            if unit.alive {
                unit.restore_base_stats(config.star_multiplier);
                unit.set_active(true);
            }
        }
    }
}

/// Ionic mutual buff: flat damage-reduction and damage-reflection
/// modifiers on every participant; nobody merges or hides.
fn apply_ionic(board: &mut Board, molecule: &Molecule, config: &BondConfig) {
    for id in molecule.participants() {
        if let Some(unit) = board.unit_mut(id) {
            unit.damage_reduction += config.ionic_damage_reduction;
            unit.damage_reflect += config.ionic_damage_reflect;
        }
    }
}

fn revert_ionic(board: &mut Board, molecule: &Molecule, config: &BondConfig) {
    for id in molecule.participants() {
        if let Some(unit) = board.unit_mut(id) {
            if unit.alive {
                unit.damage_reduction -= config.ionic_damage_reduction;
                unit.damage_reflect -= config.ionic_damage_reflect;
            }
        }
    }
}

/// Metallic shared pool: the pool is the sum of CURRENT hit points at
/// formation time.
fn apply_metallic(board: &mut Board, molecule: &mut Molecule) {
    let pool: f32 = molecule
        .participants()
        .iter()
        .filter_map(|id| board.unit(*id))
        .map(|u| u.hp)
        .sum();
    molecule.pool = Some(pool);
}

/// Participants detach keeping whatever hp they currently hold.
fn revert_metallic(_board: &mut Board, molecule: &mut Molecule) {
    molecule.pool = None;
}

/// Route damage into a metallic pool. On survival the pool is evenly
/// redistributed as each participant's current hp, clamped to that unit's
/// own max hp; the pool value itself is not reduced by clamping.
pub fn pool_damage(board: &mut Board, molecule: &mut Molecule, amount: f32) -> PoolDamage {
    let Some(pool) = molecule.pool else {
        return PoolDamage::Depleted;
    };
    let remaining = pool - amount;
    if remaining <= 0.0 {
        molecule.pool = Some(0.0);
        return PoolDamage::Depleted;
    }
    molecule.pool = Some(remaining);

    let alive: Vec<UnitId> = molecule
        .participants()
        .into_iter()
        .filter(|id| board.unit(*id).map(|u| u.alive).unwrap_or(false))
        .collect();
    if alive.is_empty() {
        return PoolDamage::Depleted;
    }
    let share = remaining / alive.len() as f32;
    for id in alive {
        if let Some(unit) = board.unit_mut(id) {
            unit.hp = share.min(unit.max_hp);
        }
    }
    PoolDamage::Absorbed(remaining)
}

/// Partial-bond buff: scale the core's max hp and damage by the recipe
/// multipliers dampened by completion ratio. Intentionally uncapped and
/// untracked; repeated incremental triggers compound.
pub fn apply_partial_buff(
    board: &mut Board,
    core: UnitId,
    recipe: &Recipe,
    ratio: f32,
    config: &BondConfig,
) {
    let hp_factor = 1.0 + (recipe.hp_multiplier - 1.0) * ratio * config.partial_scale;
    let dmg_factor = 1.0 + (recipe.damage_multiplier - 1.0) * ratio * config.partial_scale;
    if let Some(unit) = board.unit_mut(core) {
        unit.apply_stat_multiplier(hp_factor, dmg_factor);
    }
}
