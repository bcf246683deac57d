//! Bonding engine composition root
//!
//! Owns the catalog, config, and molecule manager. The board stays
//! caller-owned and is passed in per operation; there is no ambient
//! global instance. Everything here is synchronous and run-to-completion:
//! death notifications fire inside the damage call that caused them.

use crate::board::topology::Board;
use crate::bonding::events::{BondEventLog, BondEventType, BreakReason};
use crate::bonding::lifecycle::MoleculeManager;
use crate::bonding::matcher;
use crate::bonding::mechanics::{self, PoolDamage};
use crate::bonding::molecule::Molecule;
use crate::catalog::recipe::{BondType, RecipeCatalog};
use crate::core::config::BondConfig;
use crate::core::types::{MoleculeId, UnitId};

/// What a single damage application did
#[derive(Debug, Clone, Default)]
pub struct DamageReport {
    pub killed: bool,
    /// Damage reflected back at the attacker (ionic bonds)
    pub reflected: f32,
    pub events: BondEventLog,
}

/// The bonding engine: matching + molecule lifecycle + bond mechanics
#[derive(Debug, Clone)]
pub struct BondEngine {
    catalog: RecipeCatalog,
    config: BondConfig,
    manager: MoleculeManager,
}

impl BondEngine {
    pub fn new(catalog: RecipeCatalog, config: BondConfig) -> Self {
        Self {
            catalog,
            config,
            manager: MoleculeManager::new(),
        }
    }

    pub fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &BondConfig {
        &self.config
    }

    pub fn molecule(&self, id: MoleculeId) -> Option<&Molecule> {
        self.manager.molecule(id)
    }

    pub fn molecule_of(&self, unit: UnitId) -> Option<MoleculeId> {
        self.manager.molecule_of(unit)
    }

    pub fn active_molecules(&self) -> Vec<MoleculeId> {
        self.manager.active()
    }

    pub fn molecule_count(&self) -> usize {
        self.manager.len()
    }

    /// Current unit partition in formation order (recipe, core, components)
    pub fn partition(&self) -> Vec<(String, UnitId, Vec<UnitId>)> {
        self.manager.partition()
    }

    /// Full recompute from a clean slate (combat-phase start)
    pub fn match_all(&mut self, board: &mut Board) -> BondEventLog {
        matcher::match_all(board, &self.catalog, &mut self.manager, &self.config)
    }

    /// Localized recompute after a single unit placement
    pub fn match_for_unit(&mut self, board: &mut Board, unit: UnitId) -> BondEventLog {
        matcher::match_for_unit(board, unit, &self.catalog, &mut self.manager, &self.config)
    }

    /// Break one molecule (idempotent)
    pub fn break_molecule(&mut self, board: &mut Board, id: MoleculeId) -> BondEventLog {
        let mut events = BondEventLog::new();
        self.manager
            .break_molecule(board, id, BreakReason::Manual, &self.config, &mut events);
        events
    }

    /// Break every active molecule (combat-phase end, round reset)
    pub fn break_all(&mut self, board: &mut Board) -> BondEventLog {
        let mut events = BondEventLog::new();
        self.manager.break_all(board, &self.config, &mut events);
        events
    }

    /// Apply incoming damage to a unit, routing through its bond:
    /// metallic pools absorb first; ionic modifiers reduce and reflect;
    /// death notifications fire synchronously before this returns.
    pub fn apply_damage(&mut self, board: &mut Board, target: UnitId, amount: f32) -> DamageReport {
        let mut report = DamageReport::default();

        let Some(unit) = board.unit(target) else {
            return report;
        };
        if !unit.alive {
            return report;
        }
        report.reflected = amount * unit.damage_reflect;
        let effective = amount * (1.0 - unit.damage_reduction);

        // Metallic pool intercepts the hit before individual hp
        if let Some(id) = self.manager.molecule_of(target) {
            let is_metallic = self
                .manager
                .molecule(id)
                .map(|m| m.bond_type() == BondType::Metallic)
                .unwrap_or(false);
            if is_metallic {
                self.pool_hit(board, id, effective, &mut report.events);
                return report;
            }
        }

        if let Some(unit) = board.unit_mut(target) {
            unit.hp -= effective;
            if unit.hp > 0.0 {
                return report;
            }
        }

        // Death: clear the cell, then notify the lifecycle manager inside
        // this same call stack
        report.killed = true;
        board.mark_dead(target);
        report.events.push(
            BondEventType::UnitDied { unit_id: target },
            "unit died".into(),
        );
        self.manager
            .on_unit_death(board, target, &self.config, &mut report.events);
        report
    }

    /// External removal (sale, manual bench of a dead slot): unwind any
    /// molecule the unit holds together, then drop it from the board.
    pub fn notify_unit_removed(&mut self, board: &mut Board, unit: UnitId) -> BondEventLog {
        let mut events = BondEventLog::new();
        board.mark_dead(unit);
        self.manager
            .on_unit_death(board, unit, &self.config, &mut events);
        let _ = board.remove_unit(unit);
        events
    }

    fn pool_hit(
        &mut self,
        board: &mut Board,
        id: MoleculeId,
        amount: f32,
        events: &mut BondEventLog,
    ) {
        let outcome = match self.manager.molecule_mut(id) {
            Some(molecule) => mechanics::pool_damage(board, molecule, amount),
            None => return,
        };
        if outcome == PoolDamage::Depleted {
            self.manager
                .break_molecule(board, id, BreakReason::PoolDepleted, &self.config, events);
        }
    }
}
