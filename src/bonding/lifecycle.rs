//! Molecule lifecycle: formation, death handling, breaking
//!
//! The death watch is an explicit registry acquired at formation and
//! released on every break path, including the idempotent "already broken"
//! one. Death notifications arrive synchronously from the damage call
//! stack, so every traversal here works on a snapshot.

use ahash::AHashMap;

use crate::board::topology::Board;
use crate::bonding::events::{BondEventLog, BondEventType, BreakReason};
use crate::bonding::mechanics;
use crate::bonding::molecule::Molecule;
use crate::bonding::unit::BondingState;
use crate::catalog::recipe::Recipe;
use crate::core::config::BondConfig;
use crate::core::types::{MoleculeId, UnitId};

/// Owns every active molecule and the per-unit death watch
#[derive(Debug, Clone, Default)]
pub struct MoleculeManager {
    molecules: AHashMap<MoleculeId, Molecule>,
    death_watch: AHashMap<UnitId, MoleculeId>,
    /// Formation order; break_all unwinds in this order
    formed_order: Vec<MoleculeId>,
}

impl MoleculeManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn molecule(&self, id: MoleculeId) -> Option<&Molecule> {
        self.molecules.get(&id)
    }

    /// Mutable access for bond mechanics (pool updates)
    pub fn molecule_mut(&mut self, id: MoleculeId) -> Option<&mut Molecule> {
        self.molecules.get_mut(&id)
    }

    /// The molecule currently watching this unit, if any
    pub fn molecule_of(&self, unit: UnitId) -> Option<MoleculeId> {
        self.death_watch.get(&unit).copied()
    }

    /// Active molecule ids in formation order
    pub fn active(&self) -> Vec<MoleculeId> {
        self.formed_order.clone()
    }

    pub fn len(&self) -> usize {
        self.molecules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.molecules.is_empty()
    }

    /// Stable description of the current unit partition, in formation
    /// order: (recipe name, core, components).
    pub fn partition(&self) -> Vec<(String, UnitId, Vec<UnitId>)> {
        self.formed_order
            .iter()
            .filter_map(|id| self.molecules.get(id))
            .map(|m| (m.recipe.name.clone(), m.core, m.components.clone()))
            .collect()
    }

    /// Form a molecule: mark every participant bonded, register the death
    /// watch, apply the bond mechanics, emit MoleculeFormed.
    pub fn form_molecule(
        &mut self,
        board: &mut Board,
        recipe: &Recipe,
        core: UnitId,
        components: Vec<UnitId>,
        config: &BondConfig,
        events: &mut BondEventLog,
    ) -> MoleculeId {
        let mut molecule = Molecule::new(recipe.clone(), core, components);
        let id = molecule.id;

        for participant in molecule.participants() {
            if let Some(unit) = board.unit_mut(participant) {
                unit.set_bonding_state(BondingState::Bonded(id));
            }
            self.death_watch.insert(participant, id);
        }

        mechanics::apply_bond(board, &mut molecule, config);

        tracing::debug!(
            recipe = %recipe.name,
            core = ?core,
            components = molecule.components.len(),
            "molecule formed"
        );
        events.push(
            BondEventType::MoleculeFormed {
                molecule_id: id,
                recipe: recipe.name.clone(),
            },
            format!("{} formed ({:?} bond)", recipe.name, recipe.bond_type),
        );

        self.formed_order.push(id);
        self.molecules.insert(id, molecule);
        id
    }

    /// Break a molecule. Idempotent: unknown or already-broken ids are a
    /// no-op. Reverts stats, frees survivors, and releases the death watch
    /// on every exit path.
    pub fn break_molecule(
        &mut self,
        board: &mut Board,
        id: MoleculeId,
        reason: BreakReason,
        config: &BondConfig,
        events: &mut BondEventLog,
    ) {
        let Some(mut molecule) = self.molecules.remove(&id) else {
            return;
        };
        if molecule.broken {
            self.death_watch.retain(|_, m| *m != id);
            return;
        }
        molecule.broken = true;

        self.death_watch.retain(|_, m| *m != id);
        self.formed_order.retain(|m| *m != id);

        mechanics::revert_bond(board, &mut molecule, config);
        for participant in molecule.participants() {
            if let Some(unit) = board.unit_mut(participant) {
                if unit.alive {
                    unit.set_bonding_state(BondingState::Free);
                }
            }
        }

        tracing::debug!(recipe = %molecule.recipe.name, ?reason, "molecule broken");
        events.push(
            BondEventType::MoleculeBroken {
                molecule_id: id,
                recipe: molecule.recipe.name.clone(),
                reason,
            },
            format!("{} broken ({:?})", molecule.recipe.name, reason),
        );
    }

    /// Break every active molecule (combat-phase boundary, round reset)
    pub fn break_all(&mut self, board: &mut Board, config: &BondConfig, events: &mut BondEventLog) {
        // Snapshot first: break_molecule mutates formed_order
        let active = self.formed_order.clone();
        for id in active {
            self.break_molecule(board, id, BreakReason::Reset, config, events);
        }
    }

    /// Notification that a unit has died or left the board. Removes it
    /// from its molecule; breaks the molecule if the core is gone or the
    /// requirement counts no longer hold.
    pub fn on_unit_death(
        &mut self,
        board: &mut Board,
        unit: UnitId,
        config: &BondConfig,
        events: &mut BondEventLog,
    ) {
        let Some(id) = self.death_watch.remove(&unit) else {
            return;
        };

        let must_break = {
            let Some(molecule) = self.molecules.get_mut(&id) else {
                return;
            };
            if molecule.core == unit {
                Some(BreakReason::CoreDeath)
            } else {
                molecule.components.retain(|c| *c != unit);
                if molecule.requirements_satisfied(board) {
                    None
                } else {
                    Some(BreakReason::RequirementLost)
                }
            }
        };

        if let Some(reason) = must_break {
            self.break_molecule(board, id, reason, config, events);
        }
    }
}
