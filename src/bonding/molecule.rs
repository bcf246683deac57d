//! Molecule runtime entity
//!
//! A molecule is created only by the matcher + lifecycle manager, mutated
//! only by bond mechanics and component-death notifications, and broken
//! when its invariants fail or on an external reset.

use serde::{Deserialize, Serialize};

use crate::board::topology::Board;
use crate::catalog::recipe::{BondType, Recipe};
use crate::core::types::{MoleculeId, UnitId};

/// A successfully formed recipe instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Molecule {
    pub id: MoleculeId,
    /// Snapshot of the recipe that formed this molecule; breaking must not
    /// depend on the catalog still containing it.
    pub recipe: Recipe,
    pub core: UnitId,
    /// Component units in assignment order
    pub components: Vec<UnitId>,
    /// Shared hit-point pool (metallic bonds only)
    pub pool: Option<f32>,
    pub broken: bool,
}

impl Molecule {
    pub fn new(recipe: Recipe, core: UnitId, components: Vec<UnitId>) -> Self {
        Self {
            id: MoleculeId::new(),
            recipe,
            core,
            components,
            pool: None,
            broken: false,
        }
    }

    pub fn bond_type(&self) -> BondType {
        self.recipe.bond_type
    }

    /// Core plus components, core first
    pub fn participants(&self) -> Vec<UnitId> {
        let mut all = Vec::with_capacity(self.components.len() + 1);
        all.push(self.core);
        all.extend_from_slice(&self.components);
        all
    }

    /// Do the surviving components still cover the recipe's requirement
    /// counts? Dead or missing units are not counted.
    pub fn requirements_satisfied(&self, board: &Board) -> bool {
        self.recipe.requires.iter().all(|req| {
            let have = self
                .components
                .iter()
                .filter_map(|id| board.unit(*id))
                .filter(|u| u.alive && u.species == req.species)
                .count() as u32;
            have >= req.count
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonding::unit::Unit;
    use crate::board::hex::HexCoord;
    use crate::catalog::recipe::Requirement;
    use crate::core::types::{PlayerId, Stats};

    fn water_recipe() -> Recipe {
        Recipe {
            name: "Water".into(),
            core: "O".into(),
            requires: vec![Requirement {
                species: "H".into(),
                count: 2,
            }],
            bond_type: BondType::Covalent,
            hp_multiplier: 1.5,
            damage_multiplier: 1.2,
        }
    }

    #[test]
    fn test_requirements_satisfied_tracks_deaths() {
        let mut board = Board::new(7, 4);
        let player = PlayerId(0);
        board.add_player(player);

        let o = board
            .spawn_unit(Unit::new("O", player, Stats::default()))
            .unwrap();
        let h1 = board
            .spawn_unit(Unit::new("H", player, Stats::default()))
            .unwrap();
        let h2 = board
            .spawn_unit(Unit::new("H", player, Stats::default()))
            .unwrap();
        board.place_unit(o, HexCoord::new(0, 0)).unwrap();
        board.place_unit(h1, HexCoord::new(1, 0)).unwrap();
        board.place_unit(h2, HexCoord::new(0, 1)).unwrap();

        let molecule = Molecule::new(water_recipe(), o, vec![h1, h2]);
        assert!(molecule.requirements_satisfied(&board));

        board.mark_dead(h1);
        assert!(!molecule.requirements_satisfied(&board));
    }

    #[test]
    fn test_participants_core_first() {
        let recipe = water_recipe();
        let core = UnitId::new();
        let c1 = UnitId::new();
        let molecule = Molecule::new(recipe, core, vec![c1]);
        assert_eq!(molecule.participants(), vec![core, c1]);
    }
}
