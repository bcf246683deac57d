//! Unit entity and its stat mutation surface
//!
//! Units are never deallocated while part of a molecule: merged components
//! are only flagged inactive so they can be restored exactly on break.

use serde::{Deserialize, Serialize};

use crate::board::hex::HexCoord;
use crate::core::types::{MoleculeId, PlayerId, Species, Stats, UnitId};

/// Whether a unit is currently part of a molecule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BondingState {
    #[default]
    Free,
    Bonded(MoleculeId),
}

impl BondingState {
    pub fn is_free(&self) -> bool {
        matches!(self, BondingState::Free)
    }

    pub fn molecule(&self) -> Option<MoleculeId> {
        match self {
            BondingState::Free => None,
            BondingState::Bonded(id) => Some(*id),
        }
    }
}

/// A unit on the board or bench
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub species: Species,
    pub owner: PlayerId,
    pub star_level: u8,

    /// Stats at star level 1; the source of truth for restoration
    pub base: Stats,

    // Current (bond-mutated) stats
    pub max_hp: f32,
    pub hp: f32,
    pub damage: f32,

    // Flat combat modifiers (ionic bonds)
    pub damage_reduction: f32,
    pub damage_reflect: f32,

    // State
    pub bonding: BondingState,
    pub active: bool,
    pub alive: bool,

    /// Board cell, or None while on bench / destroyed
    pub position: Option<HexCoord>,
}

impl Unit {
    pub fn new(species: impl Into<Species>, owner: PlayerId, base: Stats) -> Self {
        let mut unit = Self {
            id: UnitId::new(),
            species: species.into(),
            owner,
            star_level: 1,
            base,
            max_hp: 0.0,
            hp: 0.0,
            damage: 0.0,
            damage_reduction: 0.0,
            damage_reflect: 0.0,
            bonding: BondingState::Free,
            active: true,
            alive: true,
            position: None,
        };
        unit.restore_base_stats(1.0);
        unit
    }

    /// Base hp at the unit's current star level
    pub fn scaled_base_hp(&self, star_multiplier: f32) -> f32 {
        self.base.hp * star_multiplier.powi(self.star_level as i32 - 1)
    }

    /// Base damage at the unit's current star level
    pub fn scaled_base_damage(&self, star_multiplier: f32) -> f32 {
        self.base.damage * star_multiplier.powi(self.star_level as i32 - 1)
    }

    pub fn set_bonding_state(&mut self, state: BondingState) {
        self.bonding = state;
    }

    /// Multiply current max hp and damage in place; hp is rescaled to keep
    /// the same fraction of max.
    pub fn apply_stat_multiplier(&mut self, hp_factor: f32, dmg_factor: f32) {
        let hp_fraction = if self.max_hp > 0.0 {
            self.hp / self.max_hp
        } else {
            1.0
        };
        self.max_hp *= hp_factor;
        self.hp = self.max_hp * hp_fraction;
        self.damage *= dmg_factor;
    }

    /// Recompute current stats from base stats and star level, discarding
    /// every bond effect. Never restores from stored deltas.
    pub fn restore_base_stats(&mut self, star_multiplier: f32) {
        self.max_hp = self.scaled_base_hp(star_multiplier);
        self.hp = self.max_hp;
        self.damage = self.scaled_base_damage(star_multiplier);
        self.damage_reduction = 0.0;
        self.damage_reflect = 0.0;
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Can this unit take part in a bond right now?
    pub fn can_bond(&self) -> bool {
        self.alive && self.active && self.bonding.is_free() && self.position.is_some()
    }

    pub fn is_on_board(&self) -> bool {
        self.position.is_some()
    }
}
