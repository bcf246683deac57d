//! Engine configuration with documented constants
//!
//! All bonding tuning numbers are collected here with explanations of their
//! purpose and how they interact with each other.

use serde::{Deserialize, Serialize};

/// Configuration for the bonding engine
///
/// These values have been tuned to produce readable stat swings in play.
/// Changing them will affect how strongly bonds reshape a round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondConfig {
    // === PARTIAL BONDS ===
    /// Whether incomplete recipes grant a scaled buff to the core
    ///
    /// When false, an incomplete recipe simply does nothing.
    pub partial_bonds_enabled: bool,

    /// Dampening applied to the partial-bond completion ratio
    ///
    /// Core hp/damage scale by `1 + (multiplier - 1) * ratio * partial_scale`.
    /// At 0.5, a 75%-complete recipe grants 37.5% of the full multiplier
    /// bonus. Note: partial buffs re-apply on every incremental trigger and
    /// are not capped; they compound until the next full recompute resets
    /// the core to base stats.
    pub partial_scale: f32,

    // === COVALENT BONDS ===
    /// Fraction of each component's base hp folded into the merged core
    pub covalent_hp_share: f32,

    /// Fraction of each component's base damage folded into the merged core
    ///
    /// Lower than the hp share so merged cores hit harder but not
    /// proportionally to their bulk.
    pub covalent_damage_share: f32,

    // === IONIC BONDS ===
    /// Flat damage reduction granted to every ionic participant (0.30 = 30%)
    pub ionic_damage_reduction: f32,

    /// Flat damage reflection granted to every ionic participant (0.20 = 20%)
    pub ionic_damage_reflect: f32,

    // === STAR LEVELS ===
    /// Per-star multiplier on base hp and damage
    ///
    /// Base stats at star level n are `base * star_multiplier^(n-1)`.
    /// Restoring a unit after a bond breaks recomputes from this, so star-up
    /// during a bond is never lost.
    pub star_multiplier: f32,
}

impl Default for BondConfig {
    fn default() -> Self {
        Self {
            partial_bonds_enabled: true,
            partial_scale: 0.5,
            covalent_hp_share: 0.5,
            covalent_damage_share: 0.3,
            ionic_damage_reduction: 0.30,
            ionic_damage_reflect: 0.20,
            star_multiplier: 2.0,
        }
    }
}
