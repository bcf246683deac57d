//! Bonding recipes and the immutable recipe catalog
//!
//! Recipes arrive as external data (TOML or JSON) and are loaded once at
//! startup. Catalog declaration order is load-bearing: the matcher gives
//! earlier recipes priority over contested units.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::Species;

/// The three bond strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BondType {
    /// Merge: components fold into the core and go inactive
    Covalent,
    /// Mutual buff: every participant stays independent
    Ionic,
    /// Shared pool: participants pool their hit points
    Metallic,
}

/// One required species and how many of it the recipe needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub species: Species,
    pub count: u32,
}

/// An immutable bonding recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub core: Species,
    /// Requirement multiset, in declared order
    pub requires: Vec<Requirement>,
    pub bond_type: BondType,
    /// Core hp multiplier (covalent merge; partial-bond hp basis)
    #[serde(default = "default_multiplier")]
    pub hp_multiplier: f32,
    /// Core damage multiplier (covalent merge; partial-bond damage basis)
    #[serde(default = "default_multiplier")]
    pub damage_multiplier: f32,
}

fn default_multiplier() -> f32 {
    1.0
}

impl Recipe {
    /// Total number of component units the recipe needs
    pub fn total_required(&self) -> u32 {
        self.requires.iter().map(|r| r.count).sum()
    }

    /// Structurally usable: catalog validation proper is external, but a
    /// recipe that can never match is skipped rather than trusted.
    pub fn is_well_formed(&self) -> bool {
        !self.core.0.is_empty()
            && !self.requires.is_empty()
            && self.requires.iter().all(|r| r.count > 0)
            && self.requires.iter().all(|r| r.species != self.core)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    recipe: Vec<Recipe>,
}

/// Ordered, immutable list of recipes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    /// Build from an already-ordered recipe list, dropping malformed
    /// entries with a warning. Full catalog validation is an external
    /// responsibility; this only refuses entries that can never match.
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let recipes = recipes
            .into_iter()
            .filter(|r| {
                if r.is_well_formed() {
                    true
                } else {
                    tracing::warn!(recipe = %r.name, "skipping malformed recipe");
                    false
                }
            })
            .collect();
        Self { recipes }
    }

    /// Parse a TOML catalog with `[[recipe]]` tables
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(input)?;
        Ok(Self::new(file.recipe))
    }

    /// Parse a JSON array of recipes
    pub fn from_json_str(input: &str) -> Result<Self> {
        let recipes: Vec<Recipe> = serde_json::from_str(input)?;
        Ok(Self::new(recipes))
    }

    /// Load a catalog file, dispatching on extension (`.json` vs TOML)
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            Self::from_json_str(&text)
        } else {
            Self::from_toml_str(&text)
        }
    }

    /// Recipes in declaration (priority) order
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.name == name)
    }
}
