//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub Uuid);

impl UnitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UnitId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for molecules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoleculeId(pub Uuid);

impl MoleculeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MoleculeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier for a player's side of the board
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[display(fmt = "player{}", _0)]
pub struct PlayerId(pub u32);

/// Element species symbol (e.g. "H", "O", "Fe")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Species(pub String);

impl Species {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }
}

impl From<&str> for Species {
    fn from(symbol: &str) -> Self {
        Self(symbol.to_string())
    }
}

/// Base combat statistics for a unit at star level 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: f32,
    pub damage: f32,
    pub range: u32,
}

impl Stats {
    pub fn new(hp: f32, damage: f32, range: u32) -> Self {
        Self { hp, damage, range }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            hp: 100.0,
            damage: 10.0,
            range: 1,
        }
    }
}
