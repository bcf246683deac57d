//! Recipe catalog: externally authored, loaded once, immutable

pub mod recipe;

pub use recipe::{BondType, Recipe, RecipeCatalog, Requirement};
