//! Bonding engine: units, molecules, matching, lifecycle, mechanics
//!
//! The signature mechanic: units placed on the hex grid merge into
//! molecules when the right species sit adjacent to each other. Three
//! bond strategies transform stats on formation and revert them on break.

pub mod engine;
pub mod events;
pub mod lifecycle;
pub mod matcher;
pub mod mechanics;
pub mod molecule;
pub mod unit;

// Re-exports for convenient access
pub use engine::{BondEngine, DamageReport};
pub use events::{BondEvent, BondEventLog, BondEventType, BreakReason};
pub use lifecycle::MoleculeManager;
pub use matcher::{match_all, match_for_unit};
pub use mechanics::{apply_bond, apply_partial_buff, pool_damage, revert_bond, PoolDamage};
pub use molecule::Molecule;
pub use unit::{BondingState, Unit};
