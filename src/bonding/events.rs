//! Bond event log
//!
//! Every engine operation returns a log of what happened, for any
//! interested subscriber (UI highlighting, audio, replay).

use serde::{Deserialize, Serialize};

use crate::core::types::{MoleculeId, UnitId};

/// Why a molecule was broken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakReason {
    CoreDeath,
    RequirementLost,
    PoolDepleted,
    Reset,
    Manual,
}

/// Log entry for bonding events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondEvent {
    pub event_type: BondEventType,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BondEventType {
    MoleculeFormed {
        molecule_id: MoleculeId,
        recipe: String,
    },
    MoleculeBroken {
        molecule_id: MoleculeId,
        recipe: String,
        reason: BreakReason,
    },
    PartialBond {
        unit_id: UnitId,
        recipe: String,
        ratio: f32,
    },
    UnitDied {
        unit_id: UnitId,
    },
}

/// Log of events from a single engine operation
#[derive(Debug, Clone, Default)]
pub struct BondEventLog {
    pub events: Vec<BondEvent>,
}

impl BondEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event_type: BondEventType, description: String) {
        self.events.push(BondEvent {
            event_type,
            description,
        });
    }

    pub fn extend(&mut self, other: BondEventLog) {
        self.events.extend(other.events);
    }

    pub fn formed(&self) -> Vec<MoleculeId> {
        self.events
            .iter()
            .filter_map(|e| match e.event_type {
                BondEventType::MoleculeFormed { molecule_id, .. } => Some(molecule_id),
                _ => None,
            })
            .collect()
    }

    pub fn broken(&self) -> Vec<MoleculeId> {
        self.events
            .iter()
            .filter_map(|e| match e.event_type {
                BondEventType::MoleculeBroken { molecule_id, .. } => Some(molecule_id),
                _ => None,
            })
            .collect()
    }
}
