use thiserror::Error;

#[derive(Error, Debug)]
pub enum BondError {
    #[error("Unit not found: {0:?}")]
    UnitNotFound(crate::core::types::UnitId),

    #[error("Molecule not found: {0:?}")]
    MoleculeNotFound(crate::core::types::MoleculeId),

    #[error("No cell at {0:?} for {1}")]
    CellNotFound(crate::board::hex::HexCoord, crate::core::types::PlayerId),

    #[error("Cell at {0:?} is already occupied")]
    CellOccupied(crate::board::hex::HexCoord),

    #[error("Bench is full for {0}")]
    BenchFull(crate::core::types::PlayerId),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, BondError>;
