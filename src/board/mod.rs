//! Hex board: coordinates, per-player topology, adjacency queries

pub mod adjacency;
pub mod hex;
pub mod topology;

pub use hex::{HexCoord, HexDirection};
pub use topology::{Board, Cell, CellKind, BENCH_SIZE};
