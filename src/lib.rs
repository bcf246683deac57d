//! Hexbond - Hex-Grid Chemical Bonding Engine

pub mod board;
pub mod bonding;
pub mod catalog;
pub mod core;
