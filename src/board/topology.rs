//! Per-player hex grids, bench slots, and the unit table
//!
//! The board is the single owner of every `Unit`. Cells only hold occupancy
//! references; bench slots have no adjacency semantics and never
//! participate in bonding.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::bonding::unit::Unit;
use crate::board::hex::HexCoord;
use crate::core::error::{BondError, Result};
use crate::core::types::{PlayerId, UnitId};

/// Default number of bench slots per player
pub const BENCH_SIZE: usize = 8;

/// Whether a cell sits on the battle grid or on the bench
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Board,
    Bench,
}

/// A single cell: a grid hex or a bench slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub coord: HexCoord,
    pub owner: PlayerId,
    pub kind: CellKind,
    pub occupant: Option<UnitId>,
}

impl Cell {
    pub fn new(coord: HexCoord, owner: PlayerId, kind: CellKind) -> Self {
        Self {
            coord,
            owner,
            kind,
            occupant: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// The full board: one hex grid and one bench per player, plus all units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub width: u32,
    pub height: u32,
    grids: AHashMap<PlayerId, AHashMap<HexCoord, Cell>>,
    benches: AHashMap<PlayerId, Vec<Cell>>,
    units: AHashMap<UnitId, Unit>,
}

impl Board {
    /// Create an empty board; sides are added with `add_player`
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            grids: AHashMap::new(),
            benches: AHashMap::new(),
            units: AHashMap::new(),
        }
    }

    /// Create this player's grid and bench if they do not exist yet
    pub fn add_player(&mut self, owner: PlayerId) {
        self.grids.entry(owner).or_insert_with(|| {
            let mut cells = AHashMap::new();
            for q in 0..self.width as i32 {
                for r in 0..self.height as i32 {
                    let coord = HexCoord::new(q, r);
                    cells.insert(coord, Cell::new(coord, owner, CellKind::Board));
                }
            }
            cells
        });
        self.benches.entry(owner).or_insert_with(|| {
            // Bench coords are labels only; bench slots never join the grid
            (0..BENCH_SIZE)
                .map(|i| Cell::new(HexCoord::new(i as i32, -1), owner, CellKind::Bench))
                .collect()
        });
    }

    /// Players with a grid, in sorted order for deterministic iteration
    pub fn players(&self) -> Vec<PlayerId> {
        let mut ids: Vec<PlayerId> = self.grids.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn in_bounds(&self, coord: HexCoord) -> bool {
        coord.q >= 0
            && coord.r >= 0
            && coord.q < self.width as i32
            && coord.r < self.height as i32
    }

    pub fn cell(&self, owner: PlayerId, coord: HexCoord) -> Option<&Cell> {
        self.grids.get(&owner).and_then(|g| g.get(&coord))
    }

    pub fn cell_mut(&mut self, owner: PlayerId, coord: HexCoord) -> Option<&mut Cell> {
        self.grids.get_mut(&owner).and_then(|g| g.get_mut(&coord))
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    /// Register a fresh unit on its owner's bench
    pub fn spawn_unit(&mut self, unit: Unit) -> Result<UnitId> {
        let id = unit.id;
        let owner = unit.owner;
        self.add_player(owner);
        let bench = self.benches.get_mut(&owner).expect("bench just created");
        let slot = bench
            .iter_mut()
            .find(|c| c.is_empty())
            .ok_or(BondError::BenchFull(owner))?;
        slot.occupant = Some(id);
        self.units.insert(id, unit);
        Ok(id)
    }

    /// Move a unit from wherever it is onto a grid cell
    pub fn place_unit(&mut self, id: UnitId, coord: HexCoord) -> Result<()> {
        let owner = self.units.get(&id).ok_or(BondError::UnitNotFound(id))?.owner;
        match self.cell(owner, coord) {
            None => return Err(BondError::CellNotFound(coord, owner)),
            Some(cell) if !cell.is_empty() => return Err(BondError::CellOccupied(coord)),
            Some(_) => {}
        }
        self.vacate(id);
        if let Some(cell) = self.cell_mut(owner, coord) {
            cell.occupant = Some(id);
        }
        if let Some(unit) = self.units.get_mut(&id) {
            unit.position = Some(coord);
        }
        Ok(())
    }

    /// Move a unit from the grid back to its owner's bench
    pub fn move_to_bench(&mut self, id: UnitId) -> Result<()> {
        let owner = self.units.get(&id).ok_or(BondError::UnitNotFound(id))?.owner;
        let bench = self
            .benches
            .get_mut(&owner)
            .ok_or(BondError::UnitNotFound(id))?;
        if !bench.iter().any(|c| c.is_empty()) {
            return Err(BondError::BenchFull(owner));
        }
        self.vacate(id);
        let bench = self.benches.get_mut(&owner).expect("bench exists");
        if let Some(slot) = bench.iter_mut().find(|c| c.is_empty()) {
            slot.occupant = Some(id);
        }
        if let Some(unit) = self.units.get_mut(&id) {
            unit.position = None;
        }
        Ok(())
    }

    /// Remove a unit entirely (sale or permanent death)
    pub fn remove_unit(&mut self, id: UnitId) -> Result<Unit> {
        self.vacate(id);
        self.units.remove(&id).ok_or(BondError::UnitNotFound(id))
    }

    /// Mark a unit dead and clear its cell; the entity stays in the table
    /// so molecules can be unwound against it.
    pub fn mark_dead(&mut self, id: UnitId) {
        self.vacate(id);
        if let Some(unit) = self.units.get_mut(&id) {
            unit.alive = false;
            unit.position = None;
        }
    }

    /// Clear any cell or bench slot currently referencing this unit
    fn vacate(&mut self, id: UnitId) {
        for grid in self.grids.values_mut() {
            for cell in grid.values_mut() {
                if cell.occupant == Some(id) {
                    cell.occupant = None;
                }
            }
        }
        for bench in self.benches.values_mut() {
            for slot in bench.iter_mut() {
                if slot.occupant == Some(id) {
                    slot.occupant = None;
                }
            }
        }
    }

    /// Units currently on this player's bench
    pub fn bench_units(&self, owner: PlayerId) -> Vec<UnitId> {
        self.benches
            .get(&owner)
            .map(|b| b.iter().filter_map(|c| c.occupant).collect())
            .unwrap_or_default()
    }

    /// All living board units for this player, in row-major (r, then q)
    /// scan order. The matcher depends on this order being stable.
    pub fn units_in_scan_order(&self, owner: PlayerId) -> Vec<UnitId> {
        let Some(grid) = self.grids.get(&owner) else {
            return Vec::new();
        };
        let mut coords: Vec<HexCoord> = grid
            .values()
            .filter(|c| c.occupant.is_some())
            .map(|c| c.coord)
            .collect();
        coords.sort_by_key(|c| (c.r, c.q));
        coords
            .into_iter()
            .filter_map(|c| grid.get(&c).and_then(|cell| cell.occupant))
            .filter(|id| self.units.get(id).map(|u| u.alive).unwrap_or(false))
            .collect()
    }

    /// All living units for this player, board and bench
    pub fn all_units(&self, owner: PlayerId) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = self
            .units
            .values()
            .filter(|u| u.owner == owner && u.alive)
            .collect();
        units.sort_by_key(|u| u.id.0);
        units
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Stats;

    fn board_with_player() -> (Board, PlayerId) {
        let mut board = Board::new(7, 4);
        let player = PlayerId(0);
        board.add_player(player);
        (board, player)
    }

    #[test]
    fn test_board_creation() {
        let (board, player) = board_with_player();
        assert!(board.cell(player, HexCoord::new(0, 0)).is_some());
        assert!(board.cell(player, HexCoord::new(6, 3)).is_some());
        assert!(board.cell(player, HexCoord::new(7, 0)).is_none());
    }

    #[test]
    fn test_spawn_lands_on_bench() {
        let (mut board, player) = board_with_player();
        let id = board
            .spawn_unit(Unit::new("H", player, Stats::default()))
            .unwrap();
        assert_eq!(board.bench_units(player), vec![id]);
        assert!(board.unit(id).unwrap().position.is_none());
    }

    #[test]
    fn test_place_and_move_back() {
        let (mut board, player) = board_with_player();
        let id = board
            .spawn_unit(Unit::new("H", player, Stats::default()))
            .unwrap();
        board.place_unit(id, HexCoord::new(2, 1)).unwrap();
        assert_eq!(board.unit(id).unwrap().position, Some(HexCoord::new(2, 1)));
        assert!(board.bench_units(player).is_empty());

        board.move_to_bench(id).unwrap();
        assert!(board.unit(id).unwrap().position.is_none());
        assert!(board
            .cell(player, HexCoord::new(2, 1))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_place_on_occupied_cell_fails() {
        let (mut board, player) = board_with_player();
        let a = board
            .spawn_unit(Unit::new("H", player, Stats::default()))
            .unwrap();
        let b = board
            .spawn_unit(Unit::new("O", player, Stats::default()))
            .unwrap();
        board.place_unit(a, HexCoord::new(0, 0)).unwrap();
        assert!(matches!(
            board.place_unit(b, HexCoord::new(0, 0)),
            Err(BondError::CellOccupied(_))
        ));
    }

    #[test]
    fn test_scan_order_row_major() {
        let (mut board, player) = board_with_player();
        let a = board
            .spawn_unit(Unit::new("H", player, Stats::default()))
            .unwrap();
        let b = board
            .spawn_unit(Unit::new("O", player, Stats::default()))
            .unwrap();
        let c = board
            .spawn_unit(Unit::new("C", player, Stats::default()))
            .unwrap();
        board.place_unit(a, HexCoord::new(3, 1)).unwrap();
        board.place_unit(b, HexCoord::new(0, 1)).unwrap();
        board.place_unit(c, HexCoord::new(5, 0)).unwrap();
        assert_eq!(board.units_in_scan_order(player), vec![c, b, a]);
    }

    #[test]
    fn test_mark_dead_clears_cell() {
        let (mut board, player) = board_with_player();
        let id = board
            .spawn_unit(Unit::new("H", player, Stats::default()))
            .unwrap();
        board.place_unit(id, HexCoord::new(1, 1)).unwrap();
        board.mark_dead(id);
        assert!(board.cell(player, HexCoord::new(1, 1)).unwrap().is_empty());
        assert!(!board.unit(id).unwrap().alive);
    }
}
