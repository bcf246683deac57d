//! Read-only neighbor and range queries over the board
//!
//! Bench slots are invisible to every query here: adjacency exists only on
//! the grid. Nothing in this module mutates topology.

use crate::bonding::unit::Unit;
use crate::board::hex::HexCoord;
use crate::board::topology::Board;
use crate::core::types::{PlayerId, UnitId};

impl Board {
    /// Occupied neighboring cells of a coordinate, in fixed direction order
    pub fn neighbor_units(&self, owner: PlayerId, coord: HexCoord) -> Vec<&Unit> {
        coord
            .neighbors()
            .iter()
            .filter_map(|c| self.cell(owner, *c))
            .filter_map(|cell| cell.occupant)
            .filter_map(|id| self.unit(id))
            .filter(|u| u.alive)
            .collect()
    }

    /// Ids of occupied neighboring cells, in fixed direction order
    pub fn neighbor_ids(&self, owner: PlayerId, coord: HexCoord) -> Vec<UnitId> {
        self.neighbor_units(owner, coord).iter().map(|u| u.id).collect()
    }

    /// Neighbors of a unit's current cell; empty for benched units
    pub fn neighbors_of(&self, unit: UnitId) -> Vec<&Unit> {
        match self.unit(unit) {
            Some(u) => match u.position {
                Some(coord) => self.neighbor_units(u.owner, coord),
                None => Vec::new(),
            },
            None => Vec::new(),
        }
    }

    /// All living units within hex distance `radius` of a coordinate on the
    /// same side, optionally including the center cell's occupant
    pub fn units_in_range(
        &self,
        owner: PlayerId,
        coord: HexCoord,
        radius: u32,
        include_center: bool,
    ) -> Vec<&Unit> {
        coord
            .hexes_in_range(radius)
            .into_iter()
            .filter(|c| include_center || *c != coord)
            .filter_map(|c| self.cell(owner, c))
            .filter_map(|cell| cell.occupant)
            .filter_map(|id| self.unit(id))
            .filter(|u| u.alive)
            .collect()
    }

    /// Hex distance between two coordinates
    pub fn distance(&self, a: HexCoord, b: HexCoord) -> u32 {
        a.distance(&b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonding::unit::Unit;
    use crate::core::types::Stats;

    fn setup() -> (Board, PlayerId) {
        let mut board = Board::new(7, 4);
        let player = PlayerId(0);
        board.add_player(player);
        (board, player)
    }

    fn place(board: &mut Board, player: PlayerId, species: &str, q: i32, r: i32) -> UnitId {
        let id = board
            .spawn_unit(Unit::new(species, player, Stats::default()))
            .unwrap();
        board.place_unit(id, HexCoord::new(q, r)).unwrap();
        id
    }

    #[test]
    fn test_neighbors_only_occupied() {
        let (mut board, player) = setup();
        place(&mut board, player, "O", 1, 1);
        let h = place(&mut board, player, "H", 2, 1);
        place(&mut board, player, "H", 1, 2);

        let neighbors = board.neighbor_ids(player, HexCoord::new(1, 1));
        assert_eq!(neighbors.len(), 2);
        assert!(neighbors.contains(&h));
    }

    #[test]
    fn test_neighbors_ignore_bench() {
        let (mut board, player) = setup();
        place(&mut board, player, "O", 0, 0);
        // Benched unit sits in no grid cell
        board
            .spawn_unit(Unit::new("H", player, Stats::default()))
            .unwrap();

        assert!(board.neighbor_ids(player, HexCoord::new(0, 0)).is_empty());
    }

    #[test]
    fn test_units_in_range_center_flag() {
        let (mut board, player) = setup();
        let center = place(&mut board, player, "Fe", 2, 1);
        place(&mut board, player, "Fe", 3, 1);
        place(&mut board, player, "Fe", 4, 1); // distance 2

        let without = board.units_in_range(player, HexCoord::new(2, 1), 2, false);
        assert_eq!(without.len(), 2);
        let with = board.units_in_range(player, HexCoord::new(2, 1), 2, true);
        assert_eq!(with.len(), 3);
        assert!(with.iter().any(|u| u.id == center));
    }

    #[test]
    fn test_neighbors_of_unit() {
        let (mut board, player) = setup();
        let o = place(&mut board, player, "O", 1, 1);
        let h = place(&mut board, player, "H", 2, 1);
        let found = board.neighbors_of(o);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, h);

        let benched = board
            .spawn_unit(Unit::new("H", player, Stats::default()))
            .unwrap();
        assert!(board.neighbors_of(benched).is_empty());
    }

    #[test]
    fn test_queries_do_not_cross_sides() {
        let (mut board, player) = setup();
        let enemy = PlayerId(1);
        board.add_player(enemy);
        place(&mut board, player, "O", 1, 1);
        let e = board
            .spawn_unit(Unit::new("H", enemy, Stats::default()))
            .unwrap();
        board.place_unit(e, HexCoord::new(2, 1)).unwrap();

        assert!(board.neighbor_ids(player, HexCoord::new(1, 1)).is_empty());
    }
}
