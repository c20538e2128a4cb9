// Open-space reachability
//
// Breadth-first flood fill with an explicit queue and a visited set keyed by
// coordinate. Every cell enters the queue at most once, so a fill is bounded by
// O(width * height) steps regardless of the board layout.

use std::collections::{HashSet, VecDeque};

use crate::grid::Grid;
use crate::types::{Coord, Direction};

/// Measures the open region reachable from a cell
pub struct ConnectivityAnalyzer;

impl ConnectivityAnalyzer {
    /// Number of distinct open cells reachable by stepping through open neighbors of `start`
    ///
    /// `start` itself does not need to be open. It is counted only when an open
    /// neighbor leads back into it, never as a seed.
    pub fn region_size(grid: &Grid, start: &Coord) -> usize {
        Self::region_size_visiting(grid, start, &Direction::all())
    }

    /// Same as [`region_size`](Self::region_size) with an explicit neighbor visiting order
    ///
    /// `order` must be a permutation of the four directions; the count does not
    /// depend on which one.
    pub fn region_size_visiting(grid: &Grid, start: &Coord, order: &[Direction; 4]) -> usize {
        debug_assert!(Direction::all().iter().all(|dir| order.contains(dir)));

        let mut visited: HashSet<Coord> = HashSet::new();
        let mut frontier: VecDeque<Coord> = VecDeque::new();

        Self::push_open_neighbors(grid, start, order, &mut visited, &mut frontier);
        while let Some(coord) = frontier.pop_front() {
            Self::push_open_neighbors(grid, &coord, order, &mut visited, &mut frontier);
        }

        visited.len()
    }

    fn push_open_neighbors(
        grid: &Grid,
        coord: &Coord,
        order: &[Direction; 4],
        visited: &mut HashSet<Coord>,
        frontier: &mut VecDeque<Coord>,
    ) {
        for &dir in order {
            // Off-board neighbors resolve to None and are skipped
            if let Some(next) = grid.neighbor(coord, dir) {
                if next.is_open() && visited.insert(next.coord()) {
                    frontier.push_back(next.coord());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Battlesnake, Board};

    fn grid_with_walls(width: i32, height: i32, walls: &[(i32, i32)]) -> Grid {
        let wall = Battlesnake {
            id: "wall".to_string(),
            name: "wall".to_string(),
            health: 100,
            body: walls.iter().map(|&(x, y)| Coord { x, y }).collect(),
            head: Coord::default(),
            length: walls.len() as i32,
            latency: "0".to_string(),
            shout: None,
        };
        let me = Battlesnake {
            id: "me".to_string(),
            body: vec![],
            ..wall.clone()
        };
        let board = Board {
            width,
            height,
            food: vec![],
            snakes: vec![wall],
            hazards: vec![],
        };
        Grid::build(&board, &me).unwrap()
    }

    #[test]
    fn test_open_board_counts_every_cell() {
        let grid = grid_with_walls(5, 5, &[]);
        assert_eq!(ConnectivityAnalyzer::region_size(&grid, &Coord::new(2, 2)), 25);
    }

    #[test]
    fn test_wall_splits_board() {
        // Vertical wall at x=2 separates a 2-wide left side from a 2-wide right side
        let grid = grid_with_walls(5, 3, &[(2, 0), (2, 1), (2, 2)]);

        assert_eq!(ConnectivityAnalyzer::region_size(&grid, &Coord::new(0, 1)), 6);
        assert_eq!(ConnectivityAnalyzer::region_size(&grid, &Coord::new(4, 1)), 6);
    }

    #[test]
    fn test_occupied_start_counts_only_neighbors_region() {
        // Start sits in the wall; it touches both halves but is never counted itself
        let grid = grid_with_walls(5, 3, &[(2, 0), (2, 1), (2, 2)]);

        assert_eq!(ConnectivityAnalyzer::region_size(&grid, &Coord::new(2, 1)), 12);
    }

    #[test]
    fn test_enclosed_pocket() {
        // (0,0) is boxed in by (1,0) and (0,1)
        let grid = grid_with_walls(4, 4, &[(1, 0), (0, 1)]);

        assert_eq!(ConnectivityAnalyzer::region_size(&grid, &Coord::new(0, 0)), 0);
        assert_eq!(ConnectivityAnalyzer::region_size(&grid, &Coord::new(3, 3)), 13);
    }

    #[test]
    fn test_visiting_order_does_not_change_count() {
        let grid = grid_with_walls(6, 6, &[(1, 1), (2, 1), (3, 1), (3, 2), (3, 3), (1, 4)]);
        let orders = [
            [Direction::Up, Direction::Down, Direction::Left, Direction::Right],
            [Direction::Right, Direction::Left, Direction::Down, Direction::Up],
            [Direction::Left, Direction::Up, Direction::Right, Direction::Down],
        ];

        for cell in grid.cells() {
            let expected = ConnectivityAnalyzer::region_size(&grid, &cell.coord());
            for order in orders.iter() {
                assert_eq!(
                    ConnectivityAnalyzer::region_size_visiting(&grid, &cell.coord(), order),
                    expected
                );
            }
        }
    }
}
