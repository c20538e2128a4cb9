// Grid model for a single turn
//
// The board snapshot is turned into an owned, coordinate-indexed collection of
// cells. Adjacency is never stored: neighbors are resolved on demand by
// coordinate arithmetic plus a bounds check, so cells hold no references to
// each other.

use std::collections::HashSet;

use crate::error::{DecisionError, DecisionResult};
use crate::types::{Battlesnake, Board, Coord, Direction};

/// Type tag of a cell, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    Empty,
    Food,
    Occupied,
    /// Our own tail segment, which vacates before the head can arrive
    OwnTail,
}

/// One board square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    coord: Coord,
    cell_type: CellType,
    snake_body: bool,
    distance_to_food: i32,
    region_size: Option<usize>,
}

impl Cell {
    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// True for any square covered by a body segment, including our tail
    pub fn is_snake_body(&self) -> bool {
        self.snake_body
    }

    pub fn is_own_tail(&self) -> bool {
        self.cell_type == CellType::OwnTail
    }

    /// A cell can be stepped on unless it is tagged Occupied
    pub fn is_open(&self) -> bool {
        self.cell_type != CellType::Occupied
    }

    /// Manhattan distance to the closest food, or width+height without food
    pub fn distance_to_food(&self) -> i32 {
        self.distance_to_food
    }

    /// Region size recorded for this cell during the current decision, if any
    pub fn region_size(&self) -> Option<usize> {
        self.region_size
    }
}

/// All cells of one board snapshot, stored row-major
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds the grid for a snapshot
    ///
    /// Occupancy and food membership are resolved through hash sets built once
    /// per call, keeping construction at O(width * height + total body length).
    ///
    /// # Errors
    /// `DecisionError::InvalidBoard` if either dimension is not positive, or
    /// if the cell count or `width + height` does not fit in an `i32`
    pub fn build(board: &Board, you: &Battlesnake) -> DecisionResult<Grid> {
        let invalid = || DecisionError::InvalidBoard {
            width: board.width,
            height: board.height,
        };
        if board.width <= 0 || board.height <= 0 {
            return Err(invalid());
        }
        let cell_count = board.width.checked_mul(board.height).ok_or_else(invalid)?;
        let no_food_distance = board.width.checked_add(board.height).ok_or_else(invalid)?;

        let occupied: HashSet<Coord> = board
            .snakes
            .iter()
            .flat_map(|snake| snake.body.iter())
            .chain(you.body.iter())
            .copied()
            .collect();
        let food: HashSet<Coord> = board.food.iter().copied().collect();
        let own_tail = Self::vacating_tail(board, you);

        let mut cells = Vec::with_capacity(cell_count as usize);
        for y in 0..board.height {
            for x in 0..board.width {
                let coord = Coord { x, y };
                let snake_body = occupied.contains(&coord);
                let cell_type = if own_tail == Some(coord) {
                    CellType::OwnTail
                } else if snake_body {
                    CellType::Occupied
                } else if food.contains(&coord) {
                    CellType::Food
                } else {
                    CellType::Empty
                };

                cells.push(Cell {
                    coord,
                    cell_type,
                    snake_body,
                    distance_to_food: no_food_distance,
                    region_size: None,
                });
            }
        }

        Ok(Grid {
            width: board.width,
            height: board.height,
            cells,
        })
    }

    /// Our tail coordinate, if it will be free by the time the head moves
    ///
    /// A tail stacked on another of our own segments (just ate, or game start)
    /// stays put, and a square shared with another snake's body stays blocked.
    fn vacating_tail(board: &Board, you: &Battlesnake) -> Option<Coord> {
        let (tail, rest) = you.body.split_last()?;
        if rest.contains(tail) {
            return None;
        }

        let under_other_snake = board
            .snakes
            .iter()
            .filter(|snake| snake.id != you.id)
            .any(|snake| snake.body.contains(tail));

        if under_other_snake {
            None
        } else {
            Some(*tail)
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, coord: &Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width && coord.y < self.height
    }

    fn index(&self, coord: &Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some((coord.y * self.width + coord.x) as usize)
        } else {
            None
        }
    }

    /// Looks up the cell at a coordinate, `None` when off-board
    pub fn cell(&self, coord: &Coord) -> Option<&Cell> {
        self.index(coord).map(|idx| &self.cells[idx])
    }

    /// Resolves the neighbor of `coord` in `direction`, `None` when off-board
    pub fn neighbor(&self, coord: &Coord, direction: Direction) -> Option<&Cell> {
        self.cell(&direction.apply(coord))
    }

    /// On-board neighbors of `coord` in priority order
    pub fn neighbors(&self, coord: &Coord) -> Vec<(Direction, &Cell)> {
        Direction::all()
            .iter()
            .filter_map(|&dir| self.neighbor(coord, dir).map(|cell| (dir, cell)))
            .collect()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn set_distance_to_food(&mut self, coord: &Coord, distance: i32) {
        if let Some(idx) = self.index(coord) {
            self.cells[idx].distance_to_food = distance;
        }
    }

    /// Stores a region size in the per-decision scratch field
    pub fn record_region_size(&mut self, coord: &Coord, size: usize) {
        if let Some(idx) = self.index(coord) {
            self.cells[idx].region_size = Some(size);
        }
    }
}
