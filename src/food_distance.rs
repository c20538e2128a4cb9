// Nearest-food distance annotation

use crate::grid::Grid;
use crate::types::Coord;

/// Annotates every cell with its Manhattan distance to the nearest food
pub struct FoodDistanceField;

impl FoodDistanceField {
    /// Writes the nearest-food distance into each cell of `grid`
    ///
    /// Without food every cell gets width+height, which exceeds any in-board
    /// distance. Cost is O(cells * food).
    pub fn compute(grid: &mut Grid, food: &[Coord]) {
        let no_food_distance = grid.width() + grid.height();

        let distances: Vec<(Coord, i32)> = grid
            .cells()
            .map(|cell| {
                let coord = cell.coord();
                let nearest = food
                    .iter()
                    .map(|item| coord.manhattan_distance(item))
                    .min()
                    .unwrap_or(no_food_distance);
                (coord, nearest)
            })
            .collect();

        for (coord, distance) in distances {
            grid.set_distance_to_food(&coord, distance);
        }
    }
}
