// Move selection for a single turn
//
// Pipeline, evaluated once per turn with no state carried between turns:
// 1. Safety filter: drop off-board and occupied destinations
// 2. Tail-chase: step onto our own tail when long enough, not just fed, not hungry
// 3. Space: keep only the candidates touching the largest open region
// 4. Goal: nearest food when hungry, otherwise nearest to our own tail
//
// Every tie is broken by the fixed priority order up, down, left, right.

use log::{debug, warn};

use crate::config::HeuristicsConfig;
use crate::connectivity::ConnectivityAnalyzer;
use crate::error::DecisionResult;
use crate::food_distance::FoodDistanceField;
use crate::grid::{Cell, Grid};
use crate::types::{Battlesnake, Board, Coord, Direction};

/// Direction used when no safe move exists and no wall is adjacent
pub const FALLBACK_DIRECTION: Direction = Direction::Down;

/// Which stage settled the move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// Nothing was safe; walls were preferred over bodies
    NoSafeMove,
    TailChase,
    SeekFood,
    FollowTail,
}

impl DecisionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionReason::NoSafeMove => "no-safe-move",
            DecisionReason::TailChase => "tail-chase",
            DecisionReason::SeekFood => "seek-food",
            DecisionReason::FollowTail => "follow-tail",
        }
    }
}

/// Outcome of one decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDecision {
    pub direction: Direction,
    pub reason: DecisionReason,
    /// Number of candidates that survived the safety filter
    pub safe_moves: usize,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    direction: Direction,
    cell: Cell,
}

/// Decides the move for a board snapshot
///
/// This is the single entry point of the decision core: it builds a fresh
/// grid, annotates food distances and runs the selector.
///
/// # Errors
/// `DecisionError::InvalidBoard` when a dimension is non-positive or the board
/// is too large to index with `i32`
pub fn decide_move_for_snapshot(
    board: &Board,
    you: &Battlesnake,
    heuristics: &HeuristicsConfig,
) -> DecisionResult<MoveDecision> {
    let mut grid = Grid::build(board, you)?;
    FoodDistanceField::compute(&mut grid, &board.food);

    Ok(MoveSelector::new(heuristics.clone()).decide(&mut grid, you))
}

/// Stateless heuristic selector
pub struct MoveSelector {
    heuristics: HeuristicsConfig,
}

impl MoveSelector {
    pub fn new(heuristics: HeuristicsConfig) -> Self {
        MoveSelector { heuristics }
    }

    /// Picks a direction for `you` on an already annotated grid
    ///
    /// Only the region-size scratch field of the grid is written.
    pub fn decide(&self, grid: &mut Grid, you: &Battlesnake) -> MoveDecision {
        let head = you.head_coord();
        let safe = Self::safe_candidates(grid, &head);

        let first_safe = match safe.first() {
            Some(candidate) => candidate.direction,
            None => {
                let direction = Self::no_safe_move_direction(grid, &head);
                warn!(
                    "No safe moves from ({}, {}), moving {}",
                    head.x,
                    head.y,
                    direction.as_str()
                );
                return MoveDecision {
                    direction,
                    reason: DecisionReason::NoSafeMove,
                    safe_moves: 0,
                };
            }
        };
        let safe_moves = safe.len();
        let hungry = self.is_hungry(you);

        if self.can_chase_tail(you, hungry) {
            if let Some(tail) = safe.iter().find(|candidate| candidate.cell.is_own_tail()) {
                debug!("Chasing tail {} (health {})", tail.direction.as_str(), you.health);
                return MoveDecision {
                    direction: tail.direction,
                    reason: DecisionReason::TailChase,
                    safe_moves,
                };
            }
        }

        let candidates = Self::drop_own_tail(safe);
        let candidates = Self::keep_largest_regions(grid, candidates);

        let (chosen, reason) = if hungry {
            (
                Self::closest(&candidates, |candidate| candidate.cell.distance_to_food()),
                DecisionReason::SeekFood,
            )
        } else {
            let tail = you.tail_coord();
            (
                Self::closest(&candidates, |candidate| {
                    candidate.cell.coord().manhattan_distance(&tail)
                }),
                DecisionReason::FollowTail,
            )
        };

        MoveDecision {
            direction: chosen.unwrap_or(first_safe),
            reason,
            safe_moves,
        }
    }

    /// Hungry means health strictly below the threshold
    pub fn is_hungry(&self, you: &Battlesnake) -> bool {
        you.health < self.heuristics.hungry_health_threshold
    }

    fn can_chase_tail(&self, you: &Battlesnake, hungry: bool) -> bool {
        let long_enough = you.body.len() > self.heuristics.tail_chase_min_length;
        // Straight after eating the tail grows in place instead of moving
        let just_ate = you.health == self.heuristics.health_max;
        long_enough && !just_ate && !hungry
    }

    /// Destinations that are on-board and not occupied, in priority order
    fn safe_candidates(grid: &Grid, head: &Coord) -> Vec<Candidate> {
        Direction::all()
            .iter()
            .filter_map(|&direction| {
                grid.neighbor(head, direction)
                    .filter(|cell| cell.is_open())
                    .map(|cell| Candidate {
                        direction,
                        cell: *cell,
                    })
            })
            .collect()
    }

    /// First direction that leaves the board, else the fixed fallback
    fn no_safe_move_direction(grid: &Grid, head: &Coord) -> Direction {
        Direction::all()
            .iter()
            .copied()
            .find(|&direction| grid.neighbor(head, direction).is_none())
            .unwrap_or(FALLBACK_DIRECTION)
    }

    /// Removes our tail unless it is the only thing left
    fn drop_own_tail(candidates: Vec<Candidate>) -> Vec<Candidate> {
        if candidates.iter().all(|candidate| candidate.cell.is_own_tail()) {
            return candidates;
        }

        candidates
            .into_iter()
            .filter(|candidate| !candidate.cell.is_own_tail())
            .collect()
    }

    /// Keeps candidates whose region size equals the maximum over all candidates
    fn keep_largest_regions(grid: &mut Grid, candidates: Vec<Candidate>) -> Vec<Candidate> {
        let mut sized = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let coord = candidate.cell.coord();
            let size = ConnectivityAnalyzer::region_size(grid, &coord);
            grid.record_region_size(&coord, size);
            sized.push((candidate, size));
        }

        let largest = sized.iter().map(|(_, size)| *size).max().unwrap_or(0);
        debug!(
            "Region sizes: {:?} (largest {})",
            sized
                .iter()
                .map(|(candidate, size)| (candidate.direction.as_str(), *size))
                .collect::<Vec<_>>(),
            largest
        );

        sized
            .into_iter()
            .filter(|(_, size)| *size == largest)
            .map(|(candidate, _)| candidate)
            .collect()
    }

    /// Candidate with the smallest distance, earliest in priority order on ties
    fn closest<F>(candidates: &[Candidate], distance: F) -> Option<Direction>
    where
        F: Fn(&Candidate) -> i32,
    {
        candidates
            .iter()
            .min_by_key(|candidate| distance(*candidate))
            .map(|candidate| candidate.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn snake(id: &str, health: i32, body: &[(i32, i32)]) -> Battlesnake {
        let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord { x, y }).collect();
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health,
            head: body[0],
            length: body.len() as i32,
            body,
            latency: "0".to_string(),
            shout: None,
        }
    }

    fn decide(width: i32, height: i32, food: &[(i32, i32)], me: Battlesnake, others: Vec<Battlesnake>) -> MoveDecision {
        let mut snakes = vec![me.clone()];
        snakes.extend(others);
        let board = Board {
            width,
            height,
            food: food.iter().map(|&(x, y)| Coord { x, y }).collect(),
            snakes,
            hazards: vec![],
        };
        decide_move_for_snapshot(&board, &me, &Config::default_hardcoded().heuristics).unwrap()
    }

    #[test]
    fn test_only_move_onto_short_tail_is_kept() {
        // Body of length 4 does not qualify for tail-chasing, but the tail is the only way out
        let me = snake("me", 50, &[(0, 0), (0, 1), (1, 1), (1, 0)]);
        let decision = decide(3, 3, &[], me, vec![]);

        assert_eq!(decision.direction, Direction::Right);
        assert_eq!(decision.reason, DecisionReason::FollowTail);
        assert_eq!(decision.safe_moves, 1);
    }

    #[test]
    fn test_prefers_larger_region_over_priority() {
        // Column x=1 is walled except for our head at (1,2); left pocket has 5 cells, right side 15
        let me = snake("me", 50, &[(1, 2), (1, 2)]);
        let lower = snake("lower", 50, &[(1, 1), (1, 0)]);
        let upper = snake("upper", 50, &[(1, 3), (1, 4)]);

        let decision = decide(5, 5, &[], me, vec![lower, upper]);

        assert_eq!(decision.direction, Direction::Right);
        assert_eq!(decision.reason, DecisionReason::FollowTail);
    }

    #[test]
    fn test_hungry_food_only_breaks_region_ties() {
        // Food sits in the small pocket, but the larger region still wins
        let me = snake("me", 10, &[(1, 2), (1, 2)]);
        let lower = snake("lower", 50, &[(1, 1), (1, 0)]);
        let upper = snake("upper", 50, &[(1, 3), (1, 4)]);

        let decision = decide(5, 5, &[(0, 2)], me, vec![lower, upper]);

        assert_eq!(decision.direction, Direction::Right);
        assert_eq!(decision.reason, DecisionReason::SeekFood);
    }

    #[test]
    fn test_region_sizes_recorded_in_scratch() {
        let me = snake("me", 50, &[(1, 2), (1, 2)]);
        let lower = snake("lower", 50, &[(1, 1), (1, 0)]);
        let upper = snake("upper", 50, &[(1, 3), (1, 4)]);
        let board = Board {
            width: 5,
            height: 5,
            food: vec![],
            snakes: vec![me.clone(), lower, upper],
            hazards: vec![],
        };

        let mut grid = Grid::build(&board, &me).unwrap();
        FoodDistanceField::compute(&mut grid, &board.food);
        MoveSelector::new(Config::default_hardcoded().heuristics).decide(&mut grid, &me);

        assert_eq!(grid.cell(&Coord::new(0, 2)).unwrap().region_size(), Some(5));
        assert_eq!(grid.cell(&Coord::new(2, 2)).unwrap().region_size(), Some(15));
    }

    #[test]
    fn test_no_safe_move_prefers_first_wall_in_priority_order() {
        // Head in the top-left corner, down and right blocked by our own body
        let me = snake("me", 50, &[(0, 2), (0, 1), (1, 1), (1, 2), (2, 2)]);
        let decision = decide(3, 3, &[], me, vec![]);

        assert_eq!(decision.direction, Direction::Up);
        assert_eq!(decision.reason, DecisionReason::NoSafeMove);
        assert_eq!(decision.safe_moves, 0);
    }

    #[test]
    fn test_no_safe_move_without_walls_falls_back_to_down() {
        let me = snake("me", 50, &[(1, 1), (1, 1)]);
        let other = snake("other", 50, &[(1, 2), (0, 2), (0, 1), (0, 0), (1, 0), (2, 0), (2, 1)]);

        let decision = decide(3, 3, &[], me, vec![other]);

        assert_eq!(decision.direction, FALLBACK_DIRECTION);
        assert_eq!(decision.reason, DecisionReason::NoSafeMove);
    }

    #[test]
    fn test_is_hungry_threshold() {
        let selector = MoveSelector::new(Config::default_hardcoded().heuristics);
        assert!(selector.is_hungry(&snake("me", 19, &[(0, 0)])));
        assert!(!selector.is_hungry(&snake("me", 20, &[(0, 0)])));
    }
}
