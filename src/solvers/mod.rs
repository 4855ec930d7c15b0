use std::{
    collections::HashSet,
    rc::Rc,
    time::{Duration, Instant},
};

mod astar;
mod dfs;

use crate::maze::{Grid, Position};
use astar::AStarFrontier;
use dfs::DfsFrontier;

/// A cell waiting in (or popped from) a frontier, with the chain of cells that led to it.
#[derive(Debug)]
struct TrackedCell {
    /// Coordinates of the cell in the maze
    coord: Position,
    /// The cell this one was reached from
    parent: Option<Rc<TrackedCell>>,
    /// Number of steps taken from the start to reach this cell
    traveling_cost: usize,
    /// Cost a prioritizing frontier carries forward; left at 0 by frontiers that ignore it
    search_cost: usize,
}

impl TrackedCell {
    fn seed(coord: Position) -> Self {
        TrackedCell {
            coord,
            parent: None,
            traveling_cost: 0,
            search_cost: 0,
        }
    }

    fn child_of(parent: &Rc<TrackedCell>, coord: Position) -> Self {
        TrackedCell {
            coord,
            parent: Some(parent.clone()),
            traveling_cost: parent.traveling_cost + 1,
            search_cost: 0,
        }
    }

    /// Positions from the start up to, but not including, this cell.
    fn path_before(&self) -> Vec<Position> {
        let mut path = Vec::with_capacity(self.traveling_cost);
        let mut current = self.parent.as_ref();
        while let Some(cell) = current {
            path.push(cell.coord);
            current = cell.parent.as_ref();
        }
        path.reverse();
        path
    }

    /// Positions from the start up to and including this cell.
    fn path(&self) -> Vec<Position> {
        let mut path = self.path_before();
        path.push(self.coord);
        path
    }
}

/// Pending-work collection of a run. Visitedness is checked when popping, so the
/// same coordinate may sit in a frontier several times.
trait Frontier {
    fn push(&mut self, cell: TrackedCell);
    fn pop(&mut self) -> Option<TrackedCell>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Solver {
    Dfs,
    AStar,
}

impl Solver {
    pub const ALL: [Solver; 2] = [Solver::Dfs, Solver::AStar];

    fn frontier(self, goal: Position) -> Box<dyn Frontier> {
        match self {
            Solver::Dfs => Box::new(DfsFrontier::default()),
            Solver::AStar => Box::new(AStarFrontier::new(goal)),
        }
    }
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "DFS"),
            Solver::AStar => write!(f, "A*"),
        }
    }
}

/// Result of one [`Run::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// A new cell was expanded. `partial_path` leads from the start up to it, exclusive.
    Continue {
        position: Position,
        partial_path: Vec<Position>,
    },
    /// The goal was expanded. `path` runs from the start to the goal, inclusive.
    Found {
        path: Vec<Position>,
        step_count: usize,
        elapsed: Duration,
    },
    /// The frontier ran dry without reaching the goal.
    Exhausted,
}

impl StepOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepOutcome::Continue { .. })
    }
}

/// Final answer of [`solve`].
#[derive(Debug, Clone, PartialEq)]
pub enum SolveResult {
    Found {
        path: Vec<Position>,
        step_count: usize,
        elapsed: Duration,
    },
    NotFound,
}

impl SolveResult {
    pub fn path(&self) -> Option<&[Position]> {
        match self {
            SolveResult::Found { path, .. } => Some(path),
            SolveResult::NotFound => None,
        }
    }

    /// Number of expanded cells. Zero when no path was found.
    pub fn step_count(&self) -> usize {
        match self {
            SolveResult::Found { step_count, .. } => *step_count,
            SolveResult::NotFound => 0,
        }
    }

    /// Time from run creation to reaching the goal. Zero when no path was found.
    pub fn elapsed(&self) -> Duration {
        match self {
            SolveResult::Found { elapsed, .. } => *elapsed,
            SolveResult::NotFound => Duration::ZERO,
        }
    }
}

/// An in-progress search, advanced one expansion at a time by [`Run::step`].
///
/// The run owns its frontier and visited set; dropping it between steps cancels the search.
/// Iterating a run yields the trace of outcomes, ending with the first terminal one.
pub struct Run<'a> {
    grid: &'a Grid,
    goal: Position,
    solver: Solver,
    frontier: Box<dyn Frontier>,
    visited: HashSet<Position>,
    step_count: usize,
    started_at: Instant,
    finished: Option<StepOutcome>,
}

impl<'a> Run<'a> {
    /// Start a search from `start` to `goal`.
    /// A start outside the grid or on a wall leaves the frontier empty.
    pub fn new(grid: &'a Grid, start: Position, goal: Position, solver: Solver) -> Self {
        let mut frontier = solver.frontier(goal);
        if grid.is_passable(start) {
            frontier.push(TrackedCell::seed(start));
        }
        tracing::debug!("[solver] {} run from {} to {}", solver, start, goal);
        Run {
            grid,
            goal,
            solver,
            frontier,
            visited: HashSet::new(),
            step_count: 0,
            started_at: Instant::now(),
            finished: None,
        }
    }

    pub fn solver(&self) -> Solver {
        self.solver
    }

    /// Number of distinct cells expanded so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// Perform one expansion. Already-visited frontier entries are skipped within the
    /// same call. Once a terminal outcome is returned, every later call repeats it.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(outcome) = &self.finished {
            return outcome.clone();
        }

        while let Some(current) = self.frontier.pop() {
            if !self.visited.insert(current.coord) {
                continue;
            }
            self.step_count += 1;
            tracing::debug!(
                "[solver] {} step {} expands {}",
                self.solver,
                self.step_count,
                current.coord
            );

            if current.coord == self.goal {
                let outcome = StepOutcome::Found {
                    path: current.path(),
                    step_count: self.step_count,
                    elapsed: self.started_at.elapsed(),
                };
                tracing::info!(
                    "[solver] {} reached the goal after {} steps",
                    self.solver,
                    self.step_count
                );
                self.finished = Some(outcome.clone());
                return outcome;
            }

            let current = Rc::new(current);
            for neighbor in self.grid.neighbors(current.coord) {
                if !self.visited.contains(&neighbor) {
                    self.frontier.push(TrackedCell::child_of(&current, neighbor));
                }
            }

            return StepOutcome::Continue {
                position: current.coord,
                partial_path: current.path_before(),
            };
        }

        tracing::info!(
            "[solver] {} exhausted the frontier after {} steps",
            self.solver,
            self.step_count
        );
        self.finished = Some(StepOutcome::Exhausted);
        StepOutcome::Exhausted
    }
}

impl Iterator for Run<'_> {
    type Item = StepOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_finished() {
            return None;
        }
        Some(self.step())
    }
}

/// Run a search to completion without animation.
pub fn solve(grid: &Grid, start: Position, goal: Position, solver: Solver) -> SolveResult {
    match Run::new(grid, start, goal, solver).last() {
        Some(StepOutcome::Found {
            path,
            step_count,
            elapsed,
        }) => SolveResult::Found {
            path,
            step_count,
            elapsed,
        },
        _ => SolveResult::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{annotate::annotate, maze::Maze};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    const SAMPLE: &str = "SEE\nXXE\nXXG";

    fn sample() -> Maze {
        Maze::from_text(SAMPLE).unwrap()
    }

    fn positions(coords: &[(usize, usize)]) -> Vec<Position> {
        coords.iter().copied().map(Position::from).collect()
    }

    /// Random maze with roughly 30% walls, start in the top-left and goal in the bottom-right.
    fn random_maze(rng: &mut StdRng, rows: usize, cols: usize) -> Maze {
        let mut text = String::new();
        for row in 0..rows {
            for col in 0..cols {
                let glyph = if (row, col) == (0, 0) {
                    'S'
                } else if (row, col) == (rows - 1, cols - 1) {
                    'G'
                } else if rng.random_bool(0.3) {
                    'X'
                } else {
                    'E'
                };
                text.push(glyph);
            }
            text.push('\n');
        }
        Maze::from_text(&text).unwrap()
    }

    fn reachable_count(grid: &Grid, start: Position) -> usize {
        let mut seen = HashSet::from([start]);
        let mut stack = vec![start];
        while let Some(pos) = stack.pop() {
            for next in grid.neighbors(pos) {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }
        seen.len()
    }

    fn assert_valid_path(grid: &Grid, path: &[Position], start: Position, goal: Position) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        for pair in path.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1, "non-orthogonal step {:?}", pair);
            assert!(grid.is_passable(pair[1]));
        }
    }

    #[test]
    fn test_dfs_sample_trace() {
        let maze = sample();
        let trace = Run::new(maze.grid(), maze.start(), maze.goal(), Solver::Dfs).collect::<Vec<_>>();
        assert_eq!(trace.len(), 5);
        assert_eq!(
            trace[0],
            StepOutcome::Continue {
                position: Position::new(0, 0),
                partial_path: vec![],
            }
        );
        assert_eq!(
            trace[3],
            StepOutcome::Continue {
                position: Position::new(1, 2),
                partial_path: positions(&[(0, 0), (0, 1), (0, 2)]),
            }
        );
        match &trace[4] {
            StepOutcome::Found {
                path, step_count, ..
            } => {
                assert_eq!(*path, positions(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)]));
                assert_eq!(*step_count, 5);
            }
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[test]
    fn test_astar_sample() {
        let maze = sample();
        let result = solve(maze.grid(), maze.start(), maze.goal(), Solver::AStar);
        assert_eq!(
            result.path().unwrap(),
            positions(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)])
        );
        assert!(result.step_count() <= 6);
        assert_eq!(result.step_count(), 5);
    }

    #[test]
    fn test_astar_on_bundled_map() {
        let maze = Maze::from_text(include_str!("../../map.txt")).unwrap();
        let result = solve(maze.grid(), maze.start(), maze.goal(), Solver::AStar);
        assert_eq!(
            result.path().unwrap(),
            positions(&[
                (1, 1),
                (1, 2),
                (1, 3),
                (1, 4),
                (2, 4),
                (3, 4),
                (3, 5),
                (3, 6),
                (2, 6),
                (1, 6),
                (1, 7),
                (1, 8),
                (1, 9),
                (1, 10),
                (1, 11),
                (1, 12),
                (2, 12),
                (3, 12),
                (3, 13),
                (4, 13),
                (5, 13),
                (6, 13),
                (7, 13),
                (8, 13),
                (9, 13),
            ])
        );
        // Heuristic accumulates into the carried cost
        assert_eq!(result.step_count(), 39);

        let dfs = solve(maze.grid(), maze.start(), maze.goal(), Solver::Dfs);
        assert_eq!(dfs.path().unwrap().len(), 35);
        assert_eq!(dfs.step_count(), 50);
    }

    #[test]
    fn test_astar_expansion_order_in_open_room() {
        let maze = Maze::from_text("SEEE\nEEEE\nEEEG").unwrap();
        let expanded = Run::new(maze.grid(), maze.start(), maze.goal(), Solver::AStar)
            .map(|outcome| match outcome {
                StepOutcome::Continue { position, .. } => position,
                StepOutcome::Found { path, .. } => *path.last().unwrap(),
                StepOutcome::Exhausted => panic!("goal is reachable"),
            })
            .collect::<Vec<_>>();
        assert_eq!(
            expanded,
            positions(&[
                (0, 0),
                (0, 1),
                (1, 0),
                (0, 2),
                (1, 1),
                (2, 0),
                (0, 3),
                (1, 2),
                (2, 1),
                (1, 3),
                (2, 2),
                (2, 3),
            ])
        );
        let result = solve(maze.grid(), maze.start(), maze.goal(), Solver::AStar);
        assert_eq!(
            result.path().unwrap(),
            positions(&[(0, 0), (0, 1), (0, 2), (0, 3), (1, 3), (2, 3)])
        );
        assert_eq!(result.step_count(), 12);
    }

    #[test]
    fn test_dfs_explores_up_first() {
        // From the start, right and up are both open; up is pushed last and popped first.
        let maze = Maze::from_text("EEG\nSEX").unwrap();
        let mut run = Run::new(maze.grid(), maze.start(), maze.goal(), Solver::Dfs);
        assert!(matches!(run.step(), StepOutcome::Continue { .. }));
        assert_eq!(
            run.step(),
            StepOutcome::Continue {
                position: Position::new(0, 0),
                partial_path: vec![Position::new(1, 0)],
            }
        );
    }

    #[test]
    fn test_astar_breaks_ties_in_insertion_order() {
        // Right and down of the start share the same priority; right was pushed first.
        let maze = Maze::from_text("SEE\nEEE\nEEG").unwrap();
        let mut run = Run::new(maze.grid(), maze.start(), maze.goal(), Solver::AStar);
        run.step();
        assert_eq!(
            run.step(),
            StepOutcome::Continue {
                position: Position::new(0, 1),
                partial_path: vec![Position::new(0, 0)],
            }
        );
    }

    #[test]
    fn test_unreachable_goal() {
        let maze = Maze::from_text("SEX\nEEX\nXXG").unwrap();
        for solver in Solver::ALL {
            let result = solve(maze.grid(), maze.start(), maze.goal(), solver);
            assert_eq!(result, SolveResult::NotFound);
            assert_eq!(result.step_count(), 0);
            assert_eq!(result.elapsed(), Duration::ZERO);

            let trace = Run::new(maze.grid(), maze.start(), maze.goal(), solver).collect::<Vec<_>>();
            // Four reachable cells, then exhaustion
            assert_eq!(trace.len(), 5);
            assert_eq!(trace.last(), Some(&StepOutcome::Exhausted));
        }
    }

    #[test]
    fn test_start_on_goal() {
        let maze = Maze::from_text("SEG").unwrap();
        let goal = maze.goal();
        let result = solve(maze.grid(), goal, goal, Solver::Dfs);
        assert_eq!(result.path().unwrap(), [goal]);
        assert_eq!(result.step_count(), 1);
    }

    #[test]
    fn test_start_on_wall_is_exhausted() {
        let maze = Maze::from_text("SXG").unwrap();
        let mut run = Run::new(maze.grid(), Position::new(0, 1), maze.goal(), Solver::AStar);
        assert_eq!(run.step(), StepOutcome::Exhausted);
        assert_eq!(run.step_count(), 0);
    }

    #[test]
    fn test_terminal_outcome_repeats() {
        let maze = sample();
        let mut run = Run::new(maze.grid(), maze.start(), maze.goal(), Solver::Dfs);
        assert_eq!(run.solver(), Solver::Dfs);
        let found = loop {
            let outcome = run.step();
            if outcome.is_terminal() {
                break outcome;
            }
        };
        assert!(run.is_finished());
        assert_eq!(run.step(), found);
        assert_eq!(run.next(), None);
    }

    #[test]
    fn test_step_count_counts_distinct_cells() {
        // Open room: many duplicate frontier entries, but each cell is counted once
        let maze = Maze::from_text("SEEE\nEEEE\nEEEE\nEEEG").unwrap();
        for solver in Solver::ALL {
            let run = Run::new(maze.grid(), maze.start(), maze.goal(), solver);
            let mut seen = HashSet::new();
            for outcome in run {
                if let StepOutcome::Continue { position, .. } = outcome {
                    assert!(seen.insert(position), "{} expanded {} twice", solver, position);
                }
            }
            let result = solve(maze.grid(), maze.start(), maze.goal(), solver);
            assert_eq!(result.step_count(), seen.len() + 1);
        }
    }

    #[test]
    fn test_random_mazes() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let rows = rng.random_range(2..12);
            let cols = rng.random_range(2..12);
            let maze = random_maze(&mut rng, rows, cols);
            let grid = maze.grid();
            let reachable = reachable_count(grid, maze.start());

            let dfs = solve(grid, maze.start(), maze.goal(), Solver::Dfs);
            let astar = solve(grid, maze.start(), maze.goal(), Solver::AStar);

            match (&dfs, &astar) {
                (SolveResult::NotFound, SolveResult::NotFound) => {}
                (
                    SolveResult::Found { path: dfs_path, .. },
                    SolveResult::Found {
                        path: astar_path, ..
                    },
                ) => {
                    assert_valid_path(grid, dfs_path, maze.start(), maze.goal());
                    assert_valid_path(grid, astar_path, maze.start(), maze.goal());
                    assert!(dfs.step_count() <= reachable);
                    assert!(astar.step_count() <= reachable);
                    assert!(annotate(dfs_path).is_ok());
                    assert!(annotate(astar_path).is_ok());
                }
                _ => panic!("solvers disagree on reachability:\n{}", grid),
            }

            // Same inputs give the same answer
            for (solver, first) in [(Solver::Dfs, &dfs), (Solver::AStar, &astar)] {
                let again = solve(grid, maze.start(), maze.goal(), solver);
                assert_eq!(again.path(), first.path());
                assert_eq!(again.step_count(), first.step_count());
            }
        }
    }
}
