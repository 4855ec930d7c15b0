use std::{cmp::Reverse, collections::BinaryHeap};

use super::{Frontier, TrackedCell};
use crate::maze::Position;

/// A frontier entry ordered by priority, then by insertion sequence.
struct QueuedCell {
    priority: usize,
    sequence: u64,
    cell: TrackedCell,
}

impl PartialEq for QueuedCell {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}

impl Eq for QueuedCell {}

impl PartialOrd for QueuedCell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedCell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.priority, self.sequence).cmp(&(other.priority, other.sequence))
    }
}

/// Min-priority frontier. A cell's cost is its parent's cost plus one step plus its
/// manhattan distance to the goal, so the heuristic accumulates along the path, and
/// that cost is also its priority. Equal priorities pop in the order they were pushed.
/// Stale duplicates are left in the heap and skipped by the run when popped.
pub(super) struct AStarFrontier {
    goal: Position,
    // Using Reverse to turn the max-heap into a min-heap
    heap: BinaryHeap<Reverse<QueuedCell>>,
    next_sequence: u64,
}

impl AStarFrontier {
    pub(super) fn new(goal: Position) -> Self {
        AStarFrontier {
            goal,
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    /// The seed costs 0; every other cell costs its parent's cost plus one step plus
    /// the heuristic.
    fn cost(&self, cell: &TrackedCell) -> usize {
        match &cell.parent {
            None => 0,
            Some(parent) => parent.search_cost + 1 + cell.coord.manhattan(self.goal),
        }
    }
}

impl Frontier for AStarFrontier {
    fn push(&mut self, mut cell: TrackedCell) {
        cell.search_cost = self.cost(&cell);
        let priority = cell.search_cost;
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Reverse(QueuedCell {
            priority,
            sequence,
            cell,
        }));
    }

    fn pop(&mut self) -> Option<TrackedCell> {
        self.heap.pop().map(|Reverse(queued)| queued.cell)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_pops_lowest_priority_then_fifo() {
        let goal = Position::new(2, 2);
        let mut frontier = AStarFrontier::new(goal);
        let root = Rc::new(TrackedCell::seed(Position::new(1, 1)));
        // priority 0 + 1 + 2 = 3
        frontier.push(TrackedCell::child_of(&root, Position::new(0, 1)));
        // priority 0 + 1 + 1 = 2
        frontier.push(TrackedCell::child_of(&root, Position::new(1, 2)));
        // priority 0 + 1 + 1 = 2, pushed later
        frontier.push(TrackedCell::child_of(&root, Position::new(2, 1)));

        let order = std::iter::from_fn(|| frontier.pop())
            .map(|cell| cell.coord)
            .collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![
                Position::new(1, 2),
                Position::new(2, 1),
                Position::new(0, 1)
            ]
        );
    }

    #[test]
    fn test_seed_has_zero_priority() {
        let frontier = AStarFrontier::new(Position::new(9, 9));
        assert_eq!(frontier.cost(&TrackedCell::seed(Position::new(0, 0))), 0);
    }

    #[test]
    fn test_heuristic_accumulates_along_the_path() {
        let goal = Position::new(0, 4);
        let mut frontier = AStarFrontier::new(goal);
        frontier.push(TrackedCell::seed(Position::new(0, 0)));
        let seed = Rc::new(frontier.pop().unwrap());
        assert_eq!(seed.search_cost, 0);

        // 0 + 1 + 3
        frontier.push(TrackedCell::child_of(&seed, Position::new(0, 1)));
        let first = Rc::new(frontier.pop().unwrap());
        assert_eq!(first.search_cost, 4);

        // 4 + 1 + 2, not the step count plus the heuristic
        frontier.push(TrackedCell::child_of(&first, Position::new(0, 2)));
        let second = frontier.pop().unwrap();
        assert_eq!(second.search_cost, 7);
        assert_eq!(second.traveling_cost, 2);
    }
}
