use super::{Frontier, TrackedCell};

/// Last-in-first-out frontier. With neighbors pushed right, down, left, up,
/// the up neighbor is explored first at every branch.
#[derive(Default)]
pub(super) struct DfsFrontier {
    stack: Vec<TrackedCell>,
}

impl Frontier for DfsFrontier {
    fn push(&mut self, cell: TrackedCell) {
        self.stack.push(cell);
    }

    fn pop(&mut self) -> Option<TrackedCell> {
        self.stack.pop()
    }
}
