use std::time::Duration;

use crate::solvers::Solver;

/// Read-only report of a finished solve, shown until the user dismisses it.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub solver: Solver,
    pub step_count: usize,
    pub elapsed: Duration,
}

impl Summary {
    pub const TITLE: &'static str = "Algorithm Details";
    pub const DISMISS_HINT: &'static str = "Press Enter or Esc to close";

    pub fn lines(&self) -> [String; 3] {
        [
            format!("Algorithm Used: {}", self.solver),
            format!("Number of Steps: {}", self.step_count),
            format!("Time Taken: {:.2} seconds", self.elapsed.as_secs_f64()),
        ]
    }
}
