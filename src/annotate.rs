use crate::{
    error::InvalidStep,
    maze::{Direction, Position},
};

/// Turn a path into directional markers, one per step, attached to the cell the step leaves.
/// The last cell of the path gets no marker, so empty and single-cell paths yield nothing.
pub fn annotate(path: &[Position]) -> Result<Vec<(Position, Direction)>, InvalidStep> {
    path.windows(2)
        .map(|pair| {
            let (from, to) = (pair[0], pair[1]);
            let delta = (
                to.row as isize - from.row as isize,
                to.col as isize - from.col as isize,
            );
            Direction::from_delta(delta)
                .map(|direction| (from, direction))
                .ok_or(InvalidStep { from, to })
        })
        .collect()
}
