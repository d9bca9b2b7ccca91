use error_chain::bail;
use log::debug;
use smallvec::SmallVec;

use crate::cells::GridCoordinate;
use crate::errors::*;

/// Number of checkpoints sampled from a traversal order.
pub const CHECKPOINT_COUNT: usize = 5;

// The traversal is cut into this many strides: the start, the checkpoints, the goal and one spare.
const STRIDES: usize = CHECKPOINT_COUNT + 2;

pub type CheckpointSmallVec = SmallVec<[GridCoordinate; CHECKPOINT_COUNT]>;

/// Checkpoints that must be visited in order, followed by the goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointSet {
    checkpoints: CheckpointSmallVec,
    goal: GridCoordinate,
    stride: usize,
}

impl CheckpointSet {
    /// A set with no checkpoints, only a goal.
    pub fn goal_only(goal: GridCoordinate) -> CheckpointSet {
        CheckpointSet {
            checkpoints: CheckpointSmallVec::new(),
            goal,
            stride: 0,
        }
    }

    #[inline]
    pub fn checkpoints(&self) -> &[GridCoordinate] {
        &self.checkpoints
    }

    #[inline]
    pub fn goal(&self) -> GridCoordinate {
        self.goal
    }

    /// Distance in traversal steps between consecutive samples. Zero for a collapsed set.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Index of the first checkpoint at `coord`.
    pub fn position_of(&self, coord: GridCoordinate) -> Option<usize> {
        self.checkpoints.iter().position(|c| *c == coord)
    }

    /// The checkpoint to collect after `collected` checkpoints, None once all are collected.
    #[inline]
    pub fn next_after(&self, collected: usize) -> Option<GridCoordinate> {
        self.checkpoints.get(collected).cloned()
    }
}

/// Sample five checkpoints and a goal from a traversal order at a uniform stride.
///
/// With `n` cells in the order the stride is `n / 7`; checkpoints are the cells at
/// `stride, 2 * stride, .. 5 * stride` and the goal is at `6 * stride`. Orders shorter than seven
/// cells give a stride of zero and every sample collapses onto the first cell of the order.
/// Only an empty order is an error.
pub fn sample_checkpoints(order: &[GridCoordinate]) -> Result<CheckpointSet> {
    if order.is_empty() {
        bail!(ErrorKind::EmptyTraversal);
    }

    let stride = order.len() / STRIDES;
    let checkpoints = (1..=CHECKPOINT_COUNT)
        .map(|i| order[i * stride])
        .collect::<CheckpointSmallVec>();
    let goal = order[(CHECKPOINT_COUNT + 1) * stride];

    debug!("sampled {} checkpoints from {} cells with stride {}",
           checkpoints.len(),
           order.len(),
           stride);

    Ok(CheckpointSet {
        checkpoints,
        goal,
        stride,
    })
}


#[cfg(test)]
mod tests {

    use quickcheck::quickcheck;

    use super::*;
    use crate::generators;
    use crate::pathing::bfs_order;
    use crate::units::{ColumnsCount, RowsCount};

    fn line(length: u32) -> Vec<GridCoordinate> {
        (0..length).map(|c| GridCoordinate::new(1, c)).collect()
    }

    #[test]
    fn empty_order_is_rejected() {
        assert!(sample_checkpoints(&[]).is_err());
    }

    #[test]
    fn fourteen_cells_gives_stride_two() {
        let order = line(14);
        let set = sample_checkpoints(&order).unwrap();
        assert_eq!(set.stride(), 2);
        let expected = [2, 4, 6, 8, 10].iter().map(|&i| order[i]).collect::<Vec<_>>();
        assert_eq!(set.checkpoints(), &expected[..]);
        assert_eq!(set.goal(), order[12]);
    }

    #[test]
    fn short_orders_collapse_onto_the_start() {
        for length in 1..7 {
            let order = line(length);
            let set = sample_checkpoints(&order).unwrap();
            assert_eq!(set.stride(), 0);
            assert_eq!(set.len(), CHECKPOINT_COUNT);
            assert!(set.checkpoints().iter().all(|c| *c == order[0]));
            assert_eq!(set.goal(), order[0]);
        }
    }

    #[test]
    fn degenerate_maze_collapses_onto_the_start() {
        let g = generators::generate_seeded(RowsCount(3), ColumnsCount(3), 11).unwrap();
        let order = bfs_order(&g, generators::WALL_EXTENSION_START).unwrap();
        assert_eq!(order, vec![GridCoordinate::new(1, 1)]);

        let set = sample_checkpoints(&order).unwrap();
        assert_eq!(set.stride(), 0);
        assert_eq!(set.checkpoints(), &[GridCoordinate::new(1, 1); CHECKPOINT_COUNT][..]);
        assert_eq!(set.goal(), GridCoordinate::new(1, 1));
    }

    #[test]
    fn sampling_is_repeatable() {
        let order = line(100);
        assert_eq!(sample_checkpoints(&order).unwrap(), sample_checkpoints(&order).unwrap());
    }

    #[test]
    fn next_checkpoint_and_position() {
        let order = line(21);
        let set = sample_checkpoints(&order).unwrap();
        assert_eq!(set.next_after(0), Some(order[3]));
        assert_eq!(set.next_after(4), Some(order[15]));
        assert_eq!(set.next_after(5), None);
        assert_eq!(set.position_of(order[9]), Some(2));
        assert_eq!(set.position_of(order[10]), None);
        assert_eq!(set.goal(), order[18]);
    }

    #[test]
    fn goal_only_set() {
        let goal = GridCoordinate::new(9, 9);
        let set = CheckpointSet::goal_only(goal);
        assert!(set.is_empty());
        assert_eq!(set.next_after(0), None);
        assert_eq!(set.goal(), goal);
    }

    #[test]
    fn quickcheck_samples_are_ordered_members_of_the_traversal() {
        fn p(rows: u8, columns: u8, seed: u64) -> bool {
            let rows = 3 + rows as usize % 40;
            let columns = 3 + columns as usize % 40;
            let g = generators::generate_seeded(RowsCount(rows), ColumnsCount(columns), seed)
                .unwrap();
            let order = bfs_order(&g, generators::WALL_EXTENSION_START).unwrap();
            let set = sample_checkpoints(&order).unwrap();

            let index_of = |coord: &GridCoordinate| order.iter().position(|c| c == coord);
            let mut indices = set.checkpoints()
                .iter()
                .map(|c| index_of(c))
                .collect::<Option<Vec<usize>>>()
                .unwrap_or_default();
            if indices.len() != CHECKPOINT_COUNT {
                return false;
            }
            match index_of(&set.goal()) {
                Some(goal_index) => indices.push(goal_index),
                None => return false,
            }

            let ordered = if set.stride() == 0 {
                indices.iter().all(|&i| i == 0)
            } else {
                indices.windows(2).all(|w| w[0] < w[1])
            };
            ordered && set == sample_checkpoints(&order).unwrap()
        }
        quickcheck(p as fn(u8, u8, u64) -> bool);
    }
}
