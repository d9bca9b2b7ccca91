use std::collections::VecDeque;

use error_chain::bail;
use fnv::{FnvHashMap, FnvHashSet};
use smallvec::SmallVec;

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::errors::*;
use crate::grid::Grid;

/// Order neighbours are queued in during a breadth first traversal: right, down, left, up.
pub const TRAVERSAL_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::East,
                                                       CompassPrimary::South,
                                                       CompassPrimary::West,
                                                       CompassPrimary::North];

/// Every open cell reachable from `start` in breadth first discovery order.
///
/// The first entry is `start` and no cell appears twice. Distance from `start` never decreases
/// along the sequence. `start` must be an open cell on the grid.
pub fn bfs_order(grid: &Grid, start: GridCoordinate) -> Result<Vec<GridCoordinate>> {
    if !grid.is_open(start) {
        bail!(ErrorKind::InvalidStart(start));
    }

    let open_cells = grid.open_cells_count();
    let mut visited: FnvHashSet<GridCoordinate> =
        FnvHashSet::with_capacity_and_hasher(open_cells, Default::default());
    let mut queue = VecDeque::new();
    let mut order = Vec::with_capacity(open_cells);
    queue.push_back(start);

    while let Some(coord) = queue.pop_front() {
        // A cell can be queued more than once when the grid has loops.
        if !visited.insert(coord) {
            continue;
        }
        order.push(coord);

        for dir in TRAVERSAL_DIRECTIONS.iter() {
            if let Some(neighbour) = grid.neighbour_at_direction(coord, *dir) {
                if grid.is_open(neighbour) && !visited.contains(&neighbour) {
                    queue.push_back(neighbour);
                }
            }
        }
    }

    Ok(order)
}


/// Step counts from a start cell to every open cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    pub fn for_grid(grid: &Grid, start_coordinate: GridCoordinate) -> Result<Distances> {

        if !grid.is_open(start_coordinate) {
            bail!(ErrorKind::InvalidStart(start_coordinate));
        }

        let mut max = 0;
        let mut distances: FnvHashMap<GridCoordinate, u32> =
            FnvHashMap::with_capacity_and_hasher(grid.open_cells_count(), Default::default());
        distances.insert(start_coordinate, 0);

        // Every step costs one, so the first time a cell is reached is via a shortest route and
        // the map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell = distances.get(cell_coord).cloned().unwrap_or(0);
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coordinate in grid.open_neighbours(*cell_coord).iter() {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Ok(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// Number of cells reachable from the start, the start included.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[GridCoordinate; 8]>>();
        furthest.sort();
        furthest
    }
}

/// Shortest route from the start of `distances_from_start` to `end_point`, both ends included.
///
/// None if the end point is not reachable.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: GridCoordinate)
                     -> Option<Vec<GridCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {
        let closer = grid.open_neighbours(current_coord)
            .into_iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(coord).map(|d| (coord, d))
            })
            .min_by_key(|&(_, d)| d);

        match closer {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance => {
                current_coord = closer_coord;
                current_distance = closer_distance;
                path.push(current_coord);
            }
            // No way of getting closer to the start, the distances do not belong to this grid.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}
