//! Seeded random layouts of exits and obstacles
//!
//! Layouts are produced as operation lists so they can be replayed in any
//! order, written out as scripts, or applied straight to a board.

use rand::seq::SliceRandom;
use rand::{SeedableRng, rngs::StdRng};

use crate::algorithm::operation::Operation;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::Position;

/// Generate exits and obstacles on distinct cells of a `width` x `height` grid
///
/// `exit_count` cells become exits; `obstacle_density` of the remaining cells
/// become obstacles. Exits come first in the returned list. The same seed
/// always yields the same layout.
///
/// # Errors
///
/// Returns `InvalidParameter` if a dimension is zero or above
/// `MAX_GRID_DIMENSION`, there are more exits than cells, or the density lies
/// outside `0.0..=1.0`
pub fn random_operations(
    width: usize,
    height: usize,
    exit_count: usize,
    obstacle_density: f64,
    seed: u64,
) -> Result<Vec<Operation>> {
    for (parameter, value) in [("width", width), ("height", height)] {
        if value == 0 {
            return Err(invalid_parameter(parameter, &value, &"must be positive"));
        }
        if value > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                parameter,
                &value,
                &format!("must not exceed {MAX_GRID_DIMENSION}"),
            ));
        }
    }
    let cell_count = width.checked_mul(height).ok_or_else(|| {
        invalid_parameter(
            "dimensions",
            &format!("{width}x{height}"),
            &"cell count overflows",
        )
    })?;
    if exit_count > cell_count {
        return Err(invalid_parameter(
            "exit_count",
            &exit_count,
            &format!("grid only has {cell_count} cells"),
        ));
    }
    if !(0.0..=1.0).contains(&obstacle_density) {
        return Err(invalid_parameter(
            "obstacle_density",
            &obstacle_density,
            &"must lie between 0 and 1",
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut cells: Vec<Position> = (0..height)
        .flat_map(|y| (0..width).map(move |x| [x, y]))
        .collect();
    cells.shuffle(&mut rng);

    let (exits, rest) = cells.split_at(exit_count);
    let obstacle_count = (rest.len() as f64 * obstacle_density).round() as usize;

    Ok(exits
        .iter()
        .map(|&pos| Operation::AddExit(pos))
        .chain(
            rest.iter()
                .take(obstacle_count)
                .map(|&pos| Operation::AddObstacle(pos)),
        )
        .collect())
}
