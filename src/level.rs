// Procedural level layout: dirt and obstacle placement.

use crate::config;
use crate::error::LevelError;
use crate::grid::Position;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// The generated contents of one level.
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub dirt: HashSet<Position>,
    pub obstacles: HashSet<Position>,
}

/// Dirt cells for a level: grows with the level number, capped at a fixed
/// fraction of the board.
pub fn dirt_count(level: u32, grid_size: i32) -> usize {
    let total_cells = (grid_size * grid_size) as f32;
    let cap = (total_cells * config::DIRT_DENSITY_CAP).floor() as usize;
    ((config::BASE_DIRT_COUNT + level) as usize).min(cap)
}

/// Obstacle cells for a level, on the same growth-with-cap scheme.
pub fn obstacle_count(level: u32, grid_size: i32) -> usize {
    let total_cells = (grid_size * grid_size) as f32;
    let cap = (total_cells * config::OBSTACLE_DENSITY_CAP).floor() as usize;
    ((config::BASE_OBSTACLE_COUNT + level) as usize).min(cap)
}

/// Generate the layout for `level` on a `grid_size` board.
pub fn generate<R: Rng>(
    level: u32,
    grid_size: i32,
    rng: &mut R,
) -> Result<LevelLayout, LevelError> {
    let layout = place(
        dirt_count(level, grid_size),
        obstacle_count(level, grid_size),
        grid_size,
        rng,
    )?;

    log::info!(
        "Generated level {}: {} dirt, {} obstacles on a {}x{} grid",
        level,
        layout.dirt.len(),
        layout.obstacles.len(),
        grid_size,
        grid_size
    );

    Ok(layout)
}

/// Place the requested dirt and obstacle counts on the board.
///
/// Every cell except the spawn goes into one shuffled pool and the dirt and
/// obstacle sets are split off the front, so the draw is uniform, the two
/// sets never overlap, and placement terminates no matter how crowded the
/// board gets. A request that cannot fit is an error, never a silent retry.
fn place<R: Rng>(
    dirt_target: usize,
    obstacle_target: usize,
    grid_size: i32,
    rng: &mut R,
) -> Result<LevelLayout, LevelError> {
    if dirt_target == 0 {
        return Err(LevelError::GridTooSmall(grid_size));
    }

    let mut pool: Vec<Position> = Vec::with_capacity((grid_size * grid_size - 1) as usize);
    for y in 0..grid_size {
        for x in 0..grid_size {
            let cell = Position::new(x, y);
            if cell != Position::START {
                pool.push(cell);
            }
        }
    }

    if dirt_target + obstacle_target > pool.len() {
        return Err(LevelError::Unsatisfiable {
            needed: dirt_target + obstacle_target,
            available: pool.len(),
        });
    }

    pool.shuffle(rng);
    let dirt: HashSet<Position> = pool[..dirt_target].iter().copied().collect();
    let obstacles: HashSet<Position> = pool[dirt_target..dirt_target + obstacle_target]
        .iter()
        .copied()
        .collect();

    Ok(LevelLayout { dirt, obstacles })
}
