use rand::Rng;
use thiserror::Error;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Random draws tried before falling back to enumerating free cells.
const MAX_REJECTION_ATTEMPTS: usize = 32;

/// Failure to place food.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SpawnError {
    #[error("no free cell left on a {width}x{height} board")]
    BoardFull { width: u16, height: u16 },
}

/// Picks a uniformly random cell that the snake does not occupy.
///
/// While at least half of the board is free, plain rejection sampling is
/// used (fewer than two draws expected, capped at a fixed attempt count).
/// Crowded boards enumerate the free cells and sample an index, so the call
/// terminates however few cells remain.
pub fn generate_food<R: Rng + ?Sized>(
    rng: &mut R,
    snake: &Snake,
    bounds: GridSize,
) -> Result<Position, SpawnError> {
    let total = bounds.total_cells();
    let free = total.saturating_sub(snake.len());
    if free == 0 {
        return Err(SpawnError::BoardFull {
            width: bounds.width,
            height: bounds.height,
        });
    }

    if free * 2 >= total {
        for _ in 0..MAX_REJECTION_ATTEMPTS {
            let candidate = Position {
                x: rng.gen_range(0..i32::from(bounds.width)),
                y: rng.gen_range(0..i32::from(bounds.height)),
            };
            if !snake.occupies(candidate) {
                return Ok(candidate);
            }
        }
    }

    let candidates = free_cells(snake, bounds);
    if candidates.is_empty() {
        return Err(SpawnError::BoardFull {
            width: bounds.width,
            height: bounds.height,
        });
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}

/// Lists every cell not covered by the snake, row by row.
#[must_use]
pub fn free_cells(snake: &Snake, bounds: GridSize) -> Vec<Position> {
    let mut cells = Vec::with_capacity(bounds.total_cells().saturating_sub(snake.len()));

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !snake.occupies(position) {
                cells.push(position);
            }
        }
    }

    cells
}
