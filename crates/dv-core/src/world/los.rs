//! Line of sight (vision.c clear_path)
//!
//! Bresenham raycast shared by field of view and ranged attacks.

use crate::creature::Position;
use crate::world::grid::Grid;

/// Cells on the Bresenham line from `from` to `to`, both ends included
pub fn bresenham_line(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx - dy;

    let mut cells = Vec::with_capacity((dx.max(dy) + 1) as usize);
    let (mut x, mut y) = (from.x, from.y);
    loop {
        cells.push(Position::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    cells
}

/// True if no opaque cell lies strictly between `from` and `to`.
///
/// The endpoints themselves never block, so a wall is visible and an archer
/// standing in a doorway can still shoot.
pub fn has_line_of_sight<G: Grid + ?Sized>(grid: &G, from: Position, to: Position) -> bool {
    let line = bresenham_line(from, to);
    let interior = line.len().saturating_sub(1);
    line.iter()
        .take(interior)
        .skip(1)
        .all(|&p| !grid.is_opaque(p))
}
