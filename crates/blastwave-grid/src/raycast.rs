//! Cell traversal along a segment.
//!
//! Bresenham walk over integer grid coordinates, visiting every cell from the
//! start cell to the end cell inclusive, in order.

/// Visit each cell on the line from `(x0, y0)` to `(x1, y1)`.
///
/// The visitor returns `true` to stop early. Returns `true` if the walk was
/// stopped by the visitor, `false` if it reached the end cell.
pub fn raycast_cells(
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    mut visitor: impl FnMut(i32, i32) -> bool,
) -> bool {
    let dx = (x1 as i64 - x0 as i64).abs();
    let dy = (y1 as i64 - y0 as i64).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        if visitor(x, y) {
            return true;
        }
        if x == x1 && y == y1 {
            return false;
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
}
