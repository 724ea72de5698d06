//! Grid raycast used for line-of-sight tests between navigation points.
//!
//! Walks every tile the pixel-space segment touches (a supercover DDA over
//! the occupancy grid). Sight is blocked as soon as any touched tile is
//! occupied, including the endpoints' own tiles. Exact corner crossings are
//! treated conservatively: a segment grazing the shared corner of two tiles
//! is blocked if either tile is occupied.

use bevy::prelude::*;

use crate::level::{BRICK_SIZE, TileGrid};

/// True when the straight segment from `from` to `to` (pixel coordinates)
/// crosses no occupied tile.
pub fn line_of_sight(grid: &TileGrid, from: Vec2, to: Vec2) -> bool {
    // Tile (x, y) is centred on pixel (x, y) * BRICK_SIZE, so in grid space
    // (pixels / BRICK_SIZE + 0.5) it spans exactly [x, x+1) on both axes.
    let a = from / BRICK_SIZE + Vec2::splat(0.5);
    let b = to / BRICK_SIZE + Vec2::splat(0.5);

    let mut cell = IVec2::new(a.x.floor() as i32, a.y.floor() as i32);
    let end = IVec2::new(b.x.floor() as i32, b.y.floor() as i32);

    if grid.occupied(cell) {
        return false;
    }

    let delta = b - a;
    let step = IVec2::new(
        if delta.x > 0.0 { 1 } else if delta.x < 0.0 { -1 } else { 0 },
        if delta.y > 0.0 { 1 } else if delta.y < 0.0 { -1 } else { 0 },
    );

    // Segment parameter t in [0, 1] at which the ray first crosses the next
    // cell boundary on each axis, and the t advance per full cell.
    let mut t_max_x = if step.x != 0 {
        let boundary = (cell.x + if step.x > 0 { 1 } else { 0 }) as f32;
        (boundary - a.x) / delta.x
    } else {
        f32::INFINITY
    };
    let mut t_max_y = if step.y != 0 {
        let boundary = (cell.y + if step.y > 0 { 1 } else { 0 }) as f32;
        (boundary - a.y) / delta.y
    } else {
        f32::INFINITY
    };
    let t_delta_x = if step.x != 0 { 1.0 / delta.x.abs() } else { f32::INFINITY };
    let t_delta_y = if step.y != 0 { 1.0 / delta.y.abs() } else { f32::INFINITY };

    let max_steps = (end.x - cell.x).abs() + (end.y - cell.y).abs();
    for _ in 0..=max_steps {
        if cell == end {
            return true;
        }

        if t_max_x < t_max_y {
            cell.x += step.x;
            t_max_x += t_delta_x;
        } else if t_max_y < t_max_x {
            cell.y += step.y;
            t_max_y += t_delta_y;
        } else {
            // Exact corner crossing: the segment grazes both orthogonal
            // neighbours before entering the diagonal cell.
            if grid.occupied(cell + IVec2::new(step.x, 0))
                || grid.occupied(cell + IVec2::new(0, step.y))
            {
                return false;
            }
            cell += step;
            t_max_x += t_delta_x;
            t_max_y += t_delta_y;
        }

        if grid.occupied(cell) {
            return false;
        }
    }

    // Accumulated float error kept the walk from landing on the end cell;
    // report blocked rather than guessing.
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::to_pixel_position;

    fn grid_with_walls(width: u32, height: u32, walls: &[(i32, i32)]) -> TileGrid {
        let mut grid = TileGrid::new(width, height);
        for &(x, y) in walls {
            grid.set_occupied(IVec2::new(x, y));
        }
        grid
    }

    fn centre(x: i32, y: i32) -> Vec2 {
        to_pixel_position(IVec2::new(x, y))
    }

    #[test]
    fn test_clear_horizontal_line() {
        let grid = grid_with_walls(5, 5, &[]);
        assert!(line_of_sight(&grid, centre(0, 2), centre(4, 2)));
    }

    #[test]
    fn test_wall_blocks_horizontal_line() {
        let grid = grid_with_walls(5, 5, &[(2, 2)]);
        assert!(!line_of_sight(&grid, centre(0, 2), centre(4, 2)));
    }

    #[test]
    fn test_wall_beside_the_line_does_not_block() {
        let grid = grid_with_walls(5, 5, &[(2, 1)]);
        assert!(line_of_sight(&grid, centre(0, 2), centre(4, 2)));
    }

    #[test]
    fn test_vertical_line() {
        let grid = grid_with_walls(3, 6, &[(1, 3)]);
        assert!(!line_of_sight(&grid, centre(1, 0), centre(1, 5)));
        assert!(line_of_sight(&grid, centre(0, 0), centre(0, 5)));
    }

    #[test]
    fn test_diagonal_line_through_open_space() {
        let grid = grid_with_walls(5, 5, &[]);
        assert!(line_of_sight(&grid, centre(0, 0), centre(4, 4)));
    }

    #[test]
    fn test_diagonal_blocked_by_cell_on_the_diagonal() {
        let grid = grid_with_walls(5, 5, &[(2, 2)]);
        assert!(!line_of_sight(&grid, centre(0, 0), centre(4, 4)));
    }

    #[test]
    fn test_corner_pinch_blocks_diagonal() {
        // Walls at (1,0) and (0,1): the exact corner between (0,0) and (1,1)
        // is a pinch the segment may not squeeze through.
        let grid = grid_with_walls(3, 3, &[(1, 0), (0, 1)]);
        assert!(!line_of_sight(&grid, centre(0, 0), centre(2, 2)));
    }

    #[test]
    fn test_occupied_endpoint_blocks_sight() {
        let grid = grid_with_walls(3, 3, &[(0, 0)]);
        assert!(!line_of_sight(&grid, centre(0, 0), centre(2, 0)));
        assert!(!line_of_sight(&grid, centre(2, 0), centre(0, 0)));
    }

    #[test]
    fn test_same_point_sees_itself() {
        let grid = grid_with_walls(3, 3, &[]);
        assert!(line_of_sight(&grid, centre(1, 1), centre(1, 1)));
    }

    #[test]
    fn test_off_grid_space_is_open() {
        let grid = grid_with_walls(2, 2, &[]);
        assert!(line_of_sight(&grid, centre(0, 0), centre(5, 0)));
    }
}
