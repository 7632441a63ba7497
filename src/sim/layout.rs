//! Brick grid layout
//!
//! Pure placement math. The same board dimensions always yield the same
//! placements, which is what lets a restart reproduce the opening grid.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::BrickClass;
use crate::consts::{BORDER_WIDTH_FRACTION, GRID_COLUMN_MARGIN, GRID_LEFT_INSET, MAX_GRID_BRICKS};

/// One brick's slot in the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickPlacement {
    pub class: BrickClass,
    pub row: u32,
    pub column: u32,
    /// Center position in scene space
    pub pos: Vec2,
}

/// Number of brick columns that fit inside the border, minus the safety margin.
///
/// Never negative: a board too narrow for the margin lays out no columns, and
/// non-finite dimensions lay out none either.
pub fn column_count(board_width: f32, brick_width: f32) -> u32 {
    if !(brick_width > 0.0) || !board_width.is_finite() || !brick_width.is_finite() {
        return 0;
    }
    let fitted = (board_width * BORDER_WIDTH_FRACTION / brick_width).floor() as i64;
    u32::try_from(fitted.saturating_sub(GRID_COLUMN_MARGIN).max(0)).unwrap_or(0)
}

/// Bricks one class lays out, without overflow
pub fn grid_size(columns: u32, row_count: u32) -> u64 {
    (u64::from(row_count) + 1) * u64::from(columns)
}

/// Lay out one class of bricks.
///
/// Rows run top-down from `vertical_offset` below the top edge, covering row
/// indices `0..=row_count`. Output is row-major.
pub fn generate_brick_grid(
    board: Vec2,
    brick_size: Vec2,
    class: BrickClass,
    row_count: u32,
    vertical_offset: f32,
) -> Vec<BrickPlacement> {
    let columns = column_count(board.x, brick_size.x);
    if columns == 0 {
        return Vec::new();
    }

    let left = -board.x / 2.0 + GRID_LEFT_INSET;
    let top = board.y / 2.0 - vertical_offset;

    let capacity = grid_size(columns, row_count).min(MAX_GRID_BRICKS);
    let mut placements = Vec::with_capacity(capacity as usize);
    for row in 0..=row_count {
        for column in 0..columns {
            placements.push(BrickPlacement {
                class,
                row,
                column,
                pos: Vec2::new(
                    left + brick_size.x * column as f32,
                    top - brick_size.y * row as f32,
                ),
            });
        }
    }
    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scenario_small_board() {
        let grid = generate_brick_grid(
            Vec2::new(400.0, 600.0),
            Vec2::new(50.0, 20.0),
            BrickClass::High,
            3,
            150.0,
        );
        // floor(400 * 0.88 / 50) - 2 = 5 columns, rows 0..=3
        assert_eq!(column_count(400.0, 50.0), 5);
        assert_eq!(grid.len(), 20);
        assert_eq!(grid[0].pos, Vec2::new(-100.0, 150.0));
        assert_eq!(grid[1].pos, Vec2::new(-50.0, 150.0));
        let last = grid.last().map(|p| (p.row, p.column, p.pos));
        assert_eq!(last, Some((3, 4, Vec2::new(100.0, 90.0))));
        assert!(grid.iter().all(|p| p.class == BrickClass::High));
    }

    #[test]
    fn test_default_board_columns() {
        // 750 * 0.88 = 660 -> 13 fitted, 11 after the margin
        assert_eq!(column_count(750.0, 50.0), 11);
    }

    #[test]
    fn test_narrow_board_yields_nothing() {
        assert_eq!(column_count(100.0, 50.0), 0);
        let grid = generate_brick_grid(
            Vec2::new(100.0, 600.0),
            Vec2::new(50.0, 20.0),
            BrickClass::Low,
            5,
            350.0,
        );
        assert!(grid.is_empty());
        assert_eq!(column_count(400.0, 0.0), 0);
    }

    #[test]
    fn test_degenerate_dimensions() {
        assert_eq!(column_count(f32::INFINITY, 50.0), 0);
        assert_eq!(column_count(f32::NAN, 50.0), 0);
        assert_eq!(column_count(400.0, f32::NAN), 0);
        assert_eq!(column_count(1.0e30, 1.0e-30), 0);
        assert_eq!(grid_size(11, u32::MAX), 11 * (u64::from(u32::MAX) + 1));
    }

    proptest! {
        #[test]
        fn prop_layout_is_deterministic(
            width in 100.0f32..2000.0,
            height in 100.0f32..3000.0,
            rows in 0u32..8,
            offset in 0.0f32..500.0,
        ) {
            let board = Vec2::new(width, height);
            let brick = Vec2::new(50.0, 20.0);
            let a = generate_brick_grid(board, brick, BrickClass::Medium, rows, offset);
            let b = generate_brick_grid(board, brick, BrickClass::Medium, rows, offset);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.len() as u32, column_count(width, 50.0) * (rows + 1));
        }
    }
}
