//! Screen geometry shared by the renderer and the touch hit tests.
//!
//! ```text
//!  0 +------------------------------+
//!    | status bar                   |
//! 20 +------------------------------+
//!    | title / "< Back" header      |
//!    | content (grid, rows, lines)  |
//!    |                              |
//!    | [ action left ][action right]|
//! 320+------------------------------+
//! ```

use crate::config::SCREEN_WIDTH;
use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

pub const STATUS_BAR_HEIGHT: u32 = 20;
pub const STATUS_BAR: Rectangle =
    Rectangle::new(Point::new(0, 0), Size::new(SCREEN_WIDTH, STATUS_BAR_HEIGHT));

// Main menu grid (2 columns)

pub const MENU_COLUMNS: usize = 2;
pub const MENU_X: [i32; MENU_COLUMNS] = [20, 130];
pub const MENU_Y_START: i32 = 40;
pub const MENU_Y_SPACING: i32 = 90;
pub const MENU_CELL_SIZE: Size = Size::new(90, 80);

/// Bounds of main menu cell `index`.
pub const fn menu_cell(index: usize) -> Rectangle {
    let column = index % MENU_COLUMNS;
    let row = (index / MENU_COLUMNS) as i32;
    Rectangle::new(
        Point::new(MENU_X[column], MENU_Y_START + row * MENU_Y_SPACING),
        MENU_CELL_SIZE,
    )
}

// Submenu list

pub const SUBMENU_TITLE: Rectangle = Rectangle::new(
    Point::new(0, STATUS_BAR_HEIGHT as i32),
    Size::new(SCREEN_WIDTH, 30),
);
pub const SUBMENU_Y_START: i32 = 56;
pub const SUBMENU_ROW_SPACING: i32 = 36;
pub const SUBMENU_ROW_SIZE: Size = Size::new(220, 32);

/// Bounds of submenu row `index`.
pub const fn submenu_row(index: usize) -> Rectangle {
    Rectangle::new(
        Point::new(10, SUBMENU_Y_START + index as i32 * SUBMENU_ROW_SPACING),
        SUBMENU_ROW_SIZE,
    )
}

// Feature screens

pub const FEATURE_HEADER: Rectangle = Rectangle::new(
    Point::new(0, STATUS_BAR_HEIGHT as i32),
    Size::new(SCREEN_WIDTH, 28),
);

/// Reserved exit gesture region: the "< Back" label in the header.
pub const FEATURE_EXIT: Rectangle =
    Rectangle::new(Point::new(0, STATUS_BAR_HEIGHT as i32), Size::new(64, 28));

pub const CONTENT_TOP: i32 = 56;
pub const LINE_HEIGHT: i32 = 18;
pub const MAX_LINES: u8 = 11;

/// Bounds of content line `row`.
pub const fn content_line(row: u8) -> Rectangle {
    Rectangle::new(
        Point::new(0, CONTENT_TOP + row as i32 * LINE_HEIGHT),
        Size::new(SCREEN_WIDTH, LINE_HEIGHT as u32),
    )
}

/// Bar graph area; lines 0..=4 stay free above it.
pub const BARS_AREA: Rectangle = Rectangle::new(Point::new(8, 150), Size::new(224, 100));

pub const ACTION_LEFT: Rectangle = Rectangle::new(Point::new(10, 270), Size::new(105, 40));
pub const ACTION_RIGHT: Rectangle = Rectangle::new(Point::new(125, 270), Size::new(105, 40));
