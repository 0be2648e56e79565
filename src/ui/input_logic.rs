//! Touch hit testing against the screen layout.

use crate::menu::NUM_MENU_ITEMS;
use crate::ui::layout;
use embedded_graphics::prelude::Point;
use embedded_graphics::primitives::ContainsPoint;

/// Regions of a feature screen a touch can land in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeatureRegion {
    /// Reserved exit gesture ("< Back" in the header).
    Exit,
    ActionLeft,
    ActionRight,
    /// Content line, counted from the top of the content area.
    Line(u8),
    /// Anywhere else.
    Canvas,
}

/// Main menu cell under `point`, if any.
pub fn menu_cell_at(point: Point) -> Option<usize> {
    (0..NUM_MENU_ITEMS).find(|&i| layout::menu_cell(i).contains(point))
}

/// Submenu row under `point` for a list of `len` rows, if any.
pub fn submenu_row_at(point: Point, len: usize) -> Option<usize> {
    (0..len).find(|&i| layout::submenu_row(i).contains(point))
}

/// Classify a touch on a feature screen.
pub fn feature_region_at(point: Point) -> FeatureRegion {
    if layout::FEATURE_EXIT.contains(point) {
        FeatureRegion::Exit
    } else if layout::ACTION_LEFT.contains(point) {
        FeatureRegion::ActionLeft
    } else if layout::ACTION_RIGHT.contains(point) {
        FeatureRegion::ActionRight
    } else if point.y >= layout::CONTENT_TOP {
        let row = (point.y - layout::CONTENT_TOP) / layout::LINE_HEIGHT;
        if row < layout::MAX_LINES as i32 {
            FeatureRegion::Line(row as u8)
        } else {
            FeatureRegion::Canvas
        }
    } else {
        FeatureRegion::Canvas
    }
}
