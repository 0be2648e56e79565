//! User interface subsystem: 240x320 colour TFT with resistive touch.
//!
//! The navigation core never draws pixels itself. It calls into a
//! [`Renderer`], which on target is [`display::GraphicsRenderer`] over the
//! ILI9341 and in tests a recording mock.
//!
//! ## Components
//!
//! - **Layout**: shared geometry for drawing and hit testing
//! - **Input logic**: touch point to menu cell / row / feature region
//! - **Icons / palette**: 16x16 bitmaps and the RGB565 colour set

pub mod display;
pub mod icons;
pub mod input_logic;
pub mod layout;
pub mod palette;

use crate::menu::{Category, SubmenuEntry};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;

/// Drawing surface used by the device loop and the features.
pub trait Renderer {
    /// Full main menu grid with `selected` highlighted.
    fn display_menu(&mut self, selected: Category);

    /// Submenu list for `category`, row `selected` highlighted.
    fn display_submenu(&mut self, category: Category, entries: &[SubmenuEntry], selected: usize);

    /// Top strip; battery readout only when `show_battery` and a voltage is known.
    fn draw_status_bar(&mut self, voltage: Option<f32>, show_battery: bool);

    /// Splash screen in `color`.
    fn display_logo(&mut self, color: Rgb565);

    /// Progress bar at `origin`, `width` pixels wide, filled to `percent`.
    fn loading(&mut self, percent: u8, color: Rgb565, origin: Point, width: u32, show_text: bool);

    /// Clear the screen for a feature and draw its header with the exit label.
    fn feature_frame(&mut self, title: &str);

    /// Replace content line `row` with `text`.
    fn feature_line(&mut self, row: u8, text: &str, color: Rgb565);

    /// Bar graph, each value 0..=100 percent of the bar area height.
    fn feature_bars(&mut self, values: &[u8], color: Rgb565);

    /// Bottom action buttons; `None` leaves the slot empty.
    fn feature_actions(&mut self, left: Option<&str>, right: Option<&str>);

    /// Single marker at `point`.
    fn feature_dot(&mut self, point: Point, color: Rgb565);

    /// Transient message in the status bar.
    fn notice(&mut self, text: &str, color: Rgb565);
}
