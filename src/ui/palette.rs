//! Fixed RGB565 palette.

use embedded_graphics::pixelcolor::Rgb565;

pub const ORANGE: Rgb565 = Rgb565::new(31, 31, 4); // 0xFBE4
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16); // 0x8410
pub const BLUE: Rgb565 = Rgb565::new(0, 0, 31); // 0x001F
pub const RED: Rgb565 = Rgb565::new(31, 0, 0); // 0xF800
pub const GREEN: Rgb565 = Rgb565::new(0, 63, 0); // 0x07E0
pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0); // 0x0000
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31); // 0xFFFF
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(24, 48, 24); // 0xC618
pub const DARK_GRAY: Rgb565 = Rgb565::new(8, 16, 8); // 0x4208

pub const TFT_WHITE: Rgb565 = WHITE;
pub const TFT_DARKBLUE: Rgb565 = DARK_GRAY;
pub const TFT_GRAY: Rgb565 = GRAY;
pub const SELECTED_ICON_COLOR: Rgb565 = ORANGE;

/// Screen background.
pub const BACKGROUND: Rgb565 = BLACK;

/// Status bar strip.
pub const STATUS_BAR_BG: Rgb565 = DARK_GRAY;
