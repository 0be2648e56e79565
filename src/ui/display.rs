//! embedded-graphics renderer for the 240x320 RGB565 panel.

use core::fmt::Write;

use crate::battery::voltage_to_percent;
use crate::config::FIRMWARE_NAME;
use crate::menu::{Category, SubmenuEntry};
use crate::ui::icons::{Icon, ICON_SIZE};
use crate::ui::layout;
use crate::ui::palette::{
    BACKGROUND, DARK_GRAY, GRAY, GREEN, LIGHT_GRAY, ORANGE, RED, SELECTED_ICON_COLOR,
    STATUS_BAR_BG, WHITE,
};
use crate::ui::Renderer;
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

const MENU_ICON_SCALE: u32 = 2;
const LOADING_BAR_HEIGHT: u32 = 10;

/// Renders onto any RGB565 draw target (the ILI9341 on target).
///
/// Draw errors are ignored: a failed SPI write leaves a stale frame, and the
/// next redraw replaces it.
pub struct GraphicsRenderer<D> {
    target: D,
}

impl<D> GraphicsRenderer<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Give the draw target back.
    pub fn release(self) -> D {
        self.target
    }

    fn fill(&mut self, area: &Rectangle, color: Rgb565) {
        let _ = self.target.fill_solid(area, color);
    }

    fn outline(&mut self, area: &Rectangle, color: Rgb565) {
        let _ = area
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target);
    }

    /// Clear everything below the status bar.
    fn clear_body(&mut self) {
        let top = layout::STATUS_BAR_HEIGHT;
        let body = Rectangle::new(
            Point::new(0, top as i32),
            Size::new(
                self.target.bounding_box().size.width,
                self.target.bounding_box().size.height.saturating_sub(top),
            ),
        );
        self.fill(&body, BACKGROUND);
    }

    fn text(&mut self, text: &str, position: Point, font: &MonoFont<'_>, color: Rgb565) {
        let style = MonoTextStyle::new(font, color);
        let _ = Text::with_baseline(text, position, style, Baseline::Top).draw(&mut self.target);
    }

    fn text_centered(&mut self, text: &str, center: Point, font: &MonoFont<'_>, color: Rgb565) {
        let style = MonoTextStyle::new(font, color);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        let _ = Text::with_text_style(text, center, style, text_style).draw(&mut self.target);
    }

    fn icon(&mut self, icon: &Icon, origin: Point, scale: u32, color: Rgb565) {
        for y in 0..ICON_SIZE {
            for x in 0..ICON_SIZE {
                if icon.is_set(x, y) {
                    let pixel = Rectangle::new(
                        origin + Point::new((x * scale) as i32, (y * scale) as i32),
                        Size::new(scale, scale),
                    );
                    self.fill(&pixel, color);
                }
            }
        }
    }

    fn action_button(&mut self, area: &Rectangle, label: Option<&str>) {
        self.fill(area, BACKGROUND);
        if let Some(label) = label {
            self.fill(area, DARK_GRAY);
            self.outline(area, GRAY);
            self.text_centered(label, area.center(), &FONT_9X15, WHITE);
        }
    }
}

impl<D> Renderer for GraphicsRenderer<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn display_menu(&mut self, selected: Category) {
        self.clear_body();
        let icon_px = (ICON_SIZE * MENU_ICON_SCALE) as i32;

        for category in Category::ALL {
            let cell = layout::menu_cell(category.index());
            let highlighted = category == selected;
            let (frame, icon_color) = if highlighted {
                (ORANGE, SELECTED_ICON_COLOR)
            } else {
                (GRAY, WHITE)
            };

            self.outline(&cell, frame);
            let icon_origin = Point::new(cell.center().x - icon_px / 2, cell.top_left.y + 12);
            self.icon(category.icon(), icon_origin, MENU_ICON_SCALE, icon_color);
            let label_at = Point::new(cell.center().x, cell.top_left.y + 62);
            self.text_centered(category.label(), label_at, &FONT_6X10, WHITE);
        }
    }

    fn display_submenu(&mut self, category: Category, entries: &[SubmenuEntry], selected: usize) {
        self.clear_body();
        self.text_centered(
            category.label(),
            layout::SUBMENU_TITLE.center(),
            &FONT_9X15,
            ORANGE,
        );

        for (i, entry) in entries.iter().enumerate() {
            let row = layout::submenu_row(i);
            if i == selected {
                self.fill(&row, DARK_GRAY);
                self.outline(&row, ORANGE);
            } else {
                self.outline(&row, GRAY);
            }
            let color = if i == selected { SELECTED_ICON_COLOR } else { WHITE };
            self.icon(entry.icon, row.top_left + Point::new(8, 8), 1, color);
            self.text(entry.label, row.top_left + Point::new(34, 9), &FONT_9X15, WHITE);
        }
    }

    fn draw_status_bar(&mut self, voltage: Option<f32>, show_battery: bool) {
        self.fill(&layout::STATUS_BAR, STATUS_BAR_BG);
        self.text(FIRMWARE_NAME, Point::new(4, 5), &FONT_6X10, WHITE);

        let Some(voltage) = voltage.filter(|_| show_battery) else {
            return;
        };
        let percent = voltage_to_percent(voltage);
        let mut label: heapless::String<16> = heapless::String::new();
        let _ = write!(label, "{:.2}V {}%", voltage, percent);
        self.text(label.as_str(), Point::new(120, 5), &FONT_6X10, WHITE);

        // Battery glyph: 24x10 body with a 2px terminal.
        let body = Rectangle::new(Point::new(206, 5), Size::new(24, 10));
        self.outline(&body, WHITE);
        self.fill(&Rectangle::new(Point::new(230, 8), Size::new(2, 4)), WHITE);
        let fill_width = 22 * percent as u32 / 100;
        let level_color = match percent {
            0..=20 => RED,
            21..=50 => ORANGE,
            _ => GREEN,
        };
        self.fill(
            &Rectangle::new(Point::new(207, 6), Size::new(fill_width, 8)),
            level_color,
        );
    }

    fn display_logo(&mut self, color: Rgb565) {
        let _ = self.target.clear(BACKGROUND);
        let center = self.target.bounding_box().center();
        self.text_centered(FIRMWARE_NAME, center - Point::new(0, 20), &FONT_10X20, color);
        self.text_centered("multi-tool", center + Point::new(0, 6), &FONT_6X10, LIGHT_GRAY);
    }

    fn loading(&mut self, percent: u8, color: Rgb565, origin: Point, width: u32, show_text: bool) {
        let percent = percent.min(100);
        let frame = Rectangle::new(origin, Size::new(width, LOADING_BAR_HEIGHT));
        self.outline(&frame, GRAY);
        let inner = width.saturating_sub(2) * percent as u32 / 100;
        self.fill(
            &Rectangle::new(
                origin + Point::new(1, 1),
                Size::new(inner, LOADING_BAR_HEIGHT - 2),
            ),
            color,
        );

        if show_text {
            let label_area = Rectangle::new(
                origin + Point::new(0, LOADING_BAR_HEIGHT as i32 + 4),
                Size::new(width, 12),
            );
            self.fill(&label_area, BACKGROUND);
            let mut label: heapless::String<8> = heapless::String::new();
            let _ = write!(label, "{}%", percent);
            self.text_centered(label.as_str(), label_area.center(), &FONT_6X10, WHITE);
        }
    }

    fn feature_frame(&mut self, title: &str) {
        self.clear_body();
        self.fill(&layout::FEATURE_HEADER, DARK_GRAY);
        self.text_centered("< Back", layout::FEATURE_EXIT.center(), &FONT_6X10, ORANGE);
        self.text_centered(title, layout::FEATURE_HEADER.center(), &FONT_9X15, WHITE);
    }

    fn feature_line(&mut self, row: u8, text: &str, color: Rgb565) {
        if row >= layout::MAX_LINES {
            return;
        }
        let line = layout::content_line(row);
        self.fill(&line, BACKGROUND);
        self.text(text, line.top_left + Point::new(6, 2), &FONT_9X15, color);
    }

    fn feature_bars(&mut self, values: &[u8], color: Rgb565) {
        let area = layout::BARS_AREA;
        self.fill(&area, BACKGROUND);
        if values.is_empty() {
            return;
        }

        let bar_width = (area.size.width / values.len() as u32).max(1);
        let bottom = area.top_left.y + area.size.height as i32;
        for (i, value) in values.iter().enumerate() {
            let height = area.size.height * (*value).min(100) as u32 / 100;
            if height == 0 {
                continue;
            }
            let x = area.top_left.x + (i as u32 * bar_width) as i32;
            let bar = Rectangle::new(
                Point::new(x, bottom - height as i32),
                Size::new(bar_width.saturating_sub(1).max(1), height),
            );
            self.fill(&bar, color);
        }
    }

    fn feature_actions(&mut self, left: Option<&str>, right: Option<&str>) {
        self.action_button(&layout::ACTION_LEFT, left);
        self.action_button(&layout::ACTION_RIGHT, right);
    }

    fn feature_dot(&mut self, point: Point, color: Rgb565) {
        self.fill(&Rectangle::with_center(point, Size::new(3, 3)), color);
    }

    fn notice(&mut self, text: &str, color: Rgb565) {
        self.fill(&layout::STATUS_BAR, STATUS_BAR_BG);
        self.text(text, Point::new(4, 5), &FONT_6X10, color);
    }
}
