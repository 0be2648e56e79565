//! Tools: touch test and battery readout.

use super::{line, Feature, FeatureContext, Step};
use crate::battery::voltage_to_percent;
use crate::board::Platform;
use crate::config::BATTERY_SAMPLE_INTERVAL_MS;
use crate::ui::input_logic::{feature_region_at, FeatureRegion};
use crate::ui::palette::{GREEN, LIGHT_GRAY, ORANGE, RED, WHITE};
use crate::ui::Renderer;

/// Marks every accepted touch with a dot.
pub struct TouchTest {
    taps: u32,
}

impl TouchTest {
    pub fn setup<P: Platform, R: Renderer>(ctx: &mut FeatureContext<'_, P, R>) -> Self {
        ctx.ui.feature_frame(Feature::TouchTest.title());
        Self::draw_idle(ctx);
        Self { taps: 0 }
    }

    fn draw_idle<P: Platform, R: Renderer>(ctx: &mut FeatureContext<'_, P, R>) {
        ctx.ui.feature_line(0, "Tap anywhere", LIGHT_GRAY);
        ctx.ui.feature_actions(Some("Clear"), None);
    }

    pub fn taps(&self) -> u32 {
        self.taps
    }

    pub fn step<P: Platform, R: Renderer>(&mut self, ctx: &mut FeatureContext<'_, P, R>) -> Step {
        let Some(point) = ctx.touch else {
            return Step::Continue;
        };
        match feature_region_at(point) {
            FeatureRegion::ActionLeft => {
                ctx.ui.feature_frame(Feature::TouchTest.title());
                Self::draw_idle(ctx);
                self.taps = 0;
            }
            FeatureRegion::ActionRight => {}
            _ => {
                self.taps += 1;
                let text = line(format_args!("X:{} Y:{} #{}", point.x, point.y, self.taps));
                ctx.ui.feature_line(0, &text, WHITE);
                ctx.ui.feature_dot(point, GREEN);
            }
        }
        Step::Continue
    }
}

/// Live battery voltage and charge estimate.
pub struct BatteryView {
    shown: Option<Option<f32>>,
}

impl BatteryView {
    pub fn setup<P: Platform, R: Renderer>(ctx: &mut FeatureContext<'_, P, R>) -> Self {
        let mut view = Self { shown: None };
        ctx.ui.feature_frame(Feature::Battery.title());
        let text = line(format_args!(
            "Sampled every {} s",
            BATTERY_SAMPLE_INTERVAL_MS / 1000
        ));
        ctx.ui.feature_line(3, &text, LIGHT_GRAY);
        view.step(ctx);
        view
    }

    pub fn step<P: Platform, R: Renderer>(&mut self, ctx: &mut FeatureContext<'_, P, R>) -> Step {
        if self.shown == Some(ctx.battery) {
            return Step::Continue;
        }
        self.shown = Some(ctx.battery);

        match ctx.battery {
            Some(voltage) => {
                let percent = voltage_to_percent(voltage);
                let color = match percent {
                    0..=20 => RED,
                    21..=50 => ORANGE,
                    _ => GREEN,
                };
                ctx.ui
                    .feature_line(0, &line(format_args!("Voltage: {:.2} V", voltage)), WHITE);
                ctx.ui
                    .feature_line(1, &line(format_args!("Charge: {}%", percent)), color);
            }
            None => {
                ctx.ui.feature_line(0, "No reading", RED);
                ctx.ui.feature_line(1, "", WHITE);
            }
        }
        Step::Continue
    }
}
