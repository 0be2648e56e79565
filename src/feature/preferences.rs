//! Settings features: each one cycles a preset in [`Settings`].
//!
//! Changes take effect on the next power policy evaluation, which happens
//! at the end of the same loop iteration.

use super::{line, Feature, FeatureContext, Step};
use crate::board::Platform;
use crate::config::BACKLIGHT_DIM_PERCENT;
use crate::power_logic::IdleThresholds;
use crate::settings::Settings;
use crate::ui::input_logic::{feature_region_at, FeatureRegion};
use crate::ui::palette::{LIGHT_GRAY, WHITE};
use crate::ui::Renderer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Kind {
    ScreenTimeout,
    Brightness,
}

pub struct Preference {
    kind: Kind,
}

impl Preference {
    pub fn setup<P: Platform, R: Renderer>(ctx: &mut FeatureContext<'_, P, R>, kind: Kind) -> Self {
        let preference = Self { kind };
        let feature = match kind {
            Kind::ScreenTimeout => Feature::ScreenTimeout,
            Kind::Brightness => Feature::Brightness,
        };
        ctx.ui.feature_frame(feature.title());
        preference.draw(ctx);
        ctx.ui.feature_actions(Some("Change"), None);
        preference
    }

    fn draw<P: Platform, R: Renderer>(&self, ctx: &mut FeatureContext<'_, P, R>) {
        let settings: &Settings = ctx.settings;
        match self.kind {
            Kind::ScreenTimeout => {
                let thresholds = settings.idle_thresholds;
                if thresholds == IdleThresholds::NEVER {
                    ctx.ui.feature_line(0, "Always on", WHITE);
                    ctx.ui.feature_line(1, "", WHITE);
                } else {
                    let dim = line(format_args!("Dim after {} s", thresholds.dim_after_ms / 1000));
                    let off = line(format_args!("Off after {} s", thresholds.off_after_ms / 1000));
                    ctx.ui.feature_line(0, &dim, WHITE);
                    ctx.ui.feature_line(1, &off, WHITE);
                }
            }
            Kind::Brightness => {
                let level = line(format_args!("Level: {}%", settings.brightness_percent));
                let dim = line(format_args!("Dimmed: {}%", BACKLIGHT_DIM_PERCENT));
                ctx.ui.feature_line(0, &level, WHITE);
                ctx.ui.feature_line(1, &dim, LIGHT_GRAY);
            }
        }
    }

    pub fn step<P: Platform, R: Renderer>(&mut self, ctx: &mut FeatureContext<'_, P, R>) -> Step {
        let touched_change = ctx
            .touch
            .is_some_and(|p| feature_region_at(p) == FeatureRegion::ActionLeft);
        if !touched_change {
            return Step::Continue;
        }

        match self.kind {
            Kind::ScreenTimeout => ctx.settings.cycle_timeout(),
            Kind::Brightness => ctx.settings.cycle_brightness(),
        }
        info!("Settings: {} -> {}", self.kind, *ctx.settings);
        self.draw(ctx);
        Step::Continue
    }
}
