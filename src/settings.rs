//! Runtime settings edited from the Settings category.

use crate::config::{BACKLIGHT_DIM_AFTER_MS, BACKLIGHT_FULL_PERCENT, BACKLIGHT_OFF_AFTER_MS};
use crate::power_logic::IdleThresholds;

/// Screen timeout presets, in the order the Screen Timeout feature cycles
/// through them.
pub const TIMEOUT_PRESETS: [IdleThresholds; 4] = [
    IdleThresholds {
        dim_after_ms: 15_000,
        off_after_ms: 30_000,
    },
    IdleThresholds {
        dim_after_ms: BACKLIGHT_DIM_AFTER_MS,
        off_after_ms: BACKLIGHT_OFF_AFTER_MS,
    },
    IdleThresholds {
        dim_after_ms: 60_000,
        off_after_ms: 180_000,
    },
    IdleThresholds::NEVER,
];

/// Brightness presets (percent) cycled by the Brightness feature.
pub const BRIGHTNESS_PRESETS: [u8; 4] = [BACKLIGHT_FULL_PERCENT, 75, 50, 25];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub idle_thresholds: IdleThresholds,
    /// Duty cycle used at full brightness.
    pub brightness_percent: u8,
}

impl Settings {
    /// Index of the active timeout preset, if it matches one.
    pub fn timeout_preset(&self) -> Option<usize> {
        TIMEOUT_PRESETS
            .iter()
            .position(|preset| *preset == self.idle_thresholds)
    }

    /// Advance to the next screen timeout preset.
    pub fn cycle_timeout(&mut self) {
        let next = self
            .timeout_preset()
            .map_or(0, |i| (i + 1) % TIMEOUT_PRESETS.len());
        self.idle_thresholds = TIMEOUT_PRESETS[next];
    }

    /// Advance to the next brightness preset.
    pub fn cycle_brightness(&mut self) {
        let next = BRIGHTNESS_PRESETS
            .iter()
            .position(|p| *p == self.brightness_percent)
            .map_or(0, |i| (i + 1) % BRIGHTNESS_PRESETS.len());
        self.brightness_percent = BRIGHTNESS_PRESETS[next];
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            idle_thresholds: TIMEOUT_PRESETS[1],
            brightness_percent: BACKLIGHT_FULL_PERCENT,
        }
    }
}
