//! Backlight power policy.
//!
//! The panel backlight is the biggest consumer on the board, so it follows
//! the user's attention:
//! - Full: recently touched
//! - Dim: idle past the dim threshold
//! - Off: idle past the off threshold
//!
//! Evaluated every loop iteration regardless of menu or feature mode; any
//! accepted touch resets the idle time and the next evaluation restores full
//! brightness.

use crate::config::BACKLIGHT_DIM_PERCENT;
use crate::power_logic::{self, BacklightLevel};
use crate::settings::Settings;
use embedded_hal::pwm::SetDutyCycle;

/// Backlight driver seam.
pub trait Backlight {
    /// Set brightness as a duty cycle in percent (0 = off).
    fn set_percent(&mut self, percent: u8);
}

/// Backlight driven by any embedded-hal PWM channel.
pub struct PwmBacklight<P> {
    pwm: P,
}

impl<P: SetDutyCycle> PwmBacklight<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm }
    }
}

impl<P: SetDutyCycle> Backlight for PwmBacklight<P> {
    fn set_percent(&mut self, percent: u8) {
        if self.pwm.set_duty_cycle_percent(percent.min(100)).is_err() {
            warn!("Backlight: PWM update failed");
        }
    }
}

/// Power policy tracks the applied level and only touches the PWM when the
/// level or the configured brightness changes.
pub struct PowerPolicy {
    level: BacklightLevel,
    applied_percent: Option<u8>,
}

impl PowerPolicy {
    pub const fn new() -> Self {
        Self {
            level: BacklightLevel::Full,
            applied_percent: None,
        }
    }

    /// Current level.
    pub fn level(&self) -> BacklightLevel {
        self.level
    }

    /// True while the screen is dark and a touch should only wake it.
    pub fn is_off(&self) -> bool {
        self.level == BacklightLevel::Off
    }

    /// Evaluate the policy for `idle_ms` and drive the backlight.
    pub fn apply(
        &mut self,
        idle_ms: u64,
        settings: &Settings,
        backlight: &mut impl Backlight,
    ) -> BacklightLevel {
        let new_level = power_logic::backlight_level(idle_ms, settings.idle_thresholds);
        if new_level != self.level {
            info!("Power: {:?} -> {:?}", self.level, new_level);
            self.level = new_level;
        }

        let percent =
            power_logic::duty_percent(new_level, settings.brightness_percent, BACKLIGHT_DIM_PERCENT);
        if self.applied_percent != Some(percent) {
            backlight.set_percent(percent);
            self.applied_percent = Some(percent);
        }

        new_level
    }
}

impl Default for PowerPolicy {
    fn default() -> Self {
        Self::new()
    }
}
