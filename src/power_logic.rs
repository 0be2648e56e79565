/// Backlight intensity steps, ordered from darkest to brightest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BacklightLevel {
    Off,
    Dim,
    Full,
}

/// Idle durations at which the backlight steps down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IdleThresholds {
    pub dim_after_ms: u64,
    /// Must not be smaller than `dim_after_ms`.
    pub off_after_ms: u64,
}

impl IdleThresholds {
    /// Thresholds that never dim or switch off.
    pub const NEVER: Self = Self {
        dim_after_ms: u64::MAX,
        off_after_ms: u64::MAX,
    };
}

/// Decide the backlight level from idle time.
pub fn backlight_level(idle_ms: u64, thresholds: IdleThresholds) -> BacklightLevel {
    if idle_ms >= thresholds.off_after_ms {
        BacklightLevel::Off
    } else if idle_ms >= thresholds.dim_after_ms {
        BacklightLevel::Dim
    } else {
        BacklightLevel::Full
    }
}

/// Duty cycle (percent) written to the backlight PWM for a level.
pub fn duty_percent(level: BacklightLevel, full_percent: u8, dim_percent: u8) -> u8 {
    match level {
        BacklightLevel::Full => full_percent.min(100),
        // Dimmed never outshines the configured full level.
        BacklightLevel::Dim => dim_percent.min(full_percent).min(100),
        BacklightLevel::Off => 0,
    }
}
