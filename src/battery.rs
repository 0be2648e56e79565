//! Battery telemetry.
//!
//! The ADC sample is noisy enough that the raw value would make the status
//! bar flicker, so the published voltage is an exponential moving average.
//! Failed or implausible reads never reach the average; the last good value
//! stays published instead.

use crate::config::{
    BATTERY_EMA_ALPHA, BATTERY_EMPTY_V, BATTERY_FULL_V, BATTERY_MAX_VALID_MV,
    BATTERY_MIN_VALID_MV, BATTERY_REDRAW_DELTA_V, BATTERY_SAMPLE_INTERVAL_MS,
};

/// Source of raw battery readings.
pub trait BatterySensor {
    /// Battery voltage in millivolts, or `None` when the conversion failed.
    fn read_millivolts(&mut self) -> Option<u16>;
}

/// Filtered battery voltage.
#[derive(Clone, Debug, PartialEq)]
pub struct BatteryMonitor {
    voltage: Option<f32>,
    /// Value last reported as changed, used for redraw hysteresis.
    reported: Option<f32>,
    next_sample_ms: u64,
}

impl BatteryMonitor {
    pub const fn new() -> Self {
        Self {
            voltage: None,
            reported: None,
            next_sample_ms: 0,
        }
    }

    /// Filtered voltage, `None` until the first good sample.
    pub fn voltage(&self) -> Option<f32> {
        self.voltage
    }

    /// Charge estimate for the status bar.
    pub fn percent(&self) -> Option<u8> {
        self.voltage.map(voltage_to_percent)
    }

    /// Sample the sensor if the sample interval has elapsed.
    ///
    /// Returns `true` when the published voltage moved far enough for the
    /// status bar to be redrawn.
    pub fn update(&mut self, sensor: &mut impl BatterySensor, now_ms: u64) -> bool {
        if now_ms < self.next_sample_ms {
            return false;
        }
        self.next_sample_ms = now_ms + BATTERY_SAMPLE_INTERVAL_MS;

        match sensor.read_millivolts() {
            Some(mv) => self.push_sample(mv),
            None => {
                warn!("Battery: read failed, holding {}", self.voltage);
                false
            }
        }
    }

    /// Feed one raw sample into the filter.
    pub fn push_sample(&mut self, millivolts: u16) -> bool {
        if !(BATTERY_MIN_VALID_MV..=BATTERY_MAX_VALID_MV).contains(&millivolts) {
            warn!("Battery: rejecting out-of-range sample {} mV", millivolts);
            return false;
        }

        let sample = millivolts as f32 / 1000.0;
        let filtered = match self.voltage {
            Some(prev) => prev + BATTERY_EMA_ALPHA * (sample - prev),
            None => sample,
        };
        self.voltage = Some(filtered);

        let changed = match self.reported {
            Some(prev) => {
                let delta = filtered - prev;
                delta >= BATTERY_REDRAW_DELTA_V || delta <= -BATTERY_REDRAW_DELTA_V
            }
            None => true,
        };
        if changed {
            debug!("Battery: {} V", filtered);
            self.reported = Some(filtered);
        }
        changed
    }
}

impl Default for BatteryMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear charge estimate between the empty and full voltages.
pub fn voltage_to_percent(voltage: f32) -> u8 {
    let span = BATTERY_FULL_V - BATTERY_EMPTY_V;
    let ratio = (voltage - BATTERY_EMPTY_V) / span;
    if ratio <= 0.0 {
        0
    } else if ratio >= 1.0 {
        100
    } else {
        (ratio * 100.0) as u8
    }
}
