//! Touch acceptance and debouncing.
//!
//! The panel driver hands us raw `(x, y, pressure)` samples in the 10-bit
//! calibration space. `TouchGate` filters light or implausibly hard presses,
//! drops samples outside the calibrated rectangle and maps the rest onto
//! screen pixels. After a touch has been acted upon the loop calls
//! `wait_for_release` so one physical press yields one logical tap.

use crate::config::{
    MAXPRESSURE, MINPRESSURE, SCREEN_HEIGHT, SCREEN_WIDTH, TOUCH_RELEASE_POLL_MS,
    TOUCH_RELEASE_TIMEOUT_MS, TS_MAXX, TS_MAXY, TS_MINX, TS_MINY,
};
use embedded_graphics::prelude::Point;
use embedded_hal::delay::DelayNs;

/// One raw sample from the touch controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawTouch {
    pub x: u16,
    pub y: u16,
    /// Zero when nothing touches the panel.
    pub pressure: u16,
}

/// Touch panel driver seam.
pub trait TouchPanel {
    fn read(&mut self) -> RawTouch;
}

/// Raw ADC bounds and pressure window.
///
/// A panel mounted mirrored is described with `min` above `max` on that
/// axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub min_x: u16,
    pub max_x: u16,
    pub min_y: u16,
    pub max_y: u16,
    pub min_pressure: u16,
    pub max_pressure: u16,
}

impl Calibration {
    pub const DEFAULT: Self = Self {
        min_x: TS_MINX,
        max_x: TS_MAXX,
        min_y: TS_MINY,
        max_y: TS_MAXY,
        min_pressure: MINPRESSURE,
        max_pressure: MAXPRESSURE,
    };
}

impl Default for Calibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Outcome of waiting for the finger to lift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Release {
    Released,
    /// The panel kept reporting contact; treated as released.
    TimedOut,
}

pub struct TouchGate {
    /// Bounds with `min <= max` on every axis.
    calibration: Calibration,
    mirror_x: bool,
    mirror_y: bool,
}

impl TouchGate {
    /// Inverted axis bounds are swapped and that axis is mirrored; an
    /// inverted pressure window is swapped.
    pub const fn new(calibration: Calibration) -> Self {
        let mut cal = calibration;
        let mirror_x = cal.min_x > cal.max_x;
        if mirror_x {
            cal.min_x = calibration.max_x;
            cal.max_x = calibration.min_x;
        }
        let mirror_y = cal.min_y > cal.max_y;
        if mirror_y {
            cal.min_y = calibration.max_y;
            cal.max_y = calibration.min_y;
        }
        if cal.min_pressure > cal.max_pressure {
            cal.min_pressure = calibration.max_pressure;
            cal.max_pressure = calibration.min_pressure;
        }
        Self {
            calibration: cal,
            mirror_x,
            mirror_y,
        }
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// True if the sample carries a pressure inside the acceptance window.
    pub fn is_pressed(&self, raw: &RawTouch) -> bool {
        raw.pressure >= self.calibration.min_pressure
            && raw.pressure <= self.calibration.max_pressure
    }

    /// Validate a raw sample and map it to screen pixels.
    pub fn accept(&self, raw: RawTouch) -> Option<Point> {
        if !self.is_pressed(&raw) {
            return None;
        }

        let cal = &self.calibration;
        if raw.x < cal.min_x || raw.x > cal.max_x || raw.y < cal.min_y || raw.y > cal.max_y {
            return None;
        }

        let max_x = SCREEN_WIDTH as i32 - 1;
        let max_y = SCREEN_HEIGHT as i32 - 1;
        let mut x = map_range(raw.x, cal.min_x, cal.max_x, max_x);
        let mut y = map_range(raw.y, cal.min_y, cal.max_y, max_y);
        if self.mirror_x {
            x = max_x - x;
        }
        if self.mirror_y {
            y = max_y - y;
        }
        Some(Point::new(x, y))
    }

    /// Read one sample from the panel and accept or reject it.
    pub fn poll(&self, panel: &mut impl TouchPanel) -> Option<Point> {
        self.accept(panel.read())
    }

    /// Poll until the panel reports no contact.
    ///
    /// Bounded by `TOUCH_RELEASE_TIMEOUT_MS` so a stuck contact cannot stall
    /// the loop.
    pub fn wait_for_release(
        &self,
        panel: &mut impl TouchPanel,
        delay: &mut impl DelayNs,
    ) -> Release {
        let max_polls = TOUCH_RELEASE_TIMEOUT_MS / TOUCH_RELEASE_POLL_MS;
        for _ in 0..max_polls {
            let raw = panel.read();
            if raw.pressure < self.calibration.min_pressure {
                return Release::Released;
            }
            delay.delay_ms(TOUCH_RELEASE_POLL_MS);
        }

        warn!(
            "Touch: contact held for {} ms, treating as released",
            TOUCH_RELEASE_TIMEOUT_MS
        );
        Release::TimedOut
    }
}

impl Default for TouchGate {
    fn default() -> Self {
        Self::new(Calibration::DEFAULT)
    }
}

/// Linear map of `value` from `in_min..=in_max` onto `0..=out_max`.
fn map_range(value: u16, in_min: u16, in_max: u16, out_max: i32) -> i32 {
    let span = (in_max - in_min) as i32;
    if span == 0 {
        return 0;
    }
    (value - in_min) as i32 * out_max / span
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Held {
        remaining: u32,
        reads: u32,
    }

    impl TouchPanel for Held {
        fn read(&mut self) -> RawTouch {
            self.reads += 1;
            if self.remaining == 0 {
                RawTouch::default()
            } else {
                self.remaining -= 1;
                RawTouch {
                    x: 500,
                    y: 500,
                    pressure: 300,
                }
            }
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        total_ms: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ms += (ns / 1_000_000) as u64;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += ms as u64;
        }
    }

    fn raw(x: u16, y: u16, pressure: u16) -> RawTouch {
        RawTouch { x, y, pressure }
    }

    #[test]
    fn pressure_outside_window_is_rejected() {
        let gate = TouchGate::default();
        for pressure in [0, 1, MINPRESSURE - 1, MAXPRESSURE + 1, u16::MAX] {
            assert_eq!(gate.accept(raw(500, 500, pressure)), None, "pressure {}", pressure);
        }
        assert!(gate.accept(raw(500, 500, MINPRESSURE)).is_some());
        assert!(gate.accept(raw(500, 500, MAXPRESSURE)).is_some());
    }

    #[test]
    fn coordinates_outside_calibration_are_rejected() {
        let gate = TouchGate::default();
        assert_eq!(gate.accept(raw(TS_MINX - 1, 500, 200)), None);
        assert_eq!(gate.accept(raw(TS_MAXX + 1, 500, 200)), None);
        assert_eq!(gate.accept(raw(500, TS_MINY - 1, 200)), None);
        assert_eq!(gate.accept(raw(500, TS_MAXY + 1, 200)), None);
    }

    #[test]
    fn corners_map_to_screen_corners() {
        let gate = TouchGate::default();
        assert_eq!(gate.accept(raw(TS_MINX, TS_MINY, 200)), Some(Point::new(0, 0)));
        assert_eq!(
            gate.accept(raw(TS_MAXX, TS_MAXY, 200)),
            Some(Point::new(SCREEN_WIDTH as i32 - 1, SCREEN_HEIGHT as i32 - 1))
        );
    }

    #[test]
    fn midpoint_maps_linearly() {
        let gate = TouchGate::default();
        // (500 - 100) * 239 / 800 = 119, (500 - 100) * 319 / 800 = 159
        assert_eq!(gate.accept(raw(500, 500, 200)), Some(Point::new(119, 159)));
    }

    #[test]
    fn inverted_axis_is_mirrored() {
        let gate = TouchGate::new(Calibration {
            min_x: TS_MAXX,
            max_x: TS_MINX,
            ..Calibration::DEFAULT
        });
        assert_eq!(gate.calibration().min_x, TS_MINX);
        assert_eq!(gate.calibration().max_x, TS_MAXX);
        assert_eq!(gate.accept(raw(TS_MAXX, TS_MINY, 200)), Some(Point::new(0, 0)));
        assert_eq!(
            gate.accept(raw(TS_MINX, TS_MAXY, 200)),
            Some(Point::new(SCREEN_WIDTH as i32 - 1, SCREEN_HEIGHT as i32 - 1))
        );
        assert_eq!(gate.accept(raw(500, 500, 200)), Some(Point::new(120, 159)));
        assert_eq!(gate.accept(raw(TS_MAXX + 1, 500, 200)), None);
    }

    #[test]
    fn inverted_pressure_window_is_swapped() {
        let gate = TouchGate::new(Calibration {
            min_pressure: MAXPRESSURE,
            max_pressure: MINPRESSURE,
            ..Calibration::DEFAULT
        });
        assert!(gate.accept(raw(500, 500, 200)).is_some());
        assert_eq!(gate.accept(raw(500, 500, MINPRESSURE - 1)), None);
    }

    #[test]
    fn release_wait_returns_once_lifted() {
        let gate = TouchGate::default();
        let mut panel = Held {
            remaining: 3,
            reads: 0,
        };
        let mut delay = CountingDelay::default();
        assert_eq!(gate.wait_for_release(&mut panel, &mut delay), Release::Released);
        assert_eq!(panel.reads, 4);
        assert_eq!(delay.total_ms, 3 * TOUCH_RELEASE_POLL_MS as u64);
    }

    #[test]
    fn release_wait_is_bounded() {
        let gate = TouchGate::default();
        let mut panel = Held {
            remaining: u32::MAX,
            reads: 0,
        };
        let mut delay = CountingDelay::default();
        assert_eq!(gate.wait_for_release(&mut panel, &mut delay), Release::TimedOut);
        assert_eq!(delay.total_ms, TOUCH_RELEASE_TIMEOUT_MS as u64);
    }
}
