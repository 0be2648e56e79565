//! Board peripherals grouped for the device loop.
//!
//! A [`Platform`] names the concrete driver types; [`Board`] owns one of
//! each as plain fields so the loop can borrow the touch panel and the delay
//! at the same time.

use crate::battery::BatterySensor;
use crate::power::Backlight;
use crate::profiles::ProfileStore;
use crate::radio::{Nrf24Radio, SubGhzRadio};
use crate::touch::TouchPanel;
use embedded_hal::delay::DelayNs;

/// Monotonic milliseconds since boot.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Concrete driver types for one hardware target.
pub trait Platform {
    type Touch: TouchPanel;
    type Battery: BatterySensor;
    type Backlight: Backlight;
    type SubGhz: SubGhzRadio;
    type Nrf24: Nrf24Radio;
    type Store: ProfileStore;
    type Delay: DelayNs;
    type Clock: Clock;
}

pub struct Board<P: Platform> {
    pub touch: P::Touch,
    pub battery: P::Battery,
    pub backlight: P::Backlight,
    pub subghz: P::SubGhz,
    pub nrf24: P::Nrf24,
    pub store: P::Store,
    pub delay: P::Delay,
    pub clock: P::Clock,
}

impl<P: Platform> Board<P> {
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}
