//! Radio transceiver seams used by the RF features.
//!
//! The CC1101 and NRF24L01+ drivers in [`crate::drivers`] implement these;
//! tests drive the features with scripted fakes.

use crate::error::RadioError;

/// Result of one capture window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CaptureProgress {
    /// Pulses appended during this window.
    pub pulses: usize,
    /// The burst ended on a silence gap or filled the buffer.
    pub complete: bool,
}

/// CC1101-class sub-GHz OOK transceiver.
pub trait SubGhzRadio {
    /// True when the chip answers on the bus.
    fn probe(&mut self) -> bool;

    fn set_frequency_khz(&mut self, khz: u32) -> Result<(), RadioError>;

    /// Current received signal strength.
    fn rssi_dbm(&mut self) -> Result<i16, RadioError>;

    /// Enter asynchronous OOK receive; demodulated data appears on GDO0.
    /// Discards any partly captured burst.
    fn start_receive(&mut self) -> Result<(), RadioError>;

    /// Sample the data line for at most `window_ms`, appending pulse widths
    /// (microseconds, alternating high/low starting with high) to `pulses`.
    ///
    /// A burst may span several calls: the pulse in progress when a window
    /// closes carries over to the next one. The burst is complete once the
    /// line stays low for `CAPTURE_GAP_US` (that gap is stored as the last
    /// pulse) or `pulses` is full.
    fn capture(&mut self, pulses: &mut [u16], window_ms: u32) -> Result<CaptureProgress, RadioError>;

    /// Key the pulse train out as OOK.
    fn transmit(&mut self, pulses: &[u16]) -> Result<(), RadioError>;

    /// Unmodulated carrier on the programmed frequency.
    fn start_carrier(&mut self) -> Result<(), RadioError>;

    /// Stop receiving or transmitting.
    fn idle(&mut self) -> Result<(), RadioError>;
}

/// NRF24L01+ 2.4 GHz transceiver.
pub trait Nrf24Radio {
    fn probe(&mut self) -> bool;

    /// Tune to `channel` (2400 + channel MHz), 0..=125.
    fn set_channel(&mut self, channel: u8) -> Result<(), RadioError>;

    /// Listen briefly on the current channel and report the received power
    /// detector (signal above -64 dBm).
    fn carrier_detect(&mut self) -> Result<bool, RadioError>;

    /// Constant carrier on `channel`.
    fn start_carrier(&mut self, channel: u8) -> Result<(), RadioError>;

    /// Leave carrier/receive mode and power down.
    fn stop(&mut self) -> Result<(), RadioError>;
}
