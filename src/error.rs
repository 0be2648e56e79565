//! Unified error type for esp32-div.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A feature needs a peripheral that did not answer its probe.
    PeripheralUnavailable(Peripheral),

    /// A radio transceiver rejected a command.
    Radio(RadioError),

    /// The signal profile store rejected an operation.
    Storage(StorageError),
}

/// Peripherals a feature can depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Peripheral {
    /// CC1101 sub-GHz transceiver.
    SubGhz,
    /// NRF24L01+ 2.4 GHz transceiver.
    Nrf24,
}

/// Subset of radio errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// SPI transaction or GPIO access failed.
    Bus,
    /// Frequency outside the transceiver's bands.
    InvalidFrequency,
    /// Channel outside 0..126.
    InvalidChannel,
}

/// Errors from the signal profile store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// No free slot left.
    Full,
    /// Index does not name a stored profile.
    NotFound,
}

impl Error {
    /// Short text for the status bar.
    pub fn message(&self) -> &'static str {
        match self {
            Error::PeripheralUnavailable(Peripheral::SubGhz) => "CC1101 not found",
            Error::PeripheralUnavailable(Peripheral::Nrf24) => "NRF24 not found",
            Error::Radio(RadioError::Bus) => "Radio bus error",
            Error::Radio(RadioError::InvalidFrequency) => "Bad frequency",
            Error::Radio(RadioError::InvalidChannel) => "Bad channel",
            Error::Storage(StorageError::Full) => "Storage full",
            Error::Storage(StorageError::NotFound) => "No such profile",
        }
    }
}

// Convenience conversions

impl From<RadioError> for Error {
    fn from(e: RadioError) -> Self {
        Error::Radio(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Error::Storage(e)
    }
}
