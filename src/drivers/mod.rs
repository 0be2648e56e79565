//! Blocking embedded-hal drivers for the board's SPI peripherals.
//!
//! Each driver owns an [`embedded_hal::spi::SpiDevice`], so it works on a
//! dedicated bus or on a shared one behind `embedded-hal-bus`. Bus and pin
//! failures collapse into [`crate::error::RadioError::Bus`]; the touch driver
//! reports them as "no contact" since a missed sample is harmless.

pub mod cc1101;
pub mod nrf24;
pub mod xpt2046;

pub use cc1101::Cc1101;
pub use nrf24::Nrf24;
pub use xpt2046::Xpt2046;
