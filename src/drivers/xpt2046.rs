//! XPT2046 resistive touch controller.
//!
//! Samples are returned in the 10-bit space the touch calibration uses.
//! The PENIRQ line is checked first so an idle panel costs no SPI traffic.

use embedded_hal::digital::InputPin;
use embedded_hal::spi::SpiDevice;

use crate::touch::{RawTouch, TouchPanel};

// Control bytes: start bit, channel, 12-bit differential, power down between
// conversions.
const READ_X: u8 = 0xD0;
const READ_Y: u8 = 0x90;
const READ_Z1: u8 = 0xB0;
const READ_Z2: u8 = 0xC0;

pub struct Xpt2046<SPI, IRQ> {
    spi: SPI,
    irq: IRQ,
}

impl<SPI, IRQ> Xpt2046<SPI, IRQ>
where
    SPI: SpiDevice,
    IRQ: InputPin,
{
    pub fn new(spi: SPI, irq: IRQ) -> Self {
        Self { spi, irq }
    }

    /// One 12-bit conversion.
    fn convert(&mut self, command: u8) -> Result<u16, SPI::Error> {
        let mut buf = [command, 0, 0];
        self.spi.transfer_in_place(&mut buf)?;
        Ok(u16::from_be_bytes([buf[1], buf[2]]) >> 3)
    }

    fn sample(&mut self) -> Result<RawTouch, SPI::Error> {
        let x = self.convert(READ_X)?;
        let y = self.convert(READ_Y)?;
        let z1 = self.convert(READ_Z1)?;
        let z2 = self.convert(READ_Z2)?;
        Ok(RawTouch {
            x: x >> 2,
            y: y >> 2,
            pressure: pressure(z1, z2),
        })
    }
}

/// Contact pressure from the two plate readings, in 10-bit units.
///
/// Z1 rises and Z2 falls as the plates are pressed together.
pub fn pressure(z1: u16, z2: u16) -> u16 {
    if z1 == 0 {
        return 0;
    }
    let z = (z1 as i32 + 4095 - z2 as i32) >> 3;
    z.clamp(0, 1023) as u16
}

impl<SPI, IRQ> TouchPanel for Xpt2046<SPI, IRQ>
where
    SPI: SpiDevice,
    IRQ: InputPin,
{
    fn read(&mut self) -> RawTouch {
        // PENIRQ is active low.
        if !matches!(self.irq.is_low(), Ok(true)) {
            return RawTouch::default();
        }
        match self.sample() {
            Ok(raw) => raw,
            Err(_) => {
                warn!("Touch: SPI read failed");
                RawTouch::default()
            }
        }
    }
}
