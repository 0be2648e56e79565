//! TI CC1101 sub-GHz transceiver in asynchronous OOK mode.
//!
//! Packet handling is switched off: the chip demodulates onto GDO0 while
//! receiving, and the MCU keys the PA directly while transmitting. Pulse
//! timing is sampled and generated in software with a [`DelayNs`].
//!
//! ## Wiring
//!
//! - `rx`: GDO0, serial data out of the demodulator
//! - `tx`: line into the chip's async TX data input
//!
//! ```rust,ignore
//! let mut radio = Cc1101::new(spi_device, gdo0, tx_data, delay);
//! if radio.probe() {
//!     radio.set_frequency_khz(433_920)?;
//!     radio.start_receive()?;
//! }
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

use crate::config::CAPTURE_GAP_US;
use crate::error::RadioError;
use crate::radio::{CaptureProgress, SubGhzRadio};

// Command strobes
const SRES: u8 = 0x30;
const SCAL: u8 = 0x33;
const SRX: u8 = 0x34;
const STX: u8 = 0x35;
const SIDLE: u8 = 0x36;

// Configuration registers
const IOCFG0: u8 = 0x02;
const PKTCTRL0: u8 = 0x08;
const FREQ2: u8 = 0x0D;
const FREQ1: u8 = 0x0E;
const FREQ0: u8 = 0x0F;
const MDMCFG2: u8 = 0x12;
const FREND0: u8 = 0x22;
const PATABLE: u8 = 0x3E;

// Status registers (read with the burst bit set)
const VERSION: u8 = 0x31;
const RSSI: u8 = 0x34;

const READ_STATUS: u8 = 0xC0;
const WRITE_BURST: u8 = 0x40;

/// GDO0 = asynchronous serial data out.
const IOCFG0_ASYNC_DATA: u8 = 0x0D;
/// Asynchronous serial mode, infinite packet length.
const PKTCTRL0_ASYNC: u8 = 0x32;
/// ASK/OOK modulation, no preamble or sync word.
const MDMCFG2_OOK: u8 = 0x30;
/// PA table index 1 for the "on" symbol.
const FREND0_OOK: u8 = 0x11;
/// Off level, then roughly +10 dBm for the on level.
const PATABLE_OOK: [u8; 2] = [0x00, 0xC0];

/// Crystal frequency in kHz.
const XTAL_KHZ: u64 = 26_000;

/// Supported bands (kHz).
const BANDS_KHZ: [(u32, u32); 3] = [(300_000, 348_000), (387_000, 464_000), (779_000, 928_000)];

/// Data line sampling period during capture (us).
pub const SAMPLE_US: u32 = 10;

/// Offset of the RSSI register in dBm.
const RSSI_OFFSET_DBM: i16 = 74;

/// Pulse being measured, carried from one capture window to the next.
#[derive(Clone, Copy, Default)]
struct Pulse {
    started: bool,
    high: bool,
    width_us: u32,
}

fn pulse_width(width_us: u32) -> u16 {
    width_us.min(u16::MAX as u32) as u16
}

pub struct Cc1101<SPI, RX, TX, D> {
    spi: SPI,
    rx: RX,
    tx: TX,
    delay: D,
    pulse: Pulse,
}

impl<SPI, RX, TX, D> Cc1101<SPI, RX, TX, D>
where
    SPI: SpiDevice,
    RX: InputPin,
    TX: OutputPin,
    D: DelayNs,
{
    pub fn new(spi: SPI, rx: RX, tx: TX, delay: D) -> Self {
        Self {
            spi,
            rx,
            tx,
            delay,
            pulse: Pulse::default(),
        }
    }

    pub fn release(self) -> (SPI, RX, TX, D) {
        (self.spi, self.rx, self.tx, self.delay)
    }

    fn strobe(&mut self, command: u8) -> Result<(), RadioError> {
        self.spi.write(&[command]).map_err(|_| RadioError::Bus)
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), RadioError> {
        self.spi.write(&[reg, value]).map_err(|_| RadioError::Bus)
    }

    fn write_burst(&mut self, reg: u8, data: &[u8]) -> Result<(), RadioError> {
        let mut buf = [0u8; 9];
        let len = data.len().min(buf.len() - 1);
        buf[0] = reg | WRITE_BURST;
        buf[1..=len].copy_from_slice(&data[..len]);
        self.spi.write(&buf[..=len]).map_err(|_| RadioError::Bus)
    }

    fn read(&mut self, header: u8) -> Result<u8, RadioError> {
        let mut buf = [header, 0];
        self.spi
            .transfer_in_place(&mut buf)
            .map_err(|_| RadioError::Bus)?;
        Ok(buf[1])
    }

    fn read_status(&mut self, reg: u8) -> Result<u8, RadioError> {
        self.read(reg | READ_STATUS)
    }

    fn configure_ook(&mut self) -> Result<(), RadioError> {
        self.write_reg(PKTCTRL0, PKTCTRL0_ASYNC)?;
        self.write_reg(MDMCFG2, MDMCFG2_OOK)?;
        self.write_reg(FREND0, FREND0_OOK)?;
        self.write_burst(PATABLE, &PATABLE_OOK)
    }
}

/// FREQ2..FREQ0 word for a carrier frequency.
pub fn frequency_word(khz: u32) -> Result<u32, RadioError> {
    if !BANDS_KHZ.iter().any(|&(lo, hi)| (lo..=hi).contains(&khz)) {
        return Err(RadioError::InvalidFrequency);
    }
    Ok((((khz as u64) << 16) / XTAL_KHZ) as u32)
}

/// Convert the raw two's complement RSSI register to dBm.
pub fn rssi_to_dbm(raw: u8) -> i16 {
    (raw as i8) as i16 / 2 - RSSI_OFFSET_DBM
}

impl<SPI, RX, TX, D> SubGhzRadio for Cc1101<SPI, RX, TX, D>
where
    SPI: SpiDevice,
    RX: InputPin,
    TX: OutputPin,
    D: DelayNs,
{
    fn probe(&mut self) -> bool {
        if self.strobe(SRES).is_err() {
            return false;
        }
        self.delay.delay_us(100);
        match self.read_status(VERSION) {
            // A missing chip leaves MISO floating high or pulled low.
            Ok(0x00) | Ok(0xFF) | Err(_) => false,
            Ok(version) => {
                debug!("CC1101: version {=u8:#x}", version);
                self.configure_ook().is_ok()
            }
        }
    }

    fn set_frequency_khz(&mut self, khz: u32) -> Result<(), RadioError> {
        let word = frequency_word(khz)?;
        self.strobe(SIDLE)?;
        self.write_reg(FREQ2, (word >> 16) as u8)?;
        self.write_reg(FREQ1, (word >> 8) as u8)?;
        self.write_reg(FREQ0, word as u8)?;
        self.strobe(SCAL)?;
        self.delay.delay_us(800);
        debug!("CC1101: tuned to {} kHz", khz);
        Ok(())
    }

    fn rssi_dbm(&mut self) -> Result<i16, RadioError> {
        self.read_status(RSSI).map(rssi_to_dbm)
    }

    fn start_receive(&mut self) -> Result<(), RadioError> {
        self.pulse = Pulse::default();
        self.strobe(SIDLE)?;
        self.configure_ook()?;
        self.write_reg(IOCFG0, IOCFG0_ASYNC_DATA)?;
        self.strobe(SRX)
    }

    fn capture(&mut self, pulses: &mut [u16], window_ms: u32) -> Result<CaptureProgress, RadioError> {
        let ticks = window_ms.saturating_mul(1_000) / SAMPLE_US;
        let mut count = 0;

        for _ in 0..ticks {
            if count == pulses.len() {
                break;
            }
            let high = self.rx.is_high().map_err(|_| RadioError::Bus)?;
            self.delay.delay_us(SAMPLE_US);

            // Leading silence is not part of the burst.
            if !self.pulse.started {
                if !high {
                    continue;
                }
                self.pulse = Pulse {
                    started: true,
                    high: true,
                    width_us: 0,
                };
            }

            if high == self.pulse.high {
                self.pulse.width_us += SAMPLE_US;
                if !high && self.pulse.width_us >= CAPTURE_GAP_US {
                    pulses[count] = pulse_width(self.pulse.width_us);
                    self.pulse = Pulse::default();
                    return Ok(CaptureProgress {
                        pulses: count + 1,
                        complete: true,
                    });
                }
            } else {
                pulses[count] = pulse_width(self.pulse.width_us);
                count += 1;
                self.pulse = Pulse {
                    started: true,
                    high,
                    width_us: SAMPLE_US,
                };
            }
        }

        let complete = count == pulses.len();
        if complete {
            self.pulse = Pulse::default();
        }
        Ok(CaptureProgress {
            pulses: count,
            complete,
        })
    }

    fn transmit(&mut self, pulses: &[u16]) -> Result<(), RadioError> {
        self.strobe(SIDLE)?;
        self.configure_ook()?;
        self.tx.set_low().map_err(|_| RadioError::Bus)?;
        self.strobe(STX)?;

        for (i, &width) in pulses.iter().enumerate() {
            let pin = if i % 2 == 0 {
                self.tx.set_high()
            } else {
                self.tx.set_low()
            };
            pin.map_err(|_| RadioError::Bus)?;
            self.delay.delay_us(width as u32);
        }

        self.tx.set_low().map_err(|_| RadioError::Bus)?;
        self.strobe(SIDLE)
    }

    fn start_carrier(&mut self) -> Result<(), RadioError> {
        self.strobe(SIDLE)?;
        self.configure_ook()?;
        self.tx.set_high().map_err(|_| RadioError::Bus)?;
        self.strobe(STX)
    }

    fn idle(&mut self) -> Result<(), RadioError> {
        self.tx.set_low().map_err(|_| RadioError::Bus)?;
        self.strobe(SIDLE)
    }
}
