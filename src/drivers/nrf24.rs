//! Nordic nRF24L01+ used as a channel scanner and carrier source.
//!
//! Only the register file is touched; no payloads are ever sent. Scanning
//! uses the received power detector (RPD), carriers use the chip's
//! constant-wave test mode.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::config::NRF24_CHANNELS;
use crate::error::RadioError;
use crate::radio::Nrf24Radio;

const W_REGISTER: u8 = 0x20;

const CONFIG: u8 = 0x00;
const EN_AA: u8 = 0x01;
const SETUP_AW: u8 = 0x03;
const RF_CH: u8 = 0x05;
const RF_SETUP: u8 = 0x06;
const RPD: u8 = 0x09;

/// PWR_UP | PRIM_RX
const CONFIG_RX: u8 = 0x03;
/// PWR_UP, transmitter
const CONFIG_TX: u8 = 0x02;
const CONFIG_OFF: u8 = 0x00;

/// CONT_WAVE | PLL_LOCK | 0 dBm
const RF_SETUP_CARRIER: u8 = 0x96;
/// Power-on default: 2 Mbps, 0 dBm.
const RF_SETUP_DEFAULT: u8 = 0x0E;

/// 5 byte addresses; read back to tell a live chip from a floating bus.
const SETUP_AW_PROBE: u8 = 0x03;

/// Receiver settling time before RPD is valid (us).
const RPD_SETTLE_US: u32 = 200;
/// Power down to standby (us).
const POWER_UP_US: u32 = 1_500;

pub struct Nrf24<SPI, CE, D> {
    spi: SPI,
    ce: CE,
    delay: D,
}

impl<SPI, CE, D> Nrf24<SPI, CE, D>
where
    SPI: SpiDevice,
    CE: OutputPin,
    D: DelayNs,
{
    pub fn new(spi: SPI, ce: CE, delay: D) -> Self {
        Self { spi, ce, delay }
    }

    pub fn release(self) -> (SPI, CE, D) {
        (self.spi, self.ce, self.delay)
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), RadioError> {
        self.spi
            .write(&[W_REGISTER | reg, value])
            .map_err(|_| RadioError::Bus)
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, RadioError> {
        let mut buf = [reg, 0];
        self.spi
            .transfer_in_place(&mut buf)
            .map_err(|_| RadioError::Bus)?;
        Ok(buf[1])
    }

    fn ce(&mut self, high: bool) -> Result<(), RadioError> {
        let result = if high {
            self.ce.set_high()
        } else {
            self.ce.set_low()
        };
        result.map_err(|_| RadioError::Bus)
    }
}

impl<SPI, CE, D> Nrf24Radio for Nrf24<SPI, CE, D>
where
    SPI: SpiDevice,
    CE: OutputPin,
    D: DelayNs,
{
    fn probe(&mut self) -> bool {
        if self.ce(false).is_err() || self.write_reg(SETUP_AW, SETUP_AW_PROBE).is_err() {
            return false;
        }
        match self.read_reg(SETUP_AW) {
            Ok(value) if value == SETUP_AW_PROBE => {
                // No auto-ack: nothing we receive is ever answered.
                self.write_reg(EN_AA, 0x00).is_ok()
            }
            _ => false,
        }
    }

    fn set_channel(&mut self, channel: u8) -> Result<(), RadioError> {
        if channel >= NRF24_CHANNELS {
            return Err(RadioError::InvalidChannel);
        }
        self.write_reg(RF_CH, channel)
    }

    fn carrier_detect(&mut self) -> Result<bool, RadioError> {
        self.write_reg(CONFIG, CONFIG_RX)?;
        self.ce(true)?;
        self.delay.delay_us(RPD_SETTLE_US);
        let rpd = self.read_reg(RPD);
        self.ce(false)?;
        Ok(rpd? & 0x01 != 0)
    }

    fn start_carrier(&mut self, channel: u8) -> Result<(), RadioError> {
        if channel >= NRF24_CHANNELS {
            return Err(RadioError::InvalidChannel);
        }
        self.ce(false)?;
        self.write_reg(CONFIG, CONFIG_TX)?;
        self.delay.delay_us(POWER_UP_US);
        self.write_reg(RF_SETUP, RF_SETUP_CARRIER)?;
        self.write_reg(RF_CH, channel)?;
        self.ce(true)
    }

    fn stop(&mut self) -> Result<(), RadioError> {
        self.ce(false)?;
        self.write_reg(RF_SETUP, RF_SETUP_DEFAULT)?;
        self.write_reg(CONFIG, CONFIG_OFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::mock::{RecordingOutput, RegisterBus, SumDelay};

    fn radio(bus: RegisterBus) -> Nrf24<RegisterBus, RecordingOutput, SumDelay> {
        Nrf24::new(bus, RecordingOutput::default(), SumDelay::default())
    }

    #[test]
    fn probe_reads_back_address_width() {
        let mut bus = RegisterBus::new();
        bus.regs[SETUP_AW as usize] = SETUP_AW_PROBE;
        assert!(radio(bus).probe());

        let mut floating = RegisterBus::new();
        floating.regs[SETUP_AW as usize] = 0xFF;
        assert!(!radio(floating).probe());
    }

    #[test]
    fn channel_range_is_enforced() {
        let mut r = radio(RegisterBus::new());
        assert_eq!(r.set_channel(NRF24_CHANNELS), Err(RadioError::InvalidChannel));
        r.set_channel(NRF24_CHANNELS - 1).unwrap();
        let (bus, ..) = r.release();
        assert_eq!(
            bus.transactions,
            [vec![W_REGISTER | RF_CH, NRF24_CHANNELS - 1]]
        );
    }

    #[test]
    fn carrier_detect_reads_rpd_with_ce_pulse() {
        let mut bus = RegisterBus::new();
        bus.regs[RPD as usize] = 0x01;
        let mut r = radio(bus);
        assert_eq!(r.carrier_detect(), Ok(true));
        let (_, ce, delay) = r.release();
        assert_eq!(ce.levels, [true, false]);
        assert_eq!(delay.total_ns, RPD_SETTLE_US as u64 * 1_000);

        let mut quiet = radio(RegisterBus::new());
        assert_eq!(quiet.carrier_detect(), Ok(false));
    }

    #[test]
    fn carrier_uses_constant_wave_and_stop_powers_down() {
        let mut r = radio(RegisterBus::new());
        r.start_carrier(42).unwrap();
        assert!(r.ce.is_set());
        r.stop().unwrap();
        let (bus, ce, _) = r.release();
        assert!(!ce.is_set());
        assert!(bus
            .transactions
            .contains(&vec![W_REGISTER | RF_SETUP, RF_SETUP_CARRIER]));
        assert!(bus.transactions.contains(&vec![W_REGISTER | RF_CH, 42]));
        assert_eq!(bus.transactions.last(), Some(&vec![W_REGISTER | CONFIG, CONFIG_OFF]));
    }
}
