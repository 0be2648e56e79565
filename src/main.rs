//! ESP32-DIV firmware entry point.
//!
//! Brings up the shared SPI bus (TFT + radios), the touch controller on its
//! own bus, the LEDC backlight and the battery ADC, then hands everything to
//! the navigation core and runs its loop forever.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_time::{Instant, Timer};
use embedded_hal_bus::spi::{CriticalSectionDevice, ExclusiveDevice};
use esp_hal::analog::adc::{Adc, AdcConfig, AdcPin, Attenuation};
use esp_hal::delay::Delay;
use esp_hal::gpio::{GpioPin, Input, Level, Output, Pull};
use esp_hal::ledc::channel::{self, ChannelIFace};
use esp_hal::ledc::timer::{self, TimerIFace};
use esp_hal::ledc::{Ledc, LowSpeed};
use esp_hal::peripherals::ADC1;
use esp_hal::spi::master::{Config as SpiConfig, Spi};
use esp_hal::spi::Mode as SpiMode;
use esp_hal::time::RateExtU32;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::Blocking;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9341Rgb565;
use mipidsi::options::ColorOrder;
use mipidsi::{Builder, NoResetPin};
use static_cell::StaticCell;

use esp32_div::battery::BatterySensor;
use esp32_div::board::{Board, Clock, Platform};
use esp32_div::config::{LOOP_PERIOD_MS, SCREEN_HEIGHT, SCREEN_WIDTH, SPI_BUS_MHZ, TOUCH_SPI_MHZ};
use esp32_div::device::Device;
use esp32_div::drivers::{Cc1101, Nrf24, Xpt2046};
use esp32_div::power::PwmBacklight;
use esp32_div::profiles::MemoryProfileStore;
use esp32_div::touch::TouchGate;
use esp32_div::ui::display::GraphicsRenderer;

use {defmt_rtt as _, esp_backtrace as _};

type SpiBus = Spi<'static, Blocking>;
type SharedBus = critical_section::Mutex<RefCell<SpiBus>>;
type SharedDevice = CriticalSectionDevice<'static, SpiBus, Output<'static>, Delay>;
type Tft = mipidsi::Display<SpiInterface<'static, SharedDevice, Output<'static>>, ILI9341Rgb565, NoResetPin>;

/// Battery divider halves the cell voltage.
const BATTERY_DIVIDER: u32 = 2;
/// ADC full scale at 11 dB attenuation (mV).
const ADC_FULL_SCALE_MV: u32 = 3_300;

/// Milliseconds from the embassy time driver.
struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// Battery sense on GPIO35 through ADC1.
struct AdcBattery {
    adc: Adc<'static, ADC1>,
    pin: AdcPin<GpioPin<35>, ADC1>,
}

impl BatterySensor for AdcBattery {
    fn read_millivolts(&mut self) -> Option<u16> {
        let raw = loop {
            match self.adc.read_oneshot(&mut self.pin) {
                Ok(raw) => break raw,
                Err(nb::Error::WouldBlock) => continue,
                Err(nb::Error::Other(_)) => return None,
            }
        };
        let mv = raw as u32 * ADC_FULL_SCALE_MV / 4095 * BATTERY_DIVIDER;
        u16::try_from(mv).ok()
    }
}

struct Esp;

impl Platform for Esp {
    type Touch = Xpt2046<ExclusiveDevice<SpiBus, Output<'static>, Delay>, Input<'static>>;
    type Battery = AdcBattery;
    type Backlight = PwmBacklight<channel::Channel<'static, LowSpeed>>;
    type SubGhz = Cc1101<SharedDevice, Input<'static>, Output<'static>, Delay>;
    type Nrf24 = Nrf24<SharedDevice, Output<'static>, Delay>;
    type Store = MemoryProfileStore;
    type Delay = Delay;
    type Clock = EmbassyClock;
}

static SPI_BUS: StaticCell<SharedBus> = StaticCell::new();
static TFT_BUFFER: StaticCell<[u8; 512]> = StaticCell::new();
static LEDC: StaticCell<Ledc<'static>> = StaticCell::new();
static BACKLIGHT_TIMER: StaticCell<timer::Timer<'static, LowSpeed>> = StaticCell::new();
static DEVICE: StaticCell<Device<Esp, GraphicsRenderer<Tft>>> = StaticCell::new();

#[esp_hal_embassy::main]
async fn main(_spawner: Spawner) {
    info!(
        "{} v{} starting",
        esp32_div::config::FIRMWARE_NAME,
        esp32_div::config::FIRMWARE_VERSION
    );

    // ESP32-DIV pin map:
    //   shared SPI2   SCK 18, MOSI 23, MISO 19
    //   TFT           CS 15, DC 2, BL 21 (reset tied to EN)
    //   SD card       CS 5
    //   CC1101        CS 27, GDO0 34 (input only), TX data 26
    //   NRF24L01+     CSN 4, CE 16
    //   touch SPI3    SCK 25, MOSI 32, MISO 39, CS 33, IRQ 36
    //   battery       ADC1 on 35 through a 1:2 divider
    let peripherals = esp_hal::init(esp_hal::Config::default());
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_hal_embassy::init(timg0.timer0);

    let delay = Delay::new();

    // Shared bus: TFT, CC1101, NRF24 and the SD card slot.
    let spi = unwrap!(Spi::new(
        peripherals.SPI2,
        SpiConfig::default()
            .with_frequency(SPI_BUS_MHZ.MHz())
            .with_mode(SpiMode::Mode0),
    )
    .ok())
    .with_sck(peripherals.GPIO18)
    .with_mosi(peripherals.GPIO23)
    .with_miso(peripherals.GPIO19);
    let bus: &'static SharedBus = SPI_BUS.init(critical_section::Mutex::new(RefCell::new(spi)));

    // Nothing talks to the card; keep it off the bus.
    let _sd_cs = Output::new(peripherals.GPIO5, Level::High);

    let tft_cs = Output::new(peripherals.GPIO15, Level::High);
    let tft_dc = Output::new(peripherals.GPIO2, Level::Low);
    let cc1101_cs = Output::new(peripherals.GPIO27, Level::High);
    let nrf_csn = Output::new(peripherals.GPIO4, Level::High);

    let tft_spi = unwrap!(CriticalSectionDevice::new(bus, tft_cs, delay));
    let cc1101_spi = unwrap!(CriticalSectionDevice::new(bus, cc1101_cs, delay));
    let nrf_spi = unwrap!(CriticalSectionDevice::new(bus, nrf_csn, delay));

    let mut init_delay = delay;
    let interface = SpiInterface::new(tft_spi, tft_dc, TFT_BUFFER.init([0; 512]));
    let tft: Tft = unwrap!(Builder::new(ILI9341Rgb565, interface)
        .display_size(SCREEN_WIDTH as u16, SCREEN_HEIGHT as u16)
        .color_order(ColorOrder::Bgr)
        .init(&mut init_delay)
        .ok());

    // Touch controller on the second SPI peripheral.
    let touch_spi = unwrap!(Spi::new(
        peripherals.SPI3,
        SpiConfig::default()
            .with_frequency(TOUCH_SPI_MHZ.MHz())
            .with_mode(SpiMode::Mode0),
    )
    .ok())
    .with_sck(peripherals.GPIO25)
    .with_mosi(peripherals.GPIO32)
    .with_miso(peripherals.GPIO39);
    let touch_cs = Output::new(peripherals.GPIO33, Level::High);
    let touch_irq = Input::new(peripherals.GPIO36, Pull::None);
    let touch_dev = unwrap!(ExclusiveDevice::new(touch_spi, touch_cs, delay));

    // Backlight PWM.
    let ledc = LEDC.init(Ledc::new(peripherals.LEDC));
    ledc.set_global_slow_clock(esp_hal::ledc::LSGlobalClkSource::APBClk);
    let backlight_timer = BACKLIGHT_TIMER.init(ledc.timer::<LowSpeed>(timer::Number::Timer0));
    unwrap!(backlight_timer
        .configure(timer::config::Config {
            duty: timer::config::Duty::Duty8Bit,
            clock_source: timer::LSClockSource::APBClk,
            frequency: 5.kHz(),
        })
        .ok());
    let mut backlight_channel = ledc.channel(channel::Number::Channel0, peripherals.GPIO21);
    unwrap!(backlight_channel
        .configure(channel::config::Config {
            timer: backlight_timer,
            duty_pct: 0,
            pin_config: channel::config::PinConfig::PushPull,
        })
        .ok());

    let mut adc_config = AdcConfig::new();
    let battery_pin = adc_config.enable_pin(peripherals.GPIO35, Attenuation::Attenuation11dB);
    let battery = AdcBattery {
        adc: Adc::new(peripherals.ADC1, adc_config),
        pin: battery_pin,
    };

    let board: Board<Esp> = Board {
        touch: Xpt2046::new(touch_dev, touch_irq),
        battery,
        backlight: PwmBacklight::new(backlight_channel),
        subghz: Cc1101::new(
            cc1101_spi,
            Input::new(peripherals.GPIO34, Pull::None),
            Output::new(peripherals.GPIO26, Level::Low),
            delay,
        ),
        nrf24: Nrf24::new(nrf_spi, Output::new(peripherals.GPIO16, Level::Low), delay),
        store: MemoryProfileStore::new(),
        delay,
        clock: EmbassyClock,
    };

    let device = DEVICE.init(Device::new(
        board,
        GraphicsRenderer::new(tft),
        TouchGate::default(),
    ));
    device.boot();

    loop {
        device.tick();
        Timer::after_millis(LOOP_PERIOD_MS).await;
    }
}
