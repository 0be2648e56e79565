//! Fakes for driving features and the device loop in unit tests.

use std::collections::VecDeque;
use std::string::{String, ToString};
use std::vec::Vec;

use crate::battery::BatterySensor;
use crate::board::{Board, Clock, Platform};
use crate::error::RadioError;
use crate::feature::FeatureContext;
use crate::menu::{Category, SubmenuEntry};
use crate::power::Backlight;
use crate::profiles::MemoryProfileStore;
use crate::radio::{CaptureProgress, Nrf24Radio, SubGhzRadio};
use crate::settings::Settings;
use crate::touch::{RawTouch, TouchPanel};
use crate::ui::Renderer;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;
use embedded_hal::delay::DelayNs;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Call {
    Idle,
    Frequency(u32),
    Receive,
    Carrier,
    Transmit(usize),
}

pub struct FakeSubGhz {
    pub present: bool,
    pub frequency_khz: Option<u32>,
    pub carrier: bool,
    /// Windows reported by `capture`, as (pulses, complete), in order.
    pub windows: VecDeque<(usize, bool)>,
    /// Burst completed in a single window once `windows` is drained.
    pub burst: Option<usize>,
    pub transmitted: usize,
    pub fail_frequency: bool,
    pub calls: Vec<Call>,
}

impl Default for FakeSubGhz {
    fn default() -> Self {
        Self {
            present: true,
            frequency_khz: None,
            carrier: false,
            windows: VecDeque::new(),
            burst: None,
            transmitted: 0,
            fail_frequency: false,
            calls: Vec::new(),
        }
    }
}

impl SubGhzRadio for FakeSubGhz {
    fn probe(&mut self) -> bool {
        self.present
    }

    fn set_frequency_khz(&mut self, khz: u32) -> Result<(), RadioError> {
        if self.fail_frequency {
            return Err(RadioError::InvalidFrequency);
        }
        self.frequency_khz = Some(khz);
        self.calls.push(Call::Frequency(khz));
        Ok(())
    }

    fn rssi_dbm(&mut self) -> Result<i16, RadioError> {
        Ok(-90)
    }

    fn start_receive(&mut self) -> Result<(), RadioError> {
        self.calls.push(Call::Receive);
        Ok(())
    }

    fn capture(&mut self, pulses: &mut [u16], _window_ms: u32) -> Result<CaptureProgress, RadioError> {
        let (count, complete) = match self.windows.pop_front() {
            Some(window) => window,
            None => match self.burst {
                Some(count) => (count, true),
                None => (0, false),
            },
        };
        let count = count.min(pulses.len());
        for p in pulses.iter_mut().take(count) {
            *p = 350;
        }
        Ok(CaptureProgress {
            pulses: count,
            complete: complete || count == pulses.len(),
        })
    }

    fn transmit(&mut self, pulses: &[u16]) -> Result<(), RadioError> {
        self.transmitted = pulses.len();
        self.calls.push(Call::Transmit(pulses.len()));
        Ok(())
    }

    fn start_carrier(&mut self) -> Result<(), RadioError> {
        self.carrier = true;
        self.calls.push(Call::Carrier);
        Ok(())
    }

    fn idle(&mut self) -> Result<(), RadioError> {
        self.carrier = false;
        self.calls.push(Call::Idle);
        Ok(())
    }
}

pub struct FakeNrf24 {
    pub present: bool,
    pub channel: Option<u8>,
    pub carrier: Option<u8>,
    /// Channels where `carrier_detect` reports a signal.
    pub busy: Vec<u8>,
    pub stopped: bool,
}

impl Default for FakeNrf24 {
    fn default() -> Self {
        Self {
            present: true,
            channel: None,
            carrier: None,
            busy: Vec::new(),
            stopped: false,
        }
    }
}

impl Nrf24Radio for FakeNrf24 {
    fn probe(&mut self) -> bool {
        self.present
    }

    fn set_channel(&mut self, channel: u8) -> Result<(), RadioError> {
        self.channel = Some(channel);
        Ok(())
    }

    fn carrier_detect(&mut self) -> Result<bool, RadioError> {
        Ok(self.channel.is_some_and(|ch| self.busy.contains(&ch)))
    }

    fn start_carrier(&mut self, channel: u8) -> Result<(), RadioError> {
        self.channel = Some(channel);
        self.carrier = Some(channel);
        self.stopped = false;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), RadioError> {
        self.carrier = None;
        self.stopped = true;
        Ok(())
    }
}

/// Replays queued samples, then reports no contact.
#[derive(Default)]
pub struct FakeTouch {
    pub samples: VecDeque<RawTouch>,
}

impl TouchPanel for FakeTouch {
    fn read(&mut self) -> RawTouch {
        self.samples.pop_front().unwrap_or_default()
    }
}

#[derive(Default)]
pub struct FakeBattery {
    pub millivolts: Option<u16>,
}

impl BatterySensor for FakeBattery {
    fn read_millivolts(&mut self) -> Option<u16> {
        self.millivolts
    }
}

#[derive(Default)]
pub struct FakeBacklight {
    pub percent: Option<u8>,
}

impl Backlight for FakeBacklight {
    fn set_percent(&mut self, percent: u8) {
        self.percent = Some(percent);
    }
}

/// Delay that records the requested time instead of sleeping.
#[derive(Default)]
pub struct FakeDelay {
    pub elapsed_ns: u64,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += ns as u64;
    }
}

#[derive(Default)]
pub struct FakeClock {
    pub now_ms: u64,
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

pub struct FakePlatform;

impl Platform for FakePlatform {
    type Touch = FakeTouch;
    type Battery = FakeBattery;
    type Backlight = FakeBacklight;
    type SubGhz = FakeSubGhz;
    type Nrf24 = FakeNrf24;
    type Store = MemoryProfileStore;
    type Delay = FakeDelay;
    type Clock = FakeClock;
}

pub fn board() -> Board<FakePlatform> {
    Board {
        touch: FakeTouch::default(),
        battery: FakeBattery::default(),
        backlight: FakeBacklight::default(),
        subghz: FakeSubGhz::default(),
        nrf24: FakeNrf24::default(),
        store: MemoryProfileStore::new(),
        delay: FakeDelay::default(),
        clock: FakeClock::default(),
    }
}

/// Records every draw call as plain data.
#[derive(Default)]
pub struct RecordingUi {
    pub menus: Vec<Category>,
    pub submenus: Vec<(Category, usize, usize)>,
    pub status_bars: Vec<Option<f32>>,
    pub logos: usize,
    pub loading: Vec<u8>,
    pub frames: Vec<String>,
    pub lines: Vec<(u8, String, Rgb565)>,
    pub bars: Vec<Vec<u8>>,
    pub actions: Vec<(Option<String>, Option<String>)>,
    pub dots: Vec<Point>,
    pub notices: Vec<String>,
}

impl RecordingUi {
    pub fn has_line(&self, text: &str) -> bool {
        self.lines.iter().any(|(_, t, _)| t == text)
    }
}

impl Renderer for RecordingUi {
    fn display_menu(&mut self, selected: Category) {
        self.menus.push(selected);
    }

    fn display_submenu(&mut self, category: Category, entries: &[SubmenuEntry], selected: usize) {
        self.submenus.push((category, entries.len(), selected));
    }

    fn draw_status_bar(&mut self, voltage: Option<f32>, _show_battery: bool) {
        self.status_bars.push(voltage);
    }

    fn display_logo(&mut self, _color: Rgb565) {
        self.logos += 1;
    }

    fn loading(&mut self, percent: u8, _color: Rgb565, _origin: Point, _width: u32, _show_text: bool) {
        self.loading.push(percent);
    }

    fn feature_frame(&mut self, title: &str) {
        self.frames.push(title.to_string());
    }

    fn feature_line(&mut self, row: u8, text: &str, color: Rgb565) {
        self.lines.push((row, text.to_string(), color));
    }

    fn feature_bars(&mut self, values: &[u8], _color: Rgb565) {
        self.bars.push(values.to_vec());
    }

    fn feature_actions(&mut self, left: Option<&str>, right: Option<&str>) {
        self.actions
            .push((left.map(ToString::to_string), right.map(ToString::to_string)));
    }

    fn feature_dot(&mut self, point: Point, _color: Rgb565) {
        self.dots.push(point);
    }

    fn notice(&mut self, text: &str, _color: Rgb565) {
        self.notices.push(text.to_string());
    }
}

/// Board, renderer and settings for building a [`FeatureContext`].
pub struct Rig {
    pub board: Board<FakePlatform>,
    pub ui: RecordingUi,
    pub settings: Settings,
    pub battery: Option<f32>,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            board: board(),
            ui: RecordingUi::default(),
            settings: Settings::default(),
            battery: Some(3.9),
        }
    }

    pub fn ctx(&mut self, touch: Option<Point>) -> FeatureContext<'_, FakePlatform, RecordingUi> {
        let now_ms = self.board.now_ms();
        FeatureContext {
            board: &mut self.board,
            ui: &mut self.ui,
            settings: &mut self.settings,
            battery: self.battery,
            now_ms,
            touch,
        }
    }
}

pub fn assert_no_carrier(rig: &Rig) {
    assert!(!rig.board.subghz.carrier);
    assert!(rig.board.nrf24.carrier.is_none());
}
