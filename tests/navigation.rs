//! End-to-end navigation through the public device loop, driven by raw
//! touch samples on a fake board.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;
use embedded_hal::delay::DelayNs;

use esp32_div::battery::BatterySensor;
use esp32_div::board::{Board, Clock, Platform};
use esp32_div::config::{MINPRESSURE, TS_MAXX, TS_MAXY, TS_MINX, TS_MINY};
use esp32_div::error::RadioError;
use esp32_div::menu::{Category, SubmenuEntry};
use esp32_div::power::Backlight;
use esp32_div::power_logic::BacklightLevel;
use esp32_div::profiles::MemoryProfileStore;
use esp32_div::radio::{CaptureProgress, Nrf24Radio, SubGhzRadio};
use esp32_div::touch::{RawTouch, TouchGate, TouchPanel};
use esp32_div::ui::layout;
use esp32_div::ui::Renderer;
use esp32_div::{Device, Feature};

// ═══════════════════════════════════════════════════════════════════════════
// Fake board
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct Panel {
    samples: VecDeque<RawTouch>,
}

impl TouchPanel for Panel {
    fn read(&mut self) -> RawTouch {
        self.samples.pop_front().unwrap_or_default()
    }
}

struct Cell3900;

impl BatterySensor for Cell3900 {
    fn read_millivolts(&mut self) -> Option<u16> {
        Some(3_900)
    }
}

#[derive(Default)]
struct Light {
    percent: Option<u8>,
}

impl Backlight for Light {
    fn set_percent(&mut self, percent: u8) {
        self.percent = Some(percent);
    }
}

struct SubGhz {
    present: bool,
    carrier: bool,
}

impl SubGhzRadio for SubGhz {
    fn probe(&mut self) -> bool {
        self.present
    }
    fn set_frequency_khz(&mut self, _khz: u32) -> Result<(), RadioError> {
        Ok(())
    }
    fn rssi_dbm(&mut self) -> Result<i16, RadioError> {
        Ok(-100)
    }
    fn start_receive(&mut self) -> Result<(), RadioError> {
        Ok(())
    }
    fn capture(&mut self, _pulses: &mut [u16], _window_ms: u32) -> Result<CaptureProgress, RadioError> {
        Ok(CaptureProgress::default())
    }
    fn transmit(&mut self, _pulses: &[u16]) -> Result<(), RadioError> {
        Ok(())
    }
    fn start_carrier(&mut self) -> Result<(), RadioError> {
        self.carrier = true;
        Ok(())
    }
    fn idle(&mut self) -> Result<(), RadioError> {
        self.carrier = false;
        Ok(())
    }
}

struct NoNrf24;

impl Nrf24Radio for NoNrf24 {
    fn probe(&mut self) -> bool {
        false
    }
    fn set_channel(&mut self, _channel: u8) -> Result<(), RadioError> {
        Err(RadioError::Bus)
    }
    fn carrier_detect(&mut self) -> Result<bool, RadioError> {
        Err(RadioError::Bus)
    }
    fn start_carrier(&mut self, _channel: u8) -> Result<(), RadioError> {
        Err(RadioError::Bus)
    }
    fn stop(&mut self) -> Result<(), RadioError> {
        Ok(())
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Test-controlled time, shared with the test body.
#[derive(Clone, Default)]
struct ManualClock(Rc<Cell<u64>>);

impl ManualClock {
    fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

struct Fake;

impl Platform for Fake {
    type Touch = Panel;
    type Battery = Cell3900;
    type Backlight = Light;
    type SubGhz = SubGhz;
    type Nrf24 = NoNrf24;
    type Store = MemoryProfileStore;
    type Delay = NoDelay;
    type Clock = ManualClock;
}

// ═══════════════════════════════════════════════════════════════════════════
// Recording renderer
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, PartialEq)]
enum Drawn {
    Menu(Category),
    Submenu(Category, usize),
    Frame(String),
    Notice(String),
}

#[derive(Default)]
struct Screen {
    drawn: Vec<Drawn>,
}

impl Screen {
    fn last(&self) -> Option<&Drawn> {
        self.drawn.last()
    }
}

impl Renderer for Screen {
    fn display_menu(&mut self, selected: Category) {
        self.drawn.push(Drawn::Menu(selected));
    }
    fn display_submenu(&mut self, category: Category, _entries: &[SubmenuEntry], selected: usize) {
        self.drawn.push(Drawn::Submenu(category, selected));
    }
    fn draw_status_bar(&mut self, _voltage: Option<f32>, _show_battery: bool) {}
    fn display_logo(&mut self, _color: Rgb565) {}
    fn loading(&mut self, _percent: u8, _color: Rgb565, _origin: Point, _width: u32, _show_text: bool) {}
    fn feature_frame(&mut self, title: &str) {
        self.drawn.push(Drawn::Frame(title.to_string()));
    }
    fn feature_line(&mut self, _row: u8, _text: &str, _color: Rgb565) {}
    fn feature_bars(&mut self, _values: &[u8], _color: Rgb565) {}
    fn feature_actions(&mut self, _left: Option<&str>, _right: Option<&str>) {}
    fn feature_dot(&mut self, _point: Point, _color: Rgb565) {}
    fn notice(&mut self, text: &str, _color: Rgb565) {
        self.drawn.push(Drawn::Notice(text.to_string()));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════

struct Harness {
    device: Device<Fake, Screen>,
    clock: ManualClock,
}

fn booted(cc1101_present: bool) -> Harness {
    let clock = ManualClock::default();
    let board = Board {
        touch: Panel::default(),
        battery: Cell3900,
        backlight: Light::default(),
        subghz: SubGhz {
            present: cc1101_present,
            carrier: false,
        },
        nrf24: NoNrf24,
        store: MemoryProfileStore::new(),
        delay: NoDelay,
        clock: clock.clone(),
    };
    let mut device = Device::new(board, Screen::default(), TouchGate::default());
    device.boot();
    device.tick();
    Harness { device, clock }
}

/// Raw controller sample that lands on `point`.
fn raw_at(point: Point, pressure: u16) -> RawTouch {
    let span_x = (TS_MAXX - TS_MINX) as i32;
    let span_y = (TS_MAXY - TS_MINY) as i32;
    let x = TS_MINX as i32 + (point.x * span_x + 238) / 239;
    let y = TS_MINY as i32 + (point.y * span_y + 318) / 319;
    RawTouch {
        x: x as u16,
        y: y as u16,
        pressure,
    }
}

impl Harness {
    fn tap(&mut self, point: Point) {
        self.press(point, 400);
    }

    fn press(&mut self, point: Point, pressure: u16) {
        self.clock.advance(50);
        self.device
            .board_mut()
            .touch
            .samples
            .push_back(raw_at(point, pressure));
        self.device.tick();
    }

    fn idle_tick(&mut self) {
        self.clock.advance(20);
        self.device.tick();
    }

    fn screen(&self) -> &Screen {
        self.device.ui()
    }
}

fn cell(category: Category) -> Point {
    layout::menu_cell(category.index()).center()
}

fn row(index: usize) -> Point {
    layout::submenu_row(index).center()
}

// ═══════════════════════════════════════════════════════════════════════════
// Scenarios
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn boot_lands_on_main_menu() {
    let h = booted(true);
    assert!(h.device.menu().state().is_main_menu());
    assert_eq!(h.screen().last(), Some(&Drawn::Menu(Category::SubGhz)));
    assert_eq!(h.device.board().backlight.percent, Some(100));
}

#[test]
fn tools_touch_test_and_back() {
    let mut h = booted(true);

    h.tap(cell(Category::Tools));
    assert!(h.device.menu().state().in_sub_menu());
    h.idle_tick();
    assert_eq!(h.screen().last(), Some(&Drawn::Submenu(Category::Tools, 0)));

    h.tap(row(0));
    assert_eq!(h.device.launcher().running(), Some(Feature::TouchTest));
    assert_eq!(h.screen().last(), Some(&Drawn::Frame("Touch Test".into())));

    // Exit is honoured on the iteration after the gesture.
    h.tap(layout::FEATURE_EXIT.center());
    assert!(h.device.menu().state().feature_active());
    h.idle_tick();
    assert!(h.device.menu().state().in_sub_menu());
    assert_eq!(h.device.launcher().running(), None);
    h.idle_tick();
    assert_eq!(h.screen().last(), Some(&Drawn::Submenu(Category::Tools, 0)));

    // Back row returns to the grid with Tools still highlighted.
    h.tap(row(2));
    h.idle_tick();
    assert!(h.device.menu().state().is_main_menu());
    assert_eq!(h.screen().last(), Some(&Drawn::Menu(Category::Tools)));
}

#[test]
fn missing_cc1101_keeps_submenu() {
    let mut h = booted(false);
    h.tap(cell(Category::SubGhz));
    h.idle_tick();

    h.tap(row(1));
    assert!(h.device.menu().state().in_sub_menu());
    assert_eq!(h.device.menu().state().current_submenu_index(), 1);
    assert_eq!(h.device.launcher().running(), None);
    assert!(h
        .screen()
        .drawn
        .contains(&Drawn::Notice("CC1101 not found".into())));
    assert!(!h.screen().drawn.iter().any(|d| matches!(d, Drawn::Frame(_))));
}

#[test]
fn leaving_the_jammer_stops_the_carrier() {
    let mut h = booted(true);
    h.tap(cell(Category::SubGhz));
    h.idle_tick();
    h.tap(row(1));
    assert!(h.device.board().subghz.carrier);

    h.tap(layout::FEATURE_EXIT.center());
    h.idle_tick();
    assert!(!h.device.board().subghz.carrier);
    assert_eq!(h.device.menu().state().current_submenu_index(), 1);
}

#[test]
fn light_press_is_ignored() {
    let mut h = booted(true);
    h.press(cell(Category::Tools), MINPRESSURE - 1);
    assert!(h.device.menu().state().is_main_menu());
}

#[test]
fn idle_screen_goes_dark_and_first_touch_only_wakes() {
    let mut h = booted(true);
    let thresholds = h.device.settings().idle_thresholds;

    h.clock.advance(thresholds.dim_after_ms);
    h.device.tick();
    assert_eq!(h.device.power().level(), BacklightLevel::Dim);

    h.clock.advance(thresholds.off_after_ms - thresholds.dim_after_ms);
    h.device.tick();
    assert_eq!(h.device.power().level(), BacklightLevel::Off);
    assert_eq!(h.device.board().backlight.percent, Some(0));

    h.tap(cell(Category::Tools));
    assert!(h.device.menu().state().is_main_menu());
    assert_eq!(h.device.board().backlight.percent, Some(100));

    h.tap(cell(Category::Tools));
    assert!(h.device.menu().state().in_sub_menu());
}

#[test]
fn brightness_change_reaches_the_backlight() {
    let mut h = booted(true);
    h.tap(cell(Category::Settings));
    h.idle_tick();
    h.tap(row(1));
    assert_eq!(h.device.launcher().running(), Some(Feature::Brightness));

    h.tap(layout::ACTION_LEFT.center());
    assert_eq!(h.device.settings().brightness_percent, 75);
    assert_eq!(h.device.board().backlight.percent, Some(75));
}
