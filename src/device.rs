//! The device loop: boot sequence and one cooperative iteration.
//!
//! `tick` order:
//! 1. battery sample (rate limited), status bar redraw on change
//! 2. touch sample through the gate; a touch while the screen is off only
//!    wakes it
//! 3. feature mode: hand the iteration to the launcher; menu modes: redraw
//!    dirty screens, then dispatch the touch
//! 4. wait for release after any accepted touch
//! 5. power policy, in every mode

use crate::battery::BatteryMonitor;
use crate::board::{Board, Platform};
use crate::config::{LOADING_STEP_MS, LOADING_STEP_PERCENT, LOGO_DURATION_MS};
use crate::dispatch::{Dispatch, TouchDispatcher};
use crate::feature::FeatureContext;
use crate::launcher::FeatureLauncher;
use crate::menu::MenuModel;
use crate::power::PowerPolicy;
use crate::settings::Settings;
use crate::touch::{Release, TouchGate};
use crate::ui::palette::{GREEN, ORANGE};
use crate::ui::Renderer;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;
use embedded_hal::delay::DelayNs;

const LOADING_ORIGIN: Point = Point::new(20, 240);
const LOADING_WIDTH: u32 = 200;

pub struct Device<P: Platform, R> {
    board: Board<P>,
    ui: R,
    menu: MenuModel,
    gate: TouchGate,
    dispatcher: TouchDispatcher,
    launcher: FeatureLauncher,
    battery: BatteryMonitor,
    power: PowerPolicy,
    settings: Settings,
}

impl<P: Platform, R: Renderer> Device<P, R> {
    pub fn new(board: Board<P>, ui: R, gate: TouchGate) -> Self {
        let now_ms = board.now_ms();
        Self {
            board,
            ui,
            menu: MenuModel::new(now_ms),
            gate,
            dispatcher: TouchDispatcher::new(),
            launcher: FeatureLauncher::new(),
            battery: BatteryMonitor::new(),
            power: PowerPolicy::new(),
            settings: Settings::default(),
        }
    }

    pub fn board(&self) -> &Board<P> {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board<P> {
        &mut self.board
    }

    pub fn ui(&self) -> &R {
        &self.ui
    }

    pub fn menu(&self) -> &MenuModel {
        &self.menu
    }

    pub fn launcher(&self) -> &FeatureLauncher {
        &self.launcher
    }

    pub fn power(&self) -> &PowerPolicy {
        &self.power
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Splash, progress bar, first battery sample, then the main menu.
    pub fn boot(&mut self) {
        info!("Boot: {} {}", crate::config::FIRMWARE_NAME, crate::config::FIRMWARE_VERSION);
        self.power.apply(0, &self.settings, &mut self.board.backlight);

        self.display_logo(ORANGE, LOGO_DURATION_MS);
        for percent in (0..=100u8).step_by(LOADING_STEP_PERCENT.max(1) as usize) {
            self.ui
                .loading(percent, GREEN, LOADING_ORIGIN, LOADING_WIDTH, true);
            self.board.delay.delay_ms(LOADING_STEP_MS);
        }

        let now_ms = self.board.now_ms();
        self.battery.update(&mut self.board.battery, now_ms);
        self.ui.draw_status_bar(self.battery.voltage(), true);
        self.menu.enter_main_menu(now_ms);
        info!("Boot: done");
    }

    /// Draw the splash screen and hold it for `duration_ms`.
    pub fn display_logo(&mut self, color: Rgb565, duration_ms: u32) {
        self.ui.display_logo(color);
        self.board.delay.delay_ms(duration_ms);
    }

    /// One loop iteration.
    pub fn tick(&mut self) {
        let now_ms = self.board.now_ms();

        if self.battery.update(&mut self.board.battery, now_ms) {
            self.ui.draw_status_bar(self.battery.voltage(), true);
        }

        let accepted = self.gate.poll(&mut self.board.touch);
        let mut touch = accepted;
        if accepted.is_some() {
            if self.power.is_off() {
                info!("Power: wake on touch");
                touch = None;
            }
            self.menu.state_mut().touch(now_ms);
        }

        // A notice stays up until the next touch back in the menus.
        if touch.is_some() && !self.menu.state().feature_active() && self.launcher.take_notice() {
            self.ui.draw_status_bar(self.battery.voltage(), true);
        }

        let mut ctx = FeatureContext {
            board: &mut self.board,
            ui: &mut self.ui,
            settings: &mut self.settings,
            battery: self.battery.voltage(),
            now_ms,
            touch,
        };

        if self.menu.state().feature_active() {
            self.launcher.poll(&mut self.menu, &mut ctx);
        } else {
            redraw_menus(&mut self.menu, &mut *ctx.ui);
            if let Some(point) = touch {
                if let Dispatch::Launch(feature) = self.dispatcher.dispatch(&mut self.menu, point, now_ms) {
                    // Failure already left the model in the submenu with a notice.
                    let _ = self.launcher.activate(feature, &mut self.menu, &mut ctx);
                }
            }
        }

        if accepted.is_some()
            && self.gate.wait_for_release(&mut self.board.touch, &mut self.board.delay)
                == Release::TimedOut
        {
            warn!("Touch: release wait timed out");
        }

        let idle_ms = self.menu.state().clock().idle_ms(self.board.now_ms());
        self.power
            .apply(idle_ms, &self.settings, &mut self.board.backlight);
    }
}

/// Draw whichever menu screen is active and not yet on the panel.
fn redraw_menus<R: Renderer>(menu: &mut MenuModel, ui: &mut R) {
    let state = *menu.state();
    if state.is_main_menu() && !state.menu_initialized() {
        ui.display_menu(state.current_menu_index());
        menu.state_mut().mark_menu_drawn();
    } else if state.in_sub_menu() && !state.submenu_initialized() {
        ui.display_submenu(
            state.current_menu_index(),
            menu.submenu().entries(),
            state.current_submenu_index(),
        );
        menu.state_mut().mark_submenu_drawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::mock::{self, FakePlatform, RecordingUi};
    use crate::menu::Category;
    use crate::power_logic::BacklightLevel;
    use crate::touch::{Calibration, RawTouch};
    use crate::ui::layout;

    fn device() -> Device<FakePlatform, RecordingUi> {
        let mut board = mock::board();
        board.battery.millivolts = Some(3_900);
        let mut device = Device::new(board, RecordingUi::default(), TouchGate::new(Calibration::DEFAULT));
        device.boot();
        device
    }

    /// Raw sample that maps onto `point` under the default calibration.
    fn raw_at(point: Point) -> RawTouch {
        // Inverse of the 100..=900 -> 0..=239 / 0..=319 mapping, rounded up.
        let x = 100 + (point.x as u32 * 800).div_ceil(239);
        let y = 100 + (point.y as u32 * 800).div_ceil(319);
        RawTouch {
            x: x as u16,
            y: y as u16,
            pressure: 400,
        }
    }

    fn tap(device: &mut Device<FakePlatform, RecordingUi>, point: Point) {
        device.board_mut().touch.samples.push_back(raw_at(point));
        device.tick();
    }

    #[test]
    fn boot_shows_logo_progress_and_menu() {
        let mut device = device();
        assert_eq!(device.ui().logos, 1);
        assert_eq!(device.ui().loading.first(), Some(&0));
        assert_eq!(device.ui().loading.last(), Some(&100));
        assert!(device.menu().state().is_main_menu());
        assert_eq!(device.board().backlight.percent, Some(100));

        device.tick();
        assert_eq!(device.ui().menus, [Category::SubGhz]);
        // Drawn once until something invalidates it.
        device.tick();
        assert_eq!(device.ui().menus.len(), 1);
    }

    #[test]
    fn raw_helper_lands_on_target() {
        let gate = TouchGate::new(Calibration::DEFAULT);
        for point in [Point::new(0, 0), Point::new(120, 160), Point::new(239, 319), Point::new(65, 80)] {
            assert_eq!(gate.accept(raw_at(point)), Some(point));
        }
    }

    #[test]
    fn release_wait_follows_accepted_touch() {
        let mut device = device();
        device.tick();
        let waited = device.board().delay.elapsed_ns;
        let held = raw_at(Point::new(115, 80));
        device.board_mut().touch.samples.extend([held, held, held]);
        device.tick();
        // Two held reads after the accepted one, one poll interval each.
        assert_eq!(
            device.board().delay.elapsed_ns - waited,
            2 * crate::config::TOUCH_RELEASE_POLL_MS as u64 * 1_000_000
        );
        assert!(device.board().touch.samples.is_empty());
    }

    #[test]
    fn touch_while_dark_only_wakes() {
        let mut device = device();
        device.tick();

        let off_after = device.settings().idle_thresholds.off_after_ms;
        device.board_mut().clock.now_ms += off_after;
        device.tick();
        assert_eq!(device.power().level(), BacklightLevel::Off);
        assert_eq!(device.board().backlight.percent, Some(0));

        tap(&mut device, layout::menu_cell(Category::Tools.index()).center());
        assert!(device.menu().state().is_main_menu());
        assert_eq!(device.power().level(), BacklightLevel::Full);
        assert_eq!(device.board().backlight.percent, Some(100));
    }

    #[test]
    fn next_menu_touch_clears_notice() {
        let mut device = device();
        device.board_mut().subghz.present = false;
        device.tick();
        tap(&mut device, layout::menu_cell(Category::SubGhz.index()).center());
        device.tick();
        let drawn = device.ui().status_bars.len();

        tap(&mut device, layout::submenu_row(0).center());
        assert!(device.menu().state().in_sub_menu());
        assert_eq!(device.ui().notices, ["CC1101 not found"]);
        assert_eq!(device.ui().status_bars.len(), drawn);

        tap(&mut device, Point::new(120, 300));
        assert_eq!(device.ui().status_bars.len(), drawn + 1);

        // Only once per notice.
        tap(&mut device, Point::new(120, 300));
        assert_eq!(device.ui().status_bars.len(), drawn + 1);
    }

    #[test]
    fn battery_change_redraws_status_bar() {
        let mut device = device();
        let drawn = device.ui().status_bars.len();

        device.board_mut().battery.millivolts = Some(3_500);
        device.board_mut().clock.now_ms += crate::config::BATTERY_SAMPLE_INTERVAL_MS;
        device.tick();
        assert_eq!(device.ui().status_bars.len(), drawn + 1);
    }
}
