//! Device Info: firmware version and which radios answered.
//!
//! Probing resets both radios, so teardown puts whichever answered back to
//! idle. "Back" leaves the screen.

use super::{line, Feature, FeatureContext, Step};
use crate::board::Platform;
use crate::config::{FIRMWARE_NAME, FIRMWARE_VERSION, MAX_PROFILES, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::profiles::ProfileStore;
use crate::radio::{Nrf24Radio, SubGhzRadio};
use crate::ui::input_logic::{feature_region_at, FeatureRegion};
use crate::ui::palette::{GREEN, LIGHT_GRAY, RED, WHITE};
use crate::ui::Renderer;

pub struct DeviceInfo {
    subghz: bool,
    nrf24: bool,
}

fn presence(found: bool) -> (&'static str, embedded_graphics::pixelcolor::Rgb565) {
    if found {
        ("found", GREEN)
    } else {
        ("missing", RED)
    }
}

impl DeviceInfo {
    pub fn setup<P: Platform, R: Renderer>(ctx: &mut FeatureContext<'_, P, R>) -> Self {
        let info = Self {
            subghz: ctx.board.subghz.probe(),
            nrf24: ctx.board.nrf24.probe(),
        };

        ctx.ui.feature_frame(Feature::DeviceInfo.title());
        let title = line(format_args!("{} v{}", FIRMWARE_NAME, FIRMWARE_VERSION));
        ctx.ui.feature_line(0, &title, WHITE);

        let (state, color) = presence(info.subghz);
        ctx.ui
            .feature_line(2, &line(format_args!("CC1101: {}", state)), color);
        let (state, color) = presence(info.nrf24);
        ctx.ui
            .feature_line(3, &line(format_args!("NRF24: {}", state)), color);

        let profiles = line(format_args!(
            "Profiles: {}/{}",
            ctx.board.store.len(),
            MAX_PROFILES
        ));
        ctx.ui.feature_line(4, &profiles, WHITE);
        let screen = line(format_args!("Display: {}x{}", SCREEN_WIDTH, SCREEN_HEIGHT));
        ctx.ui.feature_line(5, &screen, LIGHT_GRAY);
        let battery = match ctx.battery {
            Some(v) => line(format_args!("Battery: {:.2} V", v)),
            None => line(format_args!("Battery: --")),
        };
        ctx.ui.feature_line(6, &battery, LIGHT_GRAY);
        ctx.ui.feature_actions(None, Some("Back"));

        info
    }

    pub fn step<P: Platform, R>(&mut self, ctx: &mut FeatureContext<'_, P, R>) -> Step {
        match ctx.touch.map(feature_region_at) {
            Some(FeatureRegion::ActionRight) => Step::Exit,
            _ => Step::Continue,
        }
    }

    pub fn teardown<P: Platform, R>(&mut self, ctx: &mut FeatureContext<'_, P, R>) {
        if self.subghz {
            super::subghz::idle(ctx);
        }
        if self.nrf24 {
            super::nrf24::stop(ctx);
        }
    }

    pub fn subghz_present(&self) -> bool {
        self.subghz
    }

    pub fn nrf24_present(&self) -> bool {
        self.nrf24
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::mock::{Call, Rig};
    use crate::ui::layout;

    #[test]
    fn reports_radio_presence() {
        let mut rig = Rig::new();
        rig.board.nrf24.present = false;
        let info = DeviceInfo::setup(&mut rig.ctx(None));

        assert!(info.subghz_present());
        assert!(!info.nrf24_present());
        assert!(rig.ui.has_line("CC1101: found"));
        assert!(rig.ui.has_line("NRF24: missing"));
        assert!(rig.ui.has_line("Display: 240x320"));
    }

    #[test]
    fn back_action_asks_to_exit() {
        let mut rig = Rig::new();
        let mut info = DeviceInfo::setup(&mut rig.ctx(None));
        assert_eq!(rig.ui.actions.last(), Some(&(None, Some("Back".to_string()))));

        assert_eq!(info.step(&mut rig.ctx(None)), Step::Continue);
        let left = layout::ACTION_LEFT.center();
        assert_eq!(info.step(&mut rig.ctx(Some(left))), Step::Continue);
        let back = layout::ACTION_RIGHT.center();
        assert_eq!(info.step(&mut rig.ctx(Some(back))), Step::Exit);
    }

    #[test]
    fn teardown_idles_only_radios_that_answered() {
        let mut rig = Rig::new();
        rig.board.nrf24.present = false;
        let mut info = DeviceInfo::setup(&mut rig.ctx(None));
        info.teardown(&mut rig.ctx(None));
        assert_eq!(rig.board.subghz.calls, [Call::Idle]);
        assert!(!rig.board.nrf24.stopped);
    }
}
