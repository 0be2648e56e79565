//! Features reachable from the submenus.
//!
//! [`Feature`] is the closed set of things a submenu row can launch.
//! [`FeatureState`] is the running instance: created once by `setup`, then
//! stepped once per loop iteration until it asks to exit or the user hits
//! the exit region, and finally torn down.

pub mod about;
pub mod nrf24;
pub mod preferences;
pub mod storage;
pub mod subghz;
pub mod tools;

#[cfg(test)]
pub(crate) mod mock;

use crate::board::{Board, Platform};
use crate::error::{Error, Peripheral};
use crate::radio::{Nrf24Radio, SubGhzRadio};
use crate::settings::Settings;
use crate::ui::Renderer;
use core::fmt::Write;
use embedded_graphics::prelude::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feature {
    ReplayAttack,
    SubJammer,
    ProfileSaver,
    Spectrum,
    Jammer24,
    TouchTest,
    Battery,
    SavedProfiles,
    ScreenTimeout,
    Brightness,
    DeviceInfo,
}

impl Feature {
    pub fn title(self) -> &'static str {
        match self {
            Feature::ReplayAttack => "Replay Attack",
            Feature::SubJammer => "Sub Jammer",
            Feature::ProfileSaver => "Profile Saver",
            Feature::Spectrum => "Spectrum",
            Feature::Jammer24 => "2.4 Jammer",
            Feature::TouchTest => "Touch Test",
            Feature::Battery => "Battery",
            Feature::SavedProfiles => "Saved Profiles",
            Feature::ScreenTimeout => "Screen Timeout",
            Feature::Brightness => "Brightness",
            Feature::DeviceInfo => "Device Info",
        }
    }

    /// Radio the feature cannot run without.
    pub fn requires(self) -> Option<Peripheral> {
        match self {
            Feature::ReplayAttack | Feature::SubJammer | Feature::ProfileSaver => {
                Some(Peripheral::SubGhz)
            }
            Feature::Spectrum | Feature::Jammer24 => Some(Peripheral::Nrf24),
            _ => None,
        }
    }

    /// Acquire peripherals and draw the first frame.
    ///
    /// Fails with [`Error::PeripheralUnavailable`] when a required radio does
    /// not answer, or with the radio's error when it cannot be configured.
    /// Each feature brings its radio up before drawing its frame, so nothing
    /// is drawn or left running on failure.
    pub fn setup<P: Platform, R: Renderer>(
        self,
        ctx: &mut FeatureContext<'_, P, R>,
    ) -> Result<FeatureState, Error> {
        if let Some(peripheral) = self.requires() {
            if !probe(ctx.board, peripheral) {
                return Err(Error::PeripheralUnavailable(peripheral));
            }
        }

        let state = match self {
            Feature::ReplayAttack => {
                FeatureState::Capture(subghz::Capture::setup(ctx, subghz::CaptureMode::Replay)?)
            }
            Feature::ProfileSaver => {
                FeatureState::Capture(subghz::Capture::setup(ctx, subghz::CaptureMode::Save)?)
            }
            Feature::SubJammer => FeatureState::SubJammer(subghz::Jammer::setup(ctx)?),
            Feature::Spectrum => FeatureState::Spectrum(nrf24::Spectrum::setup(ctx)?),
            Feature::Jammer24 => FeatureState::Jammer24(nrf24::Jammer::setup(ctx)?),
            Feature::TouchTest => FeatureState::TouchTest(tools::TouchTest::setup(ctx)),
            Feature::Battery => FeatureState::Battery(tools::BatteryView::setup(ctx)),
            Feature::SavedProfiles => {
                FeatureState::SavedProfiles(storage::SavedProfiles::setup(ctx))
            }
            Feature::ScreenTimeout => FeatureState::Preference(preferences::Preference::setup(
                ctx,
                preferences::Kind::ScreenTimeout,
            )),
            Feature::Brightness => FeatureState::Preference(preferences::Preference::setup(
                ctx,
                preferences::Kind::Brightness,
            )),
            Feature::DeviceInfo => FeatureState::DeviceInfo(about::DeviceInfo::setup(ctx)),
        };
        Ok(state)
    }
}

fn probe<P: Platform>(board: &mut Board<P>, peripheral: Peripheral) -> bool {
    match peripheral {
        Peripheral::SubGhz => board.subghz.probe(),
        Peripheral::Nrf24 => board.nrf24.probe(),
    }
}

/// Text of one content line.
pub(crate) type Line = heapless::String<32>;

/// Format a content line, truncating at capacity.
pub(crate) fn line(args: core::fmt::Arguments<'_>) -> Line {
    let mut text = Line::new();
    let _ = text.write_fmt(args);
    text
}

/// What a feature wants after one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Continue,
    Exit,
}

/// Everything a feature may touch during one loop iteration.
pub struct FeatureContext<'a, P: Platform, R> {
    pub board: &'a mut Board<P>,
    pub ui: &'a mut R,
    pub settings: &'a mut Settings,
    /// Filtered battery voltage, if known.
    pub battery: Option<f32>,
    pub now_ms: u64,
    /// Accepted touch this iteration, already known not to be the exit gesture.
    pub touch: Option<Point>,
}

/// A running feature.
pub enum FeatureState {
    Capture(subghz::Capture),
    SubJammer(subghz::Jammer),
    Spectrum(nrf24::Spectrum),
    Jammer24(nrf24::Jammer),
    TouchTest(tools::TouchTest),
    Battery(tools::BatteryView),
    SavedProfiles(storage::SavedProfiles),
    Preference(preferences::Preference),
    DeviceInfo(about::DeviceInfo),
}

impl FeatureState {
    /// One bounded unit of work.
    pub fn step<P: Platform, R: Renderer>(
        &mut self,
        ctx: &mut FeatureContext<'_, P, R>,
    ) -> Result<Step, Error> {
        match self {
            FeatureState::Capture(f) => f.step(ctx),
            FeatureState::SubJammer(f) => f.step(ctx),
            FeatureState::Spectrum(f) => f.step(ctx),
            FeatureState::Jammer24(f) => f.step(ctx),
            FeatureState::TouchTest(f) => Ok(f.step(ctx)),
            FeatureState::Battery(f) => Ok(f.step(ctx)),
            FeatureState::SavedProfiles(f) => f.step(ctx),
            FeatureState::Preference(f) => Ok(f.step(ctx)),
            FeatureState::DeviceInfo(f) => Ok(f.step(ctx)),
        }
    }

    /// Release peripherals. Radios are left idle.
    pub fn teardown<P: Platform, R: Renderer>(&mut self, ctx: &mut FeatureContext<'_, P, R>) {
        match self {
            FeatureState::Capture(_) | FeatureState::SubJammer(_) => subghz::idle(ctx),
            FeatureState::Spectrum(_) | FeatureState::Jammer24(_) => nrf24::stop(ctx),
            FeatureState::SavedProfiles(f) => f.teardown(ctx),
            FeatureState::DeviceInfo(f) => f.teardown(ctx),
            FeatureState::TouchTest(_) | FeatureState::Battery(_) | FeatureState::Preference(_) => {}
        }
    }
}
