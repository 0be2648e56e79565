//! Sub-GHz features on the CC1101: capture/replay, profile capture and the
//! carrier jammer.

use super::{line, Feature, FeatureContext, Step};
use crate::board::Platform;
use crate::config::{MAX_CAPTURE_PULSES, MIN_CAPTURE_PULSES, SUBGHZ_FREQUENCIES_KHZ};
use crate::error::Error;
use crate::profiles::{Profile, ProfileStore};
use crate::radio::SubGhzRadio;
use crate::ui::input_logic::{feature_region_at, FeatureRegion};
use crate::ui::palette::{GREEN, LIGHT_GRAY, RED, WHITE};
use crate::ui::Renderer;

/// Index into `SUBGHZ_FREQUENCIES_KHZ` used on entry (433.92 MHz).
const DEFAULT_FREQUENCY: usize = 1;

/// Longest time one step may sample GDO0. Longer bursts are collected over
/// several steps.
const CAPTURE_WINDOW_MS: u32 = 15;

const LINE_FREQUENCY: u8 = 0;
const LINE_STATUS: u8 = 1;
const LINE_DETAIL: u8 = 2;

fn next_frequency(index: usize) -> usize {
    (index + 1) % SUBGHZ_FREQUENCIES_KHZ.len()
}

fn draw_frequency<R: Renderer>(ui: &mut R, khz: u32) {
    let text = line(format_args!("Freq: {}.{:02} MHz", khz / 1000, khz % 1000 / 10));
    ui.feature_line(LINE_FREQUENCY, &text, WHITE);
}

/// Put the CC1101 back to idle, logging failures.
pub(super) fn idle<P: Platform, R>(ctx: &mut FeatureContext<'_, P, R>) {
    if ctx.board.subghz.idle().is_err() {
        warn!("SubGHz: idle failed");
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureMode {
    /// Retransmit the capture on demand.
    Replay,
    /// Store the capture as a profile.
    Save,
}

/// Listens for one OOK burst, then offers to replay or save it.
pub struct Capture {
    mode: CaptureMode,
    frequency: usize,
    pulses: [u16; MAX_CAPTURE_PULSES],
    /// Pulses collected so far, including a burst still in progress.
    filled: usize,
    /// A complete burst is held in `pulses[..filled]`.
    captured: bool,
    last_rssi: Option<i16>,
}

impl Capture {
    pub fn setup<P: Platform, R: Renderer>(
        ctx: &mut FeatureContext<'_, P, R>,
        mode: CaptureMode,
    ) -> Result<Self, Error> {
        let mut capture = Self {
            mode,
            frequency: DEFAULT_FREQUENCY,
            pulses: [0; MAX_CAPTURE_PULSES],
            filled: 0,
            captured: false,
            last_rssi: None,
        };
        if let Err(e) = capture.listen(ctx) {
            idle(ctx);
            return Err(e);
        }
        let feature = match mode {
            CaptureMode::Replay => Feature::ReplayAttack,
            CaptureMode::Save => Feature::ProfileSaver,
        };
        ctx.ui.feature_frame(feature.title());
        capture.draw(ctx);
        info!("SubGHz: capture ({}) at {} kHz", mode, capture.frequency_khz());
        Ok(capture)
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    pub fn frequency_khz(&self) -> u32 {
        SUBGHZ_FREQUENCIES_KHZ[self.frequency]
    }

    /// Captured pulse train, empty while listening.
    pub fn pulses(&self) -> &[u16] {
        if self.captured {
            &self.pulses[..self.filled]
        } else {
            &[]
        }
    }

    fn listen<P: Platform, R>(&mut self, ctx: &mut FeatureContext<'_, P, R>) -> Result<(), Error> {
        let radio = &mut ctx.board.subghz;
        radio.idle()?;
        radio.set_frequency_khz(self.frequency_khz())?;
        radio.start_receive()?;
        self.filled = 0;
        self.captured = false;
        self.last_rssi = None;
        Ok(())
    }

    fn draw<P: Platform, R: Renderer>(&self, ctx: &mut FeatureContext<'_, P, R>) {
        draw_frequency(ctx.ui, self.frequency_khz());
        if !self.captured {
            ctx.ui.feature_line(LINE_STATUS, "Listening...", LIGHT_GRAY);
            ctx.ui.feature_line(LINE_DETAIL, "", WHITE);
            ctx.ui.feature_actions(Some("Freq"), None);
        } else {
            let text = line(format_args!("Captured {} pulses", self.filled));
            ctx.ui.feature_line(LINE_STATUS, &text, GREEN);
            ctx.ui.feature_line(LINE_DETAIL, "", WHITE);
            let action = match self.mode {
                CaptureMode::Replay => "Replay",
                CaptureMode::Save => "Save",
            };
            ctx.ui.feature_actions(Some("Clear"), Some(action));
        }
    }

    pub fn step<P: Platform, R: Renderer>(
        &mut self,
        ctx: &mut FeatureContext<'_, P, R>,
    ) -> Result<Step, Error> {
        if let Some(point) = ctx.touch {
            match feature_region_at(point) {
                FeatureRegion::ActionLeft => {
                    if !self.captured {
                        self.frequency = next_frequency(self.frequency);
                    }
                    self.listen(ctx)?;
                    self.draw(ctx);
                }
                FeatureRegion::ActionRight if self.captured => self.act(ctx)?,
                _ => {}
            }
            return Ok(Step::Continue);
        }

        if self.captured {
            return Ok(Step::Continue);
        }

        let progress = ctx
            .board
            .subghz
            .capture(&mut self.pulses[self.filled..], CAPTURE_WINDOW_MS)?;
        self.filled = (self.filled + progress.pulses).min(MAX_CAPTURE_PULSES);
        if progress.complete {
            if self.filled >= MIN_CAPTURE_PULSES {
                self.captured = true;
                info!("SubGHz: captured {} pulses", self.filled);
                self.draw(ctx);
                return Ok(Step::Continue);
            }
            debug!("SubGHz: dropped {} pulse burst", self.filled);
            self.filled = 0;
        }

        if self.filled == 0 {
            let rssi = ctx.board.subghz.rssi_dbm()?;
            if self.last_rssi != Some(rssi) {
                self.last_rssi = Some(rssi);
                let text = line(format_args!("RSSI: {} dBm", rssi));
                ctx.ui.feature_line(LINE_DETAIL, &text, LIGHT_GRAY);
            }
        }
        Ok(Step::Continue)
    }

    fn act<P: Platform, R: Renderer>(&mut self, ctx: &mut FeatureContext<'_, P, R>) -> Result<(), Error> {
        match self.mode {
            CaptureMode::Replay => {
                let radio = &mut ctx.board.subghz;
                radio.transmit(&self.pulses[..self.filled])?;
                radio.start_receive()?;
                let text = line(format_args!("Replayed {} pulses", self.filled));
                ctx.ui.feature_line(LINE_DETAIL, &text, GREEN);
            }
            CaptureMode::Save => {
                let profile = Profile::new(self.frequency_khz(), self.pulses());
                match ctx.board.store.save(profile) {
                    Ok(index) => {
                        let text = line(format_args!("Saved as #{}", index + 1));
                        ctx.ui.feature_line(LINE_DETAIL, &text, GREEN);
                    }
                    Err(e) => {
                        warn!("SubGHz: save failed {}", e);
                        ctx.ui.feature_line(LINE_DETAIL, Error::from(e).message(), RED);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Continuous carrier on a selectable frequency.
pub struct Jammer {
    frequency: usize,
    running: bool,
}

impl Jammer {
    pub fn setup<P: Platform, R: Renderer>(ctx: &mut FeatureContext<'_, P, R>) -> Result<Self, Error> {
        let jammer = Self {
            frequency: DEFAULT_FREQUENCY,
            running: true,
        };
        if let Err(e) = jammer.apply(ctx) {
            idle(ctx);
            return Err(e);
        }
        ctx.ui.feature_frame(Feature::SubJammer.title());
        jammer.draw(ctx);
        Ok(jammer)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frequency_khz(&self) -> u32 {
        SUBGHZ_FREQUENCIES_KHZ[self.frequency]
    }

    fn apply<P: Platform, R>(&self, ctx: &mut FeatureContext<'_, P, R>) -> Result<(), Error> {
        let radio = &mut ctx.board.subghz;
        radio.idle()?;
        radio.set_frequency_khz(self.frequency_khz())?;
        if self.running {
            warn!("SubGHz: carrier on at {} kHz", self.frequency_khz());
            radio.start_carrier()?;
        }
        Ok(())
    }

    fn draw<P: Platform, R: Renderer>(&self, ctx: &mut FeatureContext<'_, P, R>) {
        draw_frequency(ctx.ui, self.frequency_khz());
        if self.running {
            ctx.ui.feature_line(LINE_STATUS, "Carrier ON", RED);
            ctx.ui.feature_actions(Some("Freq"), Some("Pause"));
        } else {
            ctx.ui.feature_line(LINE_STATUS, "Paused", LIGHT_GRAY);
            ctx.ui.feature_actions(Some("Freq"), Some("Resume"));
        }
    }

    pub fn step<P: Platform, R: Renderer>(
        &mut self,
        ctx: &mut FeatureContext<'_, P, R>,
    ) -> Result<Step, Error> {
        let Some(point) = ctx.touch else {
            return Ok(Step::Continue);
        };
        match feature_region_at(point) {
            FeatureRegion::ActionLeft => self.frequency = next_frequency(self.frequency),
            FeatureRegion::ActionRight => self.running = !self.running,
            _ => return Ok(Step::Continue),
        }
        self.apply(ctx)?;
        self.draw(ctx);
        Ok(Step::Continue)
    }
}
