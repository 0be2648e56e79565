//! Saved profile browser: select, send over the CC1101, delete.

use super::{line, Feature, FeatureContext, Step};
use crate::board::Platform;
use crate::config::MAX_PROFILES;
use crate::error::{Error, Peripheral};
use crate::profiles::ProfileStore;
use crate::radio::SubGhzRadio;
use crate::ui::input_logic::{feature_region_at, FeatureRegion};
use crate::ui::layout::MAX_LINES;
use crate::ui::palette::{GREEN, LIGHT_GRAY, ORANGE, RED, WHITE};
use crate::ui::Renderer;
use embedded_graphics::pixelcolor::Rgb565;

const LINE_STATUS: u8 = MAX_LINES - 1;

pub struct SavedProfiles {
    selected: Option<usize>,
    transmitted: bool,
}

impl SavedProfiles {
    pub fn setup<P: Platform, R: Renderer>(ctx: &mut FeatureContext<'_, P, R>) -> Self {
        let profiles = Self {
            selected: None,
            transmitted: false,
        };
        ctx.ui.feature_frame(Feature::SavedProfiles.title());
        profiles.draw_list(ctx);
        ctx.ui.feature_actions(Some("Send"), Some("Delete"));
        profiles
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    fn draw_list<P: Platform, R: Renderer>(&self, ctx: &mut FeatureContext<'_, P, R>) {
        let store = &ctx.board.store;
        for row in 0..MAX_PROFILES {
            match store.get(row) {
                Some(profile) => {
                    let khz = profile.frequency_khz;
                    let text = line(format_args!(
                        "#{} {}.{:02} MHz {}p",
                        row + 1,
                        khz / 1000,
                        khz % 1000 / 10,
                        profile.pulses.len()
                    ));
                    let color = if self.selected == Some(row) { ORANGE } else { WHITE };
                    ctx.ui.feature_line(row as u8, &text, color);
                }
                None if row == 0 => ctx.ui.feature_line(0, "No profiles saved", LIGHT_GRAY),
                None => ctx.ui.feature_line(row as u8, "", WHITE),
            }
        }
    }

    fn status<P: Platform, R: Renderer>(
        ctx: &mut FeatureContext<'_, P, R>,
        text: &str,
        color: Rgb565,
    ) {
        ctx.ui.feature_line(LINE_STATUS, text, color);
    }

    pub fn step<P: Platform, R: Renderer>(
        &mut self,
        ctx: &mut FeatureContext<'_, P, R>,
    ) -> Result<Step, Error> {
        let Some(point) = ctx.touch else {
            return Ok(Step::Continue);
        };

        match feature_region_at(point) {
            FeatureRegion::Line(row) if (row as usize) < ctx.board.store.len() => {
                self.selected = Some(row as usize);
                self.draw_list(ctx);
                Self::status(ctx, "", WHITE);
            }
            FeatureRegion::ActionLeft => self.send(ctx)?,
            FeatureRegion::ActionRight => self.delete(ctx),
            _ => {}
        }
        Ok(Step::Continue)
    }

    fn send<P: Platform, R: Renderer>(&mut self, ctx: &mut FeatureContext<'_, P, R>) -> Result<(), Error> {
        let Some(index) = self.selected else {
            Self::status(ctx, "Select a profile", LIGHT_GRAY);
            return Ok(());
        };
        if !ctx.board.subghz.probe() {
            let message = Error::PeripheralUnavailable(Peripheral::SubGhz).message();
            Self::status(ctx, message, RED);
            return Ok(());
        }

        let board = &mut *ctx.board;
        if let Some(profile) = board.store.get(index) {
            board.subghz.idle()?;
            board.subghz.set_frequency_khz(profile.frequency_khz)?;
            board.subghz.transmit(&profile.pulses)?;
            self.transmitted = true;
            info!("Profiles: sent #{}", index + 1);
            Self::status(ctx, &line(format_args!("Sent #{}", index + 1)), GREEN);
        }
        Ok(())
    }

    fn delete<P: Platform, R: Renderer>(&mut self, ctx: &mut FeatureContext<'_, P, R>) {
        let Some(index) = self.selected else {
            Self::status(ctx, "Select a profile", LIGHT_GRAY);
            return;
        };
        match ctx.board.store.delete(index) {
            Ok(()) => {
                self.selected = None;
                self.draw_list(ctx);
                Self::status(ctx, &line(format_args!("Deleted #{}", index + 1)), GREEN);
            }
            Err(e) => Self::status(ctx, Error::from(e).message(), RED),
        }
    }

    pub fn teardown<P: Platform, R>(&mut self, ctx: &mut FeatureContext<'_, P, R>) {
        if self.transmitted {
            super::subghz::idle(ctx);
        }
    }
}
