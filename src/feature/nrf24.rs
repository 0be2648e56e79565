//! 2.4 GHz features on the NRF24L01+: band spectrum and carrier jammer.

use super::{line, Feature, FeatureContext, Step};
use crate::board::Platform;
use crate::config::{NRF24_CHANNELS, SPECTRUM_CHANNELS_PER_STEP};
use crate::error::Error;
use crate::radio::Nrf24Radio;
use crate::ui::input_logic::{feature_region_at, FeatureRegion};
use crate::ui::palette::{BLUE, LIGHT_GRAY, RED, WHITE};
use crate::ui::Renderer;

/// One bar per group of `SPECTRUM_CHANNELS_PER_STEP` channels.
pub const BAR_COUNT: usize = (NRF24_CHANNELS / SPECTRUM_CHANNELS_PER_STEP) as usize;

const HIT_BOOST: u8 = 25;
const JAMMER_DEFAULT_CHANNEL: u8 = 42;
const HOPS_PER_STEP: u8 = 16;

fn boost(level: u8) -> u8 {
    level.saturating_add(HIT_BOOST).min(100)
}

fn decay(level: u8) -> u8 {
    level - level / 4
}

/// Power the radio down, logging failures.
pub(super) fn stop<P: Platform, R>(ctx: &mut FeatureContext<'_, P, R>) {
    if ctx.board.nrf24.stop().is_err() {
        warn!("NRF24: stop failed");
    }
}

/// Received-power sweep over the whole band with decaying bars.
pub struct Spectrum {
    levels: [u8; BAR_COUNT],
    channel: u8,
    sweeps: u32,
}

impl Spectrum {
    pub fn setup<P: Platform, R: Renderer>(ctx: &mut FeatureContext<'_, P, R>) -> Result<Self, Error> {
        let spectrum = Self {
            levels: [0; BAR_COUNT],
            channel: 0,
            sweeps: 0,
        };
        ctx.ui.feature_frame(Feature::Spectrum.title());
        ctx.ui.feature_line(0, "2400-2525 MHz", LIGHT_GRAY);
        ctx.ui.feature_line(1, "Sweeping...", WHITE);
        ctx.ui.feature_bars(&spectrum.levels, BLUE);
        ctx.ui.feature_actions(Some("Clear"), None);
        Ok(spectrum)
    }

    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    pub fn sweeps(&self) -> u32 {
        self.sweeps
    }

    pub fn step<P: Platform, R: Renderer>(
        &mut self,
        ctx: &mut FeatureContext<'_, P, R>,
    ) -> Result<Step, Error> {
        if let Some(point) = ctx.touch {
            if feature_region_at(point) == FeatureRegion::ActionLeft {
                self.levels = [0; BAR_COUNT];
                ctx.ui.feature_bars(&self.levels, BLUE);
            }
            return Ok(Step::Continue);
        }

        for _ in 0..SPECTRUM_CHANNELS_PER_STEP {
            ctx.board.nrf24.set_channel(self.channel)?;
            if ctx.board.nrf24.carrier_detect()? {
                let bar = (self.channel / SPECTRUM_CHANNELS_PER_STEP) as usize;
                self.levels[bar] = boost(self.levels[bar]);
            }

            self.channel += 1;
            if self.channel >= NRF24_CHANNELS {
                self.channel = 0;
                self.sweeps += 1;
                self.finish_sweep(ctx);
            }
        }
        Ok(Step::Continue)
    }

    fn finish_sweep<P: Platform, R: Renderer>(&mut self, ctx: &mut FeatureContext<'_, P, R>) {
        ctx.ui.feature_bars(&self.levels, BLUE);

        let busiest = self
            .levels
            .iter()
            .enumerate()
            .max_by_key(|(_, level)| **level)
            .filter(|(_, level)| **level > 0);
        let text = match busiest {
            Some((bar, _)) => {
                let mhz = 2400 + bar as u32 * SPECTRUM_CHANNELS_PER_STEP as u32;
                line(format_args!("Sweep {}: busiest {} MHz", self.sweeps, mhz))
            }
            None => line(format_args!("Sweep {}: quiet", self.sweeps)),
        };
        ctx.ui.feature_line(1, &text, WHITE);

        for level in self.levels.iter_mut() {
            *level = decay(*level);
        }
    }
}

/// Constant carrier, either fixed or hopping across the band.
pub struct Jammer {
    channel: u8,
    hopping: bool,
}

impl Jammer {
    pub fn setup<P: Platform, R: Renderer>(ctx: &mut FeatureContext<'_, P, R>) -> Result<Self, Error> {
        let jammer = Self {
            channel: JAMMER_DEFAULT_CHANNEL,
            hopping: false,
        };
        if let Err(e) = ctx.board.nrf24.start_carrier(jammer.channel) {
            stop(ctx);
            return Err(e.into());
        }
        warn!("NRF24: carrier on ch {}", jammer.channel);
        ctx.ui.feature_frame(Feature::Jammer24.title());
        jammer.draw(ctx);
        Ok(jammer)
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn is_hopping(&self) -> bool {
        self.hopping
    }

    fn draw<P: Platform, R: Renderer>(&self, ctx: &mut FeatureContext<'_, P, R>) {
        if self.hopping {
            ctx.ui.feature_line(0, "Mode: Hopping", RED);
            ctx.ui.feature_line(1, "Ch 0-125", WHITE);
            ctx.ui.feature_actions(Some("Mode"), None);
        } else {
            ctx.ui.feature_line(0, "Mode: Fixed", RED);
            let text = line(format_args!(
                "Ch {} ({} MHz)",
                self.channel,
                2400 + self.channel as u32
            ));
            ctx.ui.feature_line(1, &text, WHITE);
            ctx.ui.feature_actions(Some("Mode"), Some("Ch +"));
        }
    }

    pub fn step<P: Platform, R: Renderer>(
        &mut self,
        ctx: &mut FeatureContext<'_, P, R>,
    ) -> Result<Step, Error> {
        if let Some(point) = ctx.touch {
            match feature_region_at(point) {
                FeatureRegion::ActionLeft => {
                    self.hopping = !self.hopping;
                    if !self.hopping {
                        ctx.board.nrf24.set_channel(self.channel)?;
                    }
                    self.draw(ctx);
                }
                FeatureRegion::ActionRight if !self.hopping => {
                    self.channel = (self.channel + 1) % NRF24_CHANNELS;
                    ctx.board.nrf24.set_channel(self.channel)?;
                    self.draw(ctx);
                }
                _ => {}
            }
            return Ok(Step::Continue);
        }

        if self.hopping {
            for _ in 0..HOPS_PER_STEP {
                self.channel = (self.channel + 1) % NRF24_CHANNELS;
                ctx.board.nrf24.set_channel(self.channel)?;
            }
        }
        Ok(Step::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::mock::Rig;
    use crate::ui::layout;

    #[test]
    fn bars_cover_every_channel() {
        assert_eq!(BAR_COUNT, 21);
        assert!(((NRF24_CHANNELS - 1) / SPECTRUM_CHANNELS_PER_STEP) < BAR_COUNT as u8);
    }

    #[test]
    fn levels_saturate_and_decay() {
        assert_eq!(boost(90), 100);
        assert_eq!(decay(100), 75);
        assert_eq!(decay(1), 1);
        assert_eq!(decay(0), 0);
    }

    #[test]
    fn busy_channel_raises_its_bar() {
        let mut rig = Rig::new();
        rig.board.nrf24.busy.push(42);
        let mut spectrum = Spectrum::setup(&mut rig.ctx(None)).unwrap();

        let steps = NRF24_CHANNELS / SPECTRUM_CHANNELS_PER_STEP;
        for _ in 0..steps {
            spectrum.step(&mut rig.ctx(None)).unwrap();
        }
        assert_eq!(spectrum.sweeps(), 1);
        // Drawn before decay, then decayed once.
        assert_eq!(rig.ui.bars.last().map(|b| b[7]), Some(HIT_BOOST));
        assert_eq!(spectrum.levels()[7], decay(HIT_BOOST));
        assert!(spectrum.levels().iter().enumerate().all(|(i, l)| i == 7 || *l == 0));
        assert!(rig.ui.has_line("Sweep 1: busiest 2442 MHz"));
    }

    #[test]
    fn jammer_channel_button_only_in_fixed_mode() {
        let mut rig = Rig::new();
        let mut jammer = Jammer::setup(&mut rig.ctx(None)).unwrap();
        assert_eq!(rig.board.nrf24.carrier, Some(JAMMER_DEFAULT_CHANNEL));

        let right = layout::ACTION_RIGHT.center();
        jammer.step(&mut rig.ctx(Some(right))).unwrap();
        assert_eq!(jammer.channel(), JAMMER_DEFAULT_CHANNEL + 1);

        jammer
            .step(&mut rig.ctx(Some(layout::ACTION_LEFT.center())))
            .unwrap();
        assert!(jammer.is_hopping());
        let before = jammer.channel();
        jammer.step(&mut rig.ctx(Some(right))).unwrap();
        assert_eq!(jammer.channel(), before);

        jammer.step(&mut rig.ctx(None)).unwrap();
        assert_eq!(jammer.channel(), (before + HOPS_PER_STEP) % NRF24_CHANNELS);
        assert_eq!(rig.board.nrf24.channel, Some(jammer.channel()));
    }
}
