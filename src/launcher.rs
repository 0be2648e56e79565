//! Feature activation and the exit protocol.
//!
//! ```text
//!  submenu --activate--> feature --exit flag set--> (next poll) teardown
//!     ^        | setup fails                                  |
//!     +--------+ notice on status bar                          |
//!     +-------------------- resume_submenu --------------------+
//! ```
//!
//! The exit flag can be raised by a touch in the reserved exit region or by
//! the feature returning [`Step::Exit`]. It is acted upon at the start of the
//! following poll, so the feature never runs another step after asking to
//! leave.

use crate::board::Platform;
use crate::error::Error;
use crate::feature::{Feature, FeatureContext, FeatureState, Step};
use crate::menu::MenuModel;
use crate::ui::input_logic::{feature_region_at, FeatureRegion};
use crate::ui::palette::RED;
use crate::ui::Renderer;

#[derive(Default)]
pub struct FeatureLauncher {
    running: Option<(Feature, FeatureState)>,
    /// An error notice covers the status bar.
    notice: bool,
}

impl FeatureLauncher {
    pub const fn new() -> Self {
        Self {
            running: None,
            notice: false,
        }
    }

    /// Whether an error notice was shown since the last call.
    pub fn take_notice(&mut self) -> bool {
        core::mem::take(&mut self.notice)
    }

    /// Feature currently running, if any.
    pub fn running(&self) -> Option<Feature> {
        self.running.as_ref().map(|(feature, _)| *feature)
    }

    /// Enter feature mode and run `feature`'s setup once.
    ///
    /// On failure the model is back in the originating submenu, a notice is
    /// on the status bar and the error is returned.
    pub fn activate<P: Platform, R: Renderer>(
        &mut self,
        feature: Feature,
        model: &mut MenuModel,
        ctx: &mut FeatureContext<'_, P, R>,
    ) -> Result<(), Error> {
        info!("Feature: start {}", feature);
        model.begin_feature(ctx.now_ms);

        match feature.setup(ctx) {
            Ok(state) => {
                self.running = Some((feature, state));
                Ok(())
            }
            Err(e) => {
                error!("Feature: {} setup failed: {}", feature, e);
                self.running = None;
                model.end_feature(ctx.now_ms);
                ctx.ui.notice(e.message(), RED);
                self.notice = true;
                Err(e)
            }
        }
    }

    /// One iteration of the running feature.
    pub fn poll<P: Platform, R: Renderer>(
        &mut self,
        model: &mut MenuModel,
        ctx: &mut FeatureContext<'_, P, R>,
    ) {
        if !model.state().feature_active() {
            return;
        }

        if model.state().feature_exit_requested() {
            self.stop(model, ctx);
            return;
        }

        if let Some(point) = ctx.touch {
            if feature_region_at(point) == FeatureRegion::Exit {
                debug!("Feature: exit gesture");
                model.state_mut().request_feature_exit();
                return;
            }
        }

        let Some((feature, state)) = self.running.as_mut() else {
            // Feature mode without a running feature; leave it.
            model.state_mut().request_feature_exit();
            return;
        };
        match state.step(ctx) {
            Ok(Step::Continue) => {}
            Ok(Step::Exit) => model.state_mut().request_feature_exit(),
            Err(e) => {
                warn!("Feature: {} failed: {}", *feature, e);
                ctx.ui.notice(e.message(), RED);
                self.notice = true;
                model.state_mut().request_feature_exit();
            }
        }
    }

    fn stop<P: Platform, R: Renderer>(
        &mut self,
        model: &mut MenuModel,
        ctx: &mut FeatureContext<'_, P, R>,
    ) {
        if let Some((feature, mut state)) = self.running.take() {
            state.teardown(ctx);
            info!("Feature: stop {}", feature);
        }
        model.end_feature(ctx.now_ms);
    }
}
