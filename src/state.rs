//! Navigation state shared by the menu model, the dispatcher and the
//! feature launcher.
//!
//! One instance lives in the device loop and is passed around by reference.
//! Exactly one display mode is active at a time because the mode is a single
//! enum; the `is_main_menu` / `in_sub_menu` / `feature_active` views are
//! derived from it.

use crate::clock::InteractionClock;
use crate::menu::Category;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    MainMenu,
    Submenu,
    Feature,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NavigationState {
    pub(crate) mode: Mode,
    pub(crate) current_menu_index: Category,
    pub(crate) current_submenu_index: usize,
    pub(crate) feature_exit_requested: bool,
    pub(crate) menu_initialized: bool,
    pub(crate) submenu_initialized: bool,
    pub(crate) clock: InteractionClock,
}

impl NavigationState {
    pub const fn new(now_ms: u64) -> Self {
        Self {
            mode: Mode::MainMenu,
            current_menu_index: Category::SubGhz,
            current_submenu_index: 0,
            feature_exit_requested: false,
            menu_initialized: false,
            submenu_initialized: false,
            clock: InteractionClock::new(now_ms),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_main_menu(&self) -> bool {
        self.mode == Mode::MainMenu
    }

    pub fn in_sub_menu(&self) -> bool {
        self.mode == Mode::Submenu
    }

    pub fn feature_active(&self) -> bool {
        self.mode == Mode::Feature
    }

    /// Category last entered; also the highlighted main menu cell.
    pub fn current_menu_index(&self) -> Category {
        self.current_menu_index
    }

    pub fn current_submenu_index(&self) -> usize {
        self.current_submenu_index
    }

    pub fn feature_exit_requested(&self) -> bool {
        self.feature_exit_requested
    }

    /// Ask the running feature to stop. Ignored outside feature mode.
    pub fn request_feature_exit(&mut self) {
        if self.feature_active() {
            self.feature_exit_requested = true;
        }
    }

    /// True once the main menu has been drawn since it was last entered.
    pub fn menu_initialized(&self) -> bool {
        self.menu_initialized
    }

    pub fn submenu_initialized(&self) -> bool {
        self.submenu_initialized
    }

    pub fn mark_menu_drawn(&mut self) {
        self.menu_initialized = true;
    }

    pub fn mark_submenu_drawn(&mut self) {
        self.submenu_initialized = true;
    }

    pub fn clock(&self) -> &InteractionClock {
        &self.clock
    }

    /// Stamp a user interaction.
    pub fn touch(&mut self, now_ms: u64) {
        self.clock.touch(now_ms);
    }

    pub fn last_interaction_ms(&self) -> u64 {
        self.clock.last_ms()
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_main_menu() {
        let state = NavigationState::new(5);
        assert!(state.is_main_menu());
        assert!(!state.in_sub_menu());
        assert!(!state.feature_active());
        assert!(!state.menu_initialized());
        assert_eq!(state.last_interaction_ms(), 5);
    }

    #[test]
    fn exit_request_only_sticks_in_feature_mode() {
        let mut state = NavigationState::new(0);
        state.request_feature_exit();
        assert!(!state.feature_exit_requested());

        state.mode = Mode::Feature;
        state.request_feature_exit();
        assert!(state.feature_exit_requested());
    }
}
