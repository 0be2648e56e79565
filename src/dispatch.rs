//! Touch-to-action dispatch for the menu screens.
//!
//! Pure with respect to its inputs: the same touch on equal menu models
//! leaves equal models behind. Touches that miss every target change
//! nothing and force no redraw.

use crate::feature::Feature;
use crate::menu::{Category, MenuModel, SubmenuAction};
use crate::state::Mode;
use crate::ui::input_logic::{menu_cell_at, submenu_row_at};
use embedded_graphics::prelude::Point;

/// Result of dispatching one touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Touch hit nothing.
    None,
    EnteredSubmenu(Category),
    ExitedSubmenu,
    /// A submenu row asked for this feature; the caller activates it.
    Launch(Feature),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TouchDispatcher;

impl TouchDispatcher {
    pub const fn new() -> Self {
        Self
    }

    /// Route a touch according to the current mode. Feature mode touches
    /// belong to the launcher and are ignored here.
    pub fn dispatch(&self, model: &mut MenuModel, point: Point, now_ms: u64) -> Dispatch {
        match model.state().mode() {
            Mode::MainMenu => self.handle_main_menu_touch(model, point, now_ms),
            Mode::Submenu => self.handle_submenu_touch(model, point, now_ms),
            Mode::Feature => Dispatch::None,
        }
    }

    /// Grid hit test; a hit enters that category's submenu.
    pub fn handle_main_menu_touch(
        &self,
        model: &mut MenuModel,
        point: Point,
        now_ms: u64,
    ) -> Dispatch {
        let Some(category) = menu_cell_at(point).and_then(Category::from_index) else {
            return Dispatch::None;
        };
        model.enter_submenu(category, now_ms);
        Dispatch::EnteredSubmenu(category)
    }

    /// Row hit test; "Back" returns to the main menu, any other row selects
    /// itself and yields its feature.
    pub fn handle_submenu_touch(
        &self,
        model: &mut MenuModel,
        point: Point,
        now_ms: u64,
    ) -> Dispatch {
        let Some(row) = submenu_row_at(point, model.submenu().len()) else {
            return Dispatch::None;
        };
        let Some(entry) = model.submenu().get(row).copied() else {
            return Dispatch::None;
        };

        match entry.action {
            SubmenuAction::Back => {
                model.exit_submenu(now_ms);
                Dispatch::ExitedSubmenu
            }
            SubmenuAction::Launch(feature) => {
                model.select_submenu_item(row);
                model.state_mut().touch(now_ms);
                debug!("Menu: row {} -> {}", row, feature);
                Dispatch::Launch(feature)
            }
        }
    }
}
