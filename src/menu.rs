//! Menu catalog and the navigation transitions.
//!
//! The main menu is a fixed 2x3 grid of [`Category`] cells. Entering a
//! category loads its submenu (an owned copy of the category's catalog) and
//! the submenu rows either launch a [`Feature`] or go back.

use crate::feature::Feature;
use crate::state::{Mode, NavigationState};
use crate::ui::icons::{self, Icon};

/// Number of main menu cells.
pub const NUM_MENU_ITEMS: usize = 6;

/// Upper bound on submenu rows, including "Back".
pub const MAX_SUBMENU_ITEMS: usize = 6;

/// Main menu categories, in grid order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Category {
    SubGhz,
    Nrf24,
    Tools,
    Storage,
    Settings,
    About,
}

impl Category {
    pub const ALL: [Category; NUM_MENU_ITEMS] = [
        Category::SubGhz,
        Category::Nrf24,
        Category::Tools,
        Category::Storage,
        Category::Settings,
        Category::About,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::SubGhz => "Sub-GHz",
            Category::Nrf24 => "2.4 GHz",
            Category::Tools => "Tools",
            Category::Storage => "Storage",
            Category::Settings => "Settings",
            Category::About => "About",
        }
    }

    pub fn icon(self) -> &'static Icon {
        match self {
            Category::SubGhz => &icons::SUBGHZ,
            Category::Nrf24 => &icons::NRF24,
            Category::Tools => &icons::TOOLS,
            Category::Storage => &icons::STORAGE,
            Category::Settings => &icons::SETTINGS,
            Category::About => &icons::ABOUT,
        }
    }

    /// Static catalog of this category's submenu.
    pub fn entries(self) -> &'static [SubmenuEntry] {
        match self {
            Category::SubGhz => &SUBGHZ_ENTRIES,
            Category::Nrf24 => &NRF24_ENTRIES,
            Category::Tools => &TOOLS_ENTRIES,
            Category::Storage => &STORAGE_ENTRIES,
            Category::Settings => &SETTINGS_ENTRIES,
            Category::About => &ABOUT_ENTRIES,
        }
    }
}

/// What a submenu row does when touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubmenuAction {
    Launch(Feature),
    Back,
}

/// One submenu row. Label and icon travel together so they cannot drift
/// out of step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmenuEntry {
    pub label: &'static str,
    pub icon: &'static Icon,
    pub action: SubmenuAction,
}

const fn launch(label: &'static str, icon: &'static Icon, feature: Feature) -> SubmenuEntry {
    SubmenuEntry {
        label,
        icon,
        action: SubmenuAction::Launch(feature),
    }
}

const BACK: SubmenuEntry = SubmenuEntry {
    label: "Back",
    icon: &icons::BACK,
    action: SubmenuAction::Back,
};

static SUBGHZ_ENTRIES: [SubmenuEntry; 4] = [
    launch("Replay Attack", &icons::REPLAY, Feature::ReplayAttack),
    launch("Sub Jammer", &icons::JAMMER, Feature::SubJammer),
    launch("Profile Saver", &icons::SAVE, Feature::ProfileSaver),
    BACK,
];

static NRF24_ENTRIES: [SubmenuEntry; 3] = [
    launch("Spectrum", &icons::SPECTRUM, Feature::Spectrum),
    launch("2.4 Jammer", &icons::JAMMER, Feature::Jammer24),
    BACK,
];

static TOOLS_ENTRIES: [SubmenuEntry; 3] = [
    launch("Touch Test", &icons::TOUCH, Feature::TouchTest),
    launch("Battery", &icons::BATTERY, Feature::Battery),
    BACK,
];

static STORAGE_ENTRIES: [SubmenuEntry; 2] = [
    launch("Saved Profiles", &icons::PROFILES, Feature::SavedProfiles),
    BACK,
];

static SETTINGS_ENTRIES: [SubmenuEntry; 3] = [
    launch("Screen Timeout", &icons::TIMER, Feature::ScreenTimeout),
    launch("Brightness", &icons::BRIGHTNESS, Feature::Brightness),
    BACK,
];

static ABOUT_ENTRIES: [SubmenuEntry; 2] = [
    launch("Device Info", &icons::ABOUT, Feature::DeviceInfo),
    BACK,
];

/// The active submenu, replaced wholesale on every category change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmenuContents {
    category: Category,
    entries: heapless::Vec<SubmenuEntry, MAX_SUBMENU_ITEMS>,
}

impl SubmenuContents {
    pub fn for_category(category: Category) -> Self {
        let mut entries = heapless::Vec::new();
        for entry in category.entries().iter().take(MAX_SUBMENU_ITEMS) {
            let _ = entries.push(*entry);
        }
        Self { category, entries }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SubmenuEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[SubmenuEntry] {
        &self.entries
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.label)
    }
}

/// Navigation state plus the loaded submenu.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuModel {
    state: NavigationState,
    submenu: SubmenuContents,
}

impl MenuModel {
    pub fn new(now_ms: u64) -> Self {
        Self {
            state: NavigationState::new(now_ms),
            submenu: SubmenuContents::for_category(Category::SubGhz),
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut NavigationState {
        &mut self.state
    }

    pub fn submenu(&self) -> &SubmenuContents {
        &self.submenu
    }

    /// Show the main menu; it is redrawn on the next loop iteration.
    pub fn enter_main_menu(&mut self, now_ms: u64) {
        self.state.mode = Mode::MainMenu;
        self.state.feature_exit_requested = false;
        self.state.menu_initialized = false;
        self.state.touch(now_ms);
        debug!("Menu: main, selected {}", self.state.current_menu_index);
    }

    /// Drill into `category`, selecting its first row.
    pub fn enter_submenu(&mut self, category: Category, now_ms: u64) {
        self.submenu = SubmenuContents::for_category(category);
        self.state.mode = Mode::Submenu;
        self.state.current_menu_index = category;
        self.state.current_submenu_index = 0;
        self.state.submenu_initialized = false;
        self.state.touch(now_ms);
        info!("Menu: enter {}", category);
    }

    /// Back to the main menu with the category still highlighted.
    pub fn exit_submenu(&mut self, now_ms: u64) {
        info!("Menu: exit {}", self.state.current_menu_index);
        self.enter_main_menu(now_ms);
    }

    /// Return to the submenu a feature was launched from, keeping the row
    /// selection.
    pub fn resume_submenu(&mut self, now_ms: u64) {
        self.submenu = SubmenuContents::for_category(self.state.current_menu_index);
        if self.state.current_submenu_index >= self.submenu.len() {
            self.state.current_submenu_index = 0;
        }
        self.state.mode = Mode::Submenu;
        self.state.feature_exit_requested = false;
        self.state.submenu_initialized = false;
        self.state.touch(now_ms);
    }

    /// Select submenu row `index`.
    ///
    /// # Panics
    ///
    /// If `index` is not a row of the loaded submenu.
    pub fn select_submenu_item(&mut self, index: usize) {
        assert!(
            index < self.submenu.len(),
            "submenu index {} out of range ({} rows)",
            index,
            self.submenu.len()
        );
        if self.state.current_submenu_index != index {
            self.state.current_submenu_index = index;
            self.state.submenu_initialized = false;
        }
    }

    /// Switch into feature mode with a clear exit flag.
    pub fn begin_feature(&mut self, now_ms: u64) {
        self.state.mode = Mode::Feature;
        self.state.feature_exit_requested = false;
        self.state.touch(now_ms);
    }

    /// Leave feature mode back to the originating submenu.
    pub fn end_feature(&mut self, now_ms: u64) {
        self.resume_submenu(now_ms);
    }
}
