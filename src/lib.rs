//! Navigation core and drivers for the ESP32-DIV handheld multi-tool.
//!
//! Everything in this crate except `main.rs` builds for the host, so the
//! menu state machine, touch filtering, power policy and the features
//! themselves are unit tested without hardware.
//!
//! Usage: `cargo test --lib` for the unit tests, `cargo test` for the
//! integration tests as well.
//!
//! Note: The firmware binary is `main.rs` (`--features embedded`); it only
//! wires the concrete ESP32 peripherals into [`device::Device`].

#![cfg_attr(not(test), no_std)]

// Must come first: the logging macros are used by every module below.
mod fmt;

// ═══════════════════════════════════════════════════════════════════════════
// Navigation core
// ═══════════════════════════════════════════════════════════════════════════

pub mod clock;
pub mod dispatch;
pub mod launcher;
pub mod menu;
pub mod state;

// ═══════════════════════════════════════════════════════════════════════════
// Device services
// ═══════════════════════════════════════════════════════════════════════════

pub mod battery;
pub mod board;
pub mod config;
pub mod device;
pub mod error;
pub mod power;
pub mod power_logic;
pub mod settings;
pub mod touch;

// ═══════════════════════════════════════════════════════════════════════════
// Features, radios, UI
// ═══════════════════════════════════════════════════════════════════════════

pub mod drivers;
pub mod feature;
pub mod profiles;
pub mod radio;
pub mod ui;

pub use board::{Board, Clock, Platform};
pub use device::Device;
pub use dispatch::{Dispatch, TouchDispatcher};
pub use error::Error;
pub use feature::Feature;
pub use launcher::FeatureLauncher;
pub use menu::{Category, MenuModel};
pub use state::{Mode, NavigationState};
pub use ui::Renderer;
