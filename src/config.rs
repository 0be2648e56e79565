//! Application-wide constants and compile-time configuration.
//!
//! Touch calibration, timing parameters and screen geometry live here so
//! they can be tuned in one place. Pin assignments are bound in `main.rs`.

/// Shown on the splash screen and in Device Info.
pub const FIRMWARE_NAME: &str = "ESP32-DIV";
pub const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

// Screen

/// Panel size in portrait orientation (pixels).
pub const SCREEN_WIDTH: u32 = 240;
pub const SCREEN_HEIGHT: u32 = 320;

/// SPI clock for the shared TFT / radio bus (MHz).
pub const SPI_BUS_MHZ: u32 = 40;

/// SPI clock for the touch controller (MHz). The XPT2046 tops out near 2.5.
pub const TOUCH_SPI_MHZ: u32 = 2;

// Touchscreen calibration (10-bit raw ADC space)

pub const TS_MINX: u16 = 100;
pub const TS_MAXX: u16 = 900;
pub const TS_MINY: u16 = 100;
pub const TS_MAXY: u16 = 900;
pub const MINPRESSURE: u16 = 10;
pub const MAXPRESSURE: u16 = 1000;

/// Interval between panel polls while waiting for a finger to lift (ms).
pub const TOUCH_RELEASE_POLL_MS: u32 = 10;

/// Upper bound on the release wait. A stuck contact is treated as released
/// after this long so the loop cannot stall.
pub const TOUCH_RELEASE_TIMEOUT_MS: u32 = 3_000;

// Main loop

/// Delay between two device loop iterations (ms).
pub const LOOP_PERIOD_MS: u64 = 20;

/// How long the boot logo stays on screen (ms).
pub const LOGO_DURATION_MS: u32 = 1_500;

/// Progress bar increment during boot (percent).
pub const LOADING_STEP_PERCENT: u8 = 10;

/// Delay between two progress bar increments (ms).
pub const LOADING_STEP_MS: u32 = 40;

// Backlight

/// Idle time before the backlight dims (ms).
pub const BACKLIGHT_DIM_AFTER_MS: u64 = 30_000;

/// Idle time before the backlight turns off (ms).
pub const BACKLIGHT_OFF_AFTER_MS: u64 = 60_000;

/// Duty cycle used while dimmed (percent).
pub const BACKLIGHT_DIM_PERCENT: u8 = 20;

/// Default duty cycle at full brightness (percent).
pub const BACKLIGHT_FULL_PERCENT: u8 = 100;

// Battery

/// Minimum time between two battery samples (ms).
pub const BATTERY_SAMPLE_INTERVAL_MS: u64 = 2_000;

/// Samples outside this window are treated as read failures (mV).
pub const BATTERY_MIN_VALID_MV: u16 = 2_500;
pub const BATTERY_MAX_VALID_MV: u16 = 4_500;

/// Exponential moving average weight of a new sample.
pub const BATTERY_EMA_ALPHA: f32 = 0.2;

/// A published voltage change smaller than this does not redraw the
/// status bar (volts).
pub const BATTERY_REDRAW_DELTA_V: f32 = 0.01;

/// Voltage range mapped onto 0..=100 % for the status bar (volts).
pub const BATTERY_EMPTY_V: f32 = 3.3;
pub const BATTERY_FULL_V: f32 = 4.2;

// Radios

/// Sub-GHz frequencies offered by the Sub-GHz features (kHz).
pub const SUBGHZ_FREQUENCIES_KHZ: [u32; 4] = [315_000, 433_920, 868_350, 915_000];

/// Maximum number of pulse durations kept per captured signal.
pub const MAX_CAPTURE_PULSES: usize = 256;

/// Captures shorter than this are treated as noise.
pub const MIN_CAPTURE_PULSES: usize = 16;

/// Low time that ends a captured burst (us).
pub const CAPTURE_GAP_US: u32 = 10_000;

/// Number of NRF24 channels (2400..=2525 MHz).
pub const NRF24_CHANNELS: u8 = 126;

/// Channels probed per Spectrum step so one step stays short.
pub const SPECTRUM_CHANNELS_PER_STEP: u8 = 6;

// Storage

/// Signal profiles kept by the RAM profile store.
pub const MAX_PROFILES: usize = 8;
