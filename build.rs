//! Build script - passes the esp-hal linker scripts to the firmware binary
//! so that host builds of the library stay untouched.

use std::env;

fn main() {
    // Only the embedded binary links against the ESP32 memory layout.
    if env::var_os("CARGO_FEATURE_EMBEDDED").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tlinkall.x");
    }

    // defmt needs its own section layout.
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() && env::var_os("CARGO_FEATURE_EMBEDDED").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    println!("cargo:rerun-if-changed=build.rs");
}
