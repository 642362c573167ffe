//! Build information
//!
//! Compile-time constants embedded by the build script.

/// Build number, incremented on each recompilation
pub const BUILD_NUMBER: &str = match option_env!("CALORIZE_BUILD_NUMBER") {
    Some(s) => s,
    None => "0",
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("CALORIZE_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    eprintln!("===============================================");
    eprintln!("  Calorize");
    eprintln!("  Version: {} | Build: {}", VERSION, BUILD_NUMBER);
    eprintln!("  Compiled: {}", BUILD_TIMESTAMP);
    eprintln!("===============================================");
}
