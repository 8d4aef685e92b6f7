// src/output/logging.rs
use log::LevelFilter;

/// Accepts level names or the numeric shorthand 1 (error) .. 5 (trace).
pub fn parse_level(input: &str) -> Option<LevelFilter> {
    match input.trim().to_lowercase().as_str() {
        "0" | "off" => Some(LevelFilter::Off),
        "1" | "error" => Some(LevelFilter::Error),
        "2" | "warn" | "warning" => Some(LevelFilter::Warn),
        "3" | "info" => Some(LevelFilter::Info),
        "4" | "debug" => Some(LevelFilter::Debug),
        "5" | "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Installs the stderr logger. `RUST_LOG`, when set, wins over the
/// configured level.
pub fn init(configured_level: &str) -> std::result::Result<(), log::SetLoggerError> {
    let level = parse_level(configured_level).unwrap_or(LevelFilter::Info);

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_timestamp_millis();
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.try_init()
}
