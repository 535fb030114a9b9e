//! GStreamer logging bridge and player operation timing.
//!
//! GStreamer's own debug output is routed into the `log` facade so a single
//! `RUST_LOG` controls everything. Player operations are timed; slow ones are
//! logged louder, since a stalled pipeline otherwise shows up as a frozen
//! fireplace with nothing in the logs.

use gstreamer as gst;
use gstreamer::glib;
use std::time::Instant;

const TARGET: &str = "gstreamer";

/// Player operations worth timing.
#[derive(Debug, Clone, Copy)]
pub enum PlayerOp {
    Open,
    Pause,
    Resume,
    Rewind,
    Release,
}

impl PlayerOp {
    fn as_str(&self) -> &'static str {
        match self {
            PlayerOp::Open => "OPEN",
            PlayerOp::Pause => "PAUSE",
            PlayerOp::Resume => "RESUME",
            PlayerOp::Rewind => "REWIND",
            PlayerOp::Release => "RELEASE",
        }
    }
}

/// Initialise GStreamer and forward its log output to `log`.
pub fn install() {
    if let Err(e) = gst::init() {
        log::error!("GStreamer initialisation failed: {}", e);
        return;
    }

    gst::log::remove_default_log_function();
    gst::log::set_default_threshold(threshold_for(log::max_level()));
    gst::log::add_log_function(forward);

    log::debug!("GStreamer {} logging bridged", gst::version_string());
}

fn forward(
    category: gst::DebugCategory,
    level: gst::DebugLevel,
    _file: &glib::GStr,
    function: &glib::GStr,
    line: u32,
    _object: Option<&gst::log::LoggedObject>,
    message: &gst::DebugMessage,
) {
    let Some(level) = level_for(level) else {
        return;
    };
    let text = message.get().map(|m| m.to_string()).unwrap_or_default();
    log::log!(
        target: TARGET,
        level,
        "[{}] {}:{} {}",
        category.name(),
        function,
        line,
        text
    );
}

fn level_for(level: gst::DebugLevel) -> Option<log::Level> {
    match level {
        gst::DebugLevel::None => None,
        gst::DebugLevel::Error => Some(log::Level::Error),
        gst::DebugLevel::Warning | gst::DebugLevel::Fixme => Some(log::Level::Warn),
        gst::DebugLevel::Info => Some(log::Level::Info),
        gst::DebugLevel::Debug => Some(log::Level::Debug),
        _ => Some(log::Level::Trace),
    }
}

fn threshold_for(filter: log::LevelFilter) -> gst::DebugLevel {
    match filter {
        log::LevelFilter::Off => gst::DebugLevel::None,
        log::LevelFilter::Error => gst::DebugLevel::Error,
        log::LevelFilter::Warn => gst::DebugLevel::Warning,
        log::LevelFilter::Info => gst::DebugLevel::Fixme,
        log::LevelFilter::Debug => gst::DebugLevel::Debug,
        log::LevelFilter::Trace => gst::DebugLevel::Log,
    }
}

/// Log the start of a player operation.
pub fn log_op_start(op: PlayerOp, source: &str) -> Instant {
    log::debug!("[{}] {} START", op.as_str(), source);
    Instant::now()
}

/// Log the end of a player operation, louder the longer it took.
pub fn log_op_complete(op: PlayerOp, start: Instant) {
    let elapsed_ms = start.elapsed().as_millis();

    if elapsed_ms > 2000 {
        log::error!("[{}] STALLED: {}ms", op.as_str(), elapsed_ms);
    } else if elapsed_ms > 500 {
        log::warn!("[{}] SLOW: {}ms", op.as_str(), elapsed_ms);
    } else {
        log::debug!("[{}] COMPLETE: {}ms", op.as_str(), elapsed_ms);
    }
}

/// Log a failed player operation.
pub fn log_op_error(op: PlayerOp, error: &dyn std::fmt::Display, start: Instant) {
    log::error!(
        "[{}] ERROR after {}ms: {}",
        op.as_str(),
        start.elapsed().as_millis(),
        error
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(level_for(gst::DebugLevel::None), None);
        assert_eq!(level_for(gst::DebugLevel::Error), Some(log::Level::Error));
        assert_eq!(level_for(gst::DebugLevel::Fixme), Some(log::Level::Warn));
        assert_eq!(level_for(gst::DebugLevel::Memdump), Some(log::Level::Trace));
    }

    #[test]
    fn test_threshold_follows_log_filter() {
        assert_eq!(threshold_for(log::LevelFilter::Off), gst::DebugLevel::None);
        assert_eq!(threshold_for(log::LevelFilter::Info), gst::DebugLevel::Fixme);
        assert_eq!(threshold_for(log::LevelFilter::Trace), gst::DebugLevel::Log);
    }
}
