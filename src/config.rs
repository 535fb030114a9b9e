//! Command line and environment configuration.
//!
//! Nothing is persisted: every run starts from these defaults, overridden by
//! `HEARTH_*` environment variables, overridden by flags.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_VIDEO_URL: &str = "https://www.dropbox.com/s/je9enadyijldpbk/fire3.mp4?dl=1";

/// Name of the cached video inside the cache directory.
pub const VIDEO_FILE_NAME: &str = "video.mp4";

const APP_DIR: &str = "hearth";

/// How the video reaches the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AcquisitionMode {
    /// Download into the cache first, start playing once enough has arrived.
    #[default]
    Download,
    /// Hand the remote URL straight to the player.
    Stream,
}

/// How playback wraps around at end of stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LoopMode {
    /// Let the pipeline loop by itself.
    #[default]
    Native,
    /// Tear the player down and open a fresh one at every seam.
    Recreate,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "hearth", version, about = "A fireplace on your screen")]
pub struct Config {
    /// Where to fetch the video from
    #[arg(long, env = "HEARTH_URL", default_value = DEFAULT_VIDEO_URL)]
    pub url: String,

    /// Cache directory (defaults to the platform cache dir)
    #[arg(long, env = "HEARTH_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Percentage of the download after which playback starts
    #[arg(long, env = "HEARTH_THRESHOLD", default_value_t = 80.0, value_parser = parse_threshold)]
    pub threshold: f64,

    /// Delay between two download progress checks, in milliseconds
    #[arg(
        long,
        env = "HEARTH_POLL_INTERVAL_MS",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_interval_ms: u64,

    #[arg(long, value_enum, env = "HEARTH_MODE", default_value_t = AcquisitionMode::Download)]
    pub mode: AcquisitionMode,

    #[arg(long, value_enum, env = "HEARTH_LOOP_MODE", default_value_t = LoopMode::Native)]
    pub loop_mode: LoopMode,

    /// Run in a regular window instead of fullscreen
    #[arg(long)]
    pub windowed: bool,

    /// Delete the cached video before starting
    #[arg(long)]
    pub clear_cache: bool,
}

impl Config {
    /// Directory holding the cached video.
    pub fn cache_root(&self) -> Option<PathBuf> {
        self.cache_dir
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join(APP_DIR)))
    }

    /// Full path of the cached video file.
    pub fn video_path(&self) -> Option<PathBuf> {
        self.cache_root().map(|dir| dir.join(VIDEO_FILE_NAME))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn parse_threshold(value: &str) -> Result<f64, String> {
    let percent: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if percent.is_finite() && percent > 0.0 && percent <= 100.0 {
        Ok(percent)
    } else {
        Err(format!("threshold must be within (0, 100], got {percent}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let config = Config::parse_from([
            "hearth",
            "--url",
            "http://localhost/fire.mp4",
            "--cache-dir",
            "/tmp/hearth-test",
            "--threshold",
            "15",
            "--poll-interval-ms",
            "250",
            "--mode",
            "stream",
            "--loop-mode",
            "recreate",
            "--windowed",
        ]);

        assert_eq!(config.url, "http://localhost/fire.mp4");
        assert_eq!(config.threshold, 15.0);
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.mode, AcquisitionMode::Stream);
        assert_eq!(config.loop_mode, LoopMode::Recreate);
        assert!(config.windowed);
        assert!(!config.clear_cache);
        assert_eq!(
            config.video_path(),
            Some(PathBuf::from("/tmp/hearth-test/video.mp4"))
        );
    }

    #[test]
    fn test_threshold_bounds() {
        assert_eq!(parse_threshold("80"), Ok(80.0));
        assert_eq!(parse_threshold("100"), Ok(100.0));
        assert!(parse_threshold("0").is_err());
        assert!(parse_threshold("100.5").is_err());
        assert!(parse_threshold("NaN").is_err());
        assert!(parse_threshold("lots").is_err());
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let result = Config::try_parse_from(["hearth", "--poll-interval-ms", "0"]);
        assert!(result.is_err());
    }
}
