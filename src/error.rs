use std::path::PathBuf;

/// Failures raised while acquiring or preparing the video.
///
/// None of these stop the application: callers log them and carry on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {0}")]
    Status(reqwest::StatusCode),

    #[error("transfer ended early: expected {expected} bytes, got {written}")]
    Truncated { expected: u64, written: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("not a usable file path: {}", .0.display())]
    Path(PathBuf),

    #[error("no cache directory available on this system")]
    NoCacheDir,

    #[error("video pipeline error: {0}")]
    Video(#[from] iced_video_player::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
