use iced::Size;

use crate::config::Config;
use crate::download::{DownloadJob, DownloadManager};
use crate::lifecycle::Lifecycle;
use crate::player::Player;
use crate::progress::DownloadProgress;

/// Application state for the single fireplace screen.
pub struct App {
    pub config: Config,
    pub lifecycle: Lifecycle,
    pub downloads: DownloadManager,
    pub job: Option<DownloadJob>,
    pub progress: DownloadProgress,
    /// Set when playback could not start from a partial file; the next
    /// attempt waits for the transfer to finish.
    pub awaiting_completion: bool,
    pub player: Option<Player>,
    /// Intrinsic video size, once the player has reported it.
    pub video_size: Option<Size>,
    /// Last known window size.
    pub window_size: Option<Size>,
    pub status: String,
}

impl App {
    pub fn new(config: Config) -> Self {
        App {
            config,
            lifecycle: Lifecycle::default(),
            downloads: DownloadManager::new(),
            job: None,
            progress: DownloadProgress::default(),
            awaiting_completion: false,
            player: None,
            video_size: None,
            window_size: None,
            status: "Lighting the fire...".to_string(),
        }
    }
}
