use iced_video_player::Video;
use std::time::Duration;

use crate::config::LoopMode;
use crate::error::Result;
use crate::gst_logger::{self, PlayerOp};
use crate::source::Source;

/// The one live playback pipeline.
pub struct Player {
    video: Video,
    source: Source,
    dimensions: Option<(u32, u32)>,
}

impl Player {
    /// Build and preroll a pipeline for `source`.
    pub fn open(source: &Source, loop_mode: LoopMode) -> Result<Self> {
        let start = gst_logger::log_op_start(PlayerOp::Open, &source.to_string());

        let opened = source
            .to_url()
            .and_then(|url| Video::new(&url).map_err(Into::into));
        let mut video = match opened {
            Ok(video) => video,
            Err(e) => {
                gst_logger::log_op_error(PlayerOp::Open, &e, start);
                return Err(e);
            }
        };

        video.set_looping(loop_mode == LoopMode::Native);
        gst_logger::log_op_complete(PlayerOp::Open, start);
        log::info!(
            "Player ready: source={}, fps={}, loop_mode={:?}",
            source,
            video.framerate(),
            loop_mode
        );

        Ok(Self {
            video,
            source: source.clone(),
            dimensions: None,
        })
    }

    pub fn video(&self) -> &Video {
        &self.video
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Suspend decoding, keeping the pipeline around.
    pub fn pause(&mut self) {
        if self.video.paused() {
            return;
        }
        let start = gst_logger::log_op_start(PlayerOp::Pause, &self.source.to_string());
        self.video.set_paused(true);
        gst_logger::log_op_complete(PlayerOp::Pause, start);
    }

    pub fn resume(&mut self) {
        if !self.video.paused() {
            return;
        }
        let start = gst_logger::log_op_start(PlayerOp::Resume, &self.source.to_string());
        self.video.set_paused(false);
        gst_logger::log_op_complete(PlayerOp::Resume, start);
    }

    /// Jump back to the first frame and keep playing.
    pub fn rewind(&mut self) -> Result<()> {
        let start = gst_logger::log_op_start(PlayerOp::Rewind, &self.source.to_string());
        if let Err(e) = self.video.seek(Duration::ZERO, false) {
            gst_logger::log_op_error(PlayerOp::Rewind, &e, start);
            return Err(e.into());
        }
        self.video.set_paused(false);
        gst_logger::log_op_complete(PlayerOp::Rewind, start);
        Ok(())
    }

    /// Intrinsic size, returned only when it is first known or has changed.
    pub fn observe_dimensions(&mut self) -> Option<(u32, u32)> {
        let (width, height) = self.video.size();
        if width <= 0 || height <= 0 {
            return None;
        }
        let current = (width as u32, height as u32);
        if self.dimensions == Some(current) {
            return None;
        }
        self.dimensions = Some(current);
        Some(current)
    }

    /// Tear the pipeline down.
    pub fn release(self) {
        let start = gst_logger::log_op_start(PlayerOp::Release, &self.source.to_string());
        drop(self.video);
        gst_logger::log_op_complete(PlayerOp::Release, start);
    }
}
