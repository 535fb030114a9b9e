use iced::event;
use iced::keyboard;
use iced::window;
use iced::{Element, Size, Subscription, Task};

use crate::config::{Config, LoopMode};
use crate::download::{DownloadJob, DownloadOutcome, DownloadRequest};
use crate::gate::{self, GateDecision, LoopAction};
use crate::geometry;
use crate::lifecycle::{LifecycleEvent, Phase};
use crate::message::Message;
use crate::player::Player;
use crate::progress_poller;
use crate::source::{self, Resolution, Source};
use crate::state::App;
use crate::ui;

impl App {
    /// Create the screen and start acquiring the video.
    pub fn boot(config: Config) -> (Self, Task<Message>) {
        let mut app = App::new(config);
        let task = app.acquire();
        (app, task)
    }

    /// Handle UI messages and state updates.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PollProgress => {
                self.poll_progress();
                Task::none()
            }
            Message::DownloadFinished(outcome) => {
                self.finish_download(outcome);
                Task::none()
            }
            Message::NewFrame => {
                if let Some(player) = self.player.as_mut() {
                    if let Some((width, height)) = player.observe_dimensions() {
                        log::info!("videoWidth={} videoHeight={}", width, height);
                        self.video_size = Some(Size::new(width as f32, height as f32));
                        self.log_geometry();
                    }
                }
                Task::none()
            }
            Message::EndOfStream => {
                self.loop_playback();
                Task::none()
            }
            Message::TogglePause => {
                let event = if self.lifecycle.is_resumed() {
                    LifecycleEvent::Pause
                } else {
                    LifecycleEvent::Resume
                };
                self.apply(event);
                Task::none()
            }
            Message::Quit => self.destroy(),
            Message::EventOccurred(event) => match event {
                iced::Event::Window(window::Event::Focused) => {
                    self.apply(LifecycleEvent::Resume);
                    Task::none()
                }
                iced::Event::Window(window::Event::Unfocused) => {
                    self.apply(LifecycleEvent::Pause);
                    Task::none()
                }
                iced::Event::Window(window::Event::Resized(size)) => {
                    self.window_size = Some(size);
                    self.log_geometry();
                    Task::none()
                }
                iced::Event::Window(window::Event::CloseRequested) => self.destroy(),
                iced::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
                    match key_message(&key) {
                        Some(message) => self.update(message),
                        None => Task::none(),
                    }
                }
                _ => Task::none(),
            },
        }
    }

    /// Subscribe to window events, plus the progress poll while it is live.
    pub fn subscription(&self) -> Subscription<Message> {
        let events = event::listen().map(Message::EventOccurred);

        if self.is_polling() {
            Subscription::batch([
                events,
                progress_poller::progress_poll_subscription(self.config.poll_interval()),
            ])
        } else {
            events
        }
    }

    fn is_polling(&self) -> bool {
        let running = self.job.as_ref().is_some_and(DownloadJob::is_running);
        gate::should_poll(self.lifecycle.is_polling(), running)
    }

    /// Render the view.
    pub fn view(&self) -> Element<'_, Message> {
        ui::render_main_view(self)
    }

    fn acquire(&mut self) -> Task<Message> {
        match source::resolve(&self.config) {
            Ok(Resolution::Ready(source)) => {
                self.start_playback(source);
                Task::none()
            }
            Ok(Resolution::Download(request)) => self.start_download(request),
            Err(e) => {
                log::error!("Cannot locate the video: {}", e);
                Task::none()
            }
        }
    }

    fn start_download(&mut self, request: DownloadRequest) -> Task<Message> {
        self.lifecycle.handle(LifecycleEvent::AcquisitionStarted);
        self.status = request.description.clone();

        let (job, completion) = self.downloads.enqueue(request);
        self.job = Some(job);

        Task::batch([
            Task::perform(completion, Message::DownloadFinished),
            Task::done(Message::PollProgress),
        ])
    }

    fn poll_progress(&mut self) {
        if !self.is_polling() {
            return;
        }
        let Some(job) = self.job.as_ref() else {
            return;
        };
        let Some(progress) = self.downloads.query(job.id()) else {
            return;
        };

        self.progress = progress;
        log::trace!(
            "Download {} progress: {}/{} bytes",
            job.id(),
            self.progress.downloaded,
            self.progress.total
        );

        let decision = gate::poll_decision(
            self.progress,
            self.config.threshold,
            self.awaiting_completion,
        );
        if decision == GateDecision::Wait {
            return;
        }

        log::info!(
            "Download reached {:.1}% (threshold {}%), starting playback",
            self.progress.percent().unwrap_or(100.0),
            self.config.threshold
        );
        let destination = job.request().destination.clone();
        if !self.start_playback(Source::File(destination)) {
            self.awaiting_completion = true;
        }
    }

    fn finish_download(&mut self, outcome: DownloadOutcome) {
        if let Some(job) = self.job.as_ref().filter(|job| job.id() == outcome.id) {
            self.progress = job.snapshot();
        }

        let opens = gate::opens_on_completion(self.lifecycle.phase(), outcome.result.is_ok());
        match outcome.result {
            Ok(path) => {
                log::debug!("downloadedFilePath={}", path.display());
                if opens {
                    self.start_playback(Source::File(path));
                }
            }
            Err(e) => {
                // Nothing else to do: the partial file stays unmarked and is
                // fetched again on the next run.
                log::warn!("Download {} failed: {}", outcome.id, e);
            }
        }
    }

    /// Open a player on `source`. Returns false if the pipeline could not be
    /// prepared.
    fn start_playback(&mut self, source: Source) -> bool {
        if let Some(previous) = self.player.take() {
            previous.release();
        }

        match Player::open(&source, self.config.loop_mode) {
            Ok(mut player) => {
                let transition = self.lifecycle.handle(LifecycleEvent::SourceReady);
                if transition.to == Phase::Paused {
                    player.pause();
                }
                self.player = Some(player);
                true
            }
            Err(e) => {
                log::error!("Failed to prepare playback of {}: {}", source, e);
                false
            }
        }
    }

    fn loop_playback(&mut self) {
        let transition = self.lifecycle.handle(LifecycleEvent::EndOfStream);
        let action = gate::loop_action(transition, self.config.loop_mode);
        if action != LoopAction::Ignore {
            log::debug!("Looping: {:?}", action);
        }

        match action {
            LoopAction::Ignore => {}
            LoopAction::Rewind => {
                if let Some(player) = self.player.as_mut() {
                    if let Err(e) = player.rewind() {
                        log::warn!("Rewind failed: {}", e);
                    }
                }
            }
            LoopAction::Recreate => {
                let Some(old) = self.player.take() else {
                    return;
                };
                let source = old.source().clone();
                old.release();

                match Player::open(&source, LoopMode::Recreate) {
                    Ok(player) => self.player = Some(player),
                    Err(e) => log::error!("Failed to reopen {}: {}", source, e),
                }
            }
        }
    }

    /// Forward a pause/resume to the lifecycle and the player.
    fn apply(&mut self, event: LifecycleEvent) {
        let transition = self.lifecycle.handle(event);
        if !transition.changed() {
            return;
        }
        let Some(player) = self.player.as_mut() else {
            return;
        };
        match transition.to {
            Phase::Playing => player.resume(),
            Phase::Paused => player.pause(),
            _ => {}
        }
    }

    fn destroy(&mut self) -> Task<Message> {
        self.lifecycle.handle(LifecycleEvent::Destroy);
        if let Some(player) = self.player.take() {
            player.release();
        }
        let destination = self.job.as_ref().map(|job| job.request().destination.clone());
        if let Some(job) = destination.and_then(|path| self.downloads.ongoing(&path)) {
            log::info!("Leaving with download {} unfinished", job.id());
        }
        iced::exit()
    }

    fn log_geometry(&self) {
        let (Some(video), Some(window)) = (self.video_size, self.window_size) else {
            return;
        };
        if let Some(geo) = geometry::crop_to_fill(video, window) {
            let (width, height) = geo.pixel_size();
            let (x, y) = geo.pixel_offset();
            log::debug!(
                "Crop to fill: scale={:.4} size={}x{} offset=({}, {})",
                geo.scale,
                width,
                height,
                x,
                y
            );
        }
    }
}

/// Keyboard shortcuts: `Esc` or `Q` (either case) quits, `Space` toggles pause.
fn key_message(key: &keyboard::Key) -> Option<Message> {
    match key.as_ref() {
        keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::Quit),
        keyboard::Key::Character(c) if c.eq_ignore_ascii_case("q") => Some(Message::Quit),
        keyboard::Key::Named(keyboard::key::Named::Space) => Some(Message::TogglePause),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys_ignore_case() {
        let lower = keyboard::Key::Character("q".into());
        let upper = keyboard::Key::Character("Q".into());
        let escape = keyboard::Key::Named(keyboard::key::Named::Escape);

        assert!(matches!(key_message(&lower), Some(Message::Quit)));
        assert!(matches!(key_message(&upper), Some(Message::Quit)));
        assert!(matches!(key_message(&escape), Some(Message::Quit)));
    }

    #[test]
    fn test_space_toggles_pause() {
        let space = keyboard::Key::Named(keyboard::key::Named::Space);
        assert!(matches!(key_message(&space), Some(Message::TogglePause)));
    }

    #[test]
    fn test_other_keys_are_ignored() {
        assert!(key_message(&keyboard::Key::Character("w".into())).is_none());
        assert!(key_message(&keyboard::Key::Named(keyboard::key::Named::Enter)).is_none());
    }
}
