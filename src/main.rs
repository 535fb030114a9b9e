mod app;
mod cache;
mod config;
mod crop;
mod download;
mod error;
mod gate;
mod geometry;
mod gst_logger;
mod lifecycle;
mod message;
mod player;
mod progress;
mod progress_poller;
mod source;
mod state;
mod ui;

use clap::Parser;
use iced::window;

use config::Config;
use state::App;

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    gst_logger::install();

    if config.clear_cache {
        match config.cache_root() {
            Some(dir) => {
                if let Err(e) = cache::clear_cache(&dir) {
                    log::warn!("Could not clear cache {}: {}", dir.display(), e);
                }
            }
            None => log::warn!("No cache directory to clear"),
        }
    }

    let window = window_settings(config.windowed);

    iced::application(move || App::boot(config.clone()), App::update, App::view)
        .title("Hearth")
        .subscription(App::subscription)
        .window(window)
        .run()
}

/// Fullscreen and undecorated unless asked otherwise. Closing is handled by
/// the app so the player is released first.
fn window_settings(windowed: bool) -> window::Settings {
    window::Settings {
        fullscreen: !windowed,
        decorations: windowed,
        exit_on_close_request: false,
        ..Default::default()
    }
}
