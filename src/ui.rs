use iced::widget::{center, column, container, mouse_area, progress_bar, text};
use iced::{Color, ContentFit, Element, Length, Theme, mouse};
use iced_video_player::VideoPlayer;

use crate::crop;
use crate::lifecycle::Phase;
use crate::message::Message;
use crate::player::Player;
use crate::state::App;

const PROGRESS_WIDTH: f32 = 320.0;

/// Render the whole window: the fire once it plays, the download before.
pub fn render_main_view(app: &App) -> Element<'_, Message> {
    let content = match (&app.player, app.lifecycle.phase()) {
        (Some(player), Phase::Playing | Phase::Paused) => render_video(app, player),
        _ => render_acquiring(app),
    };

    let screen = container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .clip(true)
        .style(|_theme: &Theme| container::Style {
            background: Some(Color::BLACK.into()),
            ..Default::default()
        });

    mouse_area(screen)
        .interaction(mouse::Interaction::Hidden)
        .into()
}

/// Lay the video out crop-to-fill. Until the first frame reports a size it
/// is drawn plainly so frames keep flowing.
fn render_video<'a>(app: &'a App, player: &'a Player) -> Element<'a, Message> {
    let video = VideoPlayer::new(player.video())
        .width(Length::Fill)
        .height(Length::Fill)
        .content_fit(ContentFit::Fill)
        .on_end_of_stream(Message::EndOfStream)
        .on_new_frame(Message::NewFrame);

    crop::crop_to_fill(video, app.video_size).into()
}

fn render_acquiring(app: &App) -> Element<'_, Message> {
    let visible = app
        .job
        .as_ref()
        .is_some_and(|job| job.request().visible);
    if !visible {
        return center(text("")).into();
    }

    let (max, value) = app.progress.bar(app.config.threshold);
    let bar = container(progress_bar(0.0..=max.max(1.0), value))
        .width(Length::Fixed(PROGRESS_WIDTH));

    center(
        column![
            text(&app.status)
                .size(16)
                .color(Color::from_rgb8(255, 170, 80)),
            bar,
        ]
        .spacing(12),
    )
    .into()
}
