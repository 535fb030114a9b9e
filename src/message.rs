use iced::Event;

use crate::download::DownloadOutcome;

#[derive(Clone, Debug)]
pub enum Message {
    PollProgress,
    DownloadFinished(DownloadOutcome),
    NewFrame,
    EndOfStream,
    TogglePause,
    Quit,
    EventOccurred(Event),
}
