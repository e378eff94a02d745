use crate::pipeline::{LookupOutcome, RequestToken};
use crate::player::youtube::VideoId;

#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    Player(PlayerEvent),
    Lookup(LookupEvent),
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Line(String),
    /// stdin reached end of file.
    Closed,
}

#[derive(Debug, Clone)]
pub enum PlayerEvent {
    TitleAvailable { video_id: VideoId, title: String },
    Error { video_id: VideoId, message: String },
}

#[derive(Debug, Clone)]
pub enum LookupEvent {
    Finished {
        token: RequestToken,
        outcome: LookupOutcome,
    },
}
