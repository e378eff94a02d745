use crate::credential::ApiCredential;
use crate::player::youtube::VideoId;

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    Help,
    Status,

    LoadVideo(VideoId),
    /// Look up a title directly, as if the player had reported it.
    LookupTitle(String),

    SetKey(ApiCredential),
    ClearKey,

    /// Input that is neither a command nor a YouTube link.
    Invalid,
}
