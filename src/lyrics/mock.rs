use super::LyricsProvider;
use crate::error::ProviderError;
use crate::title::SongIdentity;
use async_trait::async_trait;

/// Offline provider that answers every lookup with placeholder text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProvider;

#[async_trait]
impl LyricsProvider for MockProvider {
    type Key = SongIdentity;

    fn name(&self) -> &'static str {
        "mock"
    }

    async fn search(&self, song: &SongIdentity) -> Result<Option<SongIdentity>, ProviderError> {
        Ok(Some(song.clone()))
    }

    async fn fetch(&self, song: &SongIdentity) -> Result<Option<String>, ProviderError> {
        Ok(Some(format!(
            "Placeholder lyrics for \"{}\" by {}.\n\n\
             Configure a lyrics provider to see\n\
             the real lyrics here.",
            song.song, song.artist
        )))
    }
}
