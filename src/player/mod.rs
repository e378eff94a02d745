pub mod youtube;

use crate::app::events::{Event, PlayerEvent};
use crate::config::PlayerConfig;
use anyhow::Context;
use tokio::sync::mpsc;
use youtube::VideoId;

/// Video player collaborator. Loading a video reads its metadata in the
/// background and reports the title on the channel handed to [`VideoPlayer::new`].
#[derive(Debug, Clone)]
pub struct VideoPlayer {
    http: reqwest::Client,
    oembed_url: String,
    event_tx: mpsc::Sender<Event>,
}

impl VideoPlayer {
    pub fn new(event_tx: mpsc::Sender<Event>, cfg: &PlayerConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("build player http client")?;
        Ok(Self {
            http,
            oembed_url: cfg.oembed_url.clone(),
            event_tx,
        })
    }

    pub fn load(&self, video_id: VideoId) {
        let http = self.http.clone();
        let oembed_url = self.oembed_url.clone();
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let ev = match youtube::fetch_title(&http, &oembed_url, &video_id).await {
                Ok(title) => {
                    tracing::debug!(%video_id, title = %title, "video metadata loaded");
                    PlayerEvent::TitleAvailable { video_id, title }
                }
                Err(e) => {
                    tracing::warn!(%video_id, error = %e, "could not load video metadata");
                    PlayerEvent::Error {
                        video_id,
                        message: format!("could not load video: {e}"),
                    }
                }
            };
            let _ = tx.send(Event::Player(ev)).await;
        });
    }
}
