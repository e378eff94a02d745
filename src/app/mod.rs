pub mod actions;
pub mod events;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::credential::{ApiCredential, SharedCredential};
use crate::input;
use crate::pipeline::{Pipeline, RequestTokens};
use crate::player::VideoPlayer;
use crate::storage::Storage;
use actions::Action;
use anyhow::Context;
use events::{Event, LookupEvent, PlayerEvent};
use state::{AppState, Toast};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct App {
    cfg: Config,
    state: AppState,
    pipeline: Arc<Pipeline>,
    credential: SharedCredential,
    tokens: RequestTokens,
}

impl App {
    pub fn new(cfg: Config) -> anyhow::Result<Self> {
        let pipeline = Pipeline::from_config(&cfg).context("build lookup pipeline")?;
        let stored = Storage::open(&cfg.database_path())?.get_credential()?;

        Ok(Self {
            cfg,
            state: AppState::new(),
            pipeline: Arc::new(pipeline),
            credential: SharedCredential::new(stored),
            tokens: RequestTokens::new(),
        })
    }

    pub async fn run(&mut self, out: &mut impl Write) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(64);

        input::spawn_input_task(tx.clone());
        let player = VideoPlayer::new(tx.clone(), &self.cfg.player)?;

        writeln!(out, "Paste a YouTube link to show its lyrics. Type `help` for commands.")?;

        while let Some(ev) = rx.recv().await {
            match ev {
                Event::Input(events::InputEvent::Line(line)) => {
                    if let Some(action) = input::map_line_to_action(&line) {
                        self.handle_action(action, &player, &tx).await;
                    }
                }
                Event::Input(events::InputEvent::Closed) => {
                    self.state.input_closed = true;
                }
                Event::Player(pe) => self.handle_player(pe, &tx),
                Event::Lookup(le) => self.handle_lookup(le),
            }

            view::draw(out, &mut self.state).context("write output")?;

            if self.state.should_quit || (self.state.input_closed && !self.state.busy()) {
                break;
            }
        }

        Ok(())
    }

    async fn handle_action(&mut self, action: Action, player: &VideoPlayer, tx: &mpsc::Sender<Event>) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::Help => self.state.notify(Toast::info(view::HELP)),
            Action::Status => {
                let status = self.status_line();
                self.state.notify(Toast::info(status));
            }
            Action::LoadVideo(video_id) => {
                // Results of earlier lookups no longer apply.
                self.tokens.issue();
                self.state.begin_video(video_id.clone());
                player.load(video_id);
            }
            Action::LookupTitle(title) => {
                self.state.video = None;
                self.spawn_lookup(title, tx.clone());
            }
            Action::SetKey(key) => match self.store_key(Some(key.clone())).await {
                Ok(()) => {
                    self.credential.replace(Some(key));
                    self.state.notify(Toast::success("API key saved"));
                }
                Err(e) => self
                    .state
                    .notify(Toast::error(format!("could not save API key: {e:#}"))),
            },
            Action::ClearKey => match self.store_key(None).await {
                Ok(()) => {
                    self.credential.replace(None);
                    self.state.notify(Toast::success("API key cleared"));
                }
                Err(e) => self
                    .state
                    .notify(Toast::error(format!("could not clear API key: {e:#}"))),
            },
            Action::Invalid => {
                self.state
                    .notify(Toast::error("Invalid YouTube URL (type `help` for commands)"));
            }
        }
    }

    fn handle_player(&mut self, ev: PlayerEvent, tx: &mpsc::Sender<Event>) {
        match ev {
            PlayerEvent::TitleAvailable { video_id, title } => {
                if self.state.video.as_ref() != Some(&video_id) {
                    tracing::debug!(%video_id, "ignoring title of a video that is no longer loaded");
                    return;
                }
                self.spawn_lookup(title, tx.clone());
            }
            PlayerEvent::Error { video_id, message } => {
                if self.state.video.as_ref() == Some(&video_id) {
                    self.state.fail_video(message);
                }
            }
        }
    }

    fn handle_lookup(&mut self, ev: LookupEvent) {
        match ev {
            LookupEvent::Finished { token, outcome } => {
                if !self.tokens.is_current(token) {
                    tracing::debug!(?token, "dropping result of a superseded lookup");
                    return;
                }
                self.state.apply_outcome(outcome);
            }
        }
    }

    fn spawn_lookup(&mut self, title: String, tx: mpsc::Sender<Event>) {
        let token = self.tokens.issue();
        self.state.begin_lookup(title.clone());

        let pipeline = Arc::clone(&self.pipeline);
        let credential = self.credential.snapshot();

        tokio::spawn(async move {
            let outcome = pipeline.lookup(&title, credential.as_ref()).await;
            let _ = tx
                .send(Event::Lookup(LookupEvent::Finished { token, outcome }))
                .await;
        });
    }

    async fn store_key(&self, key: Option<ApiCredential>) -> anyhow::Result<()> {
        let path: PathBuf = self.cfg.database_path();
        tokio::task::spawn_blocking(move || {
            let storage = Storage::open(&path)?;
            match key {
                Some(key) => storage.set_credential(&key),
                None => storage.clear_credential().map(|_| ()),
            }
        })
        .await
        .context("storage task")?
    }

    fn status_line(&self) -> String {
        let key = if self.credential.snapshot().is_some() {
            "stored"
        } else {
            "not set"
        };
        format!(
            "parser: {:?}, lyrics provider: {}, API key: {}",
            self.cfg.parser.strategy,
            self.pipeline.backend().name(),
            key
        )
    }
}
