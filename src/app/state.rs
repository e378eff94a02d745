use crate::pipeline::LookupOutcome;
use crate::player::youtube::VideoId;
use crate::title::SongIdentity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    LoadingVideo,
    LoadingLyrics,
    Ready,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
        }
    }
}

#[derive(Debug, Default)]
pub struct AppState {
    pub phase: Phase,
    pub video: Option<VideoId>,
    pub title: Option<String>,
    pub song: Option<SongIdentity>,
    pub lyrics: Option<String>,
    pub toast: Option<Toast>,

    /// Something changed since the last draw.
    pub dirty: bool,
    pub input_closed: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn busy(&self) -> bool {
        matches!(self.phase, Phase::LoadingVideo | Phase::LoadingLyrics)
    }

    pub fn begin_video(&mut self, video: VideoId) {
        self.video = Some(video);
        self.title = None;
        self.song = None;
        self.lyrics = None;
        self.phase = Phase::LoadingVideo;
        self.dirty = true;
    }

    pub fn begin_lookup(&mut self, title: String) {
        self.title = Some(title);
        self.song = None;
        self.lyrics = None;
        self.phase = Phase::LoadingLyrics;
        self.dirty = true;
    }

    pub fn apply_outcome(&mut self, outcome: LookupOutcome) {
        if let Some(notice) = outcome.notice() {
            self.toast = Some(Toast::error(notice));
        }
        match outcome {
            LookupOutcome::Found { song, lyrics } => {
                self.song = Some(song);
                self.lyrics = Some(lyrics);
            }
            LookupOutcome::LyricsNotFound { song } => {
                self.song = Some(song);
                self.lyrics = None;
            }
            LookupOutcome::SongNotIdentified | LookupOutcome::CredentialRequired => {
                self.song = None;
                self.lyrics = None;
            }
        }
        self.phase = Phase::Ready;
        self.dirty = true;
    }

    pub fn fail_video(&mut self, message: String) {
        self.phase = Phase::Idle;
        self.toast = Some(Toast::error(message));
        self.dirty = true;
    }

    pub fn notify(&mut self, toast: Toast) {
        self.toast = Some(toast);
        self.dirty = true;
    }
}
