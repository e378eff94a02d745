use super::state::{AppState, Phase, Toast, ToastKind};
use std::io::{self, Write};

pub const HELP: &str = "\
Commands:
  <youtube url or id>   load a video and show its lyrics
  title <video title>   look up lyrics for a title directly
  key <api key>         store the API key for AI title parsing
  key clear             forget the stored API key
  status                show the current setup
  help                  show this help
  quit                  exit";

/// Print the parts of the state that changed since the last call.
pub fn draw(out: &mut impl Write, state: &mut AppState) -> io::Result<()> {
    if !state.dirty {
        return Ok(());
    }
    state.dirty = false;

    match state.phase {
        Phase::Idle => {}
        Phase::LoadingVideo => {
            if let Some(video) = &state.video {
                writeln!(out, "Loading video {video}...")?;
            }
        }
        Phase::LoadingLyrics => {
            if let Some(title) = &state.title {
                writeln!(out, "Now playing: {title}")?;
            }
            writeln!(out, "Fetching lyrics...")?;
        }
        Phase::Ready => {
            if let Some(song) = &state.song {
                writeln!(out)?;
                writeln!(out, "== {song} ==")?;
            }
            if let Some(lyrics) = &state.lyrics {
                writeln!(out)?;
                writeln!(out, "{}", lyrics.trim_end())?;
                writeln!(out)?;
            }
            state.phase = Phase::Idle;
        }
    }

    if let Some(toast) = state.toast.take() {
        write_toast(out, &toast)?;
    }
    out.flush()
}

fn write_toast(out: &mut impl Write, toast: &Toast) -> io::Result<()> {
    let tag = match toast.kind {
        ToastKind::Info => "",
        ToastKind::Success => "ok: ",
        ToastKind::Error => "! ",
    };
    writeln!(out, "{tag}{}", toast.message)
}
