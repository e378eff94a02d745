use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::credential::ApiCredential;
use crate::player::youtube::VideoId;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

pub fn spawn_input_task(tx: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(Event::Input(InputEvent::Line(line))).await.is_err() {
                        return;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "stdin read failed");
                    break;
                }
            }
        }
        let _ = tx.send(Event::Input(InputEvent::Closed)).await;
    });
}

pub fn map_line_to_action(line: &str) -> Option<Action> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match (cmd.to_ascii_lowercase().as_str(), rest) {
        ("q" | "quit" | "exit", "") => Some(Action::Quit),
        ("?" | "help", "") => Some(Action::Help),
        ("status", "") => Some(Action::Status),
        ("key", "clear") => Some(Action::ClearKey),
        ("key", raw) => Some(
            ApiCredential::new(raw)
                .map(Action::SetKey)
                .unwrap_or(Action::Invalid),
        ),
        ("title", title) if !title.is_empty() => Some(Action::LookupTitle(title.to_string())),
        _ => Some(
            VideoId::parse(line)
                .map(Action::LoadVideo)
                .unwrap_or(Action::Invalid),
        ),
    }
}
