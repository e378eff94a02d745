mod app;
mod config;
mod credential;
mod error;
mod input;
mod lyrics;
mod pipeline;
mod player;
mod storage;
#[cfg(test)]
mod test_support;
mod title;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "singalong", version, about = "Lyrics for the YouTube music video you are watching")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive session: paste YouTube links, get lyrics (default).
    Run,
    /// Load one video and print its lyrics.
    Watch {
        /// YouTube URL or video id.
        url: String,
    },
    /// Print the artist and song detected in a video title.
    Parse {
        title: String,
    },
    /// Look up lyrics for an artist and song.
    Lyrics {
        artist: String,
        song: String,
    },
    /// Manage the API key used for AI-assisted title parsing.
    Key {
        #[command(subcommand)]
        cmd: KeyCommand,
    },
}

#[derive(Debug, Subcommand)]
enum KeyCommand {
    /// Store a key (read from stdin when omitted).
    Set { key: Option<String> },
    /// Forget the stored key.
    Clear,
    /// Show whether a key is stored.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("singalong=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let mut app = app::App::new(cfg)?;
            let mut stdout = std::io::stdout();
            app.run(&mut stdout).await?;
        }
        Command::Watch { url } => {
            let video_id =
                player::youtube::VideoId::parse(&url).context("Invalid YouTube URL")?;
            let title = load_title(&cfg, video_id).await?;
            println!("Now playing: {title}");

            let pipeline = pipeline::Pipeline::from_config(&cfg)?;
            let credential = stored_credential(&cfg)?;
            let outcome = pipeline.lookup(&title, credential.as_ref()).await;
            print_outcome(&outcome);
        }
        Command::Parse { title } => {
            let parser = title::TitleParser::from_config(&cfg.parser)?;
            let credential = stored_credential(&cfg)?;
            match parser.parse(&title, credential.as_ref()).await {
                title::ParseOutcome::Identified { song, source } => {
                    println!("artist: {}", song.artist);
                    println!("song:   {}", song.song);
                    println!("via:    {source:?}");
                }
                title::ParseOutcome::NotIdentified => {
                    eprintln!("Could not determine song from the video title");
                }
                title::ParseOutcome::CredentialRequired => {
                    eprintln!("API key required: run `singalong key set`");
                }
            }
        }
        Command::Lyrics { artist, song } => {
            let song = title::SongIdentity::new(&artist, &song)
                .context("artist and song must not be empty")?;
            let backend = lyrics::LyricsBackend::from_config(&cfg.lyrics)?;
            match backend.resolve(&song).await {
                Some(text) => println!("{}", text.trim_end()),
                None => eprintln!("Lyrics not found"),
            }
        }
        Command::Key { cmd } => {
            let storage = storage::Storage::open(&cfg.database_path())?;
            match cmd {
                KeyCommand::Set { key } => {
                    let raw = match key {
                        Some(k) => k,
                        None => read_key_from_stdin()?,
                    };
                    let key = credential::ApiCredential::new(raw).context("API key is empty")?;
                    storage.set_credential(&key)?;
                    println!("Stored API key.");
                }
                KeyCommand::Clear => {
                    if storage.clear_credential()? {
                        println!("Cleared API key.");
                    } else {
                        println!("No API key was stored.");
                    }
                }
                KeyCommand::Status => {
                    let state = if storage.get_credential()?.is_some() {
                        "stored"
                    } else {
                        "not set"
                    };
                    println!("API key: {state}");
                }
            }
        }
    }

    Ok(())
}

fn stored_credential(cfg: &config::Config) -> anyhow::Result<Option<credential::ApiCredential>> {
    storage::Storage::open(&cfg.database_path())?.get_credential()
}

/// Load the video through the player and wait for its title.
async fn load_title(
    cfg: &config::Config,
    video_id: player::youtube::VideoId,
) -> anyhow::Result<String> {
    let (tx, mut rx) = mpsc::channel(4);
    let player = player::VideoPlayer::new(tx, &cfg.player)?;
    player.load(video_id);
    drop(player);

    match rx.recv().await {
        Some(app::events::Event::Player(app::events::PlayerEvent::TitleAvailable {
            title, ..
        })) => Ok(title),
        Some(app::events::Event::Player(app::events::PlayerEvent::Error { message, .. })) => {
            anyhow::bail!(message)
        }
        _ => anyhow::bail!("player stopped before the video loaded"),
    }
}

fn read_key_from_stdin() -> anyhow::Result<String> {
    eprint!("API key: ");
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("read API key from stdin")?;
    Ok(line)
}

fn print_outcome(outcome: &pipeline::LookupOutcome) {
    match outcome {
        pipeline::LookupOutcome::Found { song, lyrics } => {
            println!("== {song} ==");
            println!();
            println!("{}", lyrics.trim_end());
        }
        other => {
            if let pipeline::LookupOutcome::LyricsNotFound { song } = other {
                println!("== {song} ==");
            }
            if let Some(notice) = other.notice() {
                eprintln!("{notice}");
            }
        }
    }
}
