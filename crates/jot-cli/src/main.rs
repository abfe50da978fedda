//! jot command-line client.
//!
//! A thin harness over [`jot_service::NoteService`] for working with notes
//! from a terminal. Reads `config.toml` (or the path given with `--config`)
//! for the data directory; the SQLite file, the blob directory, and the
//! credential file all live under it.
//!
//! Logging in to a never-seen username creates the account; there is no
//! separate signup.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use jot_blob::BlobStore;
use jot_core::{note::NoteId, user::User};
use jot_service::{CredentialStore, NoteService};
use jot_store_sqlite::SqliteStore;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "jot — a local note store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Verify credentials, creating the account on first use.
  Login { username: String },

  /// List your notes, most recently edited first.
  List { username: String },

  /// Print a note's title and body.
  Show { username: String, note_id: NoteId },

  /// Create a note, or overwrite an existing one with --note-id.
  Save {
    username: String,
    title:    String,

    /// Overwrite this note instead of creating a new one.
    #[arg(long)]
    note_id: Option<NoteId>,

    /// Note body; read from stdin when omitted.
    #[arg(long)]
    body: Option<String>,
  },

  /// Delete a note.
  Delete { username: String, note_id: NoteId },

  /// Delete the account and everything it owns.
  DeleteAccount { username: String },
}

/// Runtime configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
struct AppConfig {
  data_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .set_default("data_dir", "~/.local/share/jot")?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("JOT"))
    .build()
    .context("failed to read config file")?;

  let app_cfg: AppConfig = settings
    .try_deserialize()
    .context("failed to deserialise AppConfig")?;

  let data_dir = expand_tilde(&app_cfg.data_dir);
  tracing::debug!(?data_dir, "opening stores");

  let (store, service) = open_stores(&data_dir).await?;

  match cli.command {
    Command::Login { username } => {
      let user = authenticate(&service, &username).await?;
      println!("logged in as {} (user {})", user.user_name, user.user_id);
    }

    Command::List { username } => {
      let user = authenticate(&service, &username).await?;
      let notes = service.list_notes(user.user_id).await?;
      if notes.is_empty() {
        println!("no notes");
      }
      for note in notes {
        println!(
          "{:>6}  {}  {}  ({})",
          note.note_id,
          note.last_edited.format("%Y-%m-%d %H:%M"),
          note.title,
          note.note_abstract,
        );
      }
    }

    Command::Show { username, note_id } => {
      authenticate(&service, &username).await?;
      let (title, body) = service.load_note(note_id).await?;
      println!("{title}");
      println!();
      println!("{body}");
    }

    Command::Save {
      username,
      title,
      note_id,
      body,
    } => {
      let user = authenticate(&service, &username).await?;
      let body = match body {
        Some(body) => body,
        None => read_body_from_stdin()?,
      };
      let assigned = service
        .save_note(note_id, user.user_id, &title, &body)
        .await?;
      println!("saved note {assigned}");
    }

    Command::Delete { username, note_id } => {
      let user = authenticate(&service, &username).await?;
      service.delete_note(note_id, user.user_id).await?;
      println!("deleted note {note_id}");
    }

    Command::DeleteAccount { username } => {
      let user = authenticate(&service, &username).await?;
      service.delete_account(user.user_id, &username).await?;
      println!("deleted account {username}");
    }
  }

  store.close().await.context("failed to close store")?;

  Ok(())
}

/// Open the three stores under `data_dir` and wire them into a service,
/// handing back a store handle so `main` can close it on the way out.
async fn open_stores(
  data_dir: &Path,
) -> anyhow::Result<(SqliteStore, NoteService<SqliteStore>)> {
  tokio::fs::create_dir_all(data_dir)
    .await
    .with_context(|| format!("failed to create data dir {data_dir:?}"))?;

  let store = SqliteStore::open(data_dir.join("notes.db"))
    .await
    .with_context(|| format!("failed to open store in {data_dir:?}"))?;
  let blobs = BlobStore::open(data_dir.join("note_files"))
    .await
    .context("failed to open blob store")?;
  let credentials = CredentialStore::open(data_dir.join("credentials.json"))
    .await
    .context("failed to open credential store")?;

  let service = NoteService::new(store.clone(), blobs, credentials);
  Ok((store, service))
}

/// Prompt for a password and resolve the user, creating the account when the
/// username is new.
async fn authenticate(
  service: &NoteService<SqliteStore>,
  username: &str,
) -> anyhow::Result<User> {
  let password = prompt_password()?;
  service
    .login(username, &password)
    .await?
    .ok_or_else(|| anyhow::anyhow!("login failed for {username}"))
}

/// Read a password from stdin.
fn prompt_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  let stdin = io::stdin();
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  stdin.lock().read_line(&mut line)?;
  Ok(
    line
      .trim_end_matches('\n')
      .trim_end_matches('\r')
      .to_string(),
  )
}

/// Read a note body from stdin until EOF.
fn read_body_from_stdin() -> anyhow::Result<String> {
  use std::io::Read as _;
  let mut body = String::new();
  std::io::stdin().read_to_string(&mut body)?;
  Ok(body)
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
