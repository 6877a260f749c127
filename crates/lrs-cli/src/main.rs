//! `lrs` — send xAPI statements about an application session.
//!
//! # Usage
//!
//! ```
//! lrs --config lrs.toml started
//! lrs --session "$(uuidgen)" completed
//! lrs send http://adlnet.gov/expapi/verbs/passed Passed
//! lrs --location preview
//! ```

mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use lrs_core::statement::Verb;
use lrs_http::{HttpLocationService, LrsClient};
use lrs_publisher::{DeliveryReport, Publisher};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Send xAPI statements to a record store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "lrs.toml")]
  config: PathBuf,

  /// Activity id (overrides `preferences.game_id`).
  #[arg(long)]
  game_id: Option<String>,

  /// Registration / session id (overrides `preferences.session_identifier`).
  #[arg(long)]
  session: Option<String>,

  /// Actor email (overrides `preferences.email`).
  #[arg(long)]
  email: Option<String>,

  /// Actor display name (overrides `preferences.display_name`).
  #[arg(long)]
  display_name: Option<String>,

  /// Attach the resolved location to statements.
  #[arg(long)]
  location: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Send an `initialized` statement.
  Started,
  /// Send a `completed` statement.
  Completed,
  /// Send a statement with an arbitrary verb.
  Send {
    /// Verb IRI, e.g. `http://adlnet.gov/expapi/verbs/passed`.
    verb_id: String,
    /// `en-US` display for the verb.
    display: String,
  },
  /// Build a statement and print it without sending.
  Preview {
    #[arg(long, requires = "display")]
    verb_id: Option<String>,
    #[arg(long, requires = "verb_id")]
    display: Option<String>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let mut settings = Settings::load(&cli.config)?;

  // CLI flags override the preferences table.
  let prefs = &mut settings.preferences;
  prefs.game_id = cli.game_id.or(prefs.game_id.take());
  prefs.session_identifier = cli.session.or(prefs.session_identifier.take());
  prefs.email = cli.email.or(prefs.email.take());
  prefs.display_name = cli.display_name.or(prefs.display_name.take());
  if cli.location {
    prefs.enable_user_location = Some(true);
  }

  let transport = LrsClient::new(settings.store)?;
  let location = HttpLocationService::new(settings.services)?;
  let publisher = Publisher::new(
    transport,
    location,
    settings.environment,
    settings.preferences,
  );

  let report = match cli.command {
    Command::Started => publisher.send_started().await,
    Command::Completed => publisher.send_completed().await,
    Command::Send { verb_id, display } => {
      publisher.send_statement(&verb_id, &display).await
    }
    Command::Preview { verb_id, display } => {
      let verb = match (verb_id, display) {
        (Some(id), Some(display)) => Verb::new(id, display),
        _ => Verb::initialized(),
      };
      let statement = publisher
        .statement(verb)
        .await
        .context("failed to build statement")?;
      println!("{}", serde_json::to_string_pretty(&statement)?);
      return Ok(());
    }
  }
  .context("failed to build statement")?;

  match report {
    DeliveryReport::Delivered(response) => {
      println!("{} {}", response.status, response.body);
      Ok(())
    }
    DeliveryReport::Failed(error) => bail!("delivery failed: {error}"),
  }
}
