//! `unimedia`: command-line shell over the university media catalogue.
//!
//! Every invocation loads the binary snapshot (if present), merges the
//! roster document, runs one command and, if the command changed anything,
//! writes both files back.
//!
//! # Usage
//!
//! ```text
//! unimedia seed
//! unimedia media add document DOC010 --title "Rust" --author "Ferris" --year 2024 --param 420 --subject NFA032
//! unimedia student add jean.dupont@isae.edu.lb secret --specialty Informatique --subject NFA032
//! unimedia subject add NFP121 "Database Systems" --specialty Informatique
//! unimedia search --title java --subject NFA032
//! unimedia top --specialty Informatique --limit 3
//! UNIMEDIA_SNAPSHOT_PATH=/tmp/lib.bin unimedia media list --json
//! ```

mod accounts;
mod app;
mod commands;
mod seed;

use std::path::PathBuf;

use anyhow::Context as _;
use app::Workspace;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "unimedia", version, about = "University media catalogue")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "unimedia.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Add the demo subjects and sample media.
  Seed,

  /// Check a set of credentials.
  Login {
    #[arg(value_enum)]
    role:     Role,
    username: String,
    password: String,
  },

  /// Register students.
  #[command(subcommand)]
  Student(StudentCommand),

  /// Register administrators.
  #[command(subcommand)]
  Admin(AdminCommand),

  /// Add or remove subjects.
  #[command(subcommand)]
  Subject(SubjectCommand),

  /// Browse and edit media.
  #[command(subcommand)]
  Media(MediaCommand),

  /// Find media by title, author and subject.
  Search {
    /// Case-insensitive title fragment.
    #[arg(long)]
    title:   Option<String>,
    /// Case-insensitive author fragment.
    #[arg(long)]
    author:  Option<String>,
    /// Exact subject code.
    #[arg(long)]
    subject: Option<String>,
    /// Match any criterion instead of all of them.
    #[arg(long)]
    any:     bool,
  },

  /// Most accessed media, overall or within a specialty or subject.
  Top {
    #[arg(long, conflicts_with = "subject")]
    specialty: Option<String>,
    #[arg(long)]
    subject:   Option<String>,
    #[arg(short, long, default_value_t = 5)]
    limit:     usize,
  },

  /// Write every media item to a file.
  Export {
    #[arg(value_enum)]
    format: FormatArg,
    path:   PathBuf,
  },
}

#[derive(Subcommand, Debug)]
enum StudentCommand {
  /// Add a student. The username must not belong to any account yet.
  Add {
    username:  String,
    password:  String,
    #[arg(long)]
    specialty: String,
    /// Subject code to enroll in. Repeatable; unknown codes are created.
    #[arg(long = "subject")]
    subjects:  Vec<String>,
    /// Derived from the username when omitted.
    #[arg(long)]
    family:    Option<String>,
    /// Derived from the username when omitted.
    #[arg(long)]
    given:     Option<String>,
  },
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
  /// Add an administrator. The username must not belong to any account yet.
  Add {
    username: String,
    password: String,
    /// Defaults to the username.
    #[arg(long)]
    email:    Option<String>,
    #[arg(long)]
    family:   Option<String>,
    #[arg(long)]
    given:    Option<String>,
  },
}

#[derive(Subcommand, Debug)]
enum SubjectCommand {
  /// Add a subject and attach it to a specialty.
  Add {
    code:      String,
    name:      String,
    #[arg(long, default_value = "Informatique")]
    specialty: String,
  },

  /// Remove a subject from the catalogue and its specialties.
  Remove { code: String },
}

#[derive(Subcommand, Debug)]
enum MediaCommand {
  /// List every media item.
  List {
    #[arg(long)]
    json: bool,
  },

  /// Show one media item. Counts as an access.
  Show { id: String },

  /// Build a media item through the factory registry and add it.
  Add {
    /// Factory name: document, video or quiz.
    media_type:  String,
    id:          String,
    #[arg(long)]
    title:       String,
    #[arg(long)]
    author:      String,
    #[arg(long)]
    year:        i32,
    #[arg(long, default_value = "")]
    description: String,
    /// Variant parameter, in order (page count, duration, difficulty...).
    #[arg(long = "param")]
    params:      Vec<String>,
    /// Subject code to file the item under. Repeatable.
    #[arg(long = "subject")]
    subjects:    Vec<String>,
  },

  /// Remove a media item.
  Remove { id: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Role {
  Admin,
  Student,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
  Xml,
  Csv,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Settings read from the config file and `UNIMEDIA_*` variables.
#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
  /// Roster document (administrators, specialties, students).
  pub document_path:   PathBuf,
  /// Binary snapshot of the whole library.
  pub snapshot_path:   PathBuf,
  /// Log "new media" notices for students; when false they are dropped.
  pub notify_students: bool,
}

fn load_settings(path: PathBuf) -> anyhow::Result<Settings> {
  let settings = config::Config::builder()
    .set_default("document_path", "universite.xml")?
    .set_default("snapshot_path", "library.bin")?
    .set_default("notify_students", true)?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("UNIMEDIA"))
    .build()
    .context("failed to read config file")?;

  settings
    .try_deserialize()
    .context("failed to deserialise Settings")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = load_settings(cli.config)?;
  let mut workspace = Workspace::open(&settings)?;

  let changed = match cli.command {
    Command::Seed => commands::seed_demo(&mut workspace)?,
    Command::Login {
      role,
      username,
      password,
    } => match role {
      Role::Admin => commands::login_admin(&workspace, &username, &password)?,
      Role::Student => {
        commands::login_student(&workspace, &username, &password)?
      }
    },
    Command::Student(StudentCommand::Add {
      username,
      password,
      specialty,
      subjects,
      family,
      given,
    }) => commands::add_student(&mut workspace, accounts::NewStudent {
      username,
      password,
      family_name: family,
      given_name: given,
      specialty,
      subjects,
    })?,
    Command::Admin(AdminCommand::Add {
      username,
      password,
      email,
      family,
      given,
    }) => commands::add_administrator(&mut workspace, accounts::NewAdministrator {
      username,
      password,
      family_name: family,
      given_name: given,
      email,
    })?,
    Command::Subject(SubjectCommand::Add {
      code,
      name,
      specialty,
    }) => commands::add_subject(&mut workspace, &code, &name, &specialty)?,
    Command::Subject(SubjectCommand::Remove { code }) => {
      commands::remove_subject(&mut workspace, &code)?
    }
    Command::Media(MediaCommand::List { json }) => {
      commands::list_media(&workspace, json)?
    }
    Command::Media(MediaCommand::Show { id }) => {
      commands::show_media(&mut workspace, &id)?
    }
    Command::Media(MediaCommand::Add {
      media_type,
      id,
      title,
      author,
      year,
      description,
      params,
      subjects,
    }) => commands::add_media(&mut workspace, &media_type, commands::NewMedia {
      id,
      title,
      author,
      year,
      description,
      params,
      subjects,
    })?,
    Command::Media(MediaCommand::Remove { id }) => {
      commands::remove_media(&mut workspace, &id)?
    }
    Command::Search {
      title,
      author,
      subject,
      any,
    } => commands::search(&workspace, title, author, subject, any)?,
    Command::Top {
      specialty,
      subject,
      limit,
    } => commands::top(&workspace, specialty.as_deref(), subject.as_deref(), limit)?,
    Command::Export { format, path } => {
      let format = match format {
        FormatArg::Xml => unimedia_text::ExportFormat::Xml,
        FormatArg::Csv => unimedia_text::ExportFormat::Csv,
      };
      commands::export(&workspace, format, &path)?
    }
  };

  if changed {
    workspace.save()?;
  }
  Ok(())
}
