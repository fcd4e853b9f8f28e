//! One function per subcommand. Each returns whether the library changed
//! and needs saving.

use std::path::Path;

use anyhow::{Context as _, bail};
use unimedia_core::{
  factory::{MediaHeader, Param},
  filter::{AuthorFilter, CompositeFilter, SubjectFilter, TitleFilter},
  media::Media,
  report::most_accessed_report,
};
use unimedia_text::ExportFormat;

use crate::{
  accounts::{self, NewAdministrator, NewStudent},
  app::Workspace,
  seed,
};

pub fn seed_demo(ws: &mut Workspace) -> anyhow::Result<bool> {
  let added = seed::populate(&mut ws.library, &ws.factories)
    .context("failed to build demo media")?;
  println!("Added {added} demo media.");
  Ok(true)
}

// ─── Login ───────────────────────────────────────────────────────────────────

pub fn login_admin(
  ws: &Workspace,
  username: &str,
  password: &str,
) -> anyhow::Result<bool> {
  let Some(admin) = ws.library.authenticate_administrator(username, password)
  else {
    bail!("invalid credentials");
  };
  println!("Welcome, {admin}");
  println!(
    "{} media, {} students, {} specialties",
    ws.library.media_count(),
    ws.library.all_students().len(),
    ws.library.all_specialties().len()
  );
  Ok(false)
}

/// Greet the student and list the media filed under their subjects.
pub fn login_student(
  ws: &Workspace,
  username: &str,
  password: &str,
) -> anyhow::Result<bool> {
  let Some(student) = ws.library.authenticate_student(username, password)
  else {
    bail!("invalid credentials");
  };
  println!("Welcome, {student}");

  let mut filter = CompositeFilter::or();
  for code in &student.enrolled_subjects {
    filter.push(SubjectFilter::new(code.as_str()));
  }
  let media = ws.library.search_media(&filter);
  if media.is_empty() {
    println!("No media for your subjects yet.");
  } else {
    println!("Media for your subjects:");
    print_media(&media);
  }
  Ok(false)
}

// ─── Accounts & subjects ─────────────────────────────────────────────────────

pub fn add_student(ws: &mut Workspace, new: NewStudent) -> anyhow::Result<bool> {
  let student = accounts::register_student(&mut ws.library, new)
    .context("failed to add student")?;
  println!("Added {student}");
  Ok(true)
}

pub fn add_administrator(
  ws: &mut Workspace,
  new: NewAdministrator,
) -> anyhow::Result<bool> {
  let admin = accounts::register_administrator(&mut ws.library, new)
    .context("failed to add administrator")?;
  println!("Added {admin}");
  Ok(true)
}

pub fn add_subject(
  ws: &mut Workspace,
  code: &str,
  name: &str,
  specialty: &str,
) -> anyhow::Result<bool> {
  accounts::register_subject(&mut ws.library, code, name, specialty)
    .context("failed to add subject")?;
  println!("Added subject {code} to {specialty}");
  Ok(true)
}

pub fn remove_subject(ws: &mut Workspace, code: &str) -> anyhow::Result<bool> {
  if !ws.library.remove_subject(code) {
    bail!("no subject with code {code:?}");
  }
  println!("Removed subject {code}; enrolled students keep it");
  Ok(true)
}

// ─── Media ───────────────────────────────────────────────────────────────────

pub fn list_media(ws: &Workspace, json: bool) -> anyhow::Result<bool> {
  let media = ws.library.all_media();
  if json {
    let out = serde_json::to_string_pretty(&media)
      .context("failed to serialise media")?;
    println!("{out}");
  } else {
    print_media(&media);
  }
  Ok(false)
}

pub fn show_media(ws: &mut Workspace, id: &str) -> anyhow::Result<bool> {
  let Some(media) = ws.library.get_media(id) else {
    bail!("no media with id {id:?}");
  };
  println!("{media}");
  println!("  {}", media.details());
  if !media.description.is_empty() {
    println!("  {}", media.description);
  }
  if !media.subjects.is_empty() {
    let subjects: Vec<&str> = media.subjects.iter().map(String::as_str).collect();
    println!("  subjects: {}", subjects.join(", "));
  }
  println!("  accesses: {}", media.access_count());
  Ok(true)
}

/// Fields of `media add`.
pub struct NewMedia {
  pub id:          String,
  pub title:       String,
  pub author:      String,
  pub year:        i32,
  pub description: String,
  pub params:      Vec<String>,
  pub subjects:    Vec<String>,
}

pub fn add_media(
  ws: &mut Workspace,
  media_type: &str,
  new: NewMedia,
) -> anyhow::Result<bool> {
  let params: Vec<Param> = new.params.iter().map(|p| Param::parse(p)).collect();
  let mut media = ws
    .factories
    .create(
      media_type,
      MediaHeader {
        id:               new.id,
        title:            new.title,
        author:           new.author,
        publication_year: new.year,
        description:      new.description,
      },
      &params,
    )
    .with_context(|| format!("failed to build {media_type} media"))?;

  for code in new.subjects {
    if ws.library.get_subject(&code).is_none() {
      tracing::warn!(subject = %code, "subject is not registered");
    }
    media.add_subject(code);
  }

  println!("Added {media}");
  ws.library.add_media(media);
  Ok(true)
}

pub fn remove_media(ws: &mut Workspace, id: &str) -> anyhow::Result<bool> {
  if !ws.library.remove_media(id) {
    bail!("no media with id {id:?}");
  }
  println!("Removed {id}");
  Ok(true)
}

// ─── Queries ─────────────────────────────────────────────────────────────────

/// With no criteria, an all-of search lists everything and an any-of search
/// lists nothing.
pub fn search(
  ws: &Workspace,
  title: Option<String>,
  author: Option<String>,
  subject: Option<String>,
  any: bool,
) -> anyhow::Result<bool> {
  let mut filter = if any {
    CompositeFilter::or()
  } else {
    CompositeFilter::and()
  };
  if let Some(title) = title {
    filter.push(TitleFilter::new(&title));
  }
  if let Some(author) = author {
    filter.push(AuthorFilter::new(&author));
  }
  if let Some(code) = subject {
    filter.push(SubjectFilter::new(code));
  }

  let found = ws.library.search_media(&filter);
  println!("{} result(s)", found.len());
  print_media(&found);
  Ok(false)
}

pub fn top(
  ws: &Workspace,
  specialty: Option<&str>,
  subject: Option<&str>,
  limit: usize,
) -> anyhow::Result<bool> {
  if let Some(name) = specialty {
    let Some(report) = most_accessed_report(&ws.library, name, limit) else {
      bail!("unknown specialty {name:?}");
    };
    print!("{report}");
    return Ok(false);
  }

  let ranked = match subject {
    Some(code) => ws.library.most_accessed_by_subject(code, limit),
    None => ws.library.most_accessed_media(limit),
  };
  for (rank, media) in ranked.iter().enumerate() {
    println!(
      "{}. {} (ID: {}) - {} accesses",
      rank + 1,
      media.title,
      media.id,
      media.access_count()
    );
  }
  Ok(false)
}

pub fn export(
  ws: &Workspace,
  format: ExportFormat,
  path: &Path,
) -> anyhow::Result<bool> {
  let media = ws.library.all_media();
  unimedia_text::export_media_to_path(format, &media, path)
    .with_context(|| format!("failed to export to {}", path.display()))?;
  println!("Exported {} media to {}", media.len(), path.display());
  Ok(false)
}

fn print_media(media: &[Media]) {
  for m in media {
    println!("{m}  {} accesses", m.access_count());
  }
}
