//! `roster` — command-line front end for the student record store.
//!
//! # Usage
//!
//! ```
//! roster list --filter silva
//! roster show 3
//! roster add --name "João da Silva" --mother-name "Maria" --whatsapp 11987654321 \
//!   --street "Rua A" --neighborhood Centro --house-number 12 --city "São Paulo" \
//!   --school "Escola B" --grade "1º Ano" --shift "Manhã"
//! roster attach 3 laudo ./exame.pdf
//! ```

mod config;

use std::{
  path::{Path, PathBuf},
  str::FromStr as _,
};

use anyhow::{Context as _, Result, bail};
use clap::{Args, Parser, Subcommand};
use roster_core::{
  record::{Grade, Shift, StudentFields, StudentId},
  store::StudentStore as _,
  validate::{format_date, format_phone},
};
use roster_folders::{Category, StudentFolders, open_in_explorer};
use roster_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "roster", version, about = "Student record manager")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "roster.toml")]
  config: PathBuf,

  /// Emit machine-readable JSON instead of text.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// List all students, ordered by name.
  List {
    /// Case-insensitive substring match on name, grade or school.
    #[arg(long)]
    filter: Option<String>,
  },
  /// Show one student in full.
  Show { id: StudentId },
  /// Register a new student.
  Add(FieldArgs),
  /// Overwrite every field of an existing student.
  Edit {
    id: StudentId,
    #[command(flatten)]
    fields: FieldArgs,
  },
  /// Delete a student and their folder subtree.
  Delete { id: StudentId },
  /// Copy a file into a student's category folder.
  Attach {
    id: StudentId,
    /// One of: contrato, documentos, foto, relatorio, laudo.
    category: String,
    /// Source file to copy.
    source: PathBuf,
  },
  /// Open the student's folder in the platform file manager.
  Open { id: StudentId },
  /// Set (or clear, with --clear) the medical-report flag.
  Medical {
    id: StudentId,
    #[arg(long)]
    clear: bool,
  },
}

#[derive(Args)]
struct FieldArgs {
  #[arg(long)]
  name: String,
  /// Birth date; ISO `yyyy-mm-dd` input is converted to `dd/mm/yyyy`.
  #[arg(long)]
  birth_date: Option<String>,
  #[arg(long)]
  mother_name: String,
  #[arg(long)]
  father_name: Option<String>,
  /// WhatsApp phone, 11 digits in any punctuation.
  #[arg(long)]
  whatsapp: String,
  #[arg(long)]
  secondary_phone: Option<String>,
  #[arg(long)]
  email: Option<String>,
  #[arg(long)]
  street: String,
  #[arg(long)]
  neighborhood: String,
  #[arg(long)]
  house_number: String,
  #[arg(long)]
  complement: Option<String>,
  #[arg(long)]
  city: String,
  #[arg(long)]
  school: String,
  /// Grade label, e.g. "Educação Infantil" or "1º Ano".
  #[arg(long)]
  grade: String,
  /// Shift label: "Manhã" or "Tarde".
  #[arg(long)]
  shift: String,
}

impl FieldArgs {
  /// Parse the enum labels and apply display formatting to phones and the
  /// birth date, the way an interactive form would before saving.
  fn into_fields(self) -> Result<StudentFields> {
    let grade = Grade::parse_label(&self.grade)?;
    let shift = Shift::parse_label(&self.shift)?;

    Ok(StudentFields {
      name: self.name,
      birth_date: self.birth_date.map(|d| format_date(&d)),
      mother_name: self.mother_name,
      father_name: self.father_name,
      whatsapp_phone: format_phone(&self.whatsapp),
      secondary_phone: self.secondary_phone.map(|p| format_phone(&p)),
      email: self.email,
      street: self.street,
      neighborhood: self.neighborhood,
      house_number: self.house_number,
      complement: self.complement,
      city: self.city,
      school: self.school,
      grade,
      shift,
      has_medical_report: false,
    })
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = config::AppConfig::load(&cli.config)?;
  cfg.ensure_dirs()?;

  let folders = StudentFolders::new(cfg.students_root.clone());
  let mut store = SqliteStore::open(&cfg.db_path, folders)
    .with_context(|| format!("failed to open store at {}", cfg.db_path.display()))?;

  match cli.command {
    Command::List { filter } => list(&store, filter.as_deref(), cli.json),
    Command::Show { id } => show(&store, id, cli.json),
    Command::Add(args) => add(&mut store, args),
    Command::Edit { id, fields } => edit(&mut store, id, fields),
    Command::Delete { id } => delete(&mut store, id),
    Command::Attach { id, category, source } => attach(&store, id, &category, &source),
    Command::Open { id } => open_folder(&store, id),
    Command::Medical { id, clear } => medical(&mut store, id, !clear),
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

fn list(store: &SqliteStore, filter: Option<&str>, json: bool) -> Result<()> {
  let mut summaries = store.list()?;

  if let Some(needle) = filter {
    let needle = needle.to_lowercase();
    summaries.retain(|s| {
      s.name.to_lowercase().contains(&needle)
        || s.grade.to_string().to_lowercase().contains(&needle)
        || s.school.to_lowercase().contains(&needle)
    });
  }

  if json {
    println!("{}", serde_json::to_string_pretty(&summaries)?);
    return Ok(());
  }
  for s in &summaries {
    println!(
      "{:>4}  {:<30}  {:<18}  {:<6}  {}",
      s.id, s.name, s.grade, s.shift, s.school
    );
  }
  Ok(())
}

fn show(store: &SqliteStore, id: StudentId, json: bool) -> Result<()> {
  let Some(record) = store.get(id)? else {
    bail!("student {id} not found");
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&record)?);
    return Ok(());
  }

  let f = &record.fields;
  println!("#{}  {}", record.id, f.name);
  println!("  born:      {}", f.birth_date.as_deref().unwrap_or("-"));
  println!("  mother:    {}", f.mother_name);
  println!("  father:    {}", f.father_name.as_deref().unwrap_or("-"));
  println!("  whatsapp:  {}", f.whatsapp_phone);
  println!("  phone:     {}", f.secondary_phone.as_deref().unwrap_or("-"));
  println!("  email:     {}", f.email.as_deref().unwrap_or("-"));
  println!(
    "  address:   {}, {} {} ({}, {})",
    f.street,
    f.house_number,
    f.complement.as_deref().unwrap_or(""),
    f.neighborhood,
    f.city
  );
  println!("  school:    {} ({}, {})", f.school, f.grade, f.shift);
  println!("  medical:   {}", if f.has_medical_report { "yes" } else { "no" });
  if let Some(folder) = &record.folder_path {
    println!("  folder:    {}", folder.display());
  }
  println!("  since:     {}", record.created_at.format("%d/%m/%Y"));
  Ok(())
}

fn add(store: &mut SqliteStore, args: FieldArgs) -> Result<()> {
  let id = store.create(args.into_fields()?)?;
  println!("created student {id}");
  Ok(())
}

fn edit(store: &mut SqliteStore, id: StudentId, args: FieldArgs) -> Result<()> {
  let current = store
    .get(id)?
    .with_context(|| format!("student {id} not found"))?;

  // The flag has its own subcommand; a plain edit carries it over.
  let mut fields = args.into_fields()?;
  fields.has_medical_report = current.fields.has_medical_report;

  store.update(id, fields)?;
  println!("updated student {id}");
  Ok(())
}

fn delete(store: &mut SqliteStore, id: StudentId) -> Result<()> {
  store.delete(id)?;
  println!("deleted student {id}");
  Ok(())
}

fn attach(store: &SqliteStore, id: StudentId, category: &str, source: &Path) -> Result<()> {
  let category = Category::from_str(category).map_err(|_| {
    anyhow::anyhow!("unknown category {category:?} (expected contrato, documentos, foto, relatorio or laudo)")
  })?;

  let Some(record) = store.get(id)? else {
    bail!("student {id} not found");
  };
  let Some(folder) = record.folder_path else {
    bail!("student {id} has no folder on disk");
  };

  let stored = store.folders().attach(
    &folder,
    category,
    &record.fields.name,
    &record.fields.grade.to_string(),
    source,
  )?;
  println!("stored {}", stored.display());
  Ok(())
}

fn open_folder(store: &SqliteStore, id: StudentId) -> Result<()> {
  let Some((_, folder)) = store.name_and_folder(id)? else {
    bail!("student {id} not found");
  };
  let Some(folder) = folder else {
    bail!("student {id} has no folder on disk");
  };
  open_in_explorer(&folder);
  Ok(())
}

fn medical(store: &mut SqliteStore, id: StudentId, flag: bool) -> Result<()> {
  store.set_medical_report(id, flag)?;
  println!(
    "medical-report flag {} for student {id}",
    if flag { "set" } else { "cleared" }
  );
  Ok(())
}
