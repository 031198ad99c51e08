use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use stevedore_config::SecurityContextsDoc;
use stevedore_loader::{DocumentLoader, FsDocumentLoader};

/// Stevedore - validation for workflow export configuration
#[derive(Parser)]
#[command(name = "stevedore")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Validate configuration documents
  Validate {
    #[command(subcommand)]
    target: ValidateTarget,
  },
}

#[derive(Subcommand)]
enum ValidateTarget {
  /// Validate an export-actions document
  Exports {
    /// Path to the export-actions file (JSON)
    exports_file: PathBuf,

    /// Path to the security-contexts file the actions may reference
    #[arg(long)]
    security_contexts: Option<PathBuf>,
  },

  /// Validate a security-contexts document
  Contexts {
    /// Path to the security-contexts file (JSON)
    contexts_file: PathBuf,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Validate { target }) => match target {
      ValidateTarget::Exports {
        exports_file,
        security_contexts,
      } => {
        validate_exports(exports_file, security_contexts)?;
      }
      ValidateTarget::Contexts { contexts_file } => {
        validate_contexts(contexts_file)?;
      }
    },
    None => {
      println!("stevedore - use --help to see available commands");
    }
  }

  Ok(())
}

fn validate_exports(exports_file: PathBuf, contexts_file: Option<PathBuf>) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { validate_exports_async(exports_file, contexts_file).await })
}

async fn validate_exports_async(
  exports_file: PathBuf,
  contexts_file: Option<PathBuf>,
) -> Result<()> {
  let loader = FsDocumentLoader::new();

  // Contexts come first: action references are only meaningful against the
  // full resolved set. No contexts file means an empty set.
  let contexts = match &contexts_file {
    Some(path) => loader
      .load_security_contexts(path)
      .await
      .with_context(|| format!("failed to load security contexts: {}", path.display()))?,
    None => SecurityContextsDoc::default(),
  };

  let resolved = stevedore_security::resolve_all(&contexts)
    .context("security-contexts document was rejected")?;
  eprintln!("Resolved {} security contexts", resolved.len());

  let doc = loader
    .load_exports(&exports_file)
    .await
    .with_context(|| format!("failed to load export actions: {}", exports_file.display()))?;

  let known: HashSet<String> = resolved.keys().cloned().collect();
  let actions = stevedore_exports::validate(&doc.exports, &known)
    .context("export-actions document was rejected")?;

  eprintln!("Validated {} export actions", actions.len());
  println!("{}", serde_json::to_string_pretty(&actions)?);

  Ok(())
}

fn validate_contexts(contexts_file: PathBuf) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { validate_contexts_async(contexts_file).await })
}

async fn validate_contexts_async(contexts_file: PathBuf) -> Result<()> {
  let loader = FsDocumentLoader::new();

  let contexts = loader
    .load_security_contexts(&contexts_file)
    .await
    .with_context(|| format!("failed to load security contexts: {}", contexts_file.display()))?;

  let resolved = stevedore_security::resolve_all(&contexts)
    .context("security-contexts document was rejected")?;
  eprintln!("Resolved {} security contexts", resolved.len());

  let normalized: serde_json::Map<String, serde_json::Value> = resolved
    .values()
    .map(|context| {
      (
        context.name.clone(),
        serde_json::Value::Object(context.to_block()),
      )
    })
    .collect();
  println!("{}", serde_json::to_string_pretty(&normalized)?);

  Ok(())
}
