use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a recognized export target: {0}")]
pub struct ParseTargetError(pub String);

/// How much payload an RO-Crate directive includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrateContent {
  /// Metadata only.
  Minimal,
  /// Metadata plus output files.
  Output,
  /// Metadata plus all payload files.
  Full,
}

/// The kind of named item an export target points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
  Param,
  Envvar,
  Output,
}

impl ItemKind {
  pub fn as_str(self) -> &'static str {
    match self {
      ItemKind::Param => "param",
      ItemKind::Envvar => "envvar",
      ItemKind::Output => "output",
    }
  }

  fn parse(s: &str) -> Option<Self> {
    match s {
      "param" => Some(ItemKind::Param),
      "envvar" => Some(ItemKind::Envvar),
      "output" => Some(ItemKind::Output),
      _ => None,
    }
  }
}

/// One entry of an action's `what` list.
///
/// On the wire a target is a string: either one of six fixed directives
/// (`:working-directory:`, `:stage-rocrate:`, `:stage-rocrate:full`,
/// `:provenance-rocrate:`, `:provenance-rocrate:output`,
/// `:provenance-rocrate:full`) or an item reference of the form
/// `kind:name` / `kind:block:name` with `kind` one of `param`, `envvar`,
/// `output` and every segment non-empty and free of `:` and `;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
  /// The whole working directory of the staged execution.
  WorkingDirectory,
  /// The staging RO-Crate; `full` includes the payload files.
  StageCrate { full: bool },
  /// The provenance RO-Crate.
  ProvenanceCrate(CrateContent),
  /// A named parameter, environment variable or output.
  Item {
    kind: ItemKind,
    block: Option<String>,
    name: String,
  },
}

impl FromStr for ExportTarget {
  type Err = ParseTargetError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      ":working-directory:" => return Ok(ExportTarget::WorkingDirectory),
      ":stage-rocrate:" => return Ok(ExportTarget::StageCrate { full: false }),
      ":stage-rocrate:full" => return Ok(ExportTarget::StageCrate { full: true }),
      ":provenance-rocrate:" => {
        return Ok(ExportTarget::ProvenanceCrate(CrateContent::Minimal));
      }
      ":provenance-rocrate:output" => {
        return Ok(ExportTarget::ProvenanceCrate(CrateContent::Output));
      }
      ":provenance-rocrate:full" => {
        return Ok(ExportTarget::ProvenanceCrate(CrateContent::Full));
      }
      _ => {}
    }

    let err = || ParseTargetError(s.to_string());

    let mut segments = s.split(':');
    let kind = segments
      .next()
      .and_then(ItemKind::parse)
      .ok_or_else(err)?;

    let second = segments.next();
    let third = segments.next();
    if segments.next().is_some() {
      // kind:a:b:c has one segment too many
      return Err(err());
    }

    let (block, name) = match (second, third) {
      (Some(name), None) => (None, name),
      (Some(block), Some(name)) => (Some(block), name),
      _ => return Err(err()),
    };

    if name.is_empty() || name.contains(';') {
      return Err(err());
    }
    if let Some(block) = block
      && (block.is_empty() || block.contains(';'))
    {
      return Err(err());
    }

    Ok(ExportTarget::Item {
      kind,
      block: block.map(str::to_string),
      name: name.to_string(),
    })
  }
}

impl fmt::Display for ExportTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ExportTarget::WorkingDirectory => f.write_str(":working-directory:"),
      ExportTarget::StageCrate { full: false } => f.write_str(":stage-rocrate:"),
      ExportTarget::StageCrate { full: true } => f.write_str(":stage-rocrate:full"),
      ExportTarget::ProvenanceCrate(CrateContent::Minimal) => {
        f.write_str(":provenance-rocrate:")
      }
      ExportTarget::ProvenanceCrate(CrateContent::Output) => {
        f.write_str(":provenance-rocrate:output")
      }
      ExportTarget::ProvenanceCrate(CrateContent::Full) => {
        f.write_str(":provenance-rocrate:full")
      }
      ExportTarget::Item {
        kind,
        block: Some(block),
        name,
      } => write!(f, "{}:{}:{}", kind.as_str(), block, name),
      ExportTarget::Item {
        kind,
        block: None,
        name,
      } => write!(f, "{}:{}", kind.as_str(), name),
    }
  }
}

impl Serialize for ExportTarget {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for ExportTarget {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(D::Error::custom)
  }
}
