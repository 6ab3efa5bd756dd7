//! Reporting or committing a [`WriteSet`].

use crate::error::{Result, ScaffoldErrorExt};
use crate::plan::WriteSet;
use std::fmt;
use std::fs;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// The write set was empty.
    NoChanges,
    /// Relative paths that would have been written.
    DryRun(Vec<String>),
    /// Relative paths that were written, in order.
    Written(Vec<String>),
}

impl Report {
    /// Paths mentioned by the report; empty for [`Report::NoChanges`].
    #[must_use]
    pub fn paths(&self) -> &[String] {
        match self {
            Self::NoChanges => &[],
            Self::DryRun(paths) | Self::Written(paths) => paths,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoChanges => write!(f, "No changes required."),
            Self::DryRun(paths) => {
                let lines: Vec<_> = paths.iter().map(|p| format!("[dry-run] would write {p}")).collect();
                write!(f, "{}", lines.join("\n"))
            },
            Self::Written(paths) => {
                let lines: Vec<_> = paths.iter().map(|p| format!("updated {p}")).collect();
                write!(f, "{}", lines.join("\n"))
            },
        }
    }
}

/// Writes every staged file, or only lists them when `dry_run` is set.
///
/// Parent directories are created as needed. Contents are written as staged, which
/// always means `\n` line endings and a single trailing newline.
///
/// # Errors
/// Returns [`crate::ScaffoldError::Io`] on the first failing directory creation or write.
/// Files written before the failure are not rolled back.
pub fn apply(writes: &WriteSet, dry_run: bool) -> Result<Report> {
    if writes.is_empty() {
        return Ok(Report::NoChanges);
    }

    let paths: Vec<String> = writes.iter().map(|w| w.relative.clone()).collect();
    if dry_run {
        return Ok(Report::DryRun(paths));
    }

    for write in writes.iter() {
        if let Some(parent) = write.path.parent() {
            fs::create_dir_all(parent).context(format!("creating directory for {}", write.relative))?;
        }
        fs::write(&write.path, &write.content).context(format!("writing {}", write.relative))?;
        info!(path = %write.relative, kind = ?write.kind, "Wrote file");
    }

    Ok(Report::Written(paths))
}
