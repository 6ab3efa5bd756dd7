//! # Scaffold
//!
//! Adds a minigame to a Flutter project in one transaction: validate the request, parse
//! both registries, resolve every record, stage all writes in memory, then either report
//! or commit them.
//!
//! Validation or conflict errors leave the project byte-for-byte untouched. Running the
//! same request twice leaves the second run with nothing to do.
//!
//! ```rust,no_run
//! use mgkit_scaffold::{RunOptions, ScaffoldRequest, ScaffoldSettings, Subject, layout::ProjectLayout, run};
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let settings = ScaffoldSettings::load(root, None)?;
//! let layout = ProjectLayout::new(root, &settings)?;
//! let request = ScaffoldRequest::new(Subject::Math, 2, 1, "fraction_race");
//!
//! let report = run(&layout, request, RunOptions { dry_run: true, force: false })?;
//! println!("{report}");
//! # Ok::<(), mgkit_scaffold::ScaffoldError>(())
//! ```

pub mod apply;
mod error;
pub mod layout;
pub mod phase;
pub mod plan;
pub mod settings;
mod subject;
pub mod templates;
mod unit;

pub use crate::apply::Report;
pub use crate::error::{Result, ScaffoldError, ScaffoldErrorExt};
pub use crate::settings::ScaffoldSettings;
pub use crate::subject::Subject;
pub use crate::unit::{ScaffoldRequest, ScaffoldUnit};

use crate::layout::ProjectLayout;
use crate::phase::{Phase, PhaseTracker};
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Report the write set instead of writing it.
    pub dry_run: bool,
    /// Overwrite scaffold files whose content differs.
    pub force: bool,
}

/// Runs one scaffold transaction against `layout`.
///
/// # Errors
/// The first validation, registry, existing-file or I/O error. Nothing is written unless
/// every earlier phase succeeded.
#[instrument(skip_all, fields(slug = %request.slug, dry_run = options.dry_run))]
pub fn run(layout: &ProjectLayout, request: ScaffoldRequest, options: RunOptions) -> Result<Report> {
    let mut phases = PhaseTracker::default();

    let unit = phases.run(|| ScaffoldUnit::from_request(request))?;
    let writes = plan::plan_tracked(layout, &unit, options.force, &mut phases)?;

    phases.advance(if options.dry_run { Phase::DryRunReport } else { Phase::Committing });
    let report = phases.run(|| apply::apply(&writes, options.dry_run))?;
    phases.advance(Phase::Done);

    info!(game_id = unit.game_id(), files = report.paths().len(), "Scaffold finished");
    Ok(report)
}
