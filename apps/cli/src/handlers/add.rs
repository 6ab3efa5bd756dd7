use crate::models::args::Cli;
use anyhow::{Context, Result};
use mgkit_logger::Logger;
use mgkit_scaffold::layout::ProjectLayout;
use mgkit_scaffold::{Report, RunOptions, ScaffoldSettings, run};
use std::path::PathBuf;

const LOGGER_NAME: &str = "add-minigame";

/// Loads settings for the target project, installs logging and runs one scaffold.
///
/// # Errors
/// Returns the first settings, logger, validation, conflict or I/O error.
pub fn add_minigame(cli: &Cli) -> Result<Report> {
    let root = match &cli.project_root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Failed to resolve the current directory")?,
    };

    let settings = ScaffoldSettings::load(&root, cli.config.as_deref())?;
    let _logger = init_logger(cli.verbose, settings.log_dir.as_deref().map(|dir| root.join(dir)))?;

    let layout = ProjectLayout::new(&root, &settings)?;
    tracing::debug!(root = %root.display(), package = layout.package_name(), "Using project");

    let options = RunOptions { dry_run: cli.dry_run, force: cli.force };
    Ok(run(&layout, cli.request(), options)?)
}

fn init_logger(verbosity: u8, log_dir: Option<PathBuf>) -> Result<Logger> {
    let builder = Logger::builder().name(LOGGER_NAME).verbosity(verbosity);
    let logger = match log_dir {
        Some(dir) => builder.directory(dir).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}
