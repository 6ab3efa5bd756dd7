//! # CLI Argument Definitions
//!
//! `add-minigame` takes a single set of flags describing the game to add.

use clap::Parser;
use mgkit_scaffold::{ScaffoldRequest, Subject};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Parser)]
#[command(name = "add-minigame")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scaffold a minigame and register it in the factories and manifest files")]
pub struct Cli {
    /// Root of the Flutter project (defaults to the current directory)
    #[arg(long)]
    pub project_root: Option<PathBuf>,

    /// Settings file (defaults to <project-root>/minigame.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// One of: reading, math, english, science
    #[arg(long, value_parser = Subject::from_str)]
    pub subject: Subject,

    /// School year the game belongs to (>= 1)
    #[arg(long, visible_alias = "tier", allow_negative_numbers = true)]
    pub trinn: i64,

    /// Level within the year (>= 0)
    #[arg(long, allow_negative_numbers = true)]
    pub level: i64,

    /// snake_case folder and file stem, e.g. `fraction_race`
    #[arg(long)]
    pub slug: String,

    /// Widget class name (defaults to `<PascalSlug>Game`)
    #[arg(long)]
    pub class_name: Option<String>,

    /// Factory key value (defaults to the slug)
    #[arg(long)]
    pub factory_key: Option<String>,

    /// Manifest id (defaults to `<subject>_trinn<T>_level<L>_<slug>`)
    #[arg(long)]
    pub game_id: Option<String>,

    /// Register the game with `enabled: false`
    #[arg(long)]
    pub disabled: bool,

    /// Print the files that would be written and write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite generated files whose content differs
    #[arg(long)]
    pub force: bool,

    /// Increase log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    #[must_use]
    pub fn request(&self) -> ScaffoldRequest {
        ScaffoldRequest {
            subject: self.subject,
            tier: self.trinn,
            level: self.level,
            slug: self.slug.clone(),
            class_name: self.class_name.clone(),
            factory_key: self.factory_key.clone(),
            game_id: self.game_id.clone(),
            enabled: !self.disabled,
        }
    }
}
