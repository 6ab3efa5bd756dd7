//! The validated, fully named description of one game to scaffold.

use crate::error::{Result, ScaffoldError};
use crate::subject::Subject;
use mgkit_kernel::naming::{
    class_base_name, is_lower_identifier, is_pascal_identifier, is_snake_identifier,
    snake_to_pascal,
};
use mgkit_registry::manifest::{ManifestEntry, Slot};

/// Raw request values as received from the command line.
///
/// `tier` and `level` are signed so that out-of-range input is reported by
/// [`ScaffoldUnit::from_request`] rather than by the argument parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub subject: Subject,
    pub tier: i64,
    pub level: i64,
    pub slug: String,
    pub class_name: Option<String>,
    pub factory_key: Option<String>,
    pub game_id: Option<String>,
    pub enabled: bool,
}

impl ScaffoldRequest {
    #[must_use]
    pub fn new(subject: Subject, tier: i64, level: i64, slug: impl Into<String>) -> Self {
        Self {
            subject,
            tier,
            level,
            slug: slug.into(),
            class_name: None,
            factory_key: None,
            game_id: None,
            enabled: true,
        }
    }
}

/// Everything needed to render a game's files and registry records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldUnit {
    subject: Subject,
    tier: u32,
    level: u32,
    slug: String,
    class_name: String,
    factory_key: String,
    game_id: String,
    enabled: bool,
}

impl ScaffoldUnit {
    /// Fills in derived names and checks every field against its format rule.
    ///
    /// # Errors
    /// [`ScaffoldError::Validation`] naming the first offending field.
    pub fn from_request(request: ScaffoldRequest) -> Result<Self> {
        let tier = u32::try_from(request.tier)
            .ok()
            .filter(|tier| *tier >= 1)
            .ok_or_else(|| ScaffoldError::validation("--trinn must be >= 1"))?;
        let level = u32::try_from(request.level)
            .map_err(|_| ScaffoldError::validation("--level must be >= 0"))?;

        let slug = request.slug;
        if !is_snake_identifier(&slug) {
            return Err(ScaffoldError::validation(format!(
                "Invalid slug \"{slug}\". Use snake_case and start with a letter."
            )));
        }

        let subject = request.subject;
        let class_name = request.class_name.unwrap_or_else(|| format!("{}Game", snake_to_pascal(&slug)));
        let factory_key = request.factory_key.unwrap_or_else(|| slug.clone());
        let game_id = request.game_id.unwrap_or_else(|| format!("{subject}_trinn{tier}_level{level}_{slug}"));

        if !is_snake_identifier(&factory_key) {
            return Err(ScaffoldError::validation(format!(
                "Invalid factory key \"{factory_key}\". Use snake_case and start with a letter."
            )));
        }
        if !is_lower_identifier(&game_id) {
            return Err(ScaffoldError::validation(format!(
                "Invalid game id \"{game_id}\". Use lowercase letters, digits, and underscores."
            )));
        }
        if !is_pascal_identifier(&class_name) {
            return Err(ScaffoldError::validation(format!(
                "Invalid class name \"{class_name}\". Use PascalCase and start with uppercase."
            )));
        }

        Ok(Self { subject, tier, level, slug, class_name, factory_key, game_id, enabled: request.enabled })
    }

    #[must_use]
    pub const fn subject(&self) -> Subject {
        self.subject
    }

    #[must_use]
    pub const fn tier(&self) -> u32 {
        self.tier
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    #[must_use]
    pub fn factory_key(&self) -> &str {
        &self.factory_key
    }

    #[must_use]
    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn engine_class_name(&self) -> String {
        format!("{}Engine", class_base_name(&self.class_name))
    }

    #[must_use]
    pub fn controller_class_name(&self) -> String {
        format!("{}SessionController", class_base_name(&self.class_name))
    }

    /// The manifest record this unit registers.
    #[must_use]
    pub fn manifest_entry(&self) -> ManifestEntry {
        ManifestEntry {
            id: self.game_id.clone(),
            slot: Slot { subject: self.subject.to_string(), tier: self.tier, level: self.level },
            factory_key: self.factory_key.clone(),
            enabled: self.enabled,
        }
    }
}
