use crate::error::Result;
use mgkit_kernel::config::load_config;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File looked up in the project root when no `--config` is given.
pub const CONFIG_FILE: &str = "minigame.toml";

/// Project-level settings, layered from defaults, `minigame.toml` and `MGKIT__*` variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaffoldSettings {
    /// Factories registry, relative to the project root.
    pub factories_path: PathBuf,
    /// Manifest registry, relative to the project root.
    pub manifest_path: PathBuf,
    /// Overrides the package name read from `pubspec.yaml`.
    pub package_name: Option<String>,
    /// Enables rolling file logs in this directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for ScaffoldSettings {
    fn default() -> Self {
        Self {
            factories_path: PathBuf::from("lib/features/game/bootstrap/game_factories.dart"),
            manifest_path: PathBuf::from("lib/features/game/bootstrap/game_manifest.dart"),
            package_name: None,
            log_dir: None,
        }
    }
}

impl ScaffoldSettings {
    /// Loads settings for `root`. An explicit `config` path must exist; the implicit
    /// `<root>/minigame.toml` is optional.
    ///
    /// # Errors
    /// Returns [`crate::ScaffoldError::Config`] if the file is missing (explicit only) or malformed.
    pub fn load(root: &Path, config: Option<&Path>) -> Result<Self> {
        let settings = match config {
            Some(path) => load_config(Some(path), true)?,
            None => load_config(Some(&root.join(CONFIG_FILE)), false)?,
        };
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempdir().unwrap();
        let settings = ScaffoldSettings::load(dir.path(), None).unwrap();
        assert_eq!(settings, ScaffoldSettings::default());
    }

    #[test]
    fn test_project_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "package_name = \"my_app\"\nmanifest_path = \"lib/manifest.dart\"\n",
        )
        .unwrap();

        let settings = ScaffoldSettings::load(dir.path(), None).unwrap();
        assert_eq!(settings.package_name.as_deref(), Some("my_app"));
        assert_eq!(settings.manifest_path, PathBuf::from("lib/manifest.dart"));
        assert_eq!(settings.factories_path, ScaffoldSettings::default().factories_path);
    }

    #[test]
    fn test_explicit_missing_config_fails() {
        let dir = tempdir().unwrap();
        let err = ScaffoldSettings::load(dir.path(), Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }
}
