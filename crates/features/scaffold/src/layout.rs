//! Where things live inside the target project.

use crate::error::{Result, ScaffoldError, ScaffoldErrorExt};
use crate::settings::ScaffoldSettings;
use crate::unit::ScaffoldUnit;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

const FALLBACK_PACKAGE: &str = "gradvis_v2";
const GAMES_DIR: &str = "lib/features/game/games";
const GAME_TESTS_DIR: &str = "test/features/game/games";

static PUBSPEC_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^name:\s*([a-zA-Z0-9_]+)\s*$").expect("valid pubspec name pattern")
});

/// Resolved paths of the target project.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
    factories: PathBuf,
    manifest: PathBuf,
    package_name: String,
}

/// The four files generated for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPaths {
    pub presentation: PathBuf,
    pub domain: PathBuf,
    pub application: PathBuf,
    pub test: PathBuf,
}

impl ProjectLayout {
    /// Resolves registry paths and the package name for `root`.
    ///
    /// # Errors
    /// Returns [`ScaffoldError::Io`] if `pubspec.yaml` exists but cannot be read.
    pub fn new(root: impl Into<PathBuf>, settings: &ScaffoldSettings) -> Result<Self> {
        let root = root.into();
        let package_name = match &settings.package_name {
            Some(name) => name.clone(),
            None => detect_package_name(&root)?,
        };
        debug!(root = %root.display(), package_name, "Resolved project layout");

        Ok(Self {
            factories: root.join(&settings.factories_path),
            manifest: root.join(&settings.manifest_path),
            root,
            package_name,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn factories_path(&self) -> &Path {
        &self.factories
    }

    #[must_use]
    pub fn manifest_path(&self) -> &Path {
        &self.manifest
    }

    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Checks that both registry files exist.
    ///
    /// # Errors
    /// [`ScaffoldError::MissingFile`] for the first absent registry.
    pub fn ensure_registries(&self) -> Result<()> {
        for path in [&self.factories, &self.manifest] {
            if !path.is_file() {
                return Err(ScaffoldError::MissingFile { path: path.display().to_string() });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn unit_paths(&self, unit: &ScaffoldUnit) -> UnitPaths {
        let game_dir = |base: &str| {
            self.root
                .join(base)
                .join(unit.subject().to_string())
                .join(format!("trinn{}", unit.tier()))
                .join(unit.slug())
        };
        let slug = unit.slug();
        let sources = game_dir(GAMES_DIR);

        UnitPaths {
            presentation: sources.join("presentation").join(format!("{slug}_game.dart")),
            domain: sources.join("domain").join(format!("{slug}_engine.dart")),
            application: sources.join("application").join(format!("{slug}_session_controller.dart")),
            test: game_dir(GAME_TESTS_DIR).join("presentation").join(format!("{slug}_game_test.dart")),
        }
    }

    /// `path` relative to the project root, with `/` separators.
    #[must_use]
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Reads `name:` from `pubspec.yaml`, falling back to the default package.
///
/// # Errors
/// Returns [`ScaffoldError::Io`] if the pubspec exists but cannot be read.
pub fn detect_package_name(root: &Path) -> Result<String> {
    let pubspec = root.join("pubspec.yaml");
    if !pubspec.exists() {
        return Ok(FALLBACK_PACKAGE.to_owned());
    }
    let content = fs::read_to_string(&pubspec).context(format!("reading {}", pubspec.display()))?;
    Ok(PUBSPEC_NAME
        .captures(&content)
        .map_or_else(|| FALLBACK_PACKAGE.to_owned(), |caps| caps[1].to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::Subject;
    use crate::unit::ScaffoldRequest;
    use tempfile::tempdir;

    #[test]
    fn test_package_name_detection() {
        let dir = tempdir().unwrap();
        assert_eq!(detect_package_name(dir.path()).unwrap(), "gradvis_v2");

        fs::write(dir.path().join("pubspec.yaml"), "description: x\nname: my_app  \nversion: 1\n").unwrap();
        assert_eq!(detect_package_name(dir.path()).unwrap(), "my_app");

        fs::write(dir.path().join("pubspec.yaml"), "name: bad-name\n").unwrap();
        assert_eq!(detect_package_name(dir.path()).unwrap(), "gradvis_v2");
    }

    #[test]
    fn test_unit_paths_and_relative_display() {
        let dir = tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path(), &ScaffoldSettings::default()).unwrap();
        let unit =
            ScaffoldUnit::from_request(ScaffoldRequest::new(Subject::Math, 2, 1, "fraction_race")).unwrap();
        let paths = layout.unit_paths(&unit);

        assert_eq!(
            layout.relative(&paths.presentation),
            "lib/features/game/games/math/trinn2/fraction_race/presentation/fraction_race_game.dart"
        );
        assert_eq!(
            layout.relative(&paths.application),
            "lib/features/game/games/math/trinn2/fraction_race/application/fraction_race_session_controller.dart"
        );
        assert_eq!(
            layout.relative(&paths.test),
            "test/features/game/games/math/trinn2/fraction_race/presentation/fraction_race_game_test.dart"
        );
        assert_eq!(
            layout.relative(layout.manifest_path()),
            "lib/features/game/bootstrap/game_manifest.dart"
        );
    }

    #[test]
    fn test_missing_registry_is_reported() {
        let dir = tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path(), &ScaffoldSettings::default()).unwrap();
        let err = layout.ensure_registries().unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingFile { ref path } if path.ends_with("game_factories.dart")));
    }
}
