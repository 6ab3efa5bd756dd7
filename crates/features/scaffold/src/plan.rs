//! In-memory planning of every write a scaffold needs.
//!
//! Planning runs in two steps. [`Registries::resolve`] reads nothing and writes nothing:
//! it checks the request against the parsed registries and records what each region
//! needs. [`stage`] then applies those decisions to copies of the buffers and renders the
//! scaffold files. No byte reaches the disk before [`crate::apply::apply`].

use crate::error::{Result, ScaffoldError, ScaffoldErrorExt};
use crate::layout::ProjectLayout;
use crate::phase::{Phase, PhaseTracker};
use crate::templates;
use crate::unit::ScaffoldUnit;
use mgkit_registry::factories::{FACTORY_IMPORTS, FACTORY_MAP, FactoryMapping, import_line};
use mgkit_registry::keys::{FACTORY_KEYS, KeyResolution, KeyTable};
use mgkit_registry::manifest::{MANIFEST_ENTRIES, ManifestEntry, parse_entries};
use mgkit_registry::marker::TextBuffer;
use mgkit_registry::resolver::resolve_slot_insertion;
use mgkit_registry::{RegistryError, RegistryErrorExt, Result as RegistryResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Whether a staged file is a registry edit or a generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Registry,
    Scaffold,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedWrite {
    pub path: PathBuf,
    /// Project-relative path with `/` separators; the sort key of the write set.
    pub relative: String,
    pub content: String,
    pub kind: WriteKind,
}

/// All writes of one invocation, ordered by relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSet {
    writes: Vec<StagedWrite>,
}

impl WriteSet {
    fn push(&mut self, write: StagedWrite) {
        let at = self.writes.partition_point(|w| w.relative < write.relative);
        self.writes.insert(at, write);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StagedWrite> {
        self.writes.iter()
    }

    #[must_use]
    pub fn get(&self, relative: &str) -> Option<&StagedWrite> {
        self.writes.iter().find(|w| w.relative == relative)
    }
}

/// Both registry files as read from disk.
#[derive(Debug, Clone)]
pub struct Registries {
    factories: TextBuffer,
    factories_label: String,
    manifest: TextBuffer,
    manifest_label: String,
    keys: KeyTable,
    entries: Vec<ManifestEntry>,
}

/// Decisions taken against the current registries, before any edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryPlan {
    pub key: KeyResolution,
    pub mapping: FactoryMapping,
    pub insert_mapping: bool,
    pub entry: ManifestEntry,
    pub insert_entry: bool,
}

impl Registries {
    /// Reads and parses both registry files.
    ///
    /// # Errors
    /// [`ScaffoldError::MissingFile`] or [`ScaffoldError::Io`].
    pub fn read(layout: &ProjectLayout) -> Result<Self> {
        layout.ensure_registries()?;
        let factories = read_buffer(layout.factories_path())?;
        let manifest = read_buffer(layout.manifest_path())?;
        Ok(Self::from_buffers(
            factories,
            layout.relative(layout.factories_path()),
            manifest,
            layout.relative(layout.manifest_path()),
        ))
    }

    /// Builds the parsed view from in-memory buffers; labels name the files in errors.
    #[must_use]
    pub fn from_buffers(
        factories: TextBuffer,
        factories_label: impl Into<String>,
        manifest: TextBuffer,
        manifest_label: impl Into<String>,
    ) -> Self {
        let keys = KeyTable::parse(factories.lines());
        let entries = parse_entries(manifest.lines());
        debug!(constants = keys.len(), entries = entries.len(), "Parsed registries");
        Self {
            factories,
            factories_label: factories_label.into(),
            manifest,
            manifest_label: manifest_label.into(),
            keys,
            entries,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    #[must_use]
    pub const fn keys(&self) -> &KeyTable {
        &self.keys
    }

    /// Resolves the factory key, the factory mapping and the manifest entry for `unit`.
    ///
    /// # Errors
    /// Any registry conflict, tagged with the file it was found in.
    pub fn resolve(&self, unit: &ScaffoldUnit) -> Result<RegistryPlan> {
        let key = self.keys.resolve(unit.factory_key()).context(self.factories_label.clone())?;

        let mapping =
            FactoryMapping { const_name: key.name.clone(), class_name: unit.class_name().to_owned() };
        let insert_mapping = mapping
            .resolve(&self.factories)
            .and_then(|resolution| resolution.into_result())
            .context(self.factories_label.clone())?;

        let entry = unit.manifest_entry();
        let insert_entry = resolve_slot_insertion(&self.entries, &entry)
            .into_result()
            .context(self.manifest_label.clone())?;

        debug!(
            constant = %key.name,
            declare = key.declare,
            insert_mapping,
            insert_entry,
            "Resolved registry records"
        );
        Ok(RegistryPlan { key, mapping, insert_mapping, entry, insert_entry })
    }

    /// Applies `plan` to copies of the buffers.
    ///
    /// Returns the new factories and manifest buffers; `None` means the file is unchanged.
    ///
    /// # Errors
    /// Missing or misordered markers.
    pub fn edit(
        &self,
        unit: &ScaffoldUnit,
        plan: &RegistryPlan,
    ) -> Result<(Option<TextBuffer>, Option<TextBuffer>)> {
        let factories = self.edit_factories(unit, plan).context(self.factories_label.clone())?;
        let manifest = self.edit_manifest(plan).context(self.manifest_label.clone())?;
        Ok((factories, manifest))
    }

    fn edit_factories(
        &self,
        unit: &ScaffoldUnit,
        plan: &RegistryPlan,
    ) -> RegistryResult<Option<TextBuffer>> {
        let mut buffer = self.factories.clone();
        let import = import_line(&unit.subject().to_string(), unit.tier(), unit.slug());

        let mut changed = buffer.insert_line(FACTORY_IMPORTS, &import)?;
        if plan.key.declare {
            changed |= buffer.insert_line(FACTORY_KEYS, &plan.key.declaration_line())?;
        }
        if plan.insert_mapping {
            changed |= buffer.insert_block(
                FACTORY_MAP,
                &plan.mapping.render(),
                &plan.mapping.identity_line(),
            )?;
        }
        Ok(changed.then_some(buffer))
    }

    fn edit_manifest(&self, plan: &RegistryPlan) -> RegistryResult<Option<TextBuffer>> {
        let mut buffer = self.manifest.clone();
        // A present entry still requires a well-formed region.
        let region = buffer.region(MANIFEST_ENTRIES)?;
        if !plan.insert_entry {
            debug!(start = region.start(), end = region.end(), "Manifest entry already present");
            return Ok(None);
        }
        let changed =
            buffer.insert_block(MANIFEST_ENTRIES, &plan.entry.render(), &plan.entry.identity_line())?;
        // The id line is present but its entry did not parse, so the insert was skipped.
        if !changed {
            return Err(RegistryError::IdentityConflict {
                message: format!(
                    "Manifest id \"{}\" appears in an entry that could not be parsed",
                    plan.entry.id
                )
                .into(),
                context: None,
            });
        }
        Ok(Some(buffer))
    }
}

/// Renders registry edits and scaffold files into a [`WriteSet`].
///
/// # Errors
/// Registry marker errors, [`ScaffoldError::ExistingFile`] when a target differs and
/// `force` is unset, or [`ScaffoldError::Io`] reading an existing target.
#[instrument(skip_all, fields(game_id = unit.game_id(), force = force))]
pub fn stage(
    layout: &ProjectLayout,
    registries: &Registries,
    unit: &ScaffoldUnit,
    plan: &RegistryPlan,
    force: bool,
) -> Result<WriteSet> {
    let mut writes = WriteSet::default();

    let (factories, manifest) = registries.edit(unit, plan)?;
    for (path, buffer) in [(layout.factories_path(), factories), (layout.manifest_path(), manifest)] {
        if let Some(buffer) = buffer {
            stage_registry(&mut writes, layout, path, buffer.render());
        }
    }

    let paths = layout.unit_paths(unit);
    let files = [
        (paths.presentation, templates::presentation(unit)),
        (paths.domain, templates::domain(unit)),
        (paths.application, templates::application(unit)),
        (paths.test, templates::test(unit, layout.package_name())),
    ];
    for (path, content) in files {
        stage_new_file(&mut writes, layout, path, content, force)?;
    }

    info!(writes = writes.len(), "Staged write set");
    Ok(writes)
}

/// Validates `unit` against the project's registries and stages every write.
///
/// # Errors
/// See [`Registries::read`], [`Registries::resolve`] and [`stage`].
pub fn plan(layout: &ProjectLayout, unit: &ScaffoldUnit, force: bool) -> Result<WriteSet> {
    plan_tracked(layout, unit, force, &mut PhaseTracker::default())
}

/// [`plan`], moving `phases` through parsing, resolving and staging.
pub(crate) fn plan_tracked(
    layout: &ProjectLayout,
    unit: &ScaffoldUnit,
    force: bool,
    phases: &mut PhaseTracker,
) -> Result<WriteSet> {
    phases.advance(Phase::Parsing);
    let registries = phases.run(|| Registries::read(layout))?;
    phases.advance(Phase::Resolving);
    let registry_plan = phases.run(|| registries.resolve(unit))?;
    phases.advance(Phase::Staging);
    phases.run(|| stage(layout, &registries, unit, &registry_plan, force))
}

fn stage_registry(writes: &mut WriteSet, layout: &ProjectLayout, path: &Path, content: String) {
    debug!(path = %path.display(), "Staging registry update");
    writes.push(StagedWrite {
        path: path.to_path_buf(),
        relative: layout.relative(path),
        content,
        kind: WriteKind::Registry,
    });
}

fn stage_new_file(
    writes: &mut WriteSet,
    layout: &ProjectLayout,
    path: PathBuf,
    content: String,
    force: bool,
) -> Result<()> {
    let relative = layout.relative(&path);
    if path.exists() {
        let existing = fs::read(&path).context(format!("reading {relative}"))?;
        if existing == content.as_bytes() {
            debug!(path = %relative, "Scaffold file already up to date");
            return Ok(());
        }
        if !force {
            return Err(ScaffoldError::ExistingFile { path: path.display().to_string() });
        }
        info!(path = %relative, "Overwriting existing scaffold file");
    }
    writes.push(StagedWrite { path, relative, content, kind: WriteKind::Scaffold });
    Ok(())
}

fn read_buffer(path: &Path) -> Result<TextBuffer> {
    let text = fs::read_to_string(path).context(format!("reading {}", path.display()))?;
    Ok(TextBuffer::parse(&text))
}
