//! Marker-delimited regions inside line-oriented text buffers.
//!
//! A region is the run of lines strictly between a start marker and an end marker.
//! Locating a region is a pure function of the buffer; every edit produces a new line
//! sequence and is only swapped in once it is complete, so a failed edit never leaves a
//! half-inserted block behind and indices from an earlier edit are never reused.

use crate::error::{RegistryError, Result};
use std::ops::Range;

/// A `(start, end)` pair of sentinel lines, compared after trimming whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPair {
    pub start: &'static str,
    pub end: &'static str,
}

impl MarkerPair {
    #[must_use]
    pub const fn new(start: &'static str, end: &'static str) -> Self {
        Self { start, end }
    }
}

/// Line indices of a located marker pair. `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRegion {
    start: usize,
    end: usize,
}

impl MarkerRegion {
    /// Locates both markers of `pair` and checks their order.
    ///
    /// # Errors
    /// [`RegistryError::MarkerNotFound`] if either marker is missing,
    /// [`RegistryError::MalformedRegion`] if the end marker does not follow the start marker.
    pub fn locate(lines: &[String], pair: MarkerPair) -> Result<Self> {
        let start = locate(lines, pair.start)?;
        let end = locate(lines, pair.end)?;
        if start >= end {
            return Err(RegistryError::MalformedRegion {
                start: pair.start.into(),
                end: pair.end.into(),
                context: None,
            });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Indices of the lines strictly between the markers.
    #[must_use]
    pub const fn body(&self) -> Range<usize> {
        self.start + 1..self.end
    }
}

/// Returns the index of the first line equal to `marker` once trimmed.
///
/// # Errors
/// [`RegistryError::MarkerNotFound`] when no line matches.
pub fn locate(lines: &[String], marker: &str) -> Result<usize> {
    lines
        .iter()
        .position(|line| line.trim() == marker)
        .ok_or_else(|| RegistryError::MarkerNotFound { marker: marker.to_owned().into(), context: None })
}

/// An editable text file held as lines.
///
/// Rendering always joins with `\n` and appends a single trailing newline,
/// regardless of the line endings the file was read with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl TextBuffer {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self { lines: text.lines().map(str::to_owned).collect() }
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    /// See [`MarkerRegion::locate`].
    ///
    /// # Errors
    /// Propagates marker lookup failures.
    pub fn region(&self, pair: MarkerPair) -> Result<MarkerRegion> {
        MarkerRegion::locate(&self.lines, pair)
    }

    /// Lines strictly between the markers of `region`.
    #[must_use]
    pub fn region_lines(&self, region: MarkerRegion) -> &[String] {
        &self.lines[region.body()]
    }

    /// Index of the first line inside the region matching `predicate`.
    ///
    /// # Errors
    /// Propagates marker lookup failures.
    pub fn find_in_region(
        &self,
        pair: MarkerPair,
        predicate: impl Fn(&str) -> bool,
    ) -> Result<Option<usize>> {
        let region = self.region(pair)?;
        Ok(region.body().find(|&idx| predicate(&self.lines[idx])))
    }

    /// Inserts `line` right before the end marker unless the region already holds it verbatim.
    ///
    /// Returns `true` when the buffer changed.
    ///
    /// # Errors
    /// Propagates marker lookup failures; the buffer is left untouched.
    pub fn insert_line(&mut self, pair: MarkerPair, line: &str) -> Result<bool> {
        let region = self.region(pair)?;
        if self.region_lines(region).iter().any(|existing| existing == line) {
            return Ok(false);
        }
        *self = self.spliced(region, &[line.to_owned()]);
        Ok(true)
    }

    /// Inserts `block` right before the end marker unless a line of the region equals
    /// `identity` (both trimmed).
    ///
    /// Returns `true` when the buffer changed.
    ///
    /// # Errors
    /// Propagates marker lookup failures; the buffer is left untouched.
    pub fn insert_block(&mut self, pair: MarkerPair, block: &[String], identity: &str) -> Result<bool> {
        let region = self.region(pair)?;
        let identity = identity.trim();
        if self.region_lines(region).iter().any(|existing| existing.trim() == identity) {
            return Ok(false);
        }
        *self = self.spliced(region, block);
        Ok(true)
    }

    fn spliced(&self, region: MarkerRegion, block: &[String]) -> Self {
        let mut lines = Vec::with_capacity(self.lines.len() + block.len());
        lines.extend_from_slice(&self.lines[..region.end()]);
        lines.extend_from_slice(block);
        lines.extend_from_slice(&self.lines[region.end()..]);
        Self { lines }
    }
}
