//! Artifact sinks.
//!
//! The driver hands every artifact to an [`ArtifactWriter`] in a fixed order.
//! Writers only decide where bytes go; they never see the schema.

use crate::emit::Artifact;
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;

///
/// WriteOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
    Stale,
}

///
/// ArtifactWriter
///

pub trait ArtifactWriter {
    fn write(&mut self, artifact: &Artifact) -> io::Result<WriteOutcome>;
}

// read_existing
// `None` when the file does not exist yet
fn read_existing(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

///
/// DirWriter
///
/// Writes artifacts under a directory, leaving byte-identical files alone so
/// their modification times do not trigger rebuilds.
///

#[derive(Debug)]
pub struct DirWriter {
    root: PathBuf,
}

impl DirWriter {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactWriter for DirWriter {
    fn write(&mut self, artifact: &Artifact) -> io::Result<WriteOutcome> {
        let path = self.root.join(&artifact.path);

        if read_existing(&path)?.as_deref() == Some(artifact.contents.as_str()) {
            debug!(path = %path.display(), "artifact unchanged");
            return Ok(WriteOutcome::Unchanged);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &artifact.contents)?;
        debug!(path = %path.display(), bytes = artifact.contents.len(), "artifact written");

        Ok(WriteOutcome::Written)
    }
}

///
/// CheckWriter
///
/// Compares artifacts against a directory without touching it.
///

#[derive(Debug)]
pub struct CheckWriter {
    root: PathBuf,
    stale: Vec<PathBuf>,
}

impl CheckWriter {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            stale: Vec::new(),
        }
    }

    /// Paths that are missing or differ from freshly generated output.
    #[must_use]
    pub fn stale(&self) -> &[PathBuf] {
        &self.stale
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.stale.is_empty()
    }
}

impl ArtifactWriter for CheckWriter {
    fn write(&mut self, artifact: &Artifact) -> io::Result<WriteOutcome> {
        let path = self.root.join(&artifact.path);

        if read_existing(&path)?.as_deref() == Some(artifact.contents.as_str()) {
            Ok(WriteOutcome::Unchanged)
        } else {
            debug!(path = %path.display(), "artifact stale");
            self.stale.push(path);
            Ok(WriteOutcome::Stale)
        }
    }
}

///
/// MemoryWriter
///
/// Collects artifacts in memory, keyed by relative path.
///

#[derive(Debug, Default)]
pub struct MemoryWriter {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn into_files(self) -> BTreeMap<PathBuf, String> {
        self.files
    }
}

impl ArtifactWriter for MemoryWriter {
    fn write(&mut self, artifact: &Artifact) -> io::Result<WriteOutcome> {
        let previous = self
            .files
            .insert(artifact.path.clone(), artifact.contents.clone());

        Ok(if previous.as_ref() == Some(&artifact.contents) {
            WriteOutcome::Unchanged
        } else {
            WriteOutcome::Written
        })
    }
}
