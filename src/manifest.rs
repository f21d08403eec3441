//! Project manifest access
//!
//! Reads and rewrites the version declared by a Python project, either in
//! `pyproject.toml` (`[project]` or `[tool.poetry]`) or in a `setup.py` build
//! script. `pyproject.toml` is edited in place with `toml_edit` so comments
//! and formatting survive the bump.

use crate::error::{BumpError, Result};
use regex::{NoExpand, Regex};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;
use toml_edit::DocumentMut;

pub const PYPROJECT_FILE: &str = "pyproject.toml";
pub const SETUP_PY_FILE: &str = "setup.py";
pub const UV_LOCK_FILE: &str = "uv.lock";

static SETUP_PY_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bversion\s*=\s*["']([^"']+)["']"#).expect("setup.py pattern is valid")
});

/// Where the version is declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// `[project].version` in pyproject.toml
    PyprojectProject,
    /// `[tool.poetry].version` in pyproject.toml
    PyprojectPoetry,
    /// `version="..."` in setup.py
    SetupPy,
}

impl ManifestKind {
    pub fn file_name(self) -> &'static str {
        match self {
            ManifestKind::PyprojectProject | ManifestKind::PyprojectPoetry => PYPROJECT_FILE,
            ManifestKind::SetupPy => SETUP_PY_FILE,
        }
    }

    pub fn is_pyproject(self) -> bool {
        self != ManifestKind::SetupPy
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// A located project manifest and the version it currently declares
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub kind: ManifestKind,
    pub root: PathBuf,
    pub version: String,
}

impl Manifest {
    /// Locate the manifest in `root`.
    ///
    /// `pyproject.toml` wins when it declares a version in `[project]` or
    /// `[tool.poetry]`; otherwise `setup.py` is searched for a `version=`
    /// literal.
    ///
    /// # Returns
    /// * `Ok(Manifest)` - The manifest and its current version
    /// * `Err(BumpError::Manifest)` - If no manifest declares a version
    pub fn discover(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();

        let pyproject = root.join(PYPROJECT_FILE);
        if pyproject.is_file() {
            let doc: DocumentMut = fs::read_to_string(&pyproject)?.parse()?;
            if let Some((kind, version)) = read_pyproject_version(&doc) {
                tracing::debug!(path = %pyproject.display(), %version, "found version in pyproject.toml");
                return Ok(Manifest {
                    kind,
                    root: root.to_path_buf(),
                    version,
                });
            }
            tracing::debug!("pyproject.toml has no version field");
        }

        let setup_py = root.join(SETUP_PY_FILE);
        if setup_py.is_file() {
            let content = fs::read_to_string(&setup_py)?;
            if let Some(caps) = SETUP_PY_VERSION_RE.captures(&content) {
                let version = caps[1].to_string();
                tracing::debug!(path = %setup_py.display(), %version, "found version in setup.py");
                return Ok(Manifest {
                    kind: ManifestKind::SetupPy,
                    root: root.to_path_buf(),
                    version,
                });
            }
        }

        Err(BumpError::manifest(format!(
            "no Python project configuration found in {} (expected {} or {})",
            root.display(),
            PYPROJECT_FILE,
            SETUP_PY_FILE
        )))
    }

    /// Path of the manifest file
    pub fn path(&self) -> PathBuf {
        self.root.join(self.kind.file_name())
    }

    /// Rewrite the declared version in place.
    pub fn write_version(&self, new_version: &str) -> Result<()> {
        let path = self.path();
        let content = fs::read_to_string(&path)?;

        let updated = match self.kind {
            ManifestKind::PyprojectProject | ManifestKind::PyprojectPoetry => {
                let mut doc: DocumentMut = content.parse()?;
                set_pyproject_version(&mut doc, self.kind, new_version)?;
                doc.to_string()
            }
            ManifestKind::SetupPy => {
                if !SETUP_PY_VERSION_RE.is_match(&content) {
                    return Err(BumpError::manifest("setup.py no longer declares a version"));
                }
                let replacement = format!("version=\"{}\"", new_version);
                SETUP_PY_VERSION_RE
                    .replacen(&content, 1, NoExpand(&replacement))
                    .into_owned()
            }
        };

        fs::write(&path, updated)?;
        tracing::info!(path = %path.display(), version = new_version, "updated manifest version");
        Ok(())
    }

    /// `uv.lock` next to a pyproject manifest, if present
    pub fn lockfile(&self) -> Option<PathBuf> {
        if !self.kind.is_pyproject() {
            return None;
        }
        let lock = self.root.join(UV_LOCK_FILE);
        lock.is_file().then_some(lock)
    }

    /// Files that change with a version bump and must be committed
    pub fn files_to_stage(&self) -> Vec<PathBuf> {
        let mut files = vec![self.path()];
        files.extend(self.lockfile());
        files
    }
}

fn read_pyproject_version(doc: &DocumentMut) -> Option<(ManifestKind, String)> {
    let project_version = doc
        .get("project")
        .and_then(|item| item.as_table_like())
        .and_then(|table| table.get("version"))
        .and_then(|item| item.as_str());
    if let Some(version) = project_version {
        return Some((ManifestKind::PyprojectProject, version.to_string()));
    }

    doc.get("tool")
        .and_then(|item| item.as_table_like())
        .and_then(|tool| tool.get("poetry"))
        .and_then(|item| item.as_table_like())
        .and_then(|poetry| poetry.get("version"))
        .and_then(|item| item.as_str())
        .map(|version| (ManifestKind::PyprojectPoetry, version.to_string()))
}

fn set_pyproject_version(doc: &mut DocumentMut, kind: ManifestKind, new_version: &str) -> Result<()> {
    let table = match kind {
        ManifestKind::PyprojectProject => doc
            .get_mut("project")
            .and_then(|item| item.as_table_like_mut()),
        ManifestKind::PyprojectPoetry => doc
            .get_mut("tool")
            .and_then(|item| item.as_table_like_mut())
            .and_then(|tool| tool.get_mut("poetry"))
            .and_then(|item| item.as_table_like_mut()),
        ManifestKind::SetupPy => None,
    }
    .ok_or_else(|| BumpError::manifest(format!("no version section for {:?}", kind)))?;

    let value = table
        .get_mut("version")
        .and_then(|item| item.as_value_mut())
        .ok_or_else(|| BumpError::manifest("pyproject.toml no longer declares a version"))?;

    let decor = value.decor().clone();
    *value = toml_edit::Value::from(new_version);
    *value.decor_mut() = decor;
    Ok(())
}

/// Refresh `uv.lock` after the version changed.
pub fn sync_lockfile(root: &Path) -> Result<()> {
    tracing::debug!(root = %root.display(), "running uv sync");
    let output = Command::new("uv")
        .args(["sync", "--quiet"])
        .current_dir(root)
        .output()?;

    if !output.status.success() {
        return Err(BumpError::manifest(format!(
            "uv sync failed with exit code {}: {}",
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}
