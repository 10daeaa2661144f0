use std::{
    collections::BTreeMap,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::error::{DiaError, DiaResult};

/// Key-addressable source of raw asset bytes.
///
/// Names are the filename values stored in a manifest's `image_map` / `alpha_map`, never image
/// identifiers. Implementations hold no per-call mutable state, so one store can serve
/// concurrent renders.
pub trait AssetStore: Send + Sync {
    /// Return the full contents of entry `name`.
    ///
    /// Fails with [`DiaError::AssetNotFound`] when the entry does not exist and
    /// [`DiaError::AssetRead`] when it exists but cannot be read completely.
    fn fetch(&self, name: &str) -> DiaResult<Vec<u8>>;

    /// Whether entry `name` exists.
    fn contains(&self, name: &str) -> bool;
}

/// Asset store backed by a zip container (a `.dia` archive).
///
/// The archive is reopened for every fetch, so the store itself is immutable.
#[derive(Clone, Debug)]
pub struct ZipAssetStore {
    path: PathBuf,
}

impl ZipAssetStore {
    /// Open `path` and check that it is a readable zip archive.
    pub fn open(path: impl Into<PathBuf>) -> DiaResult<Self> {
        let out = Self { path: path.into() };
        out.archive()?;
        Ok(out)
    }

    /// Archive path on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of every entry in the archive, in central-directory order.
    pub fn entry_names(&self) -> DiaResult<Vec<String>> {
        let archive = self.archive()?;
        Ok(archive.file_names().map(str::to_string).collect())
    }

    fn archive(&self) -> DiaResult<zip::ZipArchive<File>> {
        let label = self.path.display().to_string();
        let file = File::open(&self.path)
            .with_context(|| format!("open archive '{label}'"))
            .map_err(|e| DiaError::asset_read(label.clone(), e))?;
        zip::ZipArchive::new(file)
            .with_context(|| format!("read zip directory of '{label}'"))
            .map_err(|e| DiaError::asset_read(label, e))
    }
}

impl AssetStore for ZipAssetStore {
    fn fetch(&self, name: &str) -> DiaResult<Vec<u8>> {
        let mut archive = self.archive()?;
        let mut entry = match archive.by_name(name) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(DiaError::asset_not_found(name));
            }
            Err(e) => {
                return Err(DiaError::asset_read(
                    name,
                    anyhow::Error::new(e).context("open archive entry"),
                ));
            }
        };

        let expected = entry.size();
        let mut bytes = Vec::with_capacity(usize::try_from(expected).unwrap_or(0));
        entry
            .read_to_end(&mut bytes)
            .context("read archive entry")
            .map_err(|e| DiaError::asset_read(name, e))?;
        if bytes.len() as u64 != expected {
            return Err(DiaError::asset_read(
                name,
                anyhow::anyhow!("read {} of {expected} bytes", bytes.len()),
            ));
        }
        tracing::trace!(name, len = bytes.len(), "fetched archive entry");
        Ok(bytes)
    }

    fn contains(&self, name: &str) -> bool {
        self.archive()
            .map(|mut a| a.by_name(name).is_ok())
            .unwrap_or(false)
    }
}

/// Asset store reading from an extracted directory tree.
#[derive(Clone, Debug)]
pub struct DirAssetStore {
    root: PathBuf,
}

impl DirAssetStore {
    /// Serve entries relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory used when resolving entry names.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> DiaResult<PathBuf> {
        let norm = normalize_rel_path(name)?;
        Ok(self.root.join(Path::new(&norm)))
    }
}

impl AssetStore for DirAssetStore {
    fn fetch(&self, name: &str) -> DiaResult<Vec<u8>> {
        let path = self.resolve(name)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(DiaError::asset_not_found(name))
            }
            Err(e) => Err(DiaError::asset_read(
                name,
                anyhow::Error::new(e).context(format!("read '{}'", path.display())),
            )),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.resolve(name).map(|p| p.is_file()).unwrap_or(false)
    }
}

/// In-memory asset store, mostly useful for embedding and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssetStore {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryAssetStore {
    /// Construct an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace entry `name`.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(name.into(), bytes.into());
    }

    /// Builder-style [`MemoryAssetStore::insert`].
    pub fn with(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }
}

impl AssetStore for MemoryAssetStore {
    fn fetch(&self, name: &str) -> DiaResult<Vec<u8>> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| DiaError::asset_not_found(name))
    }

    fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

/// Normalize and validate archive-relative entry names.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> DiaResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(DiaError::asset_read(
            source,
            anyhow::anyhow!("asset paths must be relative"),
        ));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(DiaError::asset_read(
                source,
                anyhow::anyhow!("asset paths must not contain '..'"),
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(DiaError::asset_not_found(source));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
