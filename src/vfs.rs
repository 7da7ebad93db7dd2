// Virtual file system - resolves `~/`-rooted asset paths

use crate::error::VfsError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Read access to assets by virtual path
pub trait VirtualFileSystem: Send + Sync {
    /// Read an asset's text
    fn read_to_string(&self, virtual_path: &str) -> Result<String, VfsError>;

    /// Check if an asset exists
    fn exists(&self, virtual_path: &str) -> bool;
}

/// Normalize a virtual path to a relative path under the asset root
///
/// Accepts `~/a/b.es6`, `/a/b.es6` and `a/b.es6`. Paths that climb out of
/// the root are rejected.
pub fn normalize_virtual_path(virtual_path: &str) -> Result<PathBuf, VfsError> {
    let trimmed = virtual_path
        .trim()
        .trim_start_matches('~')
        .trim_start_matches(['/', '\\']);

    let mut relative = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            _ => {
                return Err(VfsError::OutsideRoot {
                    path: virtual_path.to_string(),
                })
            }
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(VfsError::NotFound {
            path: virtual_path.to_string(),
        });
    }
    Ok(relative)
}

/// Virtual file system backed by a directory on disk
#[derive(Debug, Clone)]
pub struct PhysicalFileSystem {
    root: PathBuf,
}

impl PhysicalFileSystem {
    /// Create a file system rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Physical location of a virtual path
    pub fn resolve(&self, virtual_path: &str) -> Result<PathBuf, VfsError> {
        Ok(self.root.join(normalize_virtual_path(virtual_path)?))
    }
}

impl VirtualFileSystem for PhysicalFileSystem {
    fn read_to_string(&self, virtual_path: &str) -> Result<String, VfsError> {
        let path = self.resolve(virtual_path)?;
        std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VfsError::NotFound {
                    path: virtual_path.to_string(),
                }
            } else {
                e.into()
            }
        })
    }

    fn exists(&self, virtual_path: &str) -> bool {
        self.resolve(virtual_path)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }
}

/// In-memory virtual file system
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<HashMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an asset
    pub fn insert(&self, virtual_path: &str, content: impl Into<String>) -> Result<(), VfsError> {
        let key = normalize_virtual_path(virtual_path)?;
        self.files.write().insert(key, content.into());
        Ok(())
    }
}

impl VirtualFileSystem for MemoryFileSystem {
    fn read_to_string(&self, virtual_path: &str) -> Result<String, VfsError> {
        let key = normalize_virtual_path(virtual_path)?;
        self.files
            .read()
            .get(&key)
            .cloned()
            .ok_or_else(|| VfsError::NotFound {
                path: virtual_path.to_string(),
            })
    }

    fn exists(&self, virtual_path: &str) -> bool {
        normalize_virtual_path(virtual_path)
            .map(|key| self.files.read().contains_key(&key))
            .unwrap_or(false)
    }
}
