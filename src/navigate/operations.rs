//! Path resolution implementation

use crate::error::PathError;
use crate::navigate::ResolvedDir;
use log::warn;
use std::path::{Component, Path, PathBuf};

/// Resolves the request's `dir` against the upload root.
///
/// An absent or empty `dir` resolves to the root. `..` segments are allowed
/// only while they stay inside the root; absolute paths are rejected.
pub fn resolve_directory(root: &Path, relative_dir: Option<&str>) -> Result<ResolvedDir, PathError> {
    let relative_dir = relative_dir.unwrap_or("");
    let relative = normalize(Path::new(""), relative_dir)?;
    let path = root.join(&relative);

    verify_contained(root, &path, relative_dir)?;

    Ok(ResolvedDir { path, relative })
}

/// Resolves a filename inside an already resolved directory.
///
/// The name may contain separators, but the result must name an entry
/// strictly below the root.
pub fn resolve_entry(root: &Path, dir: &ResolvedDir, name: &str) -> Result<PathBuf, PathError> {
    if name.is_empty() {
        return Err(PathError::Invalid("Empty filename".into()));
    }

    let relative = normalize(&dir.relative, name)?;
    if relative.as_os_str().is_empty() {
        return Err(PathError::Invalid(format!("{name} refers to the upload root")));
    }

    let path = root.join(&relative);
    verify_contained(root, &path, name)?;

    Ok(path)
}

/// Lexically applies `relative` on top of `base`, never climbing above the root.
fn normalize(base: &Path, relative: &str) -> Result<PathBuf, PathError> {
    if relative.contains('\0') {
        return Err(PathError::Invalid(relative.replace('\0', "\\0")));
    }

    let mut segments: Vec<&std::ffi::OsStr> = base
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name),
            _ => None,
        })
        .collect();

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(name) => segments.push(name),
            Component::CurDir => continue,
            Component::ParentDir => {
                if segments.pop().is_none() {
                    warn!("Path traversal attempt detected: {}", relative);
                    return Err(PathError::Traversal(relative.to_string()));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                warn!("Absolute path in request: {}", relative);
                return Err(PathError::Absolute(relative.to_string()));
            }
        }
    }

    Ok(segments.into_iter().collect())
}

/// Follows symlinks on the deepest existing ancestor of `path` and checks the
/// result is still under the canonical root.
///
/// A dangling symlink counts as existing and is rejected, because a write
/// through it lands wherever it points.
fn verify_contained(root: &Path, path: &Path, requested: &str) -> Result<(), PathError> {
    let existing = path
        .ancestors()
        .take_while(|p| p.starts_with(root))
        .find(|p| p.symlink_metadata().is_ok());

    let Some(existing) = existing else {
        return Ok(());
    };

    let canonical_root = root.canonicalize().map_err(PathError::Root)?;
    let canonical = match existing.canonicalize() {
        Ok(canonical) => canonical,
        Err(e) => {
            let is_link = existing
                .symlink_metadata()
                .map(|m| m.file_type().is_symlink())
                .unwrap_or(false);
            if is_link {
                warn!(
                    "Unresolvable symlink rejected: {} ({})",
                    existing.display(),
                    e
                );
                return Err(PathError::Traversal(requested.to_string()));
            }
            return Err(PathError::Invalid(format!("{requested}: {e}")));
        }
    };

    if !canonical.starts_with(&canonical_root) {
        warn!(
            "Symlink escape attempt: {} resolved to {} outside {}",
            path.display(),
            canonical.display(),
            canonical_root.display()
        );
        return Err(PathError::Traversal(requested.to_string()));
    }

    Ok(())
}
