//! Loading a directory of text files as `(text, identifier)` pairs.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read every file under `root` whose extension is `ext`, sorted by path so
/// doc ids are stable between runs. The identifier is the path relative to `root`.
pub fn load_dir<P: AsRef<Path>>(root: P, ext: &str) -> Result<Vec<(String, String)>> {
    let root = root.as_ref();
    let files = list_files(root, ext)?;
    let mut docs = Vec::with_capacity(files.len());
    for path in files {
        let text = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        docs.push((text, relative_id(root, &path)));
    }
    tracing::info!(root = %root.display(), files = docs.len(), "loaded corpus");
    Ok(docs)
}

fn list_files(root: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("corpus directory {} does not exist", root.display());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        let p = entry.path();
        if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some(ext) {
            files.push(p.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn relative_id(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy().into_owned()
}
