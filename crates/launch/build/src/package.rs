//! Source packaging
//!
//! The rack builds from a gzip-compressed tarball of the source directory,
//! with paths stored relative to the directory root.

use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use launch_deployment::BuildError;
use tracing::debug;
use walkdir::WalkDir;

use crate::ignore_rules::IgnoreRules;

/// Pack `source_dir` into a `.tgz` off the async runtime.
pub async fn package_source(source_dir: &Path) -> Result<Vec<u8>, BuildError> {
    let dir = source_dir.to_path_buf();
    tokio::task::spawn_blocking(move || package_source_blocking(&dir))
        .await
        .map_err(|e| BuildError::Package {
            path: source_dir.to_path_buf(),
            reason: e.to_string(),
        })?
}

/// Pack `source_dir` into a `.tgz`, honoring `.launchignore`.
///
/// Entries are added in file-name order so the same tree always produces
/// the same archive layout. Symlinks are stored as links, not followed.
pub fn package_source_blocking(source_dir: &Path) -> Result<Vec<u8>, BuildError> {
    if !source_dir.is_dir() {
        return Err(BuildError::Package {
            path: source_dir.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    let rules = IgnoreRules::load(source_dir)?;
    let mut archive = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    archive.follow_symlinks(false);

    let walker = WalkDir::new(source_dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry
                .path()
                .strip_prefix(source_dir)
                .map(|relative| !rules.is_ignored(relative, entry.file_type().is_dir()))
                .unwrap_or(true)
        });

    let mut files = 0usize;
    for entry in walker {
        let entry = entry.map_err(|e| BuildError::Package {
            path: e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| source_dir.to_path_buf()),
            reason: e.to_string(),
        })?;

        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .map_err(|e| BuildError::Package {
                path: entry.path().to_path_buf(),
                reason: e.to_string(),
            })?;

        let file_type = entry.file_type();
        if file_type.is_dir() {
            archive.append_dir(relative, entry.path())?;
        } else {
            archive.append_path_with_name(entry.path(), relative)?;
            files += 1;
        }
    }

    let archive = archive.into_inner()?.finish()?;
    debug!(
        source_dir = %source_dir.display(),
        files,
        ignore_rules = rules.len(),
        compressed_size = archive.len(),
        "packaged source"
    );

    Ok(archive)
}
