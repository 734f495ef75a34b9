//! Filesystem helpers for placing build artifacts.
//!
//! These functions return `rpmkit_errors::Error` and emit artifact events
//! through the supplied [`PlatformContext`].

use crate::PlatformContext;
use rpmkit_errors::{BuildError, Error, StorageError};
use rpmkit_events::{AppEvent, ArtifactEvent, EventEmitter};
use rpmkit_types::PlacementMethod;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Result type for filesystem operations
pub type Result<T> = std::result::Result<T, Error>;

/// Create a directory with all parent directories
///
/// Succeeds silently when the directory already exists.
///
/// # Errors
///
/// Returns an error if:
/// - Permission is denied
/// - A path component exists and is not a directory
pub async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| StorageError::from_io_with_path(&e, path).into())
}

/// Check if a path exists (following symlinks)
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

/// Follow `link` (a symlink chain or a plain file) to the real file behind it
///
/// # Errors
///
/// Returns `BuildError::ArtifactMissing` when nothing exists at the end of
/// the chain and `BuildError::ArtifactNotAFile` when it is not a regular file.
pub async fn resolve_artifact(ctx: &PlatformContext, link: &Path) -> Result<PathBuf> {
    let real = fs::canonicalize(link).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::from(BuildError::ArtifactMissing {
            path: link.display().to_string(),
        }),
        _ => StorageError::from_io_with_path(&e, link).into(),
    })?;

    let metadata = fs::metadata(&real)
        .await
        .map_err(|e| StorageError::from_io_with_path(&e, &real))?;
    if !metadata.is_file() {
        return Err(BuildError::ArtifactNotAFile {
            path: real.display().to_string(),
        }
        .into());
    }

    ctx.emit(AppEvent::Artifact(ArtifactEvent::Resolved {
        link: link.to_path_buf(),
        real: real.clone(),
    }));
    Ok(real)
}

/// Put `src` at `dst`, preferring a hard link over a content copy
///
/// An existing file at `dst` is replaced. When the hard link is refused
/// (another filesystem, no link support) the contents are copied instead.
///
/// # Errors
///
/// Returns an error if the stale destination cannot be removed or the
/// fallback copy fails.
pub async fn link_or_copy(ctx: &PlatformContext, src: &Path, dst: &Path) -> Result<PlacementMethod> {
    let placement_failed = |message: String| -> Error {
        BuildError::PlacementFailed {
            source_path: src.display().to_string(),
            destination: dst.display().to_string(),
            message,
        }
        .into()
    };

    if same_file(src, dst).await {
        // dst may be src itself; removing it would delete the artifact
        return Ok(PlacementMethod::HardLink);
    }

    match fs::symlink_metadata(dst).await {
        Ok(meta) if meta.is_dir() => {
            return Err(placement_failed("destination is a directory".to_string()));
        }
        Ok(_) => fs::remove_file(dst)
            .await
            .map_err(|e| placement_failed(format!("cannot replace existing file: {e}")))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(placement_failed(e.to_string())),
    }

    let method = match fs::hard_link(src, dst).await {
        Ok(()) => PlacementMethod::HardLink,
        Err(link_err) => {
            tracing::debug!(
                source = %src.display(),
                destination = %dst.display(),
                error = %link_err,
                "hard link refused, copying"
            );
            ctx.emit(AppEvent::Artifact(ArtifactEvent::LinkFallback {
                source: src.to_path_buf(),
                destination: dst.to_path_buf(),
                reason: link_err.to_string(),
            }));
            fs::copy(src, dst)
                .await
                .map_err(|e| placement_failed(e.to_string()))?;
            PlacementMethod::Copy
        }
    };

    ctx.emit(AppEvent::Artifact(ArtifactEvent::Placed {
        source: src.to_path_buf(),
        destination: dst.to_path_buf(),
        method,
    }));
    Ok(method)
}

/// Whether `dst` is already `src` itself, not merely a link pointing at it
#[cfg(unix)]
async fn same_file(src: &Path, dst: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(src).await, fs::symlink_metadata(dst).await) {
        (Ok(src), Ok(dst)) => {
            !dst.file_type().is_symlink() && src.dev() == dst.dev() && src.ino() == dst.ino()
        }
        _ => false,
    }
}

#[cfg(not(unix))]
async fn same_file(src: &Path, dst: &Path) -> bool {
    match fs::symlink_metadata(dst).await {
        Ok(meta) if !meta.file_type().is_symlink() => {
            match (fs::canonicalize(src).await, fs::canonicalize(dst).await) {
                (Ok(src), Ok(dst)) => src == dst,
                _ => false,
            }
        }
        _ => false,
    }
}
