use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

pub mod conventions;
pub mod naming;

pub use conventions::{canonical_player_name, parse_conventions, ConventionTable, PATTERN_SEPARATOR};
pub use naming::apply_pattern;

#[derive(thiserror::Error, Debug)]
pub enum RenameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Path error: {message}")]
    Path { message: String },
}

/// Only files with this extension are picked up from the raw directory.
pub const VIDEO_EXTENSION: &str = "mp4";

/// The two directories the tool works between: sources are read from
/// `raw`, renamed copies land under `fixed`.
#[derive(Debug, Clone)]
pub struct Roots {
    pub raw: PathBuf,
    pub fixed: PathBuf,
}

impl Roots {
    pub fn new(raw: PathBuf, fixed: PathBuf) -> Self {
        Self { raw, fixed }
    }
}

pub fn ensure_dirs(roots: &Roots) -> Result<(), RenameError> {
    fs::create_dir_all(&roots.raw)?;
    fs::create_dir_all(&roots.fixed)?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub original: String,
    pub renamed: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub file: String,
    pub status: ExportStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Copied { to: String },
    Missing,
    Failed { reason: String },
}

/// Recursively enumerate video files under the raw root, as sorted
/// root-relative ids with `/` separators. A missing root is an empty
/// listing, not an error.
pub fn list_videos(raw_root: &Path) -> Result<Vec<String>, RenameError> {
    if !raw_root.exists() {
        debug!("Raw directory does not exist: {:?}", raw_root);
        return Ok(Vec::new());
    }
    if !raw_root.is_dir() {
        return Err(RenameError::Path {
            message: format!("raw root is not a directory: {}", raw_root.display()),
        });
    }

    let mut found = Vec::new();
    collect_videos(raw_root, raw_root, &mut found)?;
    found.sort();

    info!("Found {} video file(s) under {:?}", found.len(), raw_root);
    Ok(found)
}

fn collect_videos(dir: &Path, root: &Path, found: &mut Vec<String>) -> Result<(), RenameError> {
    debug!("Scanning directory: {:?}", dir);

    let entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;

    for entry in &entries {
        let path = entry.path();
        if path.is_file() && has_video_extension(&path) {
            if let Ok(rel) = path.strip_prefix(root) {
                found.push(rel_to_string(rel));
            }
        }
    }

    for entry in &entries {
        let path = entry.path();
        if path.is_dir() {
            collect_videos(&path, root, found)?;
        }
    }

    Ok(())
}

fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(VIDEO_EXTENSION))
}

fn rel_to_string(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect::<Vec<_>>()
        .join("/")
}

/// Reduce a user-supplied file id to a root-relative path. Parent, root
/// and prefix components are discarded so the id can never resolve
/// outside the directory it is joined onto.
pub fn sanitize_rel_path(id: &str) -> PathBuf {
    // Normalize separators so Windows-style ids sanitize the same way.
    let normalized = id.replace('\\', "/");

    let mut clean = PathBuf::new();
    for component in Path::new(&normalized).components() {
        if let Component::Normal(part) = component {
            clean.push(part);
        }
    }
    clean
}

pub fn plan_renames(files: &[String], pattern: &str) -> Vec<RenamePlan> {
    files
        .iter()
        .map(|file| RenamePlan {
            original: file.clone(),
            renamed: apply_pattern(file, pattern),
        })
        .collect()
}

/// Copy each listed video into the fixed root under its new name. Ids
/// that do not resolve to a regular file under the raw root are reported
/// as `Missing`; an I/O fault on one copy is reported as `Failed` for
/// that item. Neither stops the rest of the batch.
pub fn export(roots: &Roots, files: &[String], pattern: &str, dry_run: bool) -> Vec<ExportOutcome> {
    let mut outcomes = Vec::with_capacity(files.len());

    for file in files {
        let rel = sanitize_rel_path(file);
        let src = roots.raw.join(&rel);

        if !src.is_file() {
            warn!("Source file missing: {:?}", src);
            outcomes.push(ExportOutcome {
                file: file.clone(),
                status: ExportStatus::Missing,
            });
            continue;
        }

        let renamed = apply_pattern(&rel_to_string(&rel), pattern);
        // The pattern itself may carry separators; sanitize again so the
        // destination stays inside the fixed root.
        let dst = roots.fixed.join(sanitize_rel_path(&renamed));

        let status = if dry_run {
            info!("Would copy {:?} -> {:?}", src, dst);
            ExportStatus::Copied { to: renamed }
        } else {
            match copy_one(&src, &dst) {
                Ok(()) => {
                    info!("Copied {:?} -> {:?}", src, dst);
                    ExportStatus::Copied { to: renamed }
                }
                Err(err) => {
                    warn!("Copy failed for {:?}: {}", src, err);
                    ExportStatus::Failed {
                        reason: err.to_string(),
                    }
                }
            }
        };

        outcomes.push(ExportOutcome {
            file: file.clone(),
            status,
        });
    }

    outcomes
}

fn copy_one(src: &Path, dst: &Path) -> Result<(), RenameError> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst)?;
    Ok(())
}
