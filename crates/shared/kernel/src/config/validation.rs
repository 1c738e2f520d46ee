//! Checks a consumer runs before handing the record to the toolchain.
//!
//! Loading never validates. These functions are opt-in and report problems
//! instead of repairing them.

use crate::error::{ConfigError, Result};
use forge_domain::config::{ForgeConfigInner, ProfileSet};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Checks the shape of the record.
///
/// All problems are collected into a single [`ConfigError::Invalid`] so that one run
/// reports everything that needs fixing.
///
/// # Errors
/// Returns [`ConfigError::Invalid`] when a required string is empty, no profile set is
/// defined, a profile set (or one of its paths) is empty, or the plate settings are unusable.
pub fn validate(cfg: &ForgeConfigInner) -> Result<()> {
    let mut problems = Vec::new();

    if is_blank_path(cfg.slicer_location()) {
        problems.push("slicer.location is empty".to_owned());
    }
    if cfg.print_server_address().trim().is_empty() {
        problems.push("print_server.address is empty".to_owned());
    }
    if is_blank_path(cfg.helper_location()) {
        problems.push("helper_tool.location is empty".to_owned());
    }

    let plate = &cfg.helper_tool.plate;
    if plate.width == 0 || plate.height == 0 {
        problems.push(format!(
            "helper_tool.plate must be larger than zero (got {}x{})",
            plate.width, plate.height
        ));
    }
    if !plate.spacing.is_finite() || plate.spacing < 0.0 {
        problems.push(format!("helper_tool.plate.spacing is invalid: {}", plate.spacing));
    }

    if cfg.profile_sets().is_empty() {
        problems.push("no profile sets defined".to_owned());
    }
    for (name, set) in cfg.profile_sets() {
        if name.trim().is_empty() {
            problems.push("profile set with an empty name".to_owned());
        }
        if set.is_empty() {
            problems.push(format!("profile set '{name}' has no paths"));
        }
        for (index, path) in set.iter().enumerate() {
            if is_blank_path(path) {
                problems.push(format!("profile set '{name}' has an empty path at index {index}"));
            }
        }
    }

    if problems.is_empty() {
        return Ok(());
    }

    warn!(count = problems.len(), "Configuration failed validation");
    Err(ConfigError::invalid(problems.join("; ")))
}

/// Looks up a profile set, failing with a descriptive error when it is not defined.
///
/// # Errors
/// Returns [`ConfigError::ProfileSetNotFound`] listing the names that do exist.
pub fn require_profile_set<'a>(cfg: &'a ForgeConfigInner, name: &str) -> Result<&'a ProfileSet> {
    cfg.profile_set(name).ok_or_else(|| ConfigError::ProfileSetNotFound {
        name: name.to_owned(),
        available: cfg.profile_set_names().map(str::to_owned).collect(),
        context: None,
    })
}

/// Which configured entry a path belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathRole {
    Slicer,
    Helper,
    Profile { set: String, index: usize },
}

impl fmt::Display for PathRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slicer => f.write_str("slicer"),
            Self::Helper => f.write_str("helper tool"),
            Self::Profile { set, index } => match *index {
                ProfileSet::PRINTER => write!(f, "profile set '{set}' (printer)"),
                ProfileSet::FILAMENT => write!(f, "profile set '{set}' (filament)"),
                ProfileSet::PRINT => write!(f, "profile set '{set}' (print)"),
                _ => write!(f, "profile set '{set}' (entry {index})"),
            },
        }
    }
}

/// Why a configured path is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathIssueKind {
    Missing,
    NotAFile,
    NotExecutable,
    Unreadable,
}

impl fmt::Display for PathIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Missing => "does not exist",
            Self::NotAFile => "is not a regular file",
            Self::NotExecutable => "is not executable",
            Self::Unreadable => "cannot be inspected",
        })
    }
}

/// A configured path that does not resolve to a usable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathIssue {
    pub role: PathRole,
    pub path: PathBuf,
    pub kind: PathIssueKind,
}

impl fmt::Display for PathIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.role, self.path.display(), self.kind)
    }
}

/// Probes every configured path on the filesystem.
///
/// Relative paths resolve against the current working directory. Executables must be
/// regular files (and on Unix carry an execute bit); profiles must be regular files.
/// Every problem is returned; an empty vector means all paths resolved.
#[must_use]
pub fn check_paths(cfg: &ForgeConfigInner) -> Vec<PathIssue> {
    let mut issues = Vec::new();

    let executables =
        [(PathRole::Slicer, cfg.slicer_location()), (PathRole::Helper, cfg.helper_location())];
    for (role, path) in executables {
        if let Some(kind) = probe(path, true) {
            issues.push(PathIssue { role, path: path.to_path_buf(), kind });
        }
    }

    for (set, profiles) in cfg.profile_sets() {
        for (index, path) in profiles.iter().enumerate() {
            if let Some(kind) = probe(path, false) {
                let role = PathRole::Profile { set: set.clone(), index };
                issues.push(PathIssue { role, path: path.clone(), kind });
            }
        }
    }

    debug!(issues = issues.len(), "Path check finished");
    issues
}

fn probe(path: &Path, executable: bool) -> Option<PathIssueKind> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Some(PathIssueKind::Missing),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Failed to stat path");
            return Some(PathIssueKind::Unreadable);
        },
    };

    if !metadata.is_file() {
        return Some(PathIssueKind::NotAFile);
    }

    #[cfg(unix)]
    if executable {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Some(PathIssueKind::NotExecutable);
        }
    }
    #[cfg(not(unix))]
    let _ = executable;

    None
}

fn is_blank_path(path: &Path) -> bool {
    path.as_os_str().is_empty()
}
