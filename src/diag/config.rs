use {
    cfg_if::cfg_if,
    std::{
        env,
        path::{Component, Path, PathBuf},
    },
};

/// Environment variable naming the diagnostic log file.
///
/// - unset or empty: no file logging
/// - absolute path: append to that file
/// - relative path: append to that path below the per-user data directory
pub const ENV_VAR: &str = "ATOMIC_PRIMS_LOG";

/// Reads [`ENV_VAR`] and resolves it.
pub(super) fn from_env() -> Option<PathBuf> {
    let requested = env::var_os(ENV_VAR)?;
    resolve_log_path(Path::new(&requested), data_dir)
}

/// Turns the requested log path into the file to open.
///
/// `base` is consulted only for relative paths. A relative path with a root but no prefix
/// (`\logs\x.log` on Windows) is placed below `base` as well.
pub fn resolve_log_path(
    requested: &Path,
    base: impl FnOnce() -> Option<PathBuf>,
) -> Option<PathBuf> {
    if requested.as_os_str().is_empty() {
        return None;
    }
    if requested.is_absolute() {
        return Some(requested.to_path_buf());
    }
    let relative: PathBuf = requested
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect();
    Some(base()?.join(relative))
}

fn data_dir() -> Option<PathBuf> {
    cfg_if! {
        if #[cfg(windows)] {
            non_empty("APPDATA")
        } else {
            non_empty("XDG_DATA_HOME")
                .or_else(|| non_empty("HOME").map(|home| home.join(".local").join("share")))
        }
    }
}

fn non_empty(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
