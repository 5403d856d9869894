use std::path::{Component, Path, PathBuf};

use crate::fs::FileSystem;

/// Process-wide inputs of one invocation, passed in rather than read from globals.
pub(crate) struct Context<'a> {
    pub cwd: PathBuf,
    pub fs: &'a dyn FileSystem,
}

impl<'a> Context<'a> {
    pub fn new(cwd: PathBuf, fs: &'a dyn FileSystem) -> Self {
        Self { cwd, fs }
    }

    /// Absolute paths pass through `join` unchanged.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }

    /// Path as shown to the user: relative to the working directory when possible.
    pub fn display_path<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.cwd).unwrap_or(path)
    }
}

/// Import specifier reaching `target` from a file inside `from_dir`, always `/`-separated.
///
/// Purely lexical; both paths are expected to be resolved against the same working directory.
pub(crate) fn relative_import(from_dir: &Path, target: &Path) -> String {
    let from = normalize(from_dir);
    let to = normalize(target);
    let common = from.iter().zip(to.iter()).take_while(|(a, b)| a == b).count();

    let mut parts = vec!["..".to_string(); from.len() - common];
    parts.extend(
        to[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    let joined = parts.join("/");
    if joined.starts_with("../") {
        joined
    } else {
        format!("./{joined}")
    }
}

fn normalize(path: &Path) -> Vec<Component<'_>> {
    let mut out = Vec::new();
    for c in path.components() {
        match c {
            Component::CurDir => {}
            Component::ParentDir if matches!(out.last(), Some(Component::Normal(_))) => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
