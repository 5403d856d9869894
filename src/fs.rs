use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::Path,
};

/// Filesystem operations the scaffolder needs.
pub(crate) trait FileSystem {
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, dir: &Path) -> io::Result<()>;
    /// Create `path` with `contents`. Fails with `AlreadyExists` instead of replacing a file.
    fn write_new(&self, path: &Path, contents: &str) -> io::Result<()>;
    #[cfg(test)]
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

pub(crate) struct LocalFs;

impl FileSystem for LocalFs {
    // does not follow symlinks: a dangling link still occupies the name
    fn exists(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok()
    }

    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        fs_extra::dir::create_all(dir, false).map_err(io::Error::other)
    }

    fn write_new(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut fd = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)?;
        fd.write_all(contents.as_bytes())?;
        fd.flush()
    }

    #[cfg(test)]
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryFs;
