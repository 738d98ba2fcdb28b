use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// Replace whatever the file held before.
    Overwrite,
    /// Add to the end; used when several commands share one log.
    Append,
}

/// Where a command's captured output is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTarget {
    path: PathBuf,
    mode: LogMode,
}

impl LogTarget {
    pub fn overwrite(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: LogMode::Overwrite,
        }
    }

    pub fn append(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: LogMode::Append,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncate to an empty file, creating parent directories.
    pub fn reset(&self) -> Result<()> {
        self.ensure_parent()?;
        fs::write(&self.path, "").map_err(|e| self.err("Truncating", e))
    }

    pub fn write(&self, contents: &str) -> Result<()> {
        self.ensure_parent()?;
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(self.mode == LogMode::Append)
            .truncate(self.mode == LogMode::Overwrite)
            .open(&self.path)
            .map_err(|e| self.err("Opening", e))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| self.err("Writing", e))
    }

    fn ensure_parent(&self) -> Result<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
                .map_err(|e| BuildError::io(format!("Creating {}", dir.display()), e)),
            _ => Ok(()),
        }
    }

    fn err(&self, verb: &str, e: std::io::Error) -> BuildError {
        BuildError::io(format!("{verb} log {}", self.path.display()), e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_overwrite_replaces_and_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let target = LogTarget::overwrite(tmp.path().join("a/b/sim.log"));
        target.write("first\n").unwrap();
        target.write("second\n").unwrap();
        assert_eq!(fs::read_to_string(target.path()).unwrap(), "second\n");
    }

    #[test]
    fn test_append_accumulates_after_reset() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("log/rtl_compile.log");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale\n").unwrap();

        let target = LogTarget::append(&path);
        target.reset().unwrap();
        target.write("one\n").unwrap();
        target.write("two\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }
}
