//! Where generated files go.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// Receives directories and files produced by a run.
pub trait ArtifactSink {
    /// Create `dir` and its parents if missing.
    fn ensure_dir(&mut self, dir: &Path) -> io::Result<()>;
    /// Create or overwrite `path` with `contents`.
    fn write_file(&mut self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Writes to the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSink;

impl ArtifactSink for FsSink {
    fn ensure_dir(&mut self, dir: &Path) -> io::Result<()> {
        std::fs::create_dir_all(dir)
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

/// Records everything in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemorySink {
    pub dirs: BTreeSet<PathBuf>,
    pub files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }
}

impl ArtifactSink for MemorySink {
    fn ensure_dir(&mut self, dir: &Path) -> io::Result<()> {
        self.dirs.insert(dir.to_path_buf());
        Ok(())
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fs_sink_creates_nested_dirs_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let client_dir = dir.path().join("schema").join("client");
        let file = client_dir.join("index.ts");

        let mut sink = FsSink;
        sink.ensure_dir(&client_dir).unwrap();
        sink.ensure_dir(&client_dir).unwrap();
        sink.write_file(&file, "first").unwrap();
        sink.write_file(&file, "second").unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "second");
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        sink.ensure_dir(Path::new("schema")).unwrap();
        sink.write_file(Path::new("schema/A.ts"), "a").unwrap();

        assert!(sink.dirs.contains(Path::new("schema")));
        assert_eq!(sink.file("schema/A.ts"), Some("a"));
        assert_eq!(sink.file("schema/B.ts"), None);
    }
}
