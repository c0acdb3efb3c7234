use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::{ShipyardError, ShipyardResult};

/// Flat directory holding every generated file of the site section.
#[derive(Debug, Clone)]
pub struct ContentDir {
    root: PathBuf,
}

impl ContentDir {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Create the directory if it is missing
    pub fn ensure(&self) -> ShipyardResult<()> {
        if !self.root.exists() {
            tracing::info!(dir = %self.root.display(), "creating content directory");
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    pub fn write(&self, name: &str, contents: &str) -> ShipyardResult<()> {
        check_name(name)?;
        self.ensure()?;
        fs::write(self.path(name), contents)?;
        Ok(())
    }

    /// Read a file, `None` when it does not exist
    pub fn read(&self, name: &str) -> ShipyardResult<Option<String>> {
        check_name(name)?;
        match fs::read_to_string(self.path(name)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a file; returns whether it existed
    pub fn remove(&self, name: &str) -> ShipyardResult<bool> {
        check_name(name)?;
        match fs::remove_file(self.path(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).is_file()
    }

    /// Names of regular files directly inside the directory, sorted
    pub fn file_names(&self) -> ShipyardResult<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Only bare file names are accepted; no separators or parent references.
fn check_name(name: &str) -> ShipyardResult<()> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ShipyardError::InvalidInput(format!(
            "not a plain file name: '{}'",
            name
        )));
    }
    Ok(())
}
