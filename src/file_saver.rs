use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Where downloaded content ends up. Generated filenames never contain path
/// separators, so implementations work with a flat namespace.
pub trait FileSaver {
    /// Saves text content like HTML and CSS.
    fn save_text(&self, filename: &str, content: &str) -> Result<()>;

    /// Saves binary content like fonts and images.
    fn save_bytes(&self, filename: &str, content: &[u8]) -> Result<()>;
}

/// A [`FileSaver`] that writes everything into one directory, created on
/// construction.
pub struct DirectorySaver {
    output_dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir).map_err(|source| Error::Save {
            filename: output_dir.display().to_string(),
            source,
        })?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    fn write(&self, filename: &str, content: &[u8]) -> Result<()> {
        fs::write(self.output_dir.join(filename), content).map_err(|source| Error::Save {
            filename: filename.to_string(),
            source,
        })
    }
}

impl FileSaver for DirectorySaver {
    fn save_text(&self, filename: &str, content: &str) -> Result<()> {
        self.write(filename, content.as_bytes())
    }

    fn save_bytes(&self, filename: &str, content: &[u8]) -> Result<()> {
        self.write(filename, content)
    }
}
