use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::warn;

use crate::storage::traits::TaskStorage;

pub const DEFAULT_STORAGE_KEY: &str = "tasks";
const DEFAULT_DIR_NAME: &str = ".taskboard";

/// `~/.taskboard`
pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(DEFAULT_DIR_NAME))
}

/// Stores each key as `<key>.json` inside a data directory.
#[derive(Clone, Debug)]
pub struct FileTaskStorage {
    file_path: PathBuf,
}

impl FileTaskStorage {
    pub fn new(base_dir: Option<PathBuf>, key: &str) -> Result<Self> {
        validate_key(key)?;
        let mut path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create data directory {}", path.display()))?;
        path.push(format!("{key}.json"));

        Ok(FileTaskStorage { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(anyhow!("Storage key must not be empty"));
    }
    if key.contains(['/', '\\']) || key == "." || key == ".." {
        return Err(anyhow!("Storage key '{}' must be a plain name", key));
    }
    Ok(())
}

impl TaskStorage for FileTaskStorage {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.file_path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Could not read {}: {}", self.file_path.display(), e);
                None
            }
        }
    }

    fn save(&self, data: &str) -> Result<()> {
        // Write beside the target and rename so readers never see half a file.
        let tmp = self.temp_path();
        {
            let mut file = fs::File::create(&tmp)
                .with_context(|| format!("Failed to create {}", tmp.display()))?;
            file.write_all(data.as_bytes())?;
            file.flush()?;
        }
        fs::rename(&tmp, &self.file_path)
            .with_context(|| format!("Failed to replace {}", self.file_path.display()))?;
        Ok(())
    }
}
