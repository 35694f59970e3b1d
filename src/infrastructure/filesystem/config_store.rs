use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::common::error::GitGetError;
use crate::common::result::{GitGetResult, IoResultExt};
use crate::domain::entities::config::ConfigOverrides;

/// Config file names looked up in the working directory, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["gitget.yml", "gitget.yaml"];

/// Reads gitget YAML configuration files
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Find a config file in the working directory
    pub fn discover(&self, working_dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| working_dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Load overrides from an explicit file or a discovered one.
    ///
    /// An explicit path is used as given and must exist; only discovery looks
    /// in `working_dir`. A missing discovered file just means there is
    /// nothing to override.
    pub fn load(
        &self,
        working_dir: &Path,
        explicit: Option<&Path>,
    ) -> GitGetResult<ConfigOverrides> {
        let path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(GitGetError::config_error(format!(
                        "Configuration file not found: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => match self.discover(working_dir) {
                Some(path) => path,
                None => {
                    debug!("No config file in {}", working_dir.display());
                    return Ok(ConfigOverrides::default());
                }
            },
        };

        self.read_overrides(&path)
    }

    /// Parse a YAML config file
    pub fn read_overrides(&self, path: &Path) -> GitGetResult<ConfigOverrides> {
        debug!("Reading config file {}", path.display());
        let contents = fs::read_to_string(path).with_path("Failed to read config file", path)?;

        if contents.trim().is_empty() {
            return Ok(ConfigOverrides::default());
        }

        serde_yaml::from_str(&contents).map_err(|e| {
            GitGetError::serialization_error_with_source(
                format!("Invalid config file {}", path.display()),
                e,
            )
        })
    }
}
