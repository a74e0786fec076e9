use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories_next::ProjectDirs;

pub const ENV_STATE_DIR: &str = "WAVEPAPER_STATE_DIR";

const QUALIFIER: &str = "org";
const ORGANISATION: &str = "Wavepaper";
const APPLICATION: &str = "wavepaper";

/// Resolved locations for the daemon's on-disk state.
#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
}

impl AppPaths {
    /// Resolves the config directory, honouring the `WAVEPAPER_STATE_DIR`
    /// override before falling back to the platform config location.
    pub fn discover() -> Result<Self> {
        if let Some(dir) = env_override(ENV_STATE_DIR) {
            return Ok(Self { config_dir: dir });
        }

        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANISATION, APPLICATION)
            .ok_or_else(|| anyhow!("failed to determine user directories"))?;
        Ok(Self {
            config_dir: project_dirs.config_dir().to_path_buf(),
        })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Preference file holding the persisted mode.
    pub fn state_file(&self) -> PathBuf {
        self.config_dir.join("state.toml")
    }
}

fn env_override(name: &str) -> Option<PathBuf> {
    let value = env::var_os(name)?;
    if value.is_empty() {
        return None;
    }
    Some(PathBuf::from(value))
}
