use std::io::ErrorKind;
use std::path::Path;

use super::types::DespriteConfig;
use crate::error::DespriteError;

/// Load the settings file, creating it with defaults if it does not exist.
///
/// A missing file is the normal first-run case: the defaults are persisted
/// so users can discover and edit them, and the run proceeds with those
/// defaults. A file that exists but cannot be read or parsed is an error.
pub fn load_or_init(path: &Path) -> Result<DespriteConfig, DespriteError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let config = DespriteConfig::default();
            write_default(path, &config)?;
            return Ok(config);
        }
        Err(e) => {
            return Err(DespriteError::ConfigRead {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    serde_json::from_str(&content).map_err(|e| DespriteError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_default(path: &Path, config: &DespriteConfig) -> Result<(), DespriteError> {
    let content = serde_json::to_string_pretty(config).map_err(|e| DespriteError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    std::fs::write(path, content).map_err(|e| DespriteError::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
