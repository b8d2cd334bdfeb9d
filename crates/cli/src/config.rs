//! Console-shell configuration.
use std::env;
use std::path::PathBuf;

/// Console shell configuration.
///
/// The store itself takes an explicit repository; only the shell decides
/// where the roster file lives.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Path of the persisted roster file.
    pub data_file: PathBuf,
}

impl CliConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ROSTER_DATA_FILE` - roster file path (default: `students.json`)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("ROSTER_DATA_FILE")
            && !path.is_empty()
        {
            config.data_file = PathBuf::from(path);
        }

        config
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("students.json"),
        }
    }
}
