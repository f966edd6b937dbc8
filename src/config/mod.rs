//! Configuration management for the wellspring application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `WELLSPRING_DIR`: Path to the data directory (defaults to ~/.local/share/wellspring)
//! - `WELLSPRING_DB`: Path to the SQLite database (defaults to `<data dir>/wellspring.db`)
//! - `WELLSPRING_SLEEP_GOAL`: Nightly sleep goal in hours (defaults to 8)
//! - `HOME`: Used for expanding the default data directory path

use crate::constants::{
    DEFAULT_DATA_SUBDIR, DEFAULT_DB_FILENAME, DEFAULT_SLEEP_GOAL_HOURS, ENV_VAR_HOME,
    ENV_VAR_WELLSPRING_DB, ENV_VAR_WELLSPRING_DIR, ENV_VAR_WELLSPRING_SLEEP_GOAL,
    MAX_SLEEP_GOAL_HOURS, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for the wellspring application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use wellspring::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/path/to/data"),
///     db_path: PathBuf::from("/path/to/data/wellspring.db"),
///     sleep_goal_hours: 7.5,
/// };
/// assert!(config.validate().is_ok());
/// ```
///
/// Loading configuration from environment variables:
/// ```no_run
/// use wellspring::Config;
/// use std::env;
///
/// env::set_var("WELLSPRING_DIR", "/custom/data/path");
///
/// let config = Config::load().expect("Failed to load configuration");
/// assert!(config.db_path.ends_with("wellspring.db"));
/// ```
#[derive(Clone)]
pub struct Config {
    /// Directory holding all persisted state.
    pub data_dir: PathBuf,

    /// SQLite database file backing the key-value store.
    ///
    /// Loaded from WELLSPRING_DB, falling back to `wellspring.db` inside
    /// the data directory.
    pub db_path: PathBuf,

    /// Nightly sleep goal used for progress reporting.
    pub sleep_goal_hours: f64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &REDACTED_PLACEHOLDER)
            .field("db_path", &REDACTED_PLACEHOLDER)
            .field("sleep_goal_hours", &self.sleep_goal_hours)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(""),
            db_path: PathBuf::from(""),
            sleep_goal_hours: DEFAULT_SLEEP_GOAL_HOURS,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// Paths are expanded with `shellexpand`, so `~` and `$VAR` references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - Path expansion fails
    /// - The data directory resolves to an empty path
    /// - `WELLSPRING_SLEEP_GOAL` is not a number
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use wellspring::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Sleep goal: {} hours", config.sleep_goal_hours),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let data_dir_str = env::var(ENV_VAR_WELLSPRING_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_else(|_| "".to_string());
            format!("{}/{}", home, DEFAULT_DATA_SUBDIR)
        });
        let data_dir = expand_path(&data_dir_str)?;

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        let db_path = match env::var(ENV_VAR_WELLSPRING_DB) {
            Ok(raw) if !raw.trim().is_empty() => expand_path(&raw)?,
            _ => data_dir.join(DEFAULT_DB_FILENAME),
        };

        let sleep_goal_hours = match env::var(ENV_VAR_WELLSPRING_SLEEP_GOAL) {
            Ok(raw) => raw.trim().parse::<f64>().map_err(|_| {
                AppError::Config(format!(
                    "{} must be a number of hours, got '{}'",
                    ENV_VAR_WELLSPRING_SLEEP_GOAL, raw
                ))
            })?,
            Err(_) => DEFAULT_SLEEP_GOAL_HOURS,
        };

        debug!("Configuration loaded from environment");
        Ok(Config {
            data_dir,
            db_path,
            sleep_goal_hours,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when:
    /// - Either path is empty or relative
    /// - The sleep goal is not in (0, 24]
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        if self.db_path.as_os_str().is_empty() {
            return Err(AppError::Config("Database path is empty".to_string()));
        }

        if !self.db_path.is_absolute() {
            return Err(AppError::Config(
                "Database path must be an absolute path".to_string(),
            ));
        }

        if !(self.sleep_goal_hours > 0.0 && self.sleep_goal_hours <= MAX_SLEEP_GOAL_HOURS) {
            return Err(AppError::Config(format!(
                "Sleep goal must be between 0 and {} hours, got {}",
                MAX_SLEEP_GOAL_HOURS, self.sleep_goal_hours
            )));
        }

        Ok(())
    }

    /// Creates the data directory, and the database's parent directory, if missing.
    ///
    /// On unix, newly created directories are restricted to the owner.
    pub fn ensure_data_dir(&self) -> AppResult<()> {
        create_private_dir(&self.data_dir)?;
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                create_private_dir(parent)?;
            }
        }
        Ok(())
    }
}

fn expand_path(raw: &str) -> AppResult<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
    Ok(PathBuf::from(expanded.into_owned()))
}

fn create_private_dir(dir: &Path) -> AppResult<()> {
    if dir.exists() {
        return Ok(());
    }

    fs::create_dir_all(dir)?;

    #[cfg(unix)]
    {
        use crate::constants::DEFAULT_DIR_PERMISSIONS;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(DEFAULT_DIR_PERMISSIONS))?;
    }

    debug!("Created data directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::tempdir;

    fn setup() {
        env::remove_var(ENV_VAR_WELLSPRING_DIR);
        env::remove_var(ENV_VAR_WELLSPRING_DB);
        env::remove_var(ENV_VAR_WELLSPRING_SLEEP_GOAL);
    }

    fn valid_config(dir: &Path) -> Config {
        Config {
            data_dir: dir.to_path_buf(),
            db_path: dir.join("wellspring.db"),
            sleep_goal_hours: 8.0,
        }
    }

    #[test]
    fn test_debug_impl_redacts_paths() {
        let config = valid_config(Path::new("/home/username/private/wellness"));
        let debug_output = format!("{:?}", config);

        assert!(debug_output.contains(REDACTED_PLACEHOLDER));
        assert!(!debug_output.contains("/home/username/private/wellness"));
        assert!(debug_output.contains("sleep_goal_hours: 8.0"));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from(""));
        assert_eq!(config.sleep_goal_hours, DEFAULT_SLEEP_GOAL_HOURS);
    }

    #[test]
    #[serial]
    fn test_load_defaults_under_home() {
        setup();
        let orig_home = env::var(ENV_VAR_HOME).ok();
        env::set_var(ENV_VAR_HOME, "/home/tester");

        let config = Config::load().unwrap();

        match orig_home {
            Some(val) => env::set_var(ENV_VAR_HOME, val),
            None => env::remove_var(ENV_VAR_HOME),
        }

        assert_eq!(
            config.data_dir,
            PathBuf::from("/home/tester/.local/share/wellspring")
        );
        assert_eq!(
            config.db_path,
            PathBuf::from("/home/tester/.local/share/wellspring/wellspring.db")
        );
        assert_eq!(config.sleep_goal_hours, 8.0);
    }

    #[test]
    #[serial]
    fn test_load_with_custom_dir_and_db() {
        setup();
        let temp_dir = tempdir().unwrap();
        let dir_path = temp_dir.path().to_string_lossy().to_string();

        env::set_var(ENV_VAR_WELLSPRING_DIR, &dir_path);
        let config = Config::load().unwrap();
        assert_eq!(config.data_dir, PathBuf::from(&dir_path));
        assert_eq!(config.db_path, temp_dir.path().join("wellspring.db"));

        let custom_db = temp_dir.path().join("elsewhere").join("my.db");
        env::set_var(ENV_VAR_WELLSPRING_DB, &custom_db);
        let config = Config::load().unwrap();
        assert_eq!(config.db_path, custom_db);

        setup();
    }

    #[test]
    #[serial]
    fn test_load_sleep_goal() {
        setup();
        env::set_var(ENV_VAR_WELLSPRING_DIR, "/tmp/wellspring-test");

        env::set_var(ENV_VAR_WELLSPRING_SLEEP_GOAL, "7.5");
        assert_eq!(Config::load().unwrap().sleep_goal_hours, 7.5);

        env::set_var(ENV_VAR_WELLSPRING_SLEEP_GOAL, "lots");
        match Config::load() {
            Err(AppError::Config(msg)) => assert!(msg.contains("WELLSPRING_SLEEP_GOAL")),
            other => panic!("Expected Config error, got {:?}", other),
        }

        setup();
    }

    #[test]
    fn test_validate_valid_config() {
        let temp_dir = tempdir().unwrap();
        assert!(valid_config(temp_dir.path()).validate().is_ok());
    }

    #[test]
    fn test_validate_empty_data_dir() {
        let config = Config::default();
        match config.validate() {
            Err(AppError::Config(message)) => {
                assert!(message.contains("Data directory path is empty"))
            }
            _ => panic!("Expected Config error about empty data directory"),
        }
    }

    #[test]
    fn test_validate_relative_paths() {
        let mut config = valid_config(Path::new("/abs"));
        config.data_dir = PathBuf::from("relative/path");
        match config.validate() {
            Err(AppError::Config(message)) => assert!(message.contains("must be an absolute path")),
            _ => panic!("Expected Config error about relative path"),
        }

        let mut config = valid_config(Path::new("/abs"));
        config.db_path = PathBuf::from("wellspring.db");
        match config.validate() {
            Err(AppError::Config(message)) => assert!(message.contains("Database path")),
            _ => panic!("Expected Config error about relative database path"),
        }
    }

    #[test]
    fn test_validate_sleep_goal_range() {
        for goal in [0.0, -1.0, 25.0, f64::NAN] {
            let mut config = valid_config(Path::new("/abs"));
            config.sleep_goal_hours = goal;
            assert!(config.validate().is_err(), "goal {} accepted", goal);
        }
    }

    #[test]
    fn test_ensure_data_dir() {
        let temp_dir = tempdir().unwrap();
        let config = valid_config(&temp_dir.path().join("nested").join("data"));

        assert!(!config.data_dir.exists());
        config.ensure_data_dir().unwrap();
        assert!(config.data_dir.exists());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&config.data_dir).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o700);
        }

        // Idempotent
        config.ensure_data_dir().unwrap();
    }
}
