//! Configuration files.
//!
//! A run can be described in TOML:
//!
//! ```toml
//! roots = ["src/my_app"]
//! base_component = "manager"
//! verbose = false
//! ignored_packages = ["my_app.legacy", "*.tests"]
//! ignored_modules = ["models"]
//!
//! [context]
//! environment = "staging"
//! ```
//!
//! Every key is optional. Relative roots are resolved against the directory
//! containing the file.

use std::fs;
use std::path::{Path, PathBuf};

use ordo_loader::LoaderConfig;

/// Errors raised while reading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        /// The configuration file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML or has unexpected keys.
    #[error("failed to parse config file '{}': {message}", path.display())]
    Parse {
        /// The configuration file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// Reads a [`LoaderConfig`] from a TOML file.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] if the file cannot be read and
/// [`ConfigError::Parse`] if its contents are invalid.
pub fn load_config(path: impl AsRef<Path>) -> Result<LoaderConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config = parse_config(&contents, path.parent()).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })?;
    tracing::debug!(path = %path.display(), roots = config.roots.len(), "configuration loaded");
    Ok(config)
}

/// Parses a [`LoaderConfig`] from TOML text.
///
/// Relative roots are joined onto `base` when one is given.
///
/// # Errors
///
/// Returns the parser message if `contents` is invalid.
pub fn parse_config(contents: &str, base: Option<&Path>) -> Result<LoaderConfig, String> {
    let mut config: LoaderConfig = toml::from_str(contents).map_err(|e| e.to_string())?;
    if let Some(base) = base {
        for root in &mut config.roots {
            if root.is_relative() {
                *root = base.join(&*root);
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = parse_config("", None).unwrap();
        assert_eq!(config, LoaderConfig::new());
    }

    #[test]
    fn relative_roots_follow_base() {
        let config = parse_config(
            r#"roots = ["app", "/opt/shared"]"#,
            Some(Path::new("/etc/ordo")),
        )
        .unwrap();
        assert_eq!(
            config.roots,
            [PathBuf::from("/etc/ordo/app"), PathBuf::from("/opt/shared")]
        );
    }

    #[test]
    fn context_table_is_read() {
        let config = parse_config(
            r#"
            base_component = "manager"
            ignored_modules = ["models"]

            [context]
            environment = "staging"
            workers = 4
            "#,
            None,
        )
        .unwrap();
        assert_eq!(config.base_component.as_deref(), Some("manager"));
        assert_eq!(config.ignored_modules, ["models"]);
        assert_eq!(config.context.get_as::<u32>("workers"), Some(4));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config("rootz = []", None).unwrap_err();
        assert!(err.contains("rootz"), "message: {err}");
    }
}
