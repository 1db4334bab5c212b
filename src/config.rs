//! Credential and environment configuration
//!
//! The TMDB credential is resolved once at startup and handed to the provider
//! as a value. Dotenv files may seed the process environment beforehand.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable holding the TMDB API key
pub const API_KEY_VAR: &str = "TMDB_KEY";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The credential variable is unset or blank
    #[error("Missing credential: set {0} in the environment or a .env file")]
    MissingCredential(&'static str),

    /// An explicitly requested dotenv file could not be loaded
    #[error("Failed to load environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
}

/// A TMDB API key
///
/// The `Debug` output is redacted so the key never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Resolves the key from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(|name| std::env::var(name).ok())
    }

    /// Resolves the key through the given variable lookup
    ///
    /// Surrounding whitespace is trimmed; an empty value counts as missing.
    pub fn resolve<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(API_KEY_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(Self)
            .ok_or(ConfigError::MissingCredential(API_KEY_VAR))
    }

    /// Returns the raw key for use in a request
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Loads dotenv files into the process environment
///
/// With an explicit `path` the file must exist and parse. Otherwise `.env` in
/// the working directory and `.env` in the platform config directory are
/// loaded when present. Variables already set are never overridden.
///
/// Returns the files that were actually loaded.
pub fn load_env_files(path: Option<&Path>) -> Result<Vec<PathBuf>, ConfigError> {
    if let Some(path) = path {
        dotenvy::from_path(path).map_err(|source| ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(vec![path.to_path_buf()]);
    }

    let mut loaded = Vec::new();
    for candidate in default_env_files() {
        if !candidate.is_file() {
            continue;
        }
        match dotenvy::from_path(&candidate) {
            Ok(()) => loaded.push(candidate),
            Err(e) => {
                debug!(path = %candidate.display(), error = %e, "skipping unreadable env file")
            }
        }
    }

    Ok(loaded)
}

/// Candidate dotenv locations, in load order
fn default_env_files() -> Vec<PathBuf> {
    let mut files = vec![PathBuf::from(".env")];
    if let Some(dirs) = directories::ProjectDirs::from("", "", "showrunner") {
        files.push(dirs.config_dir().join(".env"));
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_present_key() {
        let key = ApiKey::resolve(|name| {
            assert_eq!(name, API_KEY_VAR);
            Some("  abc123 \n".to_string())
        })
        .unwrap();

        assert_eq!(key.expose(), "abc123");
    }

    #[test]
    fn test_resolve_missing_key_names_variable() {
        let err = ApiKey::resolve(|_| None).unwrap_err();

        assert!(matches!(err, ConfigError::MissingCredential("TMDB_KEY")));
        assert!(err.to_string().contains("TMDB_KEY"));
    }

    #[test]
    fn test_resolve_blank_key_is_missing() {
        let result = ApiKey::resolve(|_| Some("   ".to_string()));
        assert!(matches!(result, Err(ConfigError::MissingCredential(_))));
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = ApiKey::new("super-secret");
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
    }

    #[test]
    fn test_explicit_env_file_must_exist() {
        let result = load_env_files(Some(Path::new("/nonexistent/showrunner/.env")));
        assert!(matches!(result, Err(ConfigError::EnvFile { .. })));
    }

    #[test]
    fn test_explicit_env_file_is_loaded() {
        let path = std::env::temp_dir().join(format!("showrunner_env_{}.env", std::process::id()));
        std::fs::write(&path, "SHOWRUNNER_TEST_ONLY_VAR=loaded\n").unwrap();

        let loaded = load_env_files(Some(&path)).unwrap();

        assert_eq!(loaded, vec![path.clone()]);
        assert_eq!(
            std::env::var("SHOWRUNNER_TEST_ONLY_VAR").as_deref(),
            Ok("loaded")
        );

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_env_file_does_not_override_existing_variables() {
        let original = std::env::var("PATH").unwrap();
        let path = std::env::temp_dir().join(format!(
            "showrunner_env_override_{}.env",
            std::process::id()
        ));
        std::fs::write(&path, "PATH=/overridden/by/dotenv\n").unwrap();

        load_env_files(Some(&path)).unwrap();

        assert_eq!(std::env::var("PATH").unwrap(), original);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_default_env_files_start_with_working_directory() {
        let files = default_env_files();

        assert_eq!(files[0], PathBuf::from(".env"));
        assert!(files.iter().skip(1).all(|f| f.ends_with(".env")));
    }
}
