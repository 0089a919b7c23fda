//! API key resolution.
//!
//! `GROQ_API_KEY` wins. Without it the key saved by `vocab-importer key --set`
//! is used, which lives in a one-key JSON file under the data directory.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::utils::{get_data_dir, trim_line};

pub const API_KEY_ENV: &str = "GROQ_API_KEY";

const CREDENTIALS_FILE_NAME: &str = "credentials.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Environment,
    CredentialsFile,
}

impl ApiKeySource {
    pub fn description(&self) -> &'static str {
        match self {
            ApiKeySource::Environment => "environment variable",
            ApiKeySource::CredentialsFile => "saved credentials file",
        }
    }
}

/// A resolved credential and where it came from.
#[derive(Debug, Clone)]
pub struct ApiKey {
    pub key: String,
    pub source: ApiKeySource,
}

impl ApiKey {
    /// Trims the value and rejects keys that are blank or contain whitespace.
    fn parse(raw: &str, source: ApiKeySource) -> Result<Option<Self>> {
        let Some(key) = trim_line(raw) else {
            return Ok(None);
        };
        if key.chars().any(char::is_whitespace) {
            bail!("API key from the {} contains whitespace", source.description());
        }
        Ok(Some(ApiKey {
            key: key.to_string(),
            source,
        }))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SavedCredentials {
    api_key: String,
}

/// Single-key credential file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::at(get_data_dir()?.join(CREDENTIALS_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<ApiKey>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read credentials at {}", self.path.display())
                });
            }
        };

        let saved: SavedCredentials = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse credentials at {}", self.path.display()))?;
        ApiKey::parse(&saved.api_key, ApiKeySource::CredentialsFile)
    }

    pub fn save(&self, raw_key: &str) -> Result<()> {
        let key = ApiKey::parse(raw_key, ApiKeySource::CredentialsFile)?
            .context("Cannot store an empty API key")?;

        let contents = serde_json::to_string_pretty(&SavedCredentials { api_key: key.key })?;
        fs::write(&self.path, format!("{contents}\n"))
            .with_context(|| format!("Failed to write credentials at {}", self.path.display()))?;
        restrict_permissions(&self.path)
    }

    /// Returns whether a saved key was removed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err)
                .with_context(|| format!("Failed to remove credentials at {}", self.path.display())),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to restrict permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

/// Environment value first, then the store. A blank environment value counts as unset.
pub fn resolve_api_key(env_value: Option<&str>, store: &CredentialStore) -> Result<Option<ApiKey>> {
    if let Some(raw) = env_value
        && let Some(key) = ApiKey::parse(raw, ApiKeySource::Environment)?
    {
        return Ok(Some(key));
    }
    store.load()
}

pub fn lookup_api_key() -> Result<Option<ApiKey>> {
    let env_value = env::var(API_KEY_ENV).ok();
    resolve_api_key(env_value.as_deref(), &CredentialStore::open_default()?)
}

pub fn store_api_key(api_key: &str) -> Result<PathBuf> {
    let store = CredentialStore::open_default()?;
    store.save(api_key)?;
    Ok(store.path().to_path_buf())
}

pub fn clear_api_key() -> Result<bool> {
    CredentialStore::open_default()?.clear()
}
