use std::{env, fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

const SETTINGS_FILENAME: &str = "settings.json";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub tcp_socket_binding: String,
    pub tcp_socket_port: u16,
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
}

fn default_max_connections() -> u32 {
    4
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse settings file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Settings {
    /// Reads `settings.json` from the working directory, then applies
    /// `DATABASE_URL`, `TCP_SOCKET_BINDING` and `TCP_SOCKET_PORT` from the
    /// environment.
    pub fn load() -> Result<Settings, SettingsError> {
        let settings = Settings::load_from(SETTINGS_FILENAME)?;
        Ok(settings.with_overrides(|key| env::var(key).ok()))
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Settings {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(binding) = lookup("TCP_SOCKET_BINDING") {
            self.tcp_socket_binding = binding;
        }
        if let Some(port) = lookup("TCP_SOCKET_PORT").and_then(|p| p.parse().ok()) {
            self.tcp_socket_port = port;
        }
        self
    }

    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.tcp_socket_binding, self.tcp_socket_port)
    }
}
