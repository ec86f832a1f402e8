use crate::error::ConfigError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

pub const SUPABASE_URL_VAR: &str = "SUPABASE_URL";
pub const SUPABASE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const PROBE_TABLE_VAR: &str = "PROBE_TABLE";
pub const LOGLEVEL_VAR: &str = "LOGLEVEL";

pub const DEFAULT_TABLE: &str = "users";
pub const DEFAULT_LOGLEVEL: &str = "info";

/// Process configuration, sourced from the environment.
///
/// The credentials stay optional here; [`Config::credentials`] is the only way
/// to turn them into something a client can be built from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default, deserialize_with = "lossy_string")]
    pub supabase_url: Option<String>,
    #[serde(default, deserialize_with = "lossy_string")]
    pub supabase_service_role_key: Option<String>,
    #[serde(default, deserialize_with = "lossy_string")]
    pub probe_table: Option<String>,
    #[serde(default, deserialize_with = "lossy_string")]
    pub loglevel: Option<String>,
}

impl Config {
    /// Environment-backed figment for the variables the probe reads.
    ///
    /// Credentials bypass `Env` value parsing: they are opaque, and `Env`
    /// would turn `0123` into `123` or `[abc]` into an array.
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Env::raw().only(&[PROBE_TABLE_VAR, LOGLEVEL_VAR]));
        [
            (SUPABASE_URL_VAR, "supabase_url"),
            (SUPABASE_KEY_VAR, "supabase_service_role_key"),
        ]
        .into_iter()
        .filter_map(|(var, key)| std::env::var(var).ok().map(|value| (key, value)))
        .fold(figment, |figment, (key, value)| {
            figment.merge(Serialized::default(key, value))
        })
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        match (
            self.supabase_url.as_deref(),
            self.supabase_service_role_key.as_deref(),
        ) {
            (Some(url), Some(key)) => Credentials::new(url, key),
            _ => Err(ConfigError::MissingCredentials),
        }
    }

    pub fn table(&self) -> &str {
        non_empty(self.probe_table.as_deref()).unwrap_or(DEFAULT_TABLE)
    }

    pub fn loglevel(&self) -> &str {
        non_empty(self.loglevel.as_deref()).unwrap_or(DEFAULT_LOGLEVEL)
    }
}

/// Endpoint URL plus service-role key. Both are guaranteed non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    url: String,
    service_role_key: String,
}

impl Credentials {
    pub fn new(url: impl Into<String>, service_role_key: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let service_role_key = service_role_key.into();
        if url.is_empty() || service_role_key.is_empty() {
            return Err(ConfigError::MissingCredentials);
        }
        Ok(Self {
            url,
            service_role_key,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn service_role_key(&self) -> &str {
        &self.service_role_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("service_role_key", &"<redacted>")
            .finish()
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

// `Env` parses values, so `PROBE_TABLE=2024` arrives as a number.
// Keep scalars as text; null/empty collapses to `None`.
fn lossy_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}
