//! Database connection configuration
//!
//! Credentials come from the config file or environment, never from an
//! interactive prompt: the core never touches a terminal.

use serde::Deserialize;

/// Connection settings for the PostgreSQL store.
///
/// `password` accepts a `${VAR}` reference resolved against the
/// environment at load time; the plain-text form works too. When the
/// config file has no password, `ROSTERLINE_DB_PASSWORD` is consulted.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    #[serde(deserialize_with = "deserialize_env_var")]
    pub password: Option<String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "rosterline".to_string(),
            user: "rosterline".to_string(),
            password: std::env::var("ROSTERLINE_DB_PASSWORD").ok(),
        }
    }
}

// Manual impl so a password never lands in logs
impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field(
                "password",
                &self.password.as_ref().map(|_| "********"),
            )
            .finish()
    }
}

/// Deserialize a string that may contain an environment variable reference like ${VAR}
fn deserialize_env_var<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| expand_env_var(&s)))
}

/// Expand ${VAR} to the environment variable's value
fn expand_env_var(s: &str) -> Option<String> {
    if let Some(var_name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        std::env::var(var_name).ok()
    } else {
        Some(s.to_string())
    }
}
