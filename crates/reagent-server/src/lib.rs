//! Server wiring for Reagent: configuration and the hosted lookup client.
//!
//! The binary in `main.rs` reads a [`ServerConfig`], opens the SQLite store,
//! starts the usage simulation and serves [`reagent_api::api_router`].

pub mod gemini;

use std::path::{Path, PathBuf};

use serde::Deserialize;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `REAGENT_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  pub store_path:       PathBuf,
  /// Key of the snapshot entry inside the store.
  pub store_key:        String,
  /// Period of the usage simulation.
  pub tick_interval_ms: u64,
  pub lookup:           LookupConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:             "127.0.0.1".into(),
      port:             5240,
      store_path:       PathBuf::from("reagent.sqlite3"),
      store_key:        reagent_store_sqlite::DEFAULT_KEY.into(),
      tick_interval_ms: 5_000,
      lookup:           LookupConfig::default(),
    }
  }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LookupConfig {
  /// Lookups fail with a fixed message when unset.
  pub api_key:      Option<String>,
  pub model:        String,
  pub endpoint:     String,
  pub timeout_secs: u64,
}

impl Default for LookupConfig {
  fn default() -> Self {
    Self {
      api_key:      None,
      model:        "gemini-2.5-flash".into(),
      endpoint:     "https://generativelanguage.googleapis.com".into(),
      timeout_secs: 30,
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `REAGENT_*` environment
  /// variables. Nested keys use `__`, e.g. `REAGENT_LOOKUP__API_KEY`.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    Self::load_with_env(path, environment())
  }

  fn load_with_env(path: &Path, env: config::Environment) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(env)
      .build()?
      .try_deserialize()
  }
}

/// `REAGENT_` prefix, `__` between nested keys.
fn environment() -> config::Environment {
  config::Environment::with_prefix("REAGENT")
    .prefix_separator("_")
    .separator("__")
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
