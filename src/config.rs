//! Process configuration: defaults, then an optional TOML file, then env overrides.
//!
//! TOML schema (every key optional):
//!
//! ```toml
//! [server]
//! port = 5000
//! static_dir = "./static"
//!
//! [store]
//! mongo_uri = "mongodb://localhost:27017"
//! database = "codegrader"
//! collection = "questions"
//! ```

use serde::Deserialize;
use tracing::{error, info, warn};

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Clone, Debug, Deserialize, Default, PartialEq)]
pub struct AppConfig {
  #[serde(default)]
  pub server: ServerConfig,
  #[serde(default)]
  pub store: StoreConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub port: u16,
  /// Directory holding the question form (index.html).
  pub static_dir: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self { port: DEFAULT_PORT, static_dir: "./static".into() }
  }
}

/// Where questions live. Without `mongo_uri` an in-memory store is used.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
  pub mongo_uri: Option<String>,
  pub database: String,
  pub collection: String,
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self { mongo_uri: None, database: "codegrader".into(), collection: "questions".into() }
  }
}

impl AppConfig {
  /// Full load: CODEGRADER_CONFIG_PATH (if set) then PORT / MONGO_URI / MONGO_DB /
  /// MONGO_COLLECTION / STATIC_DIR.
  pub fn load() -> Self {
    let mut cfg = load_file_from_env().unwrap_or_default();
    cfg.apply_env(|k| std::env::var(k).ok());
    cfg
  }

  /// Apply overrides from a variable lookup. Empty values are ignored.
  pub fn apply_env<F>(&mut self, get: F)
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |k: &str| get(k).filter(|v| !v.trim().is_empty());

    if let Some(p) = get("PORT") {
      match p.trim().parse::<u16>() {
        Ok(port) => self.server.port = port,
        Err(e) => warn!(target: "codegrader_backend", port = %p, error = %e, "Ignoring invalid PORT"),
      }
    }
    if let Some(dir) = get("STATIC_DIR") { self.server.static_dir = dir; }
    if let Some(uri) = get("MONGO_URI") { self.store.mongo_uri = Some(uri); }
    if let Some(db) = get("MONGO_DB") { self.store.database = db; }
    if let Some(coll) = get("MONGO_COLLECTION") { self.store.collection = coll; }
  }
}

/// Attempt to load `AppConfig` from CODEGRADER_CONFIG_PATH. On any parsing/IO error, returns None.
fn load_file_from_env() -> Option<AppConfig> {
  let path = std::env::var("CODEGRADER_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "codegrader_backend", %path, "Loaded config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "codegrader_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "codegrader_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
