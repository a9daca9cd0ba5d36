//! Runtime configuration, resolved from command-line flags with
//! environment fallbacks.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, ValueEnum};
use roadmap_core::{Database, FileStore, RoadmapStore};

/// Where stored roadmaps live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// YAML and JSON metadata files in a data directory
    #[default]
    Files,
    /// A single SQLite database file
    Sqlite,
}

#[derive(Debug, Clone, Default, Args)]
pub struct StoreArgs {
    /// Data directory for stored roadmaps
    #[arg(long, env = "DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage backend
    #[arg(long, value_enum, env = "ROADMAP_BACKEND", default_value_t = Backend::Files)]
    pub backend: Backend,
}

impl StoreArgs {
    /// Open the configured backend, creating its files if needed.
    pub fn open_store(&self) -> Result<Arc<dyn RoadmapStore>> {
        match self.backend {
            Backend::Files => {
                let data_dir = self
                    .data_dir
                    .clone()
                    .unwrap_or_else(|| PathBuf::from("./data"));
                tracing::info!(data_dir = %data_dir.display(), "using file storage");
                Ok(Arc::new(FileStore::open(data_dir)?))
            }
            Backend::Sqlite => {
                let db = match &self.data_dir {
                    Some(dir) => Database::open(dir.join("roadmap.db"))?,
                    None => Database::open_default()?,
                };
                tracing::info!("using sqlite storage");
                db.migrate()?;
                Ok(Arc::new(db))
            }
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port for the HTTP API
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    #[command(flatten)]
    pub store: StoreArgs,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            store: StoreArgs::default(),
        }
    }
}
