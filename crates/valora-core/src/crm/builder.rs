//! Builder for creating and configuring Crm instances.

use std::path::{Path, PathBuf};

use log::info;
use tokio::task;

use super::Crm;
use crate::{
    db::Database,
    error::{Result, ValoraError},
};

/// Builder for creating and configuring Crm instances.
#[derive(Debug, Clone, Default)]
pub struct CrmBuilder {
    database_path: Option<PathBuf>,
}

impl CrmBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/valora/valora.db` or `~/.local/share/valora/valora.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the configured CRM instance, creating the database file and
    /// schema when missing.
    ///
    /// # Errors
    ///
    /// Returns `ValoraError::FileSystem` if the database directory cannot be
    /// created.
    /// Returns `ValoraError::Database` if database initialization fails.
    pub async fn build(self) -> Result<Crm> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ValoraError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), ValoraError>(())
        })
        .await
        .map_err(ValoraError::join)??;

        info!("Using database at {}", db_path.display());
        Ok(Crm::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("valora")
            .place_data_file("valora.db")
            .map_err(|e| ValoraError::XdgDirectory(e.to_string()))
    }
}
