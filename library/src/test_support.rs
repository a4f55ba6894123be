//! Test-only helpers for building records and scratch libraries.

use anyhow::Result;
use tempfile::TempDir;

use crate::catalog::LibraryCatalog;
use crate::core::error::CatalogError;
use crate::core::record::CatalogRecord;
use crate::io::config::LibraryConfig;
use crate::session::Session;

/// Build a record directly, bypassing mutation checks.
pub fn record_with(books: &[&str], loans: &[(&str, &str)]) -> CatalogRecord {
    CatalogRecord {
        books: books.iter().map(|title| title.to_string()).collect(),
        loans: loans
            .iter()
            .map(|(title, borrower)| (title.to_string(), borrower.to_string()))
            .collect(),
    }
}

/// Recover the catalog rejection behind an operation error, if any.
pub fn rejection(err: &anyhow::Error) -> Option<&CatalogError> {
    err.downcast_ref::<CatalogError>()
}

/// A "City Library" catalog backed by a file in a temp directory.
pub struct TempLibrary {
    pub dir: TempDir,
    pub catalog: LibraryCatalog,
}

impl TempLibrary {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let catalog = LibraryCatalog::open("City Library", dir.path().join("city_library.json"))?;
        Ok(Self { dir, catalog })
    }

    /// Open a fresh instance over the same record file.
    pub fn reopen(&self) -> Result<LibraryCatalog> {
        LibraryCatalog::open(self.catalog.name(), self.catalog.path())
    }
}

/// The default three-library configuration rooted in a temp directory.
pub struct TempLibraries {
    pub dir: TempDir,
    pub config: LibraryConfig,
}

impl TempLibraries {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let config = LibraryConfig {
            data_dir: dir.path().to_path_buf(),
            ..LibraryConfig::default()
        };
        Ok(Self { dir, config })
    }

    pub fn session(&self) -> Session {
        Session::new(&self.config)
    }
}
