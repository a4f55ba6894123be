//! One named library bound to its persisted record.
//!
//! Mutations run against a copy of the record. The copy is written to disk and
//! only then replaces the in-memory state, so memory never runs ahead of the
//! file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::error::CatalogError;
use crate::core::record::{CatalogRecord, Loan};
use crate::io::record_store::{load_record, write_record};

#[derive(Debug)]
pub struct LibraryCatalog {
    name: String,
    path: PathBuf,
    record: CatalogRecord,
}

impl LibraryCatalog {
    /// Load the record at `path` (empty if it does not exist yet).
    pub fn open(name: impl Into<String>, path: impl Into<PathBuf>) -> Result<Self> {
        let name = name.into();
        let path = path.into();
        let record = load_record(&path).with_context(|| format!("open {name}"))?;
        debug!(library = %name, books = record.books.len(), "library opened");
        Ok(Self { name, path, record })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self) -> &CatalogRecord {
        &self.record
    }

    /// Titles in insertion order. Empty means the library has no books.
    pub fn list_books(&self) -> &[String] {
        self.record.books()
    }

    /// `(title, borrower)` pairs in lending order.
    pub fn list_loans(&self) -> Vec<(&str, &str)> {
        self.record.loans().collect()
    }

    pub fn borrower_of(&self, title: &str) -> Option<&str> {
        self.record.borrower_of(title)
    }

    /// Check that `raw_title` could be lent right now. Returns the stored title.
    pub fn check_lendable(&self, raw_title: &str) -> Result<String> {
        Ok(self.record.check_lendable(raw_title)?)
    }

    pub fn add_book(&mut self, raw_title: &str) -> Result<String> {
        let title = self.commit("add", |record| record.add_book(raw_title))?;
        info!(library = %self.name, title = %title, "book added");
        Ok(title)
    }

    pub fn delete_book(&mut self, raw_title: &str) -> Result<String> {
        let title = self.commit("delete", |record| record.delete_book(raw_title))?;
        info!(library = %self.name, title = %title, "book deleted");
        Ok(title)
    }

    /// Lend a book. The borrower name is supplied by the caller.
    pub fn lend_book(&mut self, raw_title: &str, borrower: &str) -> Result<Loan> {
        let loan = self.commit("lend", |record| record.lend_book(raw_title, borrower))?;
        info!(library = %self.name, title = %loan.title, borrower = %loan.borrower, "book lent");
        Ok(loan)
    }

    pub fn return_book(&mut self, raw_title: &str) -> Result<Loan> {
        let loan = self.commit("return", |record| record.return_book(raw_title))?;
        info!(library = %self.name, title = %loan.title, borrower = %loan.borrower, "book returned");
        Ok(loan)
    }

    /// Apply `mutate` to a copy, persist the copy, then swap it in.
    ///
    /// A rejection is returned as a [`CatalogError`] (recoverable with
    /// `downcast_ref`) and nothing is written.
    fn commit<T, F>(&mut self, action: &str, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut CatalogRecord) -> Result<T, CatalogError>,
    {
        let mut next = self.record.clone();
        let outcome = match mutate(&mut next) {
            Ok(outcome) => outcome,
            Err(rejection) => {
                debug!(library = %self.name, action, reason = %rejection, "mutation rejected");
                return Err(rejection.into());
            }
        };
        write_record(&self.path, &next)
            .with_context(|| format!("{action}: save {}", self.name))?;
        self.record = next;
        Ok(outcome)
    }
}
