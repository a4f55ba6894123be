//! In-memory catalog record and its validated mutations.
//!
//! Every mutation checks all of its preconditions before touching state, so a
//! rejected call leaves the record exactly as it was.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{CatalogError, LookupTarget};
use crate::core::title::{find_match, validate_title};

/// Books and loans for one library, in the shape they are persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogRecord {
    /// Stored titles in insertion order.
    pub books: Vec<String>,
    /// Stored title -> borrower, in lending order.
    pub loans: IndexMap<String, String>,
}

/// A title paired with the person holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    pub title: String,
    pub borrower: String,
}

impl CatalogRecord {
    /// Append a new title. Returns the stored (trimmed) title.
    pub fn add_book(&mut self, raw_title: &str) -> Result<String, CatalogError> {
        let title = validate_title(raw_title)?;
        if let Some(existing) = find_match(title, &self.books) {
            return Err(CatalogError::DuplicateBook {
                title: existing.to_string(),
            });
        }
        self.books.push(title.to_string());
        Ok(title.to_string())
    }

    /// Remove a title that is not on loan. Returns the removed stored title.
    pub fn delete_book(&mut self, raw_title: &str) -> Result<String, CatalogError> {
        let stored = self.match_book(raw_title)?;
        if self.loans.contains_key(&stored) {
            return Err(CatalogError::BookOnLoan { title: stored });
        }
        self.books.retain(|book| *book != stored);
        Ok(stored)
    }

    /// Record a loan of an available title to `borrower`.
    pub fn lend_book(&mut self, raw_title: &str, borrower: &str) -> Result<Loan, CatalogError> {
        let stored = self.check_lendable(raw_title)?;
        let borrower = borrower.trim();
        if borrower.is_empty() {
            return Err(CatalogError::EmptyBorrower);
        }
        self.loans.insert(stored.clone(), borrower.to_string());
        Ok(Loan {
            title: stored,
            borrower: borrower.to_string(),
        })
    }

    /// Resolve `raw_title` to a stored title that is in the catalog and not on
    /// loan. Runs the title checks of [`Self::lend_book`] without changing
    /// anything.
    pub fn check_lendable(&self, raw_title: &str) -> Result<String, CatalogError> {
        let stored = self.match_book(raw_title)?;
        if let Some(current) = self.loans.get(&stored) {
            return Err(CatalogError::AlreadyLoaned {
                title: stored,
                borrower: current.clone(),
            });
        }
        Ok(stored)
    }

    /// Clear the loan on a title. Lookup runs against the loan keys.
    pub fn return_book(&mut self, raw_title: &str) -> Result<Loan, CatalogError> {
        let title = validate_title(raw_title)?;
        let stored = find_match(title, self.loans.keys())
            .map(str::to_string)
            .ok_or_else(|| CatalogError::NotFound {
                title: title.to_string(),
                target: LookupTarget::LoanRecords,
            })?;
        // shift_remove keeps the remaining loans in lending order.
        let borrower = self.loans.shift_remove(&stored).unwrap_or_default();
        Ok(Loan {
            title: stored,
            borrower,
        })
    }

    /// Titles in insertion order.
    pub fn books(&self) -> &[String] {
        &self.books
    }

    /// `(title, borrower)` pairs in lending order.
    pub fn loans(&self) -> impl Iterator<Item = (&str, &str)> {
        self.loans
            .iter()
            .map(|(title, borrower)| (title.as_str(), borrower.as_str()))
    }

    /// Current borrower of the title matching `title`, if it is on loan.
    pub fn borrower_of(&self, title: &str) -> Option<&str> {
        let stored = find_match(title, self.loans.keys())?;
        self.loans.get(stored).map(String::as_str)
    }

    fn match_book(&self, raw_title: &str) -> Result<String, CatalogError> {
        let title = validate_title(raw_title)?;
        find_match(title, &self.books)
            .map(str::to_string)
            .ok_or_else(|| CatalogError::NotFound {
                title: title.to_string(),
                target: LookupTarget::Catalog,
            })
    }
}
