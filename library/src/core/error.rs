//! Rejections raised by catalog mutations.

use std::fmt;

use thiserror::Error;

/// Collection a normalized lookup ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTarget {
    /// The ordered list of book titles.
    Catalog,
    /// The keys of the loan map.
    LoanRecords,
}

impl fmt::Display for LookupTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog => f.write_str("the library"),
            Self::LoanRecords => f.write_str("the loan records"),
        }
    }
}

/// A catalog rule refused the operation. No state was changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Book title cannot be empty.")]
    EmptyTitle,

    #[error("Borrower's name cannot be empty.")]
    EmptyBorrower,

    #[error("'{title}' is not in {target}.")]
    NotFound { title: String, target: LookupTarget },

    #[error("'{title}' already exists in the library.")]
    DuplicateBook { title: String },

    #[error("Cannot delete '{title}' - it is currently on loan.")]
    BookOnLoan { title: String },

    #[error("'{title}' is currently being used by {borrower}.")]
    AlreadyLoaned { title: String, borrower: String },
}
