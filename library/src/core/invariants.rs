//! Record invariants not expressible via JSON Schema.

use std::collections::HashSet;

use crate::core::record::CatalogRecord;
use crate::core::title::normalize;

/// Check semantic invariants of a loaded record:
/// - Titles are non-blank and stored trimmed
/// - No two titles share a normalized form
/// - Every loan key is a stored title (exact match)
/// - Borrowers are non-blank
pub fn validate_invariants(record: &CatalogRecord) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, title) in record.books.iter().enumerate() {
        if title.trim().is_empty() {
            errors.push(format!("books[{}]: title must not be blank", index));
            continue;
        }
        if title.trim() != title {
            errors.push(format!(
                "books[{}]: title '{}' has surrounding whitespace",
                index, title
            ));
        }
        if !seen.insert(normalize(title)) {
            errors.push(format!("books[{}]: duplicate title '{}'", index, title));
        }
    }

    for (title, borrower) in &record.loans {
        if !record.books.contains(title) {
            errors.push(format!("loans: '{}' is not in books", title));
        }
        if borrower.trim().is_empty() {
            errors.push(format!("loans: '{}' has a blank borrower", title));
        }
    }

    errors
}
