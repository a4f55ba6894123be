//! Title normalization and normalized lookup.
//!
//! Stored titles keep the casing they were added with. Every comparison goes
//! through [`normalize`], for catalog entries and loan keys alike.

use crate::core::error::CatalogError;

/// Trim surrounding whitespace and lowercase. Used only for comparison.
pub fn normalize(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Trim `raw` and reject it if nothing is left.
pub fn validate_title(raw: &str) -> Result<&str, CatalogError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(CatalogError::EmptyTitle);
    }
    Ok(title)
}

/// Return the first stored title in `collection` whose normalized form equals
/// the normalized form of `title`.
pub fn find_match<'a, I>(title: &str, collection: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    let wanted = normalize(title);
    collection
        .into_iter()
        .find(|existing| normalize(existing) == wanted)
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  The Hobbit \t"), "the hobbit");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["Dune", "  DUNE  ", "\tÉcole des Femmes\n", "", "   "] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "input {raw:?}");
        }
    }

    #[test]
    fn validate_title_rejects_blank() {
        assert_eq!(validate_title(""), Err(CatalogError::EmptyTitle));
        assert_eq!(validate_title(" \t\n"), Err(CatalogError::EmptyTitle));
    }

    #[test]
    fn validate_title_keeps_inner_whitespace_and_case() {
        assert_eq!(validate_title("  War and  Peace "), Ok("War and  Peace"));
    }

    #[test]
    fn find_match_ignores_case_and_surrounding_whitespace() {
        let books = vec!["Dune".to_string(), "Emma".to_string()];
        for query in ["dune", " DUNE ", "Dune", "\tdUnE\n"] {
            assert_eq!(find_match(query, &books), Some("Dune"), "query {query:?}");
        }
    }

    #[test]
    fn find_match_returns_stored_spelling() {
        let books = vec!["The Name of the Rose".to_string()];
        assert_eq!(
            find_match("the name of the rose", &books),
            Some("The Name of the Rose")
        );
    }

    #[test]
    fn find_match_does_not_collapse_inner_whitespace() {
        let books = vec!["War and Peace".to_string()];
        assert_eq!(find_match("war  and peace", &books), None);
    }

    #[test]
    fn find_match_returns_first_hit() {
        // Only reachable with a hand-edited record; the first entry wins.
        let books = vec!["Emma".to_string(), "EMMA".to_string()];
        assert_eq!(find_match("emma", &books), Some("Emma"));
    }
}
