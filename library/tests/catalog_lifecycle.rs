//! Lifecycle tests driving a `LibraryCatalog` through sequences of mutations.
//!
//! Each test works on a record file in a temp directory and reopens it to
//! confirm that what was persisted matches what was held in memory.

use library::core::error::{CatalogError, LookupTarget};
use library::test_support::{TempLibrary, rejection};

/// Walks a single title through add → lend → blocked delete → return → delete.
///
/// Sequence:
/// 1. add "Dune" succeeds
/// 2. add " dune " fails (duplicate)
/// 3. lend "DUNE" to Alice succeeds
/// 4. delete "dune" fails (on loan)
/// 5. return "Dune" succeeds
/// 6. delete "Dune" succeeds, catalog empty
#[test]
fn dune_scenario() {
    let mut lib = TempLibrary::new().expect("library");
    let catalog = &mut lib.catalog;

    assert_eq!(catalog.add_book("Dune").expect("add"), "Dune");

    let err = catalog.add_book(" dune ").unwrap_err();
    assert_eq!(
        rejection(&err),
        Some(&CatalogError::DuplicateBook {
            title: "Dune".to_string()
        })
    );

    let loan = catalog.lend_book("DUNE", "Alice").expect("lend");
    assert_eq!(loan.title, "Dune");
    assert_eq!(loan.borrower, "Alice");

    let err = catalog.delete_book("dune").unwrap_err();
    assert_eq!(
        rejection(&err),
        Some(&CatalogError::BookOnLoan {
            title: "Dune".to_string()
        })
    );
    assert_eq!(catalog.list_books(), ["Dune"]);
    assert_eq!(catalog.list_loans(), vec![("Dune", "Alice")]);

    catalog.return_book("Dune").expect("return");
    catalog.delete_book("Dune").expect("delete");
    assert!(catalog.list_books().is_empty());
    assert!(catalog.list_loans().is_empty());

    let reopened = lib.reopen().expect("reopen");
    assert!(reopened.list_books().is_empty());
    assert!(reopened.list_loans().is_empty());
}

/// Persist-then-reload yields identical books and loans after mixed mutations,
/// including rejected ones.
#[test]
fn reload_matches_memory_after_mixed_operations() {
    let mut lib = TempLibrary::new().expect("library");
    let catalog = &mut lib.catalog;

    for title in ["Ulysses", "  Middlemarch", "Dracula  ", "Beloved"] {
        catalog.add_book(title).expect("add");
    }
    catalog.lend_book("dracula", "Mina").expect("lend");
    catalog.lend_book("ULYSSES", "Leopold").expect("lend");
    catalog.lend_book("beloved", "Sethe").expect("lend");
    catalog.return_book("ulysses ").expect("return");
    catalog.delete_book("Ulysses").expect("delete");
    assert!(catalog.add_book("middlemarch").is_err());
    assert!(catalog.lend_book("Dracula", "Jonathan").is_err());
    assert!(catalog.return_book("Ulysses").is_err());

    let reopened = lib.reopen().expect("reopen");
    assert_eq!(reopened.record(), lib.catalog.record());
    assert_eq!(reopened.list_books(), ["Middlemarch", "Dracula", "Beloved"]);
    assert_eq!(
        reopened.list_loans(),
        vec![("Dracula", "Mina"), ("Beloved", "Sethe")]
    );
}

#[test]
fn lending_unknown_book_leaves_loans_unchanged() {
    let mut lib = TempLibrary::new().expect("library");
    lib.catalog.add_book("Dune").expect("add");

    let err = lib.catalog.lend_book("Emma", "Bob").unwrap_err();
    assert_eq!(
        rejection(&err),
        Some(&CatalogError::NotFound {
            title: "Emma".to_string(),
            target: LookupTarget::Catalog,
        })
    );
    assert!(lib.catalog.list_loans().is_empty());
    assert!(lib.reopen().expect("reopen").list_loans().is_empty());
}

#[test]
fn returning_twice_fails_the_second_time() {
    let mut lib = TempLibrary::new().expect("library");
    lib.catalog.add_book("Dune").expect("add");
    lib.catalog.add_book("Emma").expect("add");
    lib.catalog.lend_book("Dune", "Alice").expect("lend");
    lib.catalog.lend_book("Emma", "Bob").expect("lend");

    lib.catalog.return_book(" DUNE ").expect("return");
    assert_eq!(lib.catalog.list_loans(), vec![("Emma", "Bob")]);

    let err = lib.catalog.return_book("Dune").unwrap_err();
    assert!(matches!(
        rejection(&err),
        Some(CatalogError::NotFound {
            target: LookupTarget::LoanRecords,
            ..
        })
    ));
    assert_eq!(lib.catalog.list_loans(), vec![("Emma", "Bob")]);
}

#[test]
fn libraries_do_not_share_records() {
    let libs = library::test_support::TempLibraries::new().expect("libraries");
    let mut session = libs.session();
    assert_eq!(session.names().count(), 3);

    let mut city = library::catalog::LibraryCatalog::open(
        "City Library",
        libs.dir.path().join("city_library.json"),
    )
    .expect("open city");
    city.add_book("Dune").expect("add");

    assert_eq!(session.catalog(0).expect("city").list_books(), ["Dune"]);
    assert!(session.catalog(1).expect("university").list_books().is_empty());
    assert!(session.catalog(2).expect("school").list_books().is_empty());
    assert!(!libs.dir.path().join("school_library.json").exists());
}
