//! Interactive menu session over a set of libraries.
//!
//! The session owns every configured [`LibraryCatalog`] and reads each record
//! the first time its library is picked. An outer loop picks a library, then
//! the interaction loop runs actions against it until the user switches
//! library or exits. A library whose record cannot be read is reported and the
//! selection menu comes back.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::catalog::LibraryCatalog;
use crate::core::error::CatalogError;
use crate::io::config::LibraryConfig;
use crate::menu::{Action, library_index, parse_number};

/// What the caller should do after an action or an interaction loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    /// Stay in the current library's menu.
    Continue,
    /// Go back to library selection.
    SwitchLibrary,
    /// Leave the program.
    Exit,
}

/// Line-oriented input and output for the menus.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{line}").context("write output")
    }

    /// Print `text` and read one line. Returns `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}").context("write output")?;
        self.output.flush().context("flush output")?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// A configured library, opened on first selection.
#[derive(Debug)]
struct LibrarySlot {
    name: String,
    path: PathBuf,
    catalog: Option<LibraryCatalog>,
}

#[derive(Debug)]
pub struct Session {
    slots: Vec<LibrarySlot>,
}

impl Session {
    /// Register every library listed in `cfg`, in menu order. Record files are
    /// read when a library is first selected, so one unreadable record does
    /// not block the others.
    pub fn new(cfg: &LibraryConfig) -> Self {
        let slots = cfg
            .libraries
            .iter()
            .map(|entry| LibrarySlot {
                name: entry.name.clone(),
                path: cfg.record_path(entry),
                catalog: None,
            })
            .collect();
        Self { slots }
    }

    /// Display names in menu order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.name.as_str())
    }

    /// The catalog at `index`, loading its record on first use.
    pub fn catalog(&mut self, index: usize) -> Result<&mut LibraryCatalog> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or_else(|| anyhow!("library index {index} out of range"))?;
        let catalog = match slot.catalog.take() {
            Some(catalog) => catalog,
            None => LibraryCatalog::open(&slot.name, &slot.path)?,
        };
        Ok(slot.catalog.insert(catalog))
    }

    /// Alternate between library selection and the action menu until exit.
    pub fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        loop {
            let Some(index) = self.select_library(console)? else {
                console.say("\nGoodbye!")?;
                return Ok(());
            };
            let library = match self.catalog(index) {
                Ok(library) => library,
                Err(err) => {
                    console.say(format_args!("Error: {err:#}"))?;
                    continue;
                }
            };
            debug!(library = %library.name(), "library selected");
            match interact(library, console)? {
                ControlSignal::SwitchLibrary => continue,
                ControlSignal::Continue | ControlSignal::Exit => return Ok(()),
            }
        }
    }

    /// Show the library list and read a valid choice.
    ///
    /// Returns `None` at end of input.
    pub fn select_library<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<Option<usize>> {
        let count = self.slots.len();
        console.say("=== LIBRARY MANAGEMENT SYSTEM ===")?;
        console.say("Select a library:")?;
        for (number, name) in self.names().enumerate() {
            console.say(format_args!("{}. {}", number + 1, name))?;
        }

        loop {
            let Some(line) = console.prompt(&format!("\nEnter library number (1-{count}): "))?
            else {
                return Ok(None);
            };
            match parse_number(&line) {
                Some(choice) => match library_index(choice, count) {
                    Some(index) => return Ok(Some(index)),
                    None => console.say(format_args!("Please enter a valid number (1-{count})."))?,
                },
                None => console.say("Please enter a valid number.")?,
            }
        }
    }
}

/// Run the action menu for one library until it asks to switch or exit.
pub fn interact<R: BufRead, W: Write>(
    library: &mut LibraryCatalog,
    console: &mut Console<R, W>,
) -> Result<ControlSignal> {
    console.say(format_args!(
        "\n=== WELCOME TO {} ===",
        library.name().to_uppercase()
    ))?;

    loop {
        console.say(format_args!("\nOptions for {}:", library.name()))?;
        for action in Action::MENU {
            console.say(format_args!("{}. {}", action.choice(), action.label()))?;
        }

        let Some(line) = console.prompt("\nEnter your choice: ")? else {
            console.say("\nGoodbye!")?;
            return Ok(ControlSignal::Exit);
        };
        let Some(choice) = parse_number(&line) else {
            console.say("Please enter a valid number.")?;
            continue;
        };
        let Some(action) = Action::from_choice(choice) else {
            console.say("Please choose a valid option (0-7).")?;
            continue;
        };

        match dispatch(library, action, console)? {
            ControlSignal::Continue => {}
            signal => return Ok(signal),
        }
    }
}

/// Perform one menu action, calling exactly one catalog operation. Lending
/// first checks the title so the borrower is only asked for a lendable book.
pub fn dispatch<R: BufRead, W: Write>(
    library: &mut LibraryCatalog,
    action: Action,
    console: &mut Console<R, W>,
) -> Result<ControlSignal> {
    match action {
        Action::DisplayBooks => show_books(library, console)?,
        Action::DisplayLoans => show_loans(library, console)?,
        Action::Lend => {
            let Some(title) = console.prompt("Enter the book title to lend: ")? else {
                return Ok(ControlSignal::Exit);
            };
            // Unknown or already lent titles are reported before asking who
            // borrows the book.
            if let Err(err) = library.check_lendable(&title) {
                report_failure(console, &err)?;
                return Ok(ControlSignal::Continue);
            }
            let Some(borrower) = console.prompt("Enter the borrower's name: ")? else {
                return Ok(ControlSignal::Exit);
            };
            match library.lend_book(&title, &borrower) {
                Ok(loan) => console.say(format_args!(
                    "Book '{}' has been loaned to {}.",
                    loan.title, loan.borrower
                ))?,
                Err(err) => report_failure(console, &err)?,
            }
        }
        Action::Return => {
            let Some(title) = console.prompt("Enter the book title to return: ")? else {
                return Ok(ControlSignal::Exit);
            };
            match library.return_book(&title) {
                Ok(loan) => console.say(format_args!("Book '{}' has been returned.", loan.title))?,
                Err(err) => report_failure(console, &err)?,
            }
        }
        Action::Add => {
            let Some(title) = console.prompt("Enter the book title to add: ")? else {
                return Ok(ControlSignal::Exit);
            };
            match library.add_book(&title) {
                Ok(title) => {
                    console.say(format_args!("Book '{title}' has been added successfully."))?;
                }
                Err(err) => report_failure(console, &err)?,
            }
        }
        Action::Delete => {
            let Some(title) = console.prompt("Enter the book title to delete: ")? else {
                return Ok(ControlSignal::Exit);
            };
            match library.delete_book(&title) {
                Ok(title) => {
                    console.say(format_args!("Book '{title}' has been deleted successfully."))?;
                }
                Err(err) => report_failure(console, &err)?,
            }
        }
        Action::SwitchLibrary => {
            console.say("\nChanging library...")?;
            return Ok(ControlSignal::SwitchLibrary);
        }
        Action::Exit => {
            console.say("\nGoodbye!")?;
            return Ok(ControlSignal::Exit);
        }
    }
    Ok(ControlSignal::Continue)
}

fn show_books<R: BufRead, W: Write>(
    library: &LibraryCatalog,
    console: &mut Console<R, W>,
) -> Result<()> {
    let books = library.list_books();
    if books.is_empty() {
        return console.say("No books available in the library.");
    }
    console.say("Books in the library:")?;
    for (number, title) in books.iter().enumerate() {
        console.say(format_args!("{}. {}", number + 1, title))?;
    }
    Ok(())
}

fn show_loans<R: BufRead, W: Write>(
    library: &LibraryCatalog,
    console: &mut Console<R, W>,
) -> Result<()> {
    let loans = library.list_loans();
    if loans.is_empty() {
        return console.say("No books are currently on loan.");
    }
    console.say("Currently loaned books:")?;
    for (number, (title, borrower)) in loans.iter().enumerate() {
        console.say(format_args!("{}. {} is borrowed by {}", number + 1, title, borrower))?;
    }
    Ok(())
}

/// Print a failed operation. Catalog rejections print their own message;
/// anything else (storage) is shown with its context chain.
fn report_failure<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    err: &anyhow::Error,
) -> Result<()> {
    match err.downcast_ref::<CatalogError>() {
        Some(rejection) => console.say(rejection),
        None => console.say(format_args!("Error: {err:#}")),
    }
}
