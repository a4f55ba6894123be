//! Menu numbers and the actions they select.

/// Parse a menu number typed by the user. Surrounding whitespace is ignored.
pub fn parse_number(line: &str) -> Option<i64> {
    line.trim().parse().ok()
}

/// One entry of the per-library action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    DisplayBooks,
    DisplayLoans,
    Lend,
    Return,
    Add,
    Delete,
    SwitchLibrary,
    Exit,
}

impl Action {
    /// Menu entries in display order.
    pub const MENU: [Action; 8] = [
        Action::DisplayBooks,
        Action::DisplayLoans,
        Action::Lend,
        Action::Return,
        Action::Add,
        Action::Delete,
        Action::SwitchLibrary,
        Action::Exit,
    ];

    pub fn from_choice(choice: i64) -> Option<Self> {
        Self::MENU.into_iter().find(|action| action.choice() == choice)
    }

    pub fn choice(self) -> i64 {
        match self {
            Self::DisplayBooks => 1,
            Self::DisplayLoans => 2,
            Self::Lend => 3,
            Self::Return => 4,
            Self::Add => 5,
            Self::Delete => 6,
            Self::SwitchLibrary => 7,
            Self::Exit => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DisplayBooks => "Display all books",
            Self::DisplayLoans => "Display loaned books",
            Self::Lend => "Lend a book",
            Self::Return => "Return a book",
            Self::Add => "Add a book",
            Self::Delete => "Delete a book",
            Self::SwitchLibrary => "Change library",
            Self::Exit => "Exit program",
        }
    }
}

/// Map a 1-based library menu number onto an index into `count` libraries.
pub fn library_index(choice: i64, count: usize) -> Option<usize> {
    let index = usize::try_from(choice).ok()?.checked_sub(1)?;
    (index < count).then_some(index)
}
