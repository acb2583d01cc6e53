use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Navigate,
    Insert,
    Edit,
    ConfirmDelete,
    ConfirmClear,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Navigate => write!(f, "NAVIGATE"),
            Mode::Insert => write!(f, "INSERT"),
            Mode::Edit => write!(f, "EDIT"),
            Mode::ConfirmDelete => write!(f, "CONFIRM"),
            Mode::ConfirmClear => write!(f, "CONFIRM"),
        }
    }
}
