use clap::{Parser, Subcommand, ValueEnum};
use due_tui::task::Filter;

#[derive(Parser, Debug)]
#[command(name = "duetui")]
#[command(about = "A terminal task list with due-date reminders", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a task; an embedded date/time like "25/12/2025 6:30 PM" is
    /// extracted automatically
    Add {
        text: String,
    },
    /// Print the task list
    Show {
        #[arg(short, long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    /// Delete every completed task
    ClearCompleted,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterArg {
    All,
    Active,
    Completed,
}

impl std::fmt::Display for FilterArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FilterArg::All => "all",
            FilterArg::Active => "active",
            FilterArg::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

impl From<FilterArg> for Filter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Filter::All,
            FilterArg::Active => Filter::Active,
            FilterArg::Completed => Filter::Completed,
        }
    }
}
