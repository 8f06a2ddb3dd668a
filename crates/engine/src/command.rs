use inventory_core::{Product, ValidationError};
use inventory_storage::FailureKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Add,
    Edit,
    Delete,
    ClearSearch,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::Add,
        Command::Edit,
        Command::Delete,
        Command::ClearSearch,
    ];

    /// Whether the command needs a selected product to run.
    pub fn requires_selection(&self) -> bool {
        matches!(self, Self::Edit | Self::Delete)
    }
}

/// What a command did. Rejections have already been reported through the
/// catalog's notifier, except `Disabled`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Added(Product),
    Updated(Product),
    Deleted(Product),
    SearchCleared,
    Rejected(Rejection),
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// `execute` was called while the command could not run.
    Disabled(Command),
    NoSelection,
    Invalid(ValidationError),
    /// The duplicate pre-check found a product with this name.
    Duplicate(String),
    Store(FailureKind),
}
