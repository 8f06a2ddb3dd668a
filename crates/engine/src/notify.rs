//! The notification port and the user-facing text for every rejected command.

use inventory_core::ValidationError;
use inventory_storage::{FailureKind, StorageError};

/// Shows a titled message to the operator. Fire-and-forget.
pub trait Notifier: Send {
    fn notify(&self, message: &str, title: &str);
}

/// Headless notifier that writes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, title: &str) {
        tracing::warn!(target: "inventory.engine", title, message, "notice");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn validation(err: &ValidationError) -> Self {
        Self::new("Validation Error", err.to_string())
    }

    pub fn no_selection() -> Self {
        Self::new("Validation Error", "No product selected")
    }

    pub fn duplicate_entry() -> Self {
        Self::new(
            "Duplicate Entry",
            "Item Already Exist in a record (Can't be added, Try Editing)",
        )
    }

    /// Text for a store failure during `op`.
    pub fn store_failure(op: CommitOp, err: &StorageError) -> Self {
        match err.kind() {
            FailureKind::DuplicateKey => match op {
                CommitOp::Edit => Self::new(
                    "Duplicate Item",
                    "Item can't be updated. A product with this name already exists.",
                ),
                CommitOp::Add | CommitOp::Delete => {
                    Self::new("Duplicate Item", "Item can't be added. It already exists.")
                }
            },
            FailureKind::MissingRequiredField => Self::new(
                match op {
                    CommitOp::Edit => "Not Null Constraint",
                    CommitOp::Add | CommitOp::Delete => "Constraint Error",
                },
                "Required fields are missing. Please fill all mandatory fields.",
            ),
            FailureKind::ConstraintViolation => Self::new(
                "Constraint Error",
                "The entered values violate a catalog constraint. Please check the category and quantity.",
            ),
            FailureKind::Timeout => Self::new(
                "Timeout",
                "The catalog store did not respond in time. Please try again.",
            ),
            FailureKind::NotFound => {
                Self::new("Not Found", "The product no longer exists in the catalog.")
            }
            FailureKind::Other => Self::new("Error", format!("Database error: {err}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOp {
    Add,
    Edit,
    Delete,
}
