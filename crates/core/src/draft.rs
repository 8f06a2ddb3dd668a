//! The form-in-progress for the product being added or edited.
//!
//! Each field carries its own activation state instead of a separate flag:
//! a field is activated once it holds a value, whether the operator typed it
//! or it was copied from the store.

use std::fmt;

use crate::validation::{self, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Category,
    Quantity,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Category, Field::Quantity];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Product name",
            Self::Category => "Category",
            Self::Quantity => "Quantity",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldState {
    /// Never set since the draft was last cleared. Validation is suppressed.
    #[default]
    Untouched,
    /// Typed by the operator.
    Edited(String),
    /// Copied from a stored product (selection or auto-populate).
    Populated(String),
}

impl FieldState {
    pub fn text(&self) -> &str {
        match self {
            Self::Untouched => "",
            Self::Edited(text) | Self::Populated(text) => text,
        }
    }

    pub fn is_activated(&self) -> bool {
        !matches!(self, Self::Untouched)
    }

    /// True when the operator typed something other than whitespace.
    pub fn has_user_text(&self) -> bool {
        matches!(self, Self::Edited(text) if !text.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    name: FieldState,
    category: FieldState,
    quantity: FieldState,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, field: Field) -> &FieldState {
        match field {
            Field::Name => &self.name,
            Field::Category => &self.category,
            Field::Quantity => &self.quantity,
        }
    }

    fn state_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Name => &mut self.name,
            Field::Category => &mut self.category,
            Field::Quantity => &mut self.quantity,
        }
    }

    pub fn text(&self, field: Field) -> &str {
        self.state(field).text()
    }

    pub fn is_activated(&self, field: Field) -> bool {
        self.state(field).is_activated()
    }

    /// Records operator input for `field`, activating it.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        *self.state_mut(field) = FieldState::Edited(value.into());
    }

    /// Records a value copied from the store for `field`, activating it.
    pub fn populate(&mut self, field: Field, value: impl Into<String>) {
        *self.state_mut(field) = FieldState::Populated(value.into());
    }

    /// Empties every field and returns them to `Untouched`.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.text(*f).is_empty())
    }

    /// A copy with every field activated, so untouched fields are judged on
    /// their (empty) content. Used right before a commit.
    pub fn activated(&self) -> Self {
        let mut draft = self.clone();
        for field in Field::ALL {
            if !draft.is_activated(field) {
                draft.edit(field, "");
            }
        }
        draft
    }

    pub fn parsed_quantity(&self) -> Result<u32, ValidationError> {
        validation::parse_quantity(self.text(Field::Quantity))
    }
}
