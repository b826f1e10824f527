//! Input buffers for the add-contact and split-bill forms.

use crate::domain::{DomainError, DomainResult, Payer};

/// A single-line text buffer with a cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    pub value: String,
    pub cursor: usize,
}

impl TextField {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    pub(crate) fn byte_index(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddField {
    #[default]
    Name,
    Avatar,
}

/// Name and avatar inputs of the add-contact form.
#[derive(Debug, Clone, PartialEq)]
pub struct AddContactForm {
    pub name: TextField,
    pub avatar: TextField,
    pub focus: AddField,
    default_avatar: String,
}

impl AddContactForm {
    pub fn new(default_avatar: &str) -> Self {
        Self {
            name: TextField::default(),
            avatar: TextField::with_value(default_avatar),
            focus: AddField::Name,
            default_avatar: default_avatar.to_string(),
        }
    }

    /// Back to an empty name and the default avatar.
    pub fn reset(&mut self) {
        *self = Self::new(&self.default_avatar);
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            AddField::Name => &mut self.name,
            AddField::Avatar => &mut self.avatar,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            AddField::Name => AddField::Avatar,
            AddField::Avatar => AddField::Name,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitField {
    #[default]
    Bill,
    OwnExpense,
    Payer,
}

/// Inputs of the split-bill form.
///
/// Only digits and a single decimal point are accepted in the amount
/// fields, and the own expense can never be edited above the bill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitBillForm {
    pub bill: TextField,
    pub own_expense: TextField,
    pub payer: Payer,
    pub focus: SplitField,
}

/// Amounts read from a [`SplitBillForm`], ready for the calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitBill {
    pub bill: f64,
    pub own_expense: f64,
    pub payer: Payer,
}

fn parse_amount(text: &str) -> Option<f64> {
    if text.is_empty() {
        None
    } else {
        text.parse::<f64>().ok()
    }
}

fn accepts(c: char, current: &str) -> bool {
    c.is_ascii_digit() || (c == '.' && !current.contains('.'))
}

impl SplitBillForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn bill_amount(&self) -> Option<f64> {
        parse_amount(&self.bill.value)
    }

    pub fn own_expense_amount(&self) -> Option<f64> {
        parse_amount(&self.own_expense.value)
    }

    /// The friend's part of the bill, shown read-only.
    pub fn friend_expense(&self) -> Option<f64> {
        let bill = self.bill_amount()?;
        Some(bill - self.own_expense_amount().unwrap_or(0.0))
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            SplitField::Bill => SplitField::OwnExpense,
            SplitField::OwnExpense => SplitField::Payer,
            SplitField::Payer => SplitField::Bill,
        };
    }

    pub fn toggle_payer(&mut self) {
        self.payer = self.payer.toggled();
    }

    pub fn insert(&mut self, c: char) {
        match self.focus {
            SplitField::Bill => {
                if accepts(c, &self.bill.value) {
                    self.bill.insert(c);
                }
            }
            SplitField::OwnExpense => {
                if !accepts(c, &self.own_expense.value) {
                    return;
                }
                let previous = self.own_expense.clone();
                self.own_expense.insert(c);
                self.revert_if_over_bill(previous);
            }
            SplitField::Payer => {
                if c == ' ' {
                    self.toggle_payer();
                }
            }
        }
    }

    /// Edits the focused amount with `edit`, clamping the own expense.
    pub fn edit(&mut self, edit: impl FnOnce(&mut TextField)) {
        match self.focus {
            SplitField::Bill => edit(&mut self.bill),
            SplitField::OwnExpense => {
                let previous = self.own_expense.clone();
                edit(&mut self.own_expense);
                self.revert_if_over_bill(previous);
            }
            SplitField::Payer => {}
        }
    }

    fn revert_if_over_bill(&mut self, previous: TextField) {
        let over = match (self.own_expense_amount(), self.bill_amount()) {
            (Some(own), Some(bill)) => own > bill,
            (Some(_), None) => true,
            _ => false,
        };
        if over {
            self.own_expense = previous;
        }
    }

    /// Reads the amounts, failing if either is missing or not a number.
    pub fn parse(&self) -> DomainResult<SplitBill> {
        let bill = self
            .bill_amount()
            .ok_or_else(|| DomainError::validation("bill"))?;
        let own_expense = self
            .own_expense_amount()
            .ok_or_else(|| DomainError::validation("own expense"))?;
        Ok(SplitBill {
            bill,
            own_expense,
            payer: self.payer,
        })
    }
}
