//! Application state and the transitions between its phases.
//!
//! [`AppState`] is a plain value. [`transition`] never mutates its input: it
//! works on a copy and hands back the new state together with the list of
//! [`Change`]s it made, or an error and no new state at all.

use super::errors::{AppError, AppResult};
use crate::domain::{
    Contact, ContactId, ContactRegistry, IdGenerator, Payer, Selection, SettlementCalculator,
};
use std::fmt;

/// The phase of the controller state machine.
///
/// Derived from the state rather than stored, so it can never disagree with
/// the selection or the add-form flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AddingContact,
    ContactSelected,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::AddingContact => write!(f, "adding a contact"),
            Phase::ContactSelected => write!(f, "a contact is selected"),
        }
    }
}

/// A user gesture the controller understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Toggles the add-contact form. Opening it clears the selection.
    OpenAddForm,
    /// Closes the add-contact form without adding anything.
    Cancel,
    /// Adds a contact. The stored avatar is `"{avatar}?={id}"`.
    SubmitContact { name: String, avatar: String },
    /// Toggles the selection of a contact.
    SelectContact(ContactId),
    /// Splits a bill with the selected contact.
    SubmitSettlement {
        bill: f64,
        own_expense: f64,
        payer: Payer,
    },
}

impl Action {
    /// Short label used in logs and in `NotApplicable` errors.
    pub fn name(&self) -> &'static str {
        match self {
            Action::OpenAddForm => "open add form",
            Action::Cancel => "cancel",
            Action::SubmitContact { .. } => "submit contact",
            Action::SelectContact(_) => "select contact",
            Action::SubmitSettlement { .. } => "submit settlement",
        }
    }
}

/// One observable effect of a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    AddFormOpened,
    AddFormClosed,
    /// The contact as stored, with its final avatar.
    ContactAdded(Contact),
    SelectionChanged {
        previous: Option<ContactId>,
        current: Option<ContactId>,
    },
    /// `balance` is the value after `delta` was added.
    BalanceUpdated {
        id: ContactId,
        delta: f64,
        balance: f64,
    },
}

/// Result of a successful transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: AppState,
    pub changes: Vec<Change>,
}

/// Everything the controller knows about the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub registry: ContactRegistry,
    pub selection: Selection,
    pub add_form_open: bool,
}

impl AppState {
    /// Starts in [`Phase::Idle`] with the given contacts.
    pub fn new(registry: ContactRegistry) -> Self {
        Self {
            registry,
            ..Default::default()
        }
    }

    /// An open add form wins over a selection, which the transitions never
    /// leave set together anyway.
    pub fn phase(&self) -> Phase {
        if self.add_form_open {
            Phase::AddingContact
        } else if self.selection.is_empty() {
            Phase::Idle
        } else {
            Phase::ContactSelected
        }
    }

    /// The selected contact, if any.
    pub fn selected_contact(&self) -> Option<&Contact> {
        self.selection.selected().and_then(|id| self.registry.get(id))
    }

    fn clear_selection(&mut self, changes: &mut Vec<Change>) {
        if let Some(previous) = self.selection.selected().cloned() {
            self.selection.clear();
            changes.push(Change::SelectionChanged {
                previous: Some(previous),
                current: None,
            });
        }
    }

    fn close_add_form(&mut self, changes: &mut Vec<Change>) {
        if self.add_form_open {
            self.add_form_open = false;
            changes.push(Change::AddFormClosed);
        }
    }
}

/// Applies `action` to `state`.
///
/// On success the returned [`Transition`] holds the new state and the
/// changes in the order they happened. On failure `state` is the only
/// state there is; nothing was changed.
///
/// # Examples
///
/// ```
/// use evenup::application::{transition, Action, AppState, Phase};
/// use evenup::infrastructure::SequentialIdGenerator;
///
/// let mut ids = SequentialIdGenerator::default();
/// let opened = transition(&AppState::default(), Action::OpenAddForm, &mut ids).unwrap();
/// assert_eq!(opened.state.phase(), Phase::AddingContact);
/// ```
pub fn transition(
    state: &AppState,
    action: Action,
    ids: &mut dyn IdGenerator,
) -> AppResult<Transition> {
    let phase = state.phase();
    let not_applicable = AppError::NotApplicable {
        action: action.name(),
        phase,
    };
    let mut next = state.clone();
    let mut changes = Vec::new();

    match action {
        Action::OpenAddForm => {
            if next.add_form_open {
                next.close_add_form(&mut changes);
            } else {
                next.clear_selection(&mut changes);
                next.add_form_open = true;
                changes.push(Change::AddFormOpened);
            }
        }
        Action::Cancel => {
            if phase != Phase::AddingContact {
                return Err(not_applicable);
            }
            next.close_add_form(&mut changes);
        }
        Action::SubmitContact { name, avatar } => {
            if phase != Phase::AddingContact {
                return Err(not_applicable);
            }
            let contact = next.registry.add_contact(&name, &avatar, ids)?;
            let avatar_ref = format!("{}?={}", avatar, contact.id);
            next.registry.set_avatar(&contact.id, avatar_ref.clone())?;
            changes.push(Change::ContactAdded(Contact {
                avatar_ref,
                ..contact
            }));
            next.close_add_form(&mut changes);
        }
        Action::SelectContact(id) => {
            if !next.registry.contains(&id) {
                return Err(crate::domain::DomainError::NotFound(id).into());
            }
            next.close_add_form(&mut changes);
            let previous = next.selection.selected().cloned();
            next.selection = next.selection.toggle(&id);
            changes.push(Change::SelectionChanged {
                previous,
                current: next.selection.selected().cloned(),
            });
        }
        Action::SubmitSettlement {
            bill,
            own_expense,
            payer,
        } => {
            let id = match (phase, next.selection.selected()) {
                (Phase::ContactSelected, Some(id)) => id.clone(),
                _ => return Err(not_applicable),
            };
            let delta = SettlementCalculator::compute_delta(bill, own_expense, payer)?;
            next.registry.update_balance(&id, delta)?;
            let balance = next.registry.get(&id).map(|c| c.balance).unwrap_or_default();
            changes.push(Change::BalanceUpdated { id, delta, balance });
            next.clear_selection(&mut changes);
        }
    }

    Ok(Transition {
        state: next,
        changes,
    })
}
