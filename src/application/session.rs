//! Terminal session state: the controller plus everything the screen needs
//! that is not part of the bookkeeping (cursor, focus, form buffers, status).

use super::controller::Controller;
use super::errors::AppError;
use super::forms::{AddContactForm, SplitBillForm};
use super::state::{Action, AppState, Change, Phase};
use crate::domain::{Contact, ContactId};
use crate::infrastructure::InfraError;

/// Which overlay, if any, is in front of the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Contact list, add form and split form
    Normal,
    /// Key reference popup
    Help,
    /// Prompt for the balance report filename
    ExportReport,
}

/// Which panel receives typed keys in [`AppMode::Normal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    AddForm,
    SplitForm,
}

pub const DEFAULT_REPORT_FILENAME: &str = "balances.csv";

/// Everything the terminal UI reads and the input handler writes.
///
/// # Examples
///
/// ```
/// use evenup::application::{App, AppState, Focus};
/// use evenup::infrastructure::SequentialIdGenerator;
///
/// let app = App::new(AppState::default(), Box::new(SequentialIdGenerator::default()), "https://i.pravatar.cc/48", "$");
/// assert_eq!(app.focus, Focus::List);
/// assert_eq!(app.cursor, 0);
/// ```
pub struct App {
    pub controller: Controller,
    pub mode: AppMode,
    pub focus: Focus,
    /// Highlighted row of the contact list
    pub cursor: usize,
    pub add_form: AddContactForm,
    pub split_form: SplitBillForm,
    /// Input buffer for the report filename prompt
    pub filename_input: String,
    pub status_message: Option<String>,
    pub help_scroll: usize,
    /// Symbol shown after amounts
    pub currency: String,
}

impl App {
    /// Creates a session in list focus with the cursor on the first contact.
    ///
    /// `default_avatar` prefills the image field of the add form.
    pub fn new(
        state: AppState,
        ids: Box<dyn crate::domain::IdGenerator>,
        default_avatar: &str,
        currency: &str,
    ) -> Self {
        Self {
            controller: Controller::new(state, ids),
            mode: AppMode::Normal,
            focus: Focus::List,
            cursor: 0,
            add_form: AddContactForm::new(default_avatar),
            split_form: SplitBillForm::default(),
            filename_input: String::new(),
            status_message: None,
            help_scroll: 0,
            currency: currency.to_string(),
        }
    }

    /// Current controller state.
    pub fn state(&self) -> &AppState {
        self.controller.state()
    }

    pub fn contacts(&self) -> &[Contact] {
        self.state().registry.contacts()
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        self.state().selected_contact()
    }

    /// Contact under the list cursor.
    pub fn cursor_contact(&self) -> Option<&Contact> {
        self.contacts().get(self.cursor)
    }

    /// Moves the list cursor up, stopping at the first contact.
    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the list cursor down, stopping at the last contact.
    pub fn move_cursor_down(&mut self) {
        if self.cursor + 1 < self.contacts().len() {
            self.cursor += 1;
        }
    }

    /// The "Add Friend" / "Close" button.
    pub fn toggle_add_form(&mut self) {
        self.apply(Action::OpenAddForm);
    }

    /// Closes the add form without adding anything.
    pub fn cancel_add_form(&mut self) {
        self.apply(Action::Cancel);
    }

    /// Adds a contact from the form fields, trimmed of surrounding whitespace.
    ///
    /// An empty field leaves the form open and puts the error on the status line.
    pub fn submit_add_form(&mut self) {
        let action = Action::SubmitContact {
            name: self.add_form.name.value.trim().to_string(),
            avatar: self.add_form.avatar.value.trim().to_string(),
        };
        self.apply(action);
    }

    /// The "Select" / "Close" button of the highlighted contact.
    pub fn toggle_cursor_selection(&mut self) {
        if let Some(id) = self.cursor_contact().map(|c| c.id.clone()) {
            self.select(id);
        }
    }

    /// Toggles the selection of `id`, closing the add form if it is open.
    pub fn select(&mut self, id: ContactId) {
        self.apply(Action::SelectContact(id));
    }

    /// Splits the bill with the selected contact.
    ///
    /// Empty or unparsable amounts are reported on the status line and
    /// never reach the controller.
    pub fn submit_split_form(&mut self) {
        match self.split_form.parse() {
            Ok(split) => self.apply(Action::SubmitSettlement {
                bill: split.bill,
                own_expense: split.own_expense,
                payer: split.payer,
            }),
            Err(err) => self.report_error(&err.into()),
        }
    }

    /// Moves focus from the split form back to the list, keeping the selection.
    pub fn leave_split_form(&mut self) {
        if self.focus == Focus::SplitForm {
            self.focus = Focus::List;
        }
    }

    /// Moves focus between the list and the split form of the selected contact.
    pub fn cycle_focus(&mut self) {
        self.focus = match (self.focus, self.controller.phase()) {
            (Focus::List, Phase::ContactSelected) => Focus::SplitForm,
            (Focus::SplitForm, _) => Focus::List,
            (focus, _) => focus,
        };
    }

    /// Opens the report filename prompt, prefilled with [`DEFAULT_REPORT_FILENAME`].
    pub fn start_export(&mut self) {
        self.mode = AppMode::ExportReport;
        self.filename_input = DEFAULT_REPORT_FILENAME.to_string();
        self.status_message = None;
    }

    /// Closes the report filename prompt without exporting.
    pub fn cancel_export(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
    }

    /// Filename to export the balance report to.
    pub fn get_export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            DEFAULT_REPORT_FILENAME.to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Shows the outcome of an export and closes the prompt.
    pub fn set_export_result(&mut self, result: Result<String, InfraError>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Exported balances to {}", filename));
            }
            Err(error) => {
                tracing::warn!(%error, "balance report export failed");
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }
        self.mode = AppMode::Normal;
        self.filename_input.clear();
    }

    /// Opens the key reference at the top.
    pub fn open_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    fn apply(&mut self, action: Action) {
        match self.controller.dispatch(action) {
            Ok(changes) => self.absorb(&changes),
            Err(err) => self.report_error(&err),
        }
    }

    fn report_error(&mut self, err: &AppError) {
        self.status_message = Some(err.to_string());
    }

    /// Updates the screen-side state from the changes of a transition.
    fn absorb(&mut self, changes: &[Change]) {
        self.status_message = None;
        for change in changes {
            match change {
                Change::AddFormOpened => {
                    self.add_form.reset();
                    self.focus = Focus::AddForm;
                }
                Change::AddFormClosed => {
                    self.add_form.reset();
                    self.focus = Focus::List;
                }
                Change::ContactAdded(contact) => {
                    self.cursor = self.contacts().len().saturating_sub(1);
                    self.status_message = Some(format!("Added {}", contact.name));
                }
                Change::SelectionChanged { current, .. } => {
                    self.split_form.reset();
                    if let Some(id) = current {
                        if let Some(position) = self.state().registry.position(id) {
                            self.cursor = position;
                        }
                        self.focus = Focus::SplitForm;
                    } else if self.focus == Focus::SplitForm {
                        self.focus = Focus::List;
                    }
                }
                Change::BalanceUpdated { id, .. } => {
                    if let Some(contact) = self.state().registry.get(id) {
                        self.status_message =
                            Some(contact.standing().describe(&contact.name, &self.currency));
                    }
                }
            }
        }
    }
}
