//! The controller owns the current [`AppState`] and notifies observers.

use super::errors::AppResult;
use super::state::{transition, Action, AppState, Change, Phase};
use crate::domain::IdGenerator;

/// Receives every successful transition.
pub trait StateObserver {
    fn on_transition(&mut self, state: &AppState, changes: &[Change]);
}

/// Handle returned by [`Controller::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

pub struct Controller {
    state: AppState,
    ids: Box<dyn IdGenerator>,
    observers: Vec<(SubscriptionId, Box<dyn StateObserver>)>,
    next_subscription: usize,
}

impl Controller {
    pub fn new(state: AppState, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            state,
            ids,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn subscribe(&mut self, observer: Box<dyn StateObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Runs one action to completion.
    ///
    /// On success the new state replaces the old one and every observer sees
    /// the changes. On failure nothing changes and no observer is called.
    pub fn dispatch(&mut self, action: Action) -> AppResult<Vec<Change>> {
        let name = action.name();
        match transition(&self.state, action, self.ids.as_mut()) {
            Ok(next) => {
                tracing::debug!(action = name, from = %self.state.phase(), to = %next.state.phase(), changes = next.changes.len(), "applied action");
                self.state = next.state;
                for (_, observer) in self.observers.iter_mut() {
                    observer.on_transition(&self.state, &next.changes);
                }
                Ok(next.changes)
            }
            Err(err) => {
                tracing::warn!(action = name, phase = %self.state.phase(), error = %err, "rejected action");
                Err(err)
            }
        }
    }
}

/// Logs every change through `tracing`.
pub struct TracingObserver;

impl StateObserver for TracingObserver {
    fn on_transition(&mut self, state: &AppState, changes: &[Change]) {
        for change in changes {
            match change {
                Change::ContactAdded(contact) => {
                    tracing::info!(id = %contact.id, name = %contact.name, "contact added");
                }
                Change::BalanceUpdated { id, delta, balance } => {
                    tracing::info!(%id, delta, balance, "balance updated");
                }
                Change::SelectionChanged { previous, current } => {
                    tracing::debug!(?previous, ?current, "selection changed");
                }
                Change::AddFormOpened | Change::AddFormClosed => {
                    tracing::debug!(phase = %state.phase(), "add form toggled");
                }
            }
        }
    }
}
