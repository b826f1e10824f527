use evenup::application::{Action, AppError, AppState, Change, Controller, Phase, StateObserver};
use evenup::domain::{Contact, ContactId, ContactRegistry, DomainError, Payer};
use evenup::infrastructure::SequentialIdGenerator;
use std::cell::RefCell;
use std::rc::Rc;

fn contact(id: u64, balance: f64) -> Contact {
    Contact {
        id: ContactId::from(id),
        name: format!("Friend {}", id),
        avatar_ref: format!("https://i.pravatar.cc/48?u={}", id),
        balance,
    }
}

fn controller() -> Controller {
    let registry = ContactRegistry::from_contacts(vec![contact(1, -7.0), contact(2, 20.0)]).unwrap();
    Controller::new(
        AppState::new(registry),
        Box::new(SequentialIdGenerator::starting_at(100)),
    )
}

fn balance(controller: &Controller, id: u64) -> f64 {
    controller
        .state()
        .registry
        .get(&ContactId::from(id))
        .unwrap()
        .balance
}

struct PhaseLog(Rc<RefCell<Vec<Phase>>>);

impl StateObserver for PhaseLog {
    fn on_transition(&mut self, state: &AppState, _changes: &[Change]) {
        self.0.borrow_mut().push(state.phase());
    }
}

#[test]
fn select_and_settle_returns_to_idle() {
    let mut controller = controller();
    let phases = Rc::new(RefCell::new(Vec::new()));
    controller.subscribe(Box::new(PhaseLog(phases.clone())));

    controller.dispatch(Action::SelectContact(ContactId::from(1))).unwrap();
    controller
        .dispatch(Action::SubmitSettlement {
            bill: 50.0,
            own_expense: 20.0,
            payer: Payer::User,
        })
        .unwrap();

    assert_eq!(balance(&controller, 1), 23.0);
    assert_eq!(balance(&controller, 2), 20.0);
    assert!(controller.state().selection.is_empty());
    assert_eq!(controller.phase(), Phase::Idle);
    assert_eq!(*phases.borrow(), vec![Phase::ContactSelected, Phase::Idle]);
}

#[test]
fn invalid_contact_leaves_registry_unchanged() {
    let mut controller = controller();
    controller.dispatch(Action::OpenAddForm).unwrap();
    let before = controller.state().clone();

    let result = controller.dispatch(Action::SubmitContact {
        name: String::new(),
        avatar: "url".to_string(),
    });

    assert_eq!(
        result,
        Err(AppError::Domain(DomainError::Validation { field: "name" }))
    );
    assert_eq!(controller.state(), &before);
}

#[test]
fn unknown_id_update_is_not_found() {
    let mut registry = ContactRegistry::from_contacts(vec![contact(1, -7.0), contact(2, 20.0)]).unwrap();
    let before = registry.clone();

    let result = registry.update_balance(&ContactId::from(99), 10.0);

    assert_eq!(result, Err(DomainError::NotFound(ContactId::from(99))));
    assert_eq!(registry, before);
}

#[test]
fn full_session_walkthrough() {
    let mut controller = controller();

    controller.dispatch(Action::OpenAddForm).unwrap();
    assert_eq!(controller.phase(), Phase::AddingContact);
    controller
        .dispatch(Action::SubmitContact {
            name: "Dana".to_string(),
            avatar: "https://i.pravatar.cc/48".to_string(),
        })
        .unwrap();
    assert_eq!(controller.phase(), Phase::Idle);
    assert_eq!(controller.state().registry.len(), 3);
    assert_eq!(balance(&controller, 100), 0.0);

    controller.dispatch(Action::SelectContact(ContactId::from(100))).unwrap();
    controller.dispatch(Action::SelectContact(ContactId::from(2))).unwrap();
    assert_eq!(controller.state().selection.selected(), Some(&ContactId::from(2)));

    controller
        .dispatch(Action::SubmitSettlement {
            bill: 30.0,
            own_expense: 10.0,
            payer: Payer::Friend,
        })
        .unwrap();
    assert_eq!(balance(&controller, 2), 10.0);
    assert_eq!(balance(&controller, 100), 0.0);

    controller.dispatch(Action::SelectContact(ContactId::from(1))).unwrap();
    controller.dispatch(Action::OpenAddForm).unwrap();
    assert_eq!(controller.phase(), Phase::AddingContact);
    assert!(controller.state().selection.is_empty());
    controller.dispatch(Action::Cancel).unwrap();
    assert_eq!(controller.phase(), Phase::Idle);
}
