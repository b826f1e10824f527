//! Balance bookkeeping services.
//!
//! The contact registry, the single-selection state and the settlement
//! calculator. None of them perform I/O; the only external dependency is an
//! [`IdGenerator`] supplied by the caller when a contact is created.

use super::errors::{DomainError, DomainResult};
use super::models::{Contact, ContactId, Payer};

/// Source of fresh contact identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> ContactId;
}

/// Ordered, append-only collection of contacts.
///
/// # Examples
///
/// ```
/// use evenup::domain::{ContactRegistry, ContactId, IdGenerator};
///
/// struct Fixed;
/// impl IdGenerator for Fixed {
///     fn next_id(&mut self) -> ContactId { ContactId::from("a") }
/// }
///
/// let mut registry = ContactRegistry::default();
/// let contact = registry.add_contact("Clark", "https://i.pravatar.cc/48", &mut Fixed).unwrap();
/// assert_eq!(contact.balance, 0.0);
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactRegistry {
    contacts: Vec<Contact>,
}

impl ContactRegistry {
    /// Builds a registry from existing records.
    ///
    /// Each record must have a non-empty id, name and avatar, and ids may
    /// not repeat.
    pub fn from_contacts(contacts: Vec<Contact>) -> DomainResult<Self> {
        let mut registry = Self::default();
        for contact in contacts {
            if contact.id.as_str().is_empty() {
                return Err(DomainError::validation("id"));
            }
            Self::check_fields(&contact.name, &contact.avatar_ref)?;
            if registry.contains(&contact.id) {
                return Err(DomainError::DuplicateId(contact.id));
            }
            registry.contacts.push(contact);
        }
        Ok(registry)
    }

    /// Appends a new contact with a zero balance.
    ///
    /// Fails without touching the registry if `name` or `avatar_ref` is
    /// empty, or if the generator hands back an id that is already in use.
    pub fn add_contact(
        &mut self,
        name: &str,
        avatar_ref: &str,
        ids: &mut dyn IdGenerator,
    ) -> DomainResult<Contact> {
        Self::check_fields(name, avatar_ref)?;

        let id = ids.next_id();
        if self.contains(&id) {
            return Err(DomainError::DuplicateId(id));
        }

        let contact = Contact {
            id,
            name: name.to_string(),
            avatar_ref: avatar_ref.to_string(),
            balance: 0.0,
        };
        self.contacts.push(contact.clone());
        Ok(contact)
    }

    fn check_fields(name: &str, avatar_ref: &str) -> DomainResult<()> {
        if name.is_empty() {
            return Err(DomainError::validation("name"));
        }
        if avatar_ref.is_empty() {
            return Err(DomainError::validation("avatar"));
        }
        Ok(())
    }

    /// Adds `delta` to the balance of the contact with `id`.
    pub fn update_balance(&mut self, id: &ContactId, delta: f64) -> DomainResult<()> {
        let contact = self
            .contacts
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| DomainError::NotFound(id.clone()))?;
        contact.balance += delta;
        Ok(())
    }

    /// Replaces the avatar of an existing contact.
    pub fn set_avatar(&mut self, id: &ContactId, avatar_ref: String) -> DomainResult<()> {
        let contact = self
            .contacts
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| DomainError::NotFound(id.clone()))?;
        contact.avatar_ref = avatar_ref;
        Ok(())
    }

    pub fn get(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.id == id)
    }

    pub fn contains(&self, id: &ContactId) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: &ContactId) -> Option<usize> {
        self.contacts.iter().position(|c| &c.id == id)
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

/// Zero-or-one selected contact.
///
/// Only [`toggle`](Selection::toggle) can set a selection; everything else
/// may only [`clear`](Selection::clear) it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(Option<ContactId>);

impl Selection {
    pub fn toggle(&self, id: &ContactId) -> Selection {
        match &self.0 {
            Some(current) if current == id => Selection(None),
            _ => Selection(Some(id.clone())),
        }
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn selected(&self) -> Option<&ContactId> {
        self.0.as_ref()
    }

    pub fn is_selected(&self, id: &ContactId) -> bool {
        self.0.as_ref() == Some(id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

/// Computes the balance change produced by splitting a bill.
pub struct SettlementCalculator;

impl SettlementCalculator {
    /// Returns the delta to apply to the selected friend's balance.
    ///
    /// When the user paid, the friend owes their share (`bill - own_expense`).
    /// When the friend paid, the user owes their own share, so the delta is
    /// `-own_expense`.
    ///
    /// Requires `0 <= own_expense <= bill`; anything else (including NaN) is
    /// rejected with [`DomainError::InvalidAmount`].
    ///
    /// ```
    /// use evenup::domain::{Payer, SettlementCalculator};
    ///
    /// assert_eq!(SettlementCalculator::compute_delta(50.0, 20.0, Payer::User), Ok(30.0));
    /// assert_eq!(SettlementCalculator::compute_delta(50.0, 20.0, Payer::Friend), Ok(-20.0));
    /// ```
    pub fn compute_delta(bill: f64, own_expense: f64, payer: Payer) -> DomainResult<f64> {
        let in_range = bill >= 0.0 && own_expense >= 0.0 && own_expense <= bill;
        if !in_range || !bill.is_finite() {
            return Err(DomainError::InvalidAmount { bill, own_expense });
        }

        let other_expense = bill - own_expense;
        Ok(match payer {
            Payer::User => other_expense,
            Payer::Friend => -own_expense,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Counter(u64);

    impl IdGenerator for Counter {
        fn next_id(&mut self) -> ContactId {
            self.0 += 1;
            ContactId::from(self.0)
        }
    }

    struct Stuck;

    impl IdGenerator for Stuck {
        fn next_id(&mut self) -> ContactId {
            ContactId::from("same")
        }
    }

    fn contact(id: u64, balance: f64) -> Contact {
        Contact {
            id: ContactId::from(id),
            name: format!("Friend {}", id),
            avatar_ref: format!("https://i.pravatar.cc/48?u={}", id),
            balance,
        }
    }

    fn two_friends() -> ContactRegistry {
        ContactRegistry::from_contacts(vec![contact(1, -7.0), contact(2, 20.0)]).unwrap()
    }

    #[test]
    fn test_add_contact_appends_with_zero_balance() {
        let mut registry = two_friends();
        let added = registry.add_contact("Dana", "https://i.pravatar.cc/48", &mut Counter(10)).unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(added.id, ContactId::from(11));
        assert_eq!(added.balance, 0.0);
        assert_eq!(registry.contacts()[2], added);
    }

    #[test]
    fn test_add_contact_empty_name_is_rejected() {
        let mut registry = two_friends();
        let before = registry.clone();

        let result = registry.add_contact("", "url", &mut Counter(0));

        assert_eq!(result, Err(DomainError::Validation { field: "name" }));
        assert_eq!(registry, before);
    }

    #[test]
    fn test_add_contact_empty_avatar_is_rejected() {
        let mut registry = two_friends();
        let result = registry.add_contact("Dana", "", &mut Counter(0));

        assert_eq!(result, Err(DomainError::Validation { field: "avatar" }));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_add_contact_colliding_id_is_rejected() {
        let mut registry = ContactRegistry::default();
        registry.add_contact("A", "url", &mut Stuck).unwrap();

        let result = registry.add_contact("B", "url", &mut Stuck);

        assert_eq!(result, Err(DomainError::DuplicateId(ContactId::from("same"))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_from_contacts_rejects_duplicates() {
        let result = ContactRegistry::from_contacts(vec![contact(1, 0.0), contact(1, 5.0)]);
        assert_eq!(result, Err(DomainError::DuplicateId(ContactId::from(1))));
    }

    #[test]
    fn test_from_contacts_rejects_blank_fields() {
        let mut nameless = contact(1, 0.0);
        nameless.name.clear();
        assert_eq!(
            ContactRegistry::from_contacts(vec![nameless]),
            Err(DomainError::Validation { field: "name" })
        );

        let mut faceless = contact(2, 0.0);
        faceless.avatar_ref.clear();
        assert_eq!(
            ContactRegistry::from_contacts(vec![faceless]),
            Err(DomainError::Validation { field: "avatar" })
        );

        let mut anonymous = contact(3, 0.0);
        anonymous.id = ContactId::from("");
        assert_eq!(
            ContactRegistry::from_contacts(vec![anonymous]),
            Err(DomainError::Validation { field: "id" })
        );
    }

    #[test]
    fn test_update_balance_touches_only_target() {
        let mut registry = two_friends();
        registry.update_balance(&ContactId::from(1), 30.0).unwrap();

        assert_eq!(registry.get(&ContactId::from(1)).unwrap().balance, 23.0);
        assert_eq!(registry.get(&ContactId::from(2)).unwrap().balance, 20.0);
    }

    #[test]
    fn test_update_balance_unknown_id() {
        let mut registry = two_friends();
        let before = registry.clone();

        let result = registry.update_balance(&ContactId::from(99), 10.0);

        assert_eq!(result, Err(DomainError::NotFound(ContactId::from(99))));
        assert_eq!(registry, before);
    }

    #[test]
    fn test_selection_toggle() {
        let empty = Selection::default();
        let one = ContactId::from(1);
        let two = ContactId::from(2);

        let selected = empty.toggle(&one);
        assert!(selected.is_selected(&one));

        let switched = selected.toggle(&two);
        assert!(switched.is_selected(&two));
        assert!(!switched.is_selected(&one));

        assert!(switched.toggle(&two).is_empty());
    }

    #[test]
    fn test_selection_clear() {
        let mut selection = Selection::default().toggle(&ContactId::from(1));
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_compute_delta_rejects_out_of_range() {
        assert!(SettlementCalculator::compute_delta(10.0, 11.0, Payer::User).is_err());
        assert!(SettlementCalculator::compute_delta(-1.0, 0.0, Payer::User).is_err());
        assert!(SettlementCalculator::compute_delta(10.0, -1.0, Payer::Friend).is_err());
        assert!(SettlementCalculator::compute_delta(f64::NAN, 0.0, Payer::User).is_err());
        assert!(SettlementCalculator::compute_delta(f64::INFINITY, 1.0, Payer::User).is_err());
    }

    #[test]
    fn test_compute_delta_zero_bill() {
        assert_eq!(SettlementCalculator::compute_delta(0.0, 0.0, Payer::User), Ok(0.0));
        assert_eq!(SettlementCalculator::compute_delta(0.0, 0.0, Payer::Friend), Ok(-0.0));
    }

    proptest! {
        #[test]
        fn prop_delta_matches_payer_rule(bill in 0u32..100_000, share in 0u32..=100) {
            let bill = bill as f64;
            let own = (bill * share as f64 / 100.0).floor();

            let user_paid = SettlementCalculator::compute_delta(bill, own, Payer::User).unwrap();
            let friend_paid = SettlementCalculator::compute_delta(bill, own, Payer::Friend).unwrap();

            prop_assert_eq!(user_paid, bill - own);
            prop_assert_eq!(friend_paid, -own);
        }

        #[test]
        fn prop_toggle_twice_restores(id in 0u64..5, already_selected in any::<bool>()) {
            let id = ContactId::from(id);
            let start = if already_selected {
                Selection::default().toggle(&id)
            } else {
                Selection::default()
            };
            prop_assert_eq!(start.toggle(&id).toggle(&id), start);
        }

        #[test]
        fn prop_toggle_other_twice_clears(current in 0u64..5, offset in 1u64..5) {
            let start = Selection::default().toggle(&ContactId::from(current));
            let other = ContactId::from(current + offset);
            prop_assert!(start.toggle(&other).toggle(&other).is_empty());
        }

        #[test]
        fn prop_add_contact_grows_by_one(name in "[a-zA-Z]{1,12}", existing in 0usize..8) {
            let mut ids = Counter(0);
            let mut registry = ContactRegistry::default();
            for i in 0..existing {
                registry.add_contact(&format!("c{}", i), "url", &mut ids).unwrap();
            }

            let added = registry.add_contact(&name, "url", &mut ids).unwrap();

            prop_assert_eq!(registry.len(), existing + 1);
            prop_assert_eq!(added.balance, 0.0);
        }

        #[test]
        fn prop_update_balance_is_additive(d1 in -10_000i32..10_000, d2 in -10_000i32..10_000) {
            let id = ContactId::from(1);
            let mut stepwise = two_friends();
            stepwise.update_balance(&id, d1 as f64).unwrap();
            stepwise.update_balance(&id, d2 as f64).unwrap();

            let mut once = two_friends();
            once.update_balance(&id, (d1 + d2) as f64).unwrap();

            prop_assert_eq!(stepwise, once);
        }
    }
}
