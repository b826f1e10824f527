//! Initial contacts for a session.

use super::errors::InfraError;
use crate::domain::{Contact, ContactId, ContactRegistry};
use std::fs;

fn friend(id: u64, name: &str, balance: f64) -> Contact {
    Contact {
        id: ContactId::from(id),
        name: name.to_string(),
        avatar_ref: format!("https://i.pravatar.cc/48?u={}", id),
        balance,
    }
}

/// The three friends every session starts with unless a seed file is given.
pub fn default_contacts() -> Vec<Contact> {
    vec![
        friend(118836, "Clark", -7.0),
        friend(933372, "Sarah", 20.0),
        friend(499476, "Anthony", 0.0),
    ]
}

pub struct SeedRepository;

impl SeedRepository {
    /// Reads a JSON array of contacts.
    ///
    /// Accepts `avatar_ref` or `image` for the avatar and string or numeric
    /// ids. The file is only read; nothing is written back.
    pub fn load_contacts(filename: &str) -> Result<Vec<Contact>, InfraError> {
        let content = fs::read_to_string(filename).map_err(|e| InfraError::io(filename, e))?;
        let contacts = serde_json::from_str::<Vec<Contact>>(&content)?;
        tracing::info!(filename, count = contacts.len(), "loaded seed contacts");
        Ok(contacts)
    }

    /// Reads a seed file and checks it the way new contacts are checked.
    pub fn load_registry(filename: &str) -> Result<ContactRegistry, InfraError> {
        let contacts = Self::load_contacts(filename)?;
        Ok(ContactRegistry::from_contacts(contacts)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_contacts() {
        let contacts = default_contacts();
        let balances: Vec<f64> = contacts.iter().map(|c| c.balance).collect();
        assert_eq!(balances, vec![-7.0, 20.0, 0.0]);
        assert_eq!(contacts[0].avatar_ref, "https://i.pravatar.cc/48?u=118836");
    }

    #[test]
    fn test_load_contacts_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":1,"name":"Clark","image":"https://i.pravatar.cc/48?u=1","balance":-7}},
               {{"id":"b","name":"Sarah","avatar_ref":"x","balance":20.5}}]"#
        )
        .unwrap();

        let contacts = SeedRepository::load_contacts(file.path().to_str().unwrap()).unwrap();

        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].id, ContactId::from(1));
        assert_eq!(contacts[1].id, ContactId::from("b"));
        assert_eq!(contacts[1].balance, 20.5);
    }

    #[test]
    fn test_load_contacts_missing_file() {
        let result = SeedRepository::load_contacts("/nonexistent/evenup/seed.json");
        assert!(matches!(result, Err(InfraError::Io { .. })));
    }

    #[test]
    fn test_load_registry_rejects_empty_name() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id":1,"name":"","image":"x","balance":0}}]"#).unwrap();

        let result = SeedRepository::load_registry(file.path().to_str().unwrap());
        assert!(matches!(
            result,
            Err(InfraError::Seed(DomainError::Validation { field: "name" }))
        ));
    }

    #[test]
    fn test_load_registry_rejects_repeated_id() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":1,"name":"A","image":"x","balance":0}},{{"id":"1","name":"B","image":"y","balance":0}}]"#
        )
        .unwrap();

        let result = SeedRepository::load_registry(file.path().to_str().unwrap());
        assert!(matches!(result, Err(InfraError::Seed(DomainError::DuplicateId(_)))));
    }

    #[test]
    fn test_load_contacts_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = SeedRepository::load_contacts(file.path().to_str().unwrap());
        assert!(matches!(result, Err(InfraError::Json(_))));
    }
}
