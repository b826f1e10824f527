use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Opaque identifier of a contact.
///
/// The registry only compares ids for equality; the format is up to the
/// [`IdGenerator`](super::IdGenerator) that produced it. Deserializes from
/// either a JSON string or a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "RawId")]
pub struct ContactId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for ContactId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(id) => ContactId(id),
            RawId::Number(id) => ContactId::from(id),
        }
    }
}

impl Serialize for ContactId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl ContactId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContactId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for ContactId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// A person tracked with a running balance relative to the user.
///
/// Negative balance: the user owes this contact. Positive balance: the
/// contact owes the user. Zero: settled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    #[serde(alias = "image")]
    pub avatar_ref: String,
    pub balance: f64,
}

impl Contact {
    pub fn standing(&self) -> Standing {
        Standing::from_balance(self.balance)
    }
}

/// How a balance reads from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Standing {
    /// The user owes the contact this (positive) amount.
    YouOwe(f64),
    Even,
    /// The contact owes the user this (positive) amount.
    OwesYou(f64),
}

impl Standing {
    pub fn from_balance(balance: f64) -> Self {
        if balance < 0.0 {
            Standing::YouOwe(balance.abs())
        } else if balance > 0.0 {
            Standing::OwesYou(balance)
        } else {
            Standing::Even
        }
    }

    /// Renders the standing as a sentence about `name`.
    ///
    /// ```
    /// use evenup::domain::Standing;
    ///
    /// assert_eq!(Standing::from_balance(-7.0).describe("Clark", "$"), "You owe Clark 7 $");
    /// assert_eq!(Standing::from_balance(0.0).describe("Anthony", "$"), "You and Anthony are even");
    /// assert_eq!(Standing::from_balance(20.0).describe("Sarah", "$"), "Sarah owes you 20 $");
    /// ```
    pub fn describe(&self, name: &str, currency: &str) -> String {
        match self {
            Standing::YouOwe(amount) => format!("You owe {} {} {}", name, amount, currency),
            Standing::Even => format!("You and {} are even", name),
            Standing::OwesYou(amount) => format!("{} owes you {} {}", name, amount, currency),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Standing::YouOwe(_) => "you_owe",
            Standing::Even => "even",
            Standing::OwesYou(_) => "owes_you",
        }
    }
}

/// Which party physically paid the bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Payer {
    /// The user paid; the friend owes their share.
    #[default]
    User,
    /// The selected friend paid; the user owes their own share.
    Friend,
}

impl Payer {
    pub fn toggled(self) -> Self {
        match self {
            Payer::User => Payer::Friend,
            Payer::Friend => Payer::User,
        }
    }
}
