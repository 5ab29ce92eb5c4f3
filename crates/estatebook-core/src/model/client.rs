use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Appointment, Email, Name, Named, Phone, Role, Tag};

/// A buyer or seller profile, identified by name.
///
/// Fields are private: contact details are immutable once constructed and
/// the role can never change. Appointment changes produce a new `Client`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    name: Name,
    phone: Phone,
    email: Email,
    #[serde(default)]
    tags: BTreeSet<Tag>,
    #[serde(default)]
    appointment: Appointment,
    role: Role,
}

impl Client {
    /// Create a client with no appointment
    pub fn new(role: Role, name: Name, phone: Phone, email: Email, tags: BTreeSet<Tag>) -> Self {
        Self {
            name,
            phone,
            email,
            tags,
            appointment: Appointment::Empty,
            role,
        }
    }

    pub fn buyer(name: Name, phone: Phone, email: Email, tags: BTreeSet<Tag>) -> Self {
        Self::new(Role::Buyer, name, phone, email, tags)
    }

    pub fn seller(name: Name, phone: Phone, email: Email, tags: BTreeSet<Tag>) -> Self {
        Self::new(Role::Seller, name, phone, email, tags)
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn appointment(&self) -> &Appointment {
        &self.appointment
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_buyer(&self) -> bool {
        self.role == Role::Buyer
    }

    pub fn is_seller(&self) -> bool {
        self.role == Role::Seller
    }

    /// Copy of this client with a different appointment
    pub fn with_appointment(&self, appointment: Appointment) -> Self {
        Self {
            appointment,
            ..self.clone()
        }
    }

    /// Same identity (name), regardless of other attributes
    pub fn is_same_client(&self, other: &Client) -> bool {
        self.name == other.name
    }
}

impl Named for Client {
    const ENTITY: &'static str = "client";

    fn name(&self) -> &Name {
        &self.name
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = self.tags.iter().map(Tag::as_str).collect();
        write!(
            f,
            "{}; Phone: {}; Email: {}; Tags: [{}]",
            self.name,
            self.phone,
            self.email,
            tags.join(", ")
        )
    }
}
