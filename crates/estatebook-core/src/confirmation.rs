//! Confirmation gate for destructive commands with dependents.
//!
//! The engine calls the gate synchronously and waits for a yes/no answer.
//! Rendering the question is the caller's business.

use crate::model::{CascadePolicy, Name, Role};

/// What the user is being asked to approve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub client_name: Name,
    pub role: Role,
    pub policy: CascadePolicy,
    /// Listings affected by the cascade, in store order
    pub dependent_listings: Vec<Name>,
}

impl ConfirmationPrompt {
    /// Default wording for a yes/no dialog
    pub fn message(&self) -> String {
        let listings = self
            .dependent_listings
            .iter()
            .map(Name::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        match self.policy {
            CascadePolicy::DetachFromListings => format!(
                "{} is a buyer in these listings: {}. Deleting will remove them from the listings. Continue?",
                self.client_name, listings
            ),
            CascadePolicy::DeleteListings => format!(
                "{} is the seller of these listings: {}. Deleting will also delete the listings. Continue?",
                self.client_name, listings
            ),
        }
    }
}

/// Blocking yes/no decision point
pub trait ConfirmationGate: Send + Sync {
    /// `true` to proceed, `false` to abort
    fn ask_yes_no(&self, prompt: &ConfirmationPrompt) -> bool;
}

/// Always answers yes
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl ConfirmationGate for AutoConfirm {
    fn ask_yes_no(&self, _: &ConfirmationPrompt) -> bool {
        true
    }
}

/// Always answers no
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoDecline;

impl ConfirmationGate for AutoDecline {
    fn ask_yes_no(&self, _: &ConfirmationPrompt) -> bool {
        false
    }
}

/// Gate backed by a closure
pub struct FnGate<F>(pub F);

impl<F> ConfirmationGate for FnGate<F>
where
    F: Fn(&ConfirmationPrompt) -> bool + Send + Sync,
{
    fn ask_yes_no(&self, prompt: &ConfirmationPrompt) -> bool {
        (self.0)(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(role: Role) -> ConfirmationPrompt {
        ConfirmationPrompt {
            client_name: Name::new("Alice").unwrap(),
            role,
            policy: role.cascade_policy(),
            dependent_listings: vec![Name::new("Condo").unwrap(), Name::new("Villa").unwrap()],
        }
    }

    #[test]
    fn test_scripted_gates() {
        let p = prompt(Role::Buyer);
        assert!(AutoConfirm.ask_yes_no(&p));
        assert!(!AutoDecline.ask_yes_no(&p));
    }

    #[test]
    fn test_fn_gate_sees_prompt() {
        let gate = FnGate(|p: &ConfirmationPrompt| p.dependent_listings.len() < 2);
        assert!(!gate.ask_yes_no(&prompt(Role::Seller)));
    }

    #[test]
    fn test_message_depends_on_policy() {
        assert!(prompt(Role::Buyer).message().contains("remove them"));
        let seller = prompt(Role::Seller).message();
        assert!(seller.contains("also delete"));
        assert!(seller.contains("Condo, Villa"));
    }
}
