//! Referential integrity on client deletion
//!
//! Deleting a client walks an explicit state machine:
//!
//! ```text
//! Requested -> DependentsChecked -> Confirmed -> Cascaded -> Committed
//!                                \-> Aborted -> Requested
//! ```
//!
//! The cascade is applied through `Store` operations before the client
//! itself is removed, so no listing ever refers to a missing client.

use estatebook_core_types::schema::EVENT_TRANSITION;

use crate::confirmation::{ConfirmationGate, ConfirmationPrompt};
use crate::errors::{EstateError, Result};
use crate::model::{CascadePolicy, Client, Listing, Name};
use crate::ops::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionState {
    Requested,
    DependentsChecked,
    Confirmed,
    Aborted,
    Cascaded,
    Committed,
}

impl DeletionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::DependentsChecked => "dependents_checked",
            Self::Confirmed => "confirmed",
            Self::Aborted => "aborted",
            Self::Cascaded => "cascaded",
            Self::Committed => "committed",
        }
    }

    fn can_transition_to(self, next: DeletionState) -> bool {
        use DeletionState::*;
        matches!(
            (self, next),
            (Requested, DependentsChecked)
                | (DependentsChecked, Confirmed)
                | (DependentsChecked, Aborted)
                | (Confirmed, Cascaded)
                | (Cascaded, Committed)
                | (Aborted, Requested)
        )
    }
}

/// Listings affected by deleting a client, computed without mutating anything
#[derive(Debug, Clone, PartialEq)]
pub struct Dependents {
    pub policy: CascadePolicy,
    pub listings: Vec<Listing>,
}

impl Dependents {
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn names(&self) -> Vec<Name> {
        self.listings.iter().map(|l| l.name().clone()).collect()
    }
}

/// Result of a committed deletion
#[derive(Debug, Clone, PartialEq)]
pub struct DeletionOutcome {
    pub client: Client,
    /// Listings the client was removed from as a buyer
    pub detached_listings: Vec<Name>,
    /// Listings deleted because the client was their seller
    pub deleted_listings: Vec<Name>,
}

/// A single client deletion in progress
#[derive(Debug, Clone)]
pub struct DeletionRequest {
    client: Client,
    state: DeletionState,
    dependents: Option<Dependents>,
    detached: Vec<Name>,
    deleted: Vec<Name>,
}

impl DeletionRequest {
    /// Start a deletion for a client that was resolved by exact match
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: DeletionState::Requested,
            dependents: None,
            detached: Vec::new(),
            deleted: Vec::new(),
        }
    }

    pub fn state(&self) -> DeletionState {
        self.state
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn dependents(&self) -> Option<&Dependents> {
        self.dependents.as_ref()
    }

    fn transition(&mut self, next: DeletionState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(EstateError::InvalidTransition {
                from: self.state.as_str(),
                to: next.as_str(),
            });
        }
        tracing::debug!(
            component = module_path!(),
            op = "delete_client",
            event = EVENT_TRANSITION,
            client_name = %self.client.name(),
            from = self.state.as_str(),
            to = next.as_str(),
        );
        self.state = next;
        Ok(())
    }

    /// Scan listings for references to the client
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the request is in `Requested`.
    pub fn check_dependents(&mut self, store: &Store) -> Result<&Dependents> {
        self.transition(DeletionState::DependentsChecked)?;

        let policy = self.client.role().cascade_policy();
        let name = self.client.name();
        let listings = match policy {
            CascadePolicy::DetachFromListings => store.listings_for_buyer(name),
            CascadePolicy::DeleteListings => store.listings_for_seller(name),
        };

        Ok(self.dependents.insert(Dependents {
            policy,
            listings: listings.into_iter().cloned().collect(),
        }))
    }

    /// Decide whether the deletion may proceed
    ///
    /// The gate is consulted only when there are dependents and
    /// `skip_confirmation` is false. Returns `false` when the user declined,
    /// leaving the request in `Aborted`.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless dependents have been checked.
    pub fn confirm(&mut self, skip_confirmation: bool, gate: &dyn ConfirmationGate) -> Result<bool> {
        let prompt = match &self.dependents {
            Some(deps) if !deps.is_empty() && !skip_confirmation => Some(ConfirmationPrompt {
                client_name: self.client.name().clone(),
                role: self.client.role(),
                policy: deps.policy,
                dependent_listings: deps.names(),
            }),
            _ => None,
        };

        let approved = prompt.map_or(true, |p| gate.ask_yes_no(&p));
        if approved {
            self.transition(DeletionState::Confirmed)?;
        } else {
            self.transition(DeletionState::Aborted)?;
        }
        Ok(approved)
    }

    /// Apply the role's cascade policy to every dependent listing
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless confirmed; store errors if a dependent
    /// listing changed since it was scanned.
    pub fn cascade(&mut self, store: &mut Store) -> Result<()> {
        self.transition(DeletionState::Cascaded)?;

        let Some(deps) = &self.dependents else {
            return Ok(());
        };
        let name = self.client.name();

        for listing in &deps.listings {
            match deps.policy {
                CascadePolicy::DetachFromListings => {
                    store.replace_listing(listing, listing.without_buyers([name]))?;
                    self.detached.push(listing.name().clone());
                }
                CascadePolicy::DeleteListings => {
                    store.delete_listing(listing)?;
                    self.deleted.push(listing.name().clone());
                }
            }
        }
        Ok(())
    }

    /// Remove the client and refresh listing views
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless cascaded
    /// - `InvariantViolation` if a listing still references the client
    pub fn commit(mut self, store: &mut Store) -> Result<DeletionOutcome> {
        self.transition(DeletionState::Committed)?;

        let name = self.client.name();
        if store.has_listings_for_seller(name) || store.has_listings_for_buyer(name) {
            return Err(EstateError::InvariantViolation {
                message: format!("{} is still referenced by a listing after cascade", name),
            });
        }

        store.delete_client(&self.client)?;
        store.reset_listing_view();

        Ok(DeletionOutcome {
            client: self.client,
            detached_listings: self.detached,
            deleted_listings: self.deleted,
        })
    }

    /// Return an aborted request to `Requested`
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless aborted.
    pub fn reset(&mut self) -> Result<()> {
        self.transition(DeletionState::Requested)?;
        self.dependents = None;
        Ok(())
    }
}

/// Delete `client` with its cascade, asking `gate` when dependents exist
///
/// # Errors
///
/// `Aborted` if the gate declined; the store is untouched in that case.
pub fn delete_client(
    store: &mut Store,
    client: &Client,
    skip_confirmation: bool,
    gate: &dyn ConfirmationGate,
) -> Result<DeletionOutcome> {
    let mut request = DeletionRequest::new(client.clone());
    request.check_dependents(store)?;

    if !request.confirm(skip_confirmation, gate)? {
        request.reset()?;
        return Err(EstateError::Aborted {
            name: client.name().to_string(),
        });
    }

    request.cascade(store)?;
    request.commit(store)
}

/// Delete a listing. Clients hold no listing references, so nothing cascades.
///
/// # Errors
///
/// `NotFound` if the listing is not in the store.
pub fn delete_listing(store: &mut Store, listing: &Listing) -> Result<()> {
    store.delete_listing(listing)?;
    store.reset_listing_view();
    Ok(())
}
