use std::fmt;
use std::sync::Arc;

use crate::errors::{EstateError, Result};
use crate::model::{Client, Listing, Name, Role};

/// Change notification emitted after every successful store mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    ClientAdded(Name),
    ClientUpdated(Name),
    ClientRemoved(Name),
    ListingAdded(Name),
    ListingUpdated(Name),
    ListingRemoved(Name),
    /// Listing filters should be cleared so removed listings disappear from view
    ListingViewReset,
    /// Store contents were rolled back to a checkpoint
    Restored,
}

/// Side channel for live views. Never consulted for correctness.
pub trait StoreObserver: Send + Sync {
    fn on_event(&self, event: &StoreEvent);
}

#[derive(Clone, Default)]
struct Observers(Vec<Arc<dyn StoreObserver>>);

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Observers({})", self.0.len())
    }
}

/// Saved store contents, used to undo a partially applied command
#[derive(Debug, Clone)]
pub struct Checkpoint {
    clients: Vec<Client>,
    listings: Vec<Listing>,
}

impl Checkpoint {
    /// Whether `store` still holds exactly the saved contents
    pub fn is_current(&self, store: &Store) -> bool {
        self.clients == store.clients && self.listings == store.listings
    }
}

/// In-memory store for clients and listings
///
/// The single mutation path for both collections. Each operation checks the
/// invariants it can check locally (uniqueness, reference validity on
/// insert) and leaves cross-collection consequences of deletion to
/// `integrity`. Insertion order is preserved.
///
/// Not thread-safe - designed for a single actor issuing one command at a time.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub(crate) clients: Vec<Client>,
    pub(crate) listings: Vec<Listing>,
    observers: Observers,
}

impl Store {
    /// Create a new empty Store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for change notifications
    pub fn subscribe(&mut self, observer: Arc<dyn StoreObserver>) {
        self.observers.0.push(observer);
    }

    fn notify(&self, event: StoreEvent) {
        for observer in &self.observers.0 {
            observer.on_event(&event);
        }
    }

    // ============================================================
    // Reads
    // ============================================================

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Exact, case-insensitive lookup. `None` lets callers fall back to resolution.
    pub fn find_client_by_name(&self, name: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.name().matches(name))
    }

    pub fn find_client(&self, name: &Name) -> Option<&Client> {
        self.clients.iter().find(|c| c.name() == name)
    }

    /// First listing (insertion order) with the given name, case-insensitive
    pub fn find_listing_by_name(&self, name: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.name().matches(name))
    }

    pub fn has_client(&self, client: &Client) -> bool {
        self.find_client(client.name()).is_some()
    }

    /// Whether a listing with the same descriptive fields exists
    pub fn has_listing(&self, listing: &Listing) -> bool {
        self.listings.iter().any(|l| l.is_same_listing(listing))
    }

    pub fn listings_for_seller(&self, seller: &Name) -> Vec<&Listing> {
        self.listings
            .iter()
            .filter(|l| l.is_sold_by(seller))
            .collect()
    }

    pub fn listings_for_buyer(&self, buyer: &Name) -> Vec<&Listing> {
        self.listings.iter().filter(|l| l.has_buyer(buyer)).collect()
    }

    pub fn has_listings_for_seller(&self, seller: &Name) -> bool {
        self.listings.iter().any(|l| l.is_sold_by(seller))
    }

    pub fn has_listings_for_buyer(&self, buyer: &Name) -> bool {
        self.listings.iter().any(|l| l.has_buyer(buyer))
    }

    // ============================================================
    // Client mutations
    // ============================================================

    /// Insert a client
    ///
    /// # Errors
    ///
    /// Returns `DuplicateClient` if a client with the same name (ignoring case) exists.
    pub fn add_client(&mut self, client: Client) -> Result<()> {
        if self.has_client(&client) {
            return Err(EstateError::DuplicateClient {
                name: client.name().to_string(),
            });
        }

        let name = client.name().clone();
        self.clients.push(client);
        self.notify(StoreEvent::ClientAdded(name));
        Ok(())
    }

    /// Replace `target` with `edited`
    ///
    /// Listings reference clients by name, so the name and role must stay
    /// the same.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `target` is not in the store
    /// - `InvalidField` if the name changed
    /// - `RoleMismatch` if the role changed
    pub fn replace_client(&mut self, target: &Client, edited: Client) -> Result<()> {
        if !target.is_same_client(&edited) {
            return Err(EstateError::InvalidField {
                field: "name",
                reason: format!(
                    "Client name cannot change from {} to {}",
                    target.name(),
                    edited.name()
                ),
            });
        }
        if target.role() != edited.role() {
            return Err(EstateError::RoleMismatch {
                name: edited.name().to_string(),
                expected: target.role(),
                actual: edited.role(),
            });
        }

        let slot = self
            .clients
            .iter_mut()
            .find(|c| c.is_same_client(target))
            .ok_or_else(|| EstateError::NotFound {
                entity: "client",
                name: target.name().to_string(),
            })?;

        let name = edited.name().clone();
        *slot = edited;
        self.notify(StoreEvent::ClientUpdated(name));
        Ok(())
    }

    /// Remove a client unconditionally
    ///
    /// Listings that still reference the client are not touched; callers go
    /// through `integrity::delete_client` to keep the collections consistent.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the client is not in the store.
    pub fn delete_client(&mut self, client: &Client) -> Result<()> {
        let index = self
            .clients
            .iter()
            .position(|c| c.is_same_client(client))
            .ok_or_else(|| EstateError::NotFound {
                entity: "client",
                name: client.name().to_string(),
            })?;

        let removed = self.clients.remove(index);
        self.notify(StoreEvent::ClientRemoved(removed.name().clone()));
        Ok(())
    }

    // ============================================================
    // Listing mutations
    // ============================================================

    /// Check that a listing's seller is an existing Seller and every buyer an existing Buyer
    ///
    /// # Errors
    ///
    /// Returns `DanglingReference` naming the first reference that fails.
    pub fn validate_listing_references(&self, listing: &Listing) -> Result<()> {
        self.require_role(listing, listing.seller(), Role::Seller)?;
        for buyer in listing.buyers() {
            self.require_role(listing, buyer, Role::Buyer)?;
        }
        Ok(())
    }

    fn require_role(&self, listing: &Listing, name: &Name, expected: Role) -> Result<()> {
        match self.find_client(name) {
            Some(client) if client.role() == expected => Ok(()),
            _ => Err(EstateError::DanglingReference {
                listing: listing.name().to_string(),
                client: name.to_string(),
                expected,
            }),
        }
    }

    /// Insert a listing
    ///
    /// # Errors
    ///
    /// - `DuplicateListing` if a listing with the same descriptive fields exists
    /// - `DanglingReference` if the seller or a buyer does not resolve
    pub fn add_listing(&mut self, listing: Listing) -> Result<()> {
        if self.has_listing(&listing) {
            return Err(EstateError::DuplicateListing {
                name: listing.name().to_string(),
            });
        }
        self.validate_listing_references(&listing)?;

        let name = listing.name().clone();
        self.listings.push(listing);
        self.notify(StoreEvent::ListingAdded(name));
        Ok(())
    }

    /// Replace `target` with `edited`
    ///
    /// # Errors
    ///
    /// - `NotFound` if `target` is not in the store
    /// - `DuplicateListing` if `edited` duplicates a different listing
    /// - `DanglingReference` if `edited` references a missing client
    pub fn replace_listing(&mut self, target: &Listing, edited: Listing) -> Result<()> {
        let index = self
            .listings
            .iter()
            .position(|l| l == target)
            .ok_or_else(|| EstateError::NotFound {
                entity: "listing",
                name: target.name().to_string(),
            })?;

        let duplicates_other = self
            .listings
            .iter()
            .enumerate()
            .any(|(i, l)| i != index && l.is_same_listing(&edited));
        if duplicates_other {
            return Err(EstateError::DuplicateListing {
                name: edited.name().to_string(),
            });
        }
        self.validate_listing_references(&edited)?;

        let name = edited.name().clone();
        self.listings[index] = edited;
        self.notify(StoreEvent::ListingUpdated(name));
        Ok(())
    }

    /// Remove a listing unconditionally
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the listing is not in the store.
    pub fn delete_listing(&mut self, listing: &Listing) -> Result<()> {
        let index = self
            .listings
            .iter()
            .position(|l| l == listing)
            .ok_or_else(|| EstateError::NotFound {
                entity: "listing",
                name: listing.name().to_string(),
            })?;

        let removed = self.listings.remove(index);
        self.notify(StoreEvent::ListingRemoved(removed.name().clone()));
        Ok(())
    }

    /// Tell listing views to drop their filters
    pub fn reset_listing_view(&self) {
        self.notify(StoreEvent::ListingViewReset);
    }

    // ============================================================
    // Checkpoints
    // ============================================================

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            clients: self.clients.clone(),
            listings: self.listings.clone(),
        }
    }

    /// Restore both collections to a checkpoint. Observers are kept.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.clients = checkpoint.clients;
        self.listings = checkpoint.listings;
        self.notify(StoreEvent::Restored);
    }
}
