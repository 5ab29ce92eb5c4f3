use crate::model::{Client, Name};

use super::Store;

/// The client list the user is currently looking at.
///
/// Command targets must be members of this set. It is passed explicitly
/// into command execution; the store never keeps filter state of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleClients {
    names: Vec<Name>,
}

impl VisibleClients {
    /// Every client in the store, in store order
    pub fn all(store: &Store) -> Self {
        Self::filtered(store, |_| true)
    }

    /// Clients matching `predicate`, in store order
    pub fn filtered(store: &Store, predicate: impl Fn(&Client) -> bool) -> Self {
        Self {
            names: store
                .clients()
                .iter()
                .filter(|&c| predicate(c))
                .map(|c| c.name().clone())
                .collect(),
        }
    }

    pub fn from_names(names: impl IntoIterator<Item = Name>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }

    pub fn names(&self) -> &[Name] {
        &self.names
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.names.contains(name)
    }

    /// Clients in the store that are visible, in visible order
    ///
    /// Names that no longer exist in the store are skipped.
    pub fn clients<'a>(&self, store: &'a Store) -> Vec<&'a Client> {
        self.names
            .iter()
            .filter_map(|name| store.find_client(name))
            .collect()
    }
}
