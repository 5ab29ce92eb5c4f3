use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Address, Area, Name, Named, Price, Region};

/// A property for sale.
///
/// Holds non-owning references to clients by name: exactly one seller and
/// any number of buyers. Whether those names resolve is enforced by the
/// store, not by the listing itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    name: Name,
    price: Price,
    area: Area,
    address: Address,
    region: Region,
    seller: Name,
    #[serde(default)]
    buyers: BTreeSet<Name>,
}

impl Listing {
    pub fn new(
        name: Name,
        price: Price,
        area: Area,
        address: Address,
        region: Region,
        seller: Name,
        buyers: BTreeSet<Name>,
    ) -> Self {
        Self {
            name,
            price,
            area,
            address,
            region,
            seller,
            buyers,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn area(&self) -> Area {
        self.area
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn seller(&self) -> &Name {
        &self.seller
    }

    pub fn buyers(&self) -> &BTreeSet<Name> {
        &self.buyers
    }

    pub fn has_buyer(&self, buyer: &Name) -> bool {
        self.buyers.contains(buyer)
    }

    pub fn is_sold_by(&self, seller: &Name) -> bool {
        &self.seller == seller
    }

    /// Copy of this listing with additional buyers
    pub fn with_buyers<'a>(&self, buyers: impl IntoIterator<Item = &'a Name>) -> Self {
        let mut updated = self.clone();
        updated.buyers.extend(buyers.into_iter().cloned());
        updated
    }

    /// Copy of this listing without the given buyers
    pub fn without_buyers<'a>(&self, buyers: impl IntoIterator<Item = &'a Name>) -> Self {
        let mut updated = self.clone();
        for buyer in buyers {
            updated.buyers.remove(buyer);
        }
        updated
    }

    /// Duplicate check: all descriptive fields match.
    ///
    /// Seller and buyers are relationships, not description, and are ignored.
    pub fn is_same_listing(&self, other: &Listing) -> bool {
        self.name == other.name
            && self.price == other.price
            && self.area == other.area
            && self.address == other.address
            && self.region == other.region
    }
}

impl Named for Listing {
    const ENTITY: &'static str = "listing";

    fn name(&self) -> &Name {
        &self.name
    }

    fn describe(&self) -> String {
        format!(
            "{}; Price: {}; Area: {}; Address: {}; Region: {}",
            self.name, self.price, self.area, self.address, self.region
        )
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buyers: Vec<&str> = self.buyers.iter().map(Name::as_str).collect();
        write!(
            f,
            "{}; Price: {}; Area: {}; Address: {}; Region: {}; Seller: {}; Buyers: [{}]",
            self.name,
            self.price,
            self.area,
            self.address,
            self.region,
            self.seller,
            buyers.join(", ")
        )
    }
}
