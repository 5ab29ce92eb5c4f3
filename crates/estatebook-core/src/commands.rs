//! Command inventory
//!
//! Field values arrive already validated as typed model values. Target
//! names are raw user text and go through name resolution.

use crate::model::{Address, Appointment, Area, Client, Name, Price, Region};

/// One user-issued operation, executed atomically by `executor::execute`
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a client who must have the Buyer role
    AddBuyer(Client),

    /// Add a client who must have the Seller role
    AddSeller(Client),

    /// Add a listing; `seller` and `buyers` must name visible clients
    AddListing {
        name: Name,
        price: Price,
        area: Area,
        address: Address,
        region: Region,
        seller: String,
        buyers: Vec<String>,
    },

    /// Delete a visible client and cascade to its listings
    DeleteClient {
        name: String,
        skip_confirmation: bool,
    },

    DeleteListing { name: String },

    AddBuyersToListing { listing: String, buyers: Vec<String> },

    RemoveBuyersFromListing { listing: String, buyers: Vec<String> },

    ScheduleAppointment {
        name: String,
        appointment: Appointment,
    },

    /// Reset a client's appointment to empty
    DeleteAppointment { name: String },
}

impl Command {
    /// Operation name used in logs
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::AddBuyer(_) => "add_buyer",
            Command::AddSeller(_) => "add_seller",
            Command::AddListing { .. } => "add_listing",
            Command::DeleteClient { .. } => "delete_client",
            Command::DeleteListing { .. } => "delete_listing",
            Command::AddBuyersToListing { .. } => "add_buyers_to_listing",
            Command::RemoveBuyersFromListing { .. } => "remove_buyers_from_listing",
            Command::ScheduleAppointment { .. } => "schedule_appointment",
            Command::DeleteAppointment { .. } => "delete_appointment",
        }
    }

    /// Whether the command can remove records
    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            Command::DeleteClient { .. } | Command::DeleteListing { .. }
        )
    }
}
