mod appointment;
mod client;
mod fields;
mod listing;
mod name;
mod role;

pub use appointment::Appointment;
pub use client::Client;
pub use fields::{Address, Area, Email, Phone, Price, Region, Tag};
pub use listing::Listing;
pub use name::Name;
pub use role::{CascadePolicy, Role};

/// Anything addressable by a free-text name from a command.
pub trait Named {
    /// Entity label used in user-facing messages ("client", "listing")
    const ENTITY: &'static str;

    fn name(&self) -> &Name;

    /// Text that tells two same-named entities apart
    fn describe(&self) -> String {
        self.name().to_string()
    }
}
