pub mod store;
pub mod view;

pub use store::{Checkpoint, Store, StoreEvent, StoreObserver};
pub use view::VisibleClients;
