pub mod binder;
mod controller;
mod observers;
mod session;

pub use controller::{SelectionController, SelectionHandle};
pub use observers::{SelectionChange, SelectionObservers, SubscriptionId};
pub use session::{EditorContext, Session};
