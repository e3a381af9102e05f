pub mod events;
pub mod notifier;
pub mod registry;

pub use events::Event;
pub use notifier::{ClearHandle, Notifier, PromiseHandle};
pub use registry::Receivers;
