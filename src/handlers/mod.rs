pub mod dispatch;
pub mod interaction;
pub mod messages;

pub use dispatch::{Dispatched, PushDispatcher};
pub use interaction::InteractionController;
pub use messages::{InteractionSource, Message};
