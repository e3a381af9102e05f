pub mod notifications;
pub mod record;

pub use notifications::{NotificationStore, NotificationView, StoreError, StoreSnapshot};
pub use record::NotificationRecord;
