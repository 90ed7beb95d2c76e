// Declare submodules
pub mod notification_dto;
pub mod notification_handlers;
pub mod notification_models;
pub mod notification_source;
pub mod notification_store;
pub mod poller;
pub mod session;
pub mod unread_counter;

#[cfg(test)]
pub mod test_support;

// Re-export public items
pub use notification_source::NotificationSource;
pub use notification_store::NotificationStore;
pub use poller::PollerHandle;
pub use session::NotificationSession;
pub use unread_counter::UnreadCounter;
