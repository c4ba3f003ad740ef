//! Domain layer: listener slots and client notifications.

pub mod notification;
pub mod slot;

pub use notification::WalletNotification;
pub use slot::{ListenerHandle, ListenerSlot};
