//! Built-in delivery channel implementations.

pub mod email;
pub mod telegram;

pub use email::EmailProvider;
pub use telegram::TelegramProvider;
