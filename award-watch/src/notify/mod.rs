//! Telegram Bot API client.
//!
//! Delivers digests as Markdown messages to a single chat.

mod client;
mod error;

pub use client::{TelegramClient, TelegramConfig};
pub use error::NotifyError;
