//! Forwards GitHub webhook events to a Telegram group chat.
pub mod config;
pub mod github;
pub mod notification;
pub mod telegram;

#[cfg(test)]
mod tests;
