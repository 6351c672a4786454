//! Best-effort event notification sinks.

mod discord;

pub use discord::DiscordNotifier;
