pub mod account;
pub mod chat;
pub mod collection;
pub mod notifications;
pub mod preferences;
pub mod steps;
mod utils;
