//! Subcommand implementations

pub mod account;
pub mod checkin;
pub mod history;
pub mod tenant;
