pub mod config;
pub mod known_ids;
pub mod reminders;
pub mod run;
