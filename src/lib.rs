pub mod admin;
pub mod app;
pub mod auth;
pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod extract;
pub mod feedback;
pub mod pain;
pub mod reminders;
pub mod state;
