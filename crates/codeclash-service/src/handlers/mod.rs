//! HTTP request handlers.

pub mod auth;
pub mod contests;
pub mod discussion;
pub mod health;
pub mod users;
