//! Codeclash HTTP API Service.
//!
//! This crate provides the HTTP API for the codeclash backend, including:
//!
//! - Signup and login with password hashing and session tokens
//! - Contest creation, listing, and solution submission
//! - Discussion posts and comments, with cascading deletion
//! - Per-user submission history and activity feeds
//!
//! # Consistency model
//!
//! User documents carry denormalized mirrors of the user's submissions,
//! posts, and comments. The [`submission`], [`discussion`], and [`activity`]
//! modules own the write ordering and read-time fallbacks that keep these
//! mirrors usable without cross-collection transactions.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers stay async for routing consistency
#![allow(clippy::module_name_repetitions)]

pub mod activity;
pub mod auth;
pub mod config;
pub mod discussion;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod submission;

pub use config::ServiceConfig;
pub use error::{ApiError, OpError};
pub use routes::create_router;
pub use state::AppState;
