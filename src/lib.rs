//! # CounselHub
//!
//! Client side of an online counseling platform: clients browse counselors,
//! book and pay for sessions, and meet their counselor in a video call.
//!
//! The crate is shared by every front end. Its default build (feature
//! `native`) also carries the reqwest API client, configuration and the
//! `counselhub` / `counselhub-web` binaries. The browser app in
//! `counselhub-ui` depends on it with `default-features = false`.
//!
//! ## Modules
//!
//! - [`models`]: JSON payloads exchanged with the API
//! - [`session`]: Stored login session and its storage backends
//! - [`routes`]: Client-side route table and role guards
//! - [`validation`]: Form checks run before any request
//! - [`endpoints`]: REST endpoint URLs
//! - [`client`]: Async API client (native)
//! - [`web`]: Static host for the built SPA (native)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use counselhub::client::ApiClient;
//! use counselhub::config::Config;
//! use counselhub::session::Session;
//! use counselhub::validation::validate_login;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = ApiClient::new(&config.api)?;
//!
//!     let request = validate_login("amy@example.com", "secret")?;
//!     let session = Session::from_auth(client.login(&request).await?, None);
//!
//!     for appt in client.appointments_for(&session).await? {
//!         println!("{} {}", appt.display_date(), appt.counselor_name("Unknown"));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod call;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod session;
pub mod validation;

#[cfg(feature = "native")]
pub mod client;
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod web;

// Re-export top-level types for convenience
pub use error::{ApiError, ApiErrorBody, ApiResult};

pub use models::{
    Appointment, AuthResponse, CheckoutRequest, Counselor, LoginRequest, NewAppointment,
    PartyRef, RegisterRequest, Role,
};

pub use routes::{authorize, Access, Guard, Route};

pub use session::{MemoryStore, Session, SessionError, SessionStore};

#[cfg(feature = "native")]
pub use client::ApiClient;

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
