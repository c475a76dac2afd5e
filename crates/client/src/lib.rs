//! StyleHub Client - typed client for the StyleHub marketplace API.
//!
//! This crate is the core of the StyleHub client applications. It owns the
//! three pieces with real invariants:
//!
//! - [`session`] - the session store: who is using this client right now,
//!   persisted durably so identity survives restarts
//! - [`guard`] - the route guard: a pure mapping from the current role to the
//!   views the principal may render
//! - [`api`] - the HTTP client: the single egress point to the remote API,
//!   injecting the session's bearer token into every request
//!
//! Everything else (rendering, argument parsing, dialogs) lives in the
//! frontends that consume this crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use stylehub_client::api::ApiClient;
//! use stylehub_client::config::ClientConfig;
//! use stylehub_client::session::{SessionStore, storage::FileStorage};
//!
//! let config = ClientConfig::from_env()?;
//! let storage = FileStorage::open(&config.session_file);
//! let session = SessionStore::open(storage);
//! let client = ApiClient::new(&config, session.clone());
//!
//! let products = client.products().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod session;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use guard::{RouteDecision, ViewAccess};
pub use session::{Identity, SessionStore};
