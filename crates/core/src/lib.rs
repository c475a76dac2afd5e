//! StyleHub Core - Shared types library.
//!
//! This crate provides common types used across all StyleHub client components:
//! - `client` - API client, session store, and route guard
//! - `cli` - Terminal frontend for browsing, cart, checkout, and seller tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no session
//! state. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
