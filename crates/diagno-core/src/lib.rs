//! # diagno-core
//!
//! The request pipeline shared by every DIAGNO client.
//!
//! This crate provides:
//! - The three seams (`Transport`, `SessionStore`, `TokenSource`)
//! - `ApiClient`, which attaches the bearer token per request and maps
//!   statuses and bodies onto `DiagnoError`
//! - `HttpTransport`, the `reqwest` implementation of `Transport`
//! - `ClientConfig`, the TOML configuration
//!
//! ## Usage
//!
//! ```rust,ignore
//! use diagno_core::{ApiClient, HttpTransport, ClientConfig};
//! ```

pub mod client;
pub mod config;
pub mod http;
pub mod traits;

pub use client::ApiClient;
pub use config::{ClientConfig, FallbackPolicy};
pub use http::HttpTransport;
