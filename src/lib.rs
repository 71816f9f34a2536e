//! # primecare-odoo
//!
//! An employee gateway for the Odoo JSON-RPC API: a client for Odoo's
//! `authenticate`/`call_kw` endpoints, the HR operations and at-work policy
//! built on top of it, and a thin axum service exposing them over HTTP.
//!
//! Every public business operation authenticates afresh before doing its
//! work; no session is cached across operations and no call is retried.
//!
//! ## Diagnostics
//!
//! Errors are `miette` diagnostics with codes and help text. To capture
//! async span traces alongside them, set up tracing with `ErrorLayer`:
//!
//! ```ignore
//! use tracing_subscriber::prelude::*;
//! use tracing_error::ErrorLayer;
//!
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::fmt::layer())
//!     .with(ErrorLayer::default())
//!     .init();
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
extern crate tracing;

pub mod api;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod hr;
pub mod rpc;
pub mod status;
pub mod utils;

pub use client::Client;
pub use config::Connection;
pub use endpoints::OdooEndpoint;
pub use error::{Error, Result};
pub use rpc::{Domain, OdooRequest};
pub use status::WorkStatus;

// Re-export SpanTrace for users who want to access it
pub use tracing_error::SpanTrace;

// Re-export the record types for convenience
pub use hr::attendance::Entry as AttendanceEntry;
pub use hr::employee::NewEmployee;
