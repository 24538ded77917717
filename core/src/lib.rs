//! Core components for signing Cerberus API requests.
//!
//! This crate provides the foundational types and traits shared by the
//! cerberus-sign crates. It carries no signing protocol itself.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for environment access and HTTP sending
//! - **HttpSend**: The request executor abstraction that signing transports decorate
//! - **Error**: The error type shared by every executor and signer
//!
//! ## Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use cerberus_sign_core::{Context, HttpSend, OsEnv, Result};
//! use async_trait::async_trait;
//!
//! // An executor that answers every request with 204.
//! #[derive(Debug)]
//! struct NoContent;
//!
//! #[async_trait]
//! impl HttpSend for NoContent {
//!     async fn http_send(&self, _req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
//!         Ok(http::Response::builder()
//!             .status(http::StatusCode::NO_CONTENT)
//!             .body(Bytes::new())?)
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_env(OsEnv).with_http_send(NoContent);
//!
//! let req = http::Request::get("https://example.com").body(Bytes::new())?;
//! let resp = ctx.http_send(req).await?;
//! assert_eq!(resp.status(), http::StatusCode::NO_CONTENT);
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
mod env;
pub use env::{Env, NoopEnv, OsEnv, StaticEnv};
mod error;
pub use error::{Error, ErrorKind, Result};
mod http_send;
pub use http_send::{HttpSend, NoopHttpSend};
