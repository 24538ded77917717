//! HMAC-SHA256 request signing for the Cerberus API.
//!
//! [`SigningTransport`] wraps any [`HttpSend`](cerberus_sign_core::HttpSend)
//! and adds `X-API-Key`, `X-Timestamp` and `X-Signature` to every request
//! before delegating it.
//!
//! ## Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use cerberus_sign_core::{Context, OsEnv, Result};
//! use cerberus_sign_hmac::{Config, SigningTransport};
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let config = Config::new().from_env(&ctx);
//!
//! // No executor given, the default reqwest based one is used.
//! let transport = SigningTransport::from_config(&config, None)?;
//! let ctx = ctx.with_http_send(transport);
//!
//! let req = http::Request::post("https://api.cerberus.test/v1/ip")
//!     .body(Bytes::from(r#"{"data":["8.8.8.8"]}"#))?;
//! let resp = ctx.http_send_as_string(req).await?;
//! println!("{}", resp.body());
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{CERBERUS_API_KEY, CERBERUS_API_SECRET};
pub use constants::{X_API_KEY, X_SIGNATURE, X_TIMESTAMP};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{signature, string_to_sign, RequestSigner};

mod transport;
pub use transport::{SigningTransport, DEFAULT_HTTP_SEND};
