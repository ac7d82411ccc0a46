//! Synchronous client core for the PTSP payment-link API.
//!
//! # Overview
//! Three operations: create a payment link, look a link up by token, and
//! fetch a transaction status by merchant reference. Requests are built and
//! responses parsed as plain data (host-does-IO); `ApiClient` runs the
//! round-trip over a pluggable `Transport`.
//!
//! # Design
//! - `payload` turns a loosely-typed `CreateLinkRequest` into a compact JSON
//!   object with no null-valued keys.
//! - `decode` absorbs the gateway's snake_case / camelCase key skew so each
//!   operation yields one canonical result type.
//! - `error_format` merges partial error payloads into one message.
//! - Every failure surfaces as `ApiError`; nothing is retried.
//!
//! ```no_run
//! use ptsp_core::{ApiClient, ClientConfig, CreateLinkRequest, PaymentOperation};
//!
//! # fn main() -> ptsp_core::Result<()> {
//! let api = ApiClient::with_default_transport(ClientConfig::from_env()?);
//! let link = api.create_payment_link(&CreateLinkRequest {
//!     amount: Some(5656.0),
//!     currency: Some("SAR".to_string()),
//!     payment_operation: Some(PaymentOperation::Pay),
//!     merchant_reference: Some("INV-1001".to_string()),
//!     ..CreateLinkRequest::default()
//! })?;
//! println!("{}", link.payment_link);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod error_format;
pub mod http;
pub mod payload;
pub mod transport;
pub mod types;

pub use api::ApiClient;
pub use client::{Auth, PtspClient};
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, DecodeError, Result, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{
    CreateLinkRequest, CreateLinkResult, Customer, LinkLookupResult, PaymentOperation, StatusResult,
};
