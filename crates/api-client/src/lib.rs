//! SafeWatch resource client.
//!
//! Carries the operations of the [`domain`] crate to the SafeWatch backend:
//! JSON over HTTP(S), with multipart form encoding for video uploads.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** URL resolution, body encoding, status interpretation
//! and response decoding all live here. Callers see only
//! [`domain::ApiResponse`] envelopes: [`ResourceClient`] never returns an
//! error or panics on a failed call.
//!
//! ## Failure policy
//!
//! | Outcome | Envelope message |
//! |---------|------------------|
//! | 2xx, body decodes | `Success(data)` |
//! | 204 No Content | `Success` of JSON `null` |
//! | non-2xx, JSON body with a non-blank string `error` | that string, unchanged |
//! | non-2xx, JSON body without one | `"Unknown error"` |
//! | any status, body empty, not JSON or wrong shape | decoder message |
//! | connection/transport failure | transport message |
//!
//! Every failure is also sent, once, to the injected [`domain::Notifier`].

pub mod body;
pub mod client;
pub mod config;
pub mod error;
pub mod notifier;
pub mod path;
mod resources;

pub use body::{RequestBody, UPLOAD_FIELD};
pub use client::ResourceClient;
pub use config::{BaseAddress, ClientConfig, DEFAULT_BASE_ADDRESS};
pub use error::{ClientError, ConfigError};
pub use notifier::TracingNotifier;
pub use path::ResourcePath;
