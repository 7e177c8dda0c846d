//! Resource domain for the SafeWatch client.
//!
//! This crate contains every type the resource client and its callers share:
//! newtype identifiers, resource payloads, the [`ApiResponse`] envelope, and
//! the [`Notifier`] port through which failed calls are surfaced to the user.
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** This crate has no I/O dependencies.
//! It defines *what* a call returns; the `api-client` crate defines *how* the
//! call is carried over HTTP.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`TenantId`, `VideoId`, etc.) |
//! | [`types`] | `Operation`, `Notification`, `Timestamp` |
//! | [`envelope`] | The `ApiResponse<T>` success/failure sum type |
//! | [`resources`] | Pass-through resource payloads |
//! | [`notify`] | The `Notifier` port |
//! | [`errors`] | `RequestFailed`, for `?`-style callers |

pub mod envelope;
pub mod errors;
pub mod identifiers;
pub mod notify;
pub mod resources;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use envelope::{ApiResponse, UNKNOWN_ERROR};
pub use errors::{EmptyIdentifier, RequestFailed};
pub use identifiers::{CameraId, EventId, FaceId, JobId, RequestId, TenantId, VideoId};
pub use notify::{NoopNotifier, Notifier};
pub use resources::{
    Event, EventTrigger, Extra, Face, FaceUpdate, LiveUrl, ProcessRequest, ProcessingJob, Tenant,
    TenantConfig, TenantStatusUpdate, Video, VideoFile, VideoUpdate,
};
pub use types::{Notification, NotificationLevel, Operation, Timestamp};
