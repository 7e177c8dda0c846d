//! Shared value types for the resource client domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! behaviour the client relies on: the fixed set of operation kinds, and the
//! notification records handed to a [`crate::Notifier`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Operation kinds
// ---------------------------------------------------------------------------

/// The kind of operation a request performs on a resource.
///
/// The set is closed: the backend only understands these four verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Read a resource or collection (`GET`).
    Retrieve,
    /// Create a resource or submit an action (`POST`).
    Create,
    /// Replace or update a resource (`PUT`).
    Replace,
    /// Remove a resource (`DELETE`).
    Delete,
}

impl Operation {
    /// Returns the HTTP method name this operation is carried on.
    pub fn http_method(self) -> &'static str {
        match self {
            Operation::Retrieve => "GET",
            Operation::Create => "POST",
            Operation::Replace => "PUT",
            Operation::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.http_method())
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Severity of a user-facing [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// A caller-chosen confirmation (e.g. "Video uploaded").
    Success,
    /// Contextual information.
    Info,
    /// A failed call. The client emits exactly one per failure.
    Error,
}

/// A transient, user-facing message (a "toast").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub raised_at: Timestamp,
}

impl Notification {
    /// Creates a notification stamped with the current time.
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            raised_at: Timestamp::now(),
        }
    }

    /// Shorthand for an [`NotificationLevel::Error`] notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    /// Shorthand for a [`NotificationLevel::Success`] notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_map_to_http_methods() {
        assert_eq!(Operation::Retrieve.http_method(), "GET");
        assert_eq!(Operation::Create.http_method(), "POST");
        assert_eq!(Operation::Replace.http_method(), "PUT");
        assert_eq!(Operation::Delete.http_method(), "DELETE");
        assert_eq!(Operation::Replace.to_string(), "PUT");
    }

    #[test]
    fn error_notification_carries_message_and_level() {
        let before = Timestamp::now();
        let n = Notification::error("not found");
        assert_eq!(n.level, NotificationLevel::Error);
        assert_eq!(n.message, "not found");
        assert!(n.raised_at >= before);
    }
}
