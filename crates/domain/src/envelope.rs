//! The response envelope returned by every resource call.
//!
//! [`ApiResponse`] is a sum type: a call either succeeded and carries its
//! decoded payload, or failed and carries a human-readable message. The two
//! states are mutually exclusive at the type level.
//!
//! On the wire (and in CLI output) the envelope is rendered as
//! `{"success": true, "data": ...}` or `{"success": false, "error": "..."}`.

use serde::de::value::UnitDeserializer;
use serde::de::{Deserializer, IntoDeserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::errors::RequestFailed;

/// Message used when a failure carries no usable explanation.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Outcome of a single resource call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    /// The backend accepted the call and its body decoded into `T`.
    Success(T),
    /// The call failed. `error` is never empty.
    Failure { error: String },
}

impl<T> ApiResponse<T> {
    /// Wraps a decoded payload.
    pub fn success(data: T) -> Self {
        ApiResponse::Success(data)
    }

    /// Builds a failure, substituting [`UNKNOWN_ERROR`] for a blank message.
    pub fn failure(error: impl Into<String>) -> Self {
        let error = error.into();
        if error.trim().is_empty() {
            ApiResponse::Failure {
                error: UNKNOWN_ERROR.to_string(),
            }
        } else {
            ApiResponse::Failure { error }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success(_))
    }

    /// Returns the payload of a successful call.
    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResponse::Success(data) => Some(data),
            ApiResponse::Failure { .. } => None,
        }
    }

    /// Returns the message of a failed call.
    pub fn error(&self) -> Option<&str> {
        match self {
            ApiResponse::Success(_) => None,
            ApiResponse::Failure { error } => Some(error),
        }
    }

    /// Converts into a `Result` so callers can use `?`.
    pub fn into_result(self) -> Result<T, RequestFailed> {
        match self {
            ApiResponse::Success(data) => Ok(data),
            ApiResponse::Failure { error } => Err(RequestFailed::new(error)),
        }
    }

    /// Discards the failure message.
    pub fn ok(self) -> Option<T> {
        match self {
            ApiResponse::Success(data) => Some(data),
            ApiResponse::Failure { .. } => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            ApiResponse::Success(data) => ApiResponse::Success(f(data)),
            ApiResponse::Failure { error } => ApiResponse::Failure { error },
        }
    }

    /// Returns the payload, or `fallback` if the call failed.
    ///
    /// This is how a caller opts into showing locally held data when the
    /// backend is unreachable. The failure has already been notified.
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            ApiResponse::Success(data) => data,
            ApiResponse::Failure { .. } => fallback,
        }
    }

    /// Like [`ApiResponse::unwrap_or`], computing the fallback from the
    /// failure message.
    pub fn unwrap_or_else(self, f: impl FnOnce(&str) -> T) -> T {
        match self {
            ApiResponse::Success(data) => data,
            ApiResponse::Failure { error } => f(&error),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for ApiResponse<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => ApiResponse::success(data),
            Err(e) => ApiResponse::failure(e.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire representation
// ---------------------------------------------------------------------------

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ApiResponse", 2)?;
        match self {
            ApiResponse::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            ApiResponse::Failure { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

#[derive(Deserialize)]
struct RawEnvelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEnvelope::<T>::deserialize(deserializer)?;
        if !raw.success {
            return Ok(ApiResponse::failure(raw.error.unwrap_or_default()));
        }
        let data = match raw.data {
            Some(data) => data,
            // `"data": null` or absent: let `T` decide whether that is valid.
            None => {
                let unit: UnitDeserializer<D::Error> = ().into_deserializer();
                T::deserialize(unit)?
            }
        };
        Ok(ApiResponse::Success(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_failure_message_becomes_unknown_error() {
        let r: ApiResponse<()> = ApiResponse::failure("  ");
        assert_eq!(r.error(), Some(UNKNOWN_ERROR));
    }

    #[test]
    fn success_and_failure_are_exclusive() {
        let ok = ApiResponse::success(3);
        assert!(ok.is_success());
        assert_eq!(ok.data(), Some(&3));
        assert_eq!(ok.error(), None);

        let err: ApiResponse<i32> = ApiResponse::failure("boom");
        assert!(!err.is_success());
        assert_eq!(err.data(), None);
        assert_eq!(err.error(), Some("boom"));
    }

    #[test]
    fn serialises_to_success_flag_shape() {
        let ok = ApiResponse::success(json!([{"id": "t1"}]));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"success": true, "data": [{"id": "t1"}]})
        );

        let err: ApiResponse<serde_json::Value> = ApiResponse::failure("not found");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"success": false, "error": "not found"})
        );
    }

    #[test]
    fn deserialises_success_without_data_for_unit_payloads() {
        let r: ApiResponse<()> = serde_json::from_value(json!({"success": true})).unwrap();
        assert_eq!(r, ApiResponse::Success(()));

        let r: ApiResponse<Option<u32>> =
            serde_json::from_value(json!({"success": true, "data": null})).unwrap();
        assert_eq!(r, ApiResponse::Success(None));
    }

    #[test]
    fn deserialises_failure_without_message() {
        let r: ApiResponse<u32> = serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(r.error(), Some(UNKNOWN_ERROR));
    }

    #[test]
    fn fallback_is_used_only_on_failure() {
        let ok = ApiResponse::success(vec![1]);
        assert_eq!(ok.unwrap_or(vec![9]), vec![1]);

        let err: ApiResponse<Vec<i32>> = ApiResponse::failure("offline");
        assert_eq!(err.clone().unwrap_or(vec![9]), vec![9]);
        assert_eq!(err.unwrap_or_else(|msg| vec![msg.len() as i32]), vec![7]);
    }

    #[test]
    fn into_result_preserves_message() {
        let err: ApiResponse<u8> = ApiResponse::failure("nope");
        assert_eq!(err.into_result().unwrap_err().to_string(), "nope");
    }

    #[test]
    fn from_result_maps_error_display() {
        let r: ApiResponse<u8> = Err::<u8, _>("bad thing").into();
        assert_eq!(r.error(), Some("bad thing"));
    }
}
