//! Typed identifiers for backend resources.
//!
//! Tenants, videos, cameras, faces, events and jobs are all addressed by
//! strings on the wire. Giving each its own type keeps a camera id out of a
//! tenant slot at compile time.
//!
//! The client never looks inside an id. The one rule is that it is non-empty,
//! both when built with `new` and when decoded from JSON, because an empty
//! segment would change the route it is placed in.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::EmptyIdentifier;

macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// `None` for an empty value.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let value: String = value.into();
                Self::try_from(value).ok()
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = EmptyIdentifier;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                if value.is_empty() {
                    Err(EmptyIdentifier)
                } else {
                    Ok(Self(value))
                }
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id! {
    /// A tenant: one monitored site or customer account.
    ///
    /// Cameras, faces, configuration and processing jobs all hang off a
    /// tenant, so most paths start with `/tenants/{id}`.
    TenantId
}

string_id! {
    /// An uploaded video.
    VideoId
}

string_id! {
    /// A camera, unique within its tenant.
    CameraId
}

string_id! {
    /// An entry in a tenant's face registry.
    FaceId
}

string_id! {
    /// A safety event, raised by the backend or triggered by hand.
    EventId
}

string_id! {
    JobId
}

/// Correlates the log lines of one client call.
///
/// Minted per request and attached to its tracing span. Never sent on the
/// wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identifier_is_rejected() {
        assert!(TenantId::new("").is_none());
        assert_eq!(TenantId::new("t1").unwrap().as_str(), "t1");
    }

    #[test]
    fn identifiers_serialise_as_bare_strings() {
        let id = FaceId::new("face-7").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""face-7""#);

        let back: FaceId = serde_json::from_str(r#""face-7""#).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn empty_identifier_does_not_decode() {
        let err = serde_json::from_str::<TenantId>(r#""""#).unwrap_err();
        assert!(err.to_string().contains("identifier must not be empty"), "{err}");
    }

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(RequestId::new_random(), RequestId::new_random());
    }
}
