//! Resource payloads exchanged with the backend.
//!
//! Entities the backend returns (tenants, videos, faces, events, processing
//! jobs, tenant configuration) are opaque: each wraps the decoded JSON value
//! exactly as received and only offers lenient accessors on top. Any JSON the
//! backend sends decodes, and serialising an entity gives back the same value.
//!
//! Bodies the client builds itself (`VideoUpdate`, `FaceUpdate`,
//! `TenantStatusUpdate`, `ProcessRequest`, `EventTrigger`, `LiveUrl`) are
//! typed. Each keeps a flattened `extra` map for fields it does not name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{CameraId, EventId, FaceId, JobId, TenantId, VideoId};

/// Fields the typed request bodies do not name.
pub type Extra = Map<String, Value>;

macro_rules! opaque_entity {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Value);

        impl $name {
            /// A top-level field, if the payload is an object that has it.
            pub fn get(&self, field: &str) -> Option<&Value> {
                self.0.get(field)
            }

            pub fn as_value(&self) -> &Value {
                &self.0
            }

            pub fn into_value(self) -> Value {
                self.0
            }
        }

        impl From<Value> for $name {
            fn from(value: Value) -> Self {
                Self(value)
            }
        }
    };
}

/// Reads an id field that the backend may send as a string or a number.
fn id_field<T: TryFrom<String>>(payload: &Value, field: &str) -> Option<T> {
    let raw = match payload.get(field)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    T::try_from(raw).ok()
}

fn str_field<'a>(payload: &'a Value, field: &str) -> Option<&'a str> {
    payload.get(field)?.as_str()
}

// ---------------------------------------------------------------------------
// Tenants
// ---------------------------------------------------------------------------

opaque_entity! {
    /// A monitored site or customer account.
    Tenant
}

impl Tenant {
    pub fn id(&self) -> Option<TenantId> {
        id_field(&self.0, "id")
    }

    pub fn name(&self) -> Option<&str> {
        str_field(&self.0, "name")
    }
}

opaque_entity! {
    /// A tenant's detection configuration. Entirely backend-defined.
    TenantConfig
}

impl TenantConfig {
    pub fn from_object(object: Map<String, Value>) -> Self {
        Self(Value::Object(object))
    }
}

/// Body of a tenant status change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantStatusUpdate {
    pub status: String,
    #[serde(flatten)]
    pub extra: Extra,
}

impl TenantStatusUpdate {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            extra: Extra::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Videos and processing
// ---------------------------------------------------------------------------

opaque_entity! {
    /// An uploaded video as reported by the backend.
    Video
}

impl Video {
    pub fn id(&self) -> Option<VideoId> {
        id_field(&self.0, "id")
    }

    pub fn filename(&self) -> Option<&str> {
        str_field(&self.0, "filename")
    }

    pub fn status(&self) -> Option<&str> {
        str_field(&self.0, "status")
    }

    pub fn tenant_id(&self) -> Option<TenantId> {
        id_field(&self.0, "tenant_id")
    }
}

/// A partial update to a video. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A file to upload as multipart form data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Body of a processing trigger: which video a tenant's pipeline should run on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub video_id: VideoId,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ProcessRequest {
    pub fn new(video_id: VideoId) -> Self {
        Self {
            video_id,
            extra: Extra::new(),
        }
    }
}

opaque_entity! {
    /// A processing job accepted by the backend.
    ProcessingJob
}

impl ProcessingJob {
    pub fn job_id(&self) -> Option<JobId> {
        id_field(&self.0, "job_id")
    }

    pub fn status(&self) -> Option<&str> {
        str_field(&self.0, "status")
    }
}

// ---------------------------------------------------------------------------
// Faces and cameras
// ---------------------------------------------------------------------------

opaque_entity! {
    /// An entry in a tenant's face registry.
    Face
}

impl Face {
    pub fn id(&self) -> Option<FaceId> {
        id_field(&self.0, "id")
    }

    pub fn name(&self) -> Option<&str> {
        str_field(&self.0, "name")
    }
}

/// Body of a face registration or edit. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of a live stream URL change for one camera.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveUrl {
    pub url: String,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A manually triggered safety event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTrigger {
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_id: Option<CameraId>,
    #[serde(flatten)]
    pub extra: Extra,
}

opaque_entity! {
    /// The backend's acknowledgement of a triggered event.
    Event
}

impl Event {
    pub fn id(&self) -> Option<EventId> {
        id_field(&self.0, "id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entities_keep_the_payload_as_received() {
        let raw = json!({"id": "t1", "name": "Factory Alpha", "region": "eu", "cameras": 4});
        let tenant: Tenant = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(tenant.id().unwrap().as_str(), "t1");
        assert_eq!(tenant.name(), Some("Factory Alpha"));
        assert_eq!(tenant.get("region"), Some(&json!("eu")));
        assert_eq!(serde_json::to_value(&tenant).unwrap(), raw);
    }

    #[test]
    fn entities_decode_whatever_shape_the_backend_sends() {
        let numeric: Video = serde_json::from_value(json!({"id": 1, "filename": "a.mp4"})).unwrap();
        assert_eq!(numeric.id().unwrap().as_str(), "1");
        assert_eq!(numeric.filename(), Some("a.mp4"));

        let unnamed: Tenant = serde_json::from_value(json!({"tenant_id": "t1"})).unwrap();
        assert!(unnamed.id().is_none());
        assert_eq!(unnamed.as_value(), &json!({"tenant_id": "t1"}));

        let scalar: Event = serde_json::from_value(json!("queued")).unwrap();
        assert!(scalar.id().is_none());
        assert_eq!(scalar.into_value(), json!("queued"));
    }

    #[test]
    fn empty_or_odd_ids_read_as_absent() {
        let face = Face::from(json!({"id": "", "name": 7}));
        assert!(face.id().is_none());
        assert!(face.name().is_none());
    }

    #[test]
    fn video_update_omits_unset_fields() {
        let patch = VideoUpdate {
            status: Some("archived".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"status": "archived"})
        );
    }

    #[test]
    fn tenant_config_is_passed_through() {
        let cfg: TenantConfig =
            serde_json::from_value(json!({"threshold": 0.4, "zones": []})).unwrap();
        assert_eq!(cfg.get("threshold"), Some(&json!(0.4)));
        assert_eq!(
            serde_json::to_value(&cfg).unwrap(),
            json!({"threshold": 0.4, "zones": []})
        );
    }
}
