//! Request bodies.

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;
use domain::VideoFile;

/// Multipart field the backend reads uploads from.
pub const UPLOAD_FIELD: &str = "file";

/// What a request carries.
///
/// JSON bodies are sent with `Content-Type: application/json`. Multipart
/// bodies get no explicit content type from this crate: the transport writes
/// `multipart/form-data` together with the boundary it generated.
#[derive(Debug)]
pub enum RequestBody {
    Json(Value),
    Multipart(Form),
}

impl RequestBody {
    /// Serialises `payload` into a JSON body.
    pub fn json<B: Serialize + ?Sized>(payload: &B) -> Result<Self, ClientError> {
        serde_json::to_value(payload)
            .map(RequestBody::Json)
            .map_err(ClientError::Encode)
    }

    /// A single-file upload form.
    pub fn upload(file: VideoFile) -> Self {
        let part = Part::bytes(file.content).file_name(file.file_name);
        RequestBody::Multipart(Form::new().part(UPLOAD_FIELD, part))
    }
}
