//! The resource client: one normalised call path for every backend operation.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn, Instrument};

use domain::{ApiResponse, Notification, Notifier, Operation, RequestId, UNKNOWN_ERROR};

use crate::body::RequestBody;
use crate::config::{BaseAddress, ClientConfig};
use crate::error::{ClientError, ConfigError};
use crate::path::ResourcePath;

/// Calls the SafeWatch backend and turns every outcome into an
/// [`ApiResponse`].
///
/// The client holds no per-call state. Cloning it is cheap and clones share
/// the underlying connection handle, so one instance can serve any number of
/// concurrent calls. There are no retries and no client-side timeouts: each
/// call is a single attempt that runs until the transport gives up.
///
/// Every failed call is reported once to the injected [`Notifier`] before its
/// envelope is returned. Successful calls are silent; use
/// [`ResourceClient::notify_success`] to confirm an action to the user.
#[derive(Clone)]
pub struct ResourceClient {
    http: reqwest::Client,
    config: ClientConfig,
    notifier: Arc<dyn Notifier>,
}

impl ResourceClient {
    pub fn new(config: ClientConfig, notifier: Arc<dyn Notifier>) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            http,
            config,
            notifier,
        })
    }

    /// Returns a client for a different backend.
    ///
    /// `self` is left untouched; callers swap the instance they hold.
    pub fn with_base_address(&self, base_address: BaseAddress) -> Self {
        Self {
            http: self.http.clone(),
            config: ClientConfig {
                base_address,
                ..self.config.clone()
            },
            notifier: Arc::clone(&self.notifier),
        }
    }

    pub fn base_address(&self) -> &BaseAddress {
        &self.config.base_address
    }

    /// Raises a success notification on behalf of the caller.
    pub fn notify_success(&self, message: impl Into<String>) {
        self.notifier.notify(Notification::success(message));
    }

    /// Performs `operation` on `path` and decodes the response body as `T`.
    ///
    /// Never fails: transport errors, non-2xx statuses and undecodable bodies
    /// all come back as [`ApiResponse::Failure`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        operation: Operation,
        path: impl Into<ResourcePath>,
        body: Option<RequestBody>,
    ) -> ApiResponse<T> {
        self.dispatch(operation, path.into(), Ok(body)).await
    }

    /// Like [`ResourceClient::request`] with `payload` serialised as JSON.
    pub async fn request_json<B, T>(
        &self,
        operation: Operation,
        path: impl Into<ResourcePath>,
        payload: &B,
    ) -> ApiResponse<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = RequestBody::json(payload).map(Some);
        self.dispatch(operation, path.into(), body).await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        operation: Operation,
        path: ResourcePath,
        body: Result<Option<RequestBody>, ClientError>,
    ) -> ApiResponse<T> {
        let request_id = RequestId::new_random();
        let span = tracing::debug_span!(
            "resource_request",
            %request_id,
            method = %operation,
            path = %path
        );

        async move {
            let outcome = match body {
                Ok(body) => self.execute(operation, &path, body).await,
                Err(e) => Err(e),
            };
            match outcome {
                Ok(data) => {
                    debug!("resource request succeeded");
                    ApiResponse::success(data)
                }
                Err(e) => self.fail(e),
            }
        }
        .instrument(span)
        .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: Operation,
        path: &ResourcePath,
        body: Option<RequestBody>,
    ) -> Result<T, ClientError> {
        let request = self.build_request(operation, path, body)?;
        let response = self.http.execute(request).await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "response received");
        interpret(status, &bytes)
    }

    pub(crate) fn build_request(
        &self,
        operation: Operation,
        path: &ResourcePath,
        body: Option<RequestBody>,
    ) -> Result<reqwest::Request, ClientError> {
        let url = self.config.base_address.resolve(path);
        let builder = self.http.request(http_method(operation), url);
        let builder = match body {
            Some(RequestBody::Json(value)) => builder.json(&value),
            Some(RequestBody::Multipart(form)) => builder.multipart(form),
            None => builder,
        };
        Ok(builder.build()?)
    }

    fn fail<T>(&self, error: ClientError) -> ApiResponse<T> {
        match error.status() {
            Some(status) => warn!(status = status.as_u16(), error = %error, "resource request failed"),
            None => warn!(error = %error, "resource request failed"),
        }

        let envelope = ApiResponse::failure(error.to_string());
        if let Some(message) = envelope.error() {
            self.notifier.notify(Notification::error(message));
        }
        envelope
    }
}

impl std::fmt::Debug for ResourceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn http_method(operation: Operation) -> Method {
    match operation {
        Operation::Retrieve => Method::GET,
        Operation::Create => Method::POST,
        Operation::Replace => Method::PUT,
        Operation::Delete => Method::DELETE,
    }
}

/// Applies the envelope policy to a received response.
///
/// Bodies must be JSON whatever the status. A failure body that parses but
/// declares no usable `error` gives [`UNKNOWN_ERROR`]. `204 No Content` has no
/// body and decodes as JSON `null`, so `()`, `Option<_>` and
/// [`serde_json::Value`] targets accept it.
fn interpret<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ClientError> {
    if status == StatusCode::NO_CONTENT {
        return Ok(serde_json::from_value(Value::Null)?);
    }

    if !status.is_success() {
        let failure: Value = serde_json::from_slice(body)?;
        return Err(ClientError::Status {
            status,
            message: declared_error(&failure).unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        });
    }

    Ok(serde_json::from_slice(body)?)
}

/// The `error` string of a failure body, as sent, unless it is blank.
fn declared_error(failure: &Value) -> Option<String> {
    let message = failure.get("error")?.as_str()?;
    (!message.trim().is_empty()).then(|| message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{NoopNotifier, VideoFile};
    use reqwest::header::CONTENT_TYPE;
    use serde_json::json;

    fn client() -> ResourceClient {
        let config = ClientConfig::new(BaseAddress::parse("localhost:8000").unwrap());
        ResourceClient::new(config, Arc::new(NoopNotifier)).unwrap()
    }

    #[test]
    fn json_body_is_serialised_with_json_content_type() {
        let payload = json!({"status": "active"});
        let request = client()
            .build_request(
                Operation::Replace,
                &ResourcePath::from("/tenants/t1/status"),
                Some(RequestBody::Json(payload.clone())),
            )
            .unwrap();

        assert_eq!(request.method(), &Method::PUT);
        assert_eq!(request.url().as_str(), "http://localhost:8000/tenants/t1/status");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        let sent = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(sent, serde_json::to_vec(&payload).unwrap().as_slice());
    }

    #[test]
    fn multipart_body_gets_only_the_transport_boundary_header() {
        let file = VideoFile {
            file_name: "clip.mp4".into(),
            content: vec![0, 1, 2],
        };
        let request = client()
            .build_request(
                Operation::Create,
                &ResourcePath::from("/videos"),
                Some(RequestBody::upload(file)),
            )
            .unwrap();

        let content_types: Vec<_> = request.headers().get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(content_types.len(), 1);
        let value = content_types[0].to_str().unwrap();
        assert!(value.starts_with("multipart/form-data; boundary="), "{value}");
    }

    #[test]
    fn bodiless_request_has_no_content_type() {
        let request = client()
            .build_request(Operation::Retrieve, &ResourcePath::from("/tenants"), None)
            .unwrap();
        assert!(request.headers().get(CONTENT_TYPE).is_none());
        assert!(request.body().is_none());
    }

    #[test]
    fn success_status_decodes_body() {
        let data: Value = interpret(StatusCode::OK, br#"[{"id":"t1"}]"#).unwrap();
        assert_eq!(data, json!([{"id": "t1"}]));
    }

    #[test]
    fn no_content_is_null() {
        interpret::<()>(StatusCode::NO_CONTENT, b"").unwrap();
        let value: Value = interpret(StatusCode::NO_CONTENT, b"").unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn blank_body_with_other_success_status_is_a_decode_failure() {
        for body in [&b""[..], &b"  \n"[..]] {
            let err = interpret::<Value>(StatusCode::OK, body).unwrap_err();
            assert!(matches!(err, ClientError::Decode(_)), "{err:?}");
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn failure_status_uses_declared_error() {
        let err = interpret::<Value>(StatusCode::NOT_FOUND, br#"{"error":"not found"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "not found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn declared_error_is_surfaced_verbatim() {
        let err = interpret::<Value>(
            StatusCode::CONFLICT,
            br#"{"error":"  tenant t1 already exists\n"}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "  tenant t1 already exists\n");
    }

    #[test]
    fn failure_json_without_usable_message_is_unknown() {
        for body in [
            &br#"{"detail":"nope"}"#[..],
            &br#"{"error":""}"#[..],
            &br#"{"error":"   "}"#[..],
            &br#"{"error":42}"#[..],
            &br#"["error"]"#[..],
        ] {
            let err = interpret::<Value>(StatusCode::BAD_GATEWAY, body).unwrap_err();
            assert_eq!(err.to_string(), UNKNOWN_ERROR);
        }
    }

    #[test]
    fn failure_body_that_is_not_json_reports_the_decoder() {
        for body in [&b"<html>Bad Gateway</html>"[..], &b""[..]] {
            let err = interpret::<Value>(StatusCode::BAD_GATEWAY, body).unwrap_err();
            assert!(matches!(err, ClientError::Decode(_)), "{err:?}");
            assert_ne!(err.to_string(), UNKNOWN_ERROR);
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn malformed_success_body_is_a_decode_failure() {
        let err = interpret::<Value>(StatusCode::OK, b"not json").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn rebasing_leaves_original_client_untouched() {
        let original = client();
        let moved = original.with_base_address(BaseAddress::parse("https://prod.example").unwrap());

        assert_eq!(original.base_address().to_string(), "http://localhost:8000");
        assert_eq!(moved.base_address().to_string(), "https://prod.example");
    }
}
