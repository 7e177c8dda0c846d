//! Per-resource operations.
//!
//! Each method fixes the path and [`Operation`] for one backend endpoint and
//! delegates to [`ResourceClient::request`] or
//! [`ResourceClient::request_json`]. They add no behaviour of their own: the
//! envelope, logging and failure notification all come from the core call.
//!
//! Entities come back as the opaque wrappers from [`domain`], so any JSON
//! entity the backend sends decodes. List endpoints expect a JSON array.
//! Endpoints whose response shape the backend does not pin down return
//! [`serde_json::Value`].

use serde_json::Value;

use domain::{
    ApiResponse, CameraId, Event, EventTrigger, Face, FaceId, FaceUpdate, LiveUrl, Operation,
    ProcessRequest, ProcessingJob, Tenant, TenantConfig, TenantId, TenantStatusUpdate, Video,
    VideoFile, VideoId, VideoUpdate,
};

use crate::body::RequestBody;
use crate::client::ResourceClient;
use crate::path::ResourcePath;

fn tenant_path(tenant: &TenantId) -> ResourcePath {
    ResourcePath::from("/tenants").join(tenant)
}

fn video_path(video: &VideoId) -> ResourcePath {
    ResourcePath::from("/videos").join(video)
}

impl ResourceClient {
    // -----------------------------------------------------------------------
    // Videos
    // -----------------------------------------------------------------------

    /// `POST /videos` as `multipart/form-data` with the file in field `file`.
    pub async fn upload_video(&self, file: VideoFile) -> ApiResponse<Value> {
        self.request(Operation::Create, "/videos", Some(RequestBody::upload(file)))
            .await
    }

    pub async fn list_videos(&self) -> ApiResponse<Vec<Video>> {
        self.request(Operation::Retrieve, "/videos", None).await
    }

    pub async fn get_video(&self, video: &VideoId) -> ApiResponse<Video> {
        self.request(Operation::Retrieve, video_path(video), None)
            .await
    }

    /// `PUT /videos/{id}` with only the fields set in `update`.
    pub async fn update_video(&self, video: &VideoId, update: &VideoUpdate) -> ApiResponse<Value> {
        self.request_json(Operation::Replace, video_path(video), update)
            .await
    }

    pub async fn delete_video(&self, video: &VideoId) -> ApiResponse<Value> {
        self.request(Operation::Delete, video_path(video), None)
            .await
    }

    /// `POST /process/{tenantId}`: starts a processing job for one video.
    pub async fn process_video(
        &self,
        tenant: &TenantId,
        request: &ProcessRequest,
    ) -> ApiResponse<ProcessingJob> {
        let path = ResourcePath::from("/process").join(tenant);
        self.request_json(Operation::Create, path, request).await
    }

    // -----------------------------------------------------------------------
    // Health and metrics
    // -----------------------------------------------------------------------

    pub async fn get_status(&self) -> ApiResponse<Value> {
        self.request(Operation::Retrieve, "/status", None).await
    }

    pub async fn get_stats(&self) -> ApiResponse<Value> {
        self.request(Operation::Retrieve, "/stats", None).await
    }

    pub async fn get_db_status(&self) -> ApiResponse<Value> {
        self.request(Operation::Retrieve, "/db-status", None).await
    }

    // -----------------------------------------------------------------------
    // Tenants
    // -----------------------------------------------------------------------

    pub async fn list_tenants(&self) -> ApiResponse<Vec<Tenant>> {
        self.request(Operation::Retrieve, "/tenants", None).await
    }

    pub async fn get_tenant_config(&self, tenant: &TenantId) -> ApiResponse<TenantConfig> {
        self.request(Operation::Retrieve, tenant_path(tenant).join("config"), None)
            .await
    }

    pub async fn create_tenant_config(
        &self,
        tenant: &TenantId,
        config: &TenantConfig,
    ) -> ApiResponse<Value> {
        self.request_json(Operation::Create, tenant_path(tenant).join("config"), config)
            .await
    }

    pub async fn delete_tenant_config(&self, tenant: &TenantId) -> ApiResponse<Value> {
        self.request(Operation::Delete, tenant_path(tenant).join("config"), None)
            .await
    }

    /// `POST /tenants/{id}/config/update`.
    pub async fn update_tenant_config(
        &self,
        tenant: &TenantId,
        config: &TenantConfig,
    ) -> ApiResponse<Value> {
        let path = tenant_path(tenant).join("config").join("update");
        self.request_json(Operation::Create, path, config).await
    }

    pub async fn update_tenant_status(
        &self,
        tenant: &TenantId,
        status: &TenantStatusUpdate,
    ) -> ApiResponse<Value> {
        self.request_json(Operation::Replace, tenant_path(tenant).join("status"), status)
            .await
    }

    // -----------------------------------------------------------------------
    // Face registry
    // -----------------------------------------------------------------------

    pub async fn list_faces(&self, tenant: &TenantId) -> ApiResponse<Vec<Face>> {
        self.request(Operation::Retrieve, tenant_path(tenant).join("faces"), None)
            .await
    }

    pub async fn register_face(&self, tenant: &TenantId, face: &FaceUpdate) -> ApiResponse<Face> {
        self.request_json(Operation::Create, tenant_path(tenant).join("faces"), face)
            .await
    }

    pub async fn update_face(
        &self,
        tenant: &TenantId,
        face_id: &FaceId,
        face: &FaceUpdate,
    ) -> ApiResponse<Face> {
        let path = tenant_path(tenant).join("faces").join(face_id);
        self.request_json(Operation::Replace, path, face).await
    }

    pub async fn delete_face(&self, tenant: &TenantId, face_id: &FaceId) -> ApiResponse<Value> {
        let path = tenant_path(tenant).join("faces").join(face_id);
        self.request(Operation::Delete, path, None).await
    }

    // -----------------------------------------------------------------------
    // Cameras and events
    // -----------------------------------------------------------------------

    /// `PUT /tenants/{id}/cameras/{cameraId}/live-url`.
    pub async fn update_camera_live_url(
        &self,
        tenant: &TenantId,
        camera: &CameraId,
        live_url: &LiveUrl,
    ) -> ApiResponse<Value> {
        let path = tenant_path(tenant)
            .join("cameras")
            .join(camera)
            .join("live-url");
        self.request_json(Operation::Replace, path, live_url).await
    }

    pub async fn trigger_event(&self, event: &EventTrigger) -> ApiResponse<Event> {
        self.request_json(Operation::Create, "/trigger-event", event)
            .await
    }
}
