//! One subcommand per backend operation.
//!
//! Every remote command prints the call's envelope as pretty JSON on stdout
//! and reports whether it succeeded; failures have already been shown to the
//! user by the client's notifier.

use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;
use serde::Serialize;

use api_client::ResourceClient;
use domain::{
    ApiResponse, CameraId, EventTrigger, Extra, FaceId, FaceUpdate, LiveUrl, ProcessRequest,
    TenantConfig, TenantId, TenantStatusUpdate, VideoFile, VideoId, VideoUpdate,
};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show or change persisted settings.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Backend status (`GET /status`).
    Status,
    /// Backend metrics (`GET /stats`).
    Stats,
    /// Database connectivity (`GET /db-status`).
    DbStatus,
    /// Tenants and their configuration.
    Tenants {
        #[command(subcommand)]
        action: TenantAction,
    },
    /// Uploaded videos.
    Videos {
        #[command(subcommand)]
        action: VideoAction,
    },
    /// A tenant's face registry.
    Faces {
        #[command(subcommand)]
        action: FaceAction,
    },
    /// Camera settings.
    Cameras {
        #[command(subcommand)]
        action: CameraAction,
    },
    /// Trigger a safety event manually (`POST /trigger-event`).
    TriggerEvent {
        event_type: String,
        #[arg(long, value_parser = tenant_id)]
        tenant: Option<TenantId>,
        #[arg(long, value_parser = camera_id)]
        camera: Option<CameraId>,
        /// Extra event fields as a JSON object, or `@path` to a JSON file.
        #[arg(long, value_parser = json_object)]
        data: Option<Extra>,
    },
    /// Start processing a video for a tenant (`POST /process/{tenant}`).
    Process {
        #[arg(value_parser = tenant_id)]
        tenant: TenantId,
        #[arg(value_parser = video_id)]
        video: VideoId,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective settings and where they are stored.
    Show,
    /// Validate and save the backend address used by later invocations.
    SetBaseAddress { address: String },
}

#[derive(Debug, Subcommand)]
pub enum TenantAction {
    List,
    /// Fetch a tenant's configuration.
    GetConfig {
        #[arg(value_parser = tenant_id)]
        tenant: TenantId,
    },
    /// Create a tenant's configuration from a JSON object (or `@file`).
    CreateConfig {
        #[arg(value_parser = tenant_id)]
        tenant: TenantId,
        #[arg(value_parser = json_object)]
        config: Extra,
    },
    /// Update a tenant's configuration from a JSON object (or `@file`).
    UpdateConfig {
        #[arg(value_parser = tenant_id)]
        tenant: TenantId,
        #[arg(value_parser = json_object)]
        config: Extra,
    },
    DeleteConfig {
        #[arg(value_parser = tenant_id)]
        tenant: TenantId,
    },
    /// Change a tenant's status (e.g. `active`, `paused`).
    SetStatus {
        #[arg(value_parser = tenant_id)]
        tenant: TenantId,
        status: String,
        #[arg(long, value_parser = json_object)]
        data: Option<Extra>,
    },
}

#[derive(Debug, Subcommand)]
pub enum VideoAction {
    List,
    Get {
        #[arg(value_parser = video_id)]
        video: VideoId,
    },
    /// Upload a video file as multipart form data.
    Upload { path: PathBuf },
    /// Update selected fields of a video.
    Update {
        #[arg(value_parser = video_id)]
        video: VideoId,
        #[arg(long)]
        filename: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long, value_parser = tenant_id)]
        tenant: Option<TenantId>,
        #[arg(long, value_parser = json_object)]
        data: Option<Extra>,
    },
    Delete {
        #[arg(value_parser = video_id)]
        video: VideoId,
    },
}

#[derive(Debug, Subcommand)]
pub enum FaceAction {
    List {
        #[arg(value_parser = tenant_id)]
        tenant: TenantId,
    },
    Register {
        #[arg(value_parser = tenant_id)]
        tenant: TenantId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = json_object)]
        data: Option<Extra>,
    },
    Update {
        #[arg(value_parser = tenant_id)]
        tenant: TenantId,
        #[arg(value_parser = face_id)]
        face: FaceId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = json_object)]
        data: Option<Extra>,
    },
    Delete {
        #[arg(value_parser = tenant_id)]
        tenant: TenantId,
        #[arg(value_parser = face_id)]
        face: FaceId,
    },
}

#[derive(Debug, Subcommand)]
pub enum CameraAction {
    /// Point a camera at a new live stream URL.
    SetLiveUrl {
        #[arg(value_parser = tenant_id)]
        tenant: TenantId,
        #[arg(value_parser = camera_id)]
        camera: CameraId,
        url: String,
    },
}

/// Runs a remote command. Returns `false` when the call failed.
///
/// `Command::Config` is local and handled by the caller.
pub async fn run_remote(client: &ResourceClient, command: Command) -> anyhow::Result<bool> {
    match command {
        Command::Config { .. } => anyhow::bail!("config commands do not call the backend"),
        Command::Status => emit(&client.get_status().await),
        Command::Stats => emit(&client.get_stats().await),
        Command::DbStatus => emit(&client.get_db_status().await),
        Command::Tenants { action } => run_tenant(client, action).await,
        Command::Videos { action } => run_video(client, action).await,
        Command::Faces { action } => run_face(client, action).await,
        Command::Cameras {
            action:
                CameraAction::SetLiveUrl {
                    tenant,
                    camera,
                    url,
                },
        } => emit(
            &client
                .update_camera_live_url(&tenant, &camera, &LiveUrl { url })
                .await,
        ),
        Command::TriggerEvent {
            event_type,
            tenant,
            camera,
            data,
        } => {
            let event = EventTrigger {
                event_type,
                tenant_id: tenant,
                camera_id: camera,
                extra: data.unwrap_or_default(),
            };
            emit(&client.trigger_event(&event).await)
        }
        Command::Process { tenant, video } => {
            emit(&client.process_video(&tenant, &ProcessRequest::new(video)).await)
        }
    }
}

async fn run_tenant(client: &ResourceClient, action: TenantAction) -> anyhow::Result<bool> {
    match action {
        TenantAction::List => emit(&client.list_tenants().await),
        TenantAction::GetConfig { tenant } => emit(&client.get_tenant_config(&tenant).await),
        TenantAction::CreateConfig { tenant, config } => emit(
            &client
                .create_tenant_config(&tenant, &TenantConfig::from_object(config))
                .await,
        ),
        TenantAction::UpdateConfig { tenant, config } => emit(
            &client
                .update_tenant_config(&tenant, &TenantConfig::from_object(config))
                .await,
        ),
        TenantAction::DeleteConfig { tenant } => {
            emit(&client.delete_tenant_config(&tenant).await)
        }
        TenantAction::SetStatus {
            tenant,
            status,
            data,
        } => {
            let update = TenantStatusUpdate {
                status,
                extra: data.unwrap_or_default(),
            };
            emit(&client.update_tenant_status(&tenant, &update).await)
        }
    }
}

async fn run_video(client: &ResourceClient, action: VideoAction) -> anyhow::Result<bool> {
    match action {
        VideoAction::List => emit(&client.list_videos().await),
        VideoAction::Get { video } => emit(&client.get_video(&video).await),
        VideoAction::Upload { path } => {
            let content = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("upload.bin")
                .to_string();

            let response = client
                .upload_video(VideoFile {
                    file_name: file_name.clone(),
                    content,
                })
                .await;
            if response.is_success() {
                client.notify_success(format!("Uploaded {file_name}"));
            }
            emit(&response)
        }
        VideoAction::Update {
            video,
            filename,
            status,
            tenant,
            data,
        } => {
            let update = VideoUpdate {
                filename,
                status,
                tenant_id: tenant,
                extra: data.unwrap_or_default(),
            };
            emit(&client.update_video(&video, &update).await)
        }
        VideoAction::Delete { video } => {
            let response = client.delete_video(&video).await;
            if response.is_success() {
                client.notify_success(format!("Deleted video {video}"));
            }
            emit(&response)
        }
    }
}

async fn run_face(client: &ResourceClient, action: FaceAction) -> anyhow::Result<bool> {
    match action {
        FaceAction::List { tenant } => emit(&client.list_faces(&tenant).await),
        FaceAction::Register { tenant, name, data } => {
            let face = FaceUpdate {
                name,
                extra: data.unwrap_or_default(),
            };
            emit(&client.register_face(&tenant, &face).await)
        }
        FaceAction::Update {
            tenant,
            face,
            name,
            data,
        } => {
            let body = FaceUpdate {
                name,
                extra: data.unwrap_or_default(),
            };
            emit(&client.update_face(&tenant, &face, &body).await)
        }
        FaceAction::Delete { tenant, face } => emit(&client.delete_face(&tenant, &face).await),
    }
}

fn emit<T: Serialize>(envelope: &ApiResponse<T>) -> anyhow::Result<bool> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(envelope.is_success())
}

// ---------------------------------------------------------------------------
// Argument parsers
// ---------------------------------------------------------------------------

macro_rules! id_parser {
    ($fn_name:ident, $ty:ty) => {
        fn $fn_name(raw: &str) -> Result<$ty, String> {
            <$ty>::new(raw).ok_or_else(|| "identifier must not be empty".to_string())
        }
    };
}

id_parser!(tenant_id, TenantId);
id_parser!(video_id, VideoId);
id_parser!(face_id, FaceId);
id_parser!(camera_id, CameraId);

/// Parses a JSON object given inline or as `@path`.
fn json_object(raw: &str) -> Result<Extra, String> {
    let text = match raw.strip_prefix('@') {
        Some(path) => {
            std::fs::read_to_string(path).map_err(|e| format!("failed to read {path}: {e}"))?
        }
        None => raw.to_string(),
    };
    serde_json::from_str(&text).map_err(|e| format!("expected a JSON object: {e}"))
}
