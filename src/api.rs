use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{debug, info};

use crate::{
    clients::{
        health::HealthChecker, layout::LayoutAsset, store::TemplateStore, uploads::UploadStorage,
    },
    config::Config,
    error::{ApiError, ApiResult},
    models::{
        health::HealthStatus,
        request::{RenderRequest, SaveTemplateRequest},
        response::{ApiResponse, LayoutResponse, UploadResponse},
        template::{NEW_TEMPLATE_ID, Template},
        validation::validate_template,
    },
    renderer,
};

pub struct AppState {
    pub store: Arc<dyn TemplateStore>,
    pub uploads: UploadStorage,
    pub layout: LayoutAsset,
    pub health_checker: HealthChecker,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        store: Arc<dyn TemplateStore>,
        uploads: UploadStorage,
        layout: LayoutAsset,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            health_checker: HealthChecker::new(store.clone(), uploads.clone()),
            store,
            uploads,
            layout,
            max_upload_bytes,
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let uploads_prefix = state.uploads.url_prefix().to_string();
    let uploads_dir = ServeDir::new(state.uploads.dir());
    let max_upload_bytes = state.max_upload_bytes;

    Router::new()
        .route("/health", get(health_check))
        .route("/api/templates", get(list_templates).post(create_template))
        .route("/api/templates/{id}", get(get_template).put(update_template))
        .route("/api/render", post(render_saved_template))
        .route("/api/render/draft", post(render_draft_template))
        .route(
            "/api/uploads",
            post(upload_image).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/api/layout", get(get_layout))
        .nest_service(&uploads_prefix, uploads_dir)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_api_server(config: Config, store: Arc<dyn TemplateStore>) -> anyhow::Result<()> {
    let uploads = UploadStorage::from_config(&config);
    uploads.ensure_dir().await?;

    let state = Arc::new(AppState::new(
        store,
        uploads,
        LayoutAsset::new(&config.layout_path),
        config.max_upload_bytes,
    ));

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, "Template service started");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_checker.check_all().await;

    let status_code = match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

async fn list_templates(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ApiResponse<Vec<Template>>>> {
    let templates = state.store.list().await?;

    debug!(count = templates.len(), "Listed templates");

    Ok(Json(ApiResponse::success(
        templates,
        "Templates retrieved".to_string(),
    )))
}

/// The draft id resolves to a fresh empty template rather than a lookup.
async fn get_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Template>>> {
    if id == NEW_TEMPLATE_ID {
        return Ok(Json(ApiResponse::success(
            Template::draft(),
            "New draft template".to_string(),
        )));
    }

    let template = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::TemplateNotFound(id.clone()))?;

    Ok(Json(ApiResponse::success(
        template,
        "Template retrieved".to_string(),
    )))
}

async fn create_template(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SaveTemplateRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Template>>)> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let template = request.into_template();

    // Replacing an existing record is not a creation.
    let replaces_existing =
        !template.is_draft() && state.store.get(&template.id).await?.is_some();

    let saved = save_template(&state, template).await?;

    let status = if replaces_existing {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    Ok((
        status,
        Json(ApiResponse::success(
            saved,
            "Template saved successfully".to_string(),
        )),
    ))
}

async fn update_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<SaveTemplateRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Template>>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let mut template = request.into_template();
    template.id = id;

    let saved = save_template(&state, template).await?;

    Ok(Json(ApiResponse::success(
        saved,
        "Template saved successfully".to_string(),
    )))
}

async fn save_template(state: &AppState, template: Template) -> ApiResult<Template> {
    validate_template(&template).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let saved = state.store.upsert(template).await?;

    info!(
        template_id = %saved.id,
        sections = saved.sections.len(),
        "Template saved"
    );

    Ok(saved)
}

async fn render_saved_template(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let template = state
        .store
        .get(&request.template_id)
        .await?
        .ok_or_else(|| ApiError::TemplateNotFound(request.template_id.clone()))?;

    debug!(
        template_id = %template.id,
        has_data = !request.data.is_null(),
        "Rendering saved template"
    );

    Ok(html_attachment(&template))
}

async fn render_draft_template(
    payload: Result<Json<SaveTemplateRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let template = request.into_template();

    debug!(sections = template.sections.len(), "Rendering draft template");

    Ok(html_attachment(&template))
}

fn html_attachment(template: &Template) -> Response {
    let html = renderer::render(template);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        renderer::suggested_filename(template)
    );

    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        html,
    )
        .into_response()
}

async fn upload_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<ApiResponse<UploadResponse>>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        if bytes.is_empty() {
            return Err(ApiError::BadRequest("Uploaded file is empty".to_string()));
        }

        let url = state.uploads.store(&original_name, &bytes).await?;

        return Ok(Json(ApiResponse::success(
            UploadResponse { url },
            "File uploaded successfully".to_string(),
        )));
    }

    Err(ApiError::BadRequest("No file uploaded".to_string()))
}

async fn get_layout(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ApiResponse<LayoutResponse>>> {
    let layout = state.layout.load().await?;

    Ok(Json(ApiResponse::success(
        LayoutResponse { layout },
        "Layout retrieved".to_string(),
    )))
}
