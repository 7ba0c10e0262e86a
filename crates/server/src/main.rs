use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use server_api::ApiContext;
use shared::{
    domain::{
        Candidate, CandidateId, Company, CompanyId, Department, DepartmentId, Employee,
        EmployeeId, Salary,
    },
    error::{ApiError, ErrorCode},
    protocol::{CandidateDraft, CompanyDraft, DepartmentDraft, EmployeeDraft},
};
use storage::Storage;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod extract;

use app_state::AppState;
use config::{load_settings, normalize_database_url};
use extract::JsonBody;

type HttpResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();

    let database_url = normalize_database_url(&settings.database_url);
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;

    let state = AppState {
        api: ApiContext { storage },
    };
    let app = build_router(Arc::new(state), settings.max_body_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, %database_url, "hr api listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "failed to listen for shutdown signal");
    }
    info!("shutdown requested");
}

fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/companies", get(http_list_companies).post(http_create_company))
        .route(
            "/companies/:id",
            put(http_update_company).delete(http_delete_company),
        )
        .route(
            "/departments",
            get(http_list_departments).post(http_create_department),
        )
        .route(
            "/departments/:id",
            put(http_update_department).delete(http_delete_department),
        )
        .route("/salaries", get(http_list_salaries))
        .route("/employees", get(http_list_employees).post(http_create_employee))
        .route(
            "/employees/:id",
            put(http_update_employee).delete(http_delete_employee),
        )
        .route(
            "/candidates",
            get(http_list_candidates).post(http_create_candidate),
        )
        .route(
            "/candidates/:id",
            put(http_update_candidate).delete(http_delete_candidate),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(err: ApiError) -> (StatusCode, Json<ApiError>) {
    (status_for(err.code), Json(err))
}

async fn healthz(State(state): State<Arc<AppState>>) -> HttpResult<&'static str> {
    state.api.storage.health_check().await.map_err(|e| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::internal(e.to_string())),
        )
    })?;
    Ok("ok")
}

async fn http_list_companies(State(state): State<Arc<AppState>>) -> HttpResult<Json<Vec<Company>>> {
    let companies = server_api::list_companies(&state.api)
        .await
        .map_err(reject)?;
    Ok(Json(companies))
}

async fn http_create_company(
    State(state): State<Arc<AppState>>,
    JsonBody(draft): JsonBody<CompanyDraft>,
) -> HttpResult<(StatusCode, Json<Company>)> {
    let company = server_api::create_company(&state.api, draft)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(company)))
}

async fn http_update_company(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(draft): JsonBody<CompanyDraft>,
) -> HttpResult<Json<Company>> {
    let company = server_api::update_company(&state.api, CompanyId(id), draft)
        .await
        .map_err(reject)?;
    Ok(Json(company))
}

async fn http_delete_company(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> HttpResult<StatusCode> {
    server_api::delete_company(&state.api, CompanyId(id))
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn http_list_departments(
    State(state): State<Arc<AppState>>,
) -> HttpResult<Json<Vec<Department>>> {
    let departments = server_api::list_departments(&state.api)
        .await
        .map_err(reject)?;
    Ok(Json(departments))
}

async fn http_create_department(
    State(state): State<Arc<AppState>>,
    JsonBody(draft): JsonBody<DepartmentDraft>,
) -> HttpResult<(StatusCode, Json<Department>)> {
    let department = server_api::create_department(&state.api, draft)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(department)))
}

async fn http_update_department(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(draft): JsonBody<DepartmentDraft>,
) -> HttpResult<Json<Department>> {
    let department = server_api::update_department(&state.api, DepartmentId(id), draft)
        .await
        .map_err(reject)?;
    Ok(Json(department))
}

async fn http_delete_department(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> HttpResult<StatusCode> {
    server_api::delete_department(&state.api, DepartmentId(id))
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn http_list_salaries(State(state): State<Arc<AppState>>) -> HttpResult<Json<Vec<Salary>>> {
    let salaries = server_api::list_salaries(&state.api)
        .await
        .map_err(reject)?;
    Ok(Json(salaries))
}

async fn http_list_employees(
    State(state): State<Arc<AppState>>,
) -> HttpResult<Json<Vec<Employee>>> {
    let employees = server_api::list_employees(&state.api)
        .await
        .map_err(reject)?;
    Ok(Json(employees))
}

async fn http_create_employee(
    State(state): State<Arc<AppState>>,
    JsonBody(draft): JsonBody<EmployeeDraft>,
) -> HttpResult<(StatusCode, Json<Employee>)> {
    let employee = server_api::create_employee(&state.api, draft)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn http_update_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(draft): JsonBody<EmployeeDraft>,
) -> HttpResult<Json<Employee>> {
    let employee = server_api::update_employee(&state.api, EmployeeId(id), draft)
        .await
        .map_err(reject)?;
    Ok(Json(employee))
}

async fn http_delete_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> HttpResult<StatusCode> {
    server_api::delete_employee(&state.api, EmployeeId(id))
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn http_list_candidates(
    State(state): State<Arc<AppState>>,
) -> HttpResult<Json<Vec<Candidate>>> {
    let candidates = server_api::list_candidates(&state.api)
        .await
        .map_err(reject)?;
    Ok(Json(candidates))
}

async fn http_create_candidate(
    State(state): State<Arc<AppState>>,
    JsonBody(draft): JsonBody<CandidateDraft>,
) -> HttpResult<(StatusCode, Json<Candidate>)> {
    let candidate = server_api::create_candidate(&state.api, draft)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

async fn http_update_candidate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(draft): JsonBody<CandidateDraft>,
) -> HttpResult<Json<Candidate>> {
    let candidate = server_api::update_candidate(&state.api, CandidateId(id), draft)
        .await
        .map_err(reject)?;
    Ok(Json(candidate))
}

async fn http_delete_candidate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> HttpResult<StatusCode> {
    server_api::delete_candidate(&state.api, CandidateId(id))
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
