use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest},
    error::AppResult,
    response::MessageResponse,
    routes::params::AppJson,
    services::auth_service::{login_admin, register_admin},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[utoipa::path(
    post,
    path = "/api/admin/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Admin created", body = MessageResponse),
        (status = 400, description = "Missing field or username taken", body = MessageResponse)
    ),
    tag = "Admin"
)]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let resp = register_admin(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed admin token", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = MessageResponse)
    ),
    tag = "Admin"
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let resp = login_admin(&state, payload).await?;
    Ok(Json(resp))
}
