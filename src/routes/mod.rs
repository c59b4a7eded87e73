use axum::{Json, Router, http::StatusCode};

use crate::{response::MessageResponse, state::AppState};

pub mod admin;
pub mod cart;
pub mod doc;
pub mod health;
pub mod params;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/admin", admin::router())
        .nest("/products", products::router())
        .nest("/cart", cart::router())
        .fallback(api_not_found)
}

// Unknown API paths must not fall through to the web client.
async fn api_not_found() -> (StatusCode, Json<MessageResponse>) {
    (StatusCode::NOT_FOUND, Json(MessageResponse::new("Not Found")))
}
