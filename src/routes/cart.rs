use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
};

use crate::{
    dto::cart::AddToCartRequest,
    error::AppResult,
    models::CartItem,
    response::MessageResponse,
    routes::params::{AppJson, AppPath, CartItemPath},
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(add_to_cart))
        .route("/{user_id}", get(get_cart))
        .route("/{user_id}/{item_id}", delete(remove_cart_item))
}

#[utoipa::path(
    get,
    path = "/api/cart/{user_id}",
    params(
        ("user_id" = String, Path, description = "Cart owner")
    ),
    responses(
        (status = 200, description = "Cart items with their products", body = Vec<CartItem>)
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<String>,
) -> AppResult<Json<Vec<CartItem>>> {
    let items = cart_service::get_cart(&state, &user_id).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "Item added or quantity increased", body = CartItem),
        (status = 400, description = "Bad request", body = MessageResponse)
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AddToCartRequest>,
) -> AppResult<(StatusCode, Json<CartItem>)> {
    let item = cart_service::add_to_cart(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{user_id}/{item_id}",
    params(CartItemPath),
    responses(
        (status = 200, description = "Cart item removed", body = MessageResponse),
        (status = 400, description = "Malformed item id", body = MessageResponse)
    ),
    tag = "Cart"
)]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    AppPath(path): AppPath<CartItemPath>,
) -> AppResult<Json<MessageResponse>> {
    let resp = cart_service::remove_cart_item(&state, &path.user_id, path.item_id).await?;
    Ok(Json(resp))
}
