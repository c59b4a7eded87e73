use chrono::Utc;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use crate::{
    dto::cart::AddToCartRequest,
    entity::{
        cart_items::{ActiveModel as CartActive, Column as CartCol, Entity as CartItems},
        products::Entity as Products,
    },
    error::{AppError, AppResult},
    models::CartItem,
    response::MessageResponse,
    state::AppState,
};

/// Cart rows for `user_id` joined with their products in a single query.
/// Rows whose product is gone are dropped rather than returned half-empty.
pub async fn find_cart_with_product<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    product_id: Option<Uuid>,
) -> AppResult<Vec<CartItem>> {
    let mut finder = CartItems::find()
        .find_also_related(Products)
        .filter(CartCol::UserId.eq(user_id));
    if let Some(product_id) = product_id {
        finder = finder.filter(CartCol::ProductId.eq(product_id));
    }

    let items = finder
        .order_by_asc(CartCol::CreatedAt)
        .order_by_asc(CartCol::Id)
        .all(conn)
        .await?
        .into_iter()
        .filter_map(|(item, product)| match product {
            Some(product) => Some(CartItem::from_entities(item, product)),
            None => {
                tracing::warn!(cart_item_id = %item.id, product_id = %item.product_id, "dropping dangling cart item");
                None
            }
        })
        .collect();
    Ok(items)
}

pub async fn get_cart(state: &AppState, user_id: &str) -> AppResult<Vec<CartItem>> {
    find_cart_with_product(&state.orm, user_id, None).await
}

/// Insert the item or bump the existing quantity. The upsert is a single
/// statement, so concurrent adds for the same pair always sum.
pub async fn add_to_cart(state: &AppState, payload: AddToCartRequest) -> AppResult<CartItem> {
    let AddToCartRequest {
        user_id,
        product_id,
        quantity,
    } = payload;
    let quantity = quantity.unwrap_or(1);

    if user_id.trim().is_empty() {
        return Err(AppError::BadRequest("userId is required".into()));
    }
    if quantity <= 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    if Products::find_by_id(product_id).one(&state.orm).await?.is_none() {
        return Err(AppError::BadRequest("Product not found".to_string()));
    }

    upsert_cart_item(&state.orm, &user_id, product_id, quantity).await?;

    let item = find_cart_with_product(&state.orm, &user_id, Some(product_id))
        .await?
        .into_iter()
        .next()
        // Only reachable if the product was deleted right after the upsert.
        .ok_or_else(|| AppError::BadRequest("Product not found".to_string()))?;

    tracing::debug!(
        user_id = %item.user_id,
        product_id = %item.product_id,
        added = quantity,
        quantity = item.quantity,
        "cart item upserted"
    );

    Ok(item)
}

/// `INSERT .. ON CONFLICT DO UPDATE` adding `quantity` to any existing row.
/// The update is skipped when the sum would not fit the `i32` column, which
/// surfaces as zero affected rows.
pub async fn upsert_cart_item<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    product_id: Uuid,
    quantity: i32,
) -> AppResult<()> {
    let active = CartActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id.to_string()),
        product_id: Set(product_id),
        quantity: Set(quantity),
        created_at: Set(Utc::now().into()),
    };
    let affected = CartItems::insert(active)
        .on_conflict(
            OnConflict::columns([CartCol::UserId, CartCol::ProductId])
                .value(
                    CartCol::Quantity,
                    Expr::col((CartItems, CartCol::Quantity)).add(Expr::cust("excluded.quantity")),
                )
                .action_and_where(
                    Expr::col((CartItems, CartCol::Quantity))
                        .lte(Expr::val(i32::MAX).sub(Expr::cust("excluded.quantity"))),
                )
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(|err| match err.sql_err() {
            // The product vanished after the existence check.
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::BadRequest("Product not found".to_string())
            }
            _ => AppError::from(err),
        })?;

    if affected == 0 {
        return Err(AppError::BadRequest(format!(
            "quantity in cart cannot exceed {}",
            i32::MAX
        )));
    }
    Ok(())
}

/// Delete a cart item owned by `user_id`. Unknown ids and items owned by
/// someone else are a silent no-op.
pub async fn remove_cart_item(
    state: &AppState,
    user_id: &str,
    item_id: Uuid,
) -> AppResult<MessageResponse> {
    let result = CartItems::delete_many()
        .filter(CartCol::Id.eq(item_id))
        .filter(CartCol::UserId.eq(user_id))
        .exec(&state.orm)
        .await?;

    tracing::debug!(
        user_id = %user_id,
        cart_item_id = %item_id,
        removed = result.rows_affected,
        "cart item removed"
    );

    Ok(MessageResponse::new("Cart item removed"))
}
