use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};
use uuid::Uuid;

use crate::{
    dto::products::CreateProductRequest,
    entity::{
        cart_items::{Column as CartCol, Entity as CartItems},
        products::{ActiveModel, Column, Entity as Products},
    },
    error::AppResult,
    middleware::auth::AuthAdmin,
    models::Product,
    response::MessageResponse,
    state::AppState,
};

pub async fn list_products(state: &AppState) -> AppResult<Vec<Product>> {
    let items = Products::find()
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();
    Ok(items)
}

pub async fn create_product(
    state: &AppState,
    admin: &AuthAdmin,
    payload: CreateProductRequest,
) -> AppResult<Product> {
    let new_product = payload.validate()?;
    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(new_product.name),
        price: Set(new_product.price),
        image_url: Set(new_product.image_url),
        created_at: Set(Utc::now().into()),
    };
    let product = active.insert(&state.orm).await?;

    tracing::info!(
        admin_id = %admin.admin_id,
        product_id = %product.id,
        price = product.price,
        "product created"
    );

    Ok(product.into())
}

/// Remove a product and every cart item pointing at it in one transaction.
/// Deleting an unknown id is not an error.
pub async fn delete_product(
    state: &AppState,
    admin: &AuthAdmin,
    id: Uuid,
) -> AppResult<MessageResponse> {
    let txn = state.orm.begin().await?;

    let cart_result = CartItems::delete_many()
        .filter(CartCol::ProductId.eq(id))
        .exec(&txn)
        .await?;
    let product_result = Products::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        admin_id = %admin.admin_id,
        product_id = %id,
        deleted = product_result.rows_affected,
        cart_items_removed = cart_result.rows_affected,
        "product deleted"
    );

    Ok(MessageResponse::new("Product deleted"))
}
