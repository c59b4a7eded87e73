use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub user_id: String,
    pub product_id: Uuid,
    /// Defaults to 1 when omitted.
    pub quantity: Option<i32>,
}
