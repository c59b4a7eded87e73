use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Price as sent by the admin form: either a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    pub fn to_f64(&self) -> AppResult<f64> {
        let value = match self {
            PriceInput::Number(n) => *n,
            PriceInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| AppError::BadRequest(format!("price `{s}` is not a number")))?,
        };
        if !value.is_finite() {
            return Err(AppError::BadRequest("price must be a finite number".into()));
        }
        Ok(value)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<PriceInput>,
    pub image_url: Option<String>,
}

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub image_url: String,
}

impl CreateProductRequest {
    pub fn validate(self) -> AppResult<NewProduct> {
        let name = required("name", self.name)?;
        let image_url = required("imageUrl", self.image_url)?;
        let price = self
            .price
            .ok_or_else(|| AppError::BadRequest("price is required".into()))?
            .to_f64()?;
        Ok(NewProduct {
            name,
            price,
            image_url,
        })
    }
}

fn required(field: &str, value: Option<String>) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!("{field} is required"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> CreateProductRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn coerces_string_price() {
        let product = request(serde_json::json!({
            "name": "Widget",
            "price": "19.99",
            "imageUrl": "http://x/y.png"
        }))
        .validate()
        .unwrap();
        assert_eq!(product.price, 19.99);
        assert_eq!(product.name, "Widget");
        assert_eq!(product.image_url, "http://x/y.png");
    }

    #[test]
    fn accepts_numeric_price() {
        let product = request(serde_json::json!({
            "name": "Widget",
            "price": 5,
            "imageUrl": "http://x/y.png"
        }))
        .validate()
        .unwrap();
        assert_eq!(product.price, 5.0);
    }

    #[test]
    fn rejects_non_numeric_price() {
        let err = request(serde_json::json!({
            "name": "Widget",
            "price": "cheap",
            "imageUrl": "http://x/y.png"
        }))
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = PriceInput::Text("NaN".into()).to_f64().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn rejects_missing_fields() {
        let err = request(serde_json::json!({ "price": "1", "imageUrl": "u" }))
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "name is required");

        let err = request(serde_json::json!({ "name": "n", "price": "1", "imageUrl": "  " }))
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "imageUrl is required");

        let err = request(serde_json::json!({ "name": "n", "imageUrl": "u" }))
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "price is required");
    }
}
