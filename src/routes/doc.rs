use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        cart::AddToCartRequest,
        products::{CreateProductRequest, PriceInput},
    },
    models::{CartItem, Product},
    response::MessageResponse,
    routes::{admin, cart, health, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        admin::register,
        admin::login,
        products::list_products,
        products::create_product,
        products::delete_product,
        cart::get_cart,
        cart::add_to_cart,
        cart::remove_cart_item
    ),
    components(
        schemas(
            Product,
            CartItem,
            MessageResponse,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateProductRequest,
            PriceInput,
            AddToCartRequest,
            health::HealthData
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Admin", description = "Admin registration and login"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Cart", description = "Cart endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
