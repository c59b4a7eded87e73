mod common;

use axum::http::StatusCode;

// Admin signs up, lists a product, a shopper puts it in their cart.
#[tokio::test]
async fn admin_to_shopper_flow() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;

    let registered = app.register("alice", "pw123").await;
    assert_eq!(registered.status, StatusCode::CREATED);

    let login = app.login("alice", "pw123").await;
    assert_eq!(login.status, StatusCode::OK);
    let token = login.json()["token"].as_str().unwrap().to_string();

    let created = app
        .post(
            "/api/products",
            serde_json::json!({ "name": "Widget", "price": "9.99", "imageUrl": "http://x/y.png" }),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let product_id = created.json()["id"].as_str().unwrap().to_string();

    let products = app.products().await;
    let widget = products
        .iter()
        .find(|p| p["name"] == "Widget")
        .expect("Widget listed");
    assert_eq!(widget["price"].as_f64(), Some(9.99));

    let added = app.add_to_cart("u1", &product_id, 2).await;
    assert_eq!(added.status, StatusCode::CREATED);

    let cart = app.cart("u1").await;
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0]["quantity"], 2);
    assert_eq!(cart[0]["product"]["name"], "Widget");
    assert_eq!(cart[0]["product"]["price"].as_f64(), Some(9.99));
    Ok(())
}

#[tokio::test]
async fn unknown_paths_serve_the_web_client() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;

    let page = app.get("/admin/some/client/route").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.text.contains("E-commerce Store"));

    let root = app.get("/").await;
    assert_eq!(root.status, StatusCode::OK);
    assert!(root.text.contains("<!DOCTYPE html>"));
    Ok(())
}

#[tokio::test]
async fn unknown_api_paths_are_json_404() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;
    let response = app.get("/api/does-not-exist").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["message"], "Not Found");
    Ok(())
}

#[tokio::test]
async fn api_docs_are_served() -> anyhow::Result<()> {
    let app = common::spawn_app().await?;
    let response = app.get("/docs").await;
    assert_eq!(response.status, StatusCode::OK);
    Ok(())
}
