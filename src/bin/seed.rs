use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use storefront_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::products::{ActiveModel as ProductActive, Column as ProductCol, Entity as Products},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    seed_products(&orm).await?;

    println!("Seed completed");
    Ok(())
}

async fn seed_products(orm: &DatabaseConnection) -> anyhow::Result<()> {
    let products = vec![
        ("Axum Hoodie", 55.0, "https://picsum.photos/seed/hoodie/400/300"),
        ("Ferris Mug", 12.5, "https://picsum.photos/seed/mug/400/300"),
        ("Rust Sticker Pack", 4.99, "https://picsum.photos/seed/stickers/400/300"),
        ("E-book: Async Rust", 25.0, "https://picsum.photos/seed/ebook/400/300"),
    ];

    for (name, price, image_url) in products {
        // Names are not unique in the schema, so skip by lookup.
        let exists = Products::find()
            .filter(ProductCol::Name.eq(name))
            .one(orm)
            .await?
            .is_some();
        if exists {
            println!("Skipped {name}");
            continue;
        }

        ProductActive {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            price: Set(price),
            image_url: Set(image_url.to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(orm)
        .await?;
        println!("Seeded {name}");
    }

    Ok(())
}
