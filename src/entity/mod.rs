pub mod admins;
pub mod cart_items;
pub mod products;

pub use admins::Entity as Admins;
pub use cart_items::Entity as CartItems;
pub use products::Entity as Products;
