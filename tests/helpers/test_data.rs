//! Entity builders for tests.

use catalog::modules::categories::Category;
use catalog::modules::products::Product;
use chrono::Utc;
use rust_decimal::Decimal;

pub fn category(name: &str) -> Category {
    Category {
        id: None,
        name: name.to_string(),
        image_url: format!("{}.png", name.to_lowercase()),
    }
}

pub fn product(name: &str, price: Decimal, category_id: i64) -> Product {
    Product {
        id: None,
        name: name.to_string(),
        description: format!("{} (test item)", name),
        price,
        image_url: format!("{}.png", name.to_lowercase()),
        stock: 10.0,
        registered_at: Utc::now(),
        category_id,
    }
}
