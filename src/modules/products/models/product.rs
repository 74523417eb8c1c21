use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, Field};
use crate::core::error::Result;
use crate::store::{Record, ValueKind};

/// A catalog product.
///
/// The category is referenced by id only; there is no back-pointer from
/// `Category`, so an entity graph can always be serialized without cycle
/// handling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Store-assigned; absent until the entity is committed.
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub stock: f64,
    pub registered_at: DateTime<Utc>,
    pub category_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Id,
    Name,
    Description,
    Price,
    ImageUrl,
    Stock,
    RegisteredAt,
    CategoryId,
}

impl Field for ProductField {
    fn column(self) -> &'static str {
        match self {
            ProductField::Id => "id",
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::Price => "price",
            ProductField::ImageUrl => "image_url",
            ProductField::Stock => "stock",
            ProductField::RegisteredAt => "registered_at",
            ProductField::CategoryId => "category_id",
        }
    }

    fn kind(self) -> ValueKind {
        match self {
            ProductField::Id | ProductField::CategoryId => ValueKind::Int,
            ProductField::Name | ProductField::Description | ProductField::ImageUrl => {
                ValueKind::Text
            }
            ProductField::Price => ValueKind::Decimal,
            ProductField::Stock => ValueKind::Float,
            ProductField::RegisteredAt => ValueKind::Timestamp,
        }
    }
}

impl Entity for Product {
    type Field = ProductField;

    fn table() -> &'static str {
        "products"
    }

    fn fields() -> &'static [ProductField] {
        &[
            ProductField::Id,
            ProductField::Name,
            ProductField::Description,
            ProductField::Price,
            ProductField::ImageUrl,
            ProductField::Stock,
            ProductField::RegisteredAt,
            ProductField::CategoryId,
        ]
    }

    fn id_field() -> ProductField {
        ProductField::Id
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn to_record(&self) -> Record {
        Record::new()
            .set("name", self.name.clone())
            .set("description", self.description.clone())
            .set("price", self.price)
            .set("image_url", self.image_url.clone())
            .set("stock", self.stock)
            .set("registered_at", self.registered_at)
            .set("category_id", self.category_id)
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Product {
            id: Some(record.int("id")?),
            name: record.text("name")?,
            description: record.text("description")?,
            price: record.decimal("price")?,
            image_url: record.text("image_url")?,
            stock: record.float("stock")?,
            registered_at: record.timestamp("registered_at")?,
            category_id: record.int("category_id")?,
        })
    }
}

/// Body for POST /products. The registration timestamp is assigned
/// server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub stock: f64,
    pub category_id: i64,
}

impl CreateProductRequest {
    pub fn into_product(self) -> Product {
        Product {
            id: None,
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
            stock: self.stock,
            registered_at: Utc::now(),
            category_id: self.category_id,
        }
    }
}
