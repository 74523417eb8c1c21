use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, Field};
use crate::core::error::Result;
use crate::modules::products::Product;
use crate::store::{Record, ValueKind};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Store-assigned; absent until the entity is committed.
    pub id: Option<i64>,
    pub name: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Id,
    Name,
    ImageUrl,
}

impl Field for CategoryField {
    fn column(self) -> &'static str {
        match self {
            CategoryField::Id => "id",
            CategoryField::Name => "name",
            CategoryField::ImageUrl => "image_url",
        }
    }

    fn kind(self) -> ValueKind {
        match self {
            CategoryField::Id => ValueKind::Int,
            CategoryField::Name | CategoryField::ImageUrl => ValueKind::Text,
        }
    }
}

impl Entity for Category {
    type Field = CategoryField;

    fn table() -> &'static str {
        "categories"
    }

    fn fields() -> &'static [CategoryField] {
        &[CategoryField::Id, CategoryField::Name, CategoryField::ImageUrl]
    }

    fn id_field() -> CategoryField {
        CategoryField::Id
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn to_record(&self) -> Record {
        Record::new()
            .set("name", self.name.clone())
            .set("image_url", self.image_url.clone())
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Category {
            id: Some(record.int("id")?),
            name: record.text("name")?,
            image_url: record.text("image_url")?,
        })
    }
}

/// Body for POST /categories.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub image_url: String,
}

impl CreateCategoryRequest {
    pub fn into_category(self) -> Category {
        Category {
            id: None,
            name: self.name,
            image_url: self.image_url,
        }
    }
}

/// Read-only projection of a category together with its products.
///
/// Products reference their category by id only; this view is assembled by
/// an explicit read, never by traversing an object graph, so it cannot
/// introduce serialization cycles.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryWithProducts {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub products: Vec<Product>,
}
