mod category;

pub use category::{Category, CategoryField, CategoryWithProducts, CreateCategoryRequest};
