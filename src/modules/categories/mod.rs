// Categories module

pub mod controllers;
pub mod models;
pub mod repositories;

pub use models::{Category, CategoryField, CategoryWithProducts, CreateCategoryRequest};
pub use repositories::CategoryRepository;
