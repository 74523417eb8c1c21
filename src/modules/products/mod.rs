// Products module

pub mod controllers;
pub mod models;
pub mod repositories;

pub use models::{CreateProductRequest, Product, ProductField};
pub use repositories::ProductRepository;
