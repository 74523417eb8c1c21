pub mod entity;
pub mod error;
pub mod pagination;
pub mod query;
pub mod repository;
pub mod unit_of_work;

pub use entity::{Entity, Field};
pub use error::{AppError, Result};
pub use pagination::{PageParameters, PagedList, PaginationMeta};
pub use query::{OrderedQuery, Query};
pub use repository::Repository;
pub use unit_of_work::UnitOfWork;
