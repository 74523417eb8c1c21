use std::ops::Deref;

use crate::core::error::Result;
use crate::core::pagination::{PageParameters, PagedList};
use crate::core::repository::Repository;
use crate::modules::products::models::{Product, ProductField};
use crate::store::{ChangeSet, Direction, StoreHandle};

/// Product repository: the generic CRUD surface plus the product-specific
/// query shapes.
pub struct ProductRepository {
    repo: Repository<Product>,
}

impl ProductRepository {
    pub fn new(store: StoreHandle, changes: ChangeSet) -> Self {
        Self {
            repo: Repository::new(store, changes),
        }
    }

    /// Paged listing ordered by id ascending. Ids are monotonic and
    /// immutable, so page boundaries stay put under concurrent inserts.
    pub async fn paged(&self, params: PageParameters) -> Result<PagedList<Product>> {
        let query = self
            .repo
            .query()
            .order_by(ProductField::Id, Direction::Ascending);
        self.repo.fetch_page(query, params).await
    }

    /// Full listing ordered by ascending price.
    ///
    /// Price is mutable, so this ordering carries no stable-paging claim;
    /// callers get a one-shot snapshot.
    pub async fn list_by_price(&self) -> Result<Vec<Product>> {
        let query = self
            .repo
            .query()
            .order_by(ProductField::Price, Direction::Ascending);
        self.repo.fetch_all(query).await
    }
}

impl Deref for ProductRepository {
    type Target = Repository<Product>;

    fn deref(&self) -> &Self::Target {
        &self.repo
    }
}
