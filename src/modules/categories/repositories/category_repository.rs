use std::collections::HashMap;
use std::ops::Deref;

use crate::core::error::Result;
use crate::core::pagination::{PageParameters, PagedList};
use crate::core::repository::Repository;
use crate::modules::categories::models::{Category, CategoryField, CategoryWithProducts};
use crate::modules::products::models::{Product, ProductField};
use crate::store::{ChangeSet, Direction, StoreHandle};

/// Category repository: the generic CRUD surface plus the category-specific
/// query shapes.
pub struct CategoryRepository {
    repo: Repository<Category>,
    store: StoreHandle,
}

impl CategoryRepository {
    pub fn new(store: StoreHandle, changes: ChangeSet) -> Self {
        Self {
            repo: Repository::new(store.clone(), changes),
            store,
        }
    }

    /// Paged listing ordered by id ascending. Ids are monotonic and
    /// immutable, so page boundaries stay put under concurrent inserts.
    pub async fn paged(&self, params: PageParameters) -> Result<PagedList<Category>> {
        let query = self
            .repo
            .query()
            .order_by(CategoryField::Id, Direction::Ascending);
        self.repo.fetch_page(query, params).await
    }

    /// Read-only full listing of every category with its products.
    ///
    /// The store contract has no joins, so this is two ordered fetches
    /// grouped in memory at the read boundary.
    pub async fn list_with_products(&self) -> Result<Vec<CategoryWithProducts>> {
        let categories = self
            .repo
            .fetch_all(
                self.repo
                    .query()
                    .order_by(CategoryField::Id, Direction::Ascending),
            )
            .await?;

        let products = Repository::<Product>::read_only(self.store.clone());
        let all_products = products
            .fetch_all(
                products
                    .query()
                    .order_by(ProductField::Id, Direction::Ascending),
            )
            .await?;

        let mut by_category: HashMap<i64, Vec<Product>> = HashMap::new();
        for product in all_products {
            by_category
                .entry(product.category_id)
                .or_default()
                .push(product);
        }

        Ok(categories
            .into_iter()
            .filter_map(|category| {
                let id = category.id?;
                Some(CategoryWithProducts {
                    id,
                    name: category.name,
                    image_url: category.image_url,
                    products: by_category.remove(&id).unwrap_or_default(),
                })
            })
            .collect())
    }
}

impl Deref for CategoryRepository {
    type Target = Repository<Category>;

    fn deref(&self) -> &Self::Target {
        &self.repo
    }
}
