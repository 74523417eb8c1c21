// End-to-end paging behavior over the in-memory store: the concrete
// scenarios, the every-row-exactly-once property, and the append-only
// stability of id-ordered pages under concurrent inserts.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use catalog::core::pagination::PageParameters;
use catalog::core::unit_of_work::UnitOfWork;
use catalog::store::StoreHandle;
use helpers::memory_store::MemoryStore;
use helpers::test_data::{category, product};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn memory_store() -> StoreHandle {
    Arc::new(MemoryStore::new())
}

/// One category plus `count` products, committed in a single scope.
async fn seed_products(store: &StoreHandle, count: usize) {
    let uow = UnitOfWork::new(store.clone());
    uow.categories().add(&category("Drinks")).unwrap();
    for n in 1..=count {
        let price = Decimal::from(n as i64) * dec!(1.50);
        uow.products()
            .add(&product(&format!("Product {}", n), price, 1))
            .unwrap();
    }
    uow.commit().await.unwrap();
}

fn product_ids(items: &[catalog::modules::products::Product]) -> Vec<i64> {
    items.iter().map(|p| p.id.unwrap()).collect()
}

#[tokio::test]
async fn test_twenty_three_products_first_page() {
    let store = memory_store();
    seed_products(&store, 23).await;

    let uow = UnitOfWork::new(store.clone());
    let page = uow
        .products()
        .paged(PageParameters::new(1, 10).unwrap())
        .await
        .unwrap();

    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total_count, 23);
    assert_eq!(page.total_pages, 3);
    assert!(!page.has_previous());
    assert!(page.has_next());
    assert_eq!(product_ids(&page.items), (1..=10).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_twenty_three_products_last_page() {
    let store = memory_store();
    seed_products(&store, 23).await;

    let uow = UnitOfWork::new(store.clone());
    let page = uow
        .products()
        .paged(PageParameters::new(3, 10).unwrap())
        .await
        .unwrap();

    assert_eq!(page.items.len(), 3);
    assert!(page.has_previous());
    assert!(!page.has_next());
    assert_eq!(product_ids(&page.items), vec![21, 22, 23]);
}

#[tokio::test]
async fn test_page_beyond_the_end_is_empty_not_an_error() {
    let store = memory_store();
    seed_products(&store, 23).await;

    let uow = UnitOfWork::new(store.clone());
    let page = uow
        .products()
        .paged(PageParameters::new(5, 10).unwrap())
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 23);
    assert!(!page.has_next());
    assert!(page.has_previous());
}

#[tokio::test]
async fn test_empty_set_first_page() {
    let store = memory_store();

    let uow = UnitOfWork::new(store.clone());
    let page = uow
        .products()
        .paged(PageParameters::new(1, 10).unwrap())
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 0);
    assert_eq!(page.total_pages, 0);
    assert!(!page.has_next());
    assert!(!page.has_previous());
}

#[tokio::test]
async fn test_every_row_appears_exactly_once_across_pages() {
    for (count, page_size) in [(23usize, 10u64), (9, 10), (10, 10), (50, 7), (1, 1)] {
        let store = memory_store();
        seed_products(&store, count).await;

        let uow = UnitOfWork::new(store.clone());
        let mut seen = Vec::new();
        let mut page_number = 1;
        loop {
            let page = uow
                .products()
                .paged(PageParameters::new(page_number, page_size).unwrap())
                .await
                .unwrap();
            assert_eq!(page.total_count, count as u64);
            seen.extend(product_ids(&page.items));
            if !page.has_next() {
                break;
            }
            page_number += 1;
        }

        assert_eq!(
            seen,
            (1..=count as i64).collect::<Vec<_>>(),
            "count={} page_size={}",
            count,
            page_size
        );
    }
}

#[tokio::test]
async fn test_id_ordered_pages_are_stable_under_inserts() {
    let store = memory_store();
    seed_products(&store, 23).await;

    let uow = UnitOfWork::new(store.clone());
    let page_one_before = uow
        .products()
        .paged(PageParameters::new(1, 10).unwrap())
        .await
        .unwrap();
    let page_two_before = uow
        .products()
        .paged(PageParameters::new(2, 10).unwrap())
        .await
        .unwrap();

    // A concurrent writer appends a product between page fetches.
    {
        let writer = UnitOfWork::new(store.clone());
        writer
            .products()
            .add(&product("Latecomer", dec!(99.00), 1))
            .unwrap();
        writer.commit().await.unwrap();
    }

    let page_one_after = uow
        .products()
        .paged(PageParameters::new(1, 10).unwrap())
        .await
        .unwrap();
    let page_two_after = uow
        .products()
        .paged(PageParameters::new(2, 10).unwrap())
        .await
        .unwrap();

    // Earlier pages keep exactly the rows they had, in the same order;
    // the newcomer only extends the tail.
    assert_eq!(
        product_ids(&page_one_before.items),
        product_ids(&page_one_after.items)
    );
    assert_eq!(
        product_ids(&page_two_before.items),
        product_ids(&page_two_after.items)
    );

    let last_page = uow
        .products()
        .paged(PageParameters::new(3, 10).unwrap())
        .await
        .unwrap();
    assert_eq!(product_ids(&last_page.items), vec![21, 22, 23, 24]);
    assert_eq!(last_page.total_count, 24);
}
