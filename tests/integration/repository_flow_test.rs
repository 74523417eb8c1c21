// Repository CRUD flows against the in-memory store: staged writes only
// land at commit, lookups are deterministic, and the specialized query
// shapes behave as documented.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use catalog::core::error::AppError;
use catalog::core::unit_of_work::UnitOfWork;
use catalog::store::{Op, StoreHandle};
use catalog::modules::categories::CategoryField;
use helpers::memory_store::MemoryStore;
use helpers::test_data::{category, product};
use rust_decimal_macros::dec;

fn memory_store() -> StoreHandle {
    Arc::new(MemoryStore::new())
}

#[tokio::test]
async fn test_add_commit_find_round_trip() {
    let store = memory_store();

    let drinks = category("Drinks");
    {
        let uow = UnitOfWork::new(store.clone());
        uow.categories().add(&drinks).unwrap();
        let receipt = uow.commit().await.unwrap();
        assert_eq!(receipt.inserted_ids, vec![1]);
    }

    // A later scope sees the persisted row, identical except for the
    // store-assigned id.
    let uow = UnitOfWork::new(store.clone());
    let found = uow.categories().find_by_id(1).await.unwrap().unwrap();
    assert_eq!(found.id, Some(1));
    assert_eq!(found.name, drinks.name);
    assert_eq!(found.image_url, drinks.image_url);
}

#[tokio::test]
async fn test_add_rejects_an_already_persisted_entity() {
    let store = memory_store();
    let uow = UnitOfWork::new(store.clone());

    let mut drinks = category("Drinks");
    drinks.id = Some(5);

    let err = uow.categories().add(&drinks).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(uow.pending().is_empty());
}

#[tokio::test]
async fn test_nothing_persists_before_commit() {
    let store = memory_store();

    let uow = UnitOfWork::new(store.clone());
    uow.categories().add(&category("Drinks")).unwrap();

    let reader = UnitOfWork::new(store.clone());
    let repo = reader.categories();
    assert_eq!(repo.count(&repo.query()).await.unwrap(), 0);

    uow.commit().await.unwrap();
    assert_eq!(repo.count(&repo.query()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_round_trip() {
    let store = memory_store();

    {
        let uow = UnitOfWork::new(store.clone());
        uow.categories().add(&category("Drinks")).unwrap();
        uow.commit().await.unwrap();
    }

    {
        let uow = UnitOfWork::new(store.clone());
        let mut found = uow.categories().find_by_id(1).await.unwrap().unwrap();
        found.name = "Beverages".to_string();
        uow.categories().update(&found).unwrap();
        uow.commit().await.unwrap();
    }

    let uow = UnitOfWork::new(store.clone());
    let found = uow.categories().find_by_id(1).await.unwrap().unwrap();
    assert_eq!(found.name, "Beverages");
}

#[tokio::test]
async fn test_update_without_id_is_a_caller_error() {
    let store = memory_store();
    let uow = UnitOfWork::new(store.clone());

    let err = uow.categories().update(&category("Drinks")).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_update_of_an_absent_row_fails_at_commit() {
    let store = memory_store();
    let uow = UnitOfWork::new(store.clone());

    let mut ghost = category("Ghost");
    ghost.id = Some(99);
    uow.categories().update(&ghost).unwrap();

    let err = uow.commit().await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_commit_find_returns_none() {
    let store = memory_store();

    {
        let uow = UnitOfWork::new(store.clone());
        uow.categories().add(&category("Drinks")).unwrap();
        uow.commit().await.unwrap();
    }

    {
        let uow = UnitOfWork::new(store.clone());
        let found = uow.categories().find_by_id(1).await.unwrap().unwrap();
        uow.categories().delete(&found).unwrap();
        uow.commit().await.unwrap();
    }

    let uow = UnitOfWork::new(store.clone());
    assert!(uow.categories().find_by_id(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_one_with_several_matches_returns_the_lowest_id() {
    let store = memory_store();

    {
        let uow = UnitOfWork::new(store.clone());
        uow.categories().add(&category("Snacks")).unwrap();
        uow.categories().add(&category("Snacks")).unwrap();
        uow.commit().await.unwrap();
    }

    let uow = UnitOfWork::new(store.clone());
    let repo = uow.categories();
    let query = repo.query().filter(CategoryField::Name, Op::Eq, "Snacks");
    let found = repo.find_one(query).await.unwrap().unwrap();
    assert_eq!(found.id, Some(1));
}

#[tokio::test]
async fn test_list_by_price_orders_ascending() {
    let store = memory_store();

    {
        let uow = UnitOfWork::new(store.clone());
        uow.categories().add(&category("Drinks")).unwrap();
        uow.products().add(&product("Coffee", dec!(12.00), 1)).unwrap();
        uow.products().add(&product("Water", dec!(2.50), 1)).unwrap();
        uow.products().add(&product("Juice", dec!(7.25), 1)).unwrap();
        uow.commit().await.unwrap();
    }

    let uow = UnitOfWork::new(store.clone());
    let products = uow.products().list_by_price().await.unwrap();
    let prices: Vec<_> = products.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![dec!(2.50), dec!(7.25), dec!(12.00)]);
}

#[tokio::test]
async fn test_list_with_products_groups_by_category() {
    let store = memory_store();

    {
        let uow = UnitOfWork::new(store.clone());
        uow.categories().add(&category("Drinks")).unwrap();
        uow.categories().add(&category("Snacks")).unwrap();
        uow.categories().add(&category("Empty Shelf")).unwrap();
        uow.products().add(&product("Water", dec!(2.50), 1)).unwrap();
        uow.products().add(&product("Juice", dec!(7.25), 1)).unwrap();
        uow.products().add(&product("Chips", dec!(5.00), 2)).unwrap();
        uow.commit().await.unwrap();
    }

    let uow = UnitOfWork::new(store.clone());
    let listing = uow.categories().list_with_products().await.unwrap();

    assert_eq!(listing.len(), 3);
    assert_eq!(listing[0].name, "Drinks");
    assert_eq!(listing[0].products.len(), 2);
    assert_eq!(listing[1].products.len(), 1);
    assert_eq!(listing[1].products[0].name, "Chips");
    assert!(listing[2].products.is_empty());

    // A pure read: the projection stages nothing for commit.
    assert!(uow.pending().is_empty());
}
