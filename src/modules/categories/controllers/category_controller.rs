//! HTTP endpoints for categories.
//!
//! Every handler opens one unit-of-work scope for the request and commits
//! at most once.

use actix_web::{web, HttpResponse};

use crate::core::error::{AppError, Result};
use crate::core::pagination::PageQuery;
use crate::core::unit_of_work::UnitOfWork;
use crate::modules::categories::models::{Category, CreateCategoryRequest};
use crate::store::StoreHandle;

/// GET /categories
///
/// Paged listing; pagination metadata travels in the `X-Pagination`
/// response header.
pub async fn list_categories(
    store: web::Data<StoreHandle>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let params = query.into_inner().into_parameters()?;
    let uow = UnitOfWork::new(store.get_ref().clone());

    let page = uow.categories().paged(params).await?;
    let meta = serde_json::to_string(&page.meta())?;

    Ok(HttpResponse::Ok()
        .insert_header(("X-Pagination", meta))
        .json(page.into_items()))
}

/// GET /categories/products
pub async fn list_categories_with_products(
    store: web::Data<StoreHandle>,
) -> Result<HttpResponse> {
    let uow = UnitOfWork::new(store.get_ref().clone());
    let listing = uow.categories().list_with_products().await?;
    Ok(HttpResponse::Ok().json(listing))
}

/// GET /categories/{id}
pub async fn get_category(
    store: web::Data<StoreHandle>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let uow = UnitOfWork::new(store.get_ref().clone());

    let category = uow
        .categories()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("category {}", id)))?;

    Ok(HttpResponse::Ok().json(category))
}

/// POST /categories
pub async fn create_category(
    store: web::Data<StoreHandle>,
    body: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse> {
    let uow = UnitOfWork::new(store.get_ref().clone());

    let mut category = body.into_inner().into_category();
    uow.categories().add(&category)?;
    let receipt = uow.commit().await?;

    let id = receipt
        .inserted_ids
        .first()
        .copied()
        .ok_or_else(|| AppError::internal("commit returned no id for the insert"))?;
    category.id = Some(id);

    Ok(HttpResponse::Created().json(category))
}

/// PUT /categories/{id}
pub async fn update_category(
    store: web::Data<StoreHandle>,
    path: web::Path<i64>,
    body: web::Json<Category>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let mut category = body.into_inner();

    if category.id.is_some_and(|body_id| body_id != id) {
        return Err(AppError::validation(
            "category id in the body does not match the path",
        ));
    }
    category.id = Some(id);

    let uow = UnitOfWork::new(store.get_ref().clone());
    uow.categories().update(&category)?;
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(category))
}

/// DELETE /categories/{id}
///
/// Returns the removed category.
pub async fn delete_category(
    store: web::Data<StoreHandle>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let uow = UnitOfWork::new(store.get_ref().clone());

    let category = uow
        .categories()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("category {}", id)))?;

    uow.categories().delete(&category)?;
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(category))
}

/// Configure category routes
pub fn configure_category_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(list_categories))
            .route("", web::post().to(create_category))
            .route("/products", web::get().to(list_categories_with_products))
            .route("/{id}", web::get().to(get_category))
            .route("/{id}", web::put().to(update_category))
            .route("/{id}", web::delete().to(delete_category)),
    );
}
