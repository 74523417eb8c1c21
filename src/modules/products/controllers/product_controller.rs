//! HTTP endpoints for products.
//!
//! Every handler opens one unit-of-work scope for the request and commits
//! at most once.

use actix_web::{web, HttpResponse};

use crate::core::error::{AppError, Result};
use crate::core::pagination::PageQuery;
use crate::core::unit_of_work::UnitOfWork;
use crate::modules::products::models::{CreateProductRequest, Product};
use crate::store::StoreHandle;

/// GET /products
///
/// Paged listing; pagination metadata travels in the `X-Pagination`
/// response header.
pub async fn list_products(
    store: web::Data<StoreHandle>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let params = query.into_inner().into_parameters()?;
    let uow = UnitOfWork::new(store.get_ref().clone());

    let page = uow.products().paged(params).await?;
    let meta = serde_json::to_string(&page.meta())?;

    Ok(HttpResponse::Ok()
        .insert_header(("X-Pagination", meta))
        .json(page.into_items()))
}

/// GET /products/by-price
pub async fn list_products_by_price(store: web::Data<StoreHandle>) -> Result<HttpResponse> {
    let uow = UnitOfWork::new(store.get_ref().clone());
    let products = uow.products().list_by_price().await?;
    Ok(HttpResponse::Ok().json(products))
}

/// GET /products/{id}
pub async fn get_product(
    store: web::Data<StoreHandle>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let uow = UnitOfWork::new(store.get_ref().clone());

    let product = uow
        .products()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("product {}", id)))?;

    Ok(HttpResponse::Ok().json(product))
}

/// POST /products
pub async fn create_product(
    store: web::Data<StoreHandle>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse> {
    let uow = UnitOfWork::new(store.get_ref().clone());

    let mut product = body.into_inner().into_product();
    uow.products().add(&product)?;
    let receipt = uow.commit().await?;

    let id = receipt
        .inserted_ids
        .first()
        .copied()
        .ok_or_else(|| AppError::internal("commit returned no id for the insert"))?;
    product.id = Some(id);

    Ok(HttpResponse::Created().json(product))
}

/// PUT /products/{id}
pub async fn update_product(
    store: web::Data<StoreHandle>,
    path: web::Path<i64>,
    body: web::Json<Product>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let mut product = body.into_inner();

    if product.id.is_some_and(|body_id| body_id != id) {
        return Err(AppError::validation(
            "product id in the body does not match the path",
        ));
    }
    product.id = Some(id);

    let uow = UnitOfWork::new(store.get_ref().clone());
    uow.products().update(&product)?;
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(product))
}

/// DELETE /products/{id}
///
/// Returns the removed product.
pub async fn delete_product(
    store: web::Data<StoreHandle>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let uow = UnitOfWork::new(store.get_ref().clone());

    let product = uow
        .products()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("product {}", id)))?;

    uow.products().delete(&product)?;
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(product))
}

/// Configure product routes
pub fn configure_product_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(list_products))
            .route("", web::post().to(create_product))
            .route("/by-price", web::get().to(list_products_by_price))
            .route("/{id}", web::get().to(get_product))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}", web::delete().to(delete_product)),
    );
}
