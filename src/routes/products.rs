use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::DieselRepository;
use crate::routes::{deleted_response, error_response};
use crate::services::products as product_service;

#[get("/products")]
pub async fn list_products(repo: web::Data<DieselRepository>) -> impl Responder {
    match product_service::list_products(repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response(&err, "list products"),
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match product_service::get_product(repo.get_ref(), product_id.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(&err, "load product"),
    }
}

#[post("/products")]
/// Create a product. Tags listed in `tagIds` are attached in the same transaction.
pub async fn add_product(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    match product_service::create_product(repo.get_ref(), form.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(&err, "create product"),
    }
}

#[put("/products/{product_id}")]
/// Update a product. When `tagIds` or `tags` is present the tag set is replaced.
pub async fn edit_product(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditProductForm>,
) -> impl Responder {
    match product_service::update_product(
        repo.get_ref(),
        product_id.into_inner(),
        form.into_inner(),
    ) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(&err, "update product"),
    }
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = product_id.into_inner();
    match product_service::delete_product(repo.get_ref(), product_id) {
        Ok(()) => deleted_response("Product", product_id),
        Err(err) => error_response(&err, "delete product"),
    }
}
